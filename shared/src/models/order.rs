//! Order Model
//!
//! 订单与订单项实体，以及状态机的显式迁移函数。
//!
//! Status lives in a closed transition table rather than a free-form enum
//! field: every mutation goes through [`OrderStatus::transition`] /
//! [`PaymentStatus::transition`], so an invalid jump is rejected before it
//! ever reaches storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Enums
// ============================================================================

/// 订单类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// 堂食
    #[default]
    DineIn,
    /// 打包自取
    Takeaway,
    /// 外送
    Delivery,
}

/// Order lifecycle status
///
/// Happy path: PENDING → CONFIRMED → PREPARING → READY → COMPLETED.
/// CANCELLED is reachable from any non-terminal state. Skip-ahead transitions
/// (e.g. PENDING → READY) are allowed as a staff override; exits from a
/// terminal state are not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

/// 支付状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// 未支付 (初始状态)
    #[default]
    Pending,
    /// 已支付
    Paid,
    /// 支付失败 (可重试)
    Failed,
    /// 已退款 (仅从已支付可达)
    Refunded,
}

/// 支付方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

/// Per-item preparation status ("the burger is plated, fries still cooking")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
}

/// Rejected state-machine transition
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: String,
    pub to: String,
}

impl InvalidTransition {
    fn new(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl OrderStatus {
    /// COMPLETED and CANCELLED are terminal: no transition leaves them.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Statuses visible on the kitchen queue
    pub fn is_kitchen_visible(self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Preparing
        )
    }

    /// Whether `self -> to` is a legal transition.
    ///
    /// Same-state transitions are accepted (idempotent updates). Forward
    /// jumps are accepted; any exit from a terminal state is not.
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        if self == to {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match to {
            OrderStatus::Cancelled => true,
            OrderStatus::Pending => false,
            OrderStatus::Confirmed => self == OrderStatus::Pending,
            OrderStatus::Preparing => matches!(self, OrderStatus::Pending | OrderStatus::Confirmed),
            OrderStatus::Ready => matches!(
                self,
                OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Preparing
            ),
            OrderStatus::Completed => true,
        }
    }

    /// Validate and apply a transition.
    pub fn transition(self, to: OrderStatus) -> Result<OrderStatus, InvalidTransition> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(InvalidTransition::new(self, to))
        }
    }
}

impl PaymentStatus {
    /// Whether `self -> to` is a legal payment transition.
    ///
    /// PENDING → PAID | FAILED; FAILED → PENDING (retry) | PAID;
    /// PAID → REFUNDED. Same-state is idempotent.
    pub fn can_transition_to(self, to: PaymentStatus) -> bool {
        if self == to {
            return true;
        }
        match (self, to) {
            (PaymentStatus::Pending, PaymentStatus::Paid)
            | (PaymentStatus::Pending, PaymentStatus::Failed)
            | (PaymentStatus::Failed, PaymentStatus::Pending)
            | (PaymentStatus::Failed, PaymentStatus::Paid)
            | (PaymentStatus::Paid, PaymentStatus::Refunded) => true,
            _ => false,
        }
    }

    /// Validate and apply a transition.
    pub fn transition(self, to: PaymentStatus) -> Result<PaymentStatus, InvalidTransition> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(InvalidTransition::new(self, to))
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        };
        write!(f, "{s}")
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Order line item
///
/// `unit_price` is captured at order time — a later menu price change never
/// touches historical orders. The item set is immutable after checkout; only
/// `status` may change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    /// Name snapshot for display
    pub name: String,
    /// Unit price in cents, snapshotted at order time
    pub unit_price: i64,
    pub quantity: i32,
    /// Opaque customization payload (sizes, add-ons, modifications)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customizations: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub status: ItemStatus,
}

impl OrderItem {
    /// Line total in cents
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }
}

/// Order entity
///
/// Monetary invariant: `total == subtotal + tax - discount + tip`, all in
/// cents, re-derived on every mutation that touches an addend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Human-readable order number, e.g. `ORD-0001`
    pub order_number: String,
    pub order_type: OrderType,
    pub table_id: Option<String>,
    /// Table number snapshot for display
    pub table_number: Option<i32>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    /// 金额字段，单位: 分
    pub subtotal: i64,
    pub tax: i64,
    pub discount: i64,
    pub tip: i64,
    pub total: i64,
    pub special_instructions: Option<String>,
    pub items: Vec<OrderItem>,
    /// Unix epoch milliseconds
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

// ============================================================================
// Request Payloads
// ============================================================================

/// Cart line submitted at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub menu_item_id: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customizations: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub order_type: OrderType,
    pub table_id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Vec<CartItemInput>,
    pub special_instructions: Option<String>,
}

/// Update payment payload
///
/// `tip` and `amount_received` are in cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub tip: Option<i64>,
    pub amount_received: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions() {
        let path = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn skip_ahead_is_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn terminal_states_cannot_be_left() {
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
        let err = OrderStatus::Completed
            .transition(OrderStatus::Cancelled)
            .unwrap_err();
        assert_eq!(err.from, "COMPLETED");
        assert_eq!(err.to, "CANCELLED");
    }

    #[test]
    fn no_backwards_transitions() {
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Confirmed));
    }

    #[test]
    fn cancel_reachable_from_any_non_terminal() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert!(s.can_transition_to(OrderStatus::Cancelled), "{s}");
        }
    }

    #[test]
    fn payment_transitions() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Failed));
        assert!(PaymentStatus::Failed.can_transition_to(PaymentStatus::Pending));
        assert!(PaymentStatus::Failed.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Refunded));

        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Refunded.can_transition_to(PaymentStatus::Paid));
        assert!(!PaymentStatus::Pending.can_transition_to(PaymentStatus::Refunded));
    }

    #[test]
    fn same_state_is_idempotent() {
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Preparing));
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Paid));
    }

    #[test]
    fn enums_serialize_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"PREPARING\""
        );
        assert_eq!(
            serde_json::from_str::<OrderType>("\"DINE_IN\"").unwrap(),
            OrderType::DineIn
        );
        assert!(serde_json::from_str::<OrderStatus>("\"EATEN\"").is_err());
    }
}
