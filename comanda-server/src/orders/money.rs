//! Money calculation utilities
//!
//! All monetary amounts are integer minor units (cents, `i64`) so the total
//! invariant `total == subtotal + tax - discount + tip` holds exactly under
//! repeated mutation. The only fractional step — applying the tax rate — goes
//! through `rust_decimal` and is rounded half-up to whole cents.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

use crate::utils::{AppError, AppResult};
use shared::models::CartItemInput;

/// Maximum allowed unit price (1,000,000.00 in cents)
pub const MAX_UNIT_PRICE: i64 = 100_000_000;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9_999;
/// Maximum allowed tip / received amount (1,000,000.00 in cents)
pub const MAX_PAYMENT_AMOUNT: i64 = 100_000_000;

/// Validate a cart line before any pricing happens
pub fn validate_cart_item(item: &CartItemInput) -> AppResult<()> {
    if item.quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be a positive integer, got {} for menu item {}",
            item.quantity, item.menu_item_id
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
            item.quantity
        )));
    }
    Ok(())
}

/// Line total in cents (unit price × quantity), overflow-checked
pub fn line_total(unit_price: i64, quantity: i32) -> AppResult<i64> {
    unit_price
        .checked_mul(quantity as i64)
        .ok_or_else(|| AppError::validation("line total overflows".to_string()))
}

/// Checked accumulation for the subtotal
pub fn accumulate(subtotal: i64, line_total: i64) -> AppResult<i64> {
    subtotal
        .checked_add(line_total)
        .ok_or_else(|| AppError::validation("subtotal overflows".to_string()))
}

/// Tax in cents for a subtotal at the given percent rate, rounded half-up
pub fn tax_for_subtotal(subtotal: i64, rate_percent: u32) -> AppResult<i64> {
    let tax = Decimal::from(subtotal) * Decimal::from(rate_percent) / Decimal::from(100u32);
    tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| AppError::validation("tax amount overflows".to_string()))
}

/// The one formula for an order total. Always re-derived from the source
/// fields — never incremented in place, so a retried mutation cannot
/// double-count.
pub fn order_total(subtotal: i64, tax: i64, discount: i64, tip: i64) -> i64 {
    subtotal + tax - discount + tip
}

/// Render cents as a decimal string, e.g. `3550` → `"35.50"`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
