//! Order lifecycle engine
//!
//! - **ledger**: order creation, query views and state-machine mutations
//! - **money**: cents arithmetic and the total invariant
//!
//! The status/payment transition tables themselves live with the models in
//! `shared::models::order` so clients can validate locally before calling.

pub mod ledger;
pub mod money;

pub use ledger::{OrderFilter, OrderLedger};

#[cfg(test)]
mod tests;
