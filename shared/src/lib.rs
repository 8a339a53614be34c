//! Shared types for the Comanda platform
//!
//! Common types used by the server and the client front-ends (customer menu,
//! kitchen display, cashier, admin): domain models, message bus events and
//! request/response payloads.

pub mod message;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Message bus re-exports (for convenient access)
pub use message::{BusMessage, EventType};
