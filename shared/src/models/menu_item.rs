//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// The order engine only ever reads `price` and `is_available`; everything
/// else is display metadata managed by the admin CRUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: i64,
    /// Category name (free-form, grouped for the menu views)
    pub category: String,
    pub is_available: bool,
    /// Estimated preparation time in minutes
    pub preparation_minutes: Option<i32>,
    pub sort_order: i32,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: i64,
    pub category: String,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}

/// Category projection for the menu views (derived, not stored)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub name: String,
    pub item_count: usize,
}
