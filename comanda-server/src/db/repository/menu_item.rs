//! Menu Item Repository

use super::{RepoError, RepoResult};
use crate::db::Storage;
use crate::orders::money;
use shared::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct MenuItemRepository {
    storage: Storage,
}

impl MenuItemRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All menu items, optionally narrowed to a category and/or availability.
    ///
    /// Sorted by (category, sort_order, name) for stable menu rendering.
    pub fn find_all(
        &self,
        category: Option<&str>,
        available_only: bool,
    ) -> RepoResult<Vec<MenuItem>> {
        let mut items = self.storage.all_menu_items()?;
        if let Some(category) = category {
            items.retain(|i| i.category == category);
        }
        if available_only {
            items.retain(|i| i.is_available);
        }
        items.sort_by(|a, b| {
            (a.category.as_str(), a.sort_order, a.name.as_str())
                .cmp(&(b.category.as_str(), b.sort_order, b.name.as_str()))
        });
        Ok(items)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        Ok(self.storage.get_menu_item(id)?)
    }

    pub fn create(&self, payload: MenuItemCreate) -> RepoResult<MenuItem> {
        if payload.name.trim().is_empty() {
            return Err(RepoError::Validation("name must not be empty".to_string()));
        }
        if payload.price < 0 || payload.price > money::MAX_UNIT_PRICE {
            return Err(RepoError::Validation(format!(
                "price out of range: {}",
                payload.price
            )));
        }

        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category: payload.category,
            is_available: payload.is_available.unwrap_or(true),
            preparation_minutes: payload.preparation_minutes,
            sort_order: payload.sort_order.unwrap_or(0),
        };
        self.storage.put_menu_item(&item)?;
        Ok(item)
    }

    pub fn update(&self, id: &str, payload: MenuItemUpdate) -> RepoResult<MenuItem> {
        let mut item = self
            .storage
            .get_menu_item(id)?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?;

        if let Some(name) = payload.name {
            item.name = name;
        }
        if let Some(description) = payload.description {
            item.description = Some(description);
        }
        if let Some(price) = payload.price {
            if price < 0 || price > money::MAX_UNIT_PRICE {
                return Err(RepoError::Validation(format!("price out of range: {price}")));
            }
            item.price = price;
        }
        if let Some(category) = payload.category {
            item.category = category;
        }
        if let Some(is_available) = payload.is_available {
            item.is_available = is_available;
        }
        if let Some(preparation_minutes) = payload.preparation_minutes {
            item.preparation_minutes = Some(preparation_minutes);
        }
        if let Some(sort_order) = payload.sort_order {
            item.sort_order = sort_order;
        }

        self.storage.put_menu_item(&item)?;
        Ok(item)
    }

    pub fn delete(&self, id: &str) -> RepoResult<bool> {
        Ok(self.storage.delete_menu_item(id)?)
    }

    /// Category projection: distinct category names with item counts
    pub fn categories(&self) -> RepoResult<Vec<MenuCategory>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for item in self.storage.all_menu_items()? {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(name, item_count)| MenuCategory { name, item_count })
            .collect())
    }
}
