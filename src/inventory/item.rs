use std::collections::HashMap;

use getset::Getters;
use serde::{Deserialize, Serialize};

use super::LedgerError;

/// A catalog entry. The code is fixed at creation; description and unit can
/// be edited later through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct Item {
    code: String,
    description: String,
    unit: String,
}

impl Item {
    pub fn new(code: &str, description: &str, unit: &str) -> Result<Item, LedgerError> {
        if code.trim().is_empty() {
            return Err(LedgerError::EmptyItemCode);
        }

        Ok(Item {
            code: code.trim().to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
        })
    }
}

/// Insertion-ordered item collection with unique codes.
///
/// Stored as a plain item list; the code index is rebuilt on load and a file
/// carrying duplicate codes is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl ItemCatalog {
    pub fn new() -> ItemCatalog {
        ItemCatalog::default()
    }

    /// Registers a new item. The catalog is left untouched when the code is
    /// already taken or empty.
    pub fn add(&mut self, code: &str, description: &str, unit: &str) -> Result<&Item, LedgerError> {
        let item = Item::new(code, description, unit)?;
        if self.index.contains_key(&item.code) {
            return Err(LedgerError::DuplicateItem(item.code));
        }

        let idx = self.items.len();
        self.index.insert(item.code.clone(), idx);
        self.items.push(item);

        Ok(&self.items[idx])
    }

    pub fn get(&self, code: &str) -> Result<&Item, LedgerError> {
        self.index
            .get(code)
            .map(|&idx| &self.items[idx])
            .ok_or_else(|| LedgerError::ItemNotFound(code.to_string()))
    }

    /// Edits description and/or unit. The code itself can never be changed
    /// through this call.
    pub fn update(
        &mut self,
        code: &str,
        description: Option<&str>,
        unit: Option<&str>,
    ) -> Result<&Item, LedgerError> {
        let idx = *self
            .index
            .get(code)
            .ok_or_else(|| LedgerError::ItemNotFound(code.to_string()))?;

        let item = &mut self.items[idx];
        if let Some(description) = description {
            item.description = description.to_string();
        }
        if let Some(unit) = unit {
            item.unit = unit.to_string();
        }

        Ok(&self.items[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl TryFrom<Vec<Item>> for ItemCatalog {
    type Error = LedgerError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        let mut index = HashMap::new();
        for (idx, item) in items.iter().enumerate() {
            if index.insert(item.code.clone(), idx).is_some() {
                return Err(LedgerError::DuplicateItem(item.code.clone()));
            }
        }

        Ok(ItemCatalog { items, index })
    }
}

impl From<ItemCatalog> for Vec<Item> {
    fn from(catalog: ItemCatalog) -> Self {
        catalog.items
    }
}
