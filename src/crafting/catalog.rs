//! Item catalog - every item name the economy knows about
//!
//! Goods and tools share one pool per owner; the catalog entry's `kind`
//! is what tells them apart.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};

/// Whether an item is used up like a material or kept like an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Good,
    Tool,
}

/// Where an item comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Occurs naturally and is seeded into deposits
    Resource,
    /// Only obtainable by fabrication
    Crafted,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDef {
    pub id: String,
    pub label: String,
    pub kind: ItemKind,
    #[serde(default = "default_classification")]
    pub classification: Classification,
    /// Starting amount in a deposit, for `Resource` items
    #[serde(default)]
    pub amount: u32,
}

fn default_classification() -> Classification {
    Classification::Crafted
}

/// Catalog of all known items
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<ItemDef>,
    by_id: AHashMap<String, usize>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in items
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        let defaults = [
            ("rock", "Rock", ItemKind::Good, Classification::Resource, 10_000),
            ("wood", "Wood", ItemKind::Good, Classification::Resource, 5_000),
            ("fiber", "Fiber", ItemKind::Good, Classification::Crafted, 0),
            (
                "sharpened_stone",
                "Sharpened Stone",
                ItemKind::Tool,
                Classification::Crafted,
                0,
            ),
        ];
        for (id, label, kind, classification, amount) in defaults {
            catalog.insert(ItemDef {
                id: id.into(),
                label: label.into(),
                kind,
                classification,
                amount,
            });
        }
        catalog
    }

    /// Add an item; duplicate ids are rejected
    pub fn add(&mut self, item: ItemDef) -> Result<()> {
        if self.by_id.contains_key(&item.id) {
            return Err(ForgeError::invalid_config(format!(
                "Duplicate item \"{}\"",
                item.id
            )));
        }
        self.insert(item);
        Ok(())
    }

    fn insert(&mut self, item: ItemDef) {
        self.by_id.insert(item.id.clone(), self.items.len());
        self.items.push(item);
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Fail with `InvalidConfiguration` unless `id` is known
    pub fn require(&self, id: &str, context: &str) -> Result<&ItemDef> {
        self.get(id).ok_or_else(|| {
            ForgeError::invalid_config(format!("{} references unknown item \"{}\"", context, id))
        })
    }

    /// Display label, falling back to the raw id
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|i| i.label.as_str()).unwrap_or(id)
    }

    pub fn kind(&self, id: &str) -> Option<ItemKind> {
        self.get(id).map(|i| i.kind)
    }

    /// Items that occur naturally, with their deposit amounts
    pub fn natural_resources(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items
            .iter()
            .filter(|i| i.classification == Classification::Resource)
            .map(|i| (i.id.as_str(), i.amount))
    }

    pub fn all(&self) -> &[ItemDef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load items from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse items from TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlItems = toml::from_str(content)?;

        let mut catalog = Self::new();
        for item in toml_data.items {
            catalog.add(item)?;
        }
        tracing::info!(count = catalog.len(), "Loaded item catalog");
        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlItems {
    items: Vec<ItemDef>,
}
