//! Deposits - non-creature owners of natural resources (e.g. a planet)

use crate::core::types::EntityId;
use crate::crafting::catalog::ItemCatalog;
use crate::crafting::pool::ResourcePool;

#[derive(Debug, Clone)]
pub struct Deposit {
    id: EntityId,
    name: String,
    pool: ResourcePool,
}

impl Deposit {
    pub fn new(name: impl Into<String>, pool: ResourcePool) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            pool,
        }
    }

    /// Seed a deposit with every `resource`-classified catalog item
    pub fn from_catalog(name: impl Into<String>, items: &ItemCatalog) -> Self {
        Self::new(name, ResourcePool::from_entries(items.natural_resources()))
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ResourcePool {
        &mut self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_catalog_seeds_natural_resources() {
        let earth = Deposit::from_catalog("Earth", &ItemCatalog::with_defaults());
        assert_eq!(earth.name(), "Earth");
        assert_eq!(earth.pool().get("rock"), 10_000);
        assert_eq!(earth.pool().get("wood"), 5_000);
        assert_eq!(earth.pool().get("sharpened_stone"), 0);
    }
}
