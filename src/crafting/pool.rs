//! Resource pool - named-quantity ledger owned by a creature or deposit
//!
//! The map is shared copy-on-write: `snapshot()` hands out a cheap handle
//! that never observes later writes.

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};

/// Immutable view of a pool's contents at one point in time
pub type PoolSnapshot = Arc<AHashMap<String, u32>>;

/// Sparse map from item name to quantity. Zero entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    entries: PoolSnapshot,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from (name, amount) pairs; zero amounts are dropped
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut map = AHashMap::new();
        for (name, amount) in entries {
            if amount > 0 {
                *map.entry(name.into()).or_insert(0) += amount;
            }
        }
        Self {
            entries: Arc::new(map),
        }
    }

    /// Get current amount of an item (0 if absent)
    pub fn get(&self, name: &str) -> u32 {
        self.entries.get(name).copied().unwrap_or(0)
    }

    /// Whether an entry exists; entries at zero are removed
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Change an item's quantity by `delta` and return the new quantity.
    ///
    /// Callers must not withdraw more than is held. Debug builds assert on
    /// it; release builds clamp at zero and log.
    pub fn add(&mut self, name: &str, delta: i64) -> u32 {
        let current = i64::from(self.get(name));
        let mut next = current + delta;

        debug_assert!(
            next >= 0,
            "pool underflow on {}: {} + {}",
            name,
            current,
            delta
        );
        if next < 0 {
            tracing::error!(item = name, current, delta, "pool underflow clamped to zero");
            next = 0;
        }
        let next = u32::try_from(next).unwrap_or(u32::MAX);

        let map = Arc::make_mut(&mut self.entries);
        if next == 0 {
            map.remove(name);
        } else {
            map.insert(name.to_string(), next);
        }
        next
    }

    /// Move `amount` of an item into another pool
    pub fn transfer(&mut self, name: &str, amount: u32, target: &mut ResourcePool) -> Result<()> {
        let available = self.get(name);
        if available < amount {
            return Err(ForgeError::InsufficientResource {
                name: name.to_string(),
                requested: amount,
                available,
            });
        }
        self.add(name, -i64::from(amount));
        target.add(name, i64::from(amount));
        Ok(())
    }

    /// Check if the pool holds at least the given amount of every item
    pub fn has_all<'a, I>(&self, requirements: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        requirements
            .into_iter()
            .all(|(name, amount)| self.get(name) >= amount)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        Arc::clone(&self.entries)
    }

    /// Entries sorted by name, for stable display
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_add_and_remove() {
        let mut pool = ResourcePool::new();

        assert_eq!(pool.add("rock", 3), 3);
        assert_eq!(pool.get("rock"), 3);

        assert_eq!(pool.add("rock", -2), 1);
        assert_eq!(pool.get("rock"), 1);
    }

    #[test]
    fn test_pool_is_sparse() {
        let mut pool = ResourcePool::new();
        pool.add("rock", 2);
        pool.add("rock", -2);

        assert_eq!(pool.get("rock"), 0);
        assert!(pool.is_empty());
        assert!(pool.snapshot().get("rock").is_none());
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_writes() {
        let mut pool = ResourcePool::from_entries([("wood", 4)]);
        let before = pool.snapshot();

        pool.add("wood", 1);
        pool.add("fiber", 5);

        assert_eq!(before.get("wood"), Some(&4));
        assert!(before.get("fiber").is_none());
        assert_eq!(pool.get("wood"), 5);
    }

    #[test]
    fn test_transfer() {
        let mut earth = ResourcePool::from_entries([("rock", 10)]);
        let mut player = ResourcePool::new();

        earth.transfer("rock", 4, &mut player).unwrap();
        assert_eq!(earth.get("rock"), 6);
        assert_eq!(player.get("rock"), 4);
    }

    #[test]
    fn test_transfer_insufficient() {
        let mut earth = ResourcePool::from_entries([("rock", 1)]);
        let mut player = ResourcePool::new();

        let err = earth.transfer("rock", 2, &mut player).unwrap_err();
        match err {
            ForgeError::InsufficientResource {
                name,
                requested,
                available,
            } => {
                assert_eq!(name, "rock");
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("Expected InsufficientResource, got {other:?}"),
        }

        // Neither side moved
        assert_eq!(earth.get("rock"), 1);
        assert!(player.is_empty());
    }

    #[test]
    fn test_has_all() {
        let pool = ResourcePool::from_entries([("rock", 2), ("wood", 1)]);

        assert!(pool.has_all([("rock", 2), ("wood", 1)]));
        assert!(!pool.has_all([("rock", 3)]));
        assert!(pool.has_all(std::iter::empty()));
    }

    #[test]
    fn test_from_entries_drops_zero_and_merges() {
        let pool = ResourcePool::from_entries([("rock", 0), ("wood", 1), ("wood", 2)]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get("wood"), 3);
    }

    #[test]
    fn test_sorted() {
        let pool = ResourcePool::from_entries([("wood", 1), ("fiber", 2), ("rock", 3)]);
        let names: Vec<_> = pool.sorted().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["fiber", "rock", "wood"]);
    }
}
