//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for creatures and deposits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated seconds since an entity was created
pub type Seconds = f64;

/// Pluralize a display label for a count ("1 Rock", "3 Rocks")
pub fn plural(label: &str, amount: u32) -> String {
    if amount == 1 {
        format!("{} {}", amount, label)
    } else {
        format!("{} {}s", amount, label)
    }
}
