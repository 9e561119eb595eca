//! Load the static catalogs a world is built from
//!
//! A data directory holds `items.toml`, `species.toml`, `schematics.toml`
//! and `actions.toml`. Everything is cross-checked against the item catalog
//! before a world may use it.

use std::path::Path;

use crate::actions::catalog::ActionCatalog;
use crate::core::error::Result;
use crate::crafting::catalog::ItemCatalog;
use crate::crafting::schematic::SchematicCatalog;
use crate::entity::species::SpeciesCatalog;

pub const ITEMS_FILE: &str = "items.toml";
pub const SPECIES_FILE: &str = "species.toml";
pub const SCHEMATICS_FILE: &str = "schematics.toml";
pub const ACTIONS_FILE: &str = "actions.toml";

/// All static configuration consumed by a world
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub items: ItemCatalog,
    pub species: SpeciesCatalog,
    pub schematics: SchematicCatalog,
    pub actions: ActionCatalog,
}

impl Catalogs {
    /// Built-in catalogs
    pub fn with_defaults() -> Self {
        Self {
            items: ItemCatalog::with_defaults(),
            species: SpeciesCatalog::with_defaults(),
            schematics: SchematicCatalog::with_defaults(),
            actions: ActionCatalog::with_defaults(),
        }
    }

    /// Load and validate every catalog from a data directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let catalogs = Self {
            items: ItemCatalog::load_from_toml(&dir.join(ITEMS_FILE))?,
            species: SpeciesCatalog::load_from_toml(&dir.join(SPECIES_FILE))?,
            schematics: SchematicCatalog::load_from_toml(&dir.join(SCHEMATICS_FILE))?,
            actions: ActionCatalog::load_from_toml(&dir.join(ACTIONS_FILE))?,
        };
        catalogs.validate()?;
        tracing::info!(dir = %dir.display(), "Catalogs loaded");
        Ok(catalogs)
    }

    /// Cross-check schematics and actions against the item catalog
    pub fn validate(&self) -> Result<()> {
        self.schematics.validate(&self.items)?;
        self.actions.validate(&self.items)?;
        Ok(())
    }
}
