//! Crafting layer - item ledgers, schematics, and the fabrication engine

pub mod catalog;
pub mod fabrication;
pub mod pool;
pub mod schematic;

pub use catalog::{Classification, ItemCatalog, ItemDef, ItemKind};
pub use fabrication::{can_fabricate, fabricate, shortfall, FabricationReport, Shortfall};
pub use pool::{PoolSnapshot, ResourcePool};
pub use schematic::{ItemRequirement, Outcome, PartCost, Schematic, SchematicCatalog};
