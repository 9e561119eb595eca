pub mod catalog;

pub use catalog::{ActionAvailability, ActionCatalog, ActionDef, ActionReport, ToolRequirement, Yield};
