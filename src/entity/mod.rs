pub mod body;
pub mod creature;
pub mod species;

pub use body::{BodyPart, BodyPartSet, BodyPartType};
pub use creature::{Creature, CreatureSnapshot};
pub use species::{PartTemplate, SpeciesCatalog, SpeciesConfig};
