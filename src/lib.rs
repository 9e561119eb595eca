//! Creature Forge - fabrication and body-damage engine for creature sims

pub mod actions;
pub mod core;
pub mod crafting;
pub mod entity;
pub mod simulation;
pub mod world;
