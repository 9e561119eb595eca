//! World - the context every engine operation runs against
//!
//! Owns the player creature, the deposit it gathers from, the static
//! catalogs and the engine configuration. Nothing here is global; callers
//! build a `World` and pass it around.

use crate::actions::catalog::{ActionDef, ActionReport};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::crafting::fabrication::FabricationReport;
use crate::crafting::schematic::Schematic;
use crate::entity::creature::{Creature, CreatureSnapshot};
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};
use crate::world::deposit::Deposit;
use crate::world::loader::Catalogs;

#[derive(Debug)]
pub struct World {
    pub current_tick: u64,
    config: EngineConfig,
    catalogs: Catalogs,
    player: Creature,
    deposit: Deposit,
}

impl World {
    /// Build a world from validated configuration and catalogs
    pub fn new(config: EngineConfig, catalogs: Catalogs) -> Result<Self> {
        config.validate()?;
        catalogs.validate()?;

        let player = Creature::new(
            config.player_name.clone(),
            &config.player_species,
            &catalogs.species,
        )?
        .with_stamina_regen(config.stamina_regen_per_second);
        let deposit = Deposit::from_catalog(config.deposit_name.clone(), &catalogs.items);

        tracing::info!(
            player = player.name(),
            species = %config.player_species,
            deposit = deposit.name(),
            schematics = catalogs.schematics.len(),
            actions = catalogs.actions.len(),
            "World created"
        );

        Ok(Self {
            current_tick: 0,
            config,
            catalogs,
            player,
            deposit,
        })
    }

    /// Default configuration with the built-in catalogs
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default(), Catalogs::with_defaults())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn player(&self) -> &Creature {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Creature {
        &mut self.player
    }

    pub fn deposit(&self) -> &Deposit {
        &self.deposit
    }

    pub fn deposit_mut(&mut self) -> &mut Deposit {
        &mut self.deposit
    }

    pub fn snapshot(&self) -> CreatureSnapshot {
        self.player.snapshot()
    }

    /// Advance all tickable state by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<SimulationEvent> {
        run_simulation_tick(self, dt)
    }

    /// Fabricate a schematic by id on behalf of the player
    pub fn fabricate(&mut self, schematic_id: &str) -> Result<FabricationReport> {
        let schematic = self.catalogs.schematics.require(schematic_id)?;
        self.player.fabricate(schematic)
    }

    /// Schematics the player can fabricate right now, in catalog order
    pub fn craftable(&self) -> Vec<&Schematic> {
        self.catalogs
            .schematics
            .all()
            .iter()
            .filter(|s| self.player.can_fabricate(s))
            .collect()
    }

    /// Actions the player can perform right now, in catalog order
    pub fn available_actions(&self) -> Vec<&ActionDef> {
        self.catalogs
            .actions
            .available(&self.player, &self.deposit)
            .collect()
    }

    /// Perform an action by id, drawing its yield from the deposit
    pub fn perform_action(&mut self, action_id: &str) -> Result<ActionReport> {
        let action = self.catalogs.actions.require(action_id)?;
        action.perform(&mut self.player, &mut self.deposit)
    }
}
