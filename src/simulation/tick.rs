//! Tick system - advances simulated time
//!
//! Each tick clamps the frame delta, ages every creature and regenerates
//! its stamina. Threshold crossings are reported back as events for the
//! caller to display.

use crate::world::state::World;

/// Events generated during a simulation tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// Stamina climbed back to the species maximum
    StaminaRestored { creature: String, tick: u64 },
    /// The creature outlived its species' maximum age
    ReachedMaxAge { creature: String, tick: u64 },
}

/// Run a single simulation tick of `dt` seconds
///
/// `dt` is clamped by `EngineConfig::clamp_dt`; a zero or negative delta
/// still advances the tick counter but changes no state.
pub fn run_simulation_tick(world: &mut World, dt: f32) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    let dt = world.config().clamp_dt(dt);
    let tick = world.current_tick + 1;

    let player = world.player_mut();
    let was_full = player.stamina() >= player.max_stamina();
    let was_of_age = player.age() >= player.max_age();

    player.tick(dt);

    if !was_full && player.stamina() >= player.max_stamina() {
        events.push(SimulationEvent::StaminaRestored {
            creature: player.name().to_string(),
            tick,
        });
    }
    if !was_of_age && player.age() >= player.max_age() {
        tracing::info!(creature = player.name(), age = player.age(), "Reached max age");
        events.push(SimulationEvent::ReachedMaxAge {
            creature: player.name().to_string(),
            tick,
        });
    }

    world.current_tick = tick;
    tracing::trace!(tick, dt, "Tick complete");
    events
}
