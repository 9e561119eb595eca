//! Engine configuration with documented constants
//!
//! The tunables that drive the creature simulation live here. There is no
//! global accessor: a `World` is built from an explicit `EngineConfig`.

use crate::core::error::{ForgeError, Result};

/// Configuration for the fabrication engine and its tick driver
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // === STAMINA ===
    /// Stamina regained per second of simulated time
    ///
    /// At the default rate (1.0), a human with 100 max stamina refills
    /// from empty in 100 seconds. Fabrication costs range from 1 to 25.
    pub stamina_regen_per_second: f32,

    // === TICK DRIVER ===
    /// Upper bound on the `dt` accepted by a single tick (seconds)
    ///
    /// A frame callback can deliver a very large gap after the host was
    /// suspended. Anything above this is clamped so regeneration cannot
    /// jump straight to full.
    pub max_tick_seconds: f32,

    // === WORLD SETUP ===
    /// Species key used for the player creature
    pub player_species: String,

    /// Display name of the player creature
    pub player_name: String,

    /// Name of the deposit that actions gather from
    pub deposit_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stamina_regen_per_second: 1.0,
            max_tick_seconds: 0.25,
            player_species: "human".into(),
            player_name: "Player".into(),
            deposit_name: "Earth".into(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.stamina_regen_per_second > 0.0) {
            return Err(ForgeError::invalid_config(format!(
                "stamina_regen_per_second ({}) must be positive",
                self.stamina_regen_per_second
            )));
        }

        if !(self.max_tick_seconds > 0.0) {
            return Err(ForgeError::invalid_config(format!(
                "max_tick_seconds ({}) must be positive",
                self.max_tick_seconds
            )));
        }

        if self.player_species.trim().is_empty() {
            return Err(ForgeError::invalid_config("player_species must not be empty"));
        }

        Ok(())
    }

    /// Clamp a raw frame delta into the accepted range
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() || dt <= 0.0 {
            0.0
        } else {
            dt.min(self.max_tick_seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_regen() {
        let config = EngineConfig {
            stamina_regen_per_second: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ForgeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_nan_tick_clamp() {
        let config = EngineConfig {
            max_tick_seconds: f32::NAN,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_dt() {
        let config = EngineConfig::default();
        assert_eq!(config.clamp_dt(0.1), 0.1);
        assert_eq!(config.clamp_dt(10.0), 0.25);
        assert_eq!(config.clamp_dt(-1.0), 0.0);
        assert_eq!(config.clamp_dt(f32::NAN), 0.0);
    }
}
