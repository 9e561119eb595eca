//! Species configuration - body plans and stamina limits
//!
//! A species is looked up by key when a creature is created. The catalog is
//! validated on load: unknown part types and duplicate keys are rejected.

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::error::{ForgeError, Result};
use crate::core::types::Seconds;
use crate::entity::body::{BodyPart, BodyPartType};

/// One part slot in a species body plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartTemplate {
    pub part_type: BodyPartType,
    pub health: u32,
    pub label: String,
    pub critical: bool,
}

impl PartTemplate {
    pub fn build(&self) -> BodyPart {
        let part = BodyPart::new(self.part_type, self.health, self.label.clone());
        if self.critical {
            part.critical()
        } else {
            part
        }
    }
}

/// Immutable configuration for one species
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesConfig {
    pub key: String,
    /// Natural lifespan in simulated seconds
    pub max_age: Seconds,
    pub max_stamina: f32,
    /// Body plan, in the order parts are created
    pub parts: Vec<PartTemplate>,
}

/// Catalog of known species
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    species: AHashMap<String, SpeciesConfig>,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in species
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        let part = |part_type, label: &str, critical| PartTemplate {
            part_type,
            health: 25,
            label: label.into(),
            critical,
        };

        catalog.insert(SpeciesConfig {
            key: "human".into(),
            // 4.2048e10 ms, a little over 486 days of simulated time
            max_age: 42_048_000.0,
            max_stamina: 100.0,
            parts: vec![
                part(BodyPartType::Arm, "Left Arm", false),
                part(BodyPartType::Arm, "Right Arm", false),
                part(BodyPartType::Head, "Head", false),
                part(BodyPartType::Neck, "Neck", false),
                part(BodyPartType::Torso, "Torso", false),
                part(BodyPartType::Leg, "Left Leg", false),
                part(BodyPartType::Leg, "Right Leg", false),
                part(BodyPartType::Brain, "Brain", true),
                part(BodyPartType::Heart, "Heart", true),
                part(BodyPartType::Lungs, "Lungs", true),
                part(BodyPartType::Liver, "Liver", false),
                part(BodyPartType::Stomach, "Stomach", false),
            ],
        });

        catalog
    }

    /// Add a species; rejects duplicates and empty or invalid plans
    pub fn add(&mut self, config: SpeciesConfig) -> Result<()> {
        if self.species.contains_key(&config.key) {
            return Err(ForgeError::invalid_config(format!(
                "Duplicate species \"{}\"",
                config.key
            )));
        }
        if config.parts.is_empty() {
            return Err(ForgeError::invalid_config(format!(
                "Species \"{}\" has no body parts",
                config.key
            )));
        }
        if !(config.max_stamina > 0.0) {
            return Err(ForgeError::invalid_config(format!(
                "Species \"{}\" must have positive max_stamina",
                config.key
            )));
        }
        self.insert(config);
        Ok(())
    }

    fn insert(&mut self, config: SpeciesConfig) {
        self.species.insert(config.key.clone(), config);
    }

    /// Look up a species by key
    pub fn get(&self, key: &str) -> Result<&SpeciesConfig> {
        self.species.get(key).ok_or_else(|| {
            ForgeError::invalid_config(format!("No creature configuration named \"{}\" exists", key))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Load species from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse species from TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlSpeciesFile = toml::from_str(content)?;

        let mut catalog = Self::new();
        for species in toml_data.species {
            catalog.add(species.into_config()?)?;
        }
        tracing::info!(count = catalog.len(), "Loaded species catalog");
        Ok(catalog)
    }
}

/// TOML representation of the species file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSpeciesFile {
    species: Vec<TomlSpecies>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSpecies {
    key: String,
    max_age: f64,
    max_stamina: f32,
    parts: Vec<TomlPart>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPart {
    #[serde(rename = "type")]
    part_type: String,
    health: u32,
    label: String,
    #[serde(default)]
    critical: bool,
}

impl TomlSpecies {
    fn into_config(self) -> Result<SpeciesConfig> {
        let parts = self
            .parts
            .into_iter()
            .map(|p| {
                Ok(PartTemplate {
                    part_type: p.part_type.parse()?,
                    health: p.health,
                    label: p.label,
                    critical: p.critical,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SpeciesConfig {
            key: self.key,
            max_age: self.max_age,
            max_stamina: self.max_stamina,
            parts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_human() {
        let catalog = SpeciesCatalog::with_defaults();
        let human = catalog.get("human").unwrap();

        assert_eq!(human.max_stamina, 100.0);
        assert_eq!(human.parts.len(), 12);
        assert_eq!(human.parts[0].label, "Left Arm");
        assert_eq!(human.parts[1].label, "Right Arm");

        let critical: Vec<_> = human
            .parts
            .iter()
            .filter(|p| p.critical)
            .map(|p| p.part_type)
            .collect();
        assert_eq!(
            critical,
            vec![BodyPartType::Brain, BodyPartType::Heart, BodyPartType::Lungs]
        );
    }

    #[test]
    fn test_unknown_species() {
        let catalog = SpeciesCatalog::with_defaults();
        assert!(matches!(
            catalog.get("dragon"),
            Err(ForgeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_species_toml_parsing() {
        let toml_content = r#"
[[species]]
key = "beetle"
max_age = 1000.0
max_stamina = 40.0

[[species.parts]]
type = "thorax"
health = 12
label = "Thorax"
critical = true

[[species.parts]]
type = "antenna"
health = 2
label = "Left Antenna"
"#;

        let catalog = SpeciesCatalog::parse_toml(toml_content).expect("Failed to parse TOML");
        let beetle = catalog.get("beetle").unwrap();
        assert_eq!(beetle.max_stamina, 40.0);
        assert_eq!(beetle.parts.len(), 2);
        assert_eq!(beetle.parts[0].part_type, BodyPartType::Thorax);
        assert!(beetle.parts[0].critical);
        assert!(!beetle.parts[1].critical);
    }

    #[test]
    fn test_species_toml_invalid_part_type() {
        let toml_content = r#"
[[species]]
key = "squid"
max_age = 10.0
max_stamina = 5.0

[[species.parts]]
type = "tentacle"
health = 3
label = "Tentacle"
"#;

        match SpeciesCatalog::parse_toml(toml_content) {
            Err(ForgeError::InvalidConfiguration(msg)) => assert!(msg.contains("tentacle")),
            other => panic!("Expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_species_toml_rejects_unknown_keys() {
        let toml_content = r#"
[[species]]
key = "human"
max_age = 10.0
max_stamina = 5.0
wings = true

[[species.parts]]
type = "arm"
health = 3
label = "Arm"
"#;

        assert!(matches!(
            SpeciesCatalog::parse_toml(toml_content),
            Err(ForgeError::TomlError(_))
        ));
    }

    #[test]
    fn test_duplicate_species_rejected() {
        let mut catalog = SpeciesCatalog::with_defaults();
        let human = catalog.get("human").unwrap().clone();
        assert!(catalog.add(human).is_err());
    }

    #[test]
    fn test_load_species_from_file() {
        let path = std::path::Path::new("data/species.toml");
        let catalog =
            SpeciesCatalog::load_from_toml(path).expect("Should load species from data/species.toml");

        let human = catalog.get("human").expect("Should have human");
        assert_eq!(human.parts.len(), 12);
        assert_eq!(human.max_stamina, 100.0);
    }
}
