//! Schematics - what a creature can fabricate
//!
//! A schematic lists the items it needs (some consumed, some merely held),
//! the body-part wear it inflicts, its stamina cost, and what it produces.

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};
use crate::core::types::plural;
use crate::crafting::catalog::ItemCatalog;
use crate::entity::body::BodyPartType;

/// An item that must be held to fabricate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequirement {
    pub name: String,
    pub amount: u32,
    /// Removed from the pool on fabrication. Unconsumed requirements act
    /// as catalysts or hand tools.
    pub consumed: bool,
}

/// Wear inflicted on parts of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartCost {
    pub part: BodyPartType,
    pub damage: u32,
}

/// An item produced by fabrication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub amount: u32,
}

/// A fabrication recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub label: String,
    /// Stamina spent per fabrication
    pub stamina: Option<f32>,
    pub items: Vec<ItemRequirement>,
    pub parts: Vec<PartCost>,
    pub outcomes: Vec<Outcome>,
}

impl Schematic {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            stamina: None,
            items: Vec::new(),
            parts: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn with_stamina(mut self, stamina: f32) -> Self {
        self.stamina = Some(stamina);
        self
    }

    pub fn consumes(mut self, name: impl Into<String>, amount: u32) -> Self {
        self.items.push(ItemRequirement {
            name: name.into(),
            amount,
            consumed: true,
        });
        self
    }

    pub fn uses(mut self, name: impl Into<String>, amount: u32) -> Self {
        self.items.push(ItemRequirement {
            name: name.into(),
            amount,
            consumed: false,
        });
        self
    }

    pub fn wears(mut self, part: BodyPartType, damage: u32) -> Self {
        self.parts.push(PartCost { part, damage });
        self
    }

    pub fn produces(mut self, name: impl Into<String>, amount: u32) -> Self {
        self.outcomes.push(Outcome {
            name: name.into(),
            amount,
        });
        self
    }

    /// Stamina cost, treating an absent cost as zero
    pub fn stamina_cost(&self) -> f32 {
        self.stamina.unwrap_or(0.0)
    }

    pub fn inflicts_damage(&self) -> bool {
        self.parts.iter().any(|p| p.damage > 0)
    }

    /// Check the schematic against the item catalog
    pub fn validate(&self, items: &ItemCatalog) -> Result<()> {
        let context = format!("Schematic \"{}\"", self.id);

        if let Some(stamina) = self.stamina {
            if !(stamina >= 0.0) || !stamina.is_finite() {
                return Err(ForgeError::invalid_config(format!(
                    "{} has invalid stamina cost {}",
                    context, stamina
                )));
            }
        }
        if self.outcomes.is_empty() {
            return Err(ForgeError::invalid_config(format!("{} produces nothing", context)));
        }
        let mut seen = ahash::AHashSet::new();
        for req in &self.items {
            items.require(&req.name, &context)?;
            if req.amount == 0 {
                return Err(ForgeError::invalid_config(format!(
                    "{} has a zero-amount requirement \"{}\"",
                    context, req.name
                )));
            }
            if !seen.insert(req.name.as_str()) {
                return Err(ForgeError::invalid_config(format!(
                    "{} lists item \"{}\" more than once",
                    context, req.name
                )));
            }
        }
        let mut worn = ahash::AHashSet::new();
        for cost in &self.parts {
            if !worn.insert(cost.part) {
                return Err(ForgeError::invalid_config(format!(
                    "{} wears part type \"{}\" more than once",
                    context, cost.part
                )));
            }
        }
        for outcome in &self.outcomes {
            items.require(&outcome.name, &context)?;
            if outcome.amount == 0 {
                return Err(ForgeError::invalid_config(format!(
                    "{} has a zero-amount outcome \"{}\"",
                    context, outcome.name
                )));
            }
        }
        Ok(())
    }

    /// One-line summary, e.g. "2 Rocks + +1PT DMG to arm + 5 ST -> 1 Sharpened Stone"
    pub fn describe(&self, items: &ItemCatalog) -> String {
        let mut inputs: Vec<String> = self
            .items
            .iter()
            .map(|r| {
                let text = plural(items.label(&r.name), r.amount);
                if r.consumed {
                    text
                } else {
                    format!("{} (kept)", text)
                }
            })
            .collect();
        inputs.extend(
            self.parts
                .iter()
                .map(|p| format!("+{}PT DMG to {}", p.damage, p.part)),
        );
        if let Some(stamina) = self.stamina {
            inputs.push(format!("{} ST", stamina));
        }

        let outputs: Vec<String> = self
            .outcomes
            .iter()
            .map(|o| plural(items.label(&o.name), o.amount))
            .collect();

        let inputs = if inputs.is_empty() {
            "nothing".to_string()
        } else {
            inputs.join(" + ")
        };
        format!("{} -> {}", inputs, outputs.join(", "))
    }
}

/// Catalog of all available schematics, in display order
#[derive(Debug, Clone, Default)]
pub struct SchematicCatalog {
    schematics: Vec<Schematic>,
}

impl SchematicCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in schematics
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(
            Schematic::new("collect_rock", "Collect Rock")
                .with_stamina(1.0)
                .produces("rock", 1),
        );

        catalog.add(
            Schematic::new("sharpen_stone", "Sharpen Stone")
                .with_stamina(5.0)
                .consumes("rock", 2)
                .wears(BodyPartType::Arm, 1)
                .produces("sharpened_stone", 1),
        );

        catalog.add(
            Schematic::new("delimb_tree", "Delimb Tree")
                .with_stamina(15.0)
                .consumes("sharpened_stone", 1)
                .produces("wood", 1),
        );

        catalog.add(
            Schematic::new("extract_fiber", "Extract Fiber")
                .consumes("wood", 1)
                .produces("fiber", 5),
        );

        catalog
    }

    pub fn add(&mut self, schematic: Schematic) {
        self.schematics.push(schematic);
    }

    /// Get a schematic by ID
    pub fn get(&self, id: &str) -> Option<&Schematic> {
        self.schematics.iter().find(|s| s.id == id)
    }

    /// Get a schematic by ID or fail with `UnknownSchematic`
    pub fn require(&self, id: &str) -> Result<&Schematic> {
        self.get(id)
            .ok_or_else(|| ForgeError::UnknownSchematic(id.to_string()))
    }

    pub fn all(&self) -> &[Schematic] {
        &self.schematics
    }

    pub fn len(&self) -> usize {
        self.schematics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schematics.is_empty()
    }

    /// Validate every schematic and reject duplicate ids
    pub fn validate(&self, items: &ItemCatalog) -> Result<()> {
        let mut seen = ahash::AHashSet::new();
        for schematic in &self.schematics {
            if !seen.insert(schematic.id.as_str()) {
                return Err(ForgeError::invalid_config(format!(
                    "Duplicate schematic \"{}\"",
                    schematic.id
                )));
            }
            schematic.validate(items)?;
        }
        Ok(())
    }

    /// Load schematics from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse schematics from TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlSchematics = toml::from_str(content)?;

        let mut catalog = Self::new();
        for schematic in toml_data.schematics {
            catalog.add(schematic.into_schematic()?);
        }
        tracing::info!(count = catalog.len(), "Loaded schematic catalog");
        Ok(catalog)
    }
}

/// TOML representation of the schematics file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSchematics {
    schematics: Vec<TomlSchematic>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSchematic {
    id: String,
    label: String,
    stamina: Option<f32>,
    #[serde(default)]
    items: Vec<TomlItemRequirement>,
    #[serde(default)]
    parts: Vec<TomlPartCost>,
    outcomes: Vec<TomlOutcome>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlItemRequirement {
    name: String,
    amount: u32,
    #[serde(default)]
    consumed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPartCost {
    part: String,
    damage: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlOutcome {
    name: String,
    amount: u32,
}

impl TomlSchematic {
    fn into_schematic(self) -> Result<Schematic> {
        let parts = self
            .parts
            .into_iter()
            .map(|p| {
                Ok(PartCost {
                    part: p.part.parse()?,
                    damage: p.damage,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Schematic {
            id: self.id,
            label: self.label,
            stamina: self.stamina,
            items: self
                .items
                .into_iter()
                .map(|r| ItemRequirement {
                    name: r.name,
                    amount: r.amount,
                    consumed: r.consumed,
                })
                .collect(),
            parts,
            outcomes: self
                .outcomes
                .into_iter()
                .map(|o| Outcome {
                    name: o.name,
                    amount: o.amount,
                })
                .collect(),
        })
    }
}
