//! Action definitions and catalog
//!
//! Actions are quick, repeatable things a creature does in the world, such
//! as gathering rock. Unlike schematics they draw their yield from a
//! deposit rather than creating it.

use serde::Deserialize;

use crate::core::error::{ForgeError, Result};
use crate::crafting::catalog::ItemCatalog;
use crate::entity::creature::Creature;
use crate::world::deposit::Deposit;

/// A tool that must be held (and is not used up)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolRequirement {
    pub name: String,
    #[serde(default = "one")]
    pub amount: u32,
}

/// An item moved from the deposit to the creature
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Yield {
    pub name: String,
    pub amount: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDef {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub stamina: f32,
    #[serde(default)]
    pub requires: Vec<ToolRequirement>,
    pub yields: Vec<Yield>,
}

pub struct ActionAvailability {
    pub available: bool,
    pub reason: Option<String>,
}

impl ActionAvailability {
    pub fn yes() -> Self {
        Self { available: true, reason: None }
    }

    pub fn no(reason: impl Into<String>) -> Self {
        Self { available: false, reason: Some(reason.into()) }
    }
}

/// What a performed action moved
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    pub action: String,
    pub stamina_spent: f32,
    pub gathered: Vec<(String, u32)>,
}

impl ActionDef {
    /// Check stamina, tools, and deposit stock, in that order
    pub fn availability(&self, creature: &Creature, deposit: &Deposit) -> ActionAvailability {
        if self.stamina > creature.stamina() {
            return ActionAvailability::no(format!(
                "needs {} stamina, has {:.0}",
                self.stamina,
                creature.stamina()
            ));
        }
        let tools = totals(self.requires.iter().map(|t| (t.name.as_str(), t.amount)));
        for (name, amount) in tools {
            if creature.items().get(name) < amount {
                return ActionAvailability::no(format!("needs {} {}", amount, name));
            }
        }
        let yields = totals(self.yields.iter().map(|y| (y.name.as_str(), y.amount)));
        for (name, amount) in yields {
            if deposit.pool().get(name) < amount {
                return ActionAvailability::no(format!("{} has run out of {}", deposit.name(), name));
            }
        }
        ActionAvailability::yes()
    }

    pub fn is_available(&self, creature: &Creature, deposit: &Deposit) -> bool {
        self.availability(creature, deposit).available
    }

    /// Perform the action: spend stamina and move the yield from the
    /// deposit into the creature's items
    pub fn perform(&self, creature: &mut Creature, deposit: &mut Deposit) -> Result<ActionReport> {
        let availability = self.availability(creature, deposit);
        if !availability.available {
            tracing::warn!(
                creature = creature.name(),
                action = %self.id,
                reason = availability.reason.as_deref().unwrap_or(""),
                "Action rejected"
            );
            return Err(ForgeError::ActionUnavailable {
                action: self.id.clone(),
            });
        }

        creature.spend_stamina(self.stamina)?;
        let mut gathered = Vec::with_capacity(self.yields.len());
        for y in &self.yields {
            creature.take_item(&y.name, y.amount, deposit.pool_mut())?;
            gathered.push((y.name.clone(), y.amount));
        }

        tracing::debug!(
            creature = creature.name(),
            action = %self.id,
            gathered = ?gathered,
            "Action performed"
        );

        Ok(ActionReport {
            action: self.id.clone(),
            stamina_spent: self.stamina,
            gathered,
        })
    }

    fn validate(&self, items: &ItemCatalog) -> Result<()> {
        let context = format!("Action \"{}\"", self.id);
        if !(self.stamina >= 0.0) || !self.stamina.is_finite() {
            return Err(ForgeError::invalid_config(format!(
                "{} has invalid stamina cost {}",
                context, self.stamina
            )));
        }
        let entries = self
            .requires
            .iter()
            .map(|t| ("tool", t.name.as_str(), t.amount))
            .chain(self.yields.iter().map(|y| ("yield", y.name.as_str(), y.amount)));
        let mut seen = ahash::AHashSet::new();
        for (role, name, amount) in entries {
            items.require(name, &context)?;
            if amount == 0 {
                return Err(ForgeError::invalid_config(format!(
                    "{} has a zero-amount {} \"{}\"",
                    context, role, name
                )));
            }
            if !seen.insert((role, name)) {
                return Err(ForgeError::invalid_config(format!(
                    "{} lists {} \"{}\" more than once",
                    context, role, name
                )));
            }
        }
        Ok(())
    }
}

/// Sum amounts per name, keeping first-listed order
fn totals<'a>(entries: impl Iterator<Item = (&'a str, u32)>) -> Vec<(&'a str, u32)> {
    let mut totals: Vec<(&str, u32)> = Vec::new();
    for (name, amount) in entries {
        match totals.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, total)) => *total = total.saturating_add(amount),
            None => totals.push((name, amount)),
        }
    }
    totals
}

/// Catalog of all actions, in display order
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: Vec<ActionDef>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in actions
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(ActionDef {
            id: "gather_rock".into(),
            label: "Gather Rock".into(),
            stamina: 1.0,
            requires: vec![],
            yields: vec![Yield {
                name: "rock".into(),
                amount: 1,
            }],
        });

        catalog.add(ActionDef {
            id: "chop_tree".into(),
            label: "Chop Down Tree".into(),
            stamina: 25.0,
            requires: vec![ToolRequirement {
                name: "sharpened_stone".into(),
                amount: 1,
            }],
            yields: vec![Yield {
                name: "wood".into(),
                amount: 3,
            }],
        });

        catalog
    }

    pub fn add(&mut self, action: ActionDef) {
        self.actions.push(action);
    }

    pub fn get(&self, id: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Get an action by ID or fail with `UnknownAction`
    pub fn require(&self, id: &str) -> Result<&ActionDef> {
        self.get(id)
            .ok_or_else(|| ForgeError::UnknownAction(id.to_string()))
    }

    pub fn all(&self) -> &[ActionDef] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions the creature can perform right now
    pub fn available<'a>(
        &'a self,
        creature: &'a Creature,
        deposit: &'a Deposit,
    ) -> impl Iterator<Item = &'a ActionDef> + 'a {
        self.actions
            .iter()
            .filter(move |a| a.is_available(creature, deposit))
    }

    /// Validate every action and reject duplicate ids
    pub fn validate(&self, items: &ItemCatalog) -> Result<()> {
        let mut seen = ahash::AHashSet::new();
        for action in &self.actions {
            if !seen.insert(action.id.as_str()) {
                return Err(ForgeError::invalid_config(format!(
                    "Duplicate action \"{}\"",
                    action.id
                )));
            }
            action.validate(items)?;
        }
        Ok(())
    }

    /// Load actions from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse actions from TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlActions = toml::from_str(content)?;
        let catalog = Self {
            actions: toml_data.actions,
        };
        tracing::info!(count = catalog.len(), "Loaded action catalog");
        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlActions {
    actions: Vec<ActionDef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crafting::pool::ResourcePool;
    use crate::entity::species::SpeciesCatalog;

    fn setup() -> (Creature, Deposit, ActionCatalog) {
        let creature = Creature::new("Tester", "human", &SpeciesCatalog::with_defaults()).unwrap();
        let deposit = Deposit::new("Earth", ResourcePool::from_entries([("rock", 2), ("wood", 10)]));
        (creature, deposit, ActionCatalog::with_defaults())
    }

    #[test]
    fn test_gather_rock_moves_from_deposit() {
        let (mut creature, mut deposit, catalog) = setup();
        let gather = catalog.get("gather_rock").unwrap();

        let report = gather.perform(&mut creature, &mut deposit).unwrap();

        assert_eq!(report.gathered, vec![("rock".to_string(), 1)]);
        assert_eq!(creature.items().get("rock"), 1);
        assert_eq!(deposit.pool().get("rock"), 1);
        assert_eq!(creature.stamina(), 99.0);
    }

    #[test]
    fn test_chop_tree_needs_tool() {
        let (mut creature, mut deposit, catalog) = setup();
        let chop = catalog.get("chop_tree").unwrap();

        let availability = chop.availability(&creature, &deposit);
        assert!(!availability.available);
        assert_eq!(availability.reason.as_deref(), Some("needs 1 sharpened_stone"));
        assert!(matches!(
            chop.perform(&mut creature, &mut deposit),
            Err(ForgeError::ActionUnavailable { .. })
        ));

        creature.add_item("sharpened_stone", 1);
        chop.perform(&mut creature, &mut deposit).unwrap();
        assert_eq!(creature.items().get("wood"), 3);
        // The tool is not worn out
        assert_eq!(creature.items().get("sharpened_stone"), 1);
    }

    #[test]
    fn test_depleted_deposit() {
        let (mut creature, mut deposit, catalog) = setup();
        let gather = catalog.get("gather_rock").unwrap();

        gather.perform(&mut creature, &mut deposit).unwrap();
        gather.perform(&mut creature, &mut deposit).unwrap();
        assert!(!gather.is_available(&creature, &deposit));
        assert!(gather.perform(&mut creature, &mut deposit).is_err());
        assert_eq!(creature.items().get("rock"), 2);
    }

    #[test]
    fn test_available_lists_only_performable() {
        let (mut creature, deposit, catalog) = setup();
        let ids: Vec<_> = catalog
            .available(&creature, &deposit)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["gather_rock"]);

        creature.add_item("sharpened_stone", 1);
        let ids: Vec<_> = catalog
            .available(&creature, &deposit)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["gather_rock", "chop_tree"]);
    }

    #[test]
    fn test_actions_toml_parsing() {
        let toml_content = r#"
[[actions]]
id = "forage"
label = "Forage"
stamina = 2.0

[[actions.yields]]
name = "fiber"
amount = 1

[[actions]]
id = "quarry"
label = "Quarry"

[[actions.requires]]
name = "sharpened_stone"

[[actions.yields]]
name = "rock"
amount = 4
"#;

        let catalog = ActionCatalog::parse_toml(toml_content).expect("Failed to parse TOML");
        assert_eq!(catalog.len(), 2);
        let quarry = catalog.get("quarry").unwrap();
        assert_eq!(quarry.stamina, 0.0);
        assert_eq!(quarry.requires[0].amount, 1);
        assert!(catalog.validate(&ItemCatalog::with_defaults()).is_ok());
    }

    #[test]
    fn test_validate_unknown_item() {
        let mut catalog = ActionCatalog::new();
        catalog.add(ActionDef {
            id: "fish".into(),
            label: "Fish".into(),
            stamina: 1.0,
            requires: vec![],
            yields: vec![Yield {
                name: "fish".into(),
                amount: 1,
            }],
        });
        assert!(matches!(
            catalog.validate(&ItemCatalog::with_defaults()),
            Err(ForgeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_repeated_yield_checks_combined_stock() {
        let (mut creature, _, _) = setup();
        let mut deposit = Deposit::new("Earth", ResourcePool::from_entries([("rock", 1)]));
        let haul = ActionDef {
            id: "haul".into(),
            label: "Haul".into(),
            stamina: 5.0,
            requires: vec![],
            yields: vec![
                Yield {
                    name: "rock".into(),
                    amount: 1,
                },
                Yield {
                    name: "rock".into(),
                    amount: 1,
                },
            ],
        };

        let availability = haul.availability(&creature, &deposit);
        assert!(!availability.available);
        assert_eq!(availability.reason.as_deref(), Some("Earth has run out of rock"));
        assert!(matches!(
            haul.perform(&mut creature, &mut deposit),
            Err(ForgeError::ActionUnavailable { .. })
        ));

        // Nothing moved
        assert_eq!(creature.stamina(), 100.0);
        assert_eq!(creature.items().get("rock"), 0);
        assert_eq!(deposit.pool().get("rock"), 1);

        let mut catalog = ActionCatalog::new();
        catalog.add(haul);
        assert!(matches!(
            catalog.validate(&ItemCatalog::with_defaults()),
            Err(ForgeError::InvalidConfiguration(msg)) if msg.contains("more than once")
        ));
    }

    #[test]
    fn test_repeated_tool_checks_combined_count() {
        let (mut creature, deposit, _) = setup();
        creature.add_item("sharpened_stone", 1);
        let split = ActionDef {
            id: "split".into(),
            label: "Split Log".into(),
            stamina: 1.0,
            requires: vec![
                ToolRequirement {
                    name: "sharpened_stone".into(),
                    amount: 1,
                },
                ToolRequirement {
                    name: "sharpened_stone".into(),
                    amount: 1,
                },
            ],
            yields: vec![Yield {
                name: "wood".into(),
                amount: 1,
            }],
        };
        assert_eq!(
            split.availability(&creature, &deposit).reason.as_deref(),
            Some("needs 2 sharpened_stone")
        );
    }

    #[test]
    fn test_validate_zero_yield() {
        let mut catalog = ActionCatalog::new();
        catalog.add(ActionDef {
            id: "idle".into(),
            label: "Idle".into(),
            stamina: 0.0,
            requires: vec![],
            yields: vec![Yield {
                name: "rock".into(),
                amount: 0,
            }],
        });
        assert!(matches!(
            catalog.validate(&ItemCatalog::with_defaults()),
            Err(ForgeError::InvalidConfiguration(msg)) if msg.contains("zero-amount")
        ));
    }

    #[test]
    fn test_require_unknown_action() {
        let catalog = ActionCatalog::with_defaults();
        assert!(matches!(
            catalog.require("dance"),
            Err(ForgeError::UnknownAction(_))
        ));
    }
}
