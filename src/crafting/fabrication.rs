//! Fabrication engine - feasibility check and transaction
//!
//! `can_fabricate` is a pure predicate. `fabricate` re-runs it and, if it
//! holds, applies the effects in a fixed order:
//! 1. Deduct the stamina cost
//! 2. Remove consumed items
//! 3. Apply body-part wear
//! 4. Add outcomes
//! 5. Emit one parts-changed notification if any wear was applied
//!
//! Nothing after the gate can fail, so there is no rollback path.

use crate::core::error::{ForgeError, Result};
use crate::crafting::schematic::Schematic;
use crate::entity::body::BodyPartType;
use crate::entity::creature::Creature;

/// The first requirement a creature fails to meet
#[derive(Debug, Clone, PartialEq)]
pub enum Shortfall {
    Item {
        name: String,
        required: u32,
        held: u32,
    },
    Part {
        part: BodyPartType,
        damage: u32,
        health: u32,
    },
    Stamina {
        required: f32,
        available: f32,
    },
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shortfall::Item {
                name,
                required,
                held,
            } => write!(f, "needs {} {}, holds {}", required, name, held),
            Shortfall::Part {
                part,
                damage,
                health,
            } => write!(f, "needs {} {} health to absorb wear, has {}", damage, part, health),
            Shortfall::Stamina {
                required,
                available,
            } => write!(f, "needs {} stamina, has {}", required, available),
        }
    }
}

/// What a successful fabrication did
#[derive(Debug, Clone, PartialEq)]
pub struct FabricationReport {
    pub schematic: String,
    pub stamina_spent: f32,
    pub consumed: Vec<(String, u32)>,
    pub damage: Vec<(BodyPartType, u32)>,
    pub produced: Vec<(String, u32)>,
}

/// Find the first unmet requirement, checking items, then parts, then
/// stamina. `None` means the schematic can be fabricated now.
///
/// Repeated entries for one item or part type are checked as a single
/// combined demand, so the effects applied by `fabricate` always fit.
pub fn shortfall(creature: &Creature, schematic: &Schematic) -> Option<Shortfall> {
    for (name, required) in item_demand(schematic) {
        let held = creature.items().get(name);
        if held < required {
            return Some(Shortfall::Item {
                name: name.to_string(),
                required,
                held,
            });
        }
    }

    for (part, damage) in part_demand(schematic) {
        let health = creature.get_health_of_parts(part);
        if health < damage {
            return Some(Shortfall::Part {
                part,
                damage,
                health,
            });
        }
    }

    let required = schematic.stamina_cost();
    if required > creature.stamina() {
        return Some(Shortfall::Stamina {
            required,
            available: creature.stamina(),
        });
    }

    None
}

/// Total amount needed per item, in first-listed order
fn item_demand(schematic: &Schematic) -> Vec<(&str, u32)> {
    let mut demand: Vec<(&str, u32)> = Vec::with_capacity(schematic.items.len());
    for req in &schematic.items {
        match demand.iter_mut().find(|(name, _)| *name == req.name) {
            Some((_, total)) => *total = total.saturating_add(req.amount),
            None => demand.push((req.name.as_str(), req.amount)),
        }
    }
    demand
}

/// Total wear per part type, in first-listed order
fn part_demand(schematic: &Schematic) -> Vec<(BodyPartType, u32)> {
    let mut demand: Vec<(BodyPartType, u32)> = Vec::with_capacity(schematic.parts.len());
    for cost in &schematic.parts {
        match demand.iter_mut().find(|(part, _)| *part == cost.part) {
            Some((_, total)) => *total = total.saturating_add(cost.damage),
            None => demand.push((cost.part, cost.damage)),
        }
    }
    demand
}

/// Check whether the creature can fabricate the schematic right now
pub fn can_fabricate(creature: &Creature, schematic: &Schematic) -> bool {
    shortfall(creature, schematic).is_none()
}

/// Fabricate a schematic, mutating the creature's stamina, items and body
pub fn fabricate(creature: &mut Creature, schematic: &Schematic) -> Result<FabricationReport> {
    if let Some(missing) = shortfall(creature, schematic) {
        tracing::warn!(
            creature = creature.name(),
            schematic = %schematic.id,
            reason = %missing,
            "Fabrication rejected"
        );
        return Err(ForgeError::CannotFabricate {
            schematic: schematic.id.clone(),
        });
    }

    let mut report = FabricationReport {
        schematic: schematic.id.clone(),
        stamina_spent: 0.0,
        consumed: Vec::new(),
        damage: Vec::new(),
        produced: Vec::new(),
    };

    // 1. Stamina
    let cost = schematic.stamina_cost();
    creature.spend_stamina(cost)?;
    report.stamina_spent = cost;

    // 2. Consumed items; unconsumed ones are requirements only
    for req in schematic.items.iter().filter(|r| r.consumed) {
        creature.add_item(&req.name, -i64::from(req.amount));
        report.consumed.push((req.name.clone(), req.amount));
    }

    // 3. Body-part wear
    let mut parts_damaged = false;
    for cost in &schematic.parts {
        let absorbed = creature.apply_damage_silently(cost.part, cost.damage);
        parts_damaged |= absorbed > 0;
        report.damage.push((cost.part, absorbed));
    }

    // 4. Outcomes
    for outcome in &schematic.outcomes {
        creature.add_item(&outcome.name, i64::from(outcome.amount));
        report.produced.push((outcome.name.clone(), outcome.amount));
    }

    // 5. Stats
    if parts_damaged {
        creature.notify_parts();
    }

    tracing::debug!(
        creature = creature.name(),
        schematic = %schematic.id,
        stamina = report.stamina_spent,
        consumed = ?report.consumed,
        damage = ?report.damage,
        produced = ?report.produced,
        "Fabrication complete"
    );

    Ok(report)
}
