//! Creature - body, items, and stamina under one owner
//!
//! Every mutator applies its change, then notifies the creature's listeners
//! with a snapshot of the new state.

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};
use crate::core::events::{CreatureEvent, EventBus, ListenerId};
use crate::core::types::{EntityId, Seconds};
use crate::crafting::fabrication::{self, FabricationReport};
use crate::crafting::pool::{PoolSnapshot, ResourcePool};
use crate::crafting::schematic::Schematic;
use crate::entity::body::{BodyPart, BodyPartSet, BodyPartType};
use crate::entity::species::{SpeciesCatalog, SpeciesConfig};

/// Stamina regained per second when no rate is configured
pub const DEFAULT_STAMINA_REGEN: f32 = 1.0;

/// The observable state of a creature, for persistence collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: EntityId,
    pub name: String,
    pub species: String,
    pub stamina: f32,
    pub age: Seconds,
    pub items: PoolSnapshot,
    pub parts: Vec<BodyPart>,
}

impl CreatureSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug)]
pub struct Creature {
    id: EntityId,
    name: String,
    species: SpeciesConfig,
    body: BodyPartSet,
    items: ResourcePool,
    stamina: f32,
    age: Seconds,
    stamina_regen: f32,
    events: EventBus,
}

impl Creature {
    /// Create a creature of the species named `species_key`
    pub fn new(name: impl Into<String>, species_key: &str, catalog: &SpeciesCatalog) -> Result<Self> {
        let species = catalog.get(species_key)?;
        Ok(Self::from_species(name, species.clone()))
    }

    /// Create a creature with full stamina and an intact body
    pub fn from_species(name: impl Into<String>, species: SpeciesConfig) -> Self {
        let body = BodyPartSet::new(species.parts.iter().map(|p| p.build()).collect());
        Self {
            id: EntityId::new(),
            name: name.into(),
            stamina: species.max_stamina,
            species,
            body,
            items: ResourcePool::new(),
            age: 0.0,
            stamina_regen: DEFAULT_STAMINA_REGEN,
            events: EventBus::new(),
        }
    }

    pub fn with_stamina_regen(mut self, per_second: f32) -> Self {
        self.stamina_regen = per_second;
        self
    }

    /// Start from a given inventory (no notification, nobody listens yet)
    pub fn with_items(mut self, items: ResourcePool) -> Self {
        self.items = items;
        self
    }

    // === IDENTITY & DERIVED STATS ===

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &SpeciesConfig {
        &self.species
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> f32 {
        self.species.max_stamina
    }

    pub fn stamina_regen(&self) -> f32 {
        self.stamina_regen
    }

    /// Simulated seconds since creation
    pub fn age(&self) -> Seconds {
        self.age
    }

    pub fn max_age(&self) -> Seconds {
        self.species.max_age
    }

    pub fn health(&self) -> u32 {
        self.body.total_health()
    }

    pub fn max_health(&self) -> u32 {
        self.body.total_max_health()
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0 && !self.body.any_critical_destroyed()
    }

    pub fn items(&self) -> &ResourcePool {
        &self.items
    }

    pub fn body(&self) -> &BodyPartSet {
        &self.body
    }

    /// Parts of one type, in configuration order
    pub fn get_parts(&self, part_type: BodyPartType) -> Vec<&BodyPart> {
        self.body.parts_of_type(part_type).collect()
    }

    pub fn get_health_of_parts(&self, part_type: BodyPartType) -> u32 {
        self.body.total_health_of_type(part_type)
    }

    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            id: self.id,
            name: self.name.clone(),
            species: self.species.key.clone(),
            stamina: self.stamina,
            age: self.age,
            items: self.items.snapshot(),
            parts: self.body.as_slice().to_vec(),
        }
    }

    // === OBSERVERS ===

    pub fn subscribe(&mut self, listener: impl FnMut(&CreatureEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // === MUTATION ===

    /// Advance time: regenerate stamina toward the maximum and age
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.age += Seconds::from(dt);
        if self.stamina < self.max_stamina() {
            let next = (self.stamina + dt * self.stamina_regen).min(self.max_stamina());
            self.set_stamina(next);
        }
    }

    /// Change an item's quantity and return the new quantity
    pub fn add_item(&mut self, name: &str, delta: i64) -> u32 {
        let quantity = self.items.add(name, delta);
        self.notify_items();
        quantity
    }

    /// Hand `amount` of an item to another pool
    pub fn give_item(&mut self, name: &str, amount: u32, target: &mut ResourcePool) -> Result<()> {
        self.items.transfer(name, amount, target)?;
        self.notify_items();
        Ok(())
    }

    /// Take `amount` of an item from another pool
    pub fn take_item(&mut self, name: &str, amount: u32, source: &mut ResourcePool) -> Result<()> {
        source.transfer(name, amount, &mut self.items)?;
        self.notify_items();
        Ok(())
    }

    /// Spend stamina, failing if not enough is available
    pub fn spend_stamina(&mut self, amount: f32) -> Result<()> {
        if amount > self.stamina {
            return Err(ForgeError::InsufficientStamina {
                requested: amount,
                available: self.stamina,
            });
        }
        if amount > 0.0 {
            self.set_stamina(self.stamina - amount);
        }
        Ok(())
    }

    /// Damage parts of one type; returns damage absorbed
    pub fn damage_parts(&mut self, part_type: BodyPartType, amount: u32) -> u32 {
        let absorbed = self.body.apply_damage(part_type, amount);
        if absorbed > 0 {
            self.notify_parts();
        }
        absorbed
    }

    /// Heal parts of one type; returns health restored
    pub fn heal_parts(&mut self, part_type: BodyPartType, amount: u32) -> u32 {
        let restored = self.body.heal(part_type, amount);
        if restored > 0 {
            self.notify_parts();
        }
        restored
    }

    // === FABRICATION ===

    pub fn can_fabricate(&self, schematic: &Schematic) -> bool {
        fabrication::can_fabricate(self, schematic)
    }

    pub fn fabricate(&mut self, schematic: &Schematic) -> Result<FabricationReport> {
        fabrication::fabricate(self, schematic)
    }

    // === ENGINE HOOKS ===

    /// Apply damage without notifying; the caller emits once at the end
    pub(crate) fn apply_damage_silently(&mut self, part_type: BodyPartType, amount: u32) -> u32 {
        self.body.apply_damage(part_type, amount)
    }

    pub(crate) fn notify_parts(&mut self) {
        let body = &self.body;
        self.events
            .emit(|| CreatureEvent::PartsChanged(body.as_slice().to_vec()));
    }

    fn notify_items(&mut self) {
        let items = &self.items;
        self.events.emit(|| CreatureEvent::ItemsChanged(items.snapshot()));
    }

    fn set_stamina(&mut self, value: f32) {
        self.stamina = value.clamp(0.0, self.max_stamina());
        let stamina = self.stamina;
        self.events.emit(|| CreatureEvent::StaminaChanged(stamina));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn human() -> Creature {
        Creature::new("Tester", "human", &SpeciesCatalog::with_defaults()).unwrap()
    }

    fn record(creature: &mut Creature) -> Rc<RefCell<Vec<CreatureEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        creature.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn test_new_creature_from_species() {
        let creature = human();
        assert_eq!(creature.stamina(), 100.0);
        assert_eq!(creature.max_stamina(), 100.0);
        assert_eq!(creature.health(), 300);
        assert_eq!(creature.max_health(), 300);
        assert_eq!(creature.get_parts(BodyPartType::Arm).len(), 2);
        assert_eq!(creature.get_health_of_parts(BodyPartType::Leg), 50);
        assert!(creature.items().is_empty());
        assert!(creature.is_alive());
    }

    #[test]
    fn test_unknown_species_is_invalid_configuration() {
        let err = Creature::new("Nobody", "dragon", &SpeciesCatalog::with_defaults()).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_tick_regenerates_and_clamps() {
        let mut creature = human().with_stamina_regen(2.0);
        creature.spend_stamina(10.0).unwrap();
        assert_eq!(creature.stamina(), 90.0);

        creature.tick(1.5);
        assert_eq!(creature.stamina(), 93.0);

        creature.tick(100.0);
        assert_eq!(creature.stamina(), 100.0);
        assert!((creature.age() - 101.5).abs() < 1e-6);
    }

    #[test]
    fn test_tick_at_full_stamina_is_silent() {
        let mut creature = human();
        let log = record(&mut creature);
        creature.tick(0.5);
        assert!(log.borrow().is_empty());
        assert!((creature.age() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_add_item_notifies_with_snapshot() {
        let mut creature = human();
        let log = record(&mut creature);

        assert_eq!(creature.add_item("rock", 2), 2);

        let events = log.borrow();
        assert_eq!(events.len(), 1);
        match &events[0] {
            CreatureEvent::ItemsChanged(items) => assert_eq!(items.get("rock"), Some(&2)),
            other => panic!("Expected ItemsChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_spend_stamina() {
        let mut creature = human();
        let log = record(&mut creature);

        creature.spend_stamina(30.0).unwrap();
        assert_eq!(creature.stamina(), 70.0);
        assert!(matches!(
            creature.spend_stamina(71.0),
            Err(ForgeError::InsufficientStamina { .. })
        ));
        assert_eq!(creature.stamina(), 70.0);

        let kinds: Vec<_> = log.borrow().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Stamina]);
    }

    #[test]
    fn test_damage_and_heal_parts() {
        let mut creature = human();
        let log = record(&mut creature);

        assert_eq!(creature.damage_parts(BodyPartType::Arm, 30), 30);
        let arms: Vec<_> = creature
            .get_parts(BodyPartType::Arm)
            .iter()
            .map(|p| p.health)
            .collect();
        assert_eq!(arms, vec![0, 20]);

        assert_eq!(creature.heal_parts(BodyPartType::Arm, 5), 5);
        assert_eq!(creature.get_health_of_parts(BodyPartType::Arm), 25);

        let kinds: Vec<_> = log.borrow().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Parts, EventKind::Parts]);
    }

    #[test]
    fn test_destroyed_heart_is_fatal() {
        let mut creature = human();
        creature.damage_parts(BodyPartType::Heart, 25);
        assert!(!creature.is_alive());
    }

    #[test]
    fn test_give_and_take() {
        let mut creature = human();
        let mut earth = ResourcePool::from_entries([("rock", 5)]);

        creature.take_item("rock", 3, &mut earth).unwrap();
        assert_eq!(creature.items().get("rock"), 3);
        assert_eq!(earth.get("rock"), 2);

        creature.give_item("rock", 1, &mut earth).unwrap();
        assert_eq!(creature.items().get("rock"), 2);
        assert_eq!(earth.get("rock"), 3);

        assert!(matches!(
            creature.give_item("rock", 9, &mut earth),
            Err(ForgeError::InsufficientResource { .. })
        ));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut creature = human();
        creature.add_item("rock", 2);
        let snapshot = creature.snapshot();

        let json = snapshot.to_json().unwrap();
        let back = CreatureSnapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
