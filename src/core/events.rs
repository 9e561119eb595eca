//! Change notifications - synchronous observer registry
//!
//! Mutators on a creature return their result and then hand a snapshot of
//! the new state to every registered listener, in subscription order.

use crate::crafting::pool::PoolSnapshot;
use crate::entity::body::BodyPart;

/// A state change observed on a creature
#[derive(Debug, Clone, PartialEq)]
pub enum CreatureEvent {
    /// The item pool was replaced; carries the new contents
    ItemsChanged(PoolSnapshot),
    /// One or more body parts took damage or healed
    PartsChanged(Vec<BodyPart>),
    /// Stamina moved; carries the new value
    StaminaChanged(f32),
}

impl CreatureEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CreatureEvent::ItemsChanged(_) => EventKind::Items,
            CreatureEvent::PartsChanged(_) => EventKind::Parts,
            CreatureEvent::StaminaChanged(_) => EventKind::Stamina,
        }
    }
}

/// Discriminant of a `CreatureEvent`, handy for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Items,
    Parts,
    Stamina,
}

pub type Listener = Box<dyn FnMut(&CreatureEvent)>;

/// Handle returned by `EventBus::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of listeners owned by one creature
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CreatureEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an event to every listener. The event is only built when
    /// someone is listening.
    pub fn emit(&mut self, make: impl FnOnce() -> CreatureEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let event = make();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
