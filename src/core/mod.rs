pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::EngineConfig;
pub use error::{ForgeError, Result};
pub use events::{CreatureEvent, EventBus, EventKind, ListenerId};
