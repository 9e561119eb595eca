//! World state, deposits and catalog loading

pub mod deposit;
pub mod loader;
pub mod state;

pub use deposit::Deposit;
pub use loader::Catalogs;
pub use state::World;
