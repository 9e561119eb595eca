use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Insufficient resource: {name} (requested {requested}, available {available})")]
    InsufficientResource {
        name: String,
        requested: u32,
        available: u32,
    },

    #[error("Insufficient stamina: requested {requested}, available {available}")]
    InsufficientStamina { requested: f32, available: f32 },

    #[error("Cannot fabricate schematic: {schematic}")]
    CannotFabricate { schematic: String },

    #[error("Action unavailable: {action}")]
    ActionUnavailable { action: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown schematic: {0}")]
    UnknownSchematic(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl ForgeError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        ForgeError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
