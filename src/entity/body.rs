//! Physical body simulation - typed, damageable parts

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};

/// Anatomical type of a body part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPartType {
    Arm,
    Leg,
    Tail,
    Neck,
    Torso,
    Head,
    Wing,
    Antenna,
    Abdomen,
    Thorax,
    Brain,
    Heart,
    Lungs,
    Liver,
    Stomach,
}

impl BodyPartType {
    /// Returns all part types
    pub fn all() -> [BodyPartType; 15] {
        use BodyPartType::*;
        [
            Arm, Leg, Tail, Neck, Torso, Head, Wing, Antenna, Abdomen, Thorax, Brain, Heart,
            Lungs, Liver, Stomach,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPartType::Arm => "arm",
            BodyPartType::Leg => "leg",
            BodyPartType::Tail => "tail",
            BodyPartType::Neck => "neck",
            BodyPartType::Torso => "torso",
            BodyPartType::Head => "head",
            BodyPartType::Wing => "wing",
            BodyPartType::Antenna => "antenna",
            BodyPartType::Abdomen => "abdomen",
            BodyPartType::Thorax => "thorax",
            BodyPartType::Brain => "brain",
            BodyPartType::Heart => "heart",
            BodyPartType::Lungs => "lungs",
            BodyPartType::Liver => "liver",
            BodyPartType::Stomach => "stomach",
        }
    }
}

impl std::fmt::Display for BodyPartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BodyPartType {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        BodyPartType::all()
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| ForgeError::invalid_config(format!("Invalid body part type \"{}\"", s)))
    }
}

/// A single damageable part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPart {
    pub part_type: BodyPartType,
    pub health: u32,
    pub max_health: u32,
    pub label: String,
    /// Losing this part is fatal
    pub critical: bool,
}

impl BodyPart {
    /// A fresh part at full health
    pub fn new(part_type: BodyPartType, max_health: u32, label: impl Into<String>) -> Self {
        Self {
            part_type,
            health: max_health,
            max_health,
            label: label.into(),
            critical: false,
        }
    }

    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Reduce health by up to `amount`; returns damage absorbed
    fn absorb(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.health);
        self.health -= absorbed;
        absorbed
    }

    /// Restore health by up to `amount`; returns health restored
    fn restore(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health - self.health);
        self.health += restored;
        restored
    }
}

/// Fixed, ordered collection of a creature's parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPartSet {
    parts: Vec<BodyPart>,
}

impl BodyPartSet {
    pub fn new(parts: Vec<BodyPart>) -> Self {
        Self { parts }
    }

    /// Parts of one type, in configuration order
    pub fn parts_of_type(&self, part_type: BodyPartType) -> impl Iterator<Item = &BodyPart> {
        self.parts.iter().filter(move |p| p.part_type == part_type)
    }

    pub fn total_health_of_type(&self, part_type: BodyPartType) -> u32 {
        self.parts_of_type(part_type).map(|p| p.health).sum()
    }

    /// Spread `amount` damage over parts of `part_type` in configuration
    /// order. Each part is drained to zero before the remainder rolls over
    /// to the next. Damage beyond the type's total health is discarded.
    ///
    /// Returns the damage actually absorbed.
    pub fn apply_damage(&mut self, part_type: BodyPartType, amount: u32) -> u32 {
        let mut remaining = amount;
        for part in self.parts.iter_mut().filter(|p| p.part_type == part_type) {
            if remaining == 0 {
                break;
            }
            remaining -= part.absorb(remaining);
        }
        amount - remaining
    }

    /// Restore up to `amount` health across parts of `part_type`, in
    /// configuration order, never past `max_health`.
    pub fn heal(&mut self, part_type: BodyPartType, amount: u32) -> u32 {
        let mut remaining = amount;
        for part in self.parts.iter_mut().filter(|p| p.part_type == part_type) {
            if remaining == 0 {
                break;
            }
            remaining -= part.restore(remaining);
        }
        amount - remaining
    }

    pub fn total_health(&self) -> u32 {
        self.parts.iter().map(|p| p.health).sum()
    }

    pub fn total_max_health(&self) -> u32 {
        self.parts.iter().map(|p| p.max_health).sum()
    }

    pub fn any_critical_destroyed(&self) -> bool {
        self.parts.iter().any(|p| p.critical && p.is_destroyed())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyPart> {
        self.parts.iter()
    }

    pub fn as_slice(&self) -> &[BodyPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
