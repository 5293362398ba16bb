//! Entity shapes.
//!
//! Each struct is a fixed projection of a stored row. Summaries never carry
//! linking records; details nest linking records whose parents are again
//! summaries, so serialization can never walk back around the graph.

use crate::enums::Strength;
use crate::error::ValidationError;
use crate::validation::validate_description;
use serde::{Deserialize, Serialize};

/// A hero as listed by `GET /heroes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSummary {
    pub id: i64,
    pub name: Option<String>,
    pub super_name: String,
}

/// A power as listed by `GET /powers`. Also the single-power detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A linking record seen from its hero: carries the power, not the hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPowerDetail {
    pub id: i64,
    pub strength: String,
    pub hero_id: i64,
    pub power_id: i64,
    pub power: PowerSummary,
}

/// A hero with every linking record it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDetail {
    pub id: i64,
    pub name: Option<String>,
    pub super_name: String,
    pub hero_powers: Vec<HeroPowerDetail>,
}

impl HeroDetail {
    pub fn new(hero: HeroSummary, hero_powers: Vec<HeroPowerDetail>) -> Self {
        Self {
            id: hero.id,
            name: hero.name,
            super_name: hero.super_name,
            hero_powers,
        }
    }
}

/// A freshly created linking record with both of its parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedHeroPower {
    pub id: i64,
    pub strength: String,
    pub hero_id: i64,
    pub power_id: i64,
    pub hero: HeroSummary,
    pub power: PowerSummary,
}

/// Input for the administrative hero insert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewHero {
    pub name: Option<String>,
    pub super_name: String,
}

/// Input for the administrative power insert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPower {
    pub name: String,
    pub description: String,
}

impl NewPower {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_description(&self.description)
    }
}

/// A validated linking record, ready to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

impl NewHeroPower {
    /// Validates the raw strength and builds the insert.
    pub fn new(strength: &str, hero_id: i64, power_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            strength: Strength::parse(strength)?,
            hero_id,
            power_id,
        })
    }
}
