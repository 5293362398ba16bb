//! # Core Types
//!
//! The persistence model shared by every other crate: the three entities,
//! the `Strength` enumeration, the field-level validation rules and the
//! fixed serialization shapes (summary vs. detail) that keep the
//! Hero ↔ HeroPower ↔ Power graph from serializing cyclically.

pub mod enums;
pub mod error;
pub mod models;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use enums::Strength;
pub use error::ValidationError;
pub use models::{
    CreatedHeroPower, HeroDetail, HeroPowerDetail, HeroSummary, NewHero, NewHeroPower, NewPower,
    PowerSummary,
};
pub use validation::{MIN_DESCRIPTION_LEN, validate_description};
