use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a hero wields a power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    /// Validates a raw strength value. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Strong" => Ok(Strength::Strong),
            "Weak" => Ok(Strength::Weak),
            "Average" => Ok(Strength::Average),
            other => Err(ValidationError::InvalidStrength(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
