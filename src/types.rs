// =============================================================================
// Shared types used across the analysis pipeline
// =============================================================================

use serde::{Deserialize, Serialize};

/// Trading signal derived from the most recent indicator record.
///
/// `Undetermined` only appears when there is no data to decide on; a valid
/// series where no rule fires is `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Buy,
    Sell,
    Neutral,
    Undetermined,
}

impl Default for Decision {
    fn default() -> Self {
        Self::Undetermined
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Undetermined => write!(f, "UNDETERMINED"),
        }
    }
}
