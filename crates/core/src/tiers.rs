//! Customer tiers

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Customer classification used to decide eligibility for tier promotions.
///
/// The tier is read from the caller's session on every operation; it is never
/// stored on the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    /// Regular customer
    #[default]
    Standard,

    /// VIP customer, eligible for the percentage-off promotion
    Preferred,
}

impl CustomerTier {
    /// Whether this tier qualifies for tier-based promotions.
    pub const fn is_preferred(self) -> bool {
        matches!(self, Self::Preferred)
    }
}

impl From<bool> for CustomerTier {
    fn from(is_preferred: bool) -> Self {
        if is_preferred {
            Self::Preferred
        } else {
            Self::Standard
        }
    }
}

impl Display for CustomerTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Standard => f.write_str("Common"),
            Self::Preferred => f.write_str("VIP"),
        }
    }
}
