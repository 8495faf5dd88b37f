use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of change between a current and a future rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateTrend {
    Increase,
    Decrease,
    Unchanged,
}

impl RateTrend {
    /// Compares two rates; a missing rate counts as zero.
    pub fn between(
        current: Option<Decimal>,
        future: Option<Decimal>,
    ) -> Self {
        let diff = future.unwrap_or_default() - current.unwrap_or_default();
        if diff > Decimal::ZERO {
            Self::Increase
        } else if diff < Decimal::ZERO {
            Self::Decrease
        } else {
            Self::Unchanged
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Unchanged => "unchanged",
        }
    }
}
