use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ROUNDING_BELOW, DEFAULT_ROUNDING_NUMBER};

/// One currency denomination row in the open/close-till form.
///
/// `quantity` keeps the raw text the cashier typed; blank or malformed input
/// counts as zero so a half-filled form never fails a till calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationCount {
    pub value: i64,
    pub quantity: String,
}

impl DenominationCount {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            quantity: String::new(),
        }
    }

    pub fn with_quantity(value: i64, quantity: impl Into<String>) -> Self {
        Self {
            value,
            quantity: quantity.into(),
        }
    }

    /// Parsed quantity, clamped to zero on blank, malformed or negative input.
    pub fn parsed_quantity(&self) -> i64 {
        self.quantity
            .trim()
            .parse::<i64>()
            .map(|quantity| quantity.max(0))
            .unwrap_or(0)
    }

    /// Face value times counted quantity.
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.value) * Decimal::from(self.parsed_quantity())
    }
}

/// Sums a counted till. Never fails: rows with unusable quantities
/// contribute zero.
pub fn sum_denominations(counts: &[DenominationCount]) -> Decimal {
    counts.iter().map(|count| count.amount()).sum()
}

/// Cash rounding rule fetched from the backend.
///
/// Remainders at or below `rounding_below` (modulo `rounding_number`) round
/// down, anything above rounds up. `Default` matches the hardcoded fallback
/// used when the fetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingConfig {
    pub rounding_below: i64,
    pub rounding_number: i64,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            rounding_below: DEFAULT_ROUNDING_BELOW,
            rounding_number: DEFAULT_ROUNDING_NUMBER,
        }
    }
}
