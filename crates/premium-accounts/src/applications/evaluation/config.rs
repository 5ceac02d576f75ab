use serde::{Deserialize, Serialize};

use super::super::domain::Amount;

pub const DEFAULT_HIGH_INCOME_THRESHOLD: u32 = 100;
// Written as `20_00` in the legacy rules; whether that meant 2000 units or 20.00 is unresolved.
pub const DEFAULT_LOW_INCOME_THRESHOLD: u32 = 2000;
pub const DEFAULT_AUTO_REFERRAL_MAX_AGE: u32 = 18;

/// Thresholds applied by the evaluator, fixed for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationThresholds {
    /// Amounts at or above this are accepted without further checks.
    pub high_income_threshold: Amount,
    /// Amounts below this are declined once the account checks pass.
    pub low_income_threshold: Amount,
    /// Applicants at or below this age are always referred (inclusive).
    pub auto_referral_max_age: u32,
}

impl Default for EvaluationThresholds {
    fn default() -> Self {
        Self {
            high_income_threshold: Amount::units(DEFAULT_HIGH_INCOME_THRESHOLD),
            low_income_threshold: Amount::units(DEFAULT_LOW_INCOME_THRESHOLD),
            auto_referral_max_age: DEFAULT_AUTO_REFERRAL_MAX_AGE,
        }
    }
}
