mod config;
mod policy;

pub use config::{
    EvaluationThresholds, DEFAULT_AUTO_REFERRAL_MAX_AGE, DEFAULT_HIGH_INCOME_THRESHOLD,
    DEFAULT_LOW_INCOME_THRESHOLD,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{Application, ApplicationDecision};
use super::validator::{AccountValidator, ValidationMode, ValidatorError};
use policy::{decide_outcome, Adjudication};

/// Which validator calling convention an evaluation uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    /// [`ApplicationEvaluator::evaluate`]
    #[default]
    Primary,
    /// [`ApplicationEvaluator::evaluate_alt`]
    OutSlot,
}

impl EntryPoint {
    pub fn label(&self) -> &'static str {
        match self {
            EntryPoint::Primary => "primary",
            EntryPoint::OutSlot => "out_slot",
        }
    }
}

/// Evaluator deciding premium account applications against a shared validator.
///
/// Holds no state besides the thresholds; every call consults the validator afresh.
pub struct ApplicationEvaluator<V: ?Sized> {
    validator: Arc<V>,
    thresholds: EvaluationThresholds,
}

impl<V> ApplicationEvaluator<V>
where
    V: AccountValidator + ?Sized,
{
    pub fn new(validator: Arc<V>) -> Self {
        Self::with_thresholds(validator, EvaluationThresholds::default())
    }

    pub fn with_thresholds(validator: Arc<V>, thresholds: EvaluationThresholds) -> Self {
        Self {
            validator,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &EvaluationThresholds {
        &self.thresholds
    }

    pub fn validator(&self) -> &Arc<V> {
        &self.validator
    }

    /// Evaluate using the return-value validity check, requesting a mode based on age.
    pub fn evaluate(
        &self,
        application: &Application,
    ) -> Result<ApplicationDecision, ValidatorError> {
        let max_age = self.thresholds.auto_referral_max_age;
        self.adjudicate(EntryPoint::Primary, application, |validator, application| {
            let mode = ValidationMode::for_age(application.age, max_age);
            validator.is_valid(&application.account_number, Some(mode))
        })
    }

    /// Evaluate using the output-slot validity check under the validator's standing mode.
    pub fn evaluate_alt(
        &self,
        application: &Application,
    ) -> Result<ApplicationDecision, ValidatorError> {
        self.adjudicate(EntryPoint::OutSlot, application, out_slot_validity::<V>)
    }

    pub fn evaluate_with(
        &self,
        entry_point: EntryPoint,
        application: &Application,
    ) -> Result<ApplicationDecision, ValidatorError> {
        match entry_point {
            EntryPoint::Primary => self.evaluate(application),
            EntryPoint::OutSlot => self.evaluate_alt(application),
        }
    }

    fn adjudicate<F>(
        &self,
        entry_point: EntryPoint,
        application: &Application,
        check_validity: F,
    ) -> Result<ApplicationDecision, ValidatorError>
    where
        F: FnOnce(&V, &Application) -> Result<bool, ValidatorError>,
    {
        match decide_outcome(
            application,
            &self.thresholds,
            &*self.validator,
            check_validity,
        ) {
            Ok(Adjudication { decision, rule }) => {
                debug!(
                    entry_point = entry_point.label(),
                    decision = decision.label(),
                    ?rule,
                    "premium application evaluated"
                );
                Ok(decision)
            }
            Err(err) => {
                warn!(
                    entry_point = entry_point.label(),
                    error = %err,
                    "account validator failed during evaluation"
                );
                Err(err)
            }
        }
    }
}

fn out_slot_validity<V>(validator: &V, application: &Application) -> Result<bool, ValidatorError>
where
    V: AccountValidator + ?Sized,
{
    // A slot the validator never writes counts as a valid account.
    let mut is_valid = true;
    validator.is_valid_into(&application.account_number, &mut is_valid)?;
    Ok(is_valid)
}
