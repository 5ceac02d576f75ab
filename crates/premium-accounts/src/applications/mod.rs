//! Premium account application intake and evaluation.
//!
//! The decision rules live in [`evaluation`]; the account validator they consult is an external
//! collaborator described by [`validator::AccountValidator`]. The batch runner and HTTP router are
//! thin surfaces over the same evaluator.

pub mod batch;
pub mod domain;
pub(crate) mod evaluation;
pub mod router;
pub mod validator;

#[cfg(test)]
mod tests;

pub use batch::{evaluate_csv, tally, BatchError, BatchOutcome};
pub use domain::{Amount, AmountParseError, Application, ApplicationDecision};
pub use evaluation::{
    ApplicationEvaluator, EntryPoint, EvaluationThresholds, DEFAULT_AUTO_REFERRAL_MAX_AGE,
    DEFAULT_HIGH_INCOME_THRESHOLD, DEFAULT_LOW_INCOME_THRESHOLD,
};
pub use router::{evaluation_router, DecisionView};
pub use validator::{
    AccountValidator, LicenseData, LicenseKey, ServiceInformation, ValidationMode, ValidatorError,
};
