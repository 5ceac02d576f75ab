use super::super::domain::{Application, ApplicationDecision};
use super::super::validator::{AccountValidator, ValidatorError};
use super::config::EvaluationThresholds;

/// Rule that produced a decision, kept for the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecisionRule {
    HighIncome,
    LicenseExpired,
    InvalidAccount,
    AutoReferralAge,
    LowIncome,
    Fallthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Adjudication {
    pub decision: ApplicationDecision,
    pub rule: DecisionRule,
}

impl Adjudication {
    fn new(decision: ApplicationDecision, rule: DecisionRule) -> Self {
        Self { decision, rule }
    }
}

/// Applies the premium account rules in order; the first matching rule wins.
///
/// `check_validity` is only invoked once the amount and license checks have passed.
pub(crate) fn decide_outcome<V, F>(
    application: &Application,
    thresholds: &EvaluationThresholds,
    validator: &V,
    check_validity: F,
) -> Result<Adjudication, ValidatorError>
where
    V: AccountValidator + ?Sized,
    F: FnOnce(&V, &Application) -> Result<bool, ValidatorError>,
{
    if application.amount >= thresholds.high_income_threshold {
        return Ok(Adjudication::new(
            ApplicationDecision::AutoAccepted,
            DecisionRule::HighIncome,
        ));
    }

    if validator
        .service_information()?
        .license
        .license_key
        .is_expired()
    {
        return Ok(Adjudication::new(
            ApplicationDecision::ReferredToHuman,
            DecisionRule::LicenseExpired,
        ));
    }

    if !check_validity(validator, application)? {
        return Ok(Adjudication::new(
            ApplicationDecision::ReferredToHuman,
            DecisionRule::InvalidAccount,
        ));
    }

    if application.age <= thresholds.auto_referral_max_age {
        return Ok(Adjudication::new(
            ApplicationDecision::ReferredToHuman,
            DecisionRule::AutoReferralAge,
        ));
    }

    if application.amount < thresholds.low_income_threshold {
        return Ok(Adjudication::new(
            ApplicationDecision::AutoDeclined,
            DecisionRule::LowIncome,
        ));
    }

    Ok(Adjudication::new(
        ApplicationDecision::ReferredToHuman,
        DecisionRule::Fallthrough,
    ))
}
