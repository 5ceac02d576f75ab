use metrics_exporter_prometheus::PrometheusHandle;
use premium_accounts::applications::{
    AccountValidator, Amount, ApplicationEvaluator, LicenseKey, ServiceInformation,
    ValidationMode, ValidatorError,
};
use premium_accounts::config::{AppConfig, ValidatorConfig};
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Evaluator = ApplicationEvaluator<InMemoryAccountValidator>;

/// Reference validator: quick mode checks the account shape, detailed mode also checks the
/// configured registry.
#[derive(Debug, Clone)]
pub(crate) struct InMemoryAccountValidator {
    service: ServiceInformation,
    standing_mode: ValidationMode,
    registry: HashSet<String>,
}

impl InMemoryAccountValidator {
    pub(crate) fn from_config(config: &ValidatorConfig) -> Self {
        Self {
            service: ServiceInformation::with_license_key(LicenseKey::new(
                config.license_key.clone(),
            )),
            standing_mode: config.validation_mode,
            registry: config.accounts.iter().cloned().collect(),
        }
    }

    fn well_formed(account_number: &str) -> bool {
        !account_number.is_empty()
            && account_number
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    }
}

impl AccountValidator for InMemoryAccountValidator {
    fn service_information(&self) -> Result<ServiceInformation, ValidatorError> {
        Ok(self.service.clone())
    }

    fn validation_mode(&self) -> ValidationMode {
        self.standing_mode
    }

    fn is_valid(
        &self,
        account_number: &str,
        mode: Option<ValidationMode>,
    ) -> Result<bool, ValidatorError> {
        let mode = mode.unwrap_or(self.standing_mode);
        let valid = match mode {
            ValidationMode::Quick => Self::well_formed(account_number),
            ValidationMode::Detailed => {
                Self::well_formed(account_number) && self.registry.contains(account_number)
            }
        };
        debug!(?mode, valid, "premium account checked");
        Ok(valid)
    }
}

pub(crate) fn build_evaluator(config: &AppConfig) -> Evaluator {
    let validator = Arc::new(InMemoryAccountValidator::from_config(&config.validator));
    ApplicationEvaluator::with_thresholds(validator, config.evaluation.clone())
}

pub(crate) fn parse_amount(raw: &str) -> Result<Amount, String> {
    raw.parse::<Amount>().map_err(|err| err.to_string())
}
