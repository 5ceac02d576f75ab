use std::sync::{Arc, Mutex};

use crate::applications::domain::{Amount, Application};
use crate::applications::evaluation::ApplicationEvaluator;
use crate::applications::validator::{
    AccountValidator, LicenseKey, ServiceInformation, ValidationMode, ValidatorError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ValidatorCall {
    ServiceInformation,
    IsValid {
        account_number: String,
        mode: Option<ValidationMode>,
    },
    IsValidInto {
        account_number: String,
    },
}

/// Scriptable validator that records every call made against it.
pub(super) struct RecordingValidator {
    license_key: LicenseKey,
    standing_mode: ValidationMode,
    valid: bool,
    assigns_out_slot: bool,
    failure: Option<ValidatorError>,
    calls: Mutex<Vec<ValidatorCall>>,
}

impl RecordingValidator {
    pub(super) fn valid() -> Self {
        Self {
            license_key: LicenseKey::new("LIC-2024-PREMIUM"),
            standing_mode: ValidationMode::Quick,
            valid: true,
            assigns_out_slot: true,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::valid()
        }
    }

    pub(super) fn expired(self) -> Self {
        Self {
            license_key: LicenseKey::expired(),
            ..self
        }
    }

    pub(super) fn with_license_key(self, key: &str) -> Self {
        Self {
            license_key: LicenseKey::new(key),
            ..self
        }
    }

    pub(super) fn with_standing_mode(self, mode: ValidationMode) -> Self {
        Self {
            standing_mode: mode,
            ..self
        }
    }

    pub(super) fn leaving_slot_unassigned(self) -> Self {
        Self {
            assigns_out_slot: false,
            ..self
        }
    }

    pub(super) fn failing(self, error: ValidatorError) -> Self {
        Self {
            failure: Some(error),
            ..self
        }
    }

    pub(super) fn calls(&self) -> Vec<ValidatorCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub(super) fn validity_calls(&self) -> Vec<ValidatorCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, ValidatorCall::ServiceInformation))
            .collect()
    }

    fn record(&self, call: ValidatorCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }

    fn outcome(&self) -> Result<bool, ValidatorError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.valid),
        }
    }
}

impl AccountValidator for RecordingValidator {
    fn service_information(&self) -> Result<ServiceInformation, ValidatorError> {
        self.record(ValidatorCall::ServiceInformation);
        Ok(ServiceInformation::with_license_key(
            self.license_key.clone(),
        ))
    }

    fn validation_mode(&self) -> ValidationMode {
        self.standing_mode
    }

    fn is_valid(
        &self,
        account_number: &str,
        mode: Option<ValidationMode>,
    ) -> Result<bool, ValidatorError> {
        self.record(ValidatorCall::IsValid {
            account_number: account_number.to_string(),
            mode,
        });
        self.outcome()
    }

    fn is_valid_into(
        &self,
        account_number: &str,
        is_valid: &mut bool,
    ) -> Result<(), ValidatorError> {
        self.record(ValidatorCall::IsValidInto {
            account_number: account_number.to_string(),
        });
        let valid = self.outcome()?;
        if self.assigns_out_slot {
            *is_valid = valid;
        }
        Ok(())
    }
}

pub(super) fn application(amount: &str, age: u32) -> Application {
    Application {
        amount: amount.parse::<Amount>().expect("valid decimal"),
        age,
        account_number: "PA-1001".to_string(),
    }
}

pub(super) fn evaluator(
    validator: RecordingValidator,
) -> (ApplicationEvaluator<RecordingValidator>, Arc<RecordingValidator>) {
    let validator = Arc::new(validator);
    (ApplicationEvaluator::new(validator.clone()), validator)
}
