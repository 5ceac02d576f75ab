use serde::{Deserialize, Serialize};

/// Rigor requested from the account validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    Quick,
    Detailed,
}

impl ValidationMode {
    /// Applicants at or below `max_age` get detailed validation.
    pub fn for_age(age: u32, max_age: u32) -> Self {
        if age <= max_age {
            Self::Detailed
        } else {
            Self::Quick
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "quick" => Some(Self::Quick),
            "detailed" => Some(Self::Detailed),
            _ => None,
        }
    }
}

/// License key reported by the validation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseKey(pub String);

impl LicenseKey {
    /// Sentinel the service reports once its license has lapsed.
    pub const EXPIRED: &'static str = "EXPIRED";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expired() -> Self {
        Self(Self::EXPIRED.to_string())
    }

    /// Exact, case-sensitive comparison against [`LicenseKey::EXPIRED`].
    pub fn is_expired(&self) -> bool {
        self.0 == Self::EXPIRED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseData {
    pub license_key: LicenseKey,
}

/// Metadata exposed by the validation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInformation {
    pub license: LicenseData,
}

impl ServiceInformation {
    pub fn with_license_key(key: LicenseKey) -> Self {
        Self {
            license: LicenseData { license_key: key },
        }
    }
}

/// Failure reported by an account validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    #[error("account validator unavailable: {0}")]
    Unavailable(String),
    #[error("account validator rejected the request: {reason}")]
    Rejected { reason: String },
}

/// External service deciding whether a premium account number is valid.
///
/// Implementations own their validation algorithm and licensing; the evaluator only relies on
/// the calls below.
pub trait AccountValidator: Send + Sync {
    fn service_information(&self) -> Result<ServiceInformation, ValidatorError>;

    /// Mode applied when a call does not request one.
    fn validation_mode(&self) -> ValidationMode;

    /// Validate `account_number`, using `mode` when given and the standing mode otherwise.
    fn is_valid(
        &self,
        account_number: &str,
        mode: Option<ValidationMode>,
    ) -> Result<bool, ValidatorError>;

    /// Output-slot form of [`AccountValidator::is_valid`] under the standing mode.
    ///
    /// Implementations may leave `is_valid` untouched, in which case the caller's initial
    /// value stands.
    fn is_valid_into(
        &self,
        account_number: &str,
        is_valid: &mut bool,
    ) -> Result<(), ValidatorError> {
        *is_valid = self.is_valid(account_number, None)?;
        Ok(())
    }
}
