use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency amount compared with exact decimal semantics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigDecimal);

impl Amount {
    pub fn new(value: BigDecimal) -> Self {
        Self(value)
    }

    /// Whole currency units, e.g. `Amount::units(2000)`.
    pub fn units(value: u32) -> Self {
        Self(BigDecimal::from(value))
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        BigDecimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| AmountParseError {
                raw: trimmed.to_string(),
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Accepts decimal strings as well as plain JSON numbers.
struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E>(self, raw: &str) -> Result<Amount, E>
    where
        E: de::Error,
    {
        raw.parse().map_err(E::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Amount, E>
    where
        E: de::Error,
    {
        Ok(Amount(BigDecimal::from(value)))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Amount, E>
    where
        E: de::Error,
    {
        Ok(Amount(BigDecimal::from(value)))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Amount, E>
    where
        E: de::Error,
    {
        // f64 Display is the shortest round-trip form: 49.5 stays 49.5.
        self.visit_str(&value.to_string())
    }
}

/// Raised when an amount is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{raw}' is not a decimal amount")]
pub struct AmountParseError {
    pub raw: String,
}

/// Premium account application as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub amount: Amount,
    pub age: u32,
    pub account_number: String,
}

/// Outcome of a premium account evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationDecision {
    AutoAccepted,
    AutoDeclined,
    ReferredToHuman,
}

impl ApplicationDecision {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationDecision::AutoAccepted => "auto_accepted",
            ApplicationDecision::AutoDeclined => "auto_declined",
            ApplicationDecision::ReferredToHuman => "referred_to_human",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            ApplicationDecision::AutoAccepted => "application accepted automatically",
            ApplicationDecision::AutoDeclined => "application declined automatically",
            ApplicationDecision::ReferredToHuman => "application referred to a human reviewer",
        }
    }
}
