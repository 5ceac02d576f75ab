use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Amount, AmountParseError, Application, ApplicationDecision};
use super::evaluation::{ApplicationEvaluator, EntryPoint};
use super::validator::{AccountValidator, ValidatorError};

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    account_number: String,
    age: u32,
    amount: String,
}

/// Decision recorded for one CSV row (rows are 1-based, header excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub row: usize,
    pub account_number: String,
    pub decision: ApplicationDecision,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("row {row}: malformed record: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: AmountParseError,
    },
    #[error("row {row}: {source}")]
    Validator {
        row: usize,
        #[source]
        source: ValidatorError,
    },
}

/// Evaluate every `account_number,age,amount` row, stopping at the first failure.
pub fn evaluate_csv<V, R>(
    evaluator: &ApplicationEvaluator<V>,
    reader: R,
    entry_point: EntryPoint,
) -> Result<Vec<BatchOutcome>, BatchError>
where
    V: AccountValidator + ?Sized,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut outcomes = Vec::new();
    for (index, result) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
        let row = index + 1;
        let record = result.map_err(|source| BatchError::Csv { row, source })?;
        let amount = record
            .amount
            .parse::<Amount>()
            .map_err(|source| BatchError::InvalidAmount { row, source })?;
        let application = Application {
            amount,
            age: record.age,
            account_number: record.account_number,
        };

        let decision = evaluator
            .evaluate_with(entry_point, &application)
            .map_err(|source| BatchError::Validator { row, source })?;

        outcomes.push(BatchOutcome {
            row,
            account_number: application.account_number,
            decision,
        });
    }

    info!(
        entry_point = entry_point.label(),
        rows = outcomes.len(),
        "premium application batch evaluated"
    );

    Ok(outcomes)
}

/// Count decisions across a batch.
pub fn tally(outcomes: &[BatchOutcome]) -> BTreeMap<ApplicationDecision, usize> {
    let mut counts = BTreeMap::new();
    for outcome in outcomes {
        *counts.entry(outcome.decision).or_insert(0) += 1;
    }
    counts
}
