use crate::infra::{build_evaluator, parse_amount};
use clap::Args;
use premium_accounts::applications::{
    evaluate_csv, tally, Amount, Application, BatchOutcome, DecisionView, EntryPoint,
};
use premium_accounts::config::AppConfig;
use premium_accounts::error::AppError;
use premium_accounts::telemetry;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Application amount as a decimal (e.g. 1999.99)
    #[arg(long, value_parser = parse_amount)]
    pub(crate) amount: Amount,
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: u32,
    /// Premium account number to validate
    #[arg(long)]
    pub(crate) account: String,
    /// Use the output-slot validator convention
    #[arg(long)]
    pub(crate) out_slot: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with an account_number,age,amount header
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Use the output-slot validator convention
    #[arg(long)]
    pub(crate) out_slot: bool,
}

fn entry_point(out_slot: bool) -> EntryPoint {
    if out_slot {
        EntryPoint::OutSlot
    } else {
        EntryPoint::Primary
    }
}

/// Each decision and batch row is printed as a single-line JSON object.
fn decision_line(view: &DecisionView) -> Result<String, serde_json::Error> {
    serde_json::to_string(view)
}

fn outcome_lines(outcomes: &[BatchOutcome]) -> Result<Vec<String>, serde_json::Error> {
    outcomes.iter().map(serde_json::to_string).collect()
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        amount,
        age,
        account,
        out_slot,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let evaluator = build_evaluator(&config);

    let application = Application {
        amount,
        age,
        account_number: account,
    };
    let entry_point = entry_point(out_slot);
    let decision = evaluator.evaluate_with(entry_point, &application)?;

    println!("{}", decision_line(&DecisionView::new(decision, entry_point))?);

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { csv, out_slot } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let evaluator = build_evaluator(&config);

    let reader = BufReader::new(File::open(&csv)?);
    let entry_point = entry_point(out_slot);
    let outcomes = evaluate_csv(&evaluator, reader, entry_point)?;

    for line in outcome_lines(&outcomes)? {
        println!("{line}");
    }

    let counts = tally(&outcomes);
    info!(
        path = %csv.display(),
        entry_point = entry_point.label(),
        totals = ?counts,
        "premium account batch finished"
    );

    Ok(())
}
