use super::common::*;
use crate::applications::batch::{evaluate_csv, tally, BatchError};
use crate::applications::domain::ApplicationDecision;
use crate::applications::evaluation::EntryPoint;
use crate::applications::validator::ValidatorError;

const APPLICATIONS_CSV: &str = "account_number,age,amount
PA-1001, 30, 50.00
PA-1002, 12, 75
PA-1003, 44, 150
";

#[test]
fn batch_evaluates_each_row_in_order() {
    let (engine, _) = evaluator(RecordingValidator::valid());

    let outcomes = evaluate_csv(&engine, APPLICATIONS_CSV.as_bytes(), EntryPoint::Primary)
        .expect("batch runs");

    let decisions: Vec<_> = outcomes
        .iter()
        .map(|outcome| (outcome.row, outcome.account_number.as_str(), outcome.decision))
        .collect();
    assert_eq!(
        decisions,
        vec![
            (1, "PA-1001", ApplicationDecision::AutoDeclined),
            (2, "PA-1002", ApplicationDecision::ReferredToHuman),
            (3, "PA-1003", ApplicationDecision::AutoAccepted),
        ]
    );

    let counts = tally(&outcomes);
    assert_eq!(counts.get(&ApplicationDecision::AutoDeclined), Some(&1));
    assert_eq!(counts.get(&ApplicationDecision::ReferredToHuman), Some(&1));
    assert_eq!(counts.get(&ApplicationDecision::AutoAccepted), Some(&1));
}

#[test]
fn batch_uses_the_out_slot_convention_when_asked() {
    let (engine, validator) = evaluator(RecordingValidator::invalid().leaving_slot_unassigned());

    let outcomes = evaluate_csv(&engine, APPLICATIONS_CSV.as_bytes(), EntryPoint::OutSlot)
        .expect("batch runs");

    assert_eq!(outcomes[0].decision, ApplicationDecision::AutoDeclined);
    assert!(validator
        .validity_calls()
        .iter()
        .all(|call| matches!(call, ValidatorCall::IsValidInto { .. })));
}

#[test]
fn batch_reports_the_row_of_a_bad_amount() {
    let (engine, _) = evaluator(RecordingValidator::valid());
    let csv = "account_number,age,amount\nPA-1,30,10\nPA-2,30,ten\n";

    let err = evaluate_csv(&engine, csv.as_bytes(), EntryPoint::Primary).expect_err("bad amount");

    match err {
        BatchError::InvalidAmount { row, source } => {
            assert_eq!(row, 2);
            assert_eq!(source.raw, "ten");
        }
        other => panic!("expected invalid amount, got {other:?}"),
    }
}

#[test]
fn batch_reports_malformed_records() {
    let (engine, _) = evaluator(RecordingValidator::valid());
    let csv = "account_number,age,amount\nPA-1,thirty,10\n";

    let err = evaluate_csv(&engine, csv.as_bytes(), EntryPoint::Primary).expect_err("bad age");

    assert!(matches!(err, BatchError::Csv { row: 1, .. }));
}

#[test]
fn batch_stops_on_validator_failure() {
    let (engine, _) = evaluator(
        RecordingValidator::valid().failing(ValidatorError::Rejected {
            reason: "quota exceeded".to_string(),
        }),
    );

    let err = evaluate_csv(&engine, APPLICATIONS_CSV.as_bytes(), EntryPoint::Primary)
        .expect_err("validator fails");

    assert_eq!(
        err.to_string(),
        "row 1: account validator rejected the request: quota exceeded"
    );
}
