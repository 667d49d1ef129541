// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::commands::transactions;
use dompet::ledger::Ledger;
use dompet::models::{Kind, Transaction, TransactionDraft};
use dompet::store::JsonFileStore;
use dompet::{Error, cli};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::{TempDir, tempdir};

fn setup() -> (TempDir, Ledger) {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::new(Box::new(JsonFileStore::new(dir.path().join("db.json"))));
    for (amount, kind, category, date, note) in [
        (100, "income", "Gaji", "2025-01-01T00:00:00.000Z", "pay"),
        (10, "expense", "Makan", "2025-01-02T00:00:00.000Z", "nasi goreng"),
        (20, "expense", "Transport", "2025-02-03T00:00:00.000Z", "ojek ke pasar"),
    ] {
        let draft: TransactionDraft = serde_json::from_value(json!({
            "amount": amount, "type": kind, "category": category, "date": date, "note": note
        }))
        .unwrap();
        ledger.add::<Transaction>(draft).unwrap();
    }
    (dir, ledger)
}

fn run(ledger: &mut Ledger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["dompet", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(ledger, tx_m)
}

fn list(ledger: &Ledger, args: &[&str]) -> Vec<Transaction> {
    let mut argv = vec!["dompet", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(ledger, list_m).unwrap();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let (_dir, ledger) = setup();
    let rows = list(&ledger, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    // Newest first.
    assert_eq!(rows[0].category, "Transport");
}

#[test]
fn list_filters_by_month_type_and_search() {
    let (_dir, ledger) = setup();
    assert_eq!(list(&ledger, &["--month", "2025-01"]).len(), 2);
    assert_eq!(list(&ledger, &["--type", "expense"]).len(), 2);
    let hits = list(&ledger, &["--search", "PASAR"]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category, "Transport");
    assert_eq!(list(&ledger, &["--month", "2025-01", "--type", "income"]).len(), 1);
}

#[test]
fn add_through_cli_applies_defaults() {
    let (_dir, mut ledger) = setup();
    run(&mut ledger, &["add", "--amount", "7.5", "--type", "expense"]).unwrap();
    let newest = &ledger.list::<Transaction>().unwrap()[0];
    assert_eq!(newest.amount, "7.5".parse::<Decimal>().unwrap());
    assert_eq!(newest.category, "Umum");
    assert_eq!(newest.note, "");
}

#[test]
fn add_rejects_non_positive_amount() {
    let (_dir, mut ledger) = setup();
    let err = run(&mut ledger, &["add", "--amount", "-5", "--type", "income"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidPayload(_))
    ));
    let err = run(&mut ledger, &["add", "--amount", "abc", "--type", "income"]).unwrap_err();
    assert!(err.downcast_ref::<Error>().unwrap().is_caller_fault());
    assert_eq!(ledger.list::<Transaction>().unwrap().len(), 3);
}

#[test]
fn edit_changes_only_supplied_fields() {
    let (_dir, mut ledger) = setup();
    let target = list(&ledger, &["--search", "nasi"]).remove(0);
    run(&mut ledger, &["edit", &target.id, "--note", "bakso", "--amount", "12"]).unwrap();

    let after: Transaction = ledger.get(&target.id).unwrap();
    assert_eq!(after.note, "bakso");
    assert_eq!(after.amount, Decimal::from(12));
    assert_eq!(after.kind, Kind::Expense);
    assert_eq!(after.category, target.category);
    assert_eq!(after.occurred_at, target.occurred_at);
    assert_eq!(after.created_at, target.created_at);
}

#[test]
fn edit_that_breaks_a_constraint_is_rejected() {
    let (_dir, mut ledger) = setup();
    let target = list(&ledger, &["--search", "nasi"]).remove(0);
    let err = ledger
        .update::<Transaction>(&target.id, json!({"amount": 0}).as_object().unwrap().clone())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)));
    let unchanged: Transaction = ledger.get(&target.id).unwrap();
    assert_eq!(unchanged.amount, Decimal::from(10));
}

#[test]
fn null_field_in_an_edit_falls_back_to_its_default() {
    let (_dir, mut ledger) = setup();
    let target = list(&ledger, &["--search", "nasi"]).remove(0);
    let updated: Transaction = ledger
        .update(&target.id, json!({"note": null}).as_object().unwrap().clone())
        .unwrap();
    assert_eq!(updated.note, "");

    // Still visible everywhere after the edit.
    let after: Transaction = ledger.get(&target.id).unwrap();
    assert_eq!(after.note, "");
    assert_eq!(after.created_at, target.created_at);
    assert_eq!(ledger.list::<Transaction>().unwrap().len(), 3);
    assert_eq!(ledger.summary(None).unwrap().count, 3);

    let err = ledger
        .update::<Transaction>(&target.id, json!({"amount": null}).as_object().unwrap().clone())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)));
    assert_eq!(ledger.list::<Transaction>().unwrap().len(), 3);
}

#[test]
fn blank_category_in_an_edit_reads_back_as_default() {
    let (_dir, mut ledger) = setup();
    let target = list(&ledger, &["--search", "nasi"]).remove(0);
    run(&mut ledger, &["edit", &target.id, "--category", ""]).unwrap();
    let after: Transaction = ledger.get(&target.id).unwrap();
    assert_eq!(after.category, "Umum");
    assert_eq!(after.id, target.id);
}

#[test]
fn edit_date_is_stored_normalized() {
    let (_dir, mut ledger) = setup();
    let target = list(&ledger, &["--search", "nasi"]).remove(0);
    run(&mut ledger, &["edit", &target.id, "--date", "2025-01-15"]).unwrap();
    let after: Transaction = ledger.get(&target.id).unwrap();
    assert_eq!(after.occurred_at, "2025-01-15T00:00:00.000Z");
    assert!(run(&mut ledger, &["edit", &target.id, "--date", "yesterday"]).is_err());
}

#[test]
fn edit_and_rm_of_unknown_id_are_not_found() {
    let (_dir, mut ledger) = setup();
    let err = run(&mut ledger, &["edit", "nope", "--note", "x"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::NotFound { .. })
    ));
    let err = run(&mut ledger, &["rm", "nope"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::NotFound { .. })
    ));
}

#[test]
fn rm_deletes_by_id() {
    let (_dir, mut ledger) = setup();
    let target = list(&ledger, &["--type", "income"]).remove(0);
    run(&mut ledger, &["rm", &target.id]).unwrap();
    assert_eq!(ledger.list::<Transaction>().unwrap().len(), 2);
    assert!(ledger.get::<Transaction>(&target.id).is_err());
}
