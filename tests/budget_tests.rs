// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use dompet::commands::budgets;
use dompet::ledger::Ledger;
use dompet::models::Budget;
use dompet::store::JsonFileStore;
use dompet::{Error, cli};
use rust_decimal::Decimal;
use tempfile::{TempDir, tempdir};

fn setup() -> (TempDir, Ledger) {
    let dir = tempdir().unwrap();
    let ledger = Ledger::new(Box::new(JsonFileStore::new(dir.path().join("db.json"))));
    (dir, ledger)
}

fn run(ledger: &mut Ledger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["dompet", "budget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("budget", m)) = matches.subcommand() else {
        panic!("no budget subcommand");
    };
    budgets::handle(ledger, m)
}

fn list(ledger: &Ledger, args: &[&str]) -> Vec<Budget> {
    let mut argv = vec!["dompet", "budget", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("budget", m)) = matches.subcommand() {
        if let Some(("list", sub)) = m.subcommand() {
            return budgets::query_rows(ledger, sub).unwrap();
        }
    }
    panic!("no budget list subcommand");
}

#[test]
fn add_and_filter_by_month() {
    let (_dir, mut ledger) = setup();
    run(&mut ledger, &["add", "--amount", "500000", "--category", "Makan", "--month", "2025-08"]).unwrap();
    run(&mut ledger, &["add", "--amount", "200000", "--category", "Transport", "--month", "2025-09"]).unwrap();

    assert_eq!(list(&ledger, &[]).len(), 2);
    let august = list(&ledger, &["--month", "2025-08"]);
    assert_eq!(august.len(), 1);
    assert_eq!(august[0].category, "Makan");
    assert_eq!(august[0].amount, Decimal::from(500_000));
}

#[test]
fn month_and_category_default() {
    let (_dir, mut ledger) = setup();
    run(&mut ledger, &["add", "--amount", "100"]).unwrap();
    let b = &list(&ledger, &[])[0];
    assert_eq!(b.category, "Umum");
    assert_eq!(b.month, Utc::now().format("%Y-%m").to_string());
}

#[test]
fn invalid_month_is_rejected() {
    let (_dir, mut ledger) = setup();
    for bad in ["2025-13", "2025-1", "August"] {
        let err = run(&mut ledger, &["add", "--amount", "100", "--month", bad]).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<Error>(), Some(Error::InvalidPayload(_))),
            "{bad} accepted"
        );
    }
    assert!(list(&ledger, &[]).is_empty());
}

#[test]
fn edit_then_remove() {
    let (_dir, mut ledger) = setup();
    run(&mut ledger, &["add", "--amount", "100", "--month", "2025-08"]).unwrap();
    let id = list(&ledger, &[])[0].id.clone();

    run(&mut ledger, &["edit", &id, "--amount", "150", "--category", "Hiburan"]).unwrap();
    let b: Budget = ledger.get(&id).unwrap();
    assert_eq!(b.amount, Decimal::from(150));
    assert_eq!(b.category, "Hiburan");
    assert_eq!(b.month, "2025-08");

    let err = run(&mut ledger, &["edit", &id, "--month", "2025-00"]).unwrap_err();
    assert!(err.downcast_ref::<Error>().unwrap().is_caller_fault());

    run(&mut ledger, &["rm", &id]).unwrap();
    assert!(list(&ledger, &[]).is_empty());
}
