// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendlog::aggregate::summarize;
use spendlog::catalog::Catalog;
use spendlog::codec::{export_json, parse_backup};
use spendlog::errors::LedgerError;
use spendlog::filter::TransactionFilter;
use spendlog::ledger::LedgerStore;
use spendlog::models::{MonthRef, Transaction, TxType};
use spendlog::{cli, commands::importer, db};
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn backup_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file.flush().unwrap();
    file
}

fn existing() -> LedgerStore {
    let ledger: Vec<Transaction> = serde_json::from_str(
        r#"[{"id":"old-1","amount":5,"type":"expense","categoryId":"food","date":"2025-03-02"}]"#,
    )
    .unwrap();
    LedgerStore::new(ledger, Catalog::default())
}

fn run_import(
    conn: &Connection,
    store: &mut LedgerStore,
    path: &str,
    extra: &[&str],
    answer: bool,
) -> anyhow::Result<()> {
    let mut argv = vec!["spendlog", "import", "json", "--path", path];
    argv.extend_from_slice(extra);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("import", import_m)) = matches.subcommand() {
        if let Some(("json", json_m)) = import_m.subcommand() {
            return importer::import_backup(conn, store, json_m, |_| Ok(answer));
        }
    }
    panic!("no import subcommand");
}

#[test]
fn non_array_transactions_is_rejected_without_mutation() {
    let conn = base_conn();
    let mut store = existing();
    let file = backup_file(r#"{"transactions": "not-an-array"}"#);
    let path = file.path().to_str().unwrap().to_string();

    let err = run_import(&conn, &mut store, &path, &["--yes"], true).unwrap_err();
    assert!(err.to_string().contains("Import"));
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidFormat(_))
    ));
    assert_eq!(store.transactions().len(), 1);
    assert!(!store.is_dirty());
}

#[test]
fn unparsable_and_shapeless_files_are_invalid_format() {
    for body in ["{not json", "[1,2,3]", r#"{"categories": []}"#, r#"{"transactions": null}"#] {
        assert!(
            matches!(parse_backup(body), Err(LedgerError::InvalidFormat(_))),
            "accepted {}",
            body
        );
    }
}

#[test]
fn records_without_amount_or_type_are_merged_as_is() {
    let conn = base_conn();
    let mut store = existing();
    let file = backup_file(
        r#"{"transactions": [
            {"id": "a", "type": "expense", "categoryId": "food", "date": "2025-03-01"},
            {"id": "b", "amount": null, "type": "transfer", "categoryId": "food", "date": "2025-03-02"},
            {"id": "c", "amount": "500", "categoryId": "food", "date": "2025-03-03"},
            42
        ]}"#,
    );
    let path = file.path().to_str().unwrap().to_string();
    run_import(&conn, &mut store, &path, &["--yes"], false).unwrap();

    let txs = store.transactions();
    assert_eq!(txs.len(), 5);
    assert_eq!(txs[0].amount, Decimal::ZERO);
    assert_eq!(txs[0].r#type, TxType::Expense);
    assert_eq!(txs[1].amount, Decimal::ZERO);
    assert_eq!(txs[1].r#type, TxType::Unknown);
    assert_eq!(txs[2].amount, Decimal::from(500));
    assert_eq!(txs[2].r#type, TxType::Unknown);
    assert_eq!(txs[4].id, "old-1");

    // odd records take no part in the totals
    let march = store.filtered(&TransactionFilter::for_month(MonthRef::new(2025, 3).unwrap()));
    let s = summarize(march);
    assert_eq!(s.expenses, Decimal::from(5));
    assert!(s.income.is_zero());

    let reloaded = LedgerStore::load(&conn).unwrap();
    assert_eq!(reloaded.transactions().len(), 5);
    assert_eq!(reloaded.transactions()[1].r#type, TxType::Unknown);
}

#[test]
fn malformed_fields_are_accepted_as_is() {
    let body = r#"{"transactions": [
        {"id": 17, "amount": -3, "type": "income", "categoryId": "nope", "date": "31/02/2025"}
    ]}"#;
    let txs = parse_backup(body).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, "17");
    assert!(txs[0].amount.is_sign_negative());
    assert!(txs[0].date.is_none());
    assert_eq!(Catalog::default().name_of(&txs[0].category_id), "Unknown");
}

#[test]
fn confirmed_import_prepends_in_file_order_and_persists() {
    let conn = base_conn();
    let mut store = existing();
    let file = backup_file(
        r#"{"transactions": [
            {"id":"new-1","amount":20000,"type":"income","categoryId":"salary","date":"2025-03-01"},
            {"id":"old-1","amount":7,"type":"expense","categoryId":"bills","date":"2025-03-03","note":"dup id"}
        ], "categories": [], "exportDate": "2025-03-05T10:00:00Z"}"#,
    );
    let path = file.path().to_str().unwrap().to_string();
    run_import(&conn, &mut store, &path, &["--yes"], false).unwrap();

    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["new-1", "old-1", "old-1"]);

    let reloaded = LedgerStore::load(&conn).unwrap();
    assert_eq!(reloaded.transactions(), store.transactions());
}

#[test]
fn declined_confirmation_leaves_ledger_untouched() {
    let conn = base_conn();
    let mut store = existing();
    let file = backup_file(
        r#"{"transactions": [{"id":"x","amount":1,"type":"expense","categoryId":"food","date":"2025-03-01"}]}"#,
    );
    let path = file.path().to_str().unwrap().to_string();

    let mut asked = None;
    let matches = cli::build_cli().get_matches_from(["spendlog", "import", "json", "--path", &path]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    let Some(("json", json_m)) = import_m.subcommand() else {
        panic!("no json subcommand");
    };
    importer::import_backup(&conn, &mut store, json_m, |n| {
        asked = Some(n);
        Ok(false)
    })
    .unwrap();

    assert_eq!(asked, Some(1));
    assert_eq!(store.transactions().len(), 1);
    assert!(!store.is_dirty());
}

#[test]
fn json_round_trip_into_empty_ledger_reproduces_the_set() {
    let original: Vec<Transaction> = serde_json::from_str(
        r#"[
          {"id":"1","amount":500,"type":"expense","categoryId":"food","date":"2025-03-04","note":"groceries","createdAt":"2025-03-04T08:30:00Z"},
          {"id":"2","amount":20000,"type":"income","categoryId":"salary","date":"2025-03-01"},
          {"id":"3","amount":12.5,"type":"expense","categoryId":"transport","date":"2025-02-11","note":"bus"}
        ]"#,
    )
    .unwrap();
    let at = Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
    let body = export_json(&original, &Catalog::default(), at).unwrap();

    let conn = base_conn();
    let file = backup_file(&body);
    let path = file.path().to_str().unwrap().to_string();
    let mut store = LedgerStore::default();
    run_import(&conn, &mut store, &path, &[], true).unwrap();

    let mut got = store.transactions().to_vec();
    let mut want = original;
    got.sort_by(|a, b| a.id.cmp(&b.id));
    want.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(got, want);
}
