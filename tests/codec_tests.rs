// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use dompet::codec::{self, Format};
use dompet::models::{Kind, Transaction};
use dompet::Error;
use rust_decimal::Decimal;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
}

fn tx(id: &str, amount: &str, kind: Kind, category: &str, date: &str, note: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: amount.parse().unwrap(),
        kind,
        category: category.to_string(),
        occurred_at: date.to_string(),
        note: note.to_string(),
        created_at: "2025-01-01T00:00:00.000Z".to_string(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("a", "1000", Kind::Income, "Gaji", "2025-01-31T00:00:00.000Z", "January pay"),
        tx("b", "12.50", Kind::Expense, "Makan, minum", "2025-02-01T08:30:00.000Z", "said \"hi\""),
        tx("c", "400", Kind::Expense, "Umum", "2025-02-03T10:00:00.000Z", ""),
    ]
}

fn tuples(records: &[Transaction]) -> Vec<(Decimal, Kind, String, String)> {
    let mut t: Vec<_> = records
        .iter()
        .map(|r| (r.amount, r.kind, r.category.clone(), r.note.clone()))
        .collect();
    t.sort_by(|a, b| a.0.cmp(&b.0));
    t
}

#[test]
fn csv_layout_quotes_only_category_and_note() {
    let text = codec::encode_csv(&sample());
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines[0], "id,amount,type,category,date,note");
    assert_eq!(
        lines[1],
        "a,1000,income,\"Gaji\",2025-01-31T00:00:00.000Z,\"January pay\""
    );
    assert_eq!(
        lines[2],
        "b,12.5,expense,\"Makan, minum\",2025-02-01T08:30:00.000Z,\"said \"\"hi\"\"\""
    );
    assert_eq!(lines[3], "c,400,expense,\"Umum\",2025-02-03T10:00:00.000Z,\"\"");
    assert!(!text.ends_with('\n'));
}

#[test]
fn csv_round_trip_keeps_amount_kind_category_and_note() {
    let records = sample();
    let bytes = codec::encode(&records, Format::Csv).unwrap();
    let decoded = codec::decode(&bytes, now()).unwrap();

    assert_eq!(decoded.added, 3);
    assert_eq!(decoded.records.len(), 3);
    assert_eq!(tuples(&decoded.records), tuples(&records));
    // Ids are always reassigned.
    assert!(decoded.records.iter().all(|r| !["a", "b", "c"].contains(&r.id.as_str())));
    assert_eq!(decoded.records[1].occurred_at, "2025-02-01T08:30:00.000Z");
}

#[test]
fn round_trip_keeps_surrounding_spaces_in_category_and_note() {
    let records = vec![tx(
        "p",
        "25",
        Kind::Income,
        " Gaji ",
        "2025-04-01T00:00:00.000Z",
        "  padded note ",
    )];
    for format in [Format::Csv, Format::Xlsx] {
        let bytes = codec::encode(&records, format).unwrap();
        let decoded = codec::decode(&bytes, now()).unwrap();
        assert_eq!(tuples(&decoded.records), tuples(&records), "{format}");
    }
}

#[test]
fn padded_amount_type_and_date_cells_are_trimmed() {
    let csv = "amount,type,date,note\n 12.5 , Expense , 2025-01-07 , keep me \n";
    let decoded = codec::decode(csv.as_bytes(), now()).unwrap();
    assert_eq!(decoded.added, 1);
    let r = &decoded.records[0];
    assert_eq!(r.amount, "12.5".parse::<Decimal>().unwrap());
    assert_eq!(r.kind, Kind::Expense);
    assert_eq!(r.occurred_at, "2025-01-07T00:00:00.000Z");
    assert_eq!(r.note, " keep me ");
}

#[test]
fn xlsx_round_trip_reads_back_the_entries_sheet() {
    let records = sample();
    let bytes = codec::encode(&records, Format::Xlsx).unwrap();
    assert!(bytes.starts_with(b"PK"));

    let decoded = codec::decode(&bytes, now()).unwrap();
    assert_eq!(decoded.added, 3);
    assert_eq!(tuples(&decoded.records), tuples(&records));
}

#[test]
fn rows_with_bad_amount_or_type_are_skipped() {
    let csv = "amount,type,category,date,note\n\
               100,income,Gaji,2025-01-05,ok\n\
               abc,expense,Makan,2025-01-06,bad amount\n\
               50,EXPENSE,Makan,2025-01-07,upper case type\n\
               20,transfer,Lain,2025-01-08,bad type\n\
               -5,expense,Lain,2025-01-09,negative\n";
    let decoded = codec::decode(csv.as_bytes(), now()).unwrap();

    assert_eq!(decoded.added, 2);
    assert_eq!(decoded.records[0].note, "ok");
    assert_eq!(decoded.records[1].kind, Kind::Expense);
    assert_eq!(decoded.records[1].occurred_at, "2025-01-07T00:00:00.000Z");
}

#[test]
fn headers_match_in_any_case_and_defaults_fill_gaps() {
    let csv = "ID,Amount,TYPE,Category,Date,NOTE\nold-id,75.25,Income,,,\n";
    let decoded = codec::decode(csv.as_bytes(), now()).unwrap();

    assert_eq!(decoded.added, 1);
    let r = &decoded.records[0];
    assert_ne!(r.id, "old-id");
    assert_eq!(r.amount, "75.25".parse::<Decimal>().unwrap());
    assert_eq!(r.kind, Kind::Income);
    assert_eq!(r.category, "Umum");
    assert_eq!(r.note, "");
    assert_eq!(r.occurred_at, "2025-03-04T05:06:07.000Z");
    assert_eq!(r.created_at, "2025-03-04T05:06:07.000Z");
}

#[test]
fn blank_lines_and_byte_order_mark_are_ignored() {
    let csv = "\u{feff}amount,type\n10,income\n,\n20,expense\n";
    let decoded = codec::decode(csv.as_bytes(), now()).unwrap();
    assert_eq!(decoded.added, 2);
}

#[test]
fn header_only_file_adds_nothing() {
    let decoded = codec::decode(b"amount,type,category,date,note", now()).unwrap();
    assert_eq!(decoded.added, 0);
    assert!(decoded.records.is_empty());
}

#[test]
fn unreadable_uploads_are_decode_failures() {
    assert!(matches!(
        codec::decode(&[], now()),
        Err(Error::DecodeFailure(_))
    ));
    assert!(matches!(
        codec::decode(&[0xff, 0xfe, 0x00, 0x81], now()),
        Err(Error::DecodeFailure(_))
    ));
    assert!(matches!(
        codec::decode(b"PK\x03\x04not really a zip", now()),
        Err(Error::DecodeFailure(_))
    ));
}

#[test]
fn dates_are_normalized_to_millisecond_utc() {
    assert_eq!(
        codec::normalize_date("2025-01-02").as_deref(),
        Some("2025-01-02T00:00:00.000Z")
    );
    assert_eq!(
        codec::normalize_date("2025-01-02T10:00:00+07:00").as_deref(),
        Some("2025-01-02T03:00:00.000Z")
    );
    assert_eq!(
        codec::normalize_date("2025-01-02 10:11:12").as_deref(),
        Some("2025-01-02T10:11:12.000Z")
    );
    assert_eq!(codec::normalize_date("next tuesday"), None);
}

#[test]
fn format_parsing_and_file_names() {
    assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
    assert_eq!("xlsx".parse::<Format>().unwrap(), Format::Xlsx);
    assert!(matches!("xml".parse::<Format>(), Err(Error::InvalidPayload(_))));
    assert_eq!(codec::export_file_name(Format::Csv, Some("2025-02")), "entries-2025-02.csv");
    assert_eq!(codec::export_file_name(Format::Xlsx, None), "entries.xlsx");
}
