// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreadsheet export and import of transactions.
//!
//! Exports project each transaction onto the columns in [HEADER], either as
//! CSV text or as a one-sheet workbook. Imports accept either format, detected
//! from the content, and skip rows that do not describe a valid transaction
//! instead of failing the whole upload.

use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::{Error, Result};
use crate::models::{Kind, Transaction};
pub use crate::utils::normalize_date;
use crate::utils::iso_timestamp;
use crate::validate::category_or_default;

pub const HEADER: [&str; 6] = ["id", "amount", "type", "category", "date", "note"];

/// Name of the single sheet written to workbook exports.
pub const SHEET_NAME: &str = "Entries";

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Xlsx,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Csv => "text/csv",
            Format::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "xlsx" => Ok(Format::Xlsx),
            other => Err(Error::InvalidPayload(format!(
                "unknown export format '{other}' (use csv|xlsx)"
            ))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Default download name, e.g. `entries-2025-01.csv`.
pub fn export_file_name(format: Format, month: Option<&str>) -> String {
    match month {
        Some(m) => format!("entries-{m}.{}", format.extension()),
        None => format!("entries.{}", format.extension()),
    }
}

pub fn encode(records: &[Transaction], format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Csv => Ok(encode_csv(records).into_bytes()),
        Format::Xlsx => encode_xlsx(records).map_err(|e| Error::EncodeFailure(e.to_string())),
    }
}

/// CSV with the category and note columns always quoted and the other
/// columns written bare. Rows are separated by `\n` with no trailing newline.
pub fn encode_csv(records: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HEADER.join(","));
    for tx in records {
        lines.push(format!(
            "{},{},{},{},{},{}",
            tx.id,
            tx.amount.normalize(),
            tx.kind,
            quoted(&tx.category),
            tx.occurred_at,
            quoted(&tx.note)
        ));
    }
    lines.join("\n")
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn encode_xlsx(records: &[Transaction]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, name) in HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (i, tx) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &tx.id)?;
        match tx.amount.to_f64() {
            Some(amount) => sheet.write_number(row, 1, amount)?,
            None => sheet.write_string(row, 1, tx.amount.to_string())?,
        };
        sheet.write_string(row, 2, tx.kind.as_str())?;
        sheet.write_string(row, 3, &tx.category)?;
        sheet.write_string(row, 4, &tx.occurred_at)?;
        sheet.write_string(row, 5, &tx.note)?;
    }
    workbook.save_to_buffer()
}

/// The result of reading an uploaded spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub records: Vec<Transaction>,
    /// Number of rows accepted; rejected rows are not reported individually.
    pub added: usize,
}

pub fn decode(bytes: &[u8], now: DateTime<Utc>) -> Result<Decoded> {
    let rows = read_rows(bytes)?;
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Decoded {
            records: Vec::new(),
            added: 0,
        });
    };
    let columns = Columns::from_header(&header);

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        match columns.transaction(&row, now) {
            Some(tx) => records.push(tx),
            // Row numbers are 1-based and include the header.
            None => tracing::debug!("Skipping import row {}: {:?}", i + 2, row),
        }
    }
    let added = records.len();
    Ok(Decoded { records, added })
}

fn read_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    if bytes.is_empty() {
        return Err(Error::DecodeFailure("the file is empty".into()));
    }
    if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
        read_workbook_rows(bytes)
    } else {
        read_csv_rows(bytes)
    }
}

fn read_csv_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::DecodeFailure(format!("not a spreadsheet or UTF-8 CSV: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for rec in reader.records() {
        let rec = rec.map_err(|e| Error::DecodeFailure(format!("malformed CSV: {e}")))?;
        rows.push(rec.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn read_workbook_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::DecodeFailure(format!("could not open workbook: {e}")))?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::DecodeFailure("the workbook has no sheets".into()))?;
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| Error::DecodeFailure(format!("could not read sheet '{first_sheet}': {e}")))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

/// Positions of the known columns, matched case-insensitively.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Self {
        let mut index = HashMap::new();
        for (i, name) in header.iter().enumerate() {
            // The first occurrence of a name wins.
            index.entry(name.trim().to_lowercase()).or_insert(i);
        }
        Columns { index }
    }

    /// The cell exactly as written, if present and not empty.
    fn raw<'r>(&self, row: &'r [String], name: &str) -> Option<&'r str> {
        self.index
            .get(name)
            .and_then(|&i| row.get(i))
            .map(|cell| cell.as_str())
            .filter(|cell| !cell.is_empty())
    }

    /// The trimmed cell, for columns whose surrounding spaces carry no meaning.
    fn get<'r>(&self, row: &'r [String], name: &str) -> Option<&'r str> {
        self.raw(row, name).map(str::trim).filter(|cell| !cell.is_empty())
    }

    fn transaction(&self, row: &[String], now: DateTime<Utc>) -> Option<Transaction> {
        let amount = parse_amount(self.get(row, "amount")?)?;
        let kind = self.get(row, "type")?.to_lowercase().parse::<Kind>().ok()?;
        let occurred_at = match self.get(row, "date") {
            Some(raw) => normalize_date(raw)?,
            None => iso_timestamp(now),
        };
        Some(Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            kind,
            category: category_or_default(self.raw(row, "category").map(str::to_string)),
            occurred_at,
            note: self.raw(row, "note").unwrap_or_default().to_string(),
            created_at: iso_timestamp(now),
        })
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .filter(|a| *a > Decimal::ZERO)
}
