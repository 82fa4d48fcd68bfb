use std::fs::File;
use std::io::{Read, Write};

use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::company::CompanyProfile;
use crate::inventory::commands::{AddItem, Command, RecordIncoming, RecordOutgoing};
use crate::inventory::ledger::{Ledger, StockSummary};

pub const REPORT_TITLE: &str = "Stock Report";

const REPORT_HEADER: [&str; 7] = [
    "S. No.",
    "Item Code",
    "Description",
    "Unit",
    "In",
    "Out",
    "Balance",
];

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Item,
    Incoming,
    Outgoing,
}

#[derive(Debug, Error)]
pub enum RowDataError {
    #[error("movement row requires a quantity")]
    MissingQuantity,
    #[error("item row requires a description and a unit")]
    MissingItemFields,
}

/// One row of the ingest file. Item rows register catalog entries, movement
/// rows append to the receipt or issue log.
#[derive(Debug, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "type")]
    pub kind: RowKind,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)] // Default to `None` if the field is empty
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// One printed report line; `serial` is the 1-based display number, not a
/// persisted id.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub serial: usize,
    pub item_code: String,
    pub description: String,
    pub unit: String,
    pub total_in: Decimal,
    pub total_out: Decimal,
    pub balance: Decimal,
}

impl ReportRow {
    fn from_summary(serial: usize, summary: &StockSummary) -> ReportRow {
        ReportRow {
            serial,
            item_code: summary.item_code.clone(),
            description: summary.description.clone(),
            unit: summary.unit.clone(),
            total_in: summary.total_in,
            total_out: summary.total_out,
            balance: summary.balance,
        }
    }
}

impl TryFrom<LedgerRow> for Command {
    type Error = RowDataError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        match row.kind {
            RowKind::Item => match (row.description, row.unit) {
                (Some(description), Some(unit)) => {
                    Ok(Command::AddItem(AddItem::new(&row.code, &description, &unit)))
                },
                _ => Err(RowDataError::MissingItemFields),
            },

            RowKind::Incoming => {
                if let Some(quantity) = row.quantity {
                    Ok(Command::RecordIncoming(RecordIncoming::new(
                        &row.code, quantity, row.date, row.remarks,
                    )))
                } else {
                    Err(RowDataError::MissingQuantity)
                }
            },

            RowKind::Outgoing => {
                if let Some(quantity) = row.quantity {
                    Ok(Command::RecordOutgoing(RecordOutgoing::new(
                        &row.code, quantity, row.date, row.remarks,
                    )))
                } else {
                    Err(RowDataError::MissingQuantity)
                }
            },
        }
    }
}

pub fn process_csv(file_path: &str, ledger: &mut Ledger) -> Result<()> {
    let file = File::open(file_path)?;

    process_reader(file, ledger)
}

/// Applies every well-formed row to the ledger. Malformed or rejected rows
/// are logged and skipped so one bad line does not abort the whole file.
pub fn process_reader<R: Read>(reader: R, ledger: &mut Ledger) -> Result<()> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    for record in csv_reader.deserialize::<LedgerRow>() {
        match record {
            Ok(row) => match Command::try_from(row) {
                Ok(command) => {
                    if let Err(err) = ledger.execute(command) {
                        debug!("failed to execute command, err={}", err);
                    }
                },
                Err(err) => debug!("invalid row, err={}", err),
            },
            Err(err) => debug!("failed to deserialize record, err={}", err),
        }
    }

    Ok(())
}

pub fn report_title(company: Option<&CompanyProfile>) -> String {
    match company {
        Some(company) => format!("{} - {}", REPORT_TITLE, company.name()),
        None => REPORT_TITLE.to_string(),
    }
}

/// Writes the stock report as delimited text: a title row, the fixed column
/// header, then one serial-numbered row per catalog entry.
pub fn export_report<W: Write>(
    writer: W,
    ledger: &Ledger,
    company: Option<&CompanyProfile>,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record([report_title(company).as_str()])?;
    csv_writer.write_record(REPORT_HEADER)?;

    for (idx, summary) in ledger.stock_report().iter().enumerate() {
        csv_writer.serialize(ReportRow::from_summary(idx + 1, summary))?;
    }

    csv_writer.flush()?;

    Ok(())
}

/// Reads a report produced by [`export_report`] back into its title and
/// ordered rows.
pub fn parse_report<R: Read>(reader: R) -> Result<(String, Vec<ReportRow>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut title = String::new();
    let mut rows = Vec::new();

    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        match idx {
            0 => title = record.get(0).unwrap_or_default().to_string(),
            1 => {}, // column header row
            _ => rows.push(record.deserialize(None)?),
        }
    }

    Ok((title, rows))
}
