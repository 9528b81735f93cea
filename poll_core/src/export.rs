// Encoding of the vote ledger into a downloadable CSV document.

use std::error::Error;
use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::Vote;

/// One flat record of the export document.
///
/// The field order here is the column order of the output.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    pub id: String,
    #[serde(rename = "contestantId")]
    pub contestant_id: String,
    #[serde(rename = "contestantName")]
    pub contestant_name: String,
    #[serde(rename = "paidPhone")]
    pub paid_phone: String,
    pub reference: String,
    #[serde(rename = "voterName")]
    pub voter_name: Option<String>,
    pub timestamp: u64,
    pub amount: Option<String>,
}

impl From<&Vote> for ExportRow {
    fn from(v: &Vote) -> ExportRow {
        ExportRow {
            id: v.id.clone(),
            contestant_id: v.contestant_id.clone(),
            contestant_name: v.contestant_name.clone(),
            paid_phone: v.paid_phone.clone(),
            reference: v.reference.clone(),
            voter_name: v.voter_name.clone(),
            timestamp: v.timestamp,
            amount: v.amount.clone(),
        }
    }
}

/// Flattens the ledger into export rows, in ledger order (newest first).
pub fn export_rows(votes: &[Vote]) -> Vec<ExportRow> {
    votes.iter().map(ExportRow::from).collect()
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ExportError {
    Encoding(String),
}

impl Error for ExportError {}

impl Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Encoding(msg) => write!(f, "CSV encoding failed: {}", msg),
        }
    }
}

// An export with zero votes still has to produce a document.
const PLACEHOLDER_HEADER: &str = "example";
const PLACEHOLDER_VALUE: &str = "no votes";

/// Encodes the rows as a UTF-8 CSV document.
///
/// The header line carries the field names in declaration order. Values are
/// quoted only where needed, with internal double quotes doubled, so a value
/// such as `Doe, Jane` survives the round trip as a single field. An empty
/// input yields a one-field placeholder header and row instead of an empty
/// document.
pub fn encode(rows: &[ExportRow]) -> Result<String, ExportError> {
    debug!("encode: {:?} rows", rows.len());
    let mut wtr = csv::Writer::from_writer(vec![]);
    if rows.is_empty() {
        wtr.write_record([PLACEHOLDER_HEADER])
            .map_err(|e| ExportError::Encoding(e.to_string()))?;
        wtr.write_record([PLACEHOLDER_VALUE])
            .map_err(|e| ExportError::Encoding(e.to_string()))?;
    } else {
        for row in rows.iter() {
            wtr.serialize(row)
                .map_err(|e| ExportError::Encoding(e.to_string()))?;
        }
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}
