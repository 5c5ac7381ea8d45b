use chrono::NaiveDate;
use serde_json::{Map, Value as Json};

use super::error::AdminError;

/// A rendered CSV download.
#[derive(Clone, Debug)]
pub struct CsvExport {
    pub filename: String,
    pub body: Vec<u8>,
    pub rows: usize,
}

impl CsvExport {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

pub fn export_filename(resource: &str, today: NaiveDate) -> String {
    format!("{}_export_{}.csv", resource, today.format("%Y_%m_%d"))
}

fn cell(value: Option<&Json>) -> String {
    match value {
        None | Some(Json::Null) => String::new(),
        Some(Json::String(text)) => text.clone(),
        Some(Json::Bool(flag)) => flag.to_string(),
        Some(Json::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Header row of `columns`, then one row per record in column order.
pub fn write_csv(columns: &[&str], records: &[Map<String, Json>]) -> Result<Vec<u8>, AdminError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|column| cell(record.get(*column))))?;
    }
    writer
        .into_inner()
        .map_err(|err| AdminError::Csv(csv::Error::from(err.into_error())))
}
