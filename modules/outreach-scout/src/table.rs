//! The dated CSV shared by both jobs: naming, discovery, and read/write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use outreach_common::BusinessRecord;

const FILE_PREFIX: &str = "outreach_";
const FILE_SUFFIX: &str = ".csv";
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

/// `outreach_<YYYY-MM-DD>.csv` for `date`.
pub fn file_name_for(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}{}{FILE_SUFFIX}", date.format(DATE_FORMAT))
}

/// The date encoded in a table file name, if the name follows the convention
/// and the date is a real calendar date.
pub fn parse_file_date(file_name: &str) -> Option<NaiveDate> {
    let date = file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)?;
    if date.len() != DATE_LEN {
        return None;
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// The table with the greatest valid file name in `dir`. A missing directory
/// counts as empty.
pub fn latest_table(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list {}", dir.display()));
        }
    };

    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if parse_file_date(&name).is_none() {
            continue;
        }
        if latest.as_deref().map_or(true, |current| name.as_str() > current) {
            latest = Some(name);
        }
    }

    Ok(latest.map(|name| dir.join(name)))
}

/// Write `records` as the table for `date` under `dir`, creating the directory
/// when needed. Returns the written path.
pub fn write_records(dir: &Path, date: NaiveDate, records: &[BusinessRecord]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name_for(date));
    OutreachTable::from_records(records).write(&path)?;
    Ok(path)
}

/// Header plus rows of string cells. Columns are kept as found so a rewrite
/// never drops data the Auditor does not own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutreachTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl OutreachTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self { headers, rows };
        table.pad_rows();
        table
    }

    pub fn from_records(records: &[BusinessRecord]) -> Self {
        Self::new(
            BusinessRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            records.iter().map(BusinessRecord::to_row).collect(),
        )
    }

    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Failed to read row {} of {}", i + 1, path.display()))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(Self::new(headers, rows))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of `name`, appending an empty column when absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        self.pad_rows();
        self.headers.len() - 1
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }

    fn pad_rows(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_name_parses() {
        assert_eq!(
            parse_file_date("outreach_2024-01-05.csv"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert!(parse_file_date("outreach_bad-date.csv").is_none());
        assert!(parse_file_date("outreach_2024-13-40.csv").is_none());
        assert!(parse_file_date("outreach_2023-02-29.csv").is_none());
        assert!(parse_file_date("outreach_2024-01-05.tsv").is_none());
        assert!(parse_file_date("report_2024-01-05.csv").is_none());
        assert!(parse_file_date("outreach_2024-1-5.csv").is_none());
        assert!(parse_file_date("outreach_2024-01-05_old.csv").is_none());
    }

    #[test]
    fn file_name_round_trips_date() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        assert_eq!(file_name_for(date), "outreach_2025-11-30.csv");
        assert_eq!(parse_file_date(&file_name_for(date)), Some(date));
    }

    #[test]
    fn ensure_column_appends_once() {
        let mut table = OutreachTable::new(
            vec!["name".into(), "website".into()],
            vec![vec!["a".into(), "https://a.example".into()], vec!["b".into()]],
        );
        assert_eq!(table.rows()[1].len(), 2);

        let idx = table.ensure_column("SEO Score");
        assert_eq!(idx, 2);
        assert_eq!(table.ensure_column("SEO Score"), 2);
        assert_eq!(table.headers().len(), 3);
        assert!(table.rows().iter().all(|r| r.len() == 3));

        table.set_cell(0, idx, "88".into());
        assert_eq!(table.cell(0, "SEO Score"), Some("88"));
        assert_eq!(table.cell(1, "SEO Score"), Some(""));
    }
}
