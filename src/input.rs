//! Contact rows read from the input file.
//!
//! The first record is a header and is always skipped. Column 0 holds the
//! full name, column 1 a comma-separated list of email addresses; any
//! further columns are ignored.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::io_utils;

const NAME_COLUMN: usize = 0;
const EMAILS_COLUMN: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub full_name: String,
    pub raw_emails: String,
    /// 1-based line of the record in the input, 0 when unknown.
    pub line: u64,
}

impl ContactRow {
    pub fn new(full_name: impl Into<String>, raw_emails: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            raw_emails: raw_emails.into(),
            line: 0,
        }
    }

    pub fn emails(&self) -> Vec<String> {
        parse_emails(&self.raw_emails)
    }
}

/// Splits an email field on commas and trims each address. Pieces that
/// are blank after trimming are not addresses and are dropped, so a blank
/// field yields an empty list.
pub fn parse_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct ContactReader<R: Read> {
    records: csv::ByteRecordsIntoIter<R>,
    encoding: &'static Encoding,
}

impl<R: Read> ContactReader<R> {
    pub fn new(reader: R, delimiter: u8, encoding: &'static Encoding) -> Self {
        let reader = io_utils::open_csv_reader(reader, delimiter, true);
        Self {
            records: reader.into_byte_records(),
            encoding,
        }
    }
}

impl ContactReader<Box<dyn Read>> {
    pub fn from_path(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let reader = io_utils::open_csv_reader_from_path(path, delimiter, true)?;
        Ok(Self {
            records: reader.into_byte_records(),
            encoding,
        })
    }
}

impl<R: Read> Iterator for ContactReader<R> {
    type Item = Result<ContactRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(record.context("Reading contact row").and_then(|record| {
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            let mut fields = io_utils::decode_record(&record, self.encoding)
                .with_context(|| format!("Decoding line {line}"))?;
            fields.resize(EMAILS_COLUMN + 1, String::new());
            Ok(ContactRow {
                full_name: std::mem::take(&mut fields[NAME_COLUMN]),
                raw_emails: std::mem::take(&mut fields[EMAILS_COLUMN]),
                line,
            })
        }))
    }
}
