//! Review table reader.
//!
//! Tokenizing is left to the `csv` crate. This module maps header names to
//! fields and infers numeric cells, so prices and ratings arrive as
//! [`FieldValue`]s whatever shape the export gave them. Invalid UTF-8 is
//! replaced rather than rejected; short rows yield missing cells.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};
use maltmap_core::FieldValue;

use crate::error::IngestError;
use crate::types::{RawReviewRow, ReviewColumns};

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct ColumnIndex {
    name: Option<usize>,
    date: Option<usize>,
    review_link: Option<usize>,
    price: Option<usize>,
    rating: Option<usize>,
    reviewer: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &ByteRecord, columns: &ReviewColumns) -> Self {
        let find = |wanted: &str| {
            headers.iter().position(|h| {
                let header = String::from_utf8_lossy(h);
                header.trim_start_matches('\u{feff}').trim() == wanted
            })
        };

        Self {
            name: find(&columns.name),
            date: find(&columns.date),
            review_link: find(&columns.review_link),
            price: find(&columns.price),
            rating: find(&columns.rating),
            reviewer: find(&columns.reviewer),
        }
    }
}

/// Reads every data row of a review export.
///
/// A missing name column is not an error: every row is read with no name and
/// will be dropped by the aggregation.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] if the underlying reader fails or the CSV
/// framing is broken (e.g. an unterminated quote).
pub fn read_reviews<R: Read>(
    reader: R,
    columns: &ReviewColumns,
) -> Result<Vec<RawReviewRow>, IngestError> {
    let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv.byte_headers()?.clone();
    let index = ColumnIndex::resolve(&headers, columns);
    if index.name.is_none() {
        tracing::warn!(
            column = %columns.name,
            "review table has no name column; no rows will match"
        );
    }

    let mut rows = Vec::new();
    for record in csv.byte_records() {
        let record = record?;
        rows.push(row_from_record(&record, &index));
    }

    tracing::debug!(rows = rows.len(), "read review table");
    Ok(rows)
}

/// Reads a review export already held in memory.
///
/// # Errors
///
/// See [`read_reviews`].
pub fn parse_reviews(text: &str, columns: &ReviewColumns) -> Result<Vec<RawReviewRow>, IngestError> {
    read_reviews(text.as_bytes(), columns)
}

fn row_from_record(record: &ByteRecord, index: &ColumnIndex) -> RawReviewRow {
    let cell = |idx: Option<usize>| -> Option<String> {
        idx.and_then(|i| record.get(i))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    };
    let text = |idx: Option<usize>| cell(idx).unwrap_or_default();
    let field = |idx: Option<usize>| cell(idx).map_or(FieldValue::Missing, |raw| FieldValue::infer(&raw));

    RawReviewRow {
        name: cell(index.name).filter(|s| !s.is_empty()),
        date: text(index.date),
        review_link: text(index.review_link),
        price: field(index.price),
        rating: field(index.rating),
        reviewer: text(index.reviewer),
    }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
