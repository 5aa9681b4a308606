//! Folds review rows into catalog whiskies.
//!
//! Rows are processed strictly in input order. A row is dropped when it has
//! no name or names no catalog whisky; otherwise it is attached to the first
//! catalog whisky whose name it contains. Nothing in here fails on bad cell
//! contents; skips are counted in [`IngestStats`].

use std::fs::File;
use std::path::Path;

use maltmap_core::{load_catalog, Catalog};

use crate::error::IngestError;
use crate::reader::{parse_reviews, read_reviews};
use crate::types::{IngestStats, MaltMap, RawReviewRow, ReviewColumns};

/// Aggregates `rows` into the whiskies seeded from `catalog`.
///
/// # Errors
///
/// Returns [`IngestError::Config`] only if the catalog's name pattern cannot
/// be compiled. Row contents never cause an error.
pub fn aggregate<I>(catalog: &Catalog, rows: I) -> Result<MaltMap, IngestError>
where
    I: IntoIterator<Item = RawReviewRow>,
{
    let matcher = catalog.matcher()?;
    let mut whiskies = catalog.whiskies();
    let mut stats = IngestStats::default();

    for row in rows {
        stats.rows_read += 1;

        let Some(name) = row.name.as_deref() else {
            stats.rows_without_name += 1;
            continue;
        };

        if !matcher.is_match(name) {
            stats.rows_unmatched += 1;
            tracing::trace!(name, "review names no catalog whisky");
            continue;
        }

        let Some(idx) = matcher.resolve(name) else {
            stats.rows_unmatched += 1;
            tracing::debug!(name, "review matched the catalog pattern but no single whisky");
            continue;
        };

        let price_missing = row.price.is_missing();
        let outcome = whiskies[idx].add_review(row.into_review());
        stats.reviews_attached += 1;

        if !outcome.rating_applied {
            stats.ratings_skipped += 1;
        }
        if price_missing {
            stats.prices_missing += 1;
        } else if !outcome.price_applied {
            stats.prices_skipped += 1;
        }
    }

    let regions = maltmap_core::regions(&whiskies);

    tracing::info!(
        whiskies = whiskies.len(),
        rows_read = stats.rows_read,
        reviews_attached = stats.reviews_attached,
        rows_unmatched = stats.rows_unmatched,
        rows_without_name = stats.rows_without_name,
        ratings_skipped = stats.ratings_skipped,
        prices_missing = stats.prices_missing,
        prices_skipped = stats.prices_skipped,
        "aggregated review table"
    );

    Ok(MaltMap {
        whiskies,
        regions,
        stats,
    })
}

/// Loads the catalog and review export from disk and aggregates them.
///
/// # Errors
///
/// Returns an error if either file cannot be read, the catalog is invalid,
/// or the review table's CSV framing is broken.
pub fn load_malt_map(
    catalog_path: &Path,
    reviews_path: &Path,
    columns: &ReviewColumns,
) -> Result<MaltMap, IngestError> {
    let catalog = load_catalog(catalog_path)?;
    let file = File::open(reviews_path).map_err(|e| reviews_io_error(reviews_path, e))?;
    let rows = read_reviews(file, columns)?;
    aggregate(&catalog, rows)
}

/// Async variant of [`load_malt_map`]: the review file is read without
/// blocking the runtime, then aggregated in one pass.
///
/// # Errors
///
/// See [`load_malt_map`].
pub async fn load_malt_map_async(
    catalog_path: &Path,
    reviews_path: &Path,
    columns: &ReviewColumns,
) -> Result<MaltMap, IngestError> {
    let catalog = load_catalog(catalog_path)?;
    let bytes = tokio::fs::read(reviews_path)
        .await
        .map_err(|e| reviews_io_error(reviews_path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let rows = parse_reviews(&text, columns)?;
    aggregate(&catalog, rows)
}

fn reviews_io_error(path: &Path, source: std::io::Error) -> IngestError {
    IngestError::ReviewsFileIo {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
