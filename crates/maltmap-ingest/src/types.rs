use std::collections::HashSet;

use maltmap_core::{ChartKind, Dataset, FieldValue, RangeFilter, Review, Whisky};
use serde::Serialize;

/// Header names of the review export. Column order in the file is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewColumns {
    pub name: String,
    pub date: String,
    pub review_link: String,
    pub price: String,
    pub rating: String,
    pub reviewer: String,
}

impl Default for ReviewColumns {
    fn default() -> Self {
        Self {
            name: "Whisky Name".to_string(),
            date: "Date".to_string(),
            review_link: "Link To reddit Review".to_string(),
            price: "Price".to_string(),
            rating: "Rating".to_string(),
            reviewer: "Reviewer Username".to_string(),
        }
    }
}

/// One row of the review export, before it is matched to a whisky.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReviewRow {
    /// `None` when the cell is absent or empty.
    pub name: Option<String>,
    pub date: String,
    pub review_link: String,
    pub price: FieldValue,
    pub rating: FieldValue,
    pub reviewer: String,
}

impl RawReviewRow {
    #[must_use]
    pub fn into_review(self) -> Review {
        Review::new(
            self.date,
            self.review_link,
            self.price,
            self.rating,
            self.reviewer,
        )
    }
}

/// Counters for rows the aggregation skipped, in whole or in part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub rows_read: usize,
    pub rows_without_name: usize,
    pub rows_unmatched: usize,
    pub reviews_attached: usize,
    /// Attached reviews whose rating text was not a number. Blank ratings
    /// count as 0 and are not skipped.
    pub ratings_skipped: usize,
    /// Attached reviews with no price at all.
    pub prices_missing: usize,
    /// Attached reviews whose price was present but unusable.
    pub prices_skipped: usize,
}

/// Aggregated whiskies plus the derived data the chart and filters need.
#[derive(Debug, Clone, Default)]
pub struct MaltMap {
    pub whiskies: Vec<Whisky>,
    pub regions: Vec<String>,
    pub stats: IngestStats,
}

impl MaltMap {
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Whisky> {
        maltmap_core::find_whisky(&self.whiskies, name)
    }

    #[must_use]
    pub fn datasets(
        &self,
        kind: ChartKind,
        filter: &RangeFilter,
        hidden_regions: &HashSet<String>,
    ) -> Vec<Dataset> {
        maltmap_core::datasets(&self.whiskies, kind, filter, hidden_regions)
    }

    #[must_use]
    pub fn max_average_price(&self) -> Option<f64> {
        maltmap_core::max_average_price(&self.whiskies)
    }

    /// Whiskies in `region` (or all when `None`) whose averages pass `filter`.
    pub fn filtered<'a>(
        &'a self,
        region: Option<&'a str>,
        filter: &'a RangeFilter,
    ) -> impl Iterator<Item = &'a Whisky> + 'a {
        self.whiskies
            .iter()
            .filter(move |w| region.is_none_or(|r| w.region() == r) && filter.contains(w))
    }
}
