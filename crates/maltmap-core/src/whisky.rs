//! Per-whisky running statistics.
//!
//! A [`Whisky`] folds each attached [`Review`] into cumulative price and
//! rating averages. Malformed prices and ratings are skipped for the affected
//! metric only; the review itself is always kept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::field::FieldValue;

/// Date layouts seen in review exports, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d", "%d %B %Y"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

impl MapPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single review row attached to a whisky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Date exactly as it appeared in the export.
    pub date_text: String,
    /// Best-effort calendar date parsed from `date_text`.
    pub date: Option<NaiveDate>,
    pub review_link: String,
    pub price: FieldValue,
    pub rating: FieldValue,
    pub reviewer: String,
}

impl Review {
    #[must_use]
    pub fn new(
        date_text: impl Into<String>,
        review_link: impl Into<String>,
        price: FieldValue,
        rating: FieldValue,
        reviewer: impl Into<String>,
    ) -> Self {
        let date_text = date_text.into();
        let date = parse_review_date(&date_text);
        Self {
            date_text,
            date,
            review_link: review_link.into(),
            price,
            rating,
            reviewer: reviewer.into(),
        }
    }
}

/// Which metrics a review contributed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    pub rating_applied: bool,
    pub price_applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Whisky {
    name: String,
    image: String,
    region: String,
    position: MapPosition,
    reviews: Vec<Review>,
    total_price: f64,
    total_rating: f64,
    average_price: f64,
    average_rating: f64,
}

impl Whisky {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        region: impl Into<String>,
        position: MapPosition,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            region: region.into(),
            position,
            reviews: Vec::new(),
            total_price: 0.0,
            total_rating: 0.0,
            average_price: 0.0,
            average_rating: 0.0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Fixed position on the malt map.
    #[must_use]
    pub fn position(&self) -> MapPosition {
        self.position
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    #[must_use]
    pub fn total_rating(&self) -> f64 {
        self.total_rating
    }

    #[must_use]
    pub fn average_price(&self) -> f64 {
        self.average_price
    }

    #[must_use]
    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    /// Position on the price-vs-rating chart: `(average_price, average_rating)`.
    #[must_use]
    pub fn price_v_rating_position(&self) -> MapPosition {
        MapPosition::new(self.average_price, self.average_rating)
    }

    /// Number of attached reviews whose raw price is present, whether or not
    /// it could be parsed. This is the price denominator.
    #[must_use]
    pub fn priced_review_count(&self) -> usize {
        self.reviews.iter().filter(|r| !r.price.is_missing()).count()
    }

    /// Attaches a review and folds its rating and price into the averages.
    pub fn add_review(&mut self, review: Review) -> ReviewOutcome {
        let rating = review.rating.clone();
        let price = review.price.clone();
        self.reviews.push(review);

        ReviewOutcome {
            rating_applied: self.update_rating(&rating),
            price_applied: self.update_price(&price),
        }
    }

    // The denominator is every attached review, including ones whose rating
    // was unusable. A blank rating counts as 0; unparseable text is skipped.
    // Prices divide by priced reviews only.
    #[allow(clippy::cast_precision_loss)]
    fn update_rating(&mut self, rating: &FieldValue) -> bool {
        let rating = match rating {
            FieldValue::Missing => 0.0,
            other => match other.as_number() {
                Some(n) => n,
                None => return false,
            },
        };
        let count = self.reviews.len();
        if count == 0 {
            return false;
        }

        self.total_rating += rating;
        self.average_rating = js_round(self.total_rating / count as f64);
        true
    }

    #[allow(clippy::cast_precision_loss)]
    fn update_price(&mut self, price: &FieldValue) -> bool {
        let Some(price) = parse_price(price) else {
            return false;
        };
        let priced = self.priced_review_count();
        if priced == 0 {
            return false;
        }

        self.total_price += price;
        self.average_price = js_round(self.total_price / priced as f64);
        true
    }
}

/// Interprets a raw price cell.
///
/// Numbers pass through. Text that is not a plain number is rejected when it
/// carries a letter, `(`, `£`, or `~`; otherwise commas become decimal points,
/// everything but digits and points is stripped, and the leading float is
/// read. `"45,50"` reads as `45.5`, `"$60"` as `60`, `"~45"` is rejected.
#[must_use]
pub fn parse_price(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Missing => None,
        FieldValue::Numeric(n) => n.is_finite().then_some(*n),
        FieldValue::Text(text) => {
            if let Some(n) = value.as_number() {
                return Some(n);
            }
            if is_price_noise(text) {
                return None;
            }
            salvage_price(text)
        }
    }
}

fn is_price_noise(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_alphabetic() || matches!(c, '(' | '£' | '~'))
}

fn salvage_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_float(&cleaned)
}

/// Reads the longest `digits[.digits]` prefix. Input is ASCII digits and
/// points only.
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_point = false;
    let mut seen_digit = false;

    for (idx, c) in s.char_indices() {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && !seen_point {
            seen_point = true;
        } else {
            break;
        }
        end = idx + 1;
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Rounds half-up, so `2.5` becomes `3` and `-2.5` becomes `-2`.
/// Exact just below one half and past 2^52.
#[must_use]
pub fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
#[path = "whisky_test.rs"]
mod tests;
