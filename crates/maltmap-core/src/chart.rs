//! Scatter-chart datasets built from aggregated whiskies.
//!
//! One dataset per region, in catalog order. The map view plots each whisky
//! at its fixed map position; the price-vs-rating view plots averages and
//! leaves out whiskies that have no usable price or rating yet.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::whisky::{MapPosition, Whisky};

const DATASET_BORDER_COLOR: &str = "#fff";
const DATASET_POINT_RADIUS: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Map,
    PriceVRating,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Map => write!(f, "map"),
            ChartKind::PriceVRating => write!(f, "price_v_rating"),
        }
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "map" => Ok(Self::Map),
            "price_v_rating" | "price-v-rating" | "price" => Ok(Self::PriceVRating),
            other => Err(format!(
                "unknown chart '{other}'; expected map or price_v_rating"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

impl ChartPoint {
    fn at(position: MapPosition, name: &str) -> Self {
        Self {
            x: position.x,
            y: position.y,
            name: name.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<ChartPoint>,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub point_radius: u32,
    pub hidden: bool,
}

impl Dataset {
    /// Builds the dataset for `region` from every whisky in that region that
    /// passes `filter`.
    #[must_use]
    pub fn for_region(
        region: &str,
        whiskies: &[Whisky],
        kind: ChartKind,
        filter: &RangeFilter,
        hidden: bool,
    ) -> Self {
        let data = whiskies
            .iter()
            .filter(|w| w.region() == region && filter.contains(w))
            .filter_map(|w| match kind {
                ChartKind::Map => Some(ChartPoint::at(w.position(), w.name())),
                ChartKind::PriceVRating => {
                    let plotted = w.average_price() != 0.0 && w.average_rating() != 0.0;
                    plotted.then(|| ChartPoint::at(w.price_v_rating_position(), w.name()))
                }
            })
            .collect();

        Self {
            label: region.to_owned(),
            data,
            background_color: region_color(region),
            border_color: DATASET_BORDER_COLOR,
            point_radius: DATASET_POINT_RADIUS,
            hidden,
        }
    }
}

/// Builds one dataset per region. Regions named in `hidden_regions` are kept
/// but flagged hidden so the legend still lists them.
#[must_use]
pub fn datasets(
    whiskies: &[Whisky],
    kind: ChartKind,
    filter: &RangeFilter,
    hidden_regions: &HashSet<String>,
) -> Vec<Dataset> {
    regions(whiskies)
        .iter()
        .map(|region| {
            Dataset::for_region(
                region,
                whiskies,
                kind,
                filter,
                hidden_regions.contains(region),
            )
        })
        .collect()
}

/// Inclusive bounds on average rating and price. Unset bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RangeFilter {
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl RangeFilter {
    #[must_use]
    pub fn contains(&self, whisky: &Whisky) -> bool {
        let rating = whisky.average_rating();
        let price = whisky.average_price();
        self.min_rating.is_none_or(|min| rating >= min)
            && self.max_rating.is_none_or(|max| rating <= max)
            && self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

/// Distinct regions in first-seen order.
#[must_use]
pub fn regions(whiskies: &[Whisky]) -> Vec<String> {
    let mut seen = HashSet::new();
    whiskies
        .iter()
        .map(Whisky::region)
        .filter(|region| seen.insert(*region))
        .map(ToOwned::to_owned)
        .collect()
}

#[must_use]
pub fn region_color(region: &str) -> &'static str {
    match region {
        "Speyside" => "#434348",
        "Highland" => "#7cb5ec",
        "Island" => "#90ed7d",
        "Islay" => "#f7a35c",
        "Other" => "#8085e9",
        "Lowland" => "#f15c80",
        "Campbeltown" => "#e4d354",
        _ => "#000",
    }
}

/// Highest average price, used as the upper end of the price slider.
#[must_use]
pub fn max_average_price(whiskies: &[Whisky]) -> Option<f64> {
    whiskies
        .iter()
        .map(Whisky::average_price)
        .reduce(f64::max)
}

/// Exact-name lookup for the detail panel.
#[must_use]
pub fn find_whisky<'a>(whiskies: &'a [Whisky], name: &str) -> Option<&'a Whisky> {
    whiskies.iter().find(|w| w.name() == name)
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
