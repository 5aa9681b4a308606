//! Plain-text and JSON renderings of an aggregated malt map.
//!
//! Each `render_*` function returns the full output so `main` only prints it.

use std::collections::HashSet;

use maltmap_core::{region_color, ChartKind, RangeFilter, Whisky};
use maltmap_ingest::MaltMap;

/// Table of whiskies with review counts and averages.
pub(crate) fn render_summary(map: &MaltMap, region: Option<&str>, filter: &RangeFilter) -> String {
    let whiskies: Vec<&Whisky> = map.filtered(region, filter).collect();
    if whiskies.is_empty() {
        return format!(
            "no whiskies match{}\n",
            region.map(|r| format!(" in region '{r}'")).unwrap_or_default()
        );
    }

    let mut out = format!(
        "{:<22}{:<14}{:>8}{:>8}{:>8}\n",
        "WHISKY", "REGION", "REVIEWS", "PRICE", "RATING"
    );
    for w in whiskies {
        out.push_str(&format!(
            "{:<22}{:<14}{:>8}{:>8}{:>8}\n",
            w.name(),
            w.region(),
            w.review_count(),
            w.average_price(),
            w.average_rating()
        ));
    }
    out
}

/// Regions with their chart colour and whisky count.
pub(crate) fn render_regions(map: &MaltMap) -> String {
    let mut out = format!("{:<14}{:<10}WHISKIES\n", "REGION", "COLOR");
    for region in &map.regions {
        let count = map.whiskies.iter().filter(|w| w.region() == region).count();
        out.push_str(&format!(
            "{:<14}{:<10}{}\n",
            region,
            region_color(region),
            count
        ));
    }
    out
}

/// Chart datasets as JSON, one per region.
pub(crate) fn render_datasets(
    map: &MaltMap,
    kind: ChartKind,
    filter: &RangeFilter,
    hidden: &[String],
    pretty: bool,
) -> anyhow::Result<String> {
    let hidden: HashSet<String> = hidden.iter().cloned().collect();
    let sets = map.datasets(kind, filter, &hidden);
    let json = if pretty {
        serde_json::to_string_pretty(&sets)?
    } else {
        serde_json::to_string(&sets)?
    };
    Ok(json)
}

/// Review table for the detail panel of one whisky.
pub(crate) fn render_reviews(whisky: &Whisky) -> String {
    let mut out = format!(
        "{} ({})\nAverage price: ${}  Average rating: {}  Reviews: {}\n",
        whisky.name(),
        whisky.region(),
        whisky.average_price(),
        whisky.average_rating(),
        whisky.review_count()
    );

    if whisky.reviews().is_empty() {
        out.push_str("no reviews\n");
        return out;
    }

    out.push_str(&format!(
        "\n{:<12}{:<20}{:<10}{:<8}LINK\n",
        "DATE", "REVIEWER", "PRICE", "RATING"
    ));
    for review in whisky.reviews() {
        let date = review
            .date
            .map_or_else(|| review.date_text.clone(), |d| d.format("%Y-%m-%d").to_string());
        out.push_str(&format!(
            "{:<12}{:<20}{:<10}{:<8}{}\n",
            date,
            review.reviewer,
            review.price.to_string(),
            review.rating.to_string(),
            review.review_link
        ));
    }
    out
}

pub(crate) fn render_stats(map: &MaltMap) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&map.stats)?)
}
