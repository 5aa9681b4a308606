use std::collections::HashSet;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use maltmap_core::{region_color, ChartKind, Dataset, RangeFilter};
use maltmap_ingest::IngestStats;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{split_csv_param, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct RegionItem {
    name: String,
    color: &'static str,
    whisky_count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct DatasetsData {
    chart: ChartKind,
    /// Upper bound for the price slider.
    max_average_price: Option<f64>,
    datasets: Vec<Dataset>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct DatasetQuery {
    pub chart: Option<String>,
    /// Comma-separated region names to flag hidden.
    pub hidden: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

pub(super) async fn list_regions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<RegionItem>>> {
    let data = state
        .map
        .regions
        .iter()
        .map(|region| RegionItem {
            name: region.clone(),
            color: region_color(region),
            whisky_count: state
                .map
                .whiskies
                .iter()
                .filter(|w| w.region() == region)
                .count(),
        })
        .collect();

    Json(ApiResponse::new(data, req_id.0))
}

pub(super) async fn list_datasets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<ApiResponse<DatasetsData>>, ApiError> {
    let chart = match query.chart.as_deref() {
        None => ChartKind::default(),
        Some(raw) => raw
            .parse::<ChartKind>()
            .map_err(|reason| ApiError::new(req_id.0.clone(), "bad_request", reason))?,
    };

    let filter = RangeFilter {
        min_rating: query.min_rating,
        max_rating: query.max_rating,
        min_price: query.min_price,
        max_price: query.max_price,
    };
    let hidden: HashSet<String> = split_csv_param(query.hidden.as_deref())
        .into_iter()
        .collect();

    let data = DatasetsData {
        chart,
        max_average_price: state.map.max_average_price(),
        datasets: state.map.datasets(chart, &filter, &hidden),
    };

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn get_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<IngestStats>> {
    Json(ApiResponse::new(state.map.stats, req_id.0))
}
