use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use maltmap_core::{FieldValue, MapPosition, RangeFilter, Review, Whisky};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct WhiskyItem {
    name: String,
    image: String,
    region: String,
    position: MapPosition,
    price_v_rating_position: MapPosition,
    review_count: usize,
    average_price: f64,
    average_rating: f64,
}

impl From<&Whisky> for WhiskyItem {
    fn from(w: &Whisky) -> Self {
        Self {
            name: w.name().to_owned(),
            image: w.image().to_owned(),
            region: w.region().to_owned(),
            position: w.position(),
            price_v_rating_position: w.price_v_rating_position(),
            review_count: w.review_count(),
            average_price: w.average_price(),
            average_rating: w.average_rating(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewItem {
    date: Option<NaiveDate>,
    date_text: String,
    reviewer: String,
    review_link: String,
    price: FieldValue,
    rating: FieldValue,
}

impl From<&Review> for ReviewItem {
    fn from(r: &Review) -> Self {
        Self {
            date: r.date,
            date_text: r.date_text.clone(),
            reviewer: r.reviewer.clone(),
            review_link: r.review_link.clone(),
            price: r.price.clone(),
            rating: r.rating.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct WhiskyDetail {
    #[serde(flatten)]
    whisky: WhiskyItem,
    reviews: Vec<ReviewItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WhiskyQuery {
    pub region: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl WhiskyQuery {
    fn range(&self) -> RangeFilter {
        RangeFilter {
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

pub(super) async fn list_whiskies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<WhiskyQuery>,
) -> Json<ApiResponse<Vec<WhiskyItem>>> {
    let filter = query.range();
    let data = state
        .map
        .filtered(query.region.as_deref(), &filter)
        .map(WhiskyItem::from)
        .collect();

    Json(ApiResponse::new(data, req_id.0))
}

pub(super) async fn get_whisky(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<WhiskyDetail>>, ApiError> {
    let Some(whisky) = state.map.find(&name) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("whisky '{name}' not found"),
        ));
    };

    let data = WhiskyDetail {
        whisky: WhiskyItem::from(whisky),
        reviews: whisky.reviews().iter().map(ReviewItem::from).collect(),
    };

    Ok(Json(ApiResponse::new(data, req_id.0)))
}
