use axum::body::{to_bytes, Body};
use axum::http::Request;
use maltmap_core::{Catalog, CatalogEntry};
use maltmap_ingest::{aggregate, parse_reviews, ReviewColumns};
use tower::ServiceExt;

use super::*;

fn test_state() -> AppState {
    let catalog = Catalog::new(vec![
        CatalogEntry::new("Glenlivet", "img/glenlivet.png", "Speyside", 55.0, 52.0),
        CatalogEntry::new("Lagavulin", "img/lagavulin.png", "Islay", 15.0, 20.0),
        CatalogEntry::new("Ardbeg", "img/ardbeg.png", "Islay", 17.0, 21.0),
        CatalogEntry::new("Oban", "img/oban.png", "Highland", 30.0, 42.0),
    ])
    .unwrap();
    let rows = parse_reviews(
        "Whisky Name,Price,Rating,Reviewer Username,Date,Link To reddit Review\n\
         Glenlivet 12,35,80,TOModera,8/14/13,http://r/1\n\
         Lagavulin 16,$75,92,Ethanolic,10/4/13,http://r/2\n\
         Lagavulin 16,£48,90,xile_,10/9/13,http://r/3\n\
         Ardbeg 10,48,N/A,cake_or_death,10/22/13,http://r/4\n\
         Johnnie Walker Black,30,78,TOModera,11/16/13,http://r/5\n",
        &ReviewColumns::default(),
    )
    .unwrap();
    AppState {
        map: Arc::new(aggregate(&catalog, rows).unwrap()),
    }
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = build_app(test_state());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

#[test]
fn api_error_maps_codes_to_status() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = ApiError::new("req-1", "not_found", "missing").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = ApiError::new("req-1", "boom", "unexpected").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn split_csv_param_drops_blanks() {
    assert_eq!(
        split_csv_param(Some("Islay, ,Other,")),
        vec!["Islay".to_string(), "Other".to_string()]
    );
    assert!(split_csv_param(None).is_empty());
}

#[tokio::test]
async fn health_reports_counts() {
    let (status, json) = get_json("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["whiskies"], 4);
    assert_eq!(json["data"]["reviews"], 4);
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let app = build_app(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"abc-123"[..])
    );
}

#[tokio::test]
async fn list_whiskies_returns_catalog_order_with_averages() {
    let (status, json) = get_json("/api/v1/whiskies").await;
    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 4);
    assert_eq!(data[1]["name"], "Lagavulin");
    assert_eq!(data[1]["review_count"], 2);
    assert_eq!(data[1]["average_price"], 75.0);
    assert_eq!(data[1]["average_rating"], 91.0);
    assert_eq!(data[1]["price_v_rating_position"]["x"], 75.0);
    assert_eq!(data[1]["position"]["y"], 20.0);
}

#[tokio::test]
async fn list_whiskies_filters_by_region_and_range() {
    let (_, json) = get_json("/api/v1/whiskies?region=Islay&min_price=50").await;
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Lagavulin");
}

#[tokio::test]
async fn get_whisky_includes_reviews() {
    let (status, json) = get_json("/api/v1/whiskies/Lagavulin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Lagavulin");
    let reviews = json["data"]["reviews"].as_array().expect("reviews");
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["date"], "2013-10-04");
    assert_eq!(reviews[1]["price"], "£48");
    assert_eq!(reviews[1]["rating"], 90.0);
}

#[tokio::test]
async fn get_whisky_unknown_is_not_found() {
    let (status, json) = get_json("/api/v1/whiskies/Talisker").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn regions_list_colors_and_counts() {
    let (_, json) = get_json("/api/v1/regions").await;
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 3);
    assert_eq!(data[1]["name"], "Islay");
    assert_eq!(data[1]["color"], "#f7a35c");
    assert_eq!(data[1]["whisky_count"], 2);
}

#[tokio::test]
async fn datasets_default_to_map_chart() {
    let (status, json) = get_json("/api/v1/datasets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["chart"], "map");
    assert_eq!(json["data"]["max_average_price"], 75.0);
    let sets = json["data"]["datasets"].as_array().expect("datasets");
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[1]["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn price_v_rating_datasets_skip_unrated_and_flag_hidden() {
    let (_, json) = get_json("/api/v1/datasets?chart=price_v_rating&hidden=Islay").await;
    assert_eq!(json["data"]["chart"], "price_v_rating");
    let sets = json["data"]["datasets"].as_array().expect("datasets");
    let islay = &sets[1];
    assert_eq!(islay["hidden"], true);
    // Ardbeg has a price but no usable rating, so it is not plotted
    let names: Vec<&str> = islay["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Lagavulin"]);
    assert_eq!(sets[2]["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn datasets_unknown_chart_is_bad_request() {
    let (status, json) = get_json("/api/v1/datasets?chart=pie").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn stats_expose_skip_counters() {
    let (_, json) = get_json("/api/v1/stats").await;
    assert_eq!(json["data"]["rows_read"], 5);
    assert_eq!(json["data"]["rows_unmatched"], 1);
    assert_eq!(json["data"]["ratings_skipped"], 1);
    assert_eq!(json["data"]["prices_skipped"], 1);
}
