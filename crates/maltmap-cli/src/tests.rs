use maltmap_core::{Catalog, CatalogEntry};
use maltmap_ingest::{aggregate, parse_reviews, MaltMap};

use super::*;

fn sample_map() -> MaltMap {
    let catalog = Catalog::new(vec![
        CatalogEntry::new("Glenlivet", "", "Speyside", 55.0, 52.0),
        CatalogEntry::new("Lagavulin", "", "Islay", 15.0, 20.0),
        CatalogEntry::new("Oban", "", "Highland", 30.0, 42.0),
    ])
    .unwrap();
    let rows = parse_reviews(
        "Whisky Name,Price,Rating,Reviewer Username,Date,Link To reddit Review\n\
         Glenlivet 12,35,80,TOModera,8/14/13,http://r/1\n\
         Lagavulin 16,$75,92,Ethanolic,10/4/13,http://r/2\n\
         Lagavulin 16,£48,90,xile_,10/9/13,http://r/3\n",
        &ReviewColumns::default(),
    )
    .unwrap();
    aggregate(&catalog, rows).unwrap()
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["maltmap-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_summary_with_region_and_filters() {
    let cli = Cli::try_parse_from([
        "maltmap-cli",
        "summary",
        "--region",
        "Islay",
        "--min-rating",
        "85",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Summary { region, filter }) => {
            assert_eq!(region.as_deref(), Some("Islay"));
            assert_eq!(filter.min_rating, Some(85.0));
            assert!(filter.max_price.is_none());
        }
        other => panic!("expected summary, got {other:?}"),
    }
}

#[test]
fn parses_datasets_with_chart_and_hidden_regions() {
    let cli = Cli::try_parse_from([
        "maltmap-cli",
        "datasets",
        "--chart",
        "price-v-rating",
        "--hide",
        "Islay",
        "--hide",
        "Other",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Datasets {
            chart: ChartKind::PriceVRating,
            ref hide,
            pretty: false,
            ..
        }) if hide == &vec!["Islay".to_string(), "Other".to_string()]
    ));
}

#[test]
fn datasets_chart_defaults_to_map() {
    let cli = Cli::try_parse_from(["maltmap-cli", "datasets"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Datasets {
            chart: ChartKind::Map,
            ..
        })
    ));
}

#[test]
fn rejects_unknown_chart() {
    assert!(Cli::try_parse_from(["maltmap-cli", "datasets", "--chart", "pie"]).is_err());
}

#[test]
fn global_paths_are_accepted_after_subcommand() {
    let cli = Cli::try_parse_from([
        "maltmap-cli",
        "stats",
        "--catalog",
        "/tmp/whiskies.yaml",
        "--reviews",
        "/tmp/reviews.csv",
    ])
    .unwrap();
    assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/whiskies.yaml")));
    assert_eq!(cli.reviews, Some(PathBuf::from("/tmp/reviews.csv")));
}

#[test]
fn parses_reviews_name() {
    let cli = Cli::try_parse_from(["maltmap-cli", "reviews", "Lagavulin"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews { ref name }) if name == "Lagavulin"
    ));
}

#[test]
fn filter_args_convert_to_range_filter() {
    let args = FilterArgs {
        min_rating: Some(80.0),
        max_rating: None,
        min_price: None,
        max_price: Some(60.0),
    };
    let filter: RangeFilter = args.into();
    assert_eq!(filter.min_rating, Some(80.0));
    assert_eq!(filter.max_price, Some(60.0));
}

#[test]
fn summary_lists_filtered_whiskies() {
    let map = sample_map();
    let out = report::render_summary(&map, None, &RangeFilter::default());
    assert!(out.starts_with("WHISKY"));
    assert!(out.contains("Lagavulin"));
    assert!(out.contains("Oban"));

    let islay = report::render_summary(&map, Some("Islay"), &RangeFilter::default());
    assert!(islay.contains("Lagavulin"));
    assert!(!islay.contains("Glenlivet"));

    let none = report::render_summary(&map, Some("Lowland"), &RangeFilter::default());
    assert_eq!(none, "no whiskies match in region 'Lowland'\n");
}

#[test]
fn regions_report_counts_whiskies() {
    let out = report::render_regions(&sample_map());
    assert!(out.contains("Islay"));
    assert!(out.contains("#f7a35c"));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn datasets_render_as_json_array() {
    let map = sample_map();
    let json = report::render_datasets(
        &map,
        ChartKind::PriceVRating,
        &RangeFilter::default(),
        &["Islay".to_string()],
        false,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let sets = value.as_array().expect("array");
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[1]["label"], "Islay");
    assert_eq!(sets[1]["hidden"], true);
    // The "£48" review is rejected, so the price average is not recomputed.
    assert_eq!(sets[1]["data"][0]["x"], 75.0);
    assert_eq!(sets[1]["data"][0]["y"], 91.0);
    // Oban has no reviews, so it is left off the price chart
    assert!(sets[2]["data"].as_array().unwrap().is_empty());
}

#[test]
fn reviews_report_lists_each_review() {
    let map = sample_map();
    let out = report::render_reviews(map.find("Lagavulin").unwrap());
    assert!(out.starts_with("Lagavulin (Islay)"));
    assert!(out.contains("2013-10-04"));
    assert!(out.contains("£48"));
    assert!(out.contains("xile_"));

    let empty = report::render_reviews(map.find("Oban").unwrap());
    assert!(empty.contains("no reviews"));
}

#[test]
fn stats_report_is_json() {
    let out = report::render_stats(&sample_map()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["reviews_attached"], 3);
    assert_eq!(value["prices_skipped"], 1);
}
