mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use maltmap_core::{ChartKind, RangeFilter};
use maltmap_ingest::{load_malt_map, ReviewColumns};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "maltmap-cli")]
#[command(about = "Aggregate whisky reviews into malt map chart data")]
struct Cli {
    /// Whisky catalog (YAML); defaults to MALTMAP_CATALOG_PATH
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Review export (CSV); defaults to MALTMAP_REVIEWS_PATH
    #[arg(long, global = true)]
    reviews: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List whiskies with review counts and average price and rating
    Summary {
        /// Restrict to one region
        #[arg(long)]
        region: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List regions with their chart colour and whisky count
    Regions,
    /// Emit scatter-chart datasets as JSON
    Datasets {
        /// map or price-v-rating
        #[arg(long, default_value = "map")]
        chart: ChartKind,

        /// Mark a region's dataset hidden (repeatable)
        #[arg(long = "hide")]
        hide: Vec<String>,

        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show every review attached to one whisky
    Reviews {
        /// Catalog name, e.g. "Lagavulin"
        name: String,
    },
    /// Show how many rows were dropped or partially skipped
    Stats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Args)]
struct FilterArgs {
    #[arg(long)]
    min_rating: Option<f64>,
    #[arg(long)]
    max_rating: Option<f64>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
}

impl From<FilterArgs> for RangeFilter {
    fn from(args: FilterArgs) -> Self {
        RangeFilter {
            min_rating: args.min_rating,
            max_rating: args.max_rating,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = maltmap_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("maltmap-cli: no command given; run with --help for usage");
        return Ok(());
    };

    let catalog_path = cli.catalog.unwrap_or(config.catalog_path);
    let reviews_path = cli.reviews.unwrap_or(config.reviews_path);
    let map = load_malt_map(&catalog_path, &reviews_path, &ReviewColumns::default())
        .with_context(|| {
            format!(
                "loading catalog {} and reviews {}",
                catalog_path.display(),
                reviews_path.display()
            )
        })?;
    tracing::debug!(
        whiskies = map.whiskies.len(),
        reviews = map.stats.reviews_attached,
        "malt map loaded"
    );

    let output = match command {
        Commands::Summary { region, filter } => {
            report::render_summary(&map, region.as_deref(), &filter.into())
        }
        Commands::Regions => report::render_regions(&map),
        Commands::Datasets {
            chart,
            hide,
            pretty,
            filter,
        } => report::render_datasets(&map, chart, &filter.into(), &hide, pretty)?,
        Commands::Reviews { name } => {
            let whisky = map
                .find(&name)
                .ok_or_else(|| anyhow::anyhow!("whisky '{name}' is not in the catalog"))?;
            report::render_reviews(whisky)
        }
        Commands::Stats => report::render_stats(&map)?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests;
