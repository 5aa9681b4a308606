pub mod error;
pub mod pipeline;
pub mod reader;
pub mod types;

pub use error::IngestError;
pub use pipeline::{aggregate, load_malt_map, load_malt_map_async};
pub use reader::{parse_reviews, read_reviews};
pub use types::{IngestStats, MaltMap, RawReviewRow, ReviewColumns};
