use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read review file {path}: {source}")]
    ReviewsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed review table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Config(#[from] maltmap_core::ConfigError),
}
