use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Precondition(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("{entity} validation failed: {message}")]
    Validation { entity: &'static str, message: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
