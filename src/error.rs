use thiserror::Error;

#[derive(Error, Debug)]
pub enum StmtError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for StmtError {
    fn from(e: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        StmtError::Other(format!("Failed to flush CSV output: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, StmtError>;
