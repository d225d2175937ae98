use std::path::PathBuf;
use thiserror::Error;

/// Define a convenient Result type
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {}: {source}", .path.display())]
    Database {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("include-what-you-use not found in PATH")]
    AnalyzerNotFound,

    #[error("No compile_commands.json found in {}", .0.display())]
    NoDatabase(PathBuf),

    #[error("{0}")]
    Failed(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Failed(format!("{:#}", err))
    }
}
