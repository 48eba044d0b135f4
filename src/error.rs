use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No PDF data received on stdin")]
    EmptyInput,

    #[error("Text extraction failed for {source_name}: {message}")]
    Extraction { source_name: String, message: String },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl ParseError {
    pub fn extraction<E: std::fmt::Display>(source_name: impl Into<String>, e: E) -> Self {
        Self::Extraction {
            source_name: source_name.into(),
            message: e.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
