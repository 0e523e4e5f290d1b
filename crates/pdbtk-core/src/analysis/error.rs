use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Chain '{requested}' not found in structure; available chains: {available}")]
    ChainNotFound { requested: char, available: String },

    #[error("No residues in chain '{chain_id}' within range {start}-{end}")]
    ResidueRangeEmpty {
        chain_id: char,
        start: i32,
        end: i32,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
