//! Error types for skr.
//!
//! Almost everything in the routing core degrades softly (missing
//! directories, unreadable descriptors, absent rules documents), so hard
//! errors only surface at the outer shell: configuration and output.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkrError>;

#[derive(Debug, Error)]
pub enum SkrError {
    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("output error: {0}")]
    Output(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
