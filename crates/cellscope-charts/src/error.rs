//! Error types for cellscope-charts.
//!
//! Rendering and interaction never fail; these errors only come from input
//! boundaries such as config files, record payloads and untyped bin widths.

use thiserror::Error;

/// Errors raised while loading dashboard inputs.
#[derive(Debug, Error)]
pub enum ChartError {
    /// IO error while reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bin width outside the supported set.
    #[error("unsupported temperature bin width: {0} (expected 5, 10, 15 or 20)")]
    UnsupportedBinWidth(u32),

    /// Dashboard config failed to parse.
    #[error("invalid dashboard config: {0}")]
    Config(#[from] toml::de::Error),

    /// Cycle record payload failed to decode.
    #[error("invalid cycle record: {0}")]
    Record(#[from] serde_json::Error),

    /// Brush selection with zero or negative width.
    #[error("brush selection is empty")]
    EmptyBrush,
}

/// Result alias for fallible dashboard inputs.
pub type Result<T> = std::result::Result<T, ChartError>;
