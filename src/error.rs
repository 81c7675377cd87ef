//! Error types for the segmentation library.
//!
//! Segmentation itself is infallible for well-formed geometry; errors are
//! reserved for caller contract violations and for decoding page geometry.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout segmentation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Clustering was requested with fewer than one cluster
    #[error("Invalid cluster count: {0} (must be at least 1)")]
    InvalidClusterCount(usize),

    /// Clustering input has fewer points than requested clusters
    #[error("Insufficient data for clustering: {points} points for {clusters} clusters")]
    InsufficientData {
        /// Number of data points supplied
        points: usize,
        /// Number of clusters requested
        clusters: usize,
    },

    /// Configuration value outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Page geometry could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
