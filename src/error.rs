//! Error types for chart layout and rendering.

use thiserror::Error;

/// Errors raised while building axes, plots, legends or the composed graph.
///
/// Every constructor either returns a fully rendered component or one of these;
/// there is no partially built state to recover.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The caller supplied data or settings the layout cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Font lookup or text measurement failed.
    #[error("font error: {0}")]
    Font(String),

    /// The drawing backend refused an operation.
    #[error("drawing error: {0}")]
    Drawing(String),

    /// A surface of the requested size cannot be allocated.
    #[error("cannot allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },

    /// Image encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A chart document could not be parsed.
    #[error("chart document error: {0}")]
    Document(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GraphError::InvalidInput(msg.into())
    }
}

/// Result type for graphing operations.
pub type Result<T> = std::result::Result<T, GraphError>;
