//! Error types for plot operations.
//!
//! Every variant is returned synchronously by the operation that failed. No
//! operation mutates the plot before its validation has passed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors raised while building or driving a plot
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(
        "a point group named '{name}' already exists; remove it or choose another name"
    )]
    DuplicateName { name: String },

    #[error(
        "style '{style}' is not supported for {dimensions}-d plots (supported: {})",
        .supported.join(", ")
    )]
    UnsupportedStyle {
        style: String,
        dimensions: usize,
        supported: Vec<&'static str>,
    },

    #[error(
        "point group is not compatible with this {dimensions}-d plot: {detail}; \
         construct a plot with the matching dimensionality instead"
    )]
    DimensionMismatch { dimensions: usize, detail: String },

    #[error("invalid data: {0}")]
    InvalidDataType(String),

    #[error("a point group named '{name}' does not exist")]
    GroupNotFound { name: String },

    #[error("invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("plot has no active point groups, nothing to save")]
    EmptyPlot,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
