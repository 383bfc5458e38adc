// Library exports for gplot

pub mod artifact;
pub mod compat;
pub mod csv_reader;
pub mod data;
pub mod emitter;
pub mod error;
pub mod group;
pub mod parser;
pub mod plot;
pub mod session;
pub mod style;

pub use artifact::{ArtifactStore, MemoryStore, TempFileStore};
pub use data::{Column, NormalizedData, PointData};
pub use emitter::CommandEmitter;
pub use error::{PlotError, Result};
pub use group::PointGroup;
pub use plot::Plot;
pub use session::{GnuplotProcess, ScriptRecorder, Session};
pub use style::{StyleOption, StyleSpec};

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Terminal used when saving a plot to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "pdf")]
    Pdf,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "png"),
            OutputFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "png" => Ok(OutputFormat::Png),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(PlotError::InvalidConfigValue(format!(
                "invalid format '{}', expected one of: png, pdf",
                other
            ))),
        }
    }
}

/// Logarithmic scaling for one or more axes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogScale {
    pub axis: String,
    #[serde(default = "default_log_base")]
    pub base: i32,
}

/// Plot-level settings, loadable from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct PlotOptions {
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    #[serde(default)]
    pub persist: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub title: Option<String>,
    /// Axis labels in x, y, z order
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub xrange: Option<(i64, i64)>,
    #[serde(default)]
    pub yrange: Option<(i64, i64)>,
    #[serde(default)]
    pub zrange: Option<(i64, i64)>,
    #[serde(default)]
    pub logscale: Option<LogScale>,
    /// Grid style; an empty string selects the default grid
    #[serde(default)]
    pub grid: Option<String>,
}

fn default_dimensions() -> usize { 2 }
fn default_log_base() -> i32 { 10 }

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            dimensions: 2,
            persist: false,
            debug: false,
            format: OutputFormat::Png,
            title: None,
            labels: Vec::new(),
            xrange: None,
            yrange: None,
            zrange: None,
            logscale: None,
            grid: None,
        }
    }
}

impl PlotOptions {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
