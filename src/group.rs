// Point groups: validated, normalized, styled data ready for emission

use crate::compat;
use crate::data::{NormalizedData, PointData};
use crate::error::{PlotError, Result};
use crate::style::StyleSpec;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A named set of samples drawn with one style.
///
/// Constructed only through validation, so a `PointGroup` always satisfies
/// the compatibility table for its dimensionality and style.
#[derive(Debug, Clone)]
pub struct PointGroup {
    name: String,
    dimensions: usize,
    style: String,
    data: PointData,
    normalized: NormalizedData,
    specs: Vec<StyleSpec>,
    artifact: Option<PathBuf>,
}

impl PointGroup {
    /// Validate `data` against `style` at `dimensions` and normalize it.
    ///
    /// Checks run in order: style support, data shape, element conversion.
    pub fn new(
        name: impl Into<String>,
        style: &str,
        data: PointData,
        specs: Vec<StyleSpec>,
        dimensions: usize,
    ) -> Result<Self> {
        let min_cols = check_style(style, dimensions)?;
        check_shape(&data, style, dimensions, min_cols)?;
        let normalized = data.normalize()?;

        Ok(Self {
            name: name.into(),
            dimensions,
            style: style.to_string(),
            data,
            normalized,
            specs,
            artifact: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Data exactly as it was supplied
    pub fn data(&self) -> &PointData {
        &self.data
    }

    pub fn normalized(&self) -> &NormalizedData {
        &self.normalized
    }

    pub fn specs(&self) -> &[StyleSpec] {
        &self.specs
    }

    /// Path of the data file written for this group, once emitted
    pub fn artifact(&self) -> Option<&Path> {
        self.artifact.as_deref()
    }

    pub(crate) fn set_artifact(&mut self, path: PathBuf) {
        self.artifact = Some(path);
    }

    /// Check that `style` could replace the current style without touching
    /// the data
    pub(crate) fn validate_restyle(&self, style: &str) -> Result<()> {
        let min_cols = check_style(style, self.dimensions)?;
        check_shape(&self.data, style, self.dimensions, min_cols)
    }

    pub(crate) fn set_style(&mut self, style: &str) {
        self.style = style.to_string();
    }
}

/// Look up `style` for `dimensions`, returning its minimum column count
pub(crate) fn check_style(style: &str, dimensions: usize) -> Result<usize> {
    compat::is_supported(style, dimensions).ok_or_else(|| {
        let supported = compat::supported_styles(dimensions);
        warn!(style, dimensions, ?supported, "style not supported");
        PlotError::UnsupportedStyle {
            style: style.to_string(),
            dimensions,
            supported,
        }
    })
}

/// 1-d plots take one flat series; 2-d and 3-d plots take at least as many
/// columns as the style requires
fn check_shape(data: &PointData, style: &str, dimensions: usize, min_cols: usize) -> Result<()> {
    let mismatch = |detail: String| PlotError::DimensionMismatch { dimensions, detail };

    match (dimensions, data) {
        (1, PointData::Flat(_)) => Ok(()),
        (1, PointData::Columns(cols)) => Err(mismatch(format!(
            "expected a flat series, got {} column(s)",
            cols.len()
        ))),
        (_, PointData::Flat(_)) => Err(mismatch(format!(
            "expected at least {} columns for style '{}', got a flat series",
            min_cols, style
        ))),
        (_, PointData::Columns(cols)) if cols.len() < min_cols => Err(mismatch(format!(
            "style '{}' needs at least {} columns, got {}",
            style,
            min_cols,
            cols.len()
        ))),
        _ => Ok(()),
    }
}
