// Numeric payloads and their normalization to f64

use crate::error::{PlotError, Result};
use std::io::{self, Write};

/// Largest integer magnitude an f64 holds exactly (2^53)
const MAX_EXACT_INT: i64 = 1 << 53;

/// One column of samples in its original element type
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::I8(v) => v.len(),
            Column::I16(v) => v.len(),
            Column::I32(v) => v.len(),
            Column::I64(v) => v.len(),
            Column::F32(v) => v.len(),
            Column::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the element type, used in diagnostics
    pub fn element_type(&self) -> &'static str {
        match self {
            Column::I8(_) => "i8",
            Column::I16(_) => "i16",
            Column::I32(_) => "i32",
            Column::I64(_) => "i64",
            Column::F32(_) => "f32",
            Column::F64(_) => "f64",
        }
    }

    /// Convert every element to f64.
    ///
    /// Floats and integers up to 32 bits convert exactly. `i64` values beyond
    /// ±2^53 would be rounded, so they are rejected.
    pub fn to_f64(&self) -> Result<Vec<f64>> {
        let values: Vec<f64> = match self {
            Column::I8(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Column::I16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Column::I32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Column::I64(v) => {
                if let Some(bad) = v.iter().find(|x| x.unsigned_abs() > MAX_EXACT_INT as u64) {
                    return Err(PlotError::InvalidDataType(format!(
                        "i64 value {} cannot be represented exactly as f64",
                        bad
                    )));
                }
                v.iter().map(|&x| x as f64).collect()
            }
            Column::F32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Column::F64(v) => v.clone(),
        };
        Ok(values)
    }
}

/// Raw data handed to a point group: one flat series (1-d plots) or a set of
/// equal-role columns (2-d and 3-d plots)
#[derive(Debug, Clone, PartialEq)]
pub enum PointData {
    Flat(Column),
    Columns(Vec<Column>),
}

impl PointData {
    /// Number of data columns; a flat series counts as one
    pub fn column_count(&self) -> usize {
        match self {
            PointData::Flat(_) => 1,
            PointData::Columns(cols) => cols.len(),
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, PointData::Flat(_))
    }

    /// Normalize every element to f64. A payload that would produce no rows
    /// is rejected.
    pub fn normalize(&self) -> Result<NormalizedData> {
        let normalized = self.convert()?;
        if normalized.row_count() == 0 {
            return Err(PlotError::InvalidDataType(
                "point data contains no samples".to_string(),
            ));
        }
        Ok(normalized)
    }

    fn convert(&self) -> Result<NormalizedData> {
        match self {
            PointData::Flat(col) => Ok(NormalizedData::Flat(col.to_f64()?)),
            PointData::Columns(cols) => {
                let first = cols.first().ok_or_else(|| {
                    PlotError::InvalidDataType("column data contains no columns".to_string())
                })?;
                if let Some(other) = cols
                    .iter()
                    .find(|c| c.element_type() != first.element_type())
                {
                    return Err(PlotError::InvalidDataType(format!(
                        "columns must share one element type, found {} and {}",
                        first.element_type(),
                        other.element_type()
                    )));
                }
                let columns = cols.iter().map(Column::to_f64).collect::<Result<Vec<_>>>()?;
                Ok(NormalizedData::Columns(columns))
            }
        }
    }
}

/// Data after conversion to f64
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedData {
    Flat(Vec<f64>),
    Columns(Vec<Vec<f64>>),
}

impl NormalizedData {
    /// Number of rows written to a data file. Unequal columns are truncated
    /// to the shortest one.
    pub fn row_count(&self) -> usize {
        match self {
            NormalizedData::Flat(v) => v.len(),
            NormalizedData::Columns(cols) => cols.iter().map(Vec::len).min().unwrap_or(0),
        }
    }

    /// Write one line per sample index, columns separated by a space
    pub fn write_rows<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            NormalizedData::Flat(v) => {
                for x in v {
                    writeln!(out, "{}", x)?;
                }
            }
            NormalizedData::Columns(cols) => {
                for i in 0..self.row_count() {
                    let row: Vec<String> = cols.iter().map(|c| c[i].to_string()).collect();
                    writeln!(out, "{}", row.join(" "))?;
                }
            }
        }
        Ok(())
    }
}

macro_rules! impl_column_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$t>> for Column {
                fn from(v: Vec<$t>) -> Self {
                    Column::$variant(v)
                }
            }

            impl From<&[$t]> for Column {
                fn from(v: &[$t]) -> Self {
                    Column::$variant(v.to_vec())
                }
            }

            impl From<Vec<$t>> for PointData {
                fn from(v: Vec<$t>) -> Self {
                    PointData::Flat(Column::$variant(v))
                }
            }

            impl From<&[$t]> for PointData {
                fn from(v: &[$t]) -> Self {
                    PointData::Flat(Column::$variant(v.to_vec()))
                }
            }

            impl From<Vec<Vec<$t>>> for PointData {
                fn from(v: Vec<Vec<$t>>) -> Self {
                    PointData::Columns(v.into_iter().map(Column::$variant).collect())
                }
            }

            impl<const N: usize> From<[Vec<$t>; N]> for PointData {
                fn from(v: [Vec<$t>; N]) -> Self {
                    PointData::Columns(v.into_iter().map(Column::$variant).collect())
                }
            }
        )*
    };
}

impl_column_from!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

impl From<Vec<Column>> for PointData {
    fn from(cols: Vec<Column>) -> Self {
        PointData::Columns(cols)
    }
}
