// Per-group visual attributes (gnuplot `with <style> ...` modifiers)

use crate::error::PlotError;
use crate::parser::parse_style_spec;
use nom::Finish;
use std::fmt;
use std::str::FromStr;

/// Line color: a gnuplot colorspec keyword plus its value, e.g. `rgb "grey"`
#[derive(Debug, Clone, PartialEq)]
pub struct LineColor {
    pub colorspec: String,
    pub value: String,
}

/// Visual attributes attached to a point group.
///
/// Each attribute is optional and holds at most one value. Serialization
/// always follows the order `pt ps lc lt lw dt`, whatever order the
/// attributes were set in. Unset attributes are omitted.
///
/// Sizes and widths use the shortest exact float form (`ps 1.5`, `lw 2`)
/// rather than fixed six-digit precision; gnuplot reads both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSpec {
    pub point_type: Option<i32>,
    pub point_size: Option<f64>,
    pub line_color: Option<LineColor>,
    pub line_type: Option<i32>,
    pub line_width: Option<f64>,
    pub dash_type: Option<i32>,
}

/// A single attribute setting, composable into a [`StyleSpec`]
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOption {
    PointType(i32),
    PointSize(f64),
    LineColor { colorspec: String, value: String },
    LineType(i32),
    LineWidth(f64),
    DashType(i32),
}

pub fn point_type(pt: i32) -> StyleOption {
    StyleOption::PointType(pt)
}

pub fn point_size(ps: f64) -> StyleOption {
    StyleOption::PointSize(ps)
}

pub fn line_color(colorspec: impl Into<String>, value: impl Into<String>) -> StyleOption {
    StyleOption::LineColor {
        colorspec: colorspec.into(),
        value: value.into(),
    }
}

pub fn line_type(lt: i32) -> StyleOption {
    StyleOption::LineType(lt)
}

pub fn line_width(lw: f64) -> StyleOption {
    StyleOption::LineWidth(lw)
}

pub fn dash_type(dt: i32) -> StyleOption {
    StyleOption::DashType(dt)
}

impl StyleSpec {
    /// Build a spec from a list of options. A later option for the same
    /// attribute replaces an earlier one.
    pub fn new(options: impl IntoIterator<Item = StyleOption>) -> Self {
        options.into_iter().fold(Self::default(), Self::with)
    }

    pub fn with(mut self, option: StyleOption) -> Self {
        match option {
            StyleOption::PointType(pt) => self.point_type = Some(pt),
            StyleOption::PointSize(ps) => self.point_size = Some(ps),
            StyleOption::LineColor { colorspec, value } => {
                self.line_color = Some(LineColor { colorspec, value })
            }
            StyleOption::LineType(lt) => self.line_type = Some(lt),
            StyleOption::LineWidth(lw) => self.line_width = Some(lw),
            StyleOption::DashType(dt) => self.dash_type = Some(dt),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(pt) = self.point_type {
            parts.push(format!("pt {}", pt));
        }
        if let Some(ps) = self.point_size {
            parts.push(format!("ps {}", ps));
        }
        if let Some(lc) = &self.line_color {
            parts.push(format!("lc {} \"{}\"", lc.colorspec, lc.value));
        }
        if let Some(lt) = self.line_type {
            parts.push(format!("lt {}", lt));
        }
        if let Some(lw) = self.line_width {
            parts.push(format!("lw {}", lw));
        }
        if let Some(dt) = self.dash_type {
            parts.push(format!("dt {}", dt));
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Parses the attribute grammar produced by `Display`, plus the long gnuplot
/// attribute names
impl FromStr for StyleSpec {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_style_spec(s)
            .finish()
            .map(|(_, spec)| spec)
            .map_err(|e| {
                PlotError::InvalidConfigValue(format!(
                    "invalid style spec '{}' near '{}'",
                    s, e.input
                ))
            })
    }
}

/// Serialize a list of specs in declaration order, skipping empty ones
pub fn join_specs(specs: &[StyleSpec]) -> String {
    specs
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_attributes() {
        let spec = StyleSpec::new([
            point_type(6),
            point_size(1.5),
            line_color("rgb", "grey"),
            dash_type(4),
            line_width(2.0),
            line_type(5),
        ]);
        assert_eq!(spec.point_type, Some(6));
        assert_eq!(spec.dash_type, Some(4));
        assert_eq!(spec.line_type, Some(5));
        assert_eq!(spec.point_size, Some(1.5));
        assert_eq!(spec.line_width, Some(2.0));
        assert_eq!(
            spec.to_string(),
            r#"pt 6 ps 1.5 lc rgb "grey" lt 5 lw 2 dt 4"#
        );
    }

    #[test]
    fn test_fixed_order_regardless_of_construction() {
        let a = StyleSpec::new([line_color("rgb", "red"), point_size(0.7)]);
        let b = StyleSpec::new([point_size(0.7), line_color("rgb", "red")]);
        assert_eq!(a.to_string(), r#"ps 0.7 lc rgb "red""#);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_empty_spec_serializes_to_nothing() {
        let spec = StyleSpec::default();
        assert!(spec.is_empty());
        assert_eq!(spec.to_string(), "");
    }

    #[test]
    fn test_later_option_wins() {
        let spec = StyleSpec::new([point_type(1), point_type(7)]);
        assert_eq!(spec.to_string(), "pt 7");
    }

    #[test]
    fn test_from_str() {
        let spec: StyleSpec = r#"ps 1.5 lc rgb "red""#.parse().unwrap();
        assert_eq!(spec, StyleSpec::new([point_size(1.5), line_color("rgb", "red")]));

        let err = "pt".parse::<StyleSpec>().unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfigValue(_)));
    }

    #[test]
    fn test_join_specs_skips_empty() {
        let specs = vec![
            StyleSpec::new([point_type(7)]),
            StyleSpec::default(),
            StyleSpec::new([line_width(3.0)]),
        ];
        assert_eq!(join_specs(&specs), "pt 7 lw 3");
        assert_eq!(join_specs(&[]), "");
    }
}
