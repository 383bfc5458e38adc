// Parser for gnuplot style attribute strings, e.g. `pt 6 ps 1.5 lc rgb "red"`

use super::lexer::{identifier, integer_literal, number_literal, string_literal, ws};
use crate::style::{StyleOption, StyleSpec};
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{all_consuming, map},
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};

/// Parse one attribute; long gnuplot names (`pointtype`, `linecolor`, ...)
/// are accepted next to the short ones
pub fn parse_style_option(input: &str) -> IResult<&str, StyleOption> {
    alt((
        map(
            preceded(ws(alt((tag("pointtype"), tag("pt")))), ws(integer_literal)),
            StyleOption::PointType,
        ),
        map(
            preceded(ws(alt((tag("pointsize"), tag("ps")))), ws(number_literal)),
            StyleOption::PointSize,
        ),
        map(
            preceded(
                ws(alt((tag("linecolor"), tag("lc")))),
                pair(ws(identifier), ws(string_literal)),
            ),
            |(colorspec, value)| StyleOption::LineColor { colorspec, value },
        ),
        map(
            preceded(ws(alt((tag("linetype"), tag("lt")))), ws(integer_literal)),
            StyleOption::LineType,
        ),
        map(
            preceded(ws(alt((tag("linewidth"), tag("lw")))), ws(number_literal)),
            StyleOption::LineWidth,
        ),
        map(
            preceded(ws(alt((tag("dashtype"), tag("dt")))), ws(integer_literal)),
            StyleOption::DashType,
        ),
    ))(input)
}

/// Parse a complete attribute string. Repeated attributes: the last one wins.
pub fn parse_style_spec(input: &str) -> IResult<&str, StyleSpec> {
    map(all_consuming(ws(many0(parse_style_option))), StyleSpec::new)(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{line_color, point_size, point_type, LineColor};

    #[test]
    fn test_parse_short_names() {
        let (_, spec) = parse_style_spec(r#"pt 6 ps 1.5 lc rgb "grey" lt 5 lw 2 dt 4"#).unwrap();
        assert_eq!(spec.point_type, Some(6));
        assert_eq!(spec.point_size, Some(1.5));
        assert_eq!(
            spec.line_color,
            Some(LineColor {
                colorspec: "rgb".to_string(),
                value: "grey".to_string()
            })
        );
        assert_eq!(spec.line_type, Some(5));
        assert_eq!(spec.line_width, Some(2.0));
        assert_eq!(spec.dash_type, Some(4));
    }

    #[test]
    fn test_parse_long_names_any_order() {
        let (_, spec) =
            parse_style_spec(r#"linecolor rgb "red" pointsize 0.7 pointtype 7"#).unwrap();
        assert_eq!(
            spec,
            StyleSpec::new([point_type(7), point_size(0.7), line_color("rgb", "red")])
        );
    }

    #[test]
    fn test_parse_serialized_form_back() {
        let original = StyleSpec::new([point_size(2.5), line_color("rgb", "#00ff00")]);
        let (_, parsed) = parse_style_spec(&original.to_string()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_empty() {
        let (_, spec) = parse_style_spec("   ").unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_attribute() {
        assert!(parse_style_spec("pt 6 fill solid").is_err());
        assert!(parse_style_spec("pt six").is_err());
    }
}
