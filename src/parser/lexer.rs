// Lexical helpers shared by the style parser

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{map, map_res, opt, recognize},
    multi::many0_count,
    number::complete::double,
    sequence::{delimited, pair},
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Identifier: a letter or underscore followed by letters, digits or underscores
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0_count(alt((alphanumeric1, tag("_")))),
        )),
        String::from,
    )(input)
}

/// String in double or single quotes, without escape handling
pub fn string_literal(input: &str) -> IResult<&str, String> {
    alt((
        delimited(char('"'), map(opt(is_not("\"")), unquote), char('"')),
        delimited(char('\''), map(opt(is_not("'")), unquote), char('\'')),
    ))(input)
}

fn unquote(body: Option<&str>) -> String {
    body.unwrap_or_default().to_string()
}

/// Floating point number, e.g. `1`, `-0.5`, `1e3`
pub fn number_literal(input: &str) -> IResult<&str, f64> {
    double(input)
}

/// Signed integer
pub fn integer_literal(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| s.parse::<i32>())(input)
}
