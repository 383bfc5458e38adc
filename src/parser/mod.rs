// Parsers for textual style specifications

pub mod lexer;
pub mod style;

pub use style::{parse_style_option, parse_style_spec};
