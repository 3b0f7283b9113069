mod error;
mod grammar;

pub use error::ParseError;

use crate::Expr;

/// Parse a condition expression such as `type != "percentage" AND enabled`.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid condition.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;
    grammar::parse_condition
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
