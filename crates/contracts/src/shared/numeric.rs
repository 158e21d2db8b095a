//! Lenient integer coercion for line-item figures.
//!
//! The purchasing API does not guarantee numeric JSON for `cantidad` and
//! `inventario_anterior`: older rows carry numeric strings, and unknown
//! inventory is stored as a placeholder such as `"?"`. Values are kept as
//! received ([`LooseInt`]) and coerced at the point of use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read an integer out of a loosely typed value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not an integer: {input:?}")]
pub struct ParseError {
    pub input: String,
}

impl ParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// A numeric field as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    /// Integer value, truncating fractions and reading the leading integer
    /// of text (`"12 uds"` is 12, `"?"` is an error).
    pub fn to_int(&self) -> Result<i64, ParseError> {
        match self {
            LooseInt::Int(v) => Ok(*v),
            LooseInt::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
            LooseInt::Float(v) => Err(ParseError::new(v.to_string())),
            LooseInt::Text(s) => parse_int_prefix(s),
        }
    }
}

impl From<i64> for LooseInt {
    fn from(value: i64) -> Self {
        LooseInt::Int(value)
    }
}

impl From<&str> for LooseInt {
    fn from(value: &str) -> Self {
        LooseInt::Text(value.to_string())
    }
}

/// Reads an optionally signed run of digits after leading whitespace.
/// Anything after the digits is ignored.
pub fn parse_int_prefix(input: &str) -> Result<i64, ParseError> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return Err(ParseError::new(input));
    }

    let magnitude: i64 = rest[..digits_len]
        .parse()
        .map_err(|_| ParseError::new(input))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Quantity of a line item; missing or unparseable values count as 0
pub fn coerce_quantity(value: Option<&LooseInt>) -> i64 {
    match value.map(LooseInt::to_int) {
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            log::trace!("quantity fallback to 0: {}", e);
            0
        }
        None => 0,
    }
}

/// Previous inventory of a line item; missing or unparseable values are
/// unknown, never 0
pub fn coerce_previous_inventory(value: Option<&LooseInt>) -> Option<i64> {
    match value.map(LooseInt::to_int) {
        Some(Ok(v)) => Some(v),
        Some(Err(e)) => {
            log::trace!("previous inventory unknown: {}", e);
            None
        }
        None => None,
    }
}

/// Value typed into an editable cell; empty or invalid input saves as 0
pub fn parse_cell_input(input: &str) -> i64 {
    parse_int_prefix(input).unwrap_or(0)
}
