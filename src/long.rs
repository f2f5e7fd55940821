//! Strict conversion of decimal strings into `i64`s.
//!
//! Only the plain canonical spelling of a number is accepted: an optional `-`
//! followed by either a lone `0` or a non-zero digit and at most 18 more digits.
//! Signs like `+`, whitespace, leading zeros and anything else are rejected, as
//! are numbers outside the `i64` range. `-0` is accepted and gives `0`.
//!
//! # Examples
//!
//! ```
//! use trinary::long::{self, ParseError};
//!
//! assert_eq!(long::parse(Some("-42")), Some(-42));
//! assert_eq!(long::parse(Some("042")), None);
//! assert_eq!(long::parse(None), None);
//!
//! assert_eq!(long::try_parse("9223372036854775808"), Err(ParseError::Overflow));
//! ```

use thiserror::Error;

/// The most digits an `i64` is ever written with.
const MAX_DIGITS: usize = 19;

/// Why a string was not converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// There was nothing to convert.
    #[error("cannot parse an integer from an empty string")]
    Empty,
    /// The string is not an optional `-` followed by a canonical run of digits.
    #[error("not a plain decimal integer")]
    Format,
    /// The string is well formed but the number does not fit in an `i64`.
    #[error("integer does not fit in 64 bits")]
    Overflow,
}

/// Converts `input` into an `i64`, giving `None` for a missing input or one
/// [`try_parse`] rejects.
pub fn parse(input: Option<&str>) -> Option<i64> {
    input.and_then(|input| try_parse(input).ok())
}

/// Converts `input` into an `i64`, saying why when it can't.
///
/// # Examples
///
/// ```
/// use trinary::long::{try_parse, ParseError};
///
/// assert_eq!(try_parse("-9223372036854775808"), Ok(i64::MIN));
/// assert_eq!(try_parse("-0"), Ok(0));
/// assert_eq!(try_parse("1 1"), Err(ParseError::Format));
/// assert_eq!(try_parse(""), Err(ParseError::Empty));
/// ```
pub fn try_parse(input: &str) -> Result<i64, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let (negative, digits) = match input.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, input),
    };

    let digits = digits.as_bytes();
    let well_formed = match digits {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.len() < MAX_DIGITS && rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if !well_formed {
        return Err(ParseError::Format);
    }

    // Accumulated below zero since `i64::MIN` has no positive counterpart.
    let negated = digits
        .iter()
        .try_fold(0i64, |acc, digit| {
            acc.checked_mul(10)?.checked_sub(i64::from(digit - b'0'))
        })
        .ok_or(ParseError::Overflow)?;

    if negative {
        Ok(negated)
    } else {
        negated.checked_neg().ok_or(ParseError::Overflow)
    }
}
