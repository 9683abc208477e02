//! ISBN normalization.
//!
//! User input arrives hyphenated, spaced, as ISBN-10 or ISBN-13. The metadata
//! services only take 13-digit identifiers, so everything is canonicalized to
//! that form before lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input did not reduce to exactly 10 or 13 decimal digits.
///
/// Letters are not stripped during cleaning, so an ISBN-10 ending in the 'X'
/// check character also fails here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected 10 or 13 digits after stripping hyphens and spaces, got {len} characters")]
pub struct InvalidLength {
    pub len: usize,
}

/// A canonical 13-digit ISBN. Only constructed through [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn13(String);

impl Isbn13 {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn13 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips hyphens and whitespace. No validation happens here.
pub fn clean(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

/// Converts 10 digits to the 13-digit form: "978" + first 9 digits + check
/// digit. Weights alternate 1,3 starting with 1; the check digit is
/// `(10 - sum % 10) % 10`. The original ISBN-10 check digit is dropped without
/// being verified.
fn to_isbn13(digits10: &str) -> String {
    debug_assert!(digits10.len() == 10 && digits10.bytes().all(|b| b.is_ascii_digit()));

    let mut digits13 = String::with_capacity(13);
    digits13.push_str("978");
    digits13.push_str(&digits10[..9]);

    let sum: u32 = digits13
        .bytes()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    let check = (10 - sum % 10) % 10;
    digits13.push(char::from(b'0' + check as u8));
    digits13
}

/// Cleans and canonicalizes a book identifier.
///
/// 13-digit input passes through as-is (its checksum is not re-verified);
/// 10-digit input is converted. Anything else fails with [`InvalidLength`].
pub fn normalize(input: &str) -> Result<Isbn13, InvalidLength> {
    let digits = clean(input);
    let all_digits = digits.bytes().all(|b| b.is_ascii_digit());

    match digits.len() {
        13 if all_digits => Ok(Isbn13(digits)),
        10 if all_digits => Ok(Isbn13(to_isbn13(&digits))),
        len => Err(InvalidLength { len }),
    }
}
