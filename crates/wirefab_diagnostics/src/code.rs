//! Diagnostic codes such as `E101` or `W202`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a code reports; shown as the code's leading letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// A broken structural invariant (`E`).
    Error,
    /// Legal but suspicious state (`W`).
    Warning,
    /// Informational (`N`).
    Note,
}

impl Category {
    /// The leading letter of codes in this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'E' => Some(Category::Error),
            'W' => Some(Category::Warning),
            'N' => Some(Category::Note),
            _ => None,
        }
    }
}

/// A category letter plus a three-digit number.
///
/// Route-tree checks use `1xx`; design registry checks use `2xx`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Category letter.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Builds a code; usable in `const` items.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// The hundreds group of the number: `1` for route-tree codes, `2` for
    /// design codes.
    pub fn group(self) -> u16 {
        self.number / 100
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// Error returned when a string is not a diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a diagnostic code")]
pub struct ParseCodeError(String);

impl FromStr for DiagnosticCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let category = chars
            .next()
            .and_then(Category::from_prefix)
            .ok_or_else(|| ParseCodeError(s.to_string()))?;
        let digits = chars.as_str();
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseCodeError(s.to_string()));
        }
        let number = digits.parse().map_err(|_| ParseCodeError(s.to_string()))?;
        Ok(Self::new(category, number))
    }
}
