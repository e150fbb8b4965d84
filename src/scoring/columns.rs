use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::error::ScoringError;

/// Convert a spreadsheet column label to its 1-based index (A=1, Z=26, AA=27).
/// Case-insensitive.
pub fn column_label_to_index(label: &str) -> Result<usize, ScoringError> {
    if label.is_empty() {
        return Err(ScoringError::MalformedLabel {
            label: label.to_string(),
        });
    }

    let mut index: usize = 0;
    for c in label.chars() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(ScoringError::MalformedLabel {
                label: label.to_string(),
            });
        }
        let digit = (upper as u8 - b'A') as usize + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| ScoringError::LabelTooLong {
                label: label.to_string(),
            })?;
    }
    Ok(index)
}

/// Convert a 1-based column index back to its label (1 -> "A", 27 -> "AA").
pub fn index_to_column_label(index: usize) -> Result<String, ScoringError> {
    if index == 0 {
        return Err(ScoringError::InvalidIndex { index });
    }

    let mut n = index;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    Ok(letters.iter().rev().collect())
}

/// The columns holding one criterion's questions.
///
/// Written as `"E:G"` for an inclusive span or `"AL"` for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnRange {
    Single(String),
    Span { start: String, end: String },
}

impl ColumnRange {
    pub fn single(label: &str) -> Result<Self, ScoringError> {
        column_label_to_index(label)?;
        Ok(ColumnRange::Single(label.to_ascii_uppercase()))
    }

    pub fn span(start: &str, end: &str) -> Result<Self, ScoringError> {
        let first = column_label_to_index(start)?;
        let last = column_label_to_index(end)?;
        if first > last {
            return Err(ScoringError::ReversedRange {
                start: start.to_ascii_uppercase(),
                end: end.to_ascii_uppercase(),
            });
        }
        Ok(ColumnRange::Span {
            start: start.to_ascii_uppercase(),
            end: end.to_ascii_uppercase(),
        })
    }

    /// Number of question columns covered.
    pub fn width(&self) -> Result<usize, ScoringError> {
        let span = self.grid_span()?;
        Ok(span.end() - span.start() + 1)
    }

    /// Zero-based inclusive grid column bounds (column A is grid column 0).
    pub fn grid_span(&self) -> Result<RangeInclusive<usize>, ScoringError> {
        match self {
            ColumnRange::Single(label) => {
                let index = column_label_to_index(label)? - 1;
                Ok(index..=index)
            }
            ColumnRange::Span { start, end } => {
                let first = column_label_to_index(start)? - 1;
                let last = column_label_to_index(end)? - 1;
                if first > last {
                    return Err(ScoringError::ReversedRange {
                        start: start.clone(),
                        end: end.clone(),
                    });
                }
                Ok(first..=last)
            }
        }
    }
}

impl FromStr for ColumnRange {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((start, end)) => ColumnRange::span(start.trim(), end.trim()),
            None => ColumnRange::single(s),
        }
    }
}

impl TryFrom<String> for ColumnRange {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnRange> for String {
    fn from(range: ColumnRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRange::Single(label) => write!(f, "{}", label),
            ColumnRange::Span { start, end } => write!(f, "{}:{}", start, end),
        }
    }
}
