use thiserror::Error;

/// Errors raised while turning a response grid into a maturity report.
///
/// Any of these aborts the scoring run; there is no partial report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("malformed column label '{label}': only letters A-Z are allowed")]
    MalformedLabel { label: String },

    #[error("column label '{label}' is too long to address a column")]
    LabelTooLong { label: String },

    #[error("column range {range} spans more cells than can be counted")]
    RangeTooWide { range: String },

    #[error("invalid column index {index}: indices start at 1")]
    InvalidIndex { index: usize },

    #[error("column range {start}:{end} is reversed")]
    ReversedRange { start: String, end: String },

    #[error("no score computed for '{name}'")]
    MissingScore { name: String },

    #[error("cannot average an empty set of scores")]
    EmptyAggregate,

    #[error("score {score} is outside 0-100 and has no band")]
    Unbanded { score: f64 },
}
