pub mod band;
pub mod columns;
pub mod engine;
pub mod error;
pub mod grid;
pub mod report;
pub mod tally;
pub mod taxonomy;
pub mod validation;

pub use band::{classify, Band};
pub use columns::{column_label_to_index, index_to_column_label, ColumnRange};
pub use engine::{aggregate_group, aggregate_level, build_report, score_criterion};
pub use error::ScoringError;
pub use grid::ResponseGrid;
pub use report::{GroupScore, LevelScore, ObjectiveScore, Report};
pub use tally::{tally, AnswerLabels, Category, CategoryTally};
pub use taxonomy::{CriterionDef, GroupDef, LevelDef, Taxonomy};
pub use validation::validate_taxonomy;
