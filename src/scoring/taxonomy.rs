use serde::{Deserialize, Serialize};

use super::columns::ColumnRange;
use super::tally::AnswerLabels;

/// The Scrum maturity model: criteria roll up into groups, groups into levels.
///
/// Order is significant; reports list groups and levels in the order given
/// here.
///
/// Example YAML:
/// ```yaml
/// taxonomy:
///   criteria:
///     - { name: "Adanya peran Scrum", columns: "E:G" }
///     - { name: "Product Owner tersedia", columns: "AL" }
///   groups:
///     - name: "Basic Scrum Management"
///       criteria: ["Adanya peran Scrum"]
///   levels:
///     - name: "Level 2 (Managed)"
///       groups: ["Basic Scrum Management"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Taxonomy {
    pub criteria: Vec<CriterionDef>,
    pub groups: Vec<GroupDef>,
    pub levels: Vec<LevelDef>,

    /// Answer strings recognized in response cells
    #[serde(default)]
    pub answers: AnswerLabels,
}

/// Smallest scored unit: a named block of question columns.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CriterionDef {
    pub name: String,
    pub columns: ColumnRange,
}

/// A Scrum capability, averaged from its criteria.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupDef {
    pub name: String,
    pub criteria: Vec<String>,
}

/// A maturity level, averaged from its groups.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LevelDef {
    pub name: String,
    pub groups: Vec<String>,
}

fn span(start: &str, end: &str) -> ColumnRange {
    ColumnRange::Span {
        start: start.to_string(),
        end: end.to_string(),
    }
}

fn criterion(name: &str, columns: ColumnRange) -> CriterionDef {
    CriterionDef {
        name: name.to_string(),
        columns,
    }
}

fn group(name: &str, criteria: &[&str]) -> GroupDef {
    GroupDef {
        name: name.to_string(),
        criteria: criteria.iter().map(|c| c.to_string()).collect(),
    }
}

fn level(name: &str, groups: &[&str]) -> LevelDef {
    LevelDef {
        name: name.to_string(),
        groups: groups.iter().map(|g| g.to_string()).collect(),
    }
}

impl Default for Taxonomy {
    /// The SMM questionnaire layout of the "Form Responses 1" sheet.
    fn default() -> Self {
        Self {
            criteria: vec![
                criterion("Adanya peran Scrum", span("E", "G")),
                criterion("Adanya Scrum Artifacts", span("H", "P")),
                criterion("Adanya Scrum meeting dan dipartisipasi", span("Q", "U")),
                criterion("Alur proses Scrum dihormati", span("V", "W")),
                criterion("Definisi yang jelas tentang Product owner", span("X", "Z")),
                criterion("Manajemen Product Backlog", span("AA", "AC")),
                criterion("Sprint Planning Meeting yang sukses", span("AD", "AI")),
                criterion("Adanya Definition of Done", span("AJ", "AK")),
                criterion("Product Owner tersedia", ColumnRange::Single("AL".to_string())),
                criterion("Sprint Review Meeting yang sukses", span("AM", "AN")),
                criterion("Manajemen Sprint Backlog", span("AO", "AV")),
                criterion("Iterasi direncanakan", span("AW", "AZ")),
                criterion("Velocity terukur", span("BA", "BC")),
                criterion("Daily Scrum yang sukses", span("BD", "BF")),
                criterion("Manajemen proyek terpadu", span("BG", "BL")),
                criterion("Analisis Manajemen", span("BM", "BP")),
                criterion("Sprint Retrospective yang sukses", span("BQ", "BR")),
                criterion("Analisis penyebab dan penyelesaian", span("BS", "BT")),
                criterion("Indikator positif", span("BU", "BV")),
            ],
            groups: vec![
                group(
                    "Basic Scrum Management",
                    &[
                        "Adanya peran Scrum",
                        "Adanya Scrum Artifacts",
                        "Adanya Scrum meeting dan dipartisipasi",
                        "Alur proses Scrum dihormati",
                    ],
                ),
                group(
                    "Software Requirement Engineering",
                    &[
                        "Definisi yang jelas tentang Product owner",
                        "Manajemen Product Backlog",
                        "Sprint Planning Meeting yang sukses",
                    ],
                ),
                group(
                    "Customer Relationship Management",
                    &[
                        "Adanya Definition of Done",
                        "Product Owner tersedia",
                        "Sprint Review Meeting yang sukses",
                    ],
                ),
                group(
                    "Iteration Management",
                    &[
                        "Manajemen Sprint Backlog",
                        "Iterasi direncanakan",
                        "Velocity terukur",
                        "Daily Scrum yang sukses",
                    ],
                ),
                group("Standardized Project Management", &["Manajemen proyek terpadu"]),
                group("Process Performance Management", &["Analisis Manajemen"]),
                group(
                    "Performance Management",
                    &[
                        "Sprint Retrospective yang sukses",
                        "Analisis penyebab dan penyelesaian",
                        "Indikator positif",
                    ],
                ),
            ],
            levels: vec![
                level(
                    "Level 2 (Managed)",
                    &["Basic Scrum Management", "Software Requirement Engineering"],
                ),
                level(
                    "Level 3 (Defined)",
                    &["Customer Relationship Management", "Iteration Management"],
                ),
                level(
                    "Level 4 (Quantitatively Managed)",
                    &[
                        "Standardized Project Management",
                        "Process Performance Management",
                    ],
                ),
                level("Level 5 (Optimizing)", &["Performance Management"]),
            ],
            answers: AnswerLabels::default(),
        }
    }
}
