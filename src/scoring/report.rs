use serde::{Deserialize, Serialize};

use super::band::Band;

/// Scores for one assessment, in the field naming consumers already read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub group_scores: Vec<GroupScore>,
    pub level_scores: Vec<LevelScore>,
}

/// A capability group ("goal") with its criterion breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    pub goal: String,
    pub objectives: Vec<ObjectiveScore>,
    #[serde(rename = "totalKPA")]
    pub total_kpa: f64,
    pub interpretation: Band,
}

/// A criterion score. Criteria carry no band of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveScore {
    pub objective: String,
    pub kpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelScore {
    pub level: String,
    pub goals: Vec<String>,
    #[serde(rename = "kpaRating")]
    pub kpa_rating: f64,
    pub interpretation: Band,
}
