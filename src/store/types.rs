use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::Report;

pub const STORE_VERSION: u32 = 1;

/// Latest scored assessment of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub project: String,
    pub computed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: Report,
    #[serde(default)]
    pub project_members: Vec<String>,
}

impl AssessmentRecord {
    pub fn new(project: &str, report: Report, project_members: Vec<String>) -> Self {
        Self {
            project: project.to_string(),
            computed_at: Utc::now(),
            report,
            project_members,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStore {
    pub version: u32,
    #[serde(default)]
    pub records: BTreeMap<String, AssessmentRecord>,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            records: BTreeMap::new(),
        }
    }

    pub fn get(&self, project: &str) -> Option<&AssessmentRecord> {
        self.records.get(project)
    }

    /// Store a record, replacing any earlier one for the same project.
    pub fn put(&mut self, record: AssessmentRecord) -> Option<AssessmentRecord> {
        self.records.insert(record.project.clone(), record)
    }

    pub fn remove(&mut self, project: &str) -> Option<AssessmentRecord> {
        self.records.remove(project)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scoring::{Band, GroupScore, LevelScore, ObjectiveScore};

    pub(crate) fn sample_report(total: f64) -> Report {
        Report {
            group_scores: vec![GroupScore {
                goal: "Basic Scrum Management".to_string(),
                objectives: vec![ObjectiveScore {
                    objective: "Adanya peran Scrum".to_string(),
                    kpa: total,
                }],
                total_kpa: total,
                interpretation: Band::LargelyAchieved,
            }],
            level_scores: vec![LevelScore {
                level: "Level 2 (Managed)".to_string(),
                goals: vec!["Basic Scrum Management".to_string()],
                kpa_rating: total,
                interpretation: Band::LargelyAchieved,
            }],
        }
    }

    #[test]
    fn test_put_replaces_record() {
        let mut store = ReportStore::new();
        assert!(store.put(AssessmentRecord::new("Alpha", sample_report(60.0), vec![])).is_none());
        let old = store.put(AssessmentRecord::new("Alpha", sample_report(70.0), vec![]));
        assert_eq!(old.unwrap().report.group_scores[0].total_kpa, 60.0);
        assert_eq!(store.records.len(), 1);
        assert_eq!(store.get("Alpha").unwrap().report.group_scores[0].total_kpa, 70.0);
    }

    #[test]
    fn test_remove() {
        let mut store = ReportStore::new();
        store.put(AssessmentRecord::new("Alpha", sample_report(60.0), vec![]));
        assert!(store.remove("Alpha").is_some());
        assert!(store.get("Alpha").is_none());
        assert!(store.remove("Alpha").is_none());
    }

    #[test]
    fn test_record_json_is_flat() {
        let record = AssessmentRecord::new(
            "Alpha",
            sample_report(60.0),
            vec!["Ani".to_string(), "Budi".to_string()],
        );
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["group_scores"].is_array());
        assert!(value["level_scores"].is_array());
        assert_eq!(value["project_members"][1], "Budi");
        assert_eq!(value["project"], "Alpha");
        assert!(value.get("report").is_none());

        let parsed: AssessmentRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }
}
