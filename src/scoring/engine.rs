use std::collections::HashMap;

use super::band::{classify, Band};
use super::error::ScoringError;
use super::grid::ResponseGrid;
use super::report::{GroupScore, LevelScore, ObjectiveScore, Report};
use super::tally::{tally, AnswerLabels};
use super::taxonomy::{CriterionDef, Taxonomy};

/// Weight of a partial answer relative to a full one.
const PARTIAL_WEIGHT: f64 = 0.5;

/// Round to two decimals, ties to even (3.125 -> 3.12).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Score one criterion over its column range, 0-100.
///
/// Not-applicable answers leave both numerator and denominator. If nothing
/// but not-applicable answers remain, the score is 0.
pub fn score_criterion(
    criterion: &CriterionDef,
    grid: &ResponseGrid,
    answers: &AnswerLabels,
) -> Result<f64, ScoringError> {
    let span = criterion.columns.grid_span()?;
    let width = criterion.columns.width()?;
    let total_questions = grid
        .row_count()
        .checked_mul(width)
        .ok_or_else(|| ScoringError::RangeTooWide {
            range: criterion.columns.to_string(),
        })?;
    let counts = tally(grid.cells_in(span), answers);

    tracing::debug!(
        criterion = %criterion.name,
        columns = %criterion.columns,
        total_questions,
        affirmative = counts.affirmative,
        partial = counts.partial,
        negative = counts.negative,
        not_applicable = counts.not_applicable,
        unrecognized = counts.cells_scanned - counts.recognized(),
        "tallied criterion"
    );

    let denominator = total_questions.saturating_sub(counts.not_applicable);
    if denominator == 0 {
        return Ok(0.0);
    }

    let earned = counts.affirmative as f64 + PARTIAL_WEIGHT * counts.partial as f64;
    Ok(round2(earned / denominator as f64 * 100.0))
}

fn mean_of(names: &[String], scores: &HashMap<String, f64>) -> Result<f64, ScoringError> {
    if names.is_empty() {
        return Err(ScoringError::EmptyAggregate);
    }

    let mut sum = 0.0;
    for name in names {
        let score = scores
            .get(name)
            .ok_or_else(|| ScoringError::MissingScore { name: name.clone() })?;
        sum += score;
    }
    Ok(round2(sum / names.len() as f64))
}

/// Equal-weight mean of criterion scores.
pub fn aggregate_group(
    criteria: &[String],
    scores: &HashMap<String, f64>,
) -> Result<f64, ScoringError> {
    mean_of(criteria, scores)
}

/// Equal-weight mean of group scores.
pub fn aggregate_level(
    groups: &[String],
    group_scores: &HashMap<String, f64>,
) -> Result<f64, ScoringError> {
    mean_of(groups, group_scores)
}

fn band_for(score: f64) -> Result<Band, ScoringError> {
    classify(score).ok_or(ScoringError::Unbanded { score })
}

/// Run the full roll-up: criteria, then groups, then levels.
pub fn build_report(taxonomy: &Taxonomy, grid: &ResponseGrid) -> Result<Report, ScoringError> {
    let mut criterion_scores = HashMap::with_capacity(taxonomy.criteria.len());
    for criterion in &taxonomy.criteria {
        let score = score_criterion(criterion, grid, &taxonomy.answers)?;
        criterion_scores.insert(criterion.name.clone(), score);
    }

    let mut group_scores = Vec::with_capacity(taxonomy.groups.len());
    let mut group_totals = HashMap::with_capacity(taxonomy.groups.len());
    for group in &taxonomy.groups {
        let total_kpa = aggregate_group(&group.criteria, &criterion_scores)?;
        let objectives = group
            .criteria
            .iter()
            .map(|name| {
                criterion_scores
                    .get(name)
                    .map(|&kpa| ObjectiveScore {
                        objective: name.clone(),
                        kpa,
                    })
                    .ok_or_else(|| ScoringError::MissingScore { name: name.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        group_totals.insert(group.name.clone(), total_kpa);
        group_scores.push(GroupScore {
            goal: group.name.clone(),
            objectives,
            total_kpa,
            interpretation: band_for(total_kpa)?,
        });
    }

    let mut level_scores = Vec::with_capacity(taxonomy.levels.len());
    for level in &taxonomy.levels {
        let kpa_rating = aggregate_level(&level.groups, &group_totals)?;
        level_scores.push(LevelScore {
            level: level.name.clone(),
            goals: level.groups.clone(),
            kpa_rating,
            interpretation: band_for(kpa_rating)?,
        });
    }

    Ok(Report {
        group_scores,
        level_scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::columns::ColumnRange;
    use crate::scoring::taxonomy::{GroupDef, LevelDef};

    fn grid(rows: &[&[&str]]) -> ResponseGrid {
        ResponseGrid::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn criterion(name: &str, columns: &str) -> CriterionDef {
        CriterionDef {
            name: name.to_string(),
            columns: columns.parse().unwrap(),
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn scores(items: &[(&str, f64)]) -> HashMap<String, f64> {
        items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_single_column_yes_and_no() {
        // Header plus two respondents answering in column B.
        let g = grid(&[&["ts", "Q1"], &["t1", "Ya"], &["t2", "Tidak"]]);
        let c = criterion("Roles", "B");
        let score = score_criterion(&c, &g, &AnswerLabels::default()).unwrap();
        assert_eq!(score, 50.0);
        assert_eq!(classify(score), Some(Band::PartiallyAchieved));
    }

    #[test]
    fn test_all_not_applicable_scores_zero() {
        let g = grid(&[
            &["ts", "Q1", "Q2"],
            &["t1", "Tidak Berlaku", "Tidak Berlaku"],
            &["t2", "Tidak Berlaku", "Tidak Berlaku"],
            &["t3", "Tidak Berlaku", "Tidak Berlaku"],
        ]);
        let c = criterion("Artifacts", "B:C");
        let score = score_criterion(&c, &g, &AnswerLabels::default()).unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(classify(score), Some(Band::NotAchieved));
    }

    #[test]
    fn test_partial_counts_half_and_not_applicable_is_excluded() {
        // A=2, P=1, N=1, X=2 over 6 cells: (2 + 0.5) / 4 * 100 = 62.5
        let g = grid(&[
            &["ts", "Q1", "Q2"],
            &["t1", "Ya", "Sebagian"],
            &["t2", "Tidak Berlaku", "Tidak"],
            &["t3", "Ya", "Tidak Berlaku"],
        ]);
        let c = criterion("Meetings", "B:C");
        assert_eq!(score_criterion(&c, &g, &AnswerLabels::default()).unwrap(), 62.5);
    }

    #[test]
    fn test_blank_cells_count_against_the_score() {
        // Blank and missing cells are unrecognized but still questions asked.
        let g = grid(&[&["ts", "Q1", "Q2"], &["t1", "Ya", ""], &["t2", "Ya"]]);
        let c = criterion("Flow", "B:C");
        assert_eq!(score_criterion(&c, &g, &AnswerLabels::default()).unwrap(), 50.0);
    }

    #[test]
    fn test_score_is_rounded_to_two_decimals() {
        let g = grid(&[&["ts", "Q1", "Q2", "Q3"], &["t1", "Ya", "Tidak", "Tidak"]]);
        let c = criterion("Roles", "B:D");
        assert_eq!(score_criterion(&c, &g, &AnswerLabels::default()).unwrap(), 33.33);
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(3.125), 3.12);
        assert_eq!(round2(80.125), 80.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(33.3333), 33.33);
    }

    #[test]
    fn test_exact_half_criterion_score_rounds_to_even() {
        // AO:AV is 8 columns; 4 respondents and one "Ya" is 1/32 = 3.125%
        let header = vec!["h".to_string(); 48];
        let mut rows = vec![header];
        for r in 0..4 {
            let mut row = vec!["Tidak".to_string(); 48];
            if r == 0 {
                row[40] = "Ya".to_string();
            }
            rows.push(row);
        }
        let g = ResponseGrid::new(rows);
        let c = criterion("Manajemen Sprint Backlog", "AO:AV");
        assert_eq!(score_criterion(&c, &g, &AnswerLabels::default()).unwrap(), 3.12);
    }

    #[test]
    fn test_range_too_wide_is_an_error() {
        let rows = vec![vec!["x".to_string()]; 9];
        let g = ResponseGrid::new(rows);
        let c = criterion("Huge", "A:ZZZZZZZZZZZZZ");
        let err = score_criterion(&c, &g, &AnswerLabels::default()).unwrap_err();
        assert_eq!(
            err,
            ScoringError::RangeTooWide {
                range: "A:ZZZZZZZZZZZZZ".to_string()
            }
        );
    }

    #[test]
    fn test_header_only_grid_scores_zero() {
        let g = grid(&[&["ts", "Q1"]]);
        let c = criterion("Roles", "B");
        assert_eq!(score_criterion(&c, &g, &AnswerLabels::default()).unwrap(), 0.0);
    }

    #[test]
    fn test_header_is_not_scored() {
        let g = grid(&[&["ts", "Ya"], &["t1", "Tidak"]]);
        let c = criterion("Roles", "B");
        assert_eq!(score_criterion(&c, &g, &AnswerLabels::default()).unwrap(), 0.0);
    }

    #[test]
    fn test_criterion_scores_stay_in_range() {
        let answers = ["Ya", "Sebagian", "Tidak", "Tidak Berlaku", "", "lainnya"];
        for seed in 0..200usize {
            let rows: Vec<Vec<String>> = std::iter::once(vec!["h".to_string(); 4])
                .chain((0..(seed % 7)).map(|r| {
                    (0..4)
                        .map(|c| answers[(seed * 31 + r * 7 + c * 13) % answers.len()].to_string())
                        .collect()
                }))
                .collect();
            let g = ResponseGrid::new(rows);
            let score = score_criterion(&criterion("X", "A:D"), &g, &AnswerLabels::default())
                .unwrap();
            assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
            assert_eq!(score, round2(score));
        }
    }

    #[test]
    fn test_aggregate_group_mean() {
        let s = scores(&[("a", 80.0), ("b", 90.0)]);
        let total = aggregate_group(&names(&["a", "b"]), &s).unwrap();
        assert_eq!(total, 85.0);
        assert_eq!(classify(total), Some(Band::LargelyAchieved));
    }

    #[test]
    fn test_aggregate_level_mean() {
        let s = scores(&[("g1", 70.0), ("g2", 90.0)]);
        let rating = aggregate_level(&names(&["g1", "g2"]), &s).unwrap();
        assert_eq!(rating, 80.0);
        assert_eq!(classify(rating), Some(Band::LargelyAchieved));
    }

    #[test]
    fn test_aggregate_uniform_scores_is_identity() {
        for n in 1..6 {
            let keys: Vec<String> = (0..n).map(|i| format!("c{}", i)).collect();
            let s: HashMap<String, f64> = keys.iter().map(|k| (k.clone(), 42.42)).collect();
            assert_eq!(aggregate_group(&keys, &s).unwrap(), 42.42);
            assert_eq!(aggregate_level(&keys, &s).unwrap(), 42.42);
        }
    }

    #[test]
    fn test_aggregate_rounds() {
        let s = scores(&[("a", 10.0), ("b", 10.0), ("c", 20.0)]);
        assert_eq!(aggregate_group(&names(&["a", "b", "c"]), &s).unwrap(), 13.33);
    }

    #[test]
    fn test_aggregate_half_rounds_to_even() {
        let s = scores(&[("a", 80.25), ("b", 80.0)]);
        assert_eq!(aggregate_group(&names(&["a", "b"]), &s).unwrap(), 80.12);
    }

    #[test]
    fn test_aggregate_missing_score() {
        let s = scores(&[("a", 10.0)]);
        let err = aggregate_group(&names(&["a", "ghost"]), &s).unwrap_err();
        assert_eq!(
            err,
            ScoringError::MissingScore {
                name: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_aggregate_empty() {
        let err = aggregate_level(&[], &HashMap::new()).unwrap_err();
        assert_eq!(err, ScoringError::EmptyAggregate);
    }

    fn small_taxonomy() -> Taxonomy {
        Taxonomy {
            criteria: vec![criterion("Roles", "B:C"), criterion("PO", "D")],
            groups: vec![
                GroupDef {
                    name: "Basics".to_string(),
                    criteria: names(&["Roles"]),
                },
                GroupDef {
                    name: "Customer".to_string(),
                    criteria: names(&["PO"]),
                },
            ],
            levels: vec![LevelDef {
                name: "Level 2".to_string(),
                groups: names(&["Basics", "Customer"]),
            }],
            answers: AnswerLabels::default(),
        }
    }

    #[test]
    fn test_build_report() {
        let g = grid(&[
            &["ts", "Q1", "Q2", "Q3"],
            &["t1", "Ya", "Ya", "Ya"],
            &["t2", "Ya", "Sebagian", "Tidak"],
        ]);
        let report = build_report(&small_taxonomy(), &g).unwrap();

        assert_eq!(report.group_scores.len(), 2);
        let basics = &report.group_scores[0];
        assert_eq!(basics.goal, "Basics");
        assert_eq!(basics.objectives[0].objective, "Roles");
        assert_eq!(basics.objectives[0].kpa, 87.5);
        assert_eq!(basics.total_kpa, 87.5);
        assert_eq!(basics.interpretation, Band::FullyAchieved);

        let customer = &report.group_scores[1];
        assert_eq!(customer.total_kpa, 50.0);
        assert_eq!(customer.interpretation, Band::PartiallyAchieved);

        assert_eq!(report.level_scores.len(), 1);
        let level = &report.level_scores[0];
        assert_eq!(level.goals, names(&["Basics", "Customer"]));
        assert_eq!(level.kpa_rating, 68.75);
        assert_eq!(level.interpretation, Band::LargelyAchieved);
    }

    #[test]
    fn test_build_report_is_deterministic() {
        let g = grid(&[&["ts", "Q1", "Q2", "Q3"], &["t1", "Ya", "Tidak", "Sebagian"]]);
        let taxonomy = small_taxonomy();
        assert_eq!(
            build_report(&taxonomy, &g).unwrap(),
            build_report(&taxonomy, &g).unwrap()
        );
    }

    #[test]
    fn test_build_report_missing_criterion_aborts() {
        let mut taxonomy = small_taxonomy();
        taxonomy.groups[0].criteria.push("Unscored".to_string());
        let g = grid(&[&["ts", "Q1", "Q2", "Q3"], &["t1", "Ya", "Ya", "Ya"]]);
        let err = build_report(&taxonomy, &g).unwrap_err();
        assert!(matches!(err, ScoringError::MissingScore { .. }));
    }

    #[test]
    fn test_build_report_missing_group_aborts() {
        let mut taxonomy = small_taxonomy();
        taxonomy.levels[0].groups.push("Unknown".to_string());
        let g = grid(&[&["ts", "Q1", "Q2", "Q3"], &["t1", "Ya", "Ya", "Ya"]]);
        let err = build_report(&taxonomy, &g).unwrap_err();
        assert_eq!(
            err,
            ScoringError::MissingScore {
                name: "Unknown".to_string()
            }
        );
    }

    #[test]
    fn test_build_report_default_taxonomy() {
        let taxonomy = Taxonomy::default();
        let mut header = vec!["Timestamp".to_string(), "Email".to_string(), "Nama".to_string()];
        header.extend((4..=74).map(|i| format!("Q{}", i)));
        let mut yes = vec!["t".to_string(), "e".to_string(), "Ani".to_string()];
        yes.extend((4..=74).map(|_| "Ya".to_string()));
        let g = ResponseGrid::new(vec![header, yes]);

        let report = build_report(&taxonomy, &g).unwrap();
        assert_eq!(report.group_scores.len(), 7);
        assert_eq!(report.level_scores.len(), 4);
        // Column D is unscored, so a respondent answering "Ya" everywhere gets 100s.
        for group in &report.group_scores {
            assert_eq!(group.total_kpa, 100.0);
            assert_eq!(group.interpretation, Band::FullyAchieved);
        }
        for level in &report.level_scores {
            assert_eq!(level.kpa_rating, 100.0);
        }
    }

    #[test]
    fn test_malformed_range_is_propagated() {
        let c = CriterionDef {
            name: "Bad".to_string(),
            columns: ColumnRange::Span {
                start: "E".to_string(),
                end: "7".to_string(),
            },
        };
        let g = grid(&[&["h"], &["Ya"]]);
        let err = score_criterion(&c, &g, &AnswerLabels::default()).unwrap_err();
        assert!(matches!(err, ScoringError::MalformedLabel { .. }));
    }
}
