use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::Band;
use crate::store::AssessmentRecord;

/// Width of the score column, fits "100.00"
const SCORE_WIDTH: usize = 6;
/// Width of the band column, fits "Partially Achieved"
const BAND_WIDTH: usize = 18;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Always two decimals, as scores are stored
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

fn format_band(band: Band, use_colors: bool) -> String {
    let label = format!("{:<width$}", band.label(), width = BAND_WIDTH);
    if !use_colors {
        return label;
    }
    match band {
        Band::FullyAchieved => label.green().bold().to_string(),
        Band::LargelyAchieved => label.cyan().to_string(),
        Band::PartiallyAchieved => label.yellow().to_string(),
        Band::NotAchieved => label.red().to_string(),
    }
}

/// Render one assessment as an indented text report
///
/// Goals list their objectives' KPA followed by the goal total and band.
/// Levels follow with their rating, band, and the goals they span.
pub fn format_report_text(record: &AssessmentRecord, use_colors: bool) -> String {
    format_report_text_width(record, use_colors, get_terminal_width())
}

fn format_report_text_width(
    record: &AssessmentRecord,
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    // name column gets whatever the score and band columns leave over
    let name_width = |indent: usize, with_band: bool| -> Option<usize> {
        let fixed = indent + 2 + SCORE_WIDTH + if with_band { 2 + BAND_WIDTH } else { 0 };
        term_width.map(|w| if w > fixed + 10 { w - fixed } else { 20 })
    };
    let fit = |name: &str, width: Option<usize>| match width {
        Some(w) => truncate_name(name, w),
        None => name.to_string(),
    };
    let heading = |text: &str| {
        if use_colors {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    };

    let mut lines = Vec::new();
    let title = format!(
        "{} (assessed {}, {} respondents)",
        record.project,
        record.computed_at.format("%Y-%m-%d %H:%M UTC"),
        record.project_members.len()
    );
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });
    lines.push(String::new());

    lines.push(heading("Goals"));
    let goal_width = name_width(2, true);
    let objective_width = name_width(4, false);
    let goal_pad = goal_width.unwrap_or(0);
    let objective_pad = objective_width.unwrap_or(0);
    for group in &record.report.group_scores {
        lines.push(format!(
            "  {:<gw$}  {:>sw$}  {}",
            fit(&group.goal, goal_width),
            format_score(group.total_kpa),
            format_band(group.interpretation, use_colors),
            gw = goal_pad,
            sw = SCORE_WIDTH,
        ));
        for objective in &group.objectives {
            let line = format!(
                "    {:<ow$}  {:>sw$}",
                fit(&objective.objective, objective_width),
                format_score(objective.kpa),
                ow = objective_pad,
                sw = SCORE_WIDTH,
            );
            lines.push(if use_colors {
                line.dimmed().to_string()
            } else {
                line
            });
        }
    }

    lines.push(String::new());
    lines.push(heading("Levels"));
    for level in &record.report.level_scores {
        lines.push(format!(
            "  {:<gw$}  {:>sw$}  {}",
            fit(&level.level, goal_width),
            format_score(level.kpa_rating),
            format_band(level.interpretation, use_colors),
            gw = goal_pad,
            sw = SCORE_WIDTH,
        ));
        let goals = format!("    {}", level.goals.join(", "));
        lines.push(if use_colors {
            goals.dimmed().to_string()
        } else {
            goals
        });
    }

    if !record.project_members.is_empty() {
        lines.push(String::new());
        lines.push(heading("Members"));
        lines.push(format!("  {}", record.project_members.join(", ")));
    }

    lines.join("\n")
}

/// Pretty JSON for scripting
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}
