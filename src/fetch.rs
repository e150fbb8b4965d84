use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};

use crate::config::ProjectConfig;
use crate::scoring::{build_report, ResponseGrid, ScoringError, Taxonomy};
use crate::sheets::{project_members, SheetsClient};
use crate::store::AssessmentRecord;

/// Score one project's grid into a record. All-or-nothing.
pub fn assess(
    project: &str,
    grid: &ResponseGrid,
    taxonomy: &Taxonomy,
    members_column: &str,
) -> Result<AssessmentRecord, ScoringError> {
    let report = build_report(taxonomy, grid)?;
    let members = project_members(grid, members_column)?;
    Ok(AssessmentRecord::new(project, report, members))
}

/// Outcome of fetching and scoring one configured project.
#[derive(Debug)]
pub struct ProjectOutcome {
    pub project: String,
    pub result: Result<AssessmentRecord>,
}

/// Fetch every project's worksheet concurrently and score each one.
///
/// A failing project does not stop the others; outcomes come back in
/// configuration order. Errors only if every project failed.
pub async fn fetch_and_score_projects(
    client: &SheetsClient,
    projects: &[ProjectConfig],
    taxonomy: &Taxonomy,
    members_column: &str,
) -> Result<Vec<ProjectOutcome>> {
    let mut futures = FuturesUnordered::new();
    for (index, project) in projects.iter().enumerate() {
        let client = client.clone();
        futures.push(async move {
            tracing::info!(project = %project.name, worksheet = project.worksheet(), "fetching responses");
            let result = client
                .fetch_grid(&project.spreadsheet_id, project.worksheet())
                .await
                .with_context(|| format!("Failed to fetch responses for '{}'", project.name))
                .and_then(|grid| {
                    tracing::debug!(project = %project.name, respondents = grid.row_count(), "scoring");
                    assess(&project.name, &grid, taxonomy, members_column)
                        .with_context(|| format!("Failed to score '{}'", project.name))
                });
            (index, result)
        });
    }

    let mut outcomes: Vec<Option<ProjectOutcome>> = projects.iter().map(|_| None).collect();
    let mut any_succeeded = false;

    while let Some((index, result)) = futures.next().await {
        let name = projects[index].name.clone();
        match &result {
            Ok(_) => {
                any_succeeded = true;
            }
            Err(e) => {
                tracing::warn!(project = %name, "{:#}", e);
            }
        }
        outcomes[index] = Some(ProjectOutcome {
            project: name,
            result,
        });
    }

    if !any_succeeded && !projects.is_empty() {
        anyhow::bail!("All projects failed. Check your network connection and Sheets credentials.");
    }

    Ok(outcomes.into_iter().flatten().collect())
}
