use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use smm_score::config::{Config, ProjectConfig};
use smm_score::fetch::ProjectOutcome;
use smm_score::store::AssessmentRecord;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a response grid saved as JSON (no network access)
    Score {
        /// JSON file: array of rows, or a saved Sheets values response
        #[arg(short, long)]
        grid: PathBuf,

        /// Project name for the report (defaults to the file name)
        #[arg(short, long)]
        project: Option<String>,

        /// Also store the result in the report store
        #[arg(long)]
        save: bool,
    },
    /// Fetch responses from Google Sheets, score and store them
    Fetch {
        /// Only this configured project (default: all)
        #[arg(short, long)]
        project: Option<String>,

        /// Print results without updating the report store
        #[arg(long)]
        no_save: bool,
    },
    /// Show the stored assessment of a project, scoring it first if needed
    Show {
        /// Configured project name
        project: String,

        /// Re-fetch and re-score even if a stored result exists
        #[arg(long)]
        refresh: bool,
    },
    /// Check the taxonomy in the config file
    Validate,
    /// Create a starter config file
    Init {
        /// Overwrite an existing config without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "smm-score")]
#[command(about = "Scrum Maturity Model scoring from survey spreadsheets", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/smm-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn fail(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

/// Explicit paths must exist; the default path is optional for offline use.
fn load_config_for(path: Option<PathBuf>, required: bool) -> Config {
    let default_missing = path.is_none()
        && smm_score::config::get_config_path()
            .map(|p| !p.exists())
            .unwrap_or(true);

    if default_missing && !required {
        tracing::debug!("no config file, using built-in taxonomy");
        return Config::default();
    }

    match smm_score::config::load_config(path) {
        Ok(c) => c,
        Err(e) => fail(EXIT_CONFIG, format!("Config error: {:#}", e)),
    }
}

fn store_path() -> PathBuf {
    match smm_score::store::get_store_path() {
        Ok(p) => p,
        Err(e) => fail(EXIT_CONFIG, format!("Config error: {:#}", e)),
    }
}

fn save_records(records: &[&AssessmentRecord]) {
    if records.is_empty() {
        return;
    }
    let path = store_path();
    let result = smm_score::store::load_store(&path).and_then(|mut store| {
        for record in records {
            store.put((*record).clone());
        }
        smm_score::store::save_store(&path, &store)
    });
    match result {
        Ok(()) => tracing::debug!(count = records.len(), path = %path.display(), "saved reports"),
        Err(e) => fail(EXIT_DATA, format!("Failed to save reports: {:#}", e)),
    }
}

fn print_records(records: &[&AssessmentRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let output = if records.len() == 1 {
                smm_score::output::format_json(records[0])
            } else {
                smm_score::output::format_json(&records)
            };
            match output {
                Ok(json) => println!("{}", json),
                Err(e) => fail(EXIT_DATA, format!("{:#}", e)),
            }
        }
        OutputFormat::Text => {
            let use_colors = smm_score::output::should_use_colors();
            let blocks: Vec<String> = records
                .iter()
                .map(|r| smm_score::output::format_report_text(r, use_colors))
                .collect();
            println!("{}", blocks.join("\n\n"));
        }
    }
}

async fn fetch_projects(config: &Config, projects: &[ProjectConfig]) -> Vec<ProjectOutcome> {
    let settings = config.sheets_settings();

    let auth = match smm_score::credentials::auth_from_env(settings.api_key.clone()) {
        Ok(a) => a,
        Err(e) => fail(EXIT_AUTH, format!("Credential error: {}", e)),
    };
    tracing::debug!(?auth, "resolved sheets credentials");

    let client = match smm_score::sheets::SheetsClient::new(&settings, auth) {
        Ok(c) => c,
        Err(e) => fail(EXIT_NETWORK, format!("{:#}", e)),
    };

    let taxonomy = config.effective_taxonomy();
    match smm_score::fetch::fetch_and_score_projects(
        &client,
        projects,
        &taxonomy,
        settings.members_column(),
    )
    .await
    {
        Ok(outcomes) => outcomes,
        Err(e) => fail(EXIT_NETWORK, format!("{:#}", e)),
    }
}

fn project_name_from(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_string())
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    if let Commands::Init { force } = cli.command {
        match smm_score::config::init::run_init(cli.config, force) {
            Ok(Some(path)) => println!("Wrote {}", path.display()),
            Ok(None) => println!("Kept existing config."),
            Err(e) => fail(EXIT_CONFIG, format!("Init failed: {:#}", e)),
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config_required = matches!(cli.command, Commands::Fetch { .. } | Commands::Show { .. });
    let config = load_config_for(cli.config.clone(), config_required);

    // Validate taxonomy at startup
    let taxonomy = config.effective_taxonomy();
    if let Err(errors) = smm_score::scoring::validate_taxonomy(&taxonomy) {
        eprintln!("Taxonomy errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Validate => {
            println!(
                "Taxonomy OK: {} criteria, {} groups, {} levels",
                taxonomy.criteria.len(),
                taxonomy.groups.len(),
                taxonomy.levels.len()
            );
            println!("{} project(s) configured", config.projects.len());
        }
        Commands::Score {
            grid,
            project,
            save,
        } => {
            let response_grid = match smm_score::sheets::load_grid(&grid) {
                Ok(g) => g,
                Err(e) => fail(EXIT_DATA, format!("{:#}", e)),
            };
            tracing::debug!(respondents = response_grid.row_count(), "loaded grid");

            let name = project.unwrap_or_else(|| project_name_from(&grid));
            let members_column = config.sheets_settings().members_column().to_string();
            let record = match smm_score::fetch::assess(&name, &response_grid, &taxonomy, &members_column) {
                Ok(r) => r,
                Err(e) => fail(EXIT_DATA, format!("Scoring error: {}", e)),
            };

            if save {
                save_records(&[&record]);
            }
            print_records(&[&record], cli.format);
        }
        Commands::Fetch { project, no_save } => {
            let projects: Vec<ProjectConfig> = match &project {
                Some(name) => match config.project(name) {
                    Some(p) => vec![p.clone()],
                    None => fail(EXIT_CONFIG, format!("Unknown project '{}'", name)),
                },
                None => config.projects.clone(),
            };

            if projects.is_empty() {
                eprintln!("No projects configured in config file.");
                eprintln!("Add projects to ~/.config/smm-score/config.yaml:");
                eprintln!("  projects:");
                eprintln!("    - name: my-team");
                eprintln!("      spreadsheet_id: \"1AbC...\"");
                std::process::exit(EXIT_CONFIG);
            }

            let outcomes = fetch_projects(&config, &projects).await;
            let records: Vec<&AssessmentRecord> = outcomes
                .iter()
                .filter_map(|o| o.result.as_ref().ok())
                .collect();
            let failed = outcomes.len() - records.len();

            if !no_save {
                save_records(&records);
            }
            print_records(&records, cli.format);

            if failed > 0 {
                tracing::warn!(failed, "some projects could not be scored");
            }
        }
        Commands::Show { project, refresh } => {
            let project_config = match config.project(&project) {
                Some(p) => p.clone(),
                None => fail(EXIT_CONFIG, format!("Unknown project '{}'", project)),
            };

            let stored = if refresh {
                None
            } else {
                match smm_score::store::load_store(&store_path()) {
                    Ok(mut store) => store.remove(&project),
                    Err(e) => fail(EXIT_DATA, format!("{:#}", e)),
                }
            };

            let record = match stored {
                Some(r) => r,
                None => {
                    tracing::info!(project = %project, "no stored result, scoring now");
                    let mut outcomes = fetch_projects(&config, &[project_config]).await;
                    let outcome = match outcomes.pop() {
                        Some(o) => o,
                        None => fail(EXIT_NETWORK, "No result returned"),
                    };
                    match outcome.result {
                        Ok(r) => {
                            save_records(&[&r]);
                            r
                        }
                        Err(e) => fail(EXIT_NETWORK, format!("{:#}", e)),
                    }
                }
            };
            print_records(&[&record], cli.format);
        }
    }

    if cli.verbose {
        tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    }

    std::process::exit(EXIT_SUCCESS);
}
