use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::{ensure_config_dir, get_config_path, Config, ProjectConfig, DEFAULT_WORKSHEET};
use crate::scoring::Taxonomy;

const HEADER: &str = "\
# smm-score configuration
#
# projects:  assessment targets, one spreadsheet each
# taxonomy:  criteria -> groups -> levels; edit column ranges to match your form
";

/// Read one trimmed line. A closed input is an error, not an empty answer.
fn read_answer<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Input closed before the configuration was complete");
    }
    Ok(input.trim().to_string())
}

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    read_answer(&mut std::io::stdin().lock())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Starter config with one project and the built-in taxonomy spelled out.
pub fn starter_config(project: &str, spreadsheet_id: &str, worksheet: &str) -> Config {
    let worksheet = if worksheet == DEFAULT_WORKSHEET {
        None
    } else {
        Some(worksheet.to_string())
    };

    Config {
        projects: vec![ProjectConfig {
            name: project.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet,
        }],
        sheets: None,
        taxonomy: Some(Taxonomy::default()),
    }
}

pub fn render_config(config: &Config) -> Result<String> {
    let yaml = serde_saphyr::to_string(config).context("Failed to serialize config")?;
    Ok(format!("{}{}", HEADER, yaml))
}

/// Write the config atomically, creating the default directory when needed.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let contents = render_config(config)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    } else {
        ensure_config_dir()?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;
    Ok(())
}

/// Interactively create a config file.
///
/// Returns the written path, or None if the user kept an existing file.
pub fn run_init(path: Option<PathBuf>, force: bool) -> Result<Option<PathBuf>> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!("{} already exists. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            return Ok(None);
        }
    }

    println!("smm-score configuration");
    println!("=======================");
    println!();

    let project = prompt_with_default("Project name", "My Team")?;
    let spreadsheet_id = loop {
        let input = prompt("Spreadsheet ID (from the sheet URL): ")?;
        if !input.is_empty() {
            break input;
        }
        println!("  Invalid: spreadsheet ID is required. Try again.");
    };
    let worksheet = prompt_with_default("Response worksheet", DEFAULT_WORKSHEET)?;

    let config = starter_config(&project, &spreadsheet_id, &worksheet);
    write_config(&config_path, &config)?;
    Ok(Some(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_read_answer_trims() {
        let mut input: &[u8] = b"  1AbC  \n";
        assert_eq!(read_answer(&mut input).unwrap(), "1AbC");

        let mut blank: &[u8] = b"\n";
        assert_eq!(read_answer(&mut blank).unwrap(), "");
    }

    #[test]
    fn test_read_answer_closed_input_is_an_error() {
        let mut input: &[u8] = b"";
        let err = read_answer(&mut input).unwrap_err();
        assert!(err.to_string().contains("Input closed"));
    }

    #[test]
    fn test_starter_config_omits_default_worksheet() {
        let config = starter_config("Team Alpha", "1AbC", DEFAULT_WORKSHEET);
        assert!(config.projects[0].worksheet.is_none());

        let config = starter_config("Team Alpha", "1AbC", "Jawaban");
        assert_eq!(config.projects[0].worksheet(), "Jawaban");
    }

    #[test]
    fn test_rendered_config_parses_back() {
        let config = starter_config("Team Alpha", "1AbC", DEFAULT_WORKSHEET);
        let rendered = render_config(&config).unwrap();
        assert!(rendered.starts_with("# smm-score configuration"));

        let parsed: Config = serde_saphyr::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_write_config_roundtrip() {
        let dir = env::temp_dir().join("smm_score_test_init");
        let path = dir.join("config.yaml");
        let _ = std::fs::remove_dir_all(&dir);

        let config = starter_config("Team Alpha", "1AbC", DEFAULT_WORKSHEET);
        write_config(&path, &config).unwrap();

        let loaded = crate::config::load_config(Some(path)).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
