use super::types::{ReportStore, STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default report store path (~/.config/smm-score/reports.json)
pub fn get_store_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("reports.json"))
}

/// Load the report store from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path) -> Result<ReportStore> {
    if !path.exists() {
        return Ok(ReportStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open report store at {}", path.display()))?;

    let store: ReportStore = serde_json::from_reader(file).context("Failed to load report store")?;

    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported report store version: {}", store.version);
    }

    Ok(store)
}

/// Save the report store to a JSON file atomically
///
/// The file is never left half-written. Missing parent directories are created.
pub fn save_store(path: &Path, store: &ReportStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize report store")?;

    file.commit().context("Failed to save report store")?;

    Ok(())
}
