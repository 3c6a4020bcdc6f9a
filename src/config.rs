use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_PHOTO_DIR, DEFAULT_SCHEDULE_DIR};
use crate::error::{Error, Result};
use crate::sort::FolderNaming;

/// Optional config file structure
///
/// ```toml
/// schedule_dir = "schedule"
/// photo_dir = "/mnt/camera/DCIM"
/// output_dir = "sorted"
/// name_only = false
/// ```
///
/// Relative paths are resolved against the invocation root.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Folder containing PDF schedules (default: schedule)
    pub schedule_dir: Option<PathBuf>,
    /// Folder of unsorted photos, searched recursively (default: photos)
    pub photo_dir: Option<PathBuf>,
    /// Destination root for sorted photos (default: output)
    pub output_dir: Option<PathBuf>,
    /// Name client folders without the personal code (default: false)
    pub name_only: Option<bool>,
}

/// Values given on the command line, taking precedence over the file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub schedule_dir: Option<PathBuf>,
    pub photo_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub name_only: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub schedule_dir: PathBuf,
    pub photo_dir: PathBuf,
    pub output_dir: PathBuf,
    pub naming: FolderNaming,
}

pub fn parse_config(content: &str) -> Result<FileConfig> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_config(&content).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            msg
        )),
        other => other,
    })
}

impl RunConfig {
    pub fn resolve(root: &Path, file: FileConfig, overrides: Overrides) -> Self {
        let pick = |cli: Option<PathBuf>, from_file: Option<PathBuf>, default: &str| {
            cli.unwrap_or_else(|| root.join(from_file.unwrap_or_else(|| PathBuf::from(default))))
        };

        Self {
            schedule_dir: pick(
                overrides.schedule_dir,
                file.schedule_dir,
                DEFAULT_SCHEDULE_DIR,
            ),
            photo_dir: pick(overrides.photo_dir, file.photo_dir, DEFAULT_PHOTO_DIR),
            output_dir: pick(overrides.output_dir, file.output_dir, DEFAULT_OUTPUT_DIR),
            naming: FolderNaming::from_name_only(
                overrides.name_only || file.name_only.unwrap_or(false),
            ),
        }
    }
}
