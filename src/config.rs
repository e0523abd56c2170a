use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DoxError, Result};

/// Doxygen output directory, relative to the build directory.
const DOXYGEN_DIR: &str = "doc/doxygen";
/// Primary Doxygen warning log.
const WARNINGS_LOG: &str = "warnings.log";
/// Log of `@param`/`@tparam` blocks without a description.
const EMPTY_PARAMS_LOG: &str = "empty-params.log";
/// Log mapping source files to the XML documents of their classes.
const CLASS_METHODS_LOG: &str = "class_methods.log";
/// Report filename.
const REPORT_FILE: &str = "dox_warnings.log";
/// Optional settings filename.
const SETTINGS_FILE: &str = "doxwarn.toml";

/// Paths resolved from the build directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Build directory all inputs and the report live in.
    pub build_dir: PathBuf,
    pub warnings_log: PathBuf,
    pub empty_params_log: PathBuf,
    pub class_methods_log: PathBuf,
    /// Report written on every successful run.
    pub report_path: PathBuf,
    /// User settings loaded from doxwarn.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from doxwarn.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub paths: PathSettings,
    pub ingest: IngestSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Everything before the last occurrence of this marker is stripped from paths.
    pub source_root_marker: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            source_root_marker: "src/".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Extensions (with leading dot) kept from the empty-params log.
    pub source_extensions: Vec<String>,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            source_extensions: [".hpp", ".cpp", ".hh", ".cc", ".h", ".c", ".cuh", ".cu", ".dox"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Separator between context lines of one warning.
    pub context_separator: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            context_separator: ", ".into(),
        }
    }
}

impl Config {
    /// Create config for a given build directory.
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        let build_dir = build_dir.into();
        let doxygen_dir = build_dir.join(DOXYGEN_DIR);
        let settings_path = build_dir.join(SETTINGS_FILE);

        let settings = Self::load_settings(&settings_path).unwrap_or_default();

        Self {
            warnings_log: doxygen_dir.join(WARNINGS_LOG),
            empty_params_log: doxygen_dir.join(EMPTY_PARAMS_LOG),
            class_methods_log: doxygen_dir.join(CLASS_METHODS_LOG),
            report_path: build_dir.join(REPORT_FILE),
            build_dir,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| DoxError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from doxwarn.toml if it exists.
    fn load_settings(settings_path: &Path) -> Option<UserSettings> {
        if !settings_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(settings_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %settings_path.display(), "ignoring invalid settings: {e}");
                None
            }
        }
    }

    /// Resolve a path listed in a log: absolute paths stay, others are build-dir relative.
    #[must_use]
    pub fn resolve(&self, listed: &str) -> PathBuf {
        let path = Path::new(listed);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.build_dir.join(path)
        }
    }

    /// Strip everything before the last source-root marker.
    #[must_use]
    pub fn normalize_source_path<'a>(&self, path: &'a str) -> &'a str {
        normalize_source_path(path, &self.settings.paths.source_root_marker)
    }
}

/// Strip everything before the last occurrence of `marker`; unchanged when absent.
#[must_use]
pub fn normalize_source_path<'a>(path: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return path;
    }
    match path.rfind(marker) {
        Some(idx) => &path[idx..],
        None => path,
    }
}
