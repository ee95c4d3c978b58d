// Configuration loading and parsing (courtside.toml).

use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::chart::ChartSelector;
use crate::compare::MountPoints;
use crate::metric::MetricKey;

const CONFIG_FILE: &str = "courtside.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataPaths,
    pub view: ViewConfig,
    pub mounts: MountPoints,
    pub augmentation: AugmentationConfig,
}

// ---------------------------------------------------------------------------
// courtside.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire courtside.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataPaths,
    view: ViewSection,
    surfaces: SurfacesSection,
    #[serde(default)]
    augmentation: AugmentationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
    pub teams: String,
    pub projections: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ViewSection {
    metrics: Vec<String>,
    team_metrics: Vec<String>,
    #[serde(default = "default_kind")]
    default_kind: String,
}

fn default_kind() -> String {
    ChartSelector::default().as_str().to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct SurfacesSection {
    mounted: Vec<String>,
}

/// The public view config assembled from the `[view]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Ordered metrics for player comparisons.
    pub metrics: Vec<MetricKey>,
    /// Ordered metrics for team comparisons.
    pub team_metrics: Vec<MetricKey>,
    /// Chart kind shown first on comparison screens.
    pub default_kind: ChartSelector,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AugmentationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub base_url: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/courtside.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let view = ViewConfig {
        metrics: parse_metrics("view.metrics", &file.view.metrics)?,
        team_metrics: parse_metrics("view.team_metrics", &file.view.team_metrics)?,
        default_kind: ChartSelector::from_id(&file.view.default_kind).ok_or_else(|| {
            ConfigError::ValidationError {
                field: "view.default_kind".into(),
                message: format!(
                    "must be one of bar, radar, line, doughnut; got `{}`",
                    file.view.default_kind
                ),
            }
        })?,
    };

    let config = Config {
        data: file.data,
        view,
        mounts: MountPoints::new(file.surfaces.mounted),
        augmentation: file.augmentation,
    };

    validate(&config)?;

    Ok(config)
}

fn parse_metrics(field: &str, names: &[String]) -> Result<Vec<MetricKey>, ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: "must list at least one metric".into(),
        });
    }
    MetricKey::parse_list(names).map_err(|message| ConfigError::ValidationError {
        field: field.into(),
        message,
    })
}

/// Seed `config/courtside.toml` from `defaults/courtside.toml` when the
/// user has no config yet. Returns the written path, or `None` when an
/// existing config was left alone.
pub fn seed_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        debug!("using existing {}", target.display());
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let seed = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "no {} and no {} to seed it from ({e}); run from the project root",
            target.display(),
            source.display()
        ),
    })?;

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }

    // create_new: never clobber a config written concurrently.
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            });
        }
    };
    dest.write_all(&seed).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;

    info!("seeded {} from {}", target.display(), source.display());
    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Seeds the config from `defaults/` first when it is missing.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    seed_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let data_fields: &[(&str, &str)] = &[
        ("data.players", &config.data.players),
        ("data.teams", &config.data.teams),
        ("data.projections", &config.data.projections),
    ];
    for (name, val) in data_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let aug = &config.augmentation;
    if aug.enabled {
        let url = aug.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                field: "augmentation.base_url".into(),
                message: format!("must be an http(s) URL when enabled, got `{url}`"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
