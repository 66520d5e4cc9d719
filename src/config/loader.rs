//! Configuration file discovery, loading and lock persistence.

use std::fs;
use std::path::{Path, PathBuf};

use toml_edit::{value, DocumentMut, Item, Value};
use tracing::{debug, info};

use crate::environment::{BranchPattern, Environment, Registry};
use crate::error::{DbGuardError, Result};
use crate::operation::OperationKind;

use super::schema::{EnvironmentConfig, RawConfig, Settings};

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "dbguard.toml";

/// A parsed configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// File the configuration was read from.
    pub path: PathBuf,
    /// Global settings.
    pub settings: Settings,
    /// Environments in declaration order.
    pub registry: Registry,
}

impl LoadedConfig {
    /// Directory containing the config file.
    pub fn project_root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Source of configuration for a command.
pub trait ConfigProvider {
    /// Load the configuration, or `None` when there is none.
    fn load(&self) -> Result<Option<LoadedConfig>>;

    /// Persist the explicit lock state of one environment.
    fn set_locked(&self, environment: &str, locked: bool) -> Result<()>;

    /// Where the configuration is looked for, for error messages.
    fn search_root(&self) -> &Path;

    /// Load the configuration, failing when there is none.
    fn require(&self) -> Result<LoadedConfig> {
        self.load()?
            .ok_or_else(|| DbGuardError::ConfigurationMissing {
                searched: self.search_root().to_path_buf(),
            })
    }
}

/// Reads and writes `dbguard.toml`.
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    start: PathBuf,
    explicit: Option<PathBuf>,
}

impl FileConfigProvider {
    /// Discover the config by walking up from `start`.
    pub fn discover(start: &Path) -> Self {
        Self {
            start: start.to_path_buf(),
            explicit: None,
        }
    }

    /// Use a specific config file.
    pub fn at(path: &Path) -> Self {
        Self {
            start: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            explicit: Some(path.to_path_buf()),
        }
    }

    /// Where discovery starts.
    pub fn start(&self) -> &Path {
        &self.start
    }

    /// Path of the config file, if one exists.
    pub fn path(&self) -> Option<PathBuf> {
        match &self.explicit {
            Some(path) => path.is_file().then(|| path.clone()),
            None => find_config(&self.start),
        }
    }

    fn require_path(&self) -> Result<PathBuf> {
        self.path().ok_or_else(|| DbGuardError::ConfigurationMissing {
            searched: self.start.clone(),
        })
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self) -> Result<Option<LoadedConfig>> {
        let Some(path) = self.path() else {
            debug!("No {} found from {}", CONFIG_FILE_NAME, self.start.display());
            return Ok(None);
        };
        load_config_file(&path).map(Some)
    }

    fn set_locked(&self, environment: &str, locked: bool) -> Result<()> {
        let path = self.require_path()?;
        let content = fs::read_to_string(&path)?;
        let updated = set_locked_in_document(&content, &path, environment, locked)?;
        fs::write(&path, updated)?;
        info!(
            "Persisted locked = {} for '{}' in {}",
            locked,
            environment,
            path.display()
        );
        Ok(())
    }

    fn search_root(&self) -> &Path {
        &self.start
    }
}

/// Find `dbguard.toml` in `start` or any parent directory.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Load and parse a config file.
pub fn load_config_file(path: &Path) -> Result<LoadedConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse TOML content into a [`LoadedConfig`].
///
/// # Arguments
///
/// * `content` - The TOML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<LoadedConfig> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| parse_error(source_path, e))?;

    let mut registry = Registry::new();
    for (name, value) in raw.environments {
        let config: EnvironmentConfig = value.try_into().map_err(|e: toml::de::Error| {
            DbGuardError::ConfigParseError {
                path: source_path.to_path_buf(),
                message: format!("environment '{}': {}", name, e.message()),
            }
        })?;
        registry.insert(build_environment(name, config)?)?;
    }

    debug!(
        "Loaded {} environment(s) from {}",
        registry.len(),
        source_path.display()
    );

    Ok(LoadedConfig {
        path: source_path.to_path_buf(),
        settings: raw.settings,
        registry,
    })
}

fn parse_error(path: &Path, e: toml::de::Error) -> DbGuardError {
    DbGuardError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    }
}

/// Validate one environment table and convert it.
fn build_environment(name: String, config: EnvironmentConfig) -> Result<Environment> {
    let invalid = |message: String| DbGuardError::ConfigValidationError { message };

    if let Some(word) = config.confirm_word.as_deref() {
        if word.trim().is_empty() {
            return Err(invalid(format!(
                "environment '{}': confirm_word must not be empty",
                name
            )));
        }
        // Typed answers are trimmed before comparison.
        if word.trim() != word {
            return Err(invalid(format!(
                "environment '{}': confirm_word '{}' must not start or end with whitespace",
                name, word
            )));
        }
    }

    let protected_operations = config
        .protected_operations
        .iter()
        .map(|op| {
            op.parse::<OperationKind>().map_err(|_| {
                invalid(format!(
                    "environment '{}': unknown protected operation '{}' (expected one of: {})",
                    name,
                    op,
                    OperationKind::ALL.map(OperationKind::as_str).join(", ")
                ))
            })
        })
        .collect::<Result<_>>()?;

    Ok(Environment {
        name,
        project_ref: config.project_ref.filter(|r| !r.trim().is_empty()),
        branch_patterns: config
            .git_branches
            .iter()
            .map(|p| BranchPattern::new(p))
            .collect(),
        protected_operations,
        confirm_word: config.confirm_word,
        locked: config.locked,
    })
}

/// Set the `locked` key of one environment in a TOML document.
///
/// Only that key changes; comments and layout elsewhere are kept, and an
/// existing `locked` value keeps its own trailing comment.
fn set_locked_in_document(
    content: &str,
    path: &Path,
    environment: &str,
    locked: bool,
) -> Result<String> {
    let mut doc: DocumentMut =
        content
            .parse()
            .map_err(|e: toml_edit::TomlError| DbGuardError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.message().to_string(),
            })?;

    let env_table = doc
        .get_mut("environments")
        .and_then(Item::as_table_like_mut)
        .and_then(|envs| envs.get_mut(environment))
        .and_then(Item::as_table_like_mut)
        .ok_or_else(|| DbGuardError::ConfigValidationError {
            message: format!(
                "environment '{}' is not defined in {}",
                environment,
                path.display()
            ),
        })?;

    match env_table.get_mut("locked").and_then(Item::as_value_mut) {
        Some(existing) => {
            let decor = existing.decor().clone();
            *existing = Value::from(locked);
            *existing.decor_mut() = decor;
        }
        None => {
            env_table.insert("locked", value(locked));
        }
    }

    Ok(doc.to_string())
}
