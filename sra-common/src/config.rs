//! Configuration loading and directory resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Optional settings read from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub attrakdiff_dir: Option<String>,
    pub scm_dir: Option<String>,
    pub output_dir: Option<String>,
}

/// Resolved pipeline directories
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory of per-application AttrakDiff CSV files
    pub attrakdiff_dir: PathBuf,
    /// Directory of per-application SCM CSV files
    pub scm_dir: PathBuf,
    /// Directory all output files are written to (created on demand)
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Resolve all three directories with per-directory priority order:
    /// 1. Command-line argument (highest priority)
    /// 2. Environment variable
    /// 3. TOML config file
    /// 4. Compiled default (fallback)
    pub fn resolve(
        cli_attrakdiff: Option<&str>,
        cli_scm: Option<&str>,
        cli_output: Option<&str>,
    ) -> Self {
        let toml_config = load_toml_config().unwrap_or_default();

        Self {
            attrakdiff_dir: resolve_dir(
                cli_attrakdiff,
                "SRA_ATTRAKDIFF_DIR",
                toml_config.attrakdiff_dir.as_deref(),
                "attrakdiff",
            ),
            scm_dir: resolve_dir(
                cli_scm,
                "SRA_SCM_DIR",
                toml_config.scm_dir.as_deref(),
                "scm",
            ),
            output_dir: resolve_dir(
                cli_output,
                "SRA_OUTPUT_DIR",
                toml_config.output_dir.as_deref(),
                "output",
            ),
        }
    }

    /// Validate that both input directories exist.
    ///
    /// Missing input directories are the only fatal error path of a run;
    /// everything downstream degrades per application instead.
    pub fn validate_inputs(&self) -> Result<()> {
        for dir in [&self.attrakdiff_dir, &self.scm_dir] {
            if !dir.is_dir() {
                return Err(Error::Config(format!(
                    "Input directory not found: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

/// Resolve one directory through the priority chain
fn resolve_dir(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
    default: &str,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = toml_value {
        return PathBuf::from(path);
    }

    // Priority 4: Compiled default (relative to the working directory)
    PathBuf::from(default)
}

/// Load the TOML config file if one exists at a platform config path
fn load_toml_config() -> Option<TomlConfig> {
    let path = config_file_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

/// Get configuration file path for the platform
///
/// Linux checks `~/.config/sra/config.toml` first, then
/// `/etc/sra/config.toml`. Other platforms use the user config directory.
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("sra").join("config.toml"));

    if let Some(path) = &user_config {
        if path.exists() {
            return user_config;
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/sra/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_wins_over_default() {
        let path = resolve_dir(Some("/data/attrakdiff"), "SRA_TEST_UNSET_VAR", None, "attrakdiff");
        assert_eq!(path, PathBuf::from("/data/attrakdiff"));
    }

    #[test]
    fn test_env_var_wins_over_toml() {
        std::env::set_var("SRA_TEST_ENV_DIR", "/from/env");
        let path = resolve_dir(None, "SRA_TEST_ENV_DIR", Some("/from/toml"), "scm");
        assert_eq!(path, PathBuf::from("/from/env"));
        std::env::remove_var("SRA_TEST_ENV_DIR");
    }

    #[test]
    fn test_toml_wins_over_default() {
        let path = resolve_dir(None, "SRA_TEST_UNSET_VAR", Some("/from/toml"), "scm");
        assert_eq!(path, PathBuf::from("/from/toml"));
    }

    #[test]
    fn test_default_fallback() {
        let path = resolve_dir(None, "SRA_TEST_UNSET_VAR", None, "output");
        assert_eq!(path, PathBuf::from("output"));
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let config = PipelineConfig {
            attrakdiff_dir: PathBuf::from("/nonexistent/attrakdiff"),
            scm_dir: PathBuf::from("/nonexistent/scm"),
            output_dir: PathBuf::from("/tmp"),
        };
        assert!(config.validate_inputs().is_err());
    }
}
