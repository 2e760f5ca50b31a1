//! Run configuration.
//!
//! Settings come from, in decreasing precedence: command-line flags, an
//! optional TOML file passed with `--config`, the `OFAC_CODES_FILE`
//! environment variable (code table path only) and built-in defaults.
//!
//! ```toml
//! data_source = "OFAC"
//! codes_file = "reference/ofac_codes.csv"
//! state_codes_file = "reference/states.csv"
//! example_cap = 1000000
//! sample_seed = 42
//! suggest_new_codes = false
//! core_only = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use sdn_codes::TableOptions;
use sdn_transform::DEFAULT_DATA_SOURCE;

/// Environment variable naming the code table.
pub const CODES_FILE_ENV: &str = "OFAC_CODES_FILE";

/// Code table used when nothing else names one.
pub const DEFAULT_CODES_FILE: &str = "ofac_codes.csv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of a `--config` file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub data_source: Option<String>,
    pub codes_file: Option<PathBuf>,
    pub state_codes_file: Option<PathBuf>,
    pub example_cap: Option<usize>,
    pub sample_seed: Option<u64>,
    pub suggest_new_codes: Option<bool>,
    pub core_only: Option<bool>,
}

impl RunConfig {
    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or contains unknown or mistyped keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line for `convert`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub codes_file: Option<PathBuf>,
    pub state_codes_file: Option<PathBuf>,
    pub core_only: bool,
    pub suggest_new_codes: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_source: String,
    pub codes_file: PathBuf,
    pub state_codes_file: Option<PathBuf>,
    pub table: TableOptions,
    pub suggest_new_codes: bool,
    pub core_only: bool,
}

impl Settings {
    /// Merges flags, file config and the code table environment variable.
    /// Boolean flags can only switch a feature on.
    pub fn resolve(cli: &CliOverrides, config: &RunConfig, env_codes_file: Option<PathBuf>) -> Self {
        let defaults = TableOptions::default();
        Self {
            data_source: config
                .data_source
                .clone()
                .filter(|source| !source.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string()),
            codes_file: resolve_codes_file(cli.codes_file.as_deref(), config, env_codes_file),
            state_codes_file: cli
                .state_codes_file
                .clone()
                .or_else(|| config.state_codes_file.clone()),
            table: TableOptions {
                example_cap: config.example_cap.unwrap_or(defaults.example_cap),
                sample_seed: config.sample_seed.unwrap_or(defaults.sample_seed),
            },
            suggest_new_codes: cli.suggest_new_codes || config.suggest_new_codes.unwrap_or(false),
            core_only: cli.core_only || config.core_only.unwrap_or(false),
        }
    }
}

/// Code table path: flag, then config file, then environment, then default.
pub fn resolve_codes_file(
    cli: Option<&Path>,
    config: &RunConfig,
    env_codes_file: Option<PathBuf>,
) -> PathBuf {
    cli.map(Path::to_path_buf)
        .or_else(|| config.codes_file.clone())
        .or(env_codes_file.filter(|path| !path.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CODES_FILE))
}

/// `OFAC_CODES_FILE` from the process environment.
pub fn codes_file_from_env() -> Option<PathBuf> {
    std::env::var_os(CODES_FILE_ENV).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config_beats_env() {
        let config = RunConfig {
            codes_file: Some(PathBuf::from("from_config.csv")),
            ..RunConfig::default()
        };
        let env = Some(PathBuf::from("from_env.csv"));
        assert_eq!(
            resolve_codes_file(Some(Path::new("from_flag.csv")), &config, env.clone()),
            PathBuf::from("from_flag.csv")
        );
        assert_eq!(
            resolve_codes_file(None, &config, env.clone()),
            PathBuf::from("from_config.csv")
        );
        assert_eq!(
            resolve_codes_file(None, &RunConfig::default(), env),
            PathBuf::from("from_env.csv")
        );
        assert_eq!(
            resolve_codes_file(None, &RunConfig::default(), None),
            PathBuf::from(DEFAULT_CODES_FILE)
        );
    }

    #[test]
    fn parses_toml_and_applies_defaults() {
        let config = RunConfig::from_toml_str(
            "data_source = \"SDN\"\nexample_cap = 50\ncore_only = true\n",
            Path::new("run.toml"),
        )
        .unwrap();
        let settings = Settings::resolve(&CliOverrides::default(), &config, None);
        assert_eq!(settings.data_source, "SDN");
        assert_eq!(settings.table.example_cap, 50);
        assert_eq!(settings.table.sample_seed, TableOptions::default().sample_seed);
        assert!(settings.core_only);
        assert!(!settings.suggest_new_codes);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RunConfig::from_toml_str("codes = \"x.csv\"\n", Path::new("run.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn flags_switch_features_on() {
        let cli = CliOverrides {
            suggest_new_codes: true,
            ..CliOverrides::default()
        };
        let config = RunConfig {
            core_only: Some(false),
            ..RunConfig::default()
        };
        let settings = Settings::resolve(&cli, &config, None);
        assert!(settings.suggest_new_codes);
        assert!(!settings.core_only);
        assert_eq!(settings.data_source, "OFAC");
    }
}
