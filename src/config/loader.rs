//! Configuration loader
//!
//! 0. Loads a `.env` file if present (via dotenvy)
//! 1. Reads a single TOML file from `STUDENT_RECORDS_CONFIG_PATH`
//!    (default `config/student-records.toml`)
//! 2. Substitutes allow-listed `${VAR}` / `${VAR:-default}` placeholders
//! 3. Deserializes to [`StudentRecordsConfig`]
//! 4. Validates with the validator library

use super::error::{ConfigResult, ConfigurationError};
use super::StudentRecordsConfig;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Environment variable holding the configuration file path
pub const CONFIG_PATH_ENV: &str = "STUDENT_RECORDS_CONFIG_PATH";

/// Used when `STUDENT_RECORDS_CONFIG_PATH` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/student-records.toml";

/// Environment variable validation rule
#[derive(Debug, Clone)]
struct EnvVarRule {
    name: &'static str,
    description: &'static str,
    pattern: &'static str,
}

/// Variables that may be substituted into the configuration file
fn env_var_allowlist() -> &'static [EnvVarRule] {
    &[
        EnvVarRule {
            name: "DATABASE_URL",
            description: "PostgreSQL connection URL",
            pattern: r"^postgres(ql)?://([a-zA-Z0-9_-]+(:[^@]+)?@)?[a-zA-Z0-9._-]+(:[0-9]+)?/[a-zA-Z0-9_-]+(\?.*)?$",
        },
        EnvVarRule {
            name: "REDIS_URL",
            description: "Redis connection URL",
            pattern: r"^rediss?://([^@\s]*@)?[a-zA-Z0-9._-]+(:[0-9]+)?(/[0-9]+)?$",
        },
        EnvVarRule {
            name: "STUDENT_RECORDS_ENV",
            description: "Environment name (test, development, production)",
            pattern: r"^(test|development|production)$",
        },
        EnvVarRule {
            name: "STUDENT_RECORDS_BIND_ADDRESS",
            description: "Web server bind address (IP:port)",
            pattern: r"^([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}|[a-zA-Z0-9._-]+):[0-9]{1,5}$",
        },
        EnvVarRule {
            name: "STUDENT_RECORDS_DATABASE_BACKEND",
            description: "Record store backend (postgres or memory)",
            pattern: r"^(postgres|postgresql|memory|in-memory)$",
        },
        EnvVarRule {
            name: "STUDENT_RECORDS_CACHE_BACKEND",
            description: "Cache backend (redis, dragonfly, moka, memory)",
            pattern: r"^(redis|dragonfly|moka|memory|in-memory)$",
        },
        EnvVarRule {
            name: "STUDENT_RECORDS_CACHE_TTL_SECONDS",
            description: "Cache entry lifetime in seconds (<= 0 disables expiry)",
            pattern: r"^-?[0-9]{1,10}$",
        },
    ]
}

/// Stateless configuration loading functions
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the path named by `STUDENT_RECORDS_CONFIG_PATH`
    pub fn load_from_env() -> ConfigResult<StudentRecordsConfig> {
        dotenvy::dotenv().ok();

        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        tracing::info!(
            config_path = %config_path,
            environment = %crate::logging::get_environment(),
            "Loading configuration"
        );

        Self::load_from_path(&PathBuf::from(config_path))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> ConfigResult<StudentRecordsConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigurationError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::load_from_str(&contents, &path.display().to_string())?;
        tracing::info!("Configuration loaded successfully from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text, substituting from the process environment
    pub fn load_from_str(contents: &str, source: &str) -> ConfigResult<StudentRecordsConfig> {
        let substituted = Self::substitute_env_vars(contents, |name| std::env::var(name).ok())?;

        let config: StudentRecordsConfig =
            toml::from_str(&substituted).map_err(|e| ConfigurationError::Parse {
                origin: source.to_string(),
                message: e.to_string(),
            })?;

        config
            .validate()
            .map_err(|errors| ConfigurationError::Invalid(format!("{source}: {errors}")))?;

        Ok(config)
    }

    /// Check a substituted value against its allowlist rule
    fn validate_env_var(var_name: &str, value: &str) -> ConfigResult<()> {
        let rule = env_var_allowlist()
            .iter()
            .find(|rule| rule.name == var_name)
            .ok_or_else(|| {
                ConfigurationError::substitution(
                    var_name,
                    format!(
                        "not in the allowlist; allowed variables: {}",
                        env_var_allowlist()
                            .iter()
                            .map(|r| r.name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })?;

        let regex = Regex::new(rule.pattern).map_err(|e| {
            ConfigurationError::substitution(
                var_name,
                format!("invalid validation pattern: {e}"),
            )
        })?;

        if !regex.is_match(value) {
            return Err(ConfigurationError::substitution(
                var_name,
                format!("value does not look like a {}", rule.description),
            ));
        }

        Ok(())
    }

    /// Escape TOML string metacharacters in a substituted value
    fn escape_toml_string(value: &str) -> String {
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Replace `${VAR}` and `${VAR:-default}` placeholders
    ///
    /// Values found through `lookup` must be allow-listed and match their
    /// rule; defaults come from the file itself and are used verbatim. A
    /// placeholder with neither a value nor a default is an error.
    fn substitute_env_vars<F>(content: &str, lookup: F) -> ConfigResult<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let placeholder = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .map_err(|e| ConfigurationError::Invalid(e.to_string()))?;

        let mut failure: Option<ConfigurationError> = None;
        let substituted = placeholder.replace_all(content, |caps: &Captures<'_>| {
            let var_name = &caps[1];
            let default = caps.get(2).map(|m| m.as_str());

            match lookup(var_name) {
                Some(value) => match Self::validate_env_var(var_name, &value) {
                    Ok(()) => {
                        tracing::debug!(variable = var_name, "Substituting from environment");
                        Self::escape_toml_string(&value)
                    }
                    Err(e) => {
                        failure.get_or_insert(e);
                        String::new()
                    }
                },
                None => match default {
                    Some(default) => default.to_string(),
                    None => {
                        failure.get_or_insert(ConfigurationError::substitution(
                            var_name,
                            "not set and no default given",
                        ));
                        String::new()
                    }
                },
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(substituted.into_owned()),
        }
    }
}
