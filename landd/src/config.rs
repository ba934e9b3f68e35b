use std::{env, path::PathBuf, str::FromStr};

use thiserror::Error;

use land_ledger::config::{DEFAULT_BOOTSTRAP_ADMIN, DEFAULT_STATE_DIR, LedgerConfig};
use registry_types::Principal;

const STATE_DIR_ENV: &str = "LANDD_STATE_DIR";
const BOOTSTRAP_ADMIN_ENV: &str = "LANDD_BOOTSTRAP_ADMIN";

/// Deployment target for the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::UnknownEnvironment {
                value: other.to_string(),
            }),
        }
    }
}

/// Minimal configuration blob assembled at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub ledger: LedgerConfig,
}

impl AppConfig {
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        Ok(Self {
            env,
            ledger: LedgerConfig::new(state_dir_for(env), bootstrap_admin_for(env)?),
        })
    }

    pub fn env_label(&self) -> &'static str {
        match self.env {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

fn state_dir_for(env: Environment) -> PathBuf {
    if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match env {
        Environment::Dev => PathBuf::from(DEFAULT_STATE_DIR),
        Environment::Prod => PathBuf::from("/var/lib/landd/state"),
    }
}

/// Dev falls back to a well-known admin; prod must name one explicitly.
fn bootstrap_admin_for(env: Environment) -> Result<Principal, ConfigError> {
    match env {
        Environment::Dev => Ok(Principal::from(
            std::env::var(BOOTSTRAP_ADMIN_ENV)
                .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_ADMIN.to_string())
                .as_str(),
        )),
        Environment::Prod => Ok(Principal::from(
            require_env(BOOTSTRAP_ADMIN_ENV)?.as_str(),
        )),
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv {
        key: key.to_string(),
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown environment '{value}' (expected 'dev' or 'prod')")]
    UnknownEnvironment { value: String },
    #[error("missing environment variable {key}")]
    MissingEnv { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(Environment::from_str("dev").unwrap(), Environment::Dev);
        assert_eq!(Environment::from_str("PROD").unwrap(), Environment::Prod);
        assert!(matches!(
            Environment::from_str("staging"),
            Err(ConfigError::UnknownEnvironment { .. })
        ));
    }
}
