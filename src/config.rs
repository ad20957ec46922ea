//! Configuration for the authorization layer.
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)

use std::env;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Baseline role name used when nothing else is configured.
pub const DEFAULT_BASELINE_ROLE: &str = "USER";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Role implicitly present in every authenticated identity's granted set
    /// and required by protected fields that bind no role of their own.
    pub baseline_role: Role,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            baseline_role: Role::new(DEFAULT_BASELINE_ROLE),
        }
    }
}

impl AuthzConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let baseline = env::var("AUTHZ_BASELINE_ROLE")
            .unwrap_or_else(|_| DEFAULT_BASELINE_ROLE.to_string());
        if baseline.trim().is_empty() {
            bail!("AUTHZ_BASELINE_ROLE must not be empty");
        }

        Ok(Self {
            baseline_role: Role::new(baseline),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // env::set_var is not thread-safe when tests run in parallel, so every
    // test touching the environment is serialized.

    #[test]
    #[serial]
    fn test_config_defaults() {
        env::remove_var("AUTHZ_BASELINE_ROLE");

        let config = AuthzConfig::from_env().unwrap();
        assert_eq!(config.baseline_role, Role::new(DEFAULT_BASELINE_ROLE));
    }

    #[test]
    #[serial]
    fn test_baseline_role_override() {
        env::set_var("AUTHZ_BASELINE_ROLE", "MEMBER");

        let config = AuthzConfig::from_env().unwrap();
        assert_eq!(config.baseline_role, Role::new("MEMBER"));

        env::remove_var("AUTHZ_BASELINE_ROLE");
    }

    #[test]
    #[serial]
    fn test_empty_baseline_role_rejected() {
        env::set_var("AUTHZ_BASELINE_ROLE", "  ");

        assert!(AuthzConfig::from_env().is_err());

        env::remove_var("AUTHZ_BASELINE_ROLE");
    }
}
