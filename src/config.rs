//! Run configuration read from the environment at startup.
//!
//! [`Config`] is constructed once at the top of the entry point and passed
//! by parameter to everything that needs it. Library code never reads
//! environment variables itself, so tests can inject arbitrary
//! configurations via [`Config::from_lookup`].

use chrono::NaiveDate;

use crate::error::ChoreError;

/// Environment variable holding the Notion integration token.
pub const ENV_NOTION_TOKEN: &str = "NOTION_TOKEN";
/// Environment variable holding the chore-definition database id.
pub const ENV_CHORES_DATABASE_ID: &str = "CHORES_DATABASE_ID";
/// Environment variable holding the roomie roster database id.
pub const ENV_ROOMIES_DATABASE_ID: &str = "ROOMIES_DATABASE_ID";
/// Environment variable holding the destination to-dos database id.
pub const ENV_TODOS_DATABASE_ID: &str = "TODOS_DATABASE_ID";

/// The fixed calendar date anchoring week zero of the rotation.
///
/// Build-time constant, not environment-provided. Any week works as long
/// as it never changes once the rotation is live.
pub fn rotation_epoch() -> NaiveDate {
    // 2025-12-07 is a valid calendar date, so the unwrap cannot fire.
    NaiveDate::from_ymd_opt(2025, 12, 7).expect("valid epoch date")
}

/// Configuration for one chorewheel run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Notion integration token.
    pub token: String,
    /// Database holding the chore definitions.
    pub chores_database_id: String,
    /// Database holding the roomie roster.
    pub roomies_database_id: String,
    /// Database that receives the created due records.
    pub todos_database_id: String,
}

impl Config {
    /// Read the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ChoreError::Config`] naming every missing variable if any
    /// required value is absent or empty.
    pub fn from_env() -> Result<Self, ChoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as missing. All missing names are reported
    /// together so a misconfigured deployment is fixed in one pass.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing: Vec<&str> = Vec::new();
        let mut require = |name: &'static str| -> String {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let token = require(ENV_NOTION_TOKEN);
        let chores_database_id = require(ENV_CHORES_DATABASE_ID);
        let roomies_database_id = require(ENV_ROOMIES_DATABASE_ID);
        let todos_database_id = require(ENV_TODOS_DATABASE_ID);

        if !missing.is_empty() {
            return Err(ChoreError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            token,
            chores_database_id,
            roomies_database_id,
            todos_database_id,
        })
    }
}
