use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

use crate::domain::contact::PhoneRule;
use crate::domain::id::IdPolicy;
use crate::errors::AppError;
use crate::storage::StorageMedium;
use crate::storage::file::DEFAULT_STORAGE_DIR;

pub const ENV_STORAGE: &str = "CONTACTS_STORAGE";
pub const ENV_DIR: &str = "CONTACTS_DIR";
pub const ENV_ID_POLICY: &str = "CONTACTS_ID_POLICY";
pub const ENV_PHONE_RULE: &str = "CONTACTS_PHONE_RULE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub medium: StorageMedium,
    pub storage_dir: PathBuf,
    pub id_policy: IdPolicy,
    pub phone_rule: PhoneRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            medium: StorageMedium::default(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            id_policy: IdPolicy::default(),
            phone_rule: PhoneRule::default(),
        }
    }
}

impl Config {
    /// Reads the `CONTACTS_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(medium) = lookup(ENV_STORAGE) {
            config.medium = medium.parse()?;
        }
        if let Some(dir) = lookup(ENV_DIR).filter(|d| !d.trim().is_empty()) {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(policy) = lookup(ENV_ID_POLICY) {
            config.id_policy = policy.parse()?;
        }
        if let Some(rule) = lookup(ENV_PHONE_RULE) {
            config.phone_rule = rule.parse()?;
        }

        Ok(config)
    }
}
