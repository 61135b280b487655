pub mod file;
pub mod memory;
pub mod persistence;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;
use crate::errors::{AppError, PersistenceError};

pub use persistence::{PersistenceAdapter, STORAGE_KEY};

/// A string key/value slot store, the shape of browser local storage.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMedium {
    Mem,
    #[default]
    File,
}

impl StorageMedium {
    pub fn is_mem(&self) -> bool {
        matches!(self, StorageMedium::Mem)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, StorageMedium::File)
    }
}

impl fmt::Display for StorageMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_mem() { "mem" } else { "file" })
    }
}

impl FromStr for StorageMedium {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mem" | "memory" => Ok(StorageMedium::Mem),
            "file" | "json" => Ok(StorageMedium::File),
            other => Err(AppError::Config(format!(
                "'{other}' is not a recognized storage medium (file, mem)"
            ))),
        }
    }
}

pub fn parse_storage(config: &Config) -> Box<dyn KeyValueStorage> {
    match config.medium {
        StorageMedium::Mem => Box::new(memory::MemStorage::new()),
        StorageMedium::File => Box::new(file::FileStorage::new(&config.storage_dir)),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Keys become file names, so only a conservative character set is allowed.
pub fn check_key(key: &str) -> Result<(), PersistenceError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_parses_known_names() -> Result<(), AppError> {
        assert_eq!("mem".parse::<StorageMedium>()?, StorageMedium::Mem);
        assert_eq!("FILE".parse::<StorageMedium>()?, StorageMedium::File);
        assert_eq!(StorageMedium::default().to_string(), "file");
        assert!("txt".parse::<StorageMedium>().is_err());
        Ok(())
    }

    #[test]
    fn keys_are_restricted() {
        assert!(check_key("contacts").is_ok());
        assert!(check_key("contacts_v2-backup").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("../contacts").is_err());
        assert!(check_key("a b").is_err());
    }

    #[test]
    fn parse_storage_follows_config_medium() {
        let config = Config {
            medium: StorageMedium::Mem,
            ..Config::default()
        };

        assert_eq!(parse_storage(&config).get_medium(), "mem");
    }
}
