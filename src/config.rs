//! Runtime configuration.
//!
//! Values are read in three layers, each one overriding the last:
//! - built-in defaults
//! - a `.env` file in the working directory and the process environment
//! - command line flags

use std::path::PathBuf;

use crate::cli::parsers::CliParser;

pub const DATABASE_FILE_VAR: &str = "TABULA_DATABASE_FILE";
pub const LOG_VAR: &str = "TABULA_LOG";
pub const AUTOSAVE_VAR: &str = "TABULA_AUTOSAVE";

const DEFAULT_DATABASE_FILE: &str = "tabula.json";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_file: PathBuf,
    pub log_filter: String,
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_file: PathBuf::from(DEFAULT_DATABASE_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            autosave: false,
        }
    }
}

impl Config {
    pub fn load(args: &CliParser) -> Result<Config, dotenvy::Error> {
        //! Build the configuration for this process.
        //!
        //! A missing `.env` file is fine, a malformed one is not.

        if let Err(error) = dotenvy::dotenv() {
            if !error.not_found() {
                return Err(error);
            }
        }

        Ok(Config::from_lookup(|key| std::env::var(key).ok(), args))
    }

    pub fn from_lookup<F>(lookup: F, args: &CliParser) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(file) = lookup(DATABASE_FILE_VAR).filter(|file| !file.trim().is_empty()) {
            config.database_file = PathBuf::from(file);
        }
        if let Some(filter) = lookup(LOG_VAR).filter(|filter| !filter.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(autosave) = lookup(AUTOSAVE_VAR) {
            config.autosave = matches!(
                autosave.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(file) = &args.file {
            config.database_file = file.clone();
        }
        if let Some(filter) = &args.log {
            config.log_filter = filter.clone();
        }

        config
    }
}
