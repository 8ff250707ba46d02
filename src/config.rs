use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::api::DEFAULT_API_URL;
use crate::selectors::SelectorTable;

pub const API_URL_VAR: &str = "RESDEX_API_URL";
pub const DB_VAR: &str = "RESDEX_DB";
pub const SELECTORS_VAR: &str = "RESDEX_SELECTORS";

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub db_path: Option<PathBuf>,
    pub selectors: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub db_path: PathBuf,
    pub selectors: Option<PathBuf>,
}

impl Config {
    pub fn resolve(overrides: Overrides) -> Self {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    fn resolve_with(overrides: Overrides, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: overrides
                .api_url
                .or_else(|| var(API_URL_VAR))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            db_path: overrides
                .db_path
                .or_else(|| var(DB_VAR).map(PathBuf::from))
                .unwrap_or_else(default_db_path),
            selectors: overrides.selectors.or_else(|| var(SELECTORS_VAR).map(PathBuf::from)),
        }
    }

    pub fn selector_table(&self) -> Result<SelectorTable> {
        match &self.selectors {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading selector overrides");
                SelectorTable::load(path)
            }
            None => Ok(SelectorTable::default()),
        }
    }
}

pub fn default_db_path() -> PathBuf {
    match directories::ProjectDirs::from("", "", "resdex") {
        Some(dirs) => dirs.data_dir().join("resdex.db"),
        None => PathBuf::from("resdex.db"),
    }
}
