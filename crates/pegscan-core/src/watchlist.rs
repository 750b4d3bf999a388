//! Persisted ticker lists.
//!
//! A store directory holds `last_tickers.txt` (the most recently used list,
//! comma-joined) and `saved_lists.json` (named lists).

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CoreError, TickerSymbol, ValidationError};

pub const LAST_TICKERS_FILE: &str = "last_tickers.txt";
pub const SAVED_LISTS_FILE: &str = "saved_lists.json";

pub type SavedLists = BTreeMap<String, Vec<TickerSymbol>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistStore {
    root: PathBuf,
}

impl WatchlistStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn last_path(&self) -> PathBuf {
        self.root.join(LAST_TICKERS_FILE)
    }

    fn lists_path(&self) -> PathBuf {
        self.root.join(SAVED_LISTS_FILE)
    }

    /// Last used tickers. A missing file is an empty list; entries that are
    /// not valid tickers are dropped.
    pub fn load_last(&self) -> Result<Vec<TickerSymbol>, CoreError> {
        let Some(contents) = read_optional(&self.last_path())? else {
            return Ok(Vec::new());
        };

        let mut tickers = Vec::new();
        for entry in contents.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match TickerSymbol::parse(entry) {
                Ok(ticker) if !tickers.contains(&ticker) => tickers.push(ticker),
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(entry, error = %error, "skipping invalid stored ticker");
                }
            }
        }
        Ok(tickers)
    }

    pub fn save_last(&self, tickers: &[TickerSymbol]) -> Result<(), CoreError> {
        let joined = tickers
            .iter()
            .map(TickerSymbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.write(&self.last_path(), &joined)
    }

    pub fn load_lists(&self) -> Result<SavedLists, CoreError> {
        match read_optional(&self.lists_path())? {
            Some(contents) if !contents.trim().is_empty() => Ok(serde_json::from_str(&contents)?),
            _ => Ok(SavedLists::new()),
        }
    }

    pub fn list_names(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.load_lists()?.into_keys().collect())
    }

    pub fn get_list(&self, name: &str) -> Result<Vec<TickerSymbol>, CoreError> {
        let name = normalize_name(name)?;
        self.load_lists()?
            .remove(&name)
            .ok_or_else(|| ValidationError::UnknownList { name }.into())
    }

    /// Create or replace the list called `name`.
    pub fn save_list(&self, name: &str, tickers: &[TickerSymbol]) -> Result<(), CoreError> {
        let name = normalize_name(name)?;
        let mut lists = self.load_lists()?;
        lists.insert(name, tickers.to_vec());
        self.write_lists(&lists)
    }

    /// Remove the list called `name`. Returns whether it existed.
    pub fn delete_list(&self, name: &str) -> Result<bool, CoreError> {
        let name = normalize_name(name)?;
        let mut lists = self.load_lists()?;
        if lists.remove(&name).is_none() {
            return Ok(false);
        }
        self.write_lists(&lists)?;
        Ok(true)
    }

    fn write_lists(&self, lists: &SavedLists) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(lists)?;
        self.write(&self.lists_path(), &json)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), CoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(path, contents)?;
        tracing::debug!(path = %path.display(), "watchlist file written");
        Ok(())
    }
}

/// Apply a removal then an addition to `current`.
///
/// A single `ALL` (any case) in `remove` clears the list. Added tickers
/// already present are skipped, so order of first appearance is kept.
pub fn edit_tickers(
    current: &[TickerSymbol],
    remove: &[String],
    add: &[TickerSymbol],
) -> Vec<TickerSymbol> {
    let clear = matches!(remove, [only] if only.trim().eq_ignore_ascii_case("all"));

    let mut edited: Vec<TickerSymbol> = if clear {
        Vec::new()
    } else {
        current
            .iter()
            .filter(|ticker| {
                !remove
                    .iter()
                    .any(|name| name.trim().eq_ignore_ascii_case(ticker.as_str()))
            })
            .cloned()
            .collect()
    };

    for ticker in add {
        if !edited.contains(ticker) {
            edited.push(ticker.clone());
        }
    }
    edited
}

fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyListName);
    }
    Ok(trimmed.to_owned())
}

fn read_optional(path: &Path) -> Result<Option<String>, CoreError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}
