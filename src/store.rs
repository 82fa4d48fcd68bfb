use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::company::CompanyProfile;
use crate::inventory::ledger::Ledger;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed book file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Everything one book file holds: the optional company record plus the full
/// ledger state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockBook {
    #[serde(default)]
    pub company: Option<CompanyProfile>,
    pub ledger: Ledger,
}

/// Injected persistence handle. Callers hold a store value instead of
/// sharing process-wide connection state.
pub trait LedgerStore {
    fn load(&self) -> Result<StockBook, StoreError>;
    fn save(&self, book: &StockBook) -> Result<(), StoreError>;
}

/// Single-file JSON persistence. Saves write a sibling tmp file and rename
/// it over the target, so a failed save leaves the previous state intact.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> JsonStore {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        let ext = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(existing) => format!("{}.tmp", existing),
            None => "tmp".to_string(),
        };
        tmp.set_extension(ext);
        tmp
    }
}

impl LedgerStore for JsonStore {
    fn load(&self) -> Result<StockBook, StoreError> {
        let data = fs::read_to_string(&self.path)?;

        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, book: &StockBook) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(book)?;

        let tmp = self.tmp_path();
        let mut file = fs::File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}
