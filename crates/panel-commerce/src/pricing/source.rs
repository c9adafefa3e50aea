//! Where price tables come from.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::CommerceError;
use crate::pricing::{PriceRow, PriceTable};

/// An asynchronous supplier of the price table.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch and decode the whole table.
    async fn fetch(&self) -> Result<PriceTable, CommerceError>;

    /// Short description for logs.
    fn describe(&self) -> String {
        "price source".to_string()
    }
}

/// A table already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    table: PriceTable,
}

impl StaticSource {
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self {
            table: PriceTable::new(rows),
        }
    }
}

#[async_trait]
impl PriceSource for StaticSource {
    async fn fetch(&self) -> Result<PriceTable, CommerceError> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        format!("static table ({} rows)", self.table.len())
    }
}

/// A JSON array of rows on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriceSource for JsonFileSource {
    async fn fetch(&self) -> Result<PriceTable, CommerceError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CommerceError::PriceSource(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        PriceTable::from_json(&json)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
