use std::sync::Arc;

use tracing::debug;

use super::TypeCatalog;
use super::duckdb::DuckDbCatalog;
use super::postgres::PostgresCatalog;
use crate::error::{AnalyzeError, Result};

/// Looks up type catalogs by dialect name.
#[derive(Debug, Default)]
pub struct DialectRegistry {
    /// Registration order is kept for error messages.
    catalogs: Vec<Arc<dyn TypeCatalog>>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry containing every built-in dialect.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(PostgresCatalog::try_new()?));
        registry.register(Arc::new(DuckDbCatalog::try_new()?));
        Ok(registry)
    }

    /// Register a catalog, replacing any existing catalog for the same
    /// dialect.
    pub fn register(&mut self, catalog: Arc<dyn TypeCatalog>) {
        let existing = self
            .catalogs
            .iter()
            .position(|c| c.dialect().eq_ignore_ascii_case(catalog.dialect()));

        match existing {
            Some(idx) => {
                debug!(dialect = catalog.dialect(), "replacing type catalog");
                self.catalogs[idx] = catalog;
            }
            None => self.catalogs.push(catalog),
        }
    }

    /// Get the catalog for a dialect, ignoring case and surrounding
    /// whitespace.
    pub fn get(&self, dialect: &str) -> Result<Arc<dyn TypeCatalog>> {
        let dialect = dialect.trim();
        self.catalogs
            .iter()
            .find(|c| c.dialect().eq_ignore_ascii_case(dialect))
            .cloned()
            .ok_or_else(|| AnalyzeError::UnsupportedDialect {
                name: dialect.to_string(),
                supported: self.dialects().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn dialects(&self) -> impl Iterator<Item = &str> {
        self.catalogs.iter().map(|c| c.dialect())
    }
}
