//! Company Storage Abstraction
//!
//! Company records are keyed by CNPJ and saved with upsert semantics.
//! Implementations: in-memory (default, tests) and Postgres (`database` feature).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::Company;

#[cfg(feature = "database")]
pub mod postgres;

#[cfg(feature = "database")]
pub use postgres::PgCompanyStore;

/// Error type for company storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Persists company records
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Create or replace the record with `company.id`
    async fn save_company(&self, company: &Company) -> Result<(), StoreError>;
}

/// In-memory company store
#[derive(Default)]
pub struct InMemoryCompanyStore {
    companies: RwLock<HashMap<String, Company>>,
}

impl InMemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Company> {
        self.companies.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.companies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.companies.read().await.is_empty()
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn save_company(&self, company: &Company) -> Result<(), StoreError> {
        let mut companies = self.companies.write().await;
        companies.insert(company.id.clone(), company.clone());
        Ok(())
    }
}
