//! Postgres-backed company store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{CompanyStore, StoreError};
use crate::models::Company;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(Box::new(e))
    }
}

pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `companies` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS companies (
                   id TEXT PRIMARY KEY,
                   name TEXT NOT NULL,
                   updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
               )"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_company(&self, id: &str) -> Result<Option<Company>, StoreError> {
        let row = sqlx::query_as::<_, (String, String)>(
            r#"SELECT id, name FROM companies WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, name)| Company { id, name }))
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn save_company(&self, company: &Company) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO companies (id, name)
               VALUES ($1, $2)
               ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, updated_at = NOW()"#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
