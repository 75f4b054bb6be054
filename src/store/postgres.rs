use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    db::queries,
    error::StoreError,
    store::{Filter, SortSpec, Store},
};

/// Postgres-backed store keeping every entity as a JSONB document.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn save(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        queries::upsert_document(&self.pool, collection, id, &document).await?;
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(queries::get_document(&self.pool, collection, id).await?)
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &SortSpec,
    ) -> Result<Vec<Value>, StoreError> {
        let mut documents =
            queries::select_documents(&self.pool, collection, &filter.to_object()).await?;
        // Sorting stays in Rust so both backends order documents identically
        sort.sort(&mut documents);
        Ok(documents)
    }
}
