use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::{
    error::StoreError,
    store::{Filter, SortSpec, Store},
};

/// In-process store for local runs and tests. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<(String, String), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        self.documents
            .insert((collection.to_string(), id.to_string()), document);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .documents
            .get(&(collection.to_string(), id.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &SortSpec,
    ) -> Result<Vec<Value>, StoreError> {
        let mut matches: Vec<(String, Value)> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection && filter.matches(entry.value()))
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect();

        // DashMap iteration order is arbitrary; order by id first for determinism
        matches.sort_by(|a, b| a.0.cmp(&b.0));
        let mut documents: Vec<Value> = matches.into_iter().map(|(_, doc)| doc).collect();
        sort.sort(&mut documents);

        Ok(documents)
    }
}
