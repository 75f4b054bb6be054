//! Keyed document persistence.
//!
//! The engine only needs `save` (upsert by id), `get` and `query` with
//! read-after-write visibility. Typed access goes through [`Entity`] and
//! [`StoreExt`].

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn save(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &SortSpec,
    ) -> Result<Vec<Value>, StoreError>;
}

/// A document type with a fixed collection and its own id
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

#[async_trait]
pub trait StoreExt: Store {
    async fn save_entity<E: Entity>(&self, entity: &E) -> Result<(), StoreError> {
        let document = serde_json::to_value(entity)?;
        self.save(E::COLLECTION, entity.id(), document).await
    }

    async fn get_entity<E: Entity>(&self, id: &str) -> Result<Option<E>, StoreError> {
        match self.get(E::COLLECTION, id).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    async fn query_entities<E: Entity>(
        &self,
        filter: &Filter,
        sort: &SortSpec,
    ) -> Result<Vec<E>, StoreError> {
        self.query(E::COLLECTION, filter, sort)
            .await?
            .into_iter()
            .map(|document| serde_json::from_value(document).map_err(StoreError::from))
            .collect()
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

/// Top-level field equalities that a document must all satisfy
#[derive(Debug, Clone, Default)]
pub struct Filter {
    equals: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.equals.push((field.to_string(), value.into()));
        self
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.equals
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }

    /// The filter as a JSON object, usable with Postgres `@>` containment
    pub fn to_object(&self) -> Value {
        let map: Map<String, Value> = self.equals.iter().cloned().collect();
        Value::Object(map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Ordered sort keys; later keys break ties of earlier ones
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    keys: Vec<(String, Order)>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(mut self, field: &str, order: Order) -> Self {
        self.keys.push((field.to_string(), order));
        self
    }

    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for (field, order) in &self.keys {
            let ordering = compare_values(a.get(field), b.get(field));
            let ordering = match order {
                Order::Asc => ordering,
                Order::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable sort, so documents equal on every key keep their input order
    pub fn sort(&self, documents: &mut [Value]) {
        documents.sort_by(|a, b| self.compare(a, b));
    }
}

/// Missing and null sort first, then booleans, numbers, strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
