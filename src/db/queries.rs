use serde_json::Value;
use sqlx::{PgPool, Result};

/// Insert a document or replace the body of an existing one
pub async fn upsert_document(
    pool: &PgPool,
    collection: &str,
    id: &str,
    body: &Value,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO documents (collection, id, body)
        VALUES ($1, $2, $3)
        ON CONFLICT (collection, id)
        DO UPDATE SET
            body = $3,
            updated_at = NOW()
        "#,
    )
    .bind(collection)
    .bind(id)
    .bind(body)
    .execute(pool)
    .await?;

    tracing::debug!("Saved document {}/{}", collection, id);
    Ok(())
}

pub async fn get_document(pool: &PgPool, collection: &str, id: &str) -> Result<Option<Value>> {
    sqlx::query_scalar::<_, Value>("SELECT body FROM documents WHERE collection = $1 AND id = $2")
        .bind(collection)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All documents of a collection whose body contains `filter` (JSONB `@>`)
pub async fn select_documents(
    pool: &PgPool,
    collection: &str,
    filter: &Value,
) -> Result<Vec<Value>> {
    sqlx::query_scalar::<_, Value>(
        r#"
        SELECT body FROM documents
        WHERE collection = $1 AND body @> $2
        ORDER BY id
        "#,
    )
    .bind(collection)
    .bind(filter)
    .fetch_all(pool)
    .await
}
