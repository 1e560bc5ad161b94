use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::document::StoredDocument;
use crate::repositories::DocumentStore;
use crate::utils::errors::AppResult;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn put(&self, document: &StoredDocument) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO company_documents (digest, content_type, size_bytes, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (digest) DO NOTHING
            "#,
        )
        .bind(&document.digest)
        .bind(&document.content_type)
        .bind(document.size_bytes)
        .bind(&document.content)
        .bind(document.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, digest: &str) -> AppResult<Option<StoredDocument>> {
        let result = sqlx::query_as::<_, StoredDocument>(
            "SELECT digest, content_type, size_bytes, content, created_at FROM company_documents WHERE digest = $1",
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }
}
