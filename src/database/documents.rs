use async_trait::async_trait;
use pgvector::Vector;

use super::Database;
use super::DOCUMENTS_TABLE;
use crate::config::Backend;
use crate::config::DistanceMetric;
use crate::embeddings::client::check_dimension;
use crate::models::RetrievedDocument;
use crate::rag::VectorStore;
use crate::Result;

#[derive(sqlx::FromRow)]
struct NearestRow {
    id: i32,
    content: String,
    distance: f64,
}

/// Nearest-neighbour query ordered by the metric's pgvector operator
pub(super) fn nearest_sql(distance: DistanceMetric) -> String {
    let op = distance.pgvector_operator();
    format!(
        r"
        SELECT id, content, (embedding {op} $1)::float8 AS distance
        FROM {DOCUMENTS_TABLE}
        ORDER BY embedding {op} $1
        LIMIT 1
        "
    )
}

impl Database {
    /// Insert one passage, returning its serial id
    pub async fn insert_document(&self, content: &str, embedding: &[f32]) -> Result<i32> {
        let embedding = check_dimension(self.dimension, embedding.to_vec())?;

        let id = sqlx::query_scalar::<_, i32>(&format!(
            "INSERT INTO {DOCUMENTS_TABLE} (content, embedding) VALUES ($1, $2) RETURNING id"
        ))
        .bind(content)
        .bind(Vector::from(embedding))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Closest passage to `embedding`
    pub async fn nearest_document(&self, embedding: &[f32]) -> Result<Option<RetrievedDocument>> {
        let embedding = check_dimension(self.dimension, embedding.to_vec())?;

        let row = sqlx::query_as::<_, NearestRow>(&nearest_sql(self.distance))
            .bind(Vector::from(embedding))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| RetrievedDocument {
            id: r.id.to_string(),
            content: r.content,
            distance: r.distance,
        }))
    }

    pub async fn count_documents(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {DOCUMENTS_TABLE}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl VectorStore for Database {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn reset(&self) -> Result<()> {
        self.reset_schema().await
    }

    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<String> {
        Ok(self.insert_document(content, embedding).await?.to_string())
    }

    async fn nearest(&self, embedding: &[f32]) -> Result<Option<RetrievedDocument>> {
        self.nearest_document(embedding).await
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.count_documents().await? as usize)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_sql_per_metric() {
        let l2 = nearest_sql(DistanceMetric::L2);
        assert!(l2.contains("ORDER BY embedding <-> $1"));
        assert!(l2.contains("LIMIT 1"));

        assert!(nearest_sql(DistanceMetric::Cosine).contains("embedding <=> $1"));
        assert!(nearest_sql(DistanceMetric::InnerProduct).contains("embedding <#> $1"));
    }

    /// Runs against `DATABASE_URL`; needs the pgvector extension available.
    #[tokio::test]
    #[ignore = "Requires PostgreSQL with pgvector"]
    async fn test_reset_insert_nearest_roundtrip() {
        let url = std::env::var("DATABASE_URL").unwrap();
        let pool = sqlx::PgPool::connect(&url).await.unwrap();
        let db = Database::new(pool, 3, DistanceMetric::L2);

        db.reset().await.unwrap();
        assert!(db.is_schema_initialized().await.unwrap());
        assert!(db.nearest(&[1.0, 0.0, 0.0]).await.unwrap().is_none());

        db.insert("near", &[1.0, 0.0, 0.0]).await.unwrap();
        db.insert("far", &[0.0, 0.0, 5.0]).await.unwrap();

        let hit = db.nearest(&[0.9, 0.1, 0.0]).await.unwrap().unwrap();
        assert_eq!(hit.content, "near");
        assert_eq!(db.count().await.unwrap(), 2);

        db.reset().await.unwrap();
        assert_eq!(db.count().await.unwrap(), 0);
        db.close().await;
    }
}
