use super::Database;
use super::DOCUMENTS_TABLE;
use crate::Result;

/// DDL for the documents table with a vector column of `dimension` floats
pub(super) fn create_table_sql(dimension: usize) -> String {
    format!(
        r"
        CREATE TABLE {DOCUMENTS_TABLE} (
            id SERIAL PRIMARY KEY,
            content TEXT NOT NULL,
            embedding VECTOR({dimension}) NOT NULL
        )
        "
    )
}

impl Database {
    /// Check if the documents table exists
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = 'public'
                AND table_name = $1
            )
            ",
        )
        .bind(DOCUMENTS_TABLE)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Drop and recreate the documents table.
    ///
    /// Enables the pgvector extension first; the role needs permission to do so
    /// unless the extension is already installed.
    pub async fn reset_schema(&self) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {DOCUMENTS_TABLE}"))
            .execute(&self.pool)
            .await?;

        sqlx::query(&create_table_sql(self.dimension))
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recreated table {} with VECTOR({})",
            DOCUMENTS_TABLE,
            self.dimension
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql_uses_dimension() {
        let sql = create_table_sql(1536);
        assert!(sql.contains("CREATE TABLE documents"));
        assert!(sql.contains("id SERIAL PRIMARY KEY"));
        assert!(sql.contains("embedding VECTOR(1536) NOT NULL"));
    }
}
