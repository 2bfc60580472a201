use sqlx::PgPool;

use crate::config::DistanceMetric;
use crate::Result;

mod documents;
mod schema;

/// Table holding the seeded passages
pub const DOCUMENTS_TABLE: &str = "documents";

/// PostgreSQL + pgvector document store
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    dimension: usize,
    distance: DistanceMetric,
}

impl Database {
    #[must_use]
    pub const fn new(pool: PgPool, dimension: usize, distance: DistanceMetric) -> Self {
        Self {
            pool,
            dimension,
            distance,
        }
    }

    /// Create a new database instance from configuration
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database.connection_timeout,
            ));

        let pool = pool_options.connect(config.database_url()).await?;

        tracing::info!(
            "Database pool configured: max_connections={}",
            config.database.max_connections
        );

        Ok(Self::new(
            pool,
            config.embedding_dimension(),
            config.distance(),
        ))
    }

    /// Width of the `embedding` vector column
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub const fn distance(&self) -> DistanceMetric {
        self.distance
    }
}
