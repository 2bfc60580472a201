//! Storage seam shared by the Postgres and Chroma backends

use async_trait::async_trait;

use crate::config::Backend;
use crate::errors::Result;
use crate::models::RetrievedDocument;

/// Persists (text, embedding) pairs and answers nearest-neighbour lookups
#[async_trait]
pub trait VectorStore: Send + Sync {
    fn backend(&self) -> Backend;

    /// Drop and recreate storage; afterwards the store is empty
    async fn reset(&self) -> Result<()>;

    /// Store one passage with its precomputed embedding, returning its id
    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<String>;

    /// Single closest document to `embedding`, or `None` when storage is empty
    async fn nearest(&self, embedding: &[f32]) -> Result<Option<RetrievedDocument>>;

    async fn count(&self) -> Result<usize>;

    /// Release the underlying connection
    async fn close(&self) {}
}
