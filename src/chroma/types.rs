//! Wire types for the Chroma v1 HTTP API

use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use serde_json::Value;

use crate::errors::RagError;
use crate::errors::Result;
use crate::models::RetrievedDocument;

#[derive(Debug, Serialize)]
pub(super) struct CreateCollection<'a> {
    pub name: &'a str,
    pub metadata: Value,
    pub get_or_create: bool,
}

impl<'a> CreateCollection<'a> {
    pub fn new(name: &'a str, space: &str) -> Self {
        Self {
            name,
            metadata: json!({ "hnsw:space": space }),
            get_or_create: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct Collection {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(super) struct AddRecords<'a> {
    pub ids: Vec<&'a str>,
    pub embeddings: Vec<&'a [f32]>,
    pub documents: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct QueryRecords<'a> {
    pub query_embeddings: Vec<&'a [f32]>,
    pub n_results: usize,
    pub include: [&'static str; 2],
}

impl<'a> QueryRecords<'a> {
    pub fn nearest(embedding: &'a [f32]) -> Self {
        Self {
            query_embeddings: vec![embedding],
            n_results: 1,
            include: ["documents", "distances"],
        }
    }
}

/// Column-major query result: one inner list per query embedding
#[derive(Debug, Deserialize)]
pub(super) struct QueryResult {
    pub ids: Vec<Vec<String>>,
    #[serde(default)]
    pub documents: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl QueryResult {
    /// First hit for the first query embedding, if any
    pub fn into_first(self) -> Result<Option<RetrievedDocument>> {
        let Some(id) = self.ids.into_iter().next().and_then(|ids| ids.into_iter().next()) else {
            return Ok(None);
        };

        let content = self
            .documents
            .and_then(|docs| docs.into_iter().next())
            .and_then(|docs| docs.into_iter().next())
            .flatten()
            .ok_or_else(|| {
                RagError::VectorStoreError(format!("Chroma returned no document text for {id}"))
            })?;

        let distance = self
            .distances
            .and_then(|d| d.into_iter().next())
            .and_then(|d| d.into_iter().next())
            .flatten()
            .unwrap_or(0.0);

        Ok(Some(RetrievedDocument {
            id,
            content,
            distance,
        }))
    }
}
