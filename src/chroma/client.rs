use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::StatusCode;
use tokio::sync::RwLock;
use tracing::debug;
use tracing::info;

use super::types::AddRecords;
use super::types::Collection;
use super::types::CreateCollection;
use super::types::QueryRecords;
use super::types::QueryResult;
use crate::config::AppConfig;
use crate::config::Backend;
use crate::config::ChromaApiVersion;
use crate::config::ChromaConfig;
use crate::config::DistanceMetric;
use crate::embeddings::client::check_dimension;
use crate::errors::RagError;
use crate::errors::Result;
use crate::models::RetrievedDocument;
use crate::rag::VectorStore;

const TOKEN_HEADER: &str = "X-Chroma-Token";

/// Build the collections root for the given API generation
fn collections_root(base_url: &str, config: &ChromaConfig) -> String {
    let base_url = base_url.trim_end_matches('/');
    match config.api_version {
        ChromaApiVersion::V1 => format!("{base_url}/api/v1/collections"),
        ChromaApiVersion::V2 => format!(
            "{base_url}/api/v2/tenants/{}/databases/{}/collections",
            config.tenant, config.database
        ),
    }
}

/// One named Chroma collection
pub struct ChromaStore {
    client: Client,
    api_version: ChromaApiVersion,
    collections_root: String,
    collection_name: String,
    token: Option<String>,
    dimension: usize,
    distance: DistanceMetric,
    /// Server-assigned id of the current collection, set by `reset`
    collection_id: RwLock<Option<String>>,
    next_id: AtomicUsize,
}

impl ChromaStore {
    pub fn new(config: &ChromaConfig, dimension: usize, distance: DistanceMetric) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            api_version: config.api_version,
            collections_root: collections_root(&config.url, config),
            collection_name: config.collection.clone(),
            token: config.token.clone(),
            dimension,
            distance,
            collection_id: RwLock::new(None),
            next_id: AtomicUsize::new(1),
        })
    }

    /// Create from the `[chroma]` config section
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.chroma, config.embedding_dimension(), config.distance())
    }

    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.collections_root)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    /// Status codes servers use for "no such collection".
    ///
    /// 0.5 answers 400 `InvalidCollection`, 1.x answers 404 and older v1
    /// servers answer 500.
    fn is_missing_collection(&self, status: StatusCode) -> bool {
        status == StatusCode::NOT_FOUND
            || status == StatusCode::BAD_REQUEST
            || (self.api_version == ChromaApiVersion::V1
                && status == StatusCode::INTERNAL_SERVER_ERROR)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(failure(response, action).await)
    }

    /// Id of the collection created by the last `reset`, or of the existing
    /// collection with the configured name
    async fn collection_id(&self) -> Result<String> {
        if let Some(id) = self.collection_id.read().await.as_ref() {
            return Ok(id.clone());
        }

        let collection = self.get_collection().await?.ok_or_else(|| {
            RagError::VectorStoreError(format!(
                "Collection {} does not exist; reset the store first",
                self.collection_name
            ))
        })?;

        *self.collection_id.write().await = Some(collection.id.clone());
        Ok(collection.id)
    }

    async fn get_collection(&self) -> Result<Option<Collection>> {
        let request = self.client.get(self.url(&format!("/{}", self.collection_name)));
        let response = self.authorize(request).send().await?;

        if self.is_missing_collection(response.status()) {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(failure(response, "get collection").await);
        }

        Ok(Some(response.json().await?))
    }

    /// Delete the collection by name; returns false when it did not exist
    async fn delete_collection(&self) -> Result<bool> {
        let request = self
            .client
            .delete(self.url(&format!("/{}", self.collection_name)));
        let response = self.authorize(request).send().await?;

        if response.status().is_success() {
            return Ok(true);
        }
        if self.is_missing_collection(response.status()) {
            return Ok(false);
        }
        Err(failure(response, "delete collection").await)
    }

    async fn create_collection(&self) -> Result<Collection> {
        let body = CreateCollection::new(&self.collection_name, self.distance.chroma_space());
        let request = self.client.post(self.url("")).json(&body);
        let response = self.send(request, "create collection").await?;
        Ok(response.json().await?)
    }
}

async fn failure(response: Response, action: &str) -> RagError {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    RagError::VectorStoreError(format!("Chroma {action} failed ({status}): {error_text}"))
}

#[async_trait]
impl VectorStore for ChromaStore {
    fn backend(&self) -> Backend {
        Backend::Chroma
    }

    async fn reset(&self) -> Result<()> {
        let mut current = self.collection_id.write().await;

        if self.delete_collection().await? {
            debug!("Deleted collection {}", self.collection_name);
        }

        let collection = self.create_collection().await?;
        info!(
            "Created Chroma collection {} ({}, space {})",
            collection.name,
            collection.id,
            self.distance.chroma_space()
        );

        *current = Some(collection.id);
        self.next_id.store(1, Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<String> {
        let embedding = check_dimension(self.dimension, embedding.to_vec())?;
        let collection_id = self.collection_id().await?;
        let id = format!("doc{}", self.next_id.fetch_add(1, Ordering::SeqCst));

        let body = AddRecords {
            ids: vec![id.as_str()],
            embeddings: vec![embedding.as_slice()],
            documents: vec![content],
        };
        let request = self
            .client
            .post(self.url(&format!("/{collection_id}/add")))
            .json(&body);
        self.send(request, "add").await?;

        Ok(id)
    }

    async fn nearest(&self, embedding: &[f32]) -> Result<Option<RetrievedDocument>> {
        let embedding = check_dimension(self.dimension, embedding.to_vec())?;
        let collection_id = self.collection_id().await?;

        // Some server versions reject n_results larger than the collection
        if self.count().await? == 0 {
            return Ok(None);
        }

        let request = self
            .client
            .post(self.url(&format!("/{collection_id}/query")))
            .json(&QueryRecords::nearest(&embedding));
        let response = self.send(request, "query").await?;

        let result: QueryResult = response.json().await?;
        result.into_first()
    }

    async fn count(&self) -> Result<usize> {
        let collection_id = self.collection_id().await?;
        let request = self
            .client
            .get(self.url(&format!("/{collection_id}/count")));
        let response = self.send(request, "count").await?;
        Ok(response.json().await?)
    }
}
