//! Complete RAG pipeline: Reset -> Seed -> Retrieve -> Generate

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use super::corpus::CORPUS;
use super::prompts::PromptTemplate;
use super::prompts::SYSTEM_PROMPT;
use super::store::VectorStore;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::llm::ChatMessage;
use crate::llm::ChatModel;
use crate::llm::ChatRequest;
use crate::models::Answer;
use crate::models::Document;
use crate::models::Query;
use crate::models::RetrievedDocument;

/// Straight-line RAG over one store, one embedder and one chat model.
///
/// Every external call is awaited before the next one starts.
pub struct RagPipeline {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    chat: Arc<dyn ChatModel>,
    template: PromptTemplate,
    max_tokens: Option<u32>,
}

impl RagPipeline {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            store,
            embedder,
            chat,
            template: PromptTemplate::default(),
            max_tokens: None,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Reset storage and insert the example corpus, one document at a time.
    ///
    /// Returns the number of stored documents afterwards.
    pub async fn prepare(&self) -> Result<usize> {
        info!("Resetting {} storage", self.store.backend());
        self.store.reset().await?;

        for text in CORPUS {
            let document = self.ingest(text).await?;
            debug!("Stored document {}", document.id);
        }

        let count = self.store.count().await?;
        info!("Seeded {} documents", count);
        Ok(count)
    }

    /// Embed `text` and store it
    pub async fn ingest(&self, text: &str) -> Result<Document> {
        let embedding = self.embedder.embed(text).await?;
        let id = self.store.insert(text, &embedding).await?;

        Ok(Document {
            id,
            content: text.to_string(),
            embedding,
        })
    }

    /// Embed the question exactly as typed
    pub async fn embed_query(&self, question: &str) -> Result<Query> {
        let embedding = self.embedder.embed(question).await?;
        Ok(Query {
            question: question.to_string(),
            embedding,
        })
    }

    /// Closest stored document for `query`
    pub async fn retrieve(&self, query: &Query) -> Result<Option<RetrievedDocument>> {
        let nearest = self.store.nearest(&query.embedding).await?;
        match &nearest {
            Some(doc) => debug!("Nearest document {} (distance {:.4})", doc.id, doc.distance),
            None => debug!("No document found"),
        }
        Ok(nearest)
    }

    /// Build the completion request for a retrieved passage
    #[must_use]
    pub fn build_request(&self, context: &str, question: &str) -> ChatRequest {
        ChatRequest::deterministic(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(self.template.render_qa(context, question)),
        ])
        .with_max_tokens(self.max_tokens)
    }

    /// Answer `question` from the single nearest document.
    ///
    /// When nothing is retrieved the chat model is not called.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        info!("Processing RAG query: {}", question);

        let query = self.embed_query(question).await?;
        let Some(document) = self.retrieve(&query).await? else {
            return Ok(Answer::NotFound);
        };

        let request = self.build_request(&document.content, question);
        let text = self.chat.complete(&request).await?;

        info!("RAG query completed successfully");
        Ok(Answer::Generated {
            context: document.content,
            text,
        })
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }
}
