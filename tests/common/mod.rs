//! In-process stand-ins for the storage backend and the two model endpoints

#![allow(dead_code)]

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use quickrag::config::Backend;
use quickrag::embeddings::Embedder;
use quickrag::llm::ChatModel;
use quickrag::llm::ChatRequest;
use quickrag::models::RetrievedDocument;
use quickrag::rag::VectorStore;
use quickrag::RagError;
use quickrag::Result;

/// Keyword groups; one vector component per group plus a constant bias
const KEYWORD_GROUPS: [&[&str]; 3] = [
    &["club", "chess", "members"],
    &["cafeteria", "breakfast", "lunch", "vegetarian"],
    &["expense", "receipt", "finance"],
];

/// Embeds text as keyword counts and records every input it sees
#[derive(Default)]
pub struct KeywordEmbedder {
    pub inputs: Mutex<Vec<String>>,
}

impl KeywordEmbedder {
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.inputs.lock().unwrap().push(text.to_string());

        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = KEYWORD_GROUPS
            .iter()
            .map(|group| group.iter().map(|w| lower.matches(w).count()).sum::<usize>() as f32)
            .collect();
        vector.push(1.0);
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        KEYWORD_GROUPS.len() + 1
    }
}

/// Embedder whose endpoint is always down
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::EmbeddingError("OpenAI API error (401): invalid key".to_string()))
    }

    fn dimension(&self) -> usize {
        4
    }
}

struct StoredRow {
    id: usize,
    content: String,
    embedding: Vec<f32>,
}

/// Vector store kept in memory, ranked by Euclidean distance
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredRow>>,
    next_id: Mutex<usize>,
    pub closed: AtomicBool,
}

impl MemoryStore {
    pub fn contents(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|row| row.content.clone())
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[async_trait]
impl VectorStore for MemoryStore {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn reset(&self) -> Result<()> {
        self.rows.lock().unwrap().clear();
        *self.next_id.lock().unwrap() = 0;
        Ok(())
    }

    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<String> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.rows.lock().unwrap().push(StoredRow {
            id: *next_id,
            content: content.to_string(),
            embedding: embedding.to_vec(),
        });
        Ok(next_id.to_string())
    }

    async fn nearest(&self, embedding: &[f32]) -> Result<Option<RetrievedDocument>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .map(|row| (row, euclidean(&row.embedding, embedding)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(row, distance)| RetrievedDocument {
                id: row.id.to_string(),
                content: row.content.clone(),
                distance,
            }))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rows.lock().unwrap().len())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Chat model that records requests and replies with a fixed text
pub struct RecordingChat {
    pub reply: String,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl RecordingChat {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for RecordingChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}
