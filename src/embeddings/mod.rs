//! Embeddings generation module
//!
//! Text is turned into fixed-length vectors by a remote model:
//! - OpenAI (text-embedding-ada-002, text-embedding-3-small, etc.)
//! - Ollama (local models)
//!
//! # Examples
//!
//! ```rust,no_run
//! use quickrag::config::AppConfig;
//! use quickrag::embeddings::{EmbeddingClient, Embedder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load(None)?;
//!     let client = EmbeddingClient::from_config(&config.embeddings)?;
//!
//!     let embedding = client.embed("Hello, world!").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;

use async_trait::async_trait;

pub use client::EmbeddingClient;

use crate::errors::Result;

/// Maps text to a vector of `dimension()` floats
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed `text` exactly as given
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn dimension(&self) -> usize;
}
