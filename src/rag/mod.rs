//! RAG (Retrieval-Augmented Generation) module
//!
//! This module wires the pieces of the demo together:
//! - a fixed three-passage corpus
//! - the `VectorStore` seam implemented by the Postgres and Chroma backends
//! - prompt templates
//! - the sequential reset / seed / retrieve / generate pipeline
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quickrag::config::AppConfig;
//! use quickrag::database::Database;
//! use quickrag::embeddings::EmbeddingClient;
//! use quickrag::llm::LlmClient;
//! use quickrag::rag::RagPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load(None)?;
//!     let store = Arc::new(Database::from_config(&config).await?);
//!     let embedder = Arc::new(EmbeddingClient::from_config(&config.embeddings)?);
//!     let chat = Arc::new(LlmClient::from_config(&config.llm)?);
//!
//!     let pipeline = RagPipeline::new(store, embedder, chat);
//!     pipeline.prepare().await?;
//!     println!("{}", pipeline.answer("When does the chess club meet?").await?);
//!
//!     Ok(())
//! }
//! ```

pub mod corpus;
pub mod pipeline;
pub mod prompts;
pub mod store;

pub use corpus::CORPUS;
pub use pipeline::RagPipeline;
pub use prompts::PromptTemplate;
pub use store::VectorStore;
