//! Minimal Retrieval-Augmented Generation over pgvector or Chroma.
//!
//! Three fixed passages are embedded and stored, one question is embedded,
//! the nearest passage is retrieved and handed to a chat model together with
//! the question.

pub mod chroma;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;


pub use config::AppConfig;
pub use errors::*;
