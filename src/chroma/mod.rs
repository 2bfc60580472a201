//! Chroma vector-document backend
//!
//! Talks to a Chroma server over its HTTP API, v2 by default and v1 for
//! servers before 1.0. Embeddings are computed in this process and passed
//! with every `add` and `query` call.

pub mod client;
mod types;


pub use client::ChromaStore;
