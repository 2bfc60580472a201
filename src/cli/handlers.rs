//! Command handlers for the quickrag binary

use std::sync::Arc;

use tracing::info;

use crate::chroma::ChromaStore;
use crate::cli::output::print_answer;
use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::prompt::prompt_stdin;
use crate::config::AppConfig;
use crate::config::Backend;
use crate::database::Database;
use crate::embeddings::EmbeddingClient;
use crate::llm::LlmClient;
use crate::models::Answer;
use crate::rag::PromptTemplate;
use crate::rag::RagPipeline;
use crate::rag::VectorStore;
use crate::Result;

/// Open the configured backend
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn VectorStore>> {
    let store: Arc<dyn VectorStore> = match config.backend() {
        Backend::Postgres => Arc::new(Database::from_config(config).await?),
        Backend::Chroma => Arc::new(ChromaStore::from_config(config)?),
    };
    info!("Using {} backend", store.backend());
    Ok(store)
}

/// Build the pipeline from configuration; all three clients are opened here
pub async fn build_pipeline(config: &AppConfig) -> Result<RagPipeline> {
    let store = open_store(config).await?;
    let embedder = Arc::new(EmbeddingClient::from_config(&config.embeddings)?);
    let chat = Arc::new(LlmClient::from_config(&config.llm)?);

    let template = config
        .rag
        .prompt_template
        .as_deref()
        .map_or_else(PromptTemplate::context_qa, |template| PromptTemplate::new(template));

    Ok(RagPipeline::new(store, embedder, chat)
        .with_template(template)
        .with_max_tokens(config.llm.max_tokens))
}

/// Reset, seed, read one question, answer it
pub async fn handle_ask_command(config: &AppConfig, question: Option<String>) -> Result<()> {
    config.validate()?;
    let pipeline = build_pipeline(config).await?;

    let outcome = run_ask(&pipeline, question).await;

    pipeline.store().close().await;
    print_answer(&outcome?);
    Ok(())
}

async fn run_ask(pipeline: &RagPipeline, question: Option<String>) -> Result<Answer> {
    pipeline.prepare().await?;
    let question = match question {
        Some(question) => question,
        None => prompt_stdin()?,
    };
    pipeline.answer(&question).await
}

/// Reset and seed only
pub async fn handle_seed_command(config: &AppConfig) -> Result<()> {
    config.validate()?;
    let pipeline = build_pipeline(config).await?;

    let outcome = pipeline.prepare().await;
    pipeline.store().close().await;

    print_success(&format!(
        "Seeded {} documents into the {} backend",
        outcome?,
        config.backend()
    ));
    Ok(())
}

/// Print the effective configuration with secrets masked
pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_info("Current configuration:");
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| crate::RagError::ConfigError(format!("Failed to render config: {e}")))?;
    println!("{rendered}");
    Ok(())
}
