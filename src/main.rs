// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::{env, sync::Arc};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vittmoney_nlp::{
    api::{start_server, AppState},
    classification::ClassificationProvider,
    cli::Cli,
    config::ServiceConfig,
    embeddings::EmbeddingProvider,
    rag::KnowledgeBase,
    version,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenv::from_path(path)
                .with_context(|| format!("Failed to read env file {}", path.display()))?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🚀 Starting VittMoney NLP service...\n");
    println!("📦 BUILD VERSION: {}", version::get_version_string());
    println!();

    let mut config = ServiceConfig::from_env();
    cli.apply(&mut config);
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    let addr = config.socket_addr().map_err(|e| anyhow!(e))?;

    info!(
        embedding_model = %config.embedding.name,
        classifier_model = %config.classifier.name,
        eager_load = config.eager_load,
        "Configuration loaded"
    );

    let embeddings = Arc::new(EmbeddingProvider::from_config(config.embedding.clone()));
    let classifier = Arc::new(ClassificationProvider::from_config(
        config.classifier.clone(),
        config.classification_cache_size,
    ));
    let knowledge = KnowledgeBase::new(embeddings.clone(), config.knowledge_dimension)
        .context("Failed to create knowledge base")?;

    if config.eager_load {
        println!("🧠 Preloading models...");
        let (embedding_result, classifier_result) =
            tokio::join!(embeddings.preload(), classifier.preload());

        // Serve anyway: a failed slot is retried on the next request
        if let Err(e) = embedding_result {
            warn!(error = %e, "⚠️ Embedding model preload failed, will retry on first request");
        }
        if let Err(e) = classifier_result {
            warn!(error = %e, "⚠️ Classifier preload failed, requests will use the fallback until it loads");
        }
    }

    let state = AppState {
        embeddings,
        classifier,
        knowledge,
        limits: config.request_limits(),
    };

    println!("✅ Listening on http://{}", addr);
    start_server(addr, state, shutdown_signal()).await?;

    println!("👋 Goodbye!");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    println!("\n⏹️  Shutting down...");
}
