// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::path::PathBuf;

use crate::config::ServiceConfig;

/// Expense NLP service
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "vittmoney-nlp")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Zero-shot expense classification and sentence embeddings over HTTP", long_about = None)]
pub struct Cli {
    /// Interface to bind (overrides API_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port (overrides API_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Load both models before accepting requests
    #[arg(long)]
    pub eager_load: bool,

    /// Read environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}

impl Cli {
    /// Applies the flags that were given on top of the env-driven config
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.eager_load {
            config.eager_load = true;
        }
    }
}
