use std::env;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

use vectara_chain::core::config::{log_level, AppPaths, ConfigService, VectaraSettings};
use vectara_chain::core::logging;
use vectara_chain::graph::nodes::VECTARA_STORE_INPUT;
use vectara_chain::graph::{default_registry, NodeData, NodeInput};
use vectara_chain::VectaraStore;

#[derive(Parser)]
#[command(name = "vectara-chain", version, about = "Vectara QA chain node")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a question against the configured corpora
    Query {
        /// Free-text query
        text: String,
        /// Override the configured result count
        #[arg(short, long)]
        k: Option<u32>,
    },
    /// Print the descriptors of the exported nodes
    Describe,
    /// Inspect or update the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the merged config with secrets redacted
    Show,
    /// Update connection settings (the API key is written to the secrets file)
    Set {
        #[arg(long)]
        customer_id: Option<String>,
        #[arg(long = "corpus-id")]
        corpus_ids: Vec<u32>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(short, long)]
        k: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = Arc::new(AppPaths::from_env());
    let config_service = ConfigService::new(paths.clone());
    let config = config_service
        .load_config()
        .context("Failed to load configuration")?;
    logging::init(&paths, &log_level(&config));

    match cli.command {
        Command::Query { text, k } => {
            let settings = VectaraSettings::from_config(&config)?;
            let store = VectaraStore::resolve(&settings, env::var("VECTARA_API_KEY").ok(), k);

            let registry = default_registry(&settings);
            let node_data = NodeData::new("vectaraQAChain_0")
                .with_input(VECTARA_STORE_INPUT, NodeInput::VectorStore(Arc::new(store)));
            let output = registry
                .run("vectaraQAChain", &node_data, &text)
                .await
                .context("Vectara QA chain failed")?;

            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Describe => {
            let settings = VectaraSettings::from_config(&config)?;
            let descriptors = default_registry(&settings).descriptors();
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                let redacted = config_service.redact_secrets(&config);
                println!("{}", serde_json::to_string_pretty(&redacted)?);
            }
            ConfigAction::Set {
                customer_id,
                corpus_ids,
                api_key,
                k,
            } => {
                let mut vectara = Map::new();
                if let Some(customer_id) = customer_id {
                    vectara.insert("customer_id".to_string(), json!(customer_id));
                }
                if !corpus_ids.is_empty() {
                    vectara.insert("corpus_ids".to_string(), json!(corpus_ids));
                }
                if let Some(api_key) = api_key {
                    vectara.insert("api_key".to_string(), json!(api_key));
                }
                if let Some(k) = k {
                    vectara.insert("k".to_string(), json!(k));
                }
                config_service
                    .update_config(json!({ "vectara": Value::Object(vectara) }), true)
                    .context("Failed to save configuration")?;
                println!("Saved {}", config_service.config_write_path().display());
            }
        },
    }

    Ok(())
}
