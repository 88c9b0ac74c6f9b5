use anyhow::{Context, Result};
use bpm_query_core::{EngineConfig, QueryEngine};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bpm-query")]
#[command(about = "Inspect the query property vocabulary of the engine")]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List query domains
    Domains,
    /// List a domain's properties in registration order
    Properties {
        domain: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the storage locator of a property
    Resolve { domain: String, name: String },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = QueryEngine::builder(config).build()?;

    match cli.command {
        Command::Domains => {
            for domain in engine.catalog().list_domains() {
                println!("{}", domain);
            }
        }
        Command::Properties { domain, json } => {
            let properties = engine.list_properties(&domain)?;
            if json {
                println!("{}", serde_json::to_string_pretty(properties)?);
            } else {
                for property in properties {
                    println!("{}", property);
                }
            }
        }
        Command::Resolve { domain, name } => {
            let locator = engine
                .resolve_property(&domain, &name)
                .with_context(|| format!("resolving {}.{}", domain, name))?;
            println!("{}", locator);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
