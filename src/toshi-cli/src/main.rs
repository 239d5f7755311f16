use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toshi_core::{ClientConfig, Index, IndexSummary, TermQuery};
use toshi_rs::Client;

mod telemetry;

#[derive(Parser)]
#[command(name = "toshi", version, about = "Command line client for a Toshi search server")]
struct Cli {
    /// JSON config file
    #[arg(long, default_value = "toshi.json")]
    config: String,

    /// Server address; overrides the config file and TOSHI_URL
    #[arg(long)]
    url: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List index names
    List,
    /// Show the settings and schema of an index
    Summary {
        index: String,
        /// Do not ask the server for segment sizes
        #[arg(long)]
        no_sizes: bool,
    },
    /// Create an index from a file holding its JSON field array
    Create { index: String, schema: PathBuf },
    /// Make pending writes visible to search
    Flush { index: String },
    /// Delete documents matching every FIELD=VALUE term
    Delete {
        index: String,
        #[arg(required = true)]
        terms: Vec<String>,
        #[arg(long)]
        commit: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.json_logs)?;

    let mut config = match ClientConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            if std::path::Path::new(&cli.config).exists() {
                tracing::warn!("ignoring {}: {:#}", cli.config, err);
            } else {
                tracing::debug!("no {}, using defaults", cli.config);
            }
            ClientConfig::default()
        }
    };
    config = config.with_env_overrides();
    if let Some(url) = cli.url {
        config.url = url;
    }
    tracing::info!("Toshi server: {}", config.url);

    let client = Client::from_config(&config)?;

    match cli.command {
        Command::List => {
            for name in client.list_indexes().await? {
                println!("{}", name);
            }
        }
        Command::Summary { index, no_sizes } => {
            let include_sizes = config.include_sizes && !no_sizes;
            let summary = client.get_index_summary(&index, include_sizes).await?;
            print_summary(&summary)?;
        }
        Command::Create { index, schema } => {
            let contents = std::fs::read_to_string(&schema)
                .with_context(|| format!("reading schema file {}", schema.display()))?;
            let fields: serde_json::Value = serde_json::from_str(&contents)?;
            let index = Index::from_json(index, &fields)?;

            client.create_index(&index).await?;
            tracing::info!("✓ Created index {} with {} fields", index.name(), index.fields().len());
        }
        Command::Flush { index } => {
            client.flush(&index).await?;
            tracing::info!("✓ Flushed {}", index);
        }
        Command::Delete {
            index,
            terms,
            commit,
        } => {
            let terms = parse_terms(&terms)?;
            let affected = client.delete_term(&terms, &index, commit).await?;
            println!("{}", affected);
        }
    }

    Ok(())
}

/// `field=value` pairs to term queries.
fn parse_terms(raw: &[String]) -> Result<Vec<TermQuery>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((field, value)) if !field.is_empty() => Ok(TermQuery::new(value, field)),
            _ => bail!("expected FIELD=VALUE, got '{}'", pair),
        })
        .collect()
}

fn print_summary(summary: &IndexSummary) -> Result<()> {
    println!("index:       {}", summary.index.name());
    println!("opstamp:     {}", summary.opstamp);
    println!("segments:    {}", summary.segments.len());
    println!(
        "docstore:    {} (blocksize {})",
        summary.index_settings.docstore_compression, summary.index_settings.docstore_blocksize
    );
    println!("{}", serde_json::to_string_pretty(&summary.index.to_json())?);
    Ok(())
}
