//! Resolve a single LEI or MIC and print the record as JSON
//!
//! ```text
//! refdata_lookup lei 529900W18LQJJN6SJ336
//! refdata_lookup mic XLON
//! refdata_lookup eic 10X1001A1001A450
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use refdata_enrichment::telemetry::init_tracing;
use refdata_enrichment::{AcceptedEicCodes, LeiResolver, MicResolver, RegistryConfig};

#[derive(Parser, Debug)]
#[command(name = "refdata_lookup")]
#[command(about = "Look up reference data in GLEIF and the ISO 10383 MIC list")]
struct Args {
    /// Per-request timeout in seconds (overrides REFDATA_HTTP_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a Legal Entity Identifier
    Lei { lei: String },
    /// Resolve a Market Identifier Code
    Mic { mic: String },
    /// Check a code against the accepted EIC list
    Eic {
        code: String,
        #[arg(long, env = "ACCEPTED_EIC_CODES_PATH")]
        path: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let mut config = RegistryConfig::from_env()?;
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(std::time::Duration::from_secs(secs));
    }

    match args.command {
        Command::Lei { lei } => {
            let resolver = LeiResolver::from_config(&config)?;
            let record = resolver.resolve(&lei).await;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Mic { mic } => {
            let resolver = MicResolver::from_config(&config)?;
            let record = resolver
                .resolve(&mic)
                .await
                .context("Failed to load ISO10383_MIC data")?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Eic { code, path } => {
            let path = path
                .or(config.accepted_eic_codes_path)
                .context("No accepted EIC code file configured")?;
            let accepted = AcceptedEicCodes::new(path).is_accepted(&code).await?;
            println!("{}", serde_json::json!({ "eic": code, "accepted": accepted }));
        }
    }

    Ok(())
}
