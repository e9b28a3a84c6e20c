use clap::{Parser, Subcommand};
use rentscout_pipeline::{LookupError, Scout, Survey};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rentscout-cli")]
#[command(about = "Survey the neighbourhood of a Jinka listing or an address")]
struct Cli {
    /// Print single-line JSON instead of pretty-printed JSON.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a pasted Jinka listing URL (must carry an `ad` query parameter).
    Ad { listing_url: String },
    /// Look up a free-text address. Multiple words are joined with spaces.
    Address {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = rentscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let scout = Scout::from_config(&config)?;
    let outcome = match &cli.command {
        Commands::Ad { listing_url } => scout.lookup_ad_url(listing_url).await,
        Commands::Address { text } => scout.lookup_address(&text.join(" ")).await,
    };

    let survey = outcome.map_err(report)?;
    println!("{}", render(&survey, cli.compact)?);
    Ok(())
}

/// Keeps upstream detail in the log and returns the user-facing message.
fn report(error: LookupError) -> anyhow::Error {
    if !error.is_not_found() {
        tracing::error!(error = %error, "lookup failed upstream");
    }
    anyhow::anyhow!(error.user_message())
}

fn render(survey: &Survey, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(survey)
    } else {
        serde_json::to_string_pretty(survey)
    }
}
