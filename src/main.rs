use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod api;
mod browse;
mod catalog;
mod config;
mod items;
mod output;
mod plan;
mod render;
mod session;
mod telemetry;

use api::{FlyerApi, HttpFlyerApi};
use config::ClientConfig;
use output::{Emitter, OutputConfig};

#[derive(Parser)]
#[command(name = "flyerplan", about = "Turn a grocery flyer into a five-day meal plan")]
struct Cli {
    /// Backend base URL (env FLYERPLAN_API_BASE)
    #[arg(global = true, long)]
    api_base: Option<String>,
    /// Flyer catalog endpoint (env FLYERPLAN_CATALOG_URL)
    #[arg(global = true, long)]
    catalog_url: Option<String>,
    /// Location sent to the catalog and the backend (env FLYERPLAN_POSTAL_CODE)
    #[arg(global = true, long)]
    postal_code: Option<String>,
    /// Emit JSON envelopes to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List grocery flyers from the catalog
    Flyers(catalog::FlyersCmd),
    /// Store, extract and plan meals for one flyer
    Plan(plan::PlanCmd),
    /// Interactive picker: select flyers by id
    Browse(browse::BrowseCmd),
    /// Show items stored for a store
    Items(items::ItemsCmd),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and FLYERPLAN_LOG_FORMAT
    telemetry::config::init_tracing();

    let cfg = ClientConfig::from_env().with_overrides(cli.api_base, cli.catalog_url, cli.postal_code);
    let api: Arc<dyn FlyerApi> = Arc::new(HttpFlyerApi::new(cfg.clone())?);
    let mut out = Emitter::from_config(OutputConfig::from_env(cli.json));

    match cli.command {
        Commands::Flyers(args) => catalog::run(api, &cfg, args, &mut out).await?,
        Commands::Plan(args) => plan::run(api, &cfg, args, &mut out).await?,
        Commands::Browse(args) => browse::run(api, &cfg, args, &mut out).await?,
        Commands::Items(args) => items::run(api, &cfg, args, &mut out).await?,
    }

    Ok(())
}
