mod filters;
mod listing;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vinfreak_client::CarsClient;

use crate::filters::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "vinfreak")]
#[command(about = "Search VINFREAK vehicle listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one page of matching vehicles
    Search {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page number (1-indexed)
        #[arg(long)]
        page: Option<u32>,
        /// Vehicles per page (defaults to VINFREAK_PAGE_SIZE)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,
        /// Window size; switches to limit/offset paging
        #[arg(long)]
        limit: Option<u32>,
        /// Window start; switches to limit/offset paging
        #[arg(long)]
        offset: Option<u32>,
        /// Print the normalized page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Fetch every page of matching vehicles
    All {
        #[command(flatten)]
        filters: FilterArgs,
        /// Vehicles per request (defaults to VINFREAK_BULK_PAGE_SIZE)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,
        /// Print the vehicles as a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Load pages one after another the way the results grid does
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
        /// Stop after this many pages even if more remain
        #[arg(long, default_value = "3")]
        pages: u32,
    },
    /// Show a single vehicle by record id or VIN
    Show {
        /// Record id
        #[arg(required_unless_present = "vin", conflicts_with = "vin")]
        id: Option<String>,
        /// Look the vehicle up by VIN instead
        #[arg(long)]
        vin: Option<String>,
    },
    /// Check that the listing API is reachable
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = vinfreak_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("vinfreak: no command given; try `vinfreak --help`");
        return Ok(());
    };

    let client = CarsClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build listing API client: {e}"))?;
    tracing::debug!(base_url = %client.base_url(), env = %config.env, "listing API client ready");

    match command {
        Commands::Search {
            filters,
            page,
            page_size,
            limit,
            offset,
            json,
        } => {
            let paging = listing::paging_for_search(
                page,
                page_size.unwrap_or(config.page_size),
                limit,
                offset,
            );
            listing::run_search(&client, &filters.into_filter_state(), &paging, json).await?;
        }
        Commands::All {
            filters,
            page_size,
            json,
        } => {
            let page_size = page_size.unwrap_or(config.bulk_page_size);
            listing::run_all(&client, &filters.into_filter_state(), page_size, json).await?;
        }
        Commands::Browse { filters, pages } => {
            listing::run_browse(&client, filters.into_filter_state(), config.page_size, pages)
                .await?;
        }
        Commands::Show { id, vin } => {
            listing::run_show(&client, id.as_deref(), vin.as_deref()).await?;
        }
        Commands::Health => {
            let status = client.health().await?;
            println!("{}: {status}", client.base_url());
        }
    }

    Ok(())
}
