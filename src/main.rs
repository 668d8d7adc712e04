//! Farming subgraph CLI
//!
//! Command-line interface for querying pool and farming data from the
//! subgraphs. Prints results as pretty JSON.

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use farming_subgraph_client::{Error, FarmingClient, Network, Result, SubgraphEndpoints};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "farming-subgraph")]
#[command(about = "Query pool and liquidity-farming data from the subgraphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network whose subgraphs to query (polygon, dogechain)
    #[arg(short, long, global = true, default_value = "polygon")]
    network: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a pool from the analytics subgraph
    Pool {
        /// Pool address
        address: String,
    },

    /// Fetch a token from the farming subgraph
    Token {
        /// Token address
        address: String,
    },

    /// List all eternal farmings that are not detached
    Farmings,

    /// Fetch a single eternal farming by incentive id
    Farming {
        /// Incentive id (bytes32 hex)
        id: String,
    },

    /// List active eternal farmings on a pool
    PoolFarmings {
        /// Pool address
        pool: String,
    },

    /// List positions an account transferred onto the farming center
    Deposits {
        /// Account address
        account: String,
    },

    /// List positions of an account entered in an eternal farming
    EternalPositions {
        /// Account address
        account: String,
    },

    /// List positions of an account in one pool that still hold liquidity
    PoolPositions {
        /// Account address
        account: String,

        /// Pool address
        pool: String,

        /// Minimum range length
        #[arg(long, default_value_t = 0)]
        min_range_length: u32,
    },

    /// Fetch initialized ticks of a pool within tick index bounds
    Ticks {
        /// Pool address
        pool: String,

        /// Lower tick index bound
        #[arg(long, allow_hyphen_values = true)]
        lower: i32,

        /// Upper tick index bound
        #[arg(long, allow_hyphen_values = true)]
        upper: i32,

        /// Page offset (ignored with --all)
        #[arg(long, default_value_t = 0)]
        skip: i64,

        /// Follow pagination and return every tick in the bounds
        #[arg(long)]
        all: bool,
    },

    /// Show the resolved subgraph endpoints
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let network: Network = cli.network.parse()?;
    let endpoints = SubgraphEndpoints::from_env(network)?;

    if let Commands::Config = cli.command {
        println!("network: {}", network.name());
        println!("pools subgraph: {}", endpoints.pools);
        println!("farming subgraph: {}", endpoints.farming);
        return Ok(());
    }

    let client = FarmingClient::new(endpoints);

    match cli.command {
        Commands::Pool { address } => {
            let pool = client.pool(parse_address(&address)?).await?;
            print_json(&pool)?;
        }
        Commands::Token { address } => {
            let token = client.token(parse_address(&address)?).await?;
            print_json(&token)?;
        }
        Commands::Farmings => {
            let farmings = client.eternal_farmings().await?;
            print_json(&farmings)?;
        }
        Commands::Farming { id } => {
            let farming = client.eternal_farming(&id).await?;
            print_json(&farming)?;
        }
        Commands::PoolFarmings { pool } => {
            let farmings = client.eternal_farmings_for_pool(parse_address(&pool)?).await?;
            print_json(&farmings)?;
        }
        Commands::Deposits { account } => {
            let deposits = client.transferred_positions(parse_address(&account)?).await?;
            print_json(&deposits)?;
        }
        Commands::EternalPositions { account } => {
            let deposits = client
                .positions_on_eternal_farming(parse_address(&account)?)
                .await?;
            print_json(&deposits)?;
        }
        Commands::PoolPositions {
            account,
            pool,
            min_range_length,
        } => {
            let deposits = client
                .transferred_positions_for_pool(
                    parse_address(&account)?,
                    parse_address(&pool)?,
                    min_range_length,
                )
                .await?;
            print_json(&deposits)?;
        }
        Commands::Ticks {
            pool,
            lower,
            upper,
            skip,
            all,
        } => {
            let pool = parse_address(&pool)?;
            let ticks = if all {
                client.all_surrounding_ticks(pool, lower, upper).await?
            } else {
                client.surrounding_ticks(pool, lower, upper, skip).await?
            };
            print_json(&ticks)?;
        }
        Commands::Config => unreachable!("handled above"),
    }

    Ok(())
}

fn parse_address(s: &str) -> Result<Address> {
    s.parse()
        .map_err(|e| Error::InvalidArgument(format!("Invalid address {}: {}", s, e)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
