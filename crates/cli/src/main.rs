//! RocketCart CLI - Drive the cart store from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! rocket-cart show
//!
//! # Add one unit of product 1
//! rocket-cart add 1
//!
//! # Set product 1 to exactly 5 units
//! rocket-cart set 1 5
//!
//! # Remove product 1
//! rocket-cart remove 1
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_API_BASE_URL` - Base URL of the inventory/catalog service
//! - `CART_STORAGE_PATH` - Cart storage file (default: `rocket-cart.json`)
//! - `RUST_LOG` - Tracing filter (e.g., `rocket_cart=debug`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rocket-cart")]
#[command(author, version, about = "RocketCart command-line cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: i64,
    },
    /// Set a product's quantity to an absolute amount
    Set {
        /// Product ID
        product_id: i64,
        /// Target quantity
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show => commands::cart::show()?,
        Commands::Add { product_id } => commands::cart::add(product_id).await?,
        Commands::Remove { product_id } => commands::cart::remove(product_id)?,
        Commands::Set { product_id, amount } => commands::cart::set(product_id, amount).await?,
    }
    Ok(())
}
