//! Cart commands.
//!
//! `show` reads the persisted snapshot only and needs no network. The
//! mutating commands open the store against the live inventory/catalog
//! service; failure notifications are printed to the terminal in place of
//! the UI toast the store was designed for.

use rust_decimal::Decimal;
use thiserror::Error;

use rocket_cart::notify::Notifier;
use rocket_cart::storage::{CartStorage, JsonFileStorage};
use rocket_cart::{CartConfig, CartStore, CommerceClient, ConfigError, StorageError};
use rocket_cart_core::{LineItem, ProductId};

/// Errors that can occur while running cart commands.
#[derive(Debug, Error)]
pub enum CartCliError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The cart storage file is unreadable or corrupt.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Notifier that prints failure messages to the terminal.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    #[allow(clippy::print_stdout)]
    fn notify(&self, message: &str) {
        println!("! {message}");
    }
}

/// Show the persisted cart without touching the network.
pub fn show() -> Result<(), CartCliError> {
    let config = CartConfig::from_env()?;
    let storage = JsonFileStorage::new(&config.storage_path);
    let cart = storage.load()?.unwrap_or_default();
    render(&cart);
    Ok(())
}

/// Add one unit of a product.
pub async fn add(product_id: i64) -> Result<(), CartCliError> {
    let mut store = open_store()?;
    store.add_product(ProductId::new(product_id)).await;
    render(store.cart());
    Ok(())
}

/// Remove a product from the cart. Purely local.
pub fn remove(product_id: i64) -> Result<(), CartCliError> {
    let mut store = open_store()?;
    store.remove_product(ProductId::new(product_id));
    render(store.cart());
    Ok(())
}

/// Set a product's quantity to an absolute amount.
pub async fn set(product_id: i64, amount: i64) -> Result<(), CartCliError> {
    let mut store = open_store()?;
    store
        .update_product_amount(ProductId::new(product_id), amount)
        .await;
    render(store.cart());
    Ok(())
}

type CliStore = CartStore<CommerceClient, CommerceClient, JsonFileStorage, TerminalNotifier>;

fn open_store() -> Result<CliStore, CartCliError> {
    let config = CartConfig::from_env()?;
    let client = CommerceClient::new(&config);
    let storage = JsonFileStorage::new(&config.storage_path);
    Ok(CartStore::open(
        client.clone(),
        client,
        storage,
        TerminalNotifier,
    )?)
}

#[allow(clippy::print_stdout)]
fn render(cart: &[LineItem]) {
    if cart.is_empty() {
        println!("(cart is empty)");
        return;
    }

    let mut total = Decimal::ZERO;
    for item in cart {
        let line_total = item.product.price * Decimal::from(item.amount);
        total += line_total;
        println!(
            "{:>6}  {:<40}  x{:<4}  {:>10}",
            item.id().as_i64(),
            item.product.name,
            item.amount,
            line_total
        );
    }
    println!("{:>66}", format!("total: {total}"));
}
