//! Integration test harness for RocketCart.
//!
//! Provides a [`TestContext`] wiring a `CartStore` to fake collaborators:
//! a seedable inventory, a seedable catalog, shared in-memory storage, and
//! a recording notifier. Tests drive the store's public surface exactly the
//! way a UI layer would and then assert on the cart, the persisted
//! snapshot, and the recorded notifications.
//!
//! # Example
//!
//! ```rust
//! use rocket_cart_integration_tests::TestContext;
//! use rocket_cart_core::ProductId;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let ctx = TestContext::new();
//! ctx.seed("Trail Shoe", ProductId::new(1), "19.90", 5);
//!
//! let mut store = ctx.store();
//! store.add_product(ProductId::new(1)).await;
//! assert_eq!(store.cart().len(), 1);
//! # });
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use rust_decimal::Decimal;

use rocket_cart::notify::RecordingNotifier;
use rocket_cart::storage::MemoryStorage;
use rocket_cart::{CartStore, CatalogService, InventoryService, ServiceError};
use rocket_cart_core::{LineItem, Product, ProductId, StockLevel};

/// Seedable fake inventory service.
#[derive(Default)]
pub struct FakeInventory {
    levels: Mutex<HashMap<i64, u32>>,
    down: Mutex<bool>,
}

impl FakeInventory {
    /// Set the stock level for a product.
    pub fn set_stock(&self, product_id: ProductId, amount: u32) {
        lock(&self.levels).insert(product_id.as_i64(), amount);
    }

    /// Make every subsequent lookup fail, simulating an unreachable service.
    pub fn go_down(&self) {
        *lock(&self.down) = true;
    }
}

impl InventoryService for FakeInventory {
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, ServiceError> {
        if *lock(&self.down) {
            return Err(ServiceError::NotFound("inventory is down".to_string()));
        }
        lock(&self.levels)
            .get(&product_id.as_i64())
            .map(|&amount| StockLevel { amount })
            .ok_or_else(|| ServiceError::NotFound(product_id.to_string()))
    }
}

/// Seedable fake catalog service.
#[derive(Default)]
pub struct FakeCatalog {
    products: Mutex<HashMap<i64, Product>>,
}

impl FakeCatalog {
    /// Register a catalog record.
    pub fn put(&self, product: Product) {
        lock(&self.products).insert(product.id.as_i64(), product);
    }
}

impl CatalogService for FakeCatalog {
    async fn product(&self, product_id: ProductId) -> Result<Product, ServiceError> {
        lock(&self.products)
            .get(&product_id.as_i64())
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(product_id.to_string()))
    }
}

/// Everything a cart test needs, wired together.
#[derive(Default)]
pub struct TestContext {
    pub inventory: FakeInventory,
    pub catalog: FakeCatalog,
    pub storage: MemoryStorage,
    pub notifier: RecordingNotifier,
}

/// The store type every test drives.
pub type TestStore<'a> =
    CartStore<&'a FakeInventory, &'a FakeCatalog, &'a MemoryStorage, &'a RecordingNotifier>;

impl TestContext {
    /// Create a context with empty inventory, catalog, and storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one product into both the catalog and the inventory.
    ///
    /// # Panics
    ///
    /// Panics if `price` is not a valid decimal literal.
    pub fn seed(&self, name: &str, product_id: ProductId, price: &str, stock: u32) {
        let price = Decimal::from_str(price).expect("valid price literal");
        self.catalog.put(Product {
            id: product_id,
            name: name.to_string(),
            price,
            image_url: format!("https://cdn.example.com/{product_id}.jpg"),
        });
        self.inventory.set_stock(product_id, stock);
    }

    /// Open a store over this context's collaborators.
    ///
    /// # Panics
    ///
    /// Panics if the seeded snapshot does not decode, which means the test
    /// itself wrote a bad snapshot.
    #[must_use]
    pub fn store(&self) -> TestStore<'_> {
        CartStore::open(&self.inventory, &self.catalog, &self.storage, &self.notifier)
            .expect("in-memory snapshot always decodes")
    }

    /// The persisted snapshot, empty when nothing was ever committed.
    #[must_use]
    pub fn persisted(&self) -> Vec<LineItem> {
        use rocket_cart::CartStorage as _;
        self.storage
            .load()
            .expect("in-memory snapshot always decodes")
            .unwrap_or_default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
