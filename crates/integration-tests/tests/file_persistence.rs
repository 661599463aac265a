//! Cart flows against the real file-backed storage.

use rocket_cart::storage::{CART_STORAGE_KEY, CartStorage, JsonFileStorage};
use rocket_cart::{CartStore, Outcome};
use rocket_cart_core::{LineItem, ProductId};
use rocket_cart_integration_tests::TestContext;

#[tokio::test]
async fn file_snapshot_round_trips_through_reopen() {
    let ctx = TestContext::new();
    ctx.seed("Trail Shoe", ProductId::new(1), "99.90", 5);
    ctx.seed("Road Shoe", ProductId::new(2), "149.90", 5);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");

    {
        let storage = JsonFileStorage::new(&path);
        let mut store =
            CartStore::open(&ctx.inventory, &ctx.catalog, storage, &ctx.notifier).expect("open");

        assert_eq!(store.add_product(ProductId::new(2)).await, Outcome::Committed);
        assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Committed);
        assert_eq!(store.add_product(ProductId::new(2)).await, Outcome::Committed);
    }

    let storage = JsonFileStorage::new(&path);
    let store =
        CartStore::open(&ctx.inventory, &ctx.catalog, storage, &ctx.notifier).expect("reopen");

    let amounts: Vec<(i64, u32)> = store
        .cart()
        .iter()
        .map(|item| (item.id().as_i64(), item.amount))
        .collect();
    // First-add order, not id order.
    assert_eq!(amounts, vec![(2, 2), (1, 1)]);
}

#[tokio::test]
async fn snapshot_lives_under_the_storage_key() {
    let ctx = TestContext::new();
    ctx.seed("Trail Shoe", ProductId::new(1), "99.90", 5);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");

    let storage = JsonFileStorage::new(&path);
    let mut store =
        CartStore::open(&ctx.inventory, &ctx.catalog, storage, &ctx.notifier).expect("open");
    store.add_product(ProductId::new(1)).await;

    let raw = std::fs::read_to_string(&path).expect("storage file exists");
    let map: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let snapshot = map
        .get(CART_STORAGE_KEY)
        .and_then(serde_json::Value::as_str)
        .expect("cart stored as a serialized string value");

    let items: Vec<LineItem> = serde_json::from_str(snapshot).expect("snapshot decodes");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), ProductId::new(1));
    assert_eq!(items[0].amount, 1);
}

#[tokio::test]
async fn corrupt_snapshot_surfaces_at_open() {
    let ctx = TestContext::new();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    std::fs::write(&path, "{ not json").expect("write corrupt file");

    let storage = JsonFileStorage::new(&path);
    assert!(storage.load().is_err());
    assert!(CartStore::open(&ctx.inventory, &ctx.catalog, storage, &ctx.notifier).is_err());
}
