//! Round-trip tests for the persisted cart mirror.

use rocket_shoes_cart::{
    CartError, CartStorage, CartStore, DEFAULT_STORAGE_KEY, FileStorage, MemoryStorage,
    StorageError,
};
use rocket_shoes_core::ProductId;
use rocket_shoes_integration_tests::{FakeGateway, RecordingSink, init_tracing, product};

fn stocked_gateway() -> FakeGateway {
    let gateway = FakeGateway::new();
    gateway.insert_product(product(1, "Tênis de Caminhada Leve Confortável", 179.9));
    gateway.set_stock(ProductId::new(1), 5);
    gateway.insert_product(product(2, "Meia Esportiva", 29.9));
    gateway.set_stock(ProductId::new(2), 3);
    gateway
}

#[tokio::test]
async fn memory_mirror_roundtrips_through_reopen() {
    init_tracing();
    let gateway = stocked_gateway();
    let sink = RecordingSink::new();
    let mut store =
        CartStore::open(gateway.clone(), MemoryStorage::new(), sink.clone()).expect("open");

    store.add_product(ProductId::new(1)).await.expect("add 1");
    store.add_product(ProductId::new(2)).await.expect("add 2");
    store
        .update_product_amount(ProductId::new(1), 3)
        .await
        .expect("update");

    let snapshot = store.items().to_vec();
    let storage = store.storage().clone();

    let reopened = CartStore::open(gateway, storage, sink).expect("reopen");
    assert_eq!(reopened.items(), snapshot);
}

#[tokio::test]
async fn file_mirror_roundtrips_through_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart-store.json");

    let gateway = stocked_gateway();
    let sink = RecordingSink::new();
    let mut store =
        CartStore::open(gateway.clone(), FileStorage::new(&path), sink.clone()).expect("open");
    store.add_product(ProductId::new(2)).await.expect("add");
    store.add_product(ProductId::new(1)).await.expect("add");
    let snapshot = store.items().to_vec();
    drop(store);

    // A fresh process would build a brand-new FileStorage over the
    // same path; order and every passthrough field must survive.
    let reopened =
        CartStore::open(gateway, FileStorage::new(&path), sink).expect("reopen");
    assert_eq!(reopened.items(), snapshot);
    assert_eq!(reopened.items()[0].id, ProductId::new(2));
}

#[tokio::test]
async fn absent_mirror_opens_empty() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path().join("never-written.json"));

    let store = CartStore::open(stocked_gateway(), storage, RecordingSink::new()).expect("open");
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn corrupt_mirror_value_opens_empty() {
    init_tracing();
    let mut storage = MemoryStorage::new();
    storage
        .set(DEFAULT_STORAGE_KEY, "][ this was never a cart")
        .expect("seed corrupt value");

    let store = CartStore::open(stocked_gateway(), storage, RecordingSink::new()).expect("open");
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn unreadable_backing_file_surfaces_storage_error() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart-store.json");
    std::fs::write(&path, "not a json map").expect("seed garbage file");

    let err = CartStore::open(stocked_gateway(), FileStorage::new(&path), RecordingSink::new())
        .expect_err("backing file unreadable");
    assert!(matches!(
        err,
        CartError::Storage(StorageError::Corrupt(_))
    ));
}

#[tokio::test]
async fn mirror_is_stored_under_the_storefront_key() {
    init_tracing();
    assert_eq!(DEFAULT_STORAGE_KEY, "@RocketShoes:cart");

    let gateway = stocked_gateway();
    let sink = RecordingSink::new();
    let mut store = CartStore::open(gateway, MemoryStorage::new(), sink.clone()).expect("open");
    store.add_product(ProductId::new(1)).await.expect("add");

    let mirror = store
        .storage()
        .get("@RocketShoes:cart")
        .expect("storage read")
        .expect("mirror written");
    assert!(mirror.starts_with('['));
    assert!(sink.messages().is_empty());
}
