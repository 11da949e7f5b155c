use tempfile::TempDir;

use cartstore::{
    persist::{CART_STORAGE_KEY, CartStorage, encode_items, load_cart, sqlite::SqliteStorage},
    product::{CartItem, Product},
};

fn item(id: u64, amount: u32) -> CartItem {
    CartItem::new(
        Product {
            id,
            title: format!("Product {id}"),
            price_cents: 2_500,
            image_url: format!("https://shop.example/{id}.png"),
        },
        amount,
    )
}

#[test]
fn reload_round_trips_items_and_order() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("cart.db");

    let items = vec![item(3, 2), item(1, 1), item(7, 4)];

    let mut storage = SqliteStorage::open(&db_path).expect("open sqlite");
    assert!(load_cart(&storage).expect("load").is_empty());

    let blob = encode_items(&items).expect("encode");
    storage.set(CART_STORAGE_KEY, &blob).expect("set");
    drop(storage);

    let reopened = SqliteStorage::open(&db_path).expect("reopen");
    let cart = load_cart(&reopened).expect("reload");
    assert_eq!(cart.items(), items.as_slice());
}

#[test]
fn set_overwrites_previous_blob() {
    let mut storage = SqliteStorage::open_in_memory().expect("open");

    let first = encode_items(&[item(1, 1)]).expect("encode");
    let second = encode_items(&[item(1, 2), item(4, 1)]).expect("encode");
    storage.set(CART_STORAGE_KEY, &first).expect("set");
    storage.set(CART_STORAGE_KEY, &second).expect("set");

    assert_eq!(storage.get(CART_STORAGE_KEY).expect("get"), Some(second));
    let cart = load_cart(&storage).expect("load");
    assert_eq!(cart.amount_of(1), 2);
    assert_eq!(cart.amount_of(4), 1);
}

#[test]
fn undecodable_blob_falls_back_to_empty() {
    let mut storage = SqliteStorage::open_in_memory().expect("open");
    storage
        .set(CART_STORAGE_KEY, "definitely not json")
        .expect("set");

    assert!(load_cart(&storage).expect("load").is_empty());
}

#[test]
fn blob_violating_invariants_falls_back_to_empty() {
    let mut storage = SqliteStorage::open_in_memory().expect("open");

    let duplicated = encode_items(&[item(1, 1), item(1, 3)]).expect("encode");
    storage.set(CART_STORAGE_KEY, &duplicated).expect("set");
    assert!(load_cart(&storage).expect("load").is_empty());

    let zeroed = encode_items(&[CartItem {
        amount: 0,
        ..item(2, 1)
    }])
    .expect("encode");
    storage.set(CART_STORAGE_KEY, &zeroed).expect("set");
    assert!(load_cart(&storage).expect("load").is_empty());
}

#[test]
fn absent_key_loads_empty_cart() {
    let storage = SqliteStorage::open_in_memory().expect("open");
    assert!(storage.get(CART_STORAGE_KEY).expect("get").is_none());
    assert!(load_cart(&storage).expect("load").is_empty());
}
