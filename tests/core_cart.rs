use cartstore::{
    core::cart::{Cart, CartError},
    product::{CartItem, Product},
};

fn product(id: u64) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        price_cents: 1_000 + id as i64,
        image_url: format!("https://shop.example/{id}.png"),
    }
}

fn item(id: u64, amount: u32) -> CartItem {
    CartItem::new(product(id), amount)
}

#[test]
fn insert_appends_in_order_and_rejects_duplicates() {
    let mut cart = Cart::new();
    cart.insert(item(1, 1)).unwrap();
    cart.insert(item(2, 3)).unwrap();
    cart.insert(item(3, 2)).unwrap();

    assert_eq!(cart.product_ids(), vec![1, 2, 3]);
    assert_eq!(cart.len(), 3);
    assert_eq!(cart.total_amount(), 6);

    assert_eq!(cart.insert(item(2, 1)), Err(CartError::AlreadyExists(2)));
    assert_eq!(cart.product_ids(), vec![1, 2, 3]);
}

#[test]
fn insert_rejects_zero_amount() {
    let mut cart = Cart::new();
    assert_eq!(cart.insert(item(7, 0)), Err(CartError::ZeroAmount(7)));
    assert!(cart.is_empty());
}

#[test]
fn set_amount_replaces_existing_value() {
    let mut cart = Cart::new();
    cart.insert(item(1, 1)).unwrap();

    cart.set_amount(1, 4).unwrap();
    assert_eq!(cart.amount_of(1), 4);

    assert_eq!(cart.set_amount(9, 2), Err(CartError::Missing(9)));
    assert_eq!(cart.set_amount(1, 0), Err(CartError::ZeroAmount(1)));
    assert_eq!(cart.amount_of(1), 4);
}

#[test]
fn remove_keeps_remaining_order_and_lookups() {
    let mut cart = Cart::new();
    cart.insert(item(1, 1)).unwrap();
    cart.insert(item(2, 2)).unwrap();
    cart.insert(item(3, 3)).unwrap();

    let removed = cart.remove(2).unwrap();
    assert_eq!(removed.id(), 2);
    assert_eq!(cart.product_ids(), vec![1, 3]);

    assert_eq!(cart.amount_of(1), 1);
    assert_eq!(cart.amount_of(3), 3);
    assert_eq!(cart.amount_of(2), 0);
    assert!(!cart.contains(2));

    cart.set_amount(3, 5).unwrap();
    assert_eq!(cart.get(3).unwrap().amount, 5);
}

#[test]
fn remove_missing_is_an_error() {
    let mut cart = Cart::new();
    cart.insert(item(1, 1)).unwrap();

    assert_eq!(cart.remove(9).unwrap_err(), CartError::Missing(9));
    assert_eq!(cart.product_ids(), vec![1]);
}

#[test]
fn from_items_validates_invariants() {
    let rebuilt = Cart::from_items(vec![item(1, 2), item(2, 1)]).unwrap();
    assert_eq!(rebuilt.product_ids(), vec![1, 2]);
    assert_eq!(rebuilt.amount_of(1), 2);

    assert_eq!(
        Cart::from_items(vec![item(1, 1), item(1, 2)]).unwrap_err(),
        CartError::AlreadyExists(1)
    );
    assert_eq!(
        Cart::from_items(vec![item(1, 0)]).unwrap_err(),
        CartError::ZeroAmount(1)
    );
}

#[test]
fn amount_of_absent_product_is_zero() {
    let cart = Cart::new();
    assert_eq!(cart.amount_of(42), 0);
    assert!(cart.get(42).is_none());
}
