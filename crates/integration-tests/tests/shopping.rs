//! Integration tests for carts and purchase history across restarts.

use pocket_shop_core::{Price, ProductId};
use pocket_shop_integration_tests::TestShop;
use pocket_shop_storefront::db::keys;
use pocket_shop_storefront::services::cart::CartError;
use pocket_shop_storefront::storage::{Scope, StorageError};

fn pen() -> (ProductId, &'static str, Price) {
    (ProductId::new(1), "Pen", Price::from_cents(1000))
}

fn ink() -> (ProductId, &'static str, Price) {
    (ProductId::new(2), "Ink", Price::from_cents(250))
}

#[test]
fn test_user_cart_survives_restart() {
    let shop = TestShop::new();

    {
        let state = shop.open().expect("open");
        state.auth().login("ana@x.com").expect("login");
        let mut cart = state.cart();
        cart.init().expect("init");
        let (id, name, price) = pen();
        cart.add_to_cart(id, name, price).expect("add");
        cart.add_to_cart(id, name, price).expect("add");
    }

    let state = shop.open().expect("reopen");
    state.auth().login("ana@x.com").expect("login");
    let mut cart = state.cart();
    cart.init().expect("init");

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.subtotal(), Price::from_cents(2000));
}

#[test]
fn test_guest_cart_does_not_survive_restart() {
    let shop = TestShop::new();

    {
        let state = shop.open().expect("open");
        let mut cart = state.cart();
        cart.init().expect("init");
        let (id, name, price) = ink();
        cart.add_to_cart(id, name, price).expect("add");
        assert_eq!(cart.total_item_count(), 1);
    }

    let state = shop.open().expect("reopen");
    let mut cart = state.cart();
    cart.init().expect("init");
    assert!(cart.items().is_empty());
}

#[test]
fn test_checkout_appends_history_across_restarts() {
    let shop = TestShop::new();

    for _ in 0..2 {
        let state = shop.open().expect("open");
        state.auth().login("ana@x.com").expect("login");
        let mut cart = state.cart();
        cart.init().expect("init");
        let (id, name, price) = pen();
        cart.add_to_cart(id, name, price).expect("add");
        let (id, name, price) = ink();
        cart.add_to_cart(id, name, price).expect("add");

        assert_eq!(cart.commit_purchase().expect("commit"), 2);
        cart.clear_cart().expect("clear");
    }

    let state = shop.open().expect("reopen");
    state.auth().login("ana@x.com").expect("login");
    let mut cart = state.cart();
    cart.init().expect("init");

    assert!(cart.items().is_empty());
    let history = cart.history().expect("history");
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].product_name, "Pen");
    assert_eq!(history[3].product_name, "Ink");
    assert!(history.windows(2).all(|w| w[0].purchase_timestamp <= w[1].purchase_timestamp));
}

#[test]
fn test_carts_are_isolated_per_user() {
    let shop = TestShop::new();
    let state = shop.open().expect("open");

    state.auth().login("ana@x.com").expect("login");
    let mut cart = state.cart();
    cart.init().expect("init");
    let (id, name, price) = pen();
    cart.add_to_cart(id, name, price).expect("add");

    state.auth().login("bo@x.com").expect("login");
    let mut other = state.cart();
    other.init().expect("init");
    assert!(other.items().is_empty());

    state.auth().logout().expect("logout");
    let mut guest = state.cart();
    guest.init().expect("init");
    assert!(guest.items().is_empty());

    assert!(
        state
            .storage()
            .scope(Scope::Durable)
            .get(&keys::user_cart("ana@x.com"))
            .expect("get")
            .is_some()
    );
}

#[test]
fn test_tax_rate_from_config() {
    let shop = TestShop::new();
    let mut config = shop.config();
    config.tax_rate = "0.21".parse().expect("decimal");
    let state = pocket_shop_storefront::ShopState::open(config).expect("open");

    let mut cart = state.cart();
    cart.init().expect("init");
    let (id, name, price) = pen();
    cart.add_to_cart(id, name, price).expect("add");

    assert_eq!(cart.tax(), Price::from_cents(210));
    assert_eq!(cart.total(), Price::from_cents(1210));
}

#[test]
fn test_malformed_cart_is_reported() {
    let shop = TestShop::new();

    {
        let storage = shop.open_storage().expect("open");
        storage
            .scope(Scope::Durable)
            .set(&keys::user_cart("ana@x.com"), "{not json")
            .expect("set");
    }

    let state = shop.open().expect("reopen");
    state.auth().login("ana@x.com").expect("login");
    let mut cart = state.cart();
    let err = cart.init().expect_err("malformed cart");

    assert!(matches!(
        err,
        CartError::Storage(StorageError::Malformed { ref key, .. }) if *key == keys::user_cart("ana@x.com")
    ));
}

#[test]
fn test_corrupt_durable_file_fails_to_open() {
    let shop = TestShop::new();
    std::fs::write(shop.durable_path(), "[1, 2").expect("write");

    let err = shop.open().expect_err("corrupt file");
    assert!(matches!(err, StorageError::Malformed { .. }));
}
