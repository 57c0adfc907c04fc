//! Integration tests for registration, credentials, and sessions.

use pocket_shop_core::{Price, ProductId};
use pocket_shop_integration_tests::TestShop;
use pocket_shop_storefront::db::keys;
use pocket_shop_storefront::services::auth::{password_error_message, sha256_hex, validate_password};
use pocket_shop_storefront::storage::Scope;

#[tokio::test]
async fn test_accounts_survive_restart() {
    let shop = TestShop::new();

    {
        let state = shop.open().expect("open");
        let auth = state.auth();
        assert!(auth.register("Ana", "ana@x.com", "Secret1!").await.expect("register"));
        assert!(!auth.register("Ana2", "ana@x.com", "Other2@").await.expect("register"));
    }

    let state = shop.open().expect("reopen");
    let auth = state.auth();
    assert_eq!(auth.users().expect("users").len(), 1);
    assert!(auth.verify_credentials("ana@x.com", "Secret1!").await.expect("verify"));
    assert!(!auth.verify_credentials("ana@x.com", "Other2@").await.expect("verify"));
}

#[tokio::test]
async fn test_concurrent_contexts_keep_each_others_data() {
    let shop = TestShop::new();
    let first = shop.open().expect("open first");
    let second = shop.open().expect("open second");

    assert!(
        first
            .auth()
            .register("Ana", "ana@x.com", "Secret1!")
            .await
            .expect("register")
    );

    second.auth().login("ana@x.com").expect("login");
    let mut cart = second.cart();
    cart.init().expect("init");
    cart.add_to_cart(ProductId::new(1), "Pen", Price::from_cents(1000))
        .expect("add");

    assert!(
        second
            .auth()
            .verify_credentials("ana@x.com", "Secret1!")
            .await
            .expect("verify")
    );

    let third = shop.open().expect("open third");
    assert_eq!(third.auth().users().expect("users").len(), 1);
    third.auth().login("ana@x.com").expect("login");
    let mut cart = third.cart();
    cart.init().expect("init");
    assert_eq!(cart.total_item_count(), 1);
}

#[tokio::test]
async fn test_session_does_not_survive_restart() {
    let shop = TestShop::new();

    {
        let state = shop.open().expect("open");
        state.auth().login("ana@x.com").expect("login");
        assert!(state.auth().is_authenticated().expect("session"));
    }

    let state = shop.open().expect("reopen");
    assert!(!state.auth().is_authenticated().expect("session"));
    assert!(
        state
            .storage()
            .scope(Scope::Durable)
            .get(keys::SESSION)
            .expect("get")
            .is_none()
    );
}

#[tokio::test]
async fn test_stored_user_list_format() {
    let shop = TestShop::new();
    let state = shop.open().expect("open");
    state
        .auth()
        .register("Ana", "ana@x.com", "Secret1!")
        .await
        .expect("register");

    let raw = std::fs::read_to_string(shop.durable_path()).expect("read durable file");
    let file: serde_json::Value = serde_json::from_str(&raw).expect("json object");
    let users: serde_json::Value =
        serde_json::from_str(file[keys::USERS].as_str().expect("string value")).expect("json list");

    assert_eq!(users[0]["displayName"], "Ana");
    assert_eq!(users[0]["email"], "ana@x.com");
    assert_eq!(users[0]["passwordDigest"], sha256_hex("Secret1!"));
    assert!(!raw.contains("Secret1!"));
}

#[test]
fn test_password_rules_agree() {
    for password in ["Secret1!", "Other2@", "short", "NoSpecial1", "nouppercase!", "Way2Long!Pass"] {
        assert_eq!(validate_password(password), password_error_message(password).is_empty());
    }
}
