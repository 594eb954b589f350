use rust_decimal::Decimal;
use std::time::Duration;
use storefront::clients::PageRequest;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::Storefront;
use storefront::model::{CartMutation, CartSessionId, ProductCreate, ProductId, ProductUpdate};
use storefront::product_actor::{CartError, ProductError};

fn unseeded() -> Storefront {
    Storefront::with_config(&StorefrontConfig {
        seed_catalog: false,
        ..StorefrontConfig::default()
    })
}

async fn product_with_stock(storefront: &Storefront, stock: u32) -> ProductId {
    storefront
        .product_client
        .create_product(ProductCreate::new("Widget", Decimal::new(1050, 2), stock))
        .await
        .expect("Failed to create product")
}

async fn stock_of(storefront: &Storefront, id: ProductId) -> u32 {
    storefront
        .product_client
        .check_stock(id)
        .await
        .expect("Failed to check stock")
}

/// Walks the add, adjust, remove cycle and checks stock after every step.
#[tokio::test]
async fn test_cart_reservation_scenario() {
    let storefront = unseeded();
    let cart = &storefront.cart_client;
    let session = CartSessionId::from("scenario");
    let id = product_with_stock(&storefront, 10).await;

    let line = cart.add_to_cart(session.clone(), id, 4).await.unwrap();
    assert_eq!(line.line.quantity, 4);
    assert_eq!(line.product.stock_quantity, 6);
    assert_eq!(stock_of(&storefront, id).await, 6);

    match cart.set_cart_quantity(session.clone(), id, 2).await.unwrap() {
        CartMutation::Updated(view) => {
            assert_eq!(view.line.quantity, 2);
            assert_eq!(view.product.stock_quantity, 8);
        }
        other => panic!("expected an updated line, got {other:?}"),
    }

    let removed = cart.remove_from_cart(session.clone(), id).await.unwrap();
    assert_eq!(removed.released, 2);
    assert_eq!(stock_of(&storefront, id).await, 10);

    let err = cart.add_to_cart(session.clone(), id, 11).await.unwrap_err();
    assert_eq!(
        err,
        CartError::InsufficientStock {
            requested: 11,
            available: 10
        }
    );
    assert_eq!(stock_of(&storefront, id).await, 10);
    assert!(cart.get_cart(&session).await.unwrap().is_empty());

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_repeated_adds_share_one_line() {
    let storefront = unseeded();
    let cart = &storefront.cart_client;
    let session = CartSessionId::from("repeat");
    let id = product_with_stock(&storefront, 5).await;

    let first = cart.add_to_cart(session.clone(), id, 1).await.unwrap();
    let second = cart.add_to_cart(session.clone(), id, 1).await.unwrap();
    assert_eq!(first.line.id, second.line.id);

    let lines = cart.get_cart(&session).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line.quantity, 2);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_setting_zero_twice_is_idempotent() {
    let storefront = unseeded();
    let cart = &storefront.cart_client;
    let session = CartSessionId::from("zero");
    let id = product_with_stock(&storefront, 5).await;

    cart.add_to_cart(session.clone(), id, 3).await.unwrap();
    let removed = cart.set_cart_quantity(session.clone(), id, 0).await.unwrap();
    assert!(matches!(removed, CartMutation::Removed(ref ack) if ack.released == 3));
    assert_eq!(stock_of(&storefront, id).await, 5);

    assert!(cart.get_cart(&session).await.unwrap().is_empty());

    // The line is gone, so a second zero is NotFound and leaves stock alone.
    let err = cart.set_cart_quantity(session.clone(), id, 0).await.unwrap_err();
    assert!(matches!(err, CartError::NotFound(_)));
    assert_eq!(stock_of(&storefront, id).await, 5);
    assert!(cart.get_cart(&session).await.unwrap().is_empty());

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_first_adds_from_one_session_share_a_line() {
    let storefront = unseeded();
    let session = CartSessionId::from("double-click");
    let id = product_with_stock(&storefront, 5).await;

    let (a, b) = (storefront.cart_client.clone(), storefront.cart_client.clone());
    let (sa, sb) = (session.clone(), session.clone());
    let (first, second) = tokio::join!(
        tokio::spawn(async move { a.add_to_cart(sa, id, 1).await }),
        tokio::spawn(async move { b.add_to_cart(sb, id, 1).await }),
    );
    let first = first.unwrap().unwrap();
    let second = second.unwrap().unwrap();
    assert_eq!(first.line.id, second.line.id);

    let lines = storefront.cart_client.get_cart(&session).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line.quantity, 2);
    assert_eq!(stock_of(&storefront, id).await, 3);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_last_unit_race_has_one_winner() {
    let storefront = unseeded();
    let id = product_with_stock(&storefront, 1).await;

    let a = storefront.cart_client.clone();
    let b = storefront.cart_client.clone();
    let (first, second) = tokio::join!(
        tokio::spawn(async move { a.add_to_cart("racer-a".into(), id, 1).await }),
        tokio::spawn(async move { b.add_to_cart("racer-b".into(), id, 1).await }),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(CartError::InsufficientStock {
            requested: 1,
            available: 0
        })
    )));
    assert_eq!(stock_of(&storefront, id).await, 0);

    storefront.shutdown().await.unwrap();
}

/// Available plus reserved units stay constant under concurrent cart traffic.
#[tokio::test]
async fn test_concurrent_sessions_conserve_stock() {
    let storefront = unseeded();
    let id = product_with_stock(&storefront, 20).await;

    let mut handles = Vec::new();
    for n in 0..16 {
        let cart = storefront.cart_client.clone();
        handles.push(tokio::spawn(async move {
            let session = CartSessionId(format!("shopper-{n}"));
            if cart.add_to_cart(session.clone(), id, 3).await.is_ok() && n % 2 == 0 {
                cart.set_cart_quantity(session, id, 1).await.map(|_| ())
            } else {
                Ok(())
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut reserved = 0;
    for n in 0..16 {
        let session = CartSessionId(format!("shopper-{n}"));
        for view in storefront.cart_client.get_cart(&session).await.unwrap() {
            assert!(view.line.quantity > 0);
            reserved += view.line.quantity;
        }
    }
    assert_eq!(stock_of(&storefront, id).await + reserved, 20);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_abandoned_request_still_commits_whole() {
    let storefront = unseeded();
    let id = product_with_stock(&storefront, 10).await;
    let session = CartSessionId::from("impatient");

    // The timeout polls the request once, which puts it in the mailbox, then gives up before the
    // single-threaded test runtime lets the actor reply.
    let abandoned = tokio::time::timeout(
        Duration::ZERO,
        storefront.cart_client.add_to_cart(session.clone(), id, 4),
    )
    .await;
    assert!(abandoned.is_err());

    let lines = storefront.cart_client.get_cart(&session).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line.quantity, 4);
    assert_eq!(stock_of(&storefront, id).await, 6);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_get_cart_orders_lines_by_creation() {
    let storefront = unseeded();
    let cart = &storefront.cart_client;
    let session = CartSessionId::from("ordered");
    let first = product_with_stock(&storefront, 5).await;
    let second = product_with_stock(&storefront, 5).await;

    cart.add_to_cart(session.clone(), second, 1).await.unwrap();
    cart.add_to_cart(session.clone(), first, 1).await.unwrap();
    cart.add_to_cart("someone-else".into(), first, 1).await.unwrap();

    let lines = cart.get_cart(&session).await.unwrap();
    let products: Vec<_> = lines.iter().map(|v| v.line.product_id).collect();
    assert_eq!(products, vec![second, first]);
    assert!(lines[0].line.id < lines[1].line.id);
    assert!(lines.iter().all(|v| v.line.cart_session_id == session));

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_snapshot_reflects_current_product() {
    let storefront = unseeded();
    let session = CartSessionId::from("renamed");
    let id = product_with_stock(&storefront, 5).await;
    storefront.cart_client.add_to_cart(session.clone(), id, 2).await.unwrap();

    let update = ProductUpdate {
        name: Some("Widget Mk II".into()),
        ..ProductUpdate::default()
    };
    storefront.product_client.update_product(id, update).await.unwrap();

    let lines = storefront.cart_client.get_cart(&session).await.unwrap();
    assert_eq!(lines[0].product.name, "Widget Mk II");

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_product_and_line_are_not_found() {
    let storefront = unseeded();
    let cart = &storefront.cart_client;
    let session = CartSessionId::from("lost");

    let err = cart.add_to_cart(session.clone(), ProductId(99), 1).await.unwrap_err();
    assert!(matches!(err, CartError::NotFound(_)));

    let id = product_with_stock(&storefront, 5).await;
    let err = cart.remove_from_cart(session.clone(), id).await.unwrap_err();
    assert!(matches!(err, CartError::NotFound(_)));
    let err = cart.set_cart_quantity(session, id, 2).await.unwrap_err();
    assert!(matches!(err, CartError::NotFound(_)));

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_is_refused_while_carts_hold_units() {
    let storefront = unseeded();
    let session = CartSessionId::from("holder");
    let id = product_with_stock(&storefront, 5).await;
    storefront.cart_client.add_to_cart(session.clone(), id, 2).await.unwrap();

    let err = storefront.product_client.delete_product(id).await.unwrap_err();
    assert_eq!(
        err,
        ProductError::ReservationsOutstanding {
            product: id,
            reserved: 2
        }
    );

    storefront.cart_client.remove_from_cart(session, id).await.unwrap();
    storefront.product_client.delete_product(id).await.unwrap();
    assert!(matches!(
        storefront.product_client.get_product(id).await,
        Err(ProductError::NotFound(_))
    ));

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stock_update_reprovisions_available_units() {
    let storefront = unseeded();
    let session = CartSessionId::from("held");
    let id = product_with_stock(&storefront, 10).await;
    storefront.cart_client.add_to_cart(session.clone(), id, 4).await.unwrap();

    let update = ProductUpdate {
        stock_quantity: Some(20),
        ..ProductUpdate::default()
    };
    let snapshot = storefront.product_client.update_product(id, update).await.unwrap();
    assert_eq!(snapshot.stock_quantity, 20);

    // The held units are untouched and come back on top of the new count.
    let removed = storefront.cart_client.remove_from_cart(session, id).await.unwrap();
    assert_eq!(removed.stock_quantity, 24);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reprovisioning_never_loses_held_units() {
    let storefront = unseeded();
    let session = CartSessionId::from("hoarder");
    let id = product_with_stock(&storefront, 10).await;
    storefront.cart_client.add_to_cart(session.clone(), id, 10).await.unwrap();

    let overflow = ProductUpdate {
        stock_quantity: Some(u32::MAX),
        ..ProductUpdate::default()
    };
    let err = storefront.product_client.update_product(id, overflow).await.unwrap_err();
    assert!(matches!(err, ProductError::Validation(_)));
    assert_eq!(stock_of(&storefront, id).await, 0);

    let at_limit = ProductUpdate {
        stock_quantity: Some(u32::MAX - 10),
        ..ProductUpdate::default()
    };
    storefront.product_client.update_product(id, at_limit).await.unwrap();

    match storefront.cart_client.set_cart_quantity(session.clone(), id, 1).await.unwrap() {
        CartMutation::Updated(view) => assert_eq!(view.product.stock_quantity, u32::MAX - 1),
        other => panic!("expected an updated line, got {other:?}"),
    }
    let removed = storefront.cart_client.remove_from_cart(session, id).await.unwrap();
    assert_eq!(removed.released, 1);
    assert_eq!(removed.stock_quantity, u32::MAX);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_product_updates_change_nothing() {
    let storefront = unseeded();
    let id = product_with_stock(&storefront, 10).await;

    let update = ProductUpdate {
        stock_quantity: Some(1),
        price: Some(Decimal::new(-5, 0)),
        ..ProductUpdate::default()
    };
    let err = storefront.product_client.update_product(id, update).await.unwrap_err();
    assert!(matches!(err, ProductError::Validation(_)));
    assert_eq!(stock_of(&storefront, id).await, 10);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_listing_pages() {
    let storefront = Storefront::start(StorefrontConfig::default()).await.unwrap();

    let all = storefront
        .product_client
        .list_products(PageRequest::default())
        .await
        .unwrap();
    let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Laptop Pro X",
            "Wireless Mouse",
            "Mechanical Keyboard",
            "USB-C Hub",
            "4K Monitor"
        ]
    );
    assert_eq!(all[0].price, Decimal::new(129999, 2));

    let page = storefront
        .product_client
        .list_products(PageRequest { skip: 3, limit: 10 })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_health_reports_catalog_size() {
    let storefront = Storefront::start(StorefrontConfig::default()).await.unwrap();
    let report = storefront.health().await;
    assert_eq!(report.products, Some(5));
    storefront.shutdown().await.unwrap();
}
