//! Order placement workflow integration tests
//!
//! Runs the real placement path against an in-memory store: validation,
//! price recomputation, snapshotting, stock reservation and rollback.

mod common;

use common::{line, pickup_order, seed_product, test_db};

use bakehouse_server::db::repository::{OrderRepository, ProductRepository};
use bakehouse_server::orders::place_order;
use bakehouse_server::utils::AppError;
use shared::models::{DeliveryOption, OrderStatus, PaymentMethod, PaymentStatus};

async fn stock_of(db: &surrealdb::Surreal<surrealdb::engine::local::Db>, id: &str) -> Option<i64> {
    ProductRepository::new(db.clone())
        .find_by_id(id)
        .await
        .expect("product lookup")
        .expect("product exists")
        .stock
}

#[tokio::test]
async fn total_is_computed_from_live_prices_and_items_are_snapshots() {
    let db = test_db().await;
    let cake = seed_product(&db, "Chocolate Cake", 100.0, Some(10)).await;
    let cookie = seed_product(&db, "Butter Cookie", 10.5, None).await;

    let order = place_order(
        &db,
        pickup_order("jane@example.com", vec![line(&cake, 2), line(&cookie, 3)]),
    )
    .await
    .expect("order placed");

    assert_eq!(order.total, 231.5);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_method, PaymentMethod::Cod);
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    // Line items are snapshots of the live products
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].product_id, cake.id);
    assert_eq!(order.items[0].name, "Chocolate Cake");
    assert_eq!(order.items[0].price, 100.0);
    assert_eq!(order.items[0].quantity, 2);

    // Tracked stock decremented by the ordered quantity, untracked untouched
    assert_eq!(stock_of(&db, &cake.id).await, Some(8));
    assert_eq!(stock_of(&db, &cookie.id).await, None);
}

#[tokio::test]
async fn snapshots_survive_later_catalog_edits() {
    let db = test_db().await;
    let cake = seed_product(&db, "Chocolate Cake", 100.0, None).await;

    let order = place_order(&db, pickup_order("jane@example.com", vec![line(&cake, 1)]))
        .await
        .expect("order placed");

    // Reprice and rename the product after the order exists
    let products = ProductRepository::new(db.clone());
    products
        .update(
            &cake.id,
            shared::models::ProductUpdate {
                name: Some("Deluxe Cake".to_string()),
                description: None,
                price: Some(999.0),
                category: None,
                image: None,
                stock: None,
                is_active: None,
            },
        )
        .await
        .expect("product update");

    let reloaded = OrderRepository::new(db.clone())
        .find_by_id(&order.id)
        .await
        .expect("lookup")
        .expect("order exists");
    assert_eq!(reloaded.items[0].name, "Chocolate Cake");
    assert_eq!(reloaded.items[0].price, 100.0);
    assert_eq!(reloaded.total, 100.0);
}

#[tokio::test]
async fn customer_email_is_normalized_and_lookup_is_case_insensitive() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, None).await;

    let order = place_order(&db, pickup_order("Jane@Example.com", vec![line(&cake, 1)]))
        .await
        .expect("order placed");
    assert_eq!(order.customer_info.email, "jane@example.com");

    let repo = OrderRepository::new(db.clone());
    let (found, total) = repo
        .find_by_email_page("JANE@EXAMPLE.COM", 1, 10)
        .await
        .expect("email lookup");
    assert_eq!(total, 1);
    assert_eq!(found[0].id, order.id);
}

#[tokio::test]
async fn missing_product_rejects_whole_submission() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, Some(5)).await;

    let mut request = pickup_order("jane@example.com", vec![line(&cake, 1)]);
    request.items.push(shared::request::OrderItemInput {
        product_id: "product:doesnotexist".to_string(),
        quantity: 1,
    });

    let err = place_order(&db, request).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert!(msg.contains("is not available"), "got: {msg}"),
        other => panic!("expected validation error, got {other:?}"),
    }

    // No order was created and no stock was touched
    assert_eq!(OrderRepository::new(db.clone()).count_all().await.unwrap(), 0);
    assert_eq!(stock_of(&db, &cake.id).await, Some(5));
}

#[tokio::test]
async fn inactive_product_is_never_orderable() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, Some(5)).await;
    ProductRepository::new(db.clone())
        .deactivate(&cake.id)
        .await
        .expect("deactivate");

    let err = place_order(&db, pickup_order("jane@example.com", vec![line(&cake, 1)]))
        .await
        .unwrap_err();
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("\"Cake\" is not available"), "got: {msg}")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(OrderRepository::new(db.clone()).count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn insufficient_stock_rejects_and_leaves_stock_unchanged() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, Some(2)).await;

    let err = place_order(&db, pickup_order("jane@example.com", vec![line(&cake, 3)]))
        .await
        .unwrap_err();
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("Insufficient stock for \"Cake\""), "got: {msg}");
            assert!(msg.contains("Available: 2"), "got: {msg}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(stock_of(&db, &cake.id).await, Some(2));
    assert_eq!(OrderRepository::new(db.clone()).count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn stock_exhaustion_scenario() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 100.0, Some(2)).await;

    // First order takes the whole stock
    let order = place_order(&db, pickup_order("a@example.com", vec![line(&cake, 2)]))
        .await
        .expect("first order");
    assert_eq!(order.total, 200.0);
    assert_eq!(stock_of(&db, &cake.id).await, Some(0));

    // Second order arrives after the first completed
    let err = place_order(&db, pickup_order("b@example.com", vec![line(&cake, 1)]))
        .await
        .unwrap_err();
    match err {
        AppError::Validation(msg) => assert!(msg.contains("Available: 0"), "got: {msg}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn decrements_sum_to_ordered_quantities_across_products() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 10.0, Some(7)).await;
    let bread = seed_product(&db, "Bread", 5.0, Some(9)).await;

    place_order(
        &db,
        pickup_order("jane@example.com", vec![line(&cake, 2), line(&bread, 3)]),
    )
    .await
    .expect("order placed");

    assert_eq!(stock_of(&db, &cake.id).await, Some(5));
    assert_eq!(stock_of(&db, &bread.id).await, Some(6));
}

#[tokio::test]
async fn failed_reservation_rolls_back_earlier_reservations() {
    let db = test_db().await;
    // Both lines reference the same product; each passes validation against
    // the same read (5 >= 3) but the second reservation loses the race
    // against the first.
    let cake = seed_product(&db, "Cake", 10.0, Some(5)).await;

    let err = place_order(
        &db,
        pickup_order("jane@example.com", vec![line(&cake, 3), line(&cake, 3)]),
    )
    .await
    .unwrap_err();
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("Insufficient stock"), "got: {msg}")
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // The first line's reservation was released
    assert_eq!(stock_of(&db, &cake.id).await, Some(5));
    assert_eq!(OrderRepository::new(db.clone()).count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn delivery_requires_complete_address() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, None).await;

    let mut request = pickup_order("jane@example.com", vec![line(&cake, 1)]);
    request.delivery_option = DeliveryOption::Delivery;
    request.customer_info.address = Some("12 Main Road".to_string());
    // city and postal code missing

    let err = place_order(&db, request).await.unwrap_err();
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("Delivery address is required"), "got: {msg}")
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Complete address goes through
    let mut request = pickup_order("jane@example.com", vec![line(&cake, 1)]);
    request.delivery_option = DeliveryOption::Delivery;
    request.customer_info.address = Some("12 Main Road".to_string());
    request.customer_info.city = Some("Ooty".to_string());
    request.customer_info.postal_code = Some("643001".to_string());
    place_order(&db, request).await.expect("delivery order");
}

#[tokio::test]
async fn transport_boundary_validation_rejects_bad_input() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, None).await;

    // Invalid email
    let mut request = pickup_order("not-an-email", vec![line(&cake, 1)]);
    request.customer_info.email = "not-an-email".to_string();
    assert!(matches!(
        place_order(&db, request).await,
        Err(AppError::Validation(_))
    ));

    // Empty item list
    let request = pickup_order("jane@example.com", vec![]);
    assert!(matches!(
        place_order(&db, request).await,
        Err(AppError::Validation(_))
    ));

    // Zero quantity
    let mut request = pickup_order("jane@example.com", vec![line(&cake, 1)]);
    request.items[0].quantity = 0;
    assert!(matches!(
        place_order(&db, request).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn status_update_persists_and_missing_order_is_not_found() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, None).await;
    let order = place_order(&db, pickup_order("jane@example.com", vec![line(&cake, 1)]))
        .await
        .expect("order placed");

    let repo = OrderRepository::new(db.clone());
    let updated = repo
        .update_status(&order.id, OrderStatus::Cancelled)
        .await
        .expect("status update");
    assert_eq!(updated.status, OrderStatus::Cancelled);

    let reloaded = repo.find_by_id(&order.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, OrderStatus::Cancelled);

    let err = repo
        .update_status("order:doesnotexist", OrderStatus::Ready)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        bakehouse_server::db::repository::RepoError::NotFound(_)
    ));
}

#[tokio::test]
async fn order_pagination_pages_newest_first() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 10.0, None).await;

    for _ in 0..5 {
        let mut request = pickup_order("jane@example.com", vec![line(&cake, 1)]);
        // Same email, several orders
        request.customer_info.name = "Jane Doe".to_string();
        place_order(&db, request).await.expect("order placed");
    }

    let repo = OrderRepository::new(db.clone());
    let (page1, total) = repo
        .find_by_email_page("jane@example.com", 1, 2)
        .await
        .expect("page 1");
    assert_eq!(total, 5);
    assert_eq!(page1.len(), 2);

    let (page3, _) = repo
        .find_by_email_page("jane@example.com", 3, 2)
        .await
        .expect("page 3");
    assert_eq!(page3.len(), 1);
}

#[tokio::test]
async fn whitespace_only_notes_are_dropped() {
    let db = test_db().await;
    let cake = seed_product(&db, "Cake", 50.0, None).await;

    let mut request = pickup_order("jane@example.com", vec![line(&cake, 1)]);
    request.notes = Some("   ".to_string());
    let order = place_order(&db, request).await.expect("order placed");
    assert_eq!(order.notes, None);
}
