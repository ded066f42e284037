//! Order placement workflow
//!
//! Turns a checkout submission into a persisted order, or a rejection:
//!
//! 1. Normalize the customer email (trim + lowercase).
//! 2. For home delivery, require a complete address before touching stock.
//! 3. Validate every line against the live catalog in input order and
//!    snapshot `{product_id, name, price, quantity, image}`; prices always
//!    come from the catalog, never from the client.
//! 4. Reserve stock per tracked item with a compare-and-swap decrement; if
//!    any reservation loses a race, every prior reservation is released and
//!    the submission is rejected. No partial decrements survive.
//! 5. Persist the order with the Decimal-computed total.
//!
//! Notification dispatch is the caller's concern: placement succeeds or
//! fails on the durable record alone.

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use validator::Validate;

use crate::db::repository::{OrderRepository, ProductRepository};
use crate::orders::money;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{DeliveryOption, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus};
use shared::request::PlaceOrderRequest;

/// A stock reservation applied against a tracked product
struct Reservation {
    product_id: String,
    quantity: u32,
}

pub async fn place_order(db: &Surreal<Db>, request: PlaceOrderRequest) -> AppResult<Order> {
    request.validate()?;

    let mut customer = request.customer_info;
    customer.email = customer.email.trim().to_lowercase();

    if request.delivery_option == DeliveryOption::Delivery {
        let complete = [&customer.address, &customer.city, &customer.postal_code]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()));
        if !complete {
            return Err(AppError::validation(
                "Delivery address is required for home delivery",
            ));
        }
        validate_optional_text(&customer.address, "address", MAX_ADDRESS_LEN)?;
        validate_optional_text(&customer.city, "city", MAX_NAME_LEN)?;
        validate_optional_text(&customer.postal_code, "postal code", MAX_SHORT_TEXT_LEN)?;
    }

    let products = ProductRepository::new(db.clone());

    // Validation phase: every line checked against the live catalog before
    // any stock is touched.
    let mut total = Decimal::ZERO;
    let mut items: Vec<OrderItem> = Vec::with_capacity(request.items.len());
    let mut tracked: Vec<Reservation> = Vec::new();
    for input in &request.items {
        let product = match products.find_by_id(&input.product_id).await? {
            Some(product) if product.is_active => product,
            Some(product) => {
                return Err(AppError::validation(format!(
                    "Product \"{}\" is not available",
                    product.name
                )));
            }
            None => {
                return Err(AppError::validation(format!(
                    "Product \"{}\" is not available",
                    input.product_id
                )));
            }
        };

        if !product.has_stock_for(input.quantity) {
            return Err(AppError::validation(format!(
                "Insufficient stock for \"{}\". Available: {}",
                product.name,
                product.stock.unwrap_or(0)
            )));
        }

        total += money::line_total(product.price, input.quantity);
        if product.stock.is_some() {
            tracked.push(Reservation {
                product_id: product.id.clone(),
                quantity: input.quantity,
            });
        }
        items.push(OrderItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: input.quantity,
            image: product.image.clone(),
        });
    }

    // Reservation phase: CAS decrement per tracked item. A failed swap means
    // a concurrent order won the remaining stock between our read and write.
    let mut reserved: Vec<Reservation> = Vec::new();
    for reservation in tracked {
        match products
            .try_reserve_stock(&reservation.product_id, reservation.quantity)
            .await
        {
            Ok(true) => reserved.push(reservation),
            Ok(false) => {
                release_reservations(&products, &reserved).await;
                let name = items
                    .iter()
                    .find(|item| item.product_id == reservation.product_id)
                    .map(|item| item.name.clone())
                    .unwrap_or_else(|| reservation.product_id.clone());
                let available = products
                    .find_by_id(&reservation.product_id)
                    .await
                    .ok()
                    .flatten()
                    .and_then(|p| p.stock)
                    .unwrap_or(0);
                return Err(AppError::validation(format!(
                    "Insufficient stock for \"{name}\". Available: {available}"
                )));
            }
            Err(e) => {
                release_reservations(&products, &reserved).await;
                return Err(e.into());
            }
        }
    }

    let order = Order {
        id: String::new(),
        customer_info: customer,
        items,
        total: money::to_f64(total),
        status: OrderStatus::Pending,
        delivery_option: request.delivery_option,
        payment_method: PaymentMethod::Cod,
        payment_status: PaymentStatus::Pending,
        notes: request.notes.filter(|n| !n.trim().is_empty()),
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    match OrderRepository::new(db.clone()).create(order).await {
        Ok(order) => {
            tracing::info!(
                order_id = %order.id,
                total = order.total,
                item_count = order.items.len(),
                "Order placed"
            );
            Ok(order)
        }
        Err(e) => {
            // Persisting failed after stock was already reserved; hand the
            // stock back before surfacing the error.
            release_reservations(&products, &reserved).await;
            Err(e.into())
        }
    }
}

async fn release_reservations(products: &ProductRepository, reserved: &[Reservation]) {
    for reservation in reserved {
        if let Err(e) = products
            .release_stock(&reservation.product_id, reservation.quantity)
            .await
        {
            tracing::error!(
                product_id = %reservation.product_id,
                quantity = reservation.quantity,
                error = %e,
                "Failed to release stock reservation"
            );
        }
    }
}
