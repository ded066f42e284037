//! Shared test fixtures: in-memory database and catalog seeding.

#![allow(dead_code)]

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use bakehouse_server::db::define_schema;
use bakehouse_server::db::repository::ProductRepository;
use shared::models::{Category, CustomerInfo, DeliveryOption, Product, ProductCreate};
use shared::request::{OrderItemInput, PlaceOrderRequest};

pub async fn test_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("in-memory db");
    db.use_ns("bakehouse")
        .use_db("test")
        .await
        .expect("namespace selection");
    define_schema(&db).await.expect("schema");
    db
}

pub async fn seed_product(
    db: &Surreal<Db>,
    name: &str,
    price: f64,
    stock: Option<i64>,
) -> Product {
    ProductRepository::new(db.clone())
        .create(ProductCreate {
            name: name.to_string(),
            description: None,
            price,
            category: Category::Cakes,
            image: None,
            stock,
        })
        .await
        .expect("seed product")
}

pub fn customer(email: &str) -> CustomerInfo {
    CustomerInfo {
        name: "Jane Doe".to_string(),
        email: email.to_string(),
        phone: "9876543210".to_string(),
        address: None,
        city: None,
        postal_code: None,
    }
}

pub fn pickup_order(email: &str, items: Vec<OrderItemInput>) -> PlaceOrderRequest {
    PlaceOrderRequest {
        customer_info: customer(email),
        items,
        delivery_option: DeliveryOption::Pickup,
        notes: None,
    }
}

pub fn line(product: &Product, quantity: u32) -> OrderItemInput {
    OrderItemInput {
        product_id: product.id.clone(),
        quantity,
    }
}
