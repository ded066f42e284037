//! Request DTOs
//!
//! Bodies the API accepts, with validator-derived boundary checks.
//! Clients never supply prices; the server reprices every line item from
//! the live catalog at submission time.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{CustomerInfo, DeliveryOption, EnquiryStatus, EnquiryType, OrderStatus};

/// One requested line: a product reference and a quantity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    #[serde(alias = "_id")]
    pub product_id: String,
    #[validate(range(min = 1, message = "Item quantity must be at least 1"))]
    pub quantity: u32,
}

/// Checkout submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[validate(nested)]
    pub customer_info: CustomerInfo,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemInput>,
    pub delivery_option: DeliveryOption,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

/// Admin order status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Enquiry submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryCreate {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 5, max = 20, message = "Please provide a valid phone number"))]
    pub phone: String,
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub enquiry_type: EnquiryType,
    #[validate(length(min = 1, max = 1000, message = "Message must be between 1 and 1000 characters"))]
    pub message: String,
}

/// Admin enquiry status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryStatusUpdate {
    pub status: EnquiryStatus,
}

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Admin login response: capability token with explicit expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}
