//! Product Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fixed product categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cakes,
    Pastries,
    Cookies,
    Breads,
    Desserts,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Cakes => "cakes",
            Category::Pastries => "pastries",
            Category::Cookies => "cookies",
            Category::Breads => "breads",
            Category::Desserts => "desserts",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cakes" => Ok(Category::Cakes),
            "pastries" => Ok(Category::Pastries),
            "cookies" => Ok(Category::Cookies),
            "breads" => Ok(Category::Breads),
            "desserts" => Ok(Category::Desserts),
            _ => Err(
                "Category must be one of: cakes, pastries, cookies, breads, desserts".to_string(),
            ),
        }
    }
}

/// Product model
///
/// `stock` absent means availability is not tracked (unlimited).
/// Inactive products stay in the store for historical order references
/// but are never orderable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: Category,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Whether a requested quantity can currently be fulfilled
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        match self.stock {
            Some(stock) => stock >= quantity as i64,
            None => true,
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 2, max = 100, message = "Product name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,
    pub category: Category,
    pub image: Option<String>,
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    pub stock: Option<i64>,
}

/// Update product payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[validate(length(min = 2, max = 100, message = "Product name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub image: Option<String>,
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    pub stock: Option<i64>,
    pub is_active: Option<bool>,
}
