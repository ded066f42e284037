//! Cart model and reducer

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::storage::{CartError, CartStorage};
use shared::models::Product;
use shared::request::OrderItemInput;

/// Product snapshot captured when the item was added.
///
/// Deliberately decoupled from the live catalog record: a later price or
/// name change does not touch carts until they are cleared and repopulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// One cart line: snapshot plus quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product: CartProduct,
    pub quantity: u32,
}

impl CartEntry {
    pub fn subtotal(&self) -> f64 {
        to_f64(line_total(self.product.price, self.quantity))
    }
}

/// Shopping cart: insertion-ordered entries keyed by product id.
///
/// Every mutation persists the entries and recomputes the total; the total
/// is always derivable from the current entries alone.
pub struct Cart<S: CartStorage> {
    entries: Vec<CartEntry>,
    total: f64,
    storage: S,
}

impl<S: CartStorage> Cart<S> {
    /// Load the persisted cart
    pub fn load(storage: S) -> Result<Self, CartError> {
        let entries = storage.load()?;
        let total = derive_total(&entries);
        Ok(Self {
            entries,
            total,
            storage,
        })
    }

    /// Load the persisted cart, falling back to an empty one when the
    /// stored state is missing or unreadable
    pub fn load_or_default(storage: S) -> Self {
        let entries = match storage.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load cart from storage, starting empty");
                Vec::new()
            }
        };
        let total = derive_total(&entries);
        Self {
            entries,
            total,
            storage,
        }
    }

    /// Add a product: merge quantities when the id is already present.
    ///
    /// A zero quantity counts as 1.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        let quantity = quantity.max(1);
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.product.id == product.id)
        {
            Some(entry) => entry.quantity += quantity,
            None => self.entries.push(CartEntry {
                product: CartProduct::from(product),
                quantity,
            }),
        }
        self.commit()
    }

    /// Remove the entry for a product id
    pub fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        self.entries.retain(|entry| entry.product.id != product_id);
        self.commit()
    }

    /// Set the quantity of an existing entry.
    ///
    /// Zero or negative quantities remove the entry entirely; no
    /// zero-quantity line ever persists.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.product.id == product_id)
        {
            entry.quantity = quantity as u32;
        }
        self.commit()
    }

    /// Empty the cart and persist the empty state
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.entries.clear();
        self.commit()
    }

    /// Current total, equal to the sum of entry subtotals
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn items(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Checkout submission lines (product references + quantities only;
    /// the server reprices from the live catalog)
    pub fn to_order_items(&self) -> Vec<OrderItemInput> {
        self.entries
            .iter()
            .map(|entry| OrderItemInput {
                product_id: entry.product.id.clone(),
                quantity: entry.quantity,
            })
            .collect()
    }

    fn commit(&mut self) -> Result<(), CartError> {
        self.total = derive_total(&self.entries);
        self.storage.save(&self.entries)
    }
}

fn derive_total(entries: &[CartEntry]) -> f64 {
    let total = entries
        .iter()
        .map(|entry| line_total(entry.product.price, entry.quantity))
        .sum::<Decimal>();
    to_f64(total)
}

fn line_total(price: f64, quantity: u32) -> Decimal {
    Decimal::from_f64(price).unwrap_or_default() * Decimal::from(quantity)
}

fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
