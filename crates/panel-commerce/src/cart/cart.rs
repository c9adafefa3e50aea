//! Cart and cart item types.

use crate::catalog::{Product, Unit};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::measure::CartLineItem;
use serde::{Deserialize, Serialize};

/// One product in the cart. `product_id` is unique within a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    pub unit: Unit,
    pub price_per_unit: f64,
    /// Linear feet for `LF` products, a count otherwise.
    pub quantity: f64,
    pub total_price: f64,
    #[serde(default)]
    pub img: Option<String>,
    /// Per-piece breakdown for measured products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<CartLineItem>>,
}

impl CartItem {
    /// Build an item from submitted, priced lines.
    pub fn from_lines(product: &Product, price_per_unit: f64, lines: Vec<CartLineItem>) -> Self {
        let quantity = lines.iter().map(|l| l.total_lf).sum();
        let total_price = lines.iter().map(|l| l.line_price).sum();
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit: product.unit,
            price_per_unit,
            quantity,
            total_price,
            img: product.img.clone(),
            lines: Some(lines),
        }
    }

    /// Build an item for a product sold by count (`SQ`/`EA`).
    pub fn from_count(
        product: &Product,
        price_per_unit: f64,
        count: u32,
    ) -> Result<Self, CommerceError> {
        if count == 0 {
            return Err(CommerceError::validation("quantity must be at least 1"));
        }
        Ok(Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit: product.unit,
            price_per_unit,
            quantity: count as f64,
            total_price: price_per_unit * count as f64,
            img: product.img.clone(),
            lines: None,
        })
    }

    /// Number of cut pieces behind this item (0 when not measured).
    pub fn piece_count(&self) -> u64 {
        self.lines
            .iter()
            .flatten()
            .map(|l| l.line.qty as u64)
            .sum()
    }

    /// Whether every figure is finite and non-negative with a positive quantity.
    pub(crate) fn is_well_formed(&self) -> bool {
        [self.price_per_unit, self.quantity, self.total_price]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
            && self.quantity > 0.0
    }
}

/// Cart contents with derived totals.
///
/// `total_items` is the number of distinct products and `total_amount` the
/// sum of their `total_price`; both are recomputed after every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_items: usize,
    #[serde(default)]
    pub total_amount: f64,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute totals from the items.
    pub fn recompute(&mut self) {
        self.total_items = self.items.len();
        self.total_amount = self.items.iter().map(|i| i.total_price).sum();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    pub(crate) fn get_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| &i.product_id == product_id)
    }

    /// Decode a persisted cart.
    pub fn from_json(json: &[u8]) -> Result<Self, CommerceError> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Encode for persistence.
    pub fn to_json(&self) -> Result<Vec<u8>, CommerceError> {
        Ok(serde_json::to_vec(self)?)
    }
}
