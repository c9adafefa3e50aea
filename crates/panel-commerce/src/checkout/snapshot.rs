//! Read-only cart snapshot for checkout.

use crate::cart::{CartItem, CartState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A frozen copy of the cart taken when the shopper proceeds to checkout.
///
/// Measured items keep their per-piece breakdown so the order can be cut
/// exactly as configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSnapshot {
    pub items: Vec<CartItem>,
    pub total_items: usize,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl CheckoutSnapshot {
    /// Snapshot `state`; `None` when there is nothing to check out.
    pub fn from_state(state: &CartState) -> Option<Self> {
        if state.is_empty() {
            return None;
        }
        Some(Self {
            items: state.items.clone(),
            total_items: state.total_items,
            total_amount: state.total_amount,
            created_at: Utc::now(),
        })
    }

    /// Total number of cut pieces across measured items.
    pub fn piece_count(&self) -> u64 {
        self.items.iter().map(CartItem::piece_count).sum()
    }

    /// Pretty JSON for the payment collaborator.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{reduce, CartCommand};
    use crate::catalog::{Product, Unit};
    use crate::measure::{CartLineItem, Dimension, LineItem, Sixteenths};

    #[test]
    fn test_empty_cart_has_no_snapshot() {
        assert!(CheckoutSnapshot::from_state(&CartState::new()).is_none());
    }

    #[test]
    fn test_snapshot_keeps_breakdown() {
        let product = Product::new("ss", "Standing Seam", Unit::LF);
        let lines = vec![CartLineItem::from_line(
            &LineItem::with_dimension(4, Dimension::new(12, 0, Sixteenths::NONE))
                .with_piece_mark("R1"),
            3.0,
        )];
        let state = reduce(
            CartState::new(),
            CartCommand::AddItem(CartItem::from_lines(&product, 3.0, lines)),
        );

        let snapshot = CheckoutSnapshot::from_state(&state).unwrap();
        assert_eq!(snapshot.total_items, 1);
        assert_eq!(snapshot.piece_count(), 4);
        assert!((snapshot.total_amount - 144.0).abs() < 1e-9);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"pieceMark\": \"R1\""));
        assert!(json.contains("\"createdAt\""));
    }
}
