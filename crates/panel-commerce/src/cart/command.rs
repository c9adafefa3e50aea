//! Cart commands and the reducer that applies them.

use crate::cart::{CartItem, CartState};
use crate::ids::ProductId;

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Insert an item, or overwrite the price, quantity and lines of the
    /// entry with the same product id.
    AddItem(CartItem),
    /// Set a new quantity; zero or less removes the item.
    UpdateQuantity {
        product_id: ProductId,
        quantity: f64,
    },
    RemoveItem(ProductId),
    Clear,
    /// Replace the whole state, e.g. with one restored from storage.
    Load(CartState),
}

impl CartCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::AddItem(_) => "add_item",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::RemoveItem(_) => "remove_item",
            CartCommand::Clear => "clear",
            CartCommand::Load(_) => "load",
        }
    }
}

/// Apply `command` to `state`.
///
/// Totals are always recomputed from the resulting items. Commands carrying
/// non-finite or negative figures, or whose result would overflow the cart
/// total, leave the state as it was.
pub fn reduce(state: CartState, command: CartCommand) -> CartState {
    let mut next = match command {
        CartCommand::AddItem(item) => add_item(state, item),
        CartCommand::UpdateQuantity {
            product_id,
            quantity,
        } => update_quantity(state, &product_id, quantity),
        CartCommand::RemoveItem(product_id) => remove_item(state, &product_id),
        CartCommand::Clear => CartState::new(),
        CartCommand::Load(loaded) => loaded
            .items
            .into_iter()
            .fold(CartState::new(), add_item),
    };
    next.recompute();
    next
}

fn add_item(mut state: CartState, item: CartItem) -> CartState {
    if !item.is_well_formed() {
        tracing::warn!(product_id = %item.product_id, "ignoring malformed cart item");
        return state;
    }
    if !total_stays_finite(&state, &item.product_id, item.total_price) {
        tracing::warn!(product_id = %item.product_id, "ignoring cart item that overflows the total");
        return state;
    }

    match state.get_mut(&item.product_id) {
        Some(existing) => {
            existing.price_per_unit = item.price_per_unit;
            existing.quantity = item.quantity;
            existing.total_price = item.total_price;
            existing.lines = item.lines;
        }
        None => state.items.push(item),
    }
    state
}

/// Whether the cart total is still finite once `product_id` is priced at
/// `total_price`.
fn total_stays_finite(state: &CartState, product_id: &ProductId, total_price: f64) -> bool {
    let others: f64 = state
        .items
        .iter()
        .filter(|i| &i.product_id != product_id)
        .map(|i| i.total_price)
        .sum();
    (others + total_price).is_finite()
}

fn update_quantity(mut state: CartState, product_id: &ProductId, quantity: f64) -> CartState {
    if quantity.is_nan() {
        tracing::warn!(product_id = %product_id, "ignoring non-numeric quantity");
        return state;
    }
    if quantity <= 0.0 {
        return remove_item(state, product_id);
    }
    if !quantity.is_finite() {
        tracing::warn!(product_id = %product_id, "ignoring infinite quantity");
        return state;
    }

    let Some(price_per_unit) = state.get(product_id).map(|i| i.price_per_unit) else {
        return state;
    };
    let total_price = price_per_unit * quantity;
    if !total_stays_finite(&state, product_id, total_price) {
        tracing::warn!(product_id = %product_id, quantity, "ignoring quantity that overflows the total");
        return state;
    }

    if let Some(item) = state.get_mut(product_id) {
        item.quantity = quantity;
        item.total_price = total_price;
        // The per-piece breakdown no longer adds up to the new quantity.
        item.lines = None;
    }
    state
}

fn remove_item(mut state: CartState, product_id: &ProductId) -> CartState {
    state.items.retain(|i| &i.product_id != product_id);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, Unit};

    fn item(id: &str, total: f64) -> CartItem {
        let product = Product::new(id, format!("Product {id}"), Unit::EA);
        let mut item = CartItem::from_count(&product, total, 1).unwrap();
        item.total_price = total;
        item
    }

    fn add(state: CartState, item: CartItem) -> CartState {
        reduce(state, CartCommand::AddItem(item))
    }

    #[test]
    fn test_add_new_item_appends() {
        let state = add(CartState::new(), item("a", 10.0));
        let before = (state.total_items, state.total_amount);

        let state = add(state, item("b", 5.5));
        assert_eq!(state.total_items, before.0 + 1);
        assert!((state.total_amount - (before.1 + 5.5)).abs() < 1e-9);
        assert_eq!(state.items[1].product_id, ProductId::new("b"));
    }

    #[test]
    fn test_add_existing_item_replaces() {
        let state = add(CartState::new(), item("a", 10.0));
        let state = add(state, item("a", 25.0));

        assert_eq!(state.total_items, 1);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].total_price, 25.0);
        assert_eq!(state.total_amount, 25.0);
    }

    #[test]
    fn test_add_existing_keeps_position() {
        let state = add(CartState::new(), item("a", 1.0));
        let state = add(state, item("b", 2.0));
        let state = add(state, item("a", 3.0));
        let ids: Vec<&str> = state.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_update_quantity_reprices() {
        let product = Product::new("lf", "Ridge Cap", Unit::LF);
        let state = add(
            CartState::new(),
            CartItem::from_count(&product, 4.0, 2).unwrap(),
        );
        let state = reduce(
            state,
            CartCommand::UpdateQuantity {
                product_id: ProductId::new("lf"),
                quantity: 12.5,
            },
        );
        assert_eq!(state.items[0].quantity, 12.5);
        assert_eq!(state.items[0].total_price, 50.0);
        assert_eq!(state.total_amount, 50.0);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let state = add(add(CartState::new(), item("a", 10.0)), item("b", 4.0));

        let updated = reduce(
            state.clone(),
            CartCommand::UpdateQuantity {
                product_id: ProductId::new("a"),
                quantity: 0.0,
            },
        );
        let removed = reduce(state, CartCommand::RemoveItem(ProductId::new("a")));
        assert_eq!(updated, removed);
        assert_eq!(updated.total_items, 1);
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let state = add(CartState::new(), item("a", 10.0));
        let next = reduce(
            state.clone(),
            CartCommand::UpdateQuantity {
                product_id: ProductId::new("zzz"),
                quantity: 3.0,
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_malformed_commands_are_ignored() {
        let state = add(CartState::new(), item("a", 10.0));

        let next = add(state.clone(), item("b", -1.0));
        assert_eq!(next, state);

        let next = add(state.clone(), item("b", f64::NAN));
        assert_eq!(next.total_items, 1);

        let next = reduce(
            state.clone(),
            CartCommand::UpdateQuantity {
                product_id: ProductId::new("a"),
                quantity: f64::INFINITY,
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_clear() {
        let state = add(CartState::new(), item("a", 10.0));
        assert_eq!(reduce(state, CartCommand::Clear), CartState::new());
    }

    #[test]
    fn test_load_normalizes() {
        let loaded = CartState {
            items: vec![item("a", 10.0), item("b", 2.0), item("a", 7.0)],
            total_items: 99,
            total_amount: -5.0,
        };
        let state = reduce(add(CartState::new(), item("z", 1.0)), CartCommand::Load(loaded));
        assert_eq!(state.total_items, 2);
        assert_eq!(state.get(&ProductId::new("a")).unwrap().total_price, 7.0);
        assert!((state.total_amount - 9.0).abs() < 1e-9);
        assert!(state.get(&ProductId::new("z")).is_none());
    }

    #[test]
    fn test_overflowing_quantity_is_ignored() {
        let screws = Product::new("screws", "Pancake Screws", Unit::EA);
        let ridge = Product::new("ridge", "Ridge Cap", Unit::LF);
        let state = add(
            CartState::new(),
            CartItem::from_count(&screws, 2.85, 1).unwrap(),
        );
        let state = add(state, CartItem::from_count(&ridge, 4.0, 2).unwrap());

        let next = reduce(
            state.clone(),
            CartCommand::UpdateQuantity {
                product_id: ProductId::new("screws"),
                quantity: 1e308,
            },
        );
        assert_eq!(next, state);
        assert_eq!(CartState::from_json(&next.to_json().unwrap()).unwrap(), next);
    }

    #[test]
    fn test_item_overflowing_total_is_ignored() {
        let state = add(CartState::new(), item("a", 1e308));
        let next = add(state.clone(), item("b", 1e308));
        assert_eq!(next, state);
        assert!(next.total_amount.is_finite());

        // Replacing the only item with another large total is fine.
        let replaced = add(state, item("a", 1.5e308));
        assert_eq!(replaced.total_amount, 1.5e308);
    }

    #[test]
    fn test_load_drops_items_that_overflow() {
        let loaded = CartState {
            items: vec![item("a", 1e308), item("b", 1e308), item("c", 3.0)],
            total_items: 3,
            total_amount: 0.0,
        };
        let state = reduce(CartState::new(), CartCommand::Load(loaded));
        assert_eq!(state.total_items, 2);
        assert!(state.get(&ProductId::new("b")).is_none());
        assert!(state.total_amount.is_finite());
    }

    #[test]
    fn test_add_existing_replaces_unit_price() {
        let product = Product::new("ss", "Standing Seam", Unit::LF);
        let state = add(
            CartState::new(),
            CartItem::from_count(&product, 2.85, 10).unwrap(),
        );
        let state = add(state, CartItem::from_count(&product, 3.10, 10).unwrap());
        assert_eq!(state.items[0].price_per_unit, 3.10);

        let state = reduce(
            state,
            CartCommand::UpdateQuantity {
                product_id: ProductId::new("ss"),
                quantity: 10.0,
            },
        );
        assert!((state.items[0].total_price - 31.0).abs() < 1e-9);
    }
}
