//! Owned cart handle with persistence.

use panel_cache::{Cache, CacheError, KvStore};

use crate::cart::{reduce, CartCommand, CartItem, CartState};
use crate::checkout::CheckoutSnapshot;
use crate::ids::ProductId;

/// Key the cart is persisted under unless told otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// The single writer of a shopper's [`CartState`].
///
/// Construct one at application start and pass it where it is needed.
/// Every committed command is followed by a full-state write to the backing
/// store. Storage failures are logged and otherwise ignored: the in-memory
/// cart stays authoritative for the session.
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    state: CartState,
}

impl<S: KvStore> CartStore<S> {
    /// Open the cart persisted under `key`, or start an empty one.
    ///
    /// A stored value that does not decode is discarded.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let cache = Cache::new(store);
        let key = key.into();

        let restored = match cache.get::<CartState>(&key) {
            Ok(Some(state)) => state,
            Ok(None) => CartState::new(),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(key = %key, error = %e, "discarding corrupt persisted cart");
                if let Err(e) = cache.delete(&key) {
                    tracing::warn!(key = %key, error = %e, "failed to delete corrupt cart");
                }
                CartState::new()
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read persisted cart");
                CartState::new()
            }
        };

        let state = reduce(CartState::new(), CartCommand::Load(restored));
        tracing::debug!(key = %key, items = state.total_items, "cart opened");
        Self { cache, key, state }
    }

    /// Open the cart under [`DEFAULT_CART_KEY`].
    pub fn open_default(store: S) -> Self {
        Self::open(store, DEFAULT_CART_KEY)
    }

    /// Apply a command and persist the result.
    pub fn dispatch(&mut self, command: CartCommand) -> &CartState {
        let name = command.name();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, command);
        tracing::debug!(
            command = name,
            items = self.state.total_items,
            amount = self.state.total_amount,
            "cart updated"
        );
        self.persist();
        &self.state
    }

    pub fn add_item(&mut self, item: CartItem) -> &CartState {
        self.dispatch(CartCommand::AddItem(item))
    }

    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: f64) -> &CartState {
        self.dispatch(CartCommand::UpdateQuantity {
            product_id: product_id.clone(),
            quantity,
        })
    }

    pub fn remove_item(&mut self, product_id: &ProductId) -> &CartState {
        self.dispatch(CartCommand::RemoveItem(product_id.clone()))
    }

    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartCommand::Clear)
    }

    /// Empty the cart and forget the persisted copy (e.g. on logout).
    pub fn reset(&mut self) {
        self.state = CartState::new();
        if let Err(e) = self.cache.delete(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to delete persisted cart");
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read-only copy for checkout; `None` when the cart is empty.
    pub fn snapshot(&self) -> Option<CheckoutSnapshot> {
        CheckoutSnapshot::from_state(&self.state)
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.state) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}
