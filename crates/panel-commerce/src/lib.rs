//! Measurement-to-price engine and cart store for cut-to-length panels.
//!
//! This crate turns dimensional input into priced cart items:
//!
//! - **Measure**: feet/inches/sixteenths parsing and per-line length and price
//! - **Order**: an ordering session that totals and validates lines
//! - **Pricing**: per-foot prices by (title, color, gauge) from a loaded table
//! - **Cart**: a reducer-driven cart with persistence
//! - **Checkout**: a read-only snapshot for the payment service
//!
//! # Example
//!
//! ```rust,ignore
//! use panel_commerce::prelude::*;
//! use panel_cache::MemoryStore;
//!
//! let mut resolver = PriceResolver::new();
//! resolver.load(&JsonFileSource::new("prices.json")).await;
//!
//! let mut cart = CartStore::open_default(MemoryStore::new());
//!
//! let mut session = OrderSession::new(product);
//! session.configure("Galvalume", "24ga");
//! session.apply_pricing(&resolver);
//!
//! let line = session.lines()[0].id.clone();
//! session.update_line(&line, LineField::Qty(2))?;
//! session.update_line(&line, LineField::Feet(10))?;
//! session.submit(&mut cart)?;
//!
//! println!("Total: {:.2}", cart.state().total_amount);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod measure;
pub mod order;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{Catalog, Product, Unit};

    // Measure
    pub use crate::measure::{CartLineItem, Dimension, FieldKind, LineField, LineItem, Sixteenths};

    // Order
    pub use crate::order::OrderSession;

    // Pricing
    pub use crate::pricing::{
        gauge_from_title, JsonFileSource, PriceQuote, PriceResolver, PriceRow, PriceSource,
        PriceTable, PriceTableState, StaticSource, Variant, VariantPrice,
    };

    // Cart
    pub use crate::cart::{reduce, CartCommand, CartItem, CartState, CartStore};

    // Checkout
    pub use crate::checkout::CheckoutSnapshot;
}
