//! Product catalog module.
//!
//! Products are owned by the catalog service; this crate only reads them.

mod product;

pub use product::{Catalog, Product, Unit};
