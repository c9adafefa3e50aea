//! Key-Value persistence layer for the panel storefront.
//!
//! Provides a small, ergonomic API for keeping serialized state under a key
//! with automatic JSON serialization. Two backends ship with the crate:
//! [`MemoryStore`] for tests and ephemeral sessions, and [`FileStore`] for a
//! directory of JSON files.
//!
//! # Example
//!
//! ```rust,ignore
//! use panel_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::new(".panel"));
//!
//! // Store a value
//! cache.set("cart", &state)?;
//!
//! // Retrieve a value
//! let state: Option<CartState> = cache.get("cart")?;
//!
//! // Delete a value
//! cache.delete("cart")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
