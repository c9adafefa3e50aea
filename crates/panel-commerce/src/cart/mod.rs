//! Shopping cart module.
//!
//! The cart is a plain [`CartState`] changed only through [`reduce`]; the
//! [`CartStore`] owns one and persists it after every command.

mod cart;
mod command;
mod store;

pub use cart::{CartItem, CartState};
pub use command::{reduce, CartCommand};
pub use store::{CartStore, DEFAULT_CART_KEY};
