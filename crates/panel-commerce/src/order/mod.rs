//! Order aggregation: the lines of one product configuration, totalled and
//! validated before they reach the cart.

mod session;

pub use session::OrderSession;
