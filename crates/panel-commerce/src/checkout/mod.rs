//! Handoff to the external checkout and payment service.

mod snapshot;

pub use snapshot::CheckoutSnapshot;
