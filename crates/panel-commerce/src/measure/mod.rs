//! Dimension parsing and per-line length/price calculation.
//!
//! Lengths are entered as feet, whole inches and sixteenths of an inch and
//! converted to decimal feet:
//!
//! ```text
//! length_per_panel = feet + inches/12 + sixteenths/16/12
//! total_lf         = qty * length_per_panel
//! line_price       = total_lf * price_per_unit
//! ```
//!
//! Out-of-range input is clamped on entry rather than rejected, so a line
//! is always in range once it exists.

mod dimension;
mod fraction;
mod line;

pub use dimension::{Dimension, MAX_INCHES};
pub use fraction::{Sixteenths, FRACTION_LABELS};
pub use line::{CartLineItem, FieldKind, LineField, LineItem};
