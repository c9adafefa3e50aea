//! Sixteenths-of-an-inch fractions.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display labels indexed by sixteenths.
pub const FRACTION_LABELS: [&str; 16] = [
    "", "1/16", "1/8", "3/16", "1/4", "5/16", "3/8", "7/16", "1/2", "9/16", "5/8", "11/16",
    "3/4", "13/16", "7/8", "15/16",
];

/// A fraction of an inch, stored as a count of sixteenths in `0..=15`.
///
/// Deserializing an out-of-range index clamps it to 15.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct Sixteenths(u8);

impl Sixteenths {
    /// No fraction.
    pub const NONE: Sixteenths = Sixteenths(0);
    /// The largest representable fraction, 15/16".
    pub const MAX: Sixteenths = Sixteenths(15);

    /// Create from an index, rejecting values above 15.
    pub fn new(index: u8) -> Option<Self> {
        (index <= Self::MAX.0).then_some(Self(index))
    }

    /// Create from any integer, clamping into `0..=15`.
    pub fn clamped(index: i64) -> Self {
        Self(index.clamp(0, Self::MAX.0 as i64) as u8)
    }

    /// Number of sixteenths.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Value in inches.
    pub fn inches(self) -> f64 {
        self.0 as f64 / 16.0
    }

    /// Value in feet.
    pub fn feet(self) -> f64 {
        self.0 as f64 / 16.0 / 12.0
    }

    /// Display label, empty for [`Sixteenths::NONE`].
    pub fn label(self) -> &'static str {
        FRACTION_LABELS[self.0 as usize]
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// All sixteen values in ascending order.
    pub fn all() -> impl Iterator<Item = Sixteenths> {
        (0..=Self::MAX.0).map(Sixteenths)
    }

    /// Parse user input: a label like `3/8` or `6/16`, a bare index like `6`,
    /// or an empty string for none.
    pub fn parse_label(raw: &str) -> Result<Self, CommerceError> {
        let s = raw.trim().trim_end_matches('"').trim();
        if s.is_empty() {
            return Ok(Self::NONE);
        }

        let invalid = || CommerceError::validation(format!("invalid fraction: {raw:?}"));

        match s.split_once('/') {
            Some((num, den)) => {
                let num: u32 = num.trim().parse().map_err(|_| invalid())?;
                let den: u32 = den.trim().parse().map_err(|_| invalid())?;
                if den == 0 || 16 % den != 0 {
                    return Err(invalid());
                }
                let index = num * (16 / den);
                u8::try_from(index)
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(invalid)
            }
            None => {
                let index: u8 = s.parse().map_err(|_| invalid())?;
                Self::new(index).ok_or_else(invalid)
            }
        }
    }
}

impl From<u8> for Sixteenths {
    fn from(index: u8) -> Self {
        Self(index.min(Self::MAX.0))
    }
}

impl From<Sixteenths> for u8 {
    fn from(f: Sixteenths) -> Self {
        f.0
    }
}

impl fmt::Display for Sixteenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
