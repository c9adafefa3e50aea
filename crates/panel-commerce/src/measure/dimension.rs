//! Panel lengths written as feet, inches and sixteenths.

use crate::error::CommerceError;
use crate::measure::Sixteenths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest whole-inch value; 12 inches roll over into a foot.
pub const MAX_INCHES: u8 = 11;

/// A cut length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub feet: u32,
    pub inches: u8,
    pub fraction: Sixteenths,
}

impl Dimension {
    /// Create a dimension, clamping inches into `0..=11`.
    pub fn new(feet: u32, inches: u8, fraction: Sixteenths) -> Self {
        Self {
            feet,
            inches: inches.min(MAX_INCHES),
            fraction,
        }
    }

    /// Length in decimal feet: `feet + inches/12 + fraction/16/12`.
    pub fn length_feet(&self) -> f64 {
        self.feet as f64 + self.inches as f64 / 12.0 + self.fraction.feet()
    }

    /// Whether this dimension has zero length.
    pub fn is_zero(&self) -> bool {
        self.feet == 0 && self.inches == 0 && self.fraction.is_none()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'", self.feet)?;
        match (self.inches, self.fraction.is_none()) {
            (0, true) => Ok(()),
            (inches, true) => write!(f, " {inches}\""),
            (0, false) => write!(f, " {}\"", self.fraction.label()),
            (inches, false) => write!(f, " {inches}-{}\"", self.fraction.label()),
        }
    }
}

impl FromStr for Dimension {
    type Err = CommerceError;

    /// Parse `10'`, `10' 6"`, `10'-6 1/2"`, `10'6-1/2"`, `6 1/2"` or a bare
    /// number of feet such as `12`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        let invalid = || CommerceError::validation(format!("invalid dimension: {raw:?}"));
        if s.is_empty() {
            return Err(invalid());
        }

        let (feet, rest) = match s.split_once('\'') {
            Some((feet, rest)) => {
                let feet: u32 = feet.trim().parse().map_err(|_| invalid())?;
                let rest = rest.trim_start();
                (feet, rest.strip_prefix('-').unwrap_or(rest))
            }
            None if s.contains('"') => (0, s),
            None => (s.parse().map_err(|_| invalid())?, ""),
        };

        let rest = rest.trim();
        let rest = rest.strip_suffix('"').unwrap_or(rest).trim();
        if rest.contains(['"', '\'']) {
            return Err(invalid());
        }

        let tokens: Vec<&str> = rest
            .split(|c: char| c == '-' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        let (inches, fraction) = match tokens.as_slice() {
            [] => (0, Sixteenths::NONE),
            [frac] if frac.contains('/') => (0, Sixteenths::parse_label(frac)?),
            [inches] => (parse_inches(inches).ok_or_else(invalid)?, Sixteenths::NONE),
            [inches, frac] if frac.contains('/') => (
                parse_inches(inches).ok_or_else(invalid)?,
                Sixteenths::parse_label(frac)?,
            ),
            _ => return Err(invalid()),
        };

        Ok(Dimension::new(feet, inches, fraction))
    }
}

fn parse_inches(token: &str) -> Option<u8> {
    let value: u32 = token.parse().ok()?;
    Some(value.min(MAX_INCHES as u32) as u8)
}
