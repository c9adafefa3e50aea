//! Order lines and the length/price arithmetic over them.

use crate::error::CommerceError;
use crate::ids::LineId;
use crate::measure::{Dimension, Sixteenths, MAX_INCHES};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// One editable line of an order: a quantity of panels cut to one length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineId,
    /// Number of panels, at least 1.
    #[serde(deserialize_with = "clamped_qty")]
    pub qty: u32,
    pub feet: u32,
    /// Whole inches in `0..=11`.
    #[serde(deserialize_with = "clamped_inches")]
    pub inches: u8,
    pub fraction: Sixteenths,
    /// Optional label for the cut piece.
    #[serde(default)]
    pub piece_mark: String,
}

fn clamped_qty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(1, u32::MAX as i64) as u32)
}

fn clamped_inches<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, MAX_INCHES as i64) as u8)
}

impl LineItem {
    /// A fresh line: one panel of zero length.
    pub fn blank() -> Self {
        Self {
            id: LineId::generate(),
            qty: 1,
            feet: 0,
            inches: 0,
            fraction: Sixteenths::NONE,
            piece_mark: String::new(),
        }
    }

    /// Create a line for `qty` panels of `dimension`, clamping qty to at least 1.
    pub fn with_dimension(qty: u32, dimension: Dimension) -> Self {
        Self {
            qty: qty.max(1),
            feet: dimension.feet,
            inches: dimension.inches.min(MAX_INCHES),
            fraction: dimension.fraction,
            ..Self::blank()
        }
    }

    /// Set the piece mark.
    pub fn with_piece_mark(mut self, mark: impl Into<String>) -> Self {
        self.piece_mark = mark.into();
        self
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::new(self.feet, self.inches, self.fraction)
    }

    /// Length of one panel in feet.
    pub fn length_per_panel(&self) -> f64 {
        self.dimension().length_feet()
    }

    /// Linear feet across all panels of this line.
    pub fn total_lf(&self) -> f64 {
        self.qty as f64 * self.length_per_panel()
    }

    /// Extended price of this line.
    pub fn line_price(&self, price_per_unit: f64) -> f64 {
        self.total_lf() * price_per_unit
    }

    /// Whether the line would survive submission. Zero-length lines are
    /// kept while editing but never reach the cart.
    pub fn is_submittable(&self) -> bool {
        self.qty > 0 && self.length_per_panel() > 0.0
    }
}

/// Names of the editable fields of a [`LineItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Qty,
    Feet,
    Inches,
    Fraction,
    PieceMark,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Qty => "qty",
            FieldKind::Feet => "feet",
            FieldKind::Inches => "inches",
            FieldKind::Fraction => "fraction",
            FieldKind::PieceMark => "pieceMark",
        }
    }
}

impl FromStr for FieldKind {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "qty" | "quantity" => Ok(FieldKind::Qty),
            "feet" | "ft" => Ok(FieldKind::Feet),
            "inches" | "in" => Ok(FieldKind::Inches),
            "fraction" => Ok(FieldKind::Fraction),
            "piecemark" | "piece_mark" | "mark" => Ok(FieldKind::PieceMark),
            _ => Err(CommerceError::validation(format!("unknown field: {s}"))),
        }
    }
}

/// A single-field update to a line.
///
/// Numeric values are raw user input; [`LineField::apply`] clamps them into
/// range instead of rejecting them.
#[derive(Debug, Clone, PartialEq)]
pub enum LineField {
    Qty(i64),
    Feet(i64),
    Inches(i64),
    Fraction(i64),
    PieceMark(String),
}

impl LineField {
    /// Parse a raw form value for `kind`.
    ///
    /// Empty input resets the field to its floor (qty 1, everything else 0).
    /// Fractions accept labels such as `3/8` as well as indices.
    pub fn parse(kind: FieldKind, raw: &str) -> Result<Self, CommerceError> {
        let value = raw.trim();
        let number = || -> Result<i64, CommerceError> {
            if value.is_empty() {
                return Ok(0);
            }
            value.parse().map_err(|_| {
                CommerceError::validation(format!(
                    "invalid field input for {}: {raw:?}",
                    kind.as_str()
                ))
            })
        };

        Ok(match kind {
            FieldKind::Qty => LineField::Qty(if value.is_empty() { 1 } else { number()? }),
            FieldKind::Feet => LineField::Feet(number()?),
            FieldKind::Inches => LineField::Inches(number()?),
            FieldKind::Fraction => {
                LineField::Fraction(Sixteenths::parse_label(value)?.index() as i64)
            }
            FieldKind::PieceMark => LineField::PieceMark(raw.to_string()),
        })
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            LineField::Qty(_) => FieldKind::Qty,
            LineField::Feet(_) => FieldKind::Feet,
            LineField::Inches(_) => FieldKind::Inches,
            LineField::Fraction(_) => FieldKind::Fraction,
            LineField::PieceMark(_) => FieldKind::PieceMark,
        }
    }

    /// Return a copy of `line` with this field replaced.
    pub fn apply(&self, line: &LineItem) -> LineItem {
        let mut next = line.clone();
        match self {
            LineField::Qty(v) => next.qty = (*v).clamp(1, u32::MAX as i64) as u32,
            LineField::Feet(v) => next.feet = (*v).clamp(0, u32::MAX as i64) as u32,
            LineField::Inches(v) => next.inches = (*v).clamp(0, MAX_INCHES as i64) as u8,
            LineField::Fraction(v) => next.fraction = Sixteenths::clamped(*v),
            LineField::PieceMark(mark) => next.piece_mark = mark.clone(),
        }
        next
    }
}

/// Frozen copy of a submitted line with its computed figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(flatten)]
    pub line: LineItem,
    pub length_per_panel: f64,
    #[serde(rename = "totalLF")]
    pub total_lf: f64,
    pub line_price: f64,
}

impl CartLineItem {
    /// Snapshot `line` priced at `price_per_unit`.
    pub fn from_line(line: &LineItem, price_per_unit: f64) -> Self {
        Self {
            line: line.clone(),
            length_per_panel: line.length_per_panel(),
            total_lf: line.total_lf(),
            line_price: line.line_price(price_per_unit),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.line.dimension()
    }
}
