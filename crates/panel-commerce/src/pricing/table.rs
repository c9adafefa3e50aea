//! Price table keyed by (title, color, gauge).

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// One priced configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub title: String,
    pub color: String,
    pub gauge: String,
    /// Price per linear foot.
    pub price: f64,
}

impl PriceRow {
    pub fn new(
        title: impl Into<String>,
        color: impl Into<String>,
        gauge: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            title: title.into(),
            color: color.into(),
            gauge: gauge.into(),
            price,
        }
    }

    fn matches(&self, title: &str, color: &str, gauge: &str) -> bool {
        normalize(&self.title) == title
            && normalize(&self.color) == color
            && normalize(&self.gauge) == gauge
    }
}

/// The (color, gauge) half of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub color: String,
    pub gauge: String,
}

impl Variant {
    pub fn new(color: impl Into<String>, gauge: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            gauge: gauge.into(),
        }
    }

    /// Label for a selector, e.g. `Bronze / 24ga`.
    pub fn label(&self) -> String {
        match (self.color.trim().is_empty(), self.gauge.trim().is_empty()) {
            (true, true) => "Default".to_string(),
            (false, true) => self.color.trim().to_string(),
            (true, false) => self.gauge.trim().to_string(),
            (false, false) => format!("{} / {}", self.color.trim(), self.gauge.trim()),
        }
    }
}

/// A variant of a title with its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPrice {
    pub variant: Variant,
    pub price: f64,
}

/// Comparison form of a key component: trimmed and lowercased.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Raw row shape as exported by the pricing spreadsheet.
///
/// Column names arrive in either case, gauges sometimes as bare numbers and
/// prices as numbers or `"$2.85"` strings.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "Title", default)]
    title: String,
    #[serde(alias = "Color", default)]
    color: String,
    #[serde(alias = "Gauge", default)]
    gauge: Option<RawValue>,
    #[serde(alias = "Price", default)]
    price: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }

    fn as_price(&self) -> Option<f64> {
        let price = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().trim_start_matches('$').replace(',', "").parse().ok()?,
        };
        (price.is_finite() && price >= 0.0).then_some(price)
    }
}

/// Immutable price table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self { rows }
    }

    /// Decode a JSON array of rows.
    ///
    /// Rows without a usable price are skipped, not treated as an error.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let raw: Vec<RawRow> = serde_json::from_str(json)
            .map_err(|e| CommerceError::PriceSource(format!("malformed price table: {e}")))?;

        let mut rows = Vec::with_capacity(raw.len());
        for (index, row) in raw.into_iter().enumerate() {
            match row.price.as_ref().and_then(RawValue::as_price) {
                Some(price) => rows.push(PriceRow {
                    title: row.title,
                    color: row.color,
                    gauge: row.gauge.map(|g| g.as_text()).unwrap_or_default(),
                    price,
                }),
                None => tracing::warn!(
                    row = index,
                    title = %row.title,
                    "skipping price row without a usable price"
                ),
            }
        }

        tracing::debug!(rows = rows.len(), "decoded price table");
        Ok(Self { rows })
    }

    /// Exact lookup after normalizing all three components.
    pub fn get_price(&self, title: &str, color: &str, gauge: &str) -> Option<f64> {
        let (title, color, gauge) = (normalize(title), normalize(color), normalize(gauge));
        self.rows
            .iter()
            .find(|r| r.matches(&title, &color, &gauge))
            .map(|r| r.price)
    }

    /// Every priced variant of `title`, in table order.
    pub fn prices_for_product(&self, title: &str) -> Vec<VariantPrice> {
        let title = normalize(title);
        self.rows
            .iter()
            .filter(|r| normalize(&r.title) == title)
            .map(|r| VariantPrice {
                variant: Variant::new(r.color.trim(), r.gauge.trim()),
                price: r.price,
            })
            .collect()
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
