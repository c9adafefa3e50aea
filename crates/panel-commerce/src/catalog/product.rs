//! Catalog products as supplied by the catalog service.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::pricing::gauge_from_title;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Billing unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Unit {
    /// Linear feet; cut-to-length panels and trim.
    #[default]
    LF,
    /// Roofing squares (100 sq ft).
    SQ,
    /// Each.
    EA,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::LF => "LF",
            Unit::SQ => "SQ",
            Unit::EA => "EA",
        }
    }

    /// Whether quantities are built from measured lines.
    pub fn is_linear(&self) -> bool {
        *self == Unit::LF
    }
}

impl FromStr for Unit {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LF" => Ok(Unit::LF),
            "SQ" => Ok(Unit::SQ),
            "EA" => Ok(Unit::EA),
            _ => Err(CommerceError::validation(format!("unknown unit: {s}"))),
        }
    }
}

/// A product in the catalog. Read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub unit: Unit,
    /// List price per unit; `None` means "call for price".
    #[serde(default)]
    pub price_per_unit: Option<f64>,
    /// Image URL for cart display.
    #[serde(default)]
    pub img: Option<String>,
}

impl Product {
    /// Create a product with no list price.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, unit: Unit) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            unit,
            price_per_unit: None,
            img: None,
        }
    }

    /// Set the list price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price_per_unit = Some(price);
        self
    }

    /// Set the image URL.
    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    /// Gauge implied by the title, e.g. `24ga` for "Standing Seam 24 Gauge".
    pub fn default_gauge(&self) -> Option<String> {
        gauge_from_title(&self.title)
    }
}

/// The product list handed over by the catalog service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Decode a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Persistence(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Find a product by title, ignoring case and surrounding whitespace.
    pub fn find_by_title(&self, title: &str) -> Option<&Product> {
        let wanted = title.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.title.trim().to_lowercase() == wanted)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parsing() {
        assert_eq!("lf".parse::<Unit>(), Ok(Unit::LF));
        assert_eq!(" EA ".parse::<Unit>(), Ok(Unit::EA));
        assert!(matches!(
            "box".parse::<Unit>(),
            Err(CommerceError::ValidationError(_))
        ));
        assert!(Unit::LF.is_linear());
        assert!(!Unit::SQ.is_linear());
    }

    #[test]
    fn test_product_json() {
        let json = r#"[
            {"id": "ss-24", "title": "Standing Seam 24 Gauge", "unit": "LF", "pricePerUnit": 2.85},
            {"id": "screws", "title": "Pancake Screws", "unit": "EA", "pricePerUnit": null}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let panel = catalog.get(&ProductId::new("ss-24")).unwrap();
        assert_eq!(panel.price_per_unit, Some(2.85));
        assert_eq!(panel.default_gauge().as_deref(), Some("24ga"));

        let screws = catalog.find_by_title("  pancake screws").unwrap();
        assert_eq!(screws.unit, Unit::EA);
        assert_eq!(screws.price_per_unit, None);
    }

    #[test]
    fn test_product_builder() {
        let p = Product::new("p1", "Ridge Cap", Unit::LF)
            .with_price(4.5)
            .with_img("/img/ridge.png");
        assert_eq!(p.price_per_unit, Some(4.5));
        assert_eq!(p.img.as_deref(), Some("/img/ridge.png"));
        assert_eq!(p.default_gauge(), None);
    }

    #[test]
    fn test_load_missing_file_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path().join("catalog.json")).unwrap_err();
        assert!(matches!(err, CommerceError::Persistence(_)));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(CommerceError::Serialization(_))
        ));
    }
}
