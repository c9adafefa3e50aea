//! One product-configuration ordering session.

use panel_cache::KvStore;

use crate::cart::{CartItem, CartStore};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::LineId;
use crate::measure::{CartLineItem, LineField, LineItem};
use crate::pricing::{PriceQuote, PriceResolver, VariantPrice};

/// The lines a shopper is entering for one product, plus the configuration
/// they are priced under.
///
/// There is always at least one line so the form has a row to edit.
#[derive(Debug, Clone)]
pub struct OrderSession {
    product: Product,
    color: String,
    gauge: String,
    /// Price the resolver had for (title, color, gauge).
    table_price: Option<f64>,
    selected_variant: Option<VariantPrice>,
    lines: Vec<LineItem>,
}

impl OrderSession {
    /// Start a session for `product` with one blank line.
    ///
    /// The gauge defaults to the one named in the product title.
    pub fn new(product: Product) -> Self {
        let gauge = product.default_gauge().unwrap_or_default();
        Self {
            product,
            color: String::new(),
            gauge,
            table_price: None,
            selected_variant: None,
            lines: vec![LineItem::blank()],
        }
    }

    /// Set color and gauge. Clears any selected variant.
    pub fn configure(&mut self, color: impl Into<String>, gauge: impl Into<String>) {
        self.color = color.into();
        self.gauge = gauge.into();
        self.selected_variant = None;
    }

    /// Refresh the table price for the current configuration.
    pub fn apply_pricing(&mut self, resolver: &PriceResolver) -> PriceQuote {
        let quote = resolver.quote(&self.product.title, &self.color, &self.gauge);
        self.table_price = quote.price();
        quote
    }

    /// Choose a variant; its price overrides the table and catalog prices.
    pub fn select_variant(&mut self, variant: VariantPrice) {
        self.color = variant.variant.color.clone();
        self.gauge = variant.variant.gauge.clone();
        self.selected_variant = Some(variant);
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn gauge(&self) -> &str {
        &self.gauge
    }

    pub fn selected_variant(&self) -> Option<&VariantPrice> {
        self.selected_variant.as_ref()
    }

    /// Effective price per unit: selected variant, then table, then catalog.
    pub fn price_per_unit(&self) -> Option<f64> {
        self.selected_variant
            .as_ref()
            .map(|v| v.price)
            .or(self.table_price)
            .or(self.product.price_per_unit)
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, id: &LineId) -> Option<&LineItem> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Append a blank line and return its id.
    pub fn add_line(&mut self) -> LineId {
        let line = LineItem::blank();
        let id = line.id.clone();
        self.lines.push(line);
        id
    }

    /// Append a prepared line and return its id.
    pub fn push_line(&mut self, line: LineItem) -> LineId {
        let id = line.id.clone();
        self.lines.push(line);
        id
    }

    /// Remove a line. The last remaining line is kept and `Ok(false)` is
    /// returned.
    pub fn remove_line(&mut self, id: &LineId) -> Result<bool, CommerceError> {
        if self.line(id).is_none() {
            return Err(CommerceError::LineNotFound(id.clone()));
        }
        if self.lines.len() == 1 {
            return Ok(false);
        }
        self.lines.retain(|l| &l.id != id);
        Ok(true)
    }

    /// Replace one field of a line.
    pub fn update_line(&mut self, id: &LineId, field: LineField) -> Result<(), CommerceError> {
        let slot = self
            .lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CommerceError::LineNotFound(id.clone()))?;
        *slot = field.apply(slot);
        Ok(())
    }

    /// Linear feet over every line, including blank ones.
    pub fn total_lf(&self) -> f64 {
        self.lines.iter().map(LineItem::total_lf).sum()
    }

    /// Extended price over every line; `None` without a price.
    pub fn total_price(&self) -> Option<f64> {
        let price = self.price_per_unit()?;
        Some(self.lines.iter().map(|l| l.line_price(price)).sum())
    }

    /// Number of panels on submittable lines.
    pub fn panel_count(&self) -> u64 {
        self.submittable_lines().map(|l| l.qty as u64).sum()
    }

    fn submittable_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().filter(|l| l.is_submittable())
    }

    /// Build the cart item this session would submit, without side effects.
    pub fn build_cart_item(&self) -> Result<CartItem, CommerceError> {
        let lines: Vec<&LineItem> = self.submittable_lines().collect();
        if lines.is_empty() {
            return Err(CommerceError::validation(
                "enter at least one panel length before adding to cart",
            ));
        }

        let price = self
            .price_per_unit()
            .ok_or_else(|| CommerceError::PriceUnavailable {
                title: self.product.title.clone(),
                color: self.color.clone(),
                gauge: self.gauge.clone(),
            })?;

        let snapshots = lines
            .into_iter()
            .map(|l| CartLineItem::from_line(l, price))
            .collect();
        Ok(CartItem::from_lines(&self.product, price, snapshots))
    }

    /// Send the session's lines to the cart and start over with one blank
    /// line. On error neither the session nor the cart changes.
    pub fn submit<S: KvStore>(
        &mut self,
        cart: &mut CartStore<S>,
    ) -> Result<CartItem, CommerceError> {
        let item = self.build_cart_item()?;
        tracing::debug!(
            product_id = %item.product_id,
            quantity = item.quantity,
            total = item.total_price,
            "submitting order session"
        );
        cart.add_item(item.clone());
        self.lines = vec![LineItem::blank()];
        Ok(item)
    }
}
