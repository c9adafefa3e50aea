//! Price resolution over an asynchronously loaded table.

use std::sync::Arc;

use crate::pricing::{PriceSource, PriceTable, VariantPrice};

/// Load state of the price table.
#[derive(Debug, Clone, Default)]
pub enum PriceTableState {
    /// Fetch not finished (or not started).
    #[default]
    Loading,
    /// Table available.
    Resolved(Arc<PriceTable>),
    /// Fetch failed; prices stay unknown for this session.
    Unavailable,
}

impl PriceTableState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTableState::Loading => "loading",
            PriceTableState::Resolved(_) => "resolved",
            PriceTableState::Unavailable => "unavailable",
        }
    }
}

/// Outcome of a price lookup as presented to a shopper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceQuote {
    /// Table still loading; show a loading affordance.
    Loading,
    /// Price per linear foot.
    Price(f64),
    /// No price on file; offer "Request Quote".
    RequestQuote,
}

impl PriceQuote {
    pub fn price(&self) -> Option<f64> {
        match self {
            PriceQuote::Price(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_request_quote(&self) -> bool {
        matches!(self, PriceQuote::RequestQuote)
    }
}

/// Resolves per-foot prices for (title, color, gauge) combinations.
///
/// Lookups never fail: while the table is loading or unavailable they
/// simply find nothing.
#[derive(Debug, Clone, Default)]
pub struct PriceResolver {
    state: PriceTableState,
}

impl PriceResolver {
    /// A resolver whose table is still loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver over an already available table.
    pub fn with_table(table: PriceTable) -> Self {
        Self {
            state: PriceTableState::Resolved(Arc::new(table)),
        }
    }

    /// Fetch a table from `source` without touching any resolver.
    ///
    /// Lets a caller run the fetch elsewhere and hand the result to
    /// [`PriceResolver::apply`] later.
    pub async fn fetch(source: &dyn PriceSource) -> PriceTableState {
        match source.fetch().await {
            Ok(table) => {
                tracing::debug!(source = %source.describe(), rows = table.len(), "price table loaded");
                PriceTableState::Resolved(Arc::new(table))
            }
            Err(e) => {
                tracing::warn!(source = %source.describe(), error = %e, "price table unavailable");
                PriceTableState::Unavailable
            }
        }
    }

    /// Fetch from `source` and adopt the result.
    pub async fn load(&mut self, source: &dyn PriceSource) -> &PriceTableState {
        self.state = PriceTableState::Loading;
        let state = Self::fetch(source).await;
        self.apply(state)
    }

    /// Adopt a previously fetched state.
    pub fn apply(&mut self, state: PriceTableState) -> &PriceTableState {
        self.state = state;
        &self.state
    }

    pub fn state(&self) -> &PriceTableState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PriceTableState::Loading)
    }

    pub fn table(&self) -> Option<&PriceTable> {
        match &self.state {
            PriceTableState::Resolved(table) => Some(table.as_ref()),
            _ => None,
        }
    }

    /// Price per foot for an exact configuration, or `None`.
    pub fn get_price(&self, title: &str, color: &str, gauge: &str) -> Option<f64> {
        self.table()
            .and_then(|table| table.get_price(title, color, gauge))
    }

    /// Every priced variant of `title`; empty until the table resolves.
    pub fn get_prices_for_product(&self, title: &str) -> Vec<VariantPrice> {
        self.table()
            .map(|table| table.prices_for_product(title))
            .unwrap_or_default()
    }

    /// Like [`PriceResolver::get_price`] but tells "loading" apart from
    /// "no price on file".
    pub fn quote(&self, title: &str, color: &str, gauge: &str) -> PriceQuote {
        match &self.state {
            PriceTableState::Loading => PriceQuote::Loading,
            PriceTableState::Unavailable => PriceQuote::RequestQuote,
            PriceTableState::Resolved(table) => table
                .get_price(title, color, gauge)
                .map(PriceQuote::Price)
                .unwrap_or(PriceQuote::RequestQuote),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommerceError;
    use crate::pricing::{PriceRow, StaticSource};
    use async_trait::async_trait;

    struct BrokenSource;

    #[async_trait]
    impl PriceSource for BrokenSource {
        async fn fetch(&self) -> Result<PriceTable, CommerceError> {
            Err(CommerceError::PriceSource("connection reset".to_string()))
        }
    }

    fn rows() -> Vec<PriceRow> {
        vec![
            PriceRow::new("PBR Panel", "White", "26ga", 1.95),
            PriceRow::new("PBR Panel", "Red", "26ga", 2.05),
        ]
    }

    #[test]
    fn test_new_resolver_is_loading() {
        let resolver = PriceResolver::new();
        assert!(resolver.is_loading());
        assert_eq!(resolver.get_price("PBR Panel", "White", "26ga"), None);
        assert_eq!(resolver.quote("PBR Panel", "White", "26ga"), PriceQuote::Loading);
        assert!(resolver.get_prices_for_product("PBR Panel").is_empty());
    }

    #[tokio::test]
    async fn test_load_resolves() {
        let mut resolver = PriceResolver::new();
        let state = resolver.load(&StaticSource::new(rows())).await;
        assert_eq!(state.as_str(), "resolved");
        assert_eq!(resolver.get_price("pbr panel", "RED", "26ga"), Some(2.05));
        assert_eq!(resolver.get_prices_for_product("PBR Panel").len(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_unavailable_not_error() {
        let mut resolver = PriceResolver::new();
        resolver.load(&BrokenSource).await;
        assert_eq!(resolver.state().as_str(), "unavailable");
        assert_eq!(resolver.get_price("PBR Panel", "White", "26ga"), None);
        assert!(resolver.quote("PBR Panel", "White", "26ga").is_request_quote());
    }

    #[tokio::test]
    async fn test_fetch_then_apply() {
        let state = PriceResolver::fetch(&StaticSource::new(rows())).await;
        let mut resolver = PriceResolver::new();
        assert!(resolver.is_loading());
        resolver.apply(state);
        assert_eq!(resolver.quote("PBR Panel", "White", "26ga"), PriceQuote::Price(1.95));
    }

    #[test]
    fn test_quote_miss_requests_quote() {
        let resolver = PriceResolver::with_table(PriceTable::new(rows()));
        let quote = resolver.quote("PBR Panel", "Bronze", "26ga");
        assert_eq!(quote, PriceQuote::RequestQuote);
        assert_eq!(quote.price(), None);
    }
}
