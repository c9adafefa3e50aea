//! Per-foot price resolution.
//!
//! The price table is keyed by `(title, color, gauge)`. Keys are compared
//! trimmed and case-insensitively because the exported source data is not
//! consistent about either.

mod resolver;
mod source;
mod table;

pub use resolver::{PriceQuote, PriceResolver, PriceTableState};
pub use source::{JsonFileSource, PriceSource, StaticSource};
pub use table::{normalize, PriceRow, PriceTable, Variant, VariantPrice};

/// Derive a gauge key from a product title.
///
/// "Standing Seam 24 Gauge", "24ga Standing Seam" and "26-Gauge PBR" all
/// name their gauge; the key is the number followed by `ga`.
pub fn gauge_from_title(title: &str) -> Option<String> {
    let tokens: Vec<String> = title
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .to_lowercase()
        })
        .collect();

    let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    for (i, token) in tokens.iter().enumerate() {
        let Some(prefix) = token
            .strip_suffix("gauge")
            .or_else(|| token.strip_suffix("ga"))
        else {
            continue;
        };
        let prefix = prefix.trim_end_matches('-');
        if is_number(prefix) {
            return Some(format!("{prefix}ga"));
        }
        if prefix.is_empty() && i > 0 && is_number(tokens[i - 1].as_str()) {
            return Some(format!("{}ga", tokens[i - 1]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_from_title() {
        assert_eq!(gauge_from_title("Standing Seam 24 Gauge").as_deref(), Some("24ga"));
        assert_eq!(gauge_from_title("24ga Standing Seam").as_deref(), Some("24ga"));
        assert_eq!(gauge_from_title("PBR Panel (26-Gauge)").as_deref(), Some("26ga"));
        assert_eq!(gauge_from_title("Omega Trim"), None);
        assert_eq!(gauge_from_title("Ridge Cap"), None);
        assert_eq!(gauge_from_title("Gauge"), None);
    }
}
