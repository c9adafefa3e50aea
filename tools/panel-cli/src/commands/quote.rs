//! `panel quote` - price cut lengths without touching the cart.

use anyhow::Result;
use panel_commerce::prelude::*;
use serde_json::json;

use super::{build_session, print_lines, QuoteArgs};
use crate::context::Context;
use crate::output::{format_lf, format_money, quote_badge};

pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let resolver = ctx.load_prices().await;

    if catalog.find_by_title(&args.title).is_none() {
        ctx.output
            .debug(&format!("'{}' not in catalog, quoting by title", args.title));
    }
    let product = quote_product(&catalog, &args.title, args.price);

    let session = build_session(product, &args.config, &resolver, &args.lines)?;
    let price = session.price_per_unit();
    let title = session.product().title.clone();
    let table_quote = resolver.quote(&title, session.color(), session.gauge());

    if ctx.output.is_json() {
        let lines: Vec<_> = session
            .lines()
            .iter()
            .map(|line| match price {
                Some(price) => serde_json::to_value(CartLineItem::from_line(line, price)),
                None => serde_json::to_value(line),
            })
            .collect::<Result<_, _>>()?;
        ctx.output.json(&json!({
            "title": title,
            "color": session.color(),
            "gauge": session.gauge(),
            "pricePerUnit": price,
            "lines": lines,
            "panelCount": session.panel_count(),
            "totalLF": session.total_lf(),
            "totalPrice": session.total_price(),
        }));
        return Ok(());
    }

    ctx.output.header(&title);
    ctx.output.kv("Color", session.color());
    ctx.output.kv("Gauge", session.gauge());
    match session.selected_variant() {
        Some(variant) => ctx.output.kv("Variant", &variant.variant.label()),
        None => ctx.output.kv("Table price", &quote_badge(&table_quote)),
    }
    println!();

    print_lines(&ctx.output, session.lines(), price);
    println!();

    ctx.output.kv("Panels", &session.panel_count().to_string());
    ctx.output.kv("Total", &format_lf(session.total_lf()));
    match session.total_price() {
        Some(total) => ctx.output.kv("Price", &format_money(total)),
        None => ctx
            .output
            .warn("No price for this configuration. Request a quote or pass --price."),
    }

    Ok(())
}

/// The product a quote is priced against: the catalog entry for `title`, or
/// an ad-hoc LF product. `price` replaces the catalog price only, so table
/// and variant prices still win over it.
fn quote_product(catalog: &Catalog, title: &str, price: Option<f64>) -> Product {
    let mut product = catalog
        .find_by_title(title)
        .cloned()
        .unwrap_or_else(|| Product::new(ProductId::generate(), title, Unit::LF));
    if let Some(price) = price {
        product.price_per_unit = Some(price);
    }
    product
}
