//! `panel prices` - list the priced variants of a product.

use anyhow::Result;
use serde_json::json;

use super::PricesArgs;
use crate::context::Context;
use crate::output::format_money;

pub async fn run(args: PricesArgs, ctx: &Context) -> Result<()> {
    let resolver = ctx.load_prices().await;
    let variants = resolver.get_prices_for_product(&args.title);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "title": args.title,
            "state": resolver.state().as_str(),
            "variants": variants,
        }));
        return Ok(());
    }

    ctx.output.header(&args.title);
    if variants.is_empty() {
        ctx.output
            .info("No prices on file for this product. Request a quote.");
        return Ok(());
    }

    for variant in &variants {
        ctx.output
            .kv(&variant.variant.label(), &format!("{}/LF", format_money(variant.price)));
    }
    if variants.len() > 1 {
        ctx.output
            .info("Pick one with --variant \"<color> / <gauge>\"");
    }

    Ok(())
}
