//! `panel cart` - show and edit the persisted cart.

use anyhow::{bail, Context as _, Result};
use panel_cache::FileStore;
use panel_commerce::prelude::*;

use super::{build_session, AddArgs, CartAction, CartArgs};
use crate::context::Context;
use crate::output::{format_lf, format_money};

pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart(args.user.as_deref());

    match args.command.unwrap_or(CartAction::Show) {
        CartAction::Show => {}
        CartAction::Add(add) => {
            let item = add_item(add, ctx, &mut cart).await?;
            ctx.output.success(&format!(
                "Added {} ({})",
                item.title,
                format_money(item.total_price)
            ));
        }
        CartAction::Update {
            product_id,
            quantity,
        } => {
            let id = ProductId::new(product_id);
            if cart.state().get(&id).is_none() {
                bail!("'{}' is not in the cart", id);
            }
            cart.update_quantity(&id, quantity);
            ctx.output.success(&format!("Updated {}", id));
        }
        CartAction::Remove { product_id } => {
            let id = ProductId::new(product_id);
            if cart.state().get(&id).is_none() {
                bail!("'{}' is not in the cart", id);
            }
            cart.remove_item(&id);
            ctx.output.success(&format!("Removed {}", id));
        }
        CartAction::Clear => {
            cart.clear();
            ctx.output.success("Cart cleared");
            return Ok(());
        }
        CartAction::Checkout { output } => return checkout(&cart, output, ctx),
    }

    show(&cart, ctx);
    Ok(())
}

async fn add_item(
    args: AddArgs,
    ctx: &Context,
    cart: &mut CartStore<FileStore>,
) -> Result<CartItem> {
    let catalog = ctx.load_catalog()?;
    let product = ctx.product(&catalog, &args.product)?;

    if !product.unit.is_linear() {
        let count = args
            .count
            .with_context(|| format!("{} is sold by {}; pass --count", product.title, product.unit.as_str()))?;
        let resolver = ctx.load_prices().await;
        let session = build_session(product.clone(), &args.config, &resolver, &[])?;
        let price = session
            .price_per_unit()
            .ok_or_else(|| CommerceError::PriceUnavailable {
                title: product.title.clone(),
                color: session.color().to_string(),
                gauge: session.gauge().to_string(),
            })?;
        let item = CartItem::from_count(&product, price, count)?;
        cart.add_item(item.clone());
        return Ok(item);
    }

    if args.count.is_some() {
        bail!("{} is sold by the foot; pass --line", product.title);
    }
    let resolver = ctx.load_prices().await;
    let mut session = build_session(product, &args.config, &resolver, &args.lines)?;
    Ok(session.submit(cart)?)
}

fn show(cart: &CartStore<FileStore>, ctx: &Context) {
    let state = cart.state();
    if ctx.output.is_json() {
        ctx.output.json(state);
        return;
    }

    ctx.output.header("Cart");
    if state.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [14, 28, 14, 10, 10];
    ctx.output
        .table_row(&["ID", "PRODUCT", "QUANTITY", "UNIT", "TOTAL"], &widths);
    for item in &state.items {
        let quantity = if item.unit.is_linear() {
            format_lf(item.quantity)
        } else {
            format!("{} {}", item.quantity, item.unit.as_str())
        };
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                &item.title,
                &quantity,
                &format_money(item.price_per_unit),
                &format_money(item.total_price),
            ],
            &widths,
        );
        for line in item.lines.iter().flatten() {
            let mark = if line.line.piece_mark.is_empty() {
                String::new()
            } else {
                format!(" [{}]", line.line.piece_mark)
            };
            ctx.output.list_item(&format!(
                "{} x {}{} = {}",
                line.line.qty,
                line.dimension(),
                mark,
                format_lf(line.total_lf)
            ));
        }
    }
    println!();
    ctx.output.kv("Items", &state.total_items.to_string());
    ctx.output.kv("Total", &format_money(state.total_amount));
}

fn checkout(cart: &CartStore<FileStore>, output: Option<String>, ctx: &Context) -> Result<()> {
    let Some(snapshot) = cart.snapshot() else {
        bail!("Cart is empty; nothing to check out");
    };
    let json = snapshot.to_json()?;

    match output {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
            ctx.output.success(&format!(
                "Checkout snapshot for {} items ({} pieces, {}) written to {}",
                snapshot.total_items,
                snapshot.piece_count(),
                format_money(snapshot.total_amount),
                path.display()
            ));
        }
        None => println!("{}", json),
    }
    Ok(())
}
