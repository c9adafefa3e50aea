//! CLI command implementations.

pub mod cart;
pub mod prices;
pub mod quote;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use panel_commerce::prelude::*;

use crate::output::{format_lf, format_money, Output};

/// Arguments for the prices command.
#[derive(Args)]
pub struct PricesArgs {
    /// Product title as it appears in the price table.
    pub title: String,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product title; looked up in the catalog when present.
    #[arg(short, long)]
    pub title: String,

    #[command(flatten)]
    pub config: VariantArgs,

    /// Price per foot in place of the catalog price; a table or variant
    /// price still takes precedence.
    #[arg(long)]
    pub price: Option<f64>,

    /// Cut line as QTY@DIMENSION[#MARK], e.g. 2@10'6-1/2"#A1.
    #[arg(short, long = "line", required = true)]
    pub lines: Vec<String>,
}

/// Color/gauge selection shared by quote and cart add.
#[derive(Args, Default)]
pub struct VariantArgs {
    /// Panel color.
    #[arg(long)]
    pub color: Option<String>,

    /// Panel gauge (defaults to the one in the product title).
    #[arg(long)]
    pub gauge: Option<String>,

    /// Variant label as listed by `panel prices`, e.g. "Charcoal / 24ga".
    #[arg(long, conflicts_with_all = ["color", "gauge"])]
    pub variant: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartAction>,

    /// Keep a separate cart for this shopper.
    #[arg(short, long, global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart (default).
    Show,
    /// Add a product, replacing any entry for the same product.
    Add(AddArgs),
    /// Set a new quantity; zero removes the item.
    Update {
        /// Product id.
        product_id: String,
        /// Linear feet or count.
        quantity: f64,
    },
    /// Remove a product.
    Remove {
        /// Product id.
        product_id: String,
    },
    /// Empty the cart.
    Clear,
    /// Print the checkout snapshot.
    Checkout {
        /// Write the snapshot to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Arguments for `cart add`.
#[derive(Args)]
pub struct AddArgs {
    /// Catalog product id.
    #[arg(short, long)]
    pub product: String,

    #[command(flatten)]
    pub config: VariantArgs,

    /// Cut line as QTY@DIMENSION[#MARK] (LF products).
    #[arg(short, long = "line", conflicts_with = "count")]
    pub lines: Vec<String>,

    /// Number of units (SQ and EA products).
    #[arg(long)]
    pub count: Option<u32>,
}

/// Parse a cut line written as `QTY@DIMENSION[#MARK]`.
///
/// The quantity may be left out (`10'6"` is one panel). Quantity and
/// dimension follow the same clamping as the order form.
pub fn parse_line_spec(spec: &str) -> Result<LineItem> {
    let (body, mark) = match spec.split_once('#') {
        Some((body, mark)) => (body, mark.trim()),
        None => (spec, ""),
    };
    let (qty, dimension) = match body.split_once('@') {
        Some((qty, dimension)) => (qty.trim(), dimension),
        None => ("1", body),
    };

    let dimension: Dimension = dimension
        .parse()
        .with_context(|| format!("Invalid line '{}'", spec))?;
    let qty = LineField::parse(FieldKind::Qty, qty)
        .with_context(|| format!("Invalid line '{}'", spec))?;

    let line = qty.apply(&LineItem::with_dimension(1, dimension));
    Ok(line.with_piece_mark(mark))
}

/// Build an ordering session for `product` holding `specs` as its lines.
pub fn build_session(
    product: Product,
    variant: &VariantArgs,
    resolver: &PriceResolver,
    specs: &[String],
) -> Result<OrderSession> {
    let mut session = OrderSession::new(product);

    if let Some(label) = &variant.variant {
        let wanted = label.trim().to_lowercase();
        let found = resolver
            .get_prices_for_product(&session.product().title)
            .into_iter()
            .find(|v| v.variant.label().to_lowercase() == wanted);
        match found {
            Some(found) => session.select_variant(found),
            None => bail!(
                "No variant '{}' for {}; see `panel prices`",
                label,
                session.product().title
            ),
        }
    } else {
        let color = variant.color.clone().unwrap_or_default();
        let gauge = variant
            .gauge
            .clone()
            .unwrap_or_else(|| session.gauge().to_string());
        session.configure(color, gauge);
        session.apply_pricing(resolver);
    }

    let blank = session.lines()[0].id.clone();
    for spec in specs {
        session.push_line(parse_line_spec(spec)?);
    }
    session.remove_line(&blank)?;

    Ok(session)
}

/// Print the lines of a session as a table.
pub fn print_lines(output: &Output, lines: &[LineItem], price: Option<f64>) {
    let widths = [4, 16, 8, 12, 12, 10];
    output.table_row(&["QTY", "LENGTH", "MARK", "PER PANEL", "TOTAL", "PRICE"], &widths);
    for line in lines {
        let line_price = price
            .map(|p| format_money(line.line_price(p)))
            .unwrap_or_else(|| "-".to_string());
        output.table_row(
            &[
                &line.qty.to_string(),
                &line.dimension().to_string(),
                &line.piece_mark,
                &format_lf(line.length_per_panel()),
                &format_lf(line.total_lf()),
                &line_price,
            ],
            &widths,
        );
    }
}
