//! End-to-end flows: price lookup, line entry, submission, persistence.

use panel_cache::{FileStore, KvStore, MemoryStore};
use panel_commerce::prelude::*;

fn standing_seam() -> Product {
    Product::new("ss-24", "Standing Seam 24 Gauge", Unit::LF).with_img("/img/ss-24.png")
}

fn price_rows() -> Vec<PriceRow> {
    vec![
        PriceRow::new("Standing Seam 24 Gauge", "Galvalume", "24ga", 2.85),
        PriceRow::new("standing seam 24 gauge ", "CHARCOAL", "24GA", 3.10),
        PriceRow::new("PBR Panel", "White", "26ga", 3.00),
    ]
}

#[test]
fn test_scenario_a_single_line_with_fraction() {
    let line = LineItem::with_dimension(2, Dimension::new(10, 6, Sixteenths::clamped(8)));

    assert!((line.length_per_panel() - 10.541_667).abs() < 1e-6);
    assert!((line.total_lf() - 21.083_333).abs() < 1e-6);
    let price = line.line_price(2.85);
    assert!((price - 60.0875).abs() < 1e-9);
    assert_eq!((price * 100.0).round() / 100.0, 60.09);
}

#[test]
fn test_scenario_b_two_lines() {
    let product = Product::new("pbr", "PBR Panel", Unit::LF).with_price(3.00);
    let mut session = OrderSession::new(product);

    let first = session.lines()[0].id.clone();
    session.update_line(&first, LineField::Feet(5)).unwrap();
    let second = session.add_line();
    session.update_line(&second, LineField::Feet(3)).unwrap();

    assert!((session.total_lf() - 8.0).abs() < 1e-9);
    assert!((session.total_price().unwrap() - 24.0).abs() < 1e-9);
    assert_eq!(session.panel_count(), 2);

    let mut cart = CartStore::open_default(MemoryStore::new());
    let item = session.submit(&mut cart).unwrap();
    assert_eq!(item.piece_count(), 2);
    assert!((cart.state().total_amount - 24.0).abs() < 1e-9);
}

#[test]
fn test_scenario_c_repeated_product_replaces() {
    let product = standing_seam();
    let mut cart = CartStore::open_default(MemoryStore::new());

    let mut first = CartItem::from_count(&product, 10.0, 1).unwrap();
    first.total_price = 10.0;
    cart.add_item(first);

    let mut second = CartItem::from_count(&product, 25.0, 1).unwrap();
    second.total_price = 25.0;
    cart.add_item(second);

    let state = cart.state();
    assert_eq!(state.total_items, 1);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].total_price, 25.0);
    assert_eq!(state.total_amount, 25.0);
}

#[tokio::test]
async fn test_scenario_d_missing_price_requests_quote() {
    let mut resolver = PriceResolver::new();
    resolver.load(&StaticSource::new(price_rows())).await;

    assert_eq!(
        resolver.get_price("Standing Seam 24 Gauge", "Bronze", "24ga"),
        None
    );
    assert_eq!(
        resolver.quote("Standing Seam 24 Gauge", "Bronze", "24ga"),
        PriceQuote::RequestQuote
    );

    let mut session = OrderSession::new(standing_seam());
    session.configure("Bronze", "24ga");
    assert!(session.apply_pricing(&resolver).is_request_quote());
    assert_eq!(session.total_price(), None);
}

#[tokio::test]
async fn test_variant_selection_drives_submission() {
    let mut resolver = PriceResolver::new();
    resolver.load(&StaticSource::new(price_rows())).await;

    let variants = resolver.get_prices_for_product("Standing Seam 24 Gauge");
    assert_eq!(variants.len(), 2);

    let mut session = OrderSession::new(standing_seam());
    session.configure("galvalume", "24ga");
    assert_eq!(session.apply_pricing(&resolver), PriceQuote::Price(2.85));
    session.select_variant(variants[1].clone());

    let line = session.lines()[0].id.clone();
    session
        .update_line(&line, LineField::parse(FieldKind::Feet, "10").unwrap())
        .unwrap();

    let mut cart = CartStore::open_default(MemoryStore::new());
    let item = session.submit(&mut cart).unwrap();
    assert_eq!(item.price_per_unit, 3.10);
    assert!((item.total_price - 31.0).abs() < 1e-9);
}

#[test]
fn test_cart_state_round_trips_through_json() {
    let mut cart = CartStore::open_default(MemoryStore::new());

    let mut session = OrderSession::new(standing_seam().with_price(2.85));
    let line = session.lines()[0].id.clone();
    session.update_line(&line, LineField::Qty(2)).unwrap();
    session.update_line(&line, LineField::Feet(10)).unwrap();
    session.update_line(&line, LineField::Inches(6)).unwrap();
    session.update_line(&line, LineField::Fraction(8)).unwrap();
    session
        .update_line(&line, LineField::PieceMark("eave".to_string()))
        .unwrap();
    session.submit(&mut cart).unwrap();

    let screws = Product::new("screws", "Pancake Screws", Unit::EA).with_price(0.17);
    cart.add_item(CartItem::from_count(&screws, 0.17, 250).unwrap());

    let state = cart.state().clone();
    let decoded = CartState::from_json(&state.to_json().unwrap()).unwrap();
    assert_eq!(decoded, state);
}

#[test]
fn test_cart_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cart = CartStore::open(FileStore::new(dir.path()), "cart:guest");
        let mut session = OrderSession::new(standing_seam().with_price(2.85));
        let line = session.lines()[0].id.clone();
        session
            .update_line(&line, LineField::Feet(12))
            .unwrap();
        session.submit(&mut cart).unwrap();
    }

    let cart = CartStore::open(FileStore::new(dir.path()), "cart:guest");
    assert_eq!(cart.state().total_items, 1);
    let lines = cart.items()[0].lines.as_ref().unwrap();
    assert_eq!(lines[0].line.feet, 12);
    assert!((cart.state().total_amount - 34.2).abs() < 1e-9);
}

#[test]
fn test_corrupt_file_starts_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.set("cart", b"\x00\x01 definitely not json").unwrap();

    let cart = CartStore::open_default(store);
    assert!(cart.state().is_empty());
    assert!(cart.snapshot().is_none());
}

#[test]
fn test_dimension_text_entry() {
    let mut session = OrderSession::new(standing_seam().with_price(2.00));
    let dim: Dimension = "10' 6-1/2\"".parse().unwrap();
    session.push_line(LineItem::with_dimension(2, dim).with_piece_mark("A1"));

    let blank = session.lines()[0].id.clone();
    assert!(session.remove_line(&blank).unwrap());

    let item = session.build_cart_item().unwrap();
    let line = &item.lines.as_ref().unwrap()[0];
    assert_eq!(line.dimension().to_string(), "10' 6-1/2\"");
    assert_eq!(line.line.piece_mark, "A1");
}
