//! Cart Pricing
//!
//! Logic for pricing a validated cart. Uses rust_decimal for precise
//! calculations, stores as f64.

use rust_decimal::prelude::*;
use shared::models::{MenuItem, MenuItemAddOn};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub(crate) fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// One priced cart line: menu item snapshot + chosen add-ons
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub menu_item_id: i64,
    pub category_id: i64,
    pub item_name: String,
    /// Item price alone, per unit (add-ons are itemized separately)
    pub unit_price: f64,
    pub quantity: i64,
    pub add_ons: Vec<MenuItemAddOn>,
    /// `(unit_price + Σ add-on prices) * quantity`
    pub line_total: f64,
}

/// A fully priced cart
#[derive(Debug, Clone, Default)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub subtotal: f64,
}

/// Price a validated cart.
///
/// Per line: `(item.price + Σ addon.price) * quantity`, accumulated in
/// Decimal; rounding to 2dp happens once per line and once for the
/// subtotal, half-up.
pub fn price_cart(lines: &[(MenuItem, i64, Vec<MenuItemAddOn>)]) -> PricedCart {
    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal = Decimal::ZERO;

    for (item, quantity, add_ons) in lines {
        let add_on_sum: Decimal = add_ons.iter().map(|a| to_decimal(a.price)).sum();
        let per_unit = to_decimal(item.price) + add_on_sum;
        let line_total = per_unit * Decimal::from(*quantity);
        subtotal += line_total;

        priced.push(PricedLine {
            menu_item_id: item.id,
            category_id: item.category_id,
            item_name: item.name.clone(),
            unit_price: item.price,
            quantity: *quantity,
            add_ons: add_ons.clone(),
            line_total: to_f64(line_total),
        });
    }

    PricedCart {
        lines: priced,
        subtotal: to_f64(subtotal),
    }
}

/// Final order total: the discount applies to goods only, never to the
/// delivery fee, and never pushes the goods value below zero.
pub fn compute_total(subtotal: f64, discount: f64, delivery_fee: f64) -> f64 {
    let goods = (to_decimal(subtotal) - to_decimal(discount)).max(Decimal::ZERO);
    to_f64(goods + to_decimal(delivery_fee))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: i64, category_id: i64, price: f64) -> MenuItem {
        MenuItem {
            id,
            category_id,
            name: format!("Item {id}"),
            description: None,
            image_url: None,
            price,
            is_available: true,
            is_active: true,
            sort_order: 0,
            rating_sum: 0,
            rating_count: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn make_add_on(id: i64, menu_item_id: i64, price: f64) -> MenuItemAddOn {
        MenuItemAddOn {
            id,
            menu_item_id,
            name: format!("AddOn {id}"),
            price,
            is_active: true,
        }
    }

    #[test]
    fn test_single_line() {
        let cart = price_cart(&[(make_item(1, 10, 9.5), 2, vec![])]);
        assert_eq!(cart.subtotal, 19.0);
        assert_eq!(cart.lines[0].line_total, 19.0);
    }

    #[test]
    fn test_add_ons_multiply_with_quantity() {
        // (8.00 + 1.50 + 0.75) * 3 = 30.75
        let add_ons = vec![make_add_on(100, 1, 1.5), make_add_on(101, 1, 0.75)];
        let cart = price_cart(&[(make_item(1, 10, 8.0), 3, add_ons)]);
        assert_eq!(cart.subtotal, 30.75);
    }

    #[test]
    fn test_multiple_lines_accumulate() {
        let cart = price_cart(&[
            (make_item(1, 10, 12.9), 1, vec![]),
            (make_item(2, 11, 4.35), 2, vec![]),
        ]);
        // 12.90 + 8.70 = 21.60
        assert_eq!(cart.subtotal, 21.6);
    }

    #[test]
    fn test_precision_no_float_drift() {
        // 0.1 + 0.2 style drift must not appear: 3 * 0.1 = 0.30
        let cart = price_cart(&[(make_item(1, 10, 0.1), 3, vec![])]);
        assert_eq!(cart.subtotal, 0.3);
    }

    #[test]
    fn test_compute_total_discount_goods_only() {
        // Discount larger than goods: total floors at the delivery fee
        assert_eq!(compute_total(10.0, 15.0, 3.5), 3.5);
        // Normal case
        assert_eq!(compute_total(20.0, 5.0, 2.0), 17.0);
        // No discount
        assert_eq!(compute_total(20.0, 0.0, 0.0), 20.0);
    }

    #[test]
    fn test_duplicate_items_stay_distinct_lines() {
        let cart = price_cart(&[
            (make_item(1, 10, 5.0), 1, vec![make_add_on(100, 1, 1.0)]),
            (make_item(1, 10, 5.0), 1, vec![]),
        ]);
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.subtotal, 11.0);
    }
}
