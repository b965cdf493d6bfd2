//! Coupon Validation
//!
//! Pure decision logic for offers: every rejection is a distinct
//! [`CouponError`] variant so the API can report exactly why a code was
//! refused. The discount base is the matching lines' goods value for
//! scoped offers, the whole subtotal for global ones.

use rust_decimal::prelude::*;
use shared::error::{AppError, ErrorCode};
use shared::models::{DiscountType, Offer};
use thiserror::Error;

use super::pricing::{PricedLine, to_decimal, to_f64};

/// Why a coupon was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error("Coupon code not recognized")]
    NotFound,
    #[error("Coupon is not active yet")]
    NotStarted,
    #[error("Coupon has expired")]
    Expired,
    #[error("Coupon usage limit reached")]
    Exhausted,
    #[error("You have already used this coupon")]
    PerUserExhausted,
    #[error("Order is below the coupon minimum")]
    BelowMinimum,
    #[error("Coupon does not apply to this order")]
    OutOfScope,
}

impl CouponError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::OfferNotFound,
            Self::NotStarted => ErrorCode::OfferNotStarted,
            Self::Expired => ErrorCode::OfferExpired,
            Self::Exhausted => ErrorCode::OfferExhausted,
            Self::PerUserExhausted => ErrorCode::OfferPerUserExhausted,
            Self::BelowMinimum => ErrorCode::OfferBelowMinimum,
            Self::OutOfScope => ErrorCode::OfferOutOfScope,
        }
    }
}

impl From<CouponError> for AppError {
    fn from(err: CouponError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

/// Everything the validation needs about the order being placed
#[derive(Debug)]
pub struct CouponContext<'a> {
    /// Current time (millis)
    pub now: i64,
    /// Branch the order targets
    pub branch_id: i64,
    /// Priced cart subtotal
    pub subtotal: f64,
    /// This user's prior non-cancelled orders using the offer
    pub user_usage_count: i64,
    /// Priced cart lines (for scope matching)
    pub lines: &'a [PricedLine],
}

/// Normalize a user-supplied code: trim + uppercase
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validate an offer against the order and compute the discount.
///
/// The usage cap is re-checked under the order transaction when the
/// usage is claimed; the check here only produces the friendlier error
/// before any write happens.
pub fn validate_and_price(offer: &Offer, ctx: &CouponContext<'_>) -> Result<f64, CouponError> {
    if !offer.is_active {
        return Err(CouponError::NotFound);
    }
    if ctx.now < offer.starts_at {
        return Err(CouponError::NotStarted);
    }
    if ctx.now >= offer.ends_at {
        return Err(CouponError::Expired);
    }
    if offer.usage_limit > 0 && offer.times_used >= offer.usage_limit {
        return Err(CouponError::Exhausted);
    }
    if offer.per_user_limit > 0 && ctx.user_usage_count >= offer.per_user_limit {
        return Err(CouponError::PerUserExhausted);
    }
    if ctx.subtotal < offer.min_order_amount {
        return Err(CouponError::BelowMinimum);
    }

    let base = discount_base(offer, ctx)?;
    Ok(compute_discount(offer, base))
}

/// Determine the goods value the discount applies to.
///
/// Branch scope gates the whole order; category/item scope restricts the
/// base to the matching lines.
fn discount_base(offer: &Offer, ctx: &CouponContext<'_>) -> Result<Decimal, CouponError> {
    if let Some(branch_id) = offer.branch_id
        && branch_id != ctx.branch_id
    {
        return Err(CouponError::OutOfScope);
    }

    match (offer.category_id, offer.menu_item_id) {
        (None, None) => Ok(to_decimal(ctx.subtotal)),
        (category_id, menu_item_id) => {
            let base: Decimal = ctx
                .lines
                .iter()
                .filter(|line| {
                    category_id.is_some_and(|c| c == line.category_id)
                        || menu_item_id.is_some_and(|m| m == line.menu_item_id)
                })
                .map(|line| to_decimal(line.line_total))
                .sum();
            if base <= Decimal::ZERO {
                return Err(CouponError::OutOfScope);
            }
            Ok(base)
        }
    }
}

/// Discount arithmetic: percentage (optionally capped) or fixed amount,
/// never exceeding the base.
fn compute_discount(offer: &Offer, base: Decimal) -> f64 {
    let value = to_decimal(offer.discount_value);
    let discount = match offer.discount_type {
        DiscountType::Percentage => {
            let raw = base * value / Decimal::ONE_HUNDRED;
            let cap = to_decimal(offer.max_discount_amount);
            if cap > Decimal::ZERO { raw.min(cap) } else { raw }
        }
        DiscountType::FixedAmount => value,
    };
    to_f64(discount.min(base).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_offer(discount_type: DiscountType, value: f64) -> Offer {
        Offer {
            id: 1,
            code: "WELCOME10".into(),
            name: "Welcome".into(),
            discount_type,
            discount_value: value,
            max_discount_amount: 0.0,
            min_order_amount: 0.0,
            starts_at: 1_000,
            ends_at: 2_000,
            usage_limit: 0,
            per_user_limit: 0,
            times_used: 0,
            branch_id: None,
            category_id: None,
            menu_item_id: None,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn make_line(menu_item_id: i64, category_id: i64, line_total: f64) -> PricedLine {
        PricedLine {
            menu_item_id,
            category_id,
            item_name: format!("Item {menu_item_id}"),
            unit_price: line_total,
            quantity: 1,
            add_ons: vec![],
            line_total,
        }
    }

    fn ctx<'a>(lines: &'a [PricedLine], subtotal: f64) -> CouponContext<'a> {
        CouponContext {
            now: 1_500,
            branch_id: 77,
            subtotal,
            user_usage_count: 0,
            lines,
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  welcome10 "), "WELCOME10");
    }

    #[test]
    fn test_percentage_discount() {
        let offer = make_offer(DiscountType::Percentage, 10.0);
        let lines = [make_line(1, 10, 50.0)];
        assert_eq!(validate_and_price(&offer, &ctx(&lines, 50.0)).unwrap(), 5.0);
    }

    #[test]
    fn test_percentage_cap() {
        let mut offer = make_offer(DiscountType::Percentage, 50.0);
        offer.max_discount_amount = 8.0;
        let lines = [make_line(1, 10, 100.0)];
        assert_eq!(validate_and_price(&offer, &ctx(&lines, 100.0)).unwrap(), 8.0);
    }

    #[test]
    fn test_fixed_discount_never_exceeds_base() {
        let offer = make_offer(DiscountType::FixedAmount, 20.0);
        let lines = [make_line(1, 10, 12.0)];
        assert_eq!(validate_and_price(&offer, &ctx(&lines, 12.0)).unwrap(), 12.0);
    }

    #[test]
    fn test_date_window() {
        let offer = make_offer(DiscountType::Percentage, 10.0);
        let lines = [make_line(1, 10, 50.0)];

        let mut early = ctx(&lines, 50.0);
        early.now = 999;
        assert_eq!(
            validate_and_price(&offer, &early),
            Err(CouponError::NotStarted)
        );

        let mut late = ctx(&lines, 50.0);
        late.now = 2_000; // ends_at is exclusive
        assert_eq!(validate_and_price(&offer, &late), Err(CouponError::Expired));
    }

    #[test]
    fn test_usage_caps() {
        let mut offer = make_offer(DiscountType::Percentage, 10.0);
        offer.usage_limit = 5;
        offer.times_used = 5;
        let lines = [make_line(1, 10, 50.0)];
        assert_eq!(
            validate_and_price(&offer, &ctx(&lines, 50.0)),
            Err(CouponError::Exhausted)
        );

        let mut offer = make_offer(DiscountType::Percentage, 10.0);
        offer.per_user_limit = 1;
        let mut c = ctx(&lines, 50.0);
        c.user_usage_count = 1;
        assert_eq!(
            validate_and_price(&offer, &c),
            Err(CouponError::PerUserExhausted)
        );
    }

    #[test]
    fn test_minimum_order_amount() {
        let mut offer = make_offer(DiscountType::Percentage, 10.0);
        offer.min_order_amount = 30.0;
        let lines = [make_line(1, 10, 20.0)];
        assert_eq!(
            validate_and_price(&offer, &ctx(&lines, 20.0)),
            Err(CouponError::BelowMinimum)
        );
    }

    #[test]
    fn test_branch_scope() {
        let mut offer = make_offer(DiscountType::Percentage, 10.0);
        offer.branch_id = Some(99); // order targets branch 77
        let lines = [make_line(1, 10, 50.0)];
        assert_eq!(
            validate_and_price(&offer, &ctx(&lines, 50.0)),
            Err(CouponError::OutOfScope)
        );

        offer.branch_id = Some(77);
        assert_eq!(validate_and_price(&offer, &ctx(&lines, 50.0)).unwrap(), 5.0);
    }

    #[test]
    fn test_category_scope_restricts_base() {
        let mut offer = make_offer(DiscountType::Percentage, 50.0);
        offer.category_id = Some(10);
        // Only the first line (category 10, 20.00) is in scope
        let lines = [make_line(1, 10, 20.0), make_line(2, 11, 30.0)];
        assert_eq!(
            validate_and_price(&offer, &ctx(&lines, 50.0)).unwrap(),
            10.0
        );
    }

    #[test]
    fn test_item_scope_no_match() {
        let mut offer = make_offer(DiscountType::Percentage, 50.0);
        offer.menu_item_id = Some(42);
        let lines = [make_line(1, 10, 20.0)];
        assert_eq!(
            validate_and_price(&offer, &ctx(&lines, 20.0)),
            Err(CouponError::OutOfScope)
        );
    }

    #[test]
    fn test_inactive_offer_reads_as_unknown() {
        let mut offer = make_offer(DiscountType::Percentage, 10.0);
        offer.is_active = false;
        let lines = [make_line(1, 10, 50.0)];
        assert_eq!(
            validate_and_price(&offer, &ctx(&lines, 50.0)),
            Err(CouponError::NotFound)
        );
    }
}
