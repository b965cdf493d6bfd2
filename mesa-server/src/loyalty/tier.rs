//! Loyalty Tiers
//!
//! Pure functions deriving the customer tier from cumulative spend and
//! the points earned for an order. Uses rust_decimal so that multiplier
//! arithmetic stays exact.

use rust_decimal::prelude::*;
use shared::models::LoyaltyTier;

/// Spend thresholds (cumulative, currency units)
const SILVER_THRESHOLD: f64 = 500.0;
const GOLD_THRESHOLD: f64 = 2000.0;
const PLATINUM_THRESHOLD: f64 = 5000.0;

/// Derive the tier from cumulative points-bearing spend.
///
/// Monotone in spend, so tiers never downgrade: redemptions reduce the
/// balance, never the spend.
pub fn tier_for_spend(total_spent: f64) -> LoyaltyTier {
    if total_spent >= PLATINUM_THRESHOLD {
        LoyaltyTier::Platinum
    } else if total_spent >= GOLD_THRESHOLD {
        LoyaltyTier::Gold
    } else if total_spent >= SILVER_THRESHOLD {
        LoyaltyTier::Silver
    } else {
        LoyaltyTier::Bronze
    }
}

/// Points-earning multiplier per tier
pub fn tier_multiplier(tier: LoyaltyTier) -> Decimal {
    match tier {
        LoyaltyTier::Bronze => Decimal::new(100, 2),   // 1.00
        LoyaltyTier::Silver => Decimal::new(125, 2),   // 1.25
        LoyaltyTier::Gold => Decimal::new(150, 2),     // 1.50
        LoyaltyTier::Platinum => Decimal::new(200, 2), // 2.00
    }
}

/// Points earned for an order: `floor(goods_total * multiplier)`.
///
/// `goods_total` is the goods value after discount, excluding the
/// delivery fee. Never negative.
pub fn points_for_order(goods_total: f64, tier: LoyaltyTier) -> i64 {
    let total = Decimal::from_f64(goods_total).unwrap_or_default();
    if total <= Decimal::ZERO {
        return 0;
    }
    (total * tier_multiplier(tier))
        .floor()
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier_for_spend(0.0), LoyaltyTier::Bronze);
        assert_eq!(tier_for_spend(499.99), LoyaltyTier::Bronze);
        assert_eq!(tier_for_spend(500.0), LoyaltyTier::Silver);
        assert_eq!(tier_for_spend(1999.99), LoyaltyTier::Silver);
        assert_eq!(tier_for_spend(2000.0), LoyaltyTier::Gold);
        assert_eq!(tier_for_spend(4999.99), LoyaltyTier::Gold);
        assert_eq!(tier_for_spend(5000.0), LoyaltyTier::Platinum);
    }

    #[test]
    fn test_points_bronze() {
        assert_eq!(points_for_order(25.50, LoyaltyTier::Bronze), 25);
        assert_eq!(points_for_order(0.99, LoyaltyTier::Bronze), 0);
    }

    #[test]
    fn test_points_multipliers() {
        // 40.00 * 1.25 = 50
        assert_eq!(points_for_order(40.0, LoyaltyTier::Silver), 50);
        // 33.33 * 1.5 = 49.995 → 49
        assert_eq!(points_for_order(33.33, LoyaltyTier::Gold), 49);
        // 19.99 * 2 = 39.98 → 39
        assert_eq!(points_for_order(19.99, LoyaltyTier::Platinum), 39);
    }

    #[test]
    fn test_points_never_negative() {
        assert_eq!(points_for_order(-5.0, LoyaltyTier::Platinum), 0);
        assert_eq!(points_for_order(0.0, LoyaltyTier::Bronze), 0);
    }
}
