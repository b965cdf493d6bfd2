//! Loyalty Models — accounts, transactions and tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Loyalty tier (会员等级)
///
/// Derived purely from cumulative points-bearing spend; never downgrades.
/// Thresholds and multipliers live in the server's loyalty module.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bronze => write!(f, "bronze"),
            Self::Silver => write!(f, "silver"),
            Self::Gold => write!(f, "gold"),
            Self::Platinum => write!(f, "platinum"),
        }
    }
}

/// Loyalty transaction kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum LoyaltyTxKind {
    Earn,
    Redeem,
    Adjust,
}

/// Loyalty account entity — one per user, created lazily
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LoyaltyAccount {
    pub id: i64,
    pub user_id: i64,
    pub points_balance: i64,
    pub lifetime_points: i64,
    pub total_spent: f64,
    pub tier: LoyaltyTier,
    pub updated_at: i64,
}

/// Loyalty ledger row — `balance_after` makes the ledger self-auditing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LoyaltyTransaction {
    pub id: i64,
    pub account_id: i64,
    pub order_id: Option<i64>,
    pub kind: LoyaltyTxKind,
    pub points: i64,
    pub balance_after: i64,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Redemption request: points → credit (100 points = 1.00)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyRedeemRequest {
    pub points: i64,
}

/// Redemption result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyRedeemResult {
    pub credit: f64,
    pub points_spent: i64,
    pub points_balance: i64,
}
