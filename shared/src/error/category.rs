//! Error categories for classification and logging

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// High-level error classification, derived from the code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General / validation errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Restaurant / branch errors (3xxx)
    Catalog,
    /// Order errors (4xxx)
    Order,
    /// Offer errors (5xxx)
    Offer,
    /// Menu errors (6xxx)
    Menu,
    /// Delivery / address errors (7xxx)
    Delivery,
    /// Loyalty / review / user errors (8xxx)
    Account,
    /// System errors (9xxx)
    System,
}

impl ErrorCode {
    /// Classify this code by its numeric range
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            3000..=3999 => ErrorCategory::Catalog,
            4000..=4999 => ErrorCategory::Order,
            5000..=5999 => ErrorCategory::Offer,
            6000..=6999 => ErrorCategory::Menu,
            7000..=7999 => ErrorCategory::Delivery,
            8000..=8999 => ErrorCategory::Account,
            _ => ErrorCategory::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ranges() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::OrderEmpty.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::OfferExpired.category(), ErrorCategory::Offer);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
