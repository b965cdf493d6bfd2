//! Unified error codes for the Mesa platform
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Restaurant / branch errors
//! - 4xxx: Order errors
//! - 5xxx: Offer (coupon) errors
//! - 6xxx: Menu errors
//! - 7xxx: Delivery / address errors
//! - 8xxx: Loyalty / review / user errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Token has been revoked (logout blacklist)
    TokenRevoked = 1005,
    /// Account is disabled
    AccountDisabled = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Restaurant / Branch ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// Branch not found
    BranchNotFound = 3002,
    /// Branch is closed at the requested time
    BranchClosed = 3003,
    /// Branch is deactivated
    BranchInactive = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Order subtotal below the branch minimum
    OrderBelowMinimum = 4003,
    /// Status transition not allowed
    InvalidStatusTransition = 4004,
    /// Order can no longer be cancelled
    OrderNotCancellable = 4005,

    // ==================== 5xxx: Offer (coupon) ====================
    /// Offer code unknown or inactive
    OfferNotFound = 5001,
    /// Offer is not yet active
    OfferNotStarted = 5002,
    /// Offer date window has ended
    OfferExpired = 5003,
    /// Offer usage cap reached
    OfferExhausted = 5004,
    /// Per-user usage cap reached
    OfferPerUserExhausted = 5005,
    /// Order subtotal below the offer minimum
    OfferBelowMinimum = 5006,
    /// Offer scope does not match the order
    OfferOutOfScope = 5007,

    // ==================== 6xxx: Menu ====================
    /// Category not found
    CategoryNotFound = 6001,
    /// Menu item not found
    MenuItemNotFound = 6002,
    /// Menu item is not available for ordering
    MenuItemUnavailable = 6003,
    /// Add-on not found
    AddOnNotFound = 6004,
    /// Add-on does not belong to the menu item
    AddOnMismatch = 6005,
    /// Category still has menu items
    CategoryHasItems = 6006,

    // ==================== 7xxx: Delivery / Address ====================
    /// Driver not found
    DriverNotFound = 7001,
    /// Driver is not available
    DriverUnavailable = 7002,
    /// Order has no driver assigned
    NoDriverAssigned = 7003,
    /// Address not found (or not owned by the caller)
    AddressNotFound = 7101,

    // ==================== 8xxx: Loyalty / Review / User ====================
    /// Loyalty account not found
    LoyaltyAccountNotFound = 8001,
    /// Not enough points for the redemption
    InsufficientPoints = 8002,
    /// Redemption amount invalid (min 100, multiple of 100)
    InvalidRedeemAmount = 8003,
    /// Review not allowed for this order/item
    ReviewNotAllowed = 8101,
    /// Review already exists for this order/item
    ReviewAlreadyExists = 8102,
    /// Username already taken
    UsernameExists = 8201,
    /// Email already registered
    EmailExists = 8202,
    /// User not found
    UserNotFound = 8203,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error (transient)
    NetworkError = 9004,
    /// Operation timed out
    TimeoutError = 9005,
    /// Mail relay rejected or unreachable
    MailRelayError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::TokenRevoked => "Token has been revoked",
            Self::AccountDisabled => "Account is disabled",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::AdminRequired => "Admin role required",

            Self::RestaurantNotFound => "Restaurant not found",
            Self::BranchNotFound => "Branch not found",
            Self::BranchClosed => "Branch is closed",
            Self::BranchInactive => "Branch is deactivated",

            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order has no items",
            Self::OrderBelowMinimum => "Order is below the branch minimum",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::OrderNotCancellable => "Order can no longer be cancelled",

            Self::OfferNotFound => "Coupon code not recognized",
            Self::OfferNotStarted => "Coupon is not active yet",
            Self::OfferExpired => "Coupon has expired",
            Self::OfferExhausted => "Coupon usage limit reached",
            Self::OfferPerUserExhausted => "You have already used this coupon",
            Self::OfferBelowMinimum => "Order is below the coupon minimum",
            Self::OfferOutOfScope => "Coupon does not apply to this order",

            Self::CategoryNotFound => "Category not found",
            Self::MenuItemNotFound => "Menu item not found",
            Self::MenuItemUnavailable => "Menu item is unavailable",
            Self::AddOnNotFound => "Add-on not found",
            Self::AddOnMismatch => "Add-on does not belong to this item",
            Self::CategoryHasItems => "Category still has menu items",

            Self::DriverNotFound => "Driver not found",
            Self::DriverUnavailable => "Driver is not available",
            Self::NoDriverAssigned => "No driver assigned",
            Self::AddressNotFound => "Address not found",

            Self::LoyaltyAccountNotFound => "Loyalty account not found",
            Self::InsufficientPoints => "Not enough loyalty points",
            Self::InvalidRedeemAmount => "Invalid redemption amount",
            Self::ReviewNotAllowed => "Review not allowed for this order",
            Self::ReviewAlreadyExists => "Review already exists",
            Self::UsernameExists => "Username already taken",
            Self::EmailExists => "Email already registered",
            Self::UserNotFound => "User not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Operation timed out",
            Self::MailRelayError => "Mail relay error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::TokenRevoked,
            1006 => Self::AccountDisabled,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            2003 => Self::AdminRequired,

            3001 => Self::RestaurantNotFound,
            3002 => Self::BranchNotFound,
            3003 => Self::BranchClosed,
            3004 => Self::BranchInactive,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderEmpty,
            4003 => Self::OrderBelowMinimum,
            4004 => Self::InvalidStatusTransition,
            4005 => Self::OrderNotCancellable,

            5001 => Self::OfferNotFound,
            5002 => Self::OfferNotStarted,
            5003 => Self::OfferExpired,
            5004 => Self::OfferExhausted,
            5005 => Self::OfferPerUserExhausted,
            5006 => Self::OfferBelowMinimum,
            5007 => Self::OfferOutOfScope,

            6001 => Self::CategoryNotFound,
            6002 => Self::MenuItemNotFound,
            6003 => Self::MenuItemUnavailable,
            6004 => Self::AddOnNotFound,
            6005 => Self::AddOnMismatch,
            6006 => Self::CategoryHasItems,

            7001 => Self::DriverNotFound,
            7002 => Self::DriverUnavailable,
            7003 => Self::NoDriverAssigned,
            7101 => Self::AddressNotFound,

            8001 => Self::LoyaltyAccountNotFound,
            8002 => Self::InsufficientPoints,
            8003 => Self::InvalidRedeemAmount,
            8101 => Self::ReviewNotAllowed,
            8102 => Self::ReviewAlreadyExists,
            8201 => Self::UsernameExists,
            8202 => Self::EmailExists,
            8203 => Self::UserNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::NetworkError,
            9005 => Self::TimeoutError,
            9006 => Self::MailRelayError,

            other => return Err(format!("Unknown error code: {other}")),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::OfferExpired,
            ErrorCode::MenuItemUnavailable,
            ErrorCode::MailRelayError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
        assert_eq!(ErrorCode::OrderNotFound.to_string(), "E4001");
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(ErrorCode::try_from(12345).is_err());
    }
}
