//! # Validation Module
//!
//! Input validation for customer details and memo lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Memo form (frontend)                                         │
//! │  └── Required fields, immediate feedback                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: MemoDraft::finalize (Rust)                                   │
//! │  └── THIS MODULE: field format and range rules                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Aggregation engine                                           │
//! │  └── No checks at all, memos are trusted as stored                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use memobook_core::validation::{validate_mobile, validate_item_name};
//!
//! validate_mobile("01711223344").unwrap();
//! validate_item_name("Silk").unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Quantity};
use crate::{
    MAX_ITEM_QUANTITY_MILLI, MAX_MEMO_ITEMS, MAX_MOBILE_DIGITS, MAX_RATE_PAISA, MIN_MOBILE_DIGITS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer mobile number and returns it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - Digits only, with an optional leading `+`
/// - Between 10 and 15 digits
///
/// ## Example
/// ```rust
/// use memobook_core::validation::validate_mobile;
///
/// assert_eq!(validate_mobile(" 01711223344 ").unwrap(), "01711223344");
/// assert!(validate_mobile("+8801711223344").is_ok());
/// assert!(validate_mobile("0171").is_err());
/// assert!(validate_mobile("0171-122-3344").is_err());
/// ```
pub fn validate_mobile(mobile: &str) -> ValidationResult<String> {
    let mobile = mobile.trim();

    if mobile.is_empty() {
        return Err(ValidationError::required("mobile"));
    }

    let digits = mobile.strip_prefix('+').unwrap_or(mobile);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobile".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if digits.len() < MIN_MOBILE_DIGITS {
        return Err(ValidationError::TooShort {
            field: "mobile".to_string(),
            min: MIN_MOBILE_DIGITS,
        });
    }

    if digits.len() > MAX_MOBILE_DIGITS {
        return Err(ValidationError::TooLong {
            field: "mobile".to_string(),
            max: MAX_MOBILE_DIGITS,
        });
    }

    Ok(mobile.to_string())
}

/// Validates a partial mobile number typed into a search box.
///
/// ## Rules
/// - Can be empty (matches every customer)
/// - Digits only, with an optional leading `+`
/// - At most 15 digits
pub fn validate_mobile_prefix(prefix: &str) -> ValidationResult<String> {
    let prefix = prefix.trim();
    let digits = prefix.strip_prefix('+').unwrap_or(prefix);

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobile".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if digits.len() > MAX_MOBILE_DIGITS {
        return Err(ValidationError::TooLong {
            field: "mobile".to_string(),
            max: MAX_MOBILE_DIGITS,
        });
    }

    Ok(prefix.to_string())
}

/// Validates a required free-text field (name, address) and returns it trimmed.
pub fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a customer display name.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    validate_text("name", name, 100)
}

/// Validates a postal address.
pub fn validate_address(address: &str) -> ValidationResult<String> {
    validate_text("address", address, 300)
}

/// Validates an item name.
///
/// ```rust
/// use memobook_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Katan Silk").is_ok());
/// assert!(validate_item_name("  ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    validate_text("item name", name, 100)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed 100,000 units
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if qty.is_negative() {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    if qty.milli() > MAX_ITEM_QUANTITY_MILLI {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY_MILLI / 1000,
        });
    }

    Ok(())
}

/// Validates a unit rate. Zero is allowed (samples, gifts).
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed 10,000,000 taka per unit
///
/// ```rust
/// use memobook_core::money::Money;
/// use memobook_core::validation::validate_rate;
///
/// assert!(validate_rate(Money::from_taka(150)).is_ok());
/// assert!(validate_rate(Money::zero()).is_ok());
/// assert!(validate_rate(Money::from_paisa(-1)).is_err());
/// assert!(validate_rate(Money::from_taka(10_000_001)).is_err());
/// ```
pub fn validate_rate(rate: Money) -> ValidationResult<()> {
    if rate.is_negative() {
        return Err(ValidationError::Negative {
            field: "rate".to_string(),
        });
    }

    if rate.paisa() > MAX_RATE_PAISA {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: MAX_RATE_PAISA / 100,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of lines on a memo.
pub fn validate_item_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::required("items"));
    }

    if count > MAX_MEMO_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_MEMO_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("01711223344").is_ok());
        assert!(validate_mobile("+8801711223344").is_ok());

        assert!(matches!(validate_mobile(""), Err(ValidationError::Required { .. })));
        assert!(matches!(validate_mobile("017"), Err(ValidationError::TooShort { .. })));
        assert!(matches!(
            validate_mobile("0171122334455667"),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(matches!(
            validate_mobile("0171 122 3344"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_mobile_prefix() {
        assert_eq!(validate_mobile_prefix("").unwrap(), "");
        assert_eq!(validate_mobile_prefix(" 0171 ").unwrap(), "0171");
        assert!(validate_mobile_prefix("01a").is_err());
    }

    #[test]
    fn test_validate_text_fields() {
        assert_eq!(validate_customer_name("  Rahim Uddin ").unwrap(), "Rahim Uddin");
        assert!(validate_customer_name("").is_err());
        assert!(validate_address(&"x".repeat(301)).is_err());
        assert!(validate_item_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::zero()).is_ok());
        assert!(validate_quantity(Quantity::from_milli(2_500)).is_ok());
        assert!(validate_quantity(Quantity::whole(100_000)).is_ok());

        assert!(validate_quantity(Quantity::from_milli(-1)).is_err());
        assert!(validate_quantity(Quantity::whole(100_001)).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate(Money::zero()).is_ok());
        assert!(validate_rate(Money::from_paisa(MAX_RATE_PAISA)).is_ok());

        assert!(validate_rate(Money::from_paisa(-1)).is_err());
        assert!(matches!(
            validate_rate(Money::from_paisa(MAX_RATE_PAISA + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_item_count() {
        assert!(validate_item_count(1).is_ok());
        assert!(validate_item_count(0).is_err());
        assert!(validate_item_count(MAX_MEMO_ITEMS + 1).is_err());
    }
}
