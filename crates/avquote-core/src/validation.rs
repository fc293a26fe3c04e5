//! # Validation Module
//!
//! Caller-side input checks. The pricing functions accept anything and
//! compute through; the CLI runs these first so that obviously broken input
//! is reported instead of quoted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Types and required fields (quantity, unitPrice, name)             │
//! │  └── Unknown fields ignored                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── validate_project: room names, quantities, prices, margins         │
//! │  └── validate_currency_code / validate_margin for CLI overrides        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Rate resolution                                              │
//! │  └── validate_exchange_rate: out-of-range rates fall back to 1         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use avquote_core::validation::{validate_currency_code, validate_quantity};
//!
//! assert!(validate_currency_code("INR").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(-1).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{ExchangeRate, LineItem, Margin, Project, Room, TaxRate};
use crate::{
    MAX_EXCHANGE_RATE, MAX_ITEM_QUANTITY, MAX_MARGIN_PERCENT, MAX_ROOM_NAME_LEN, MAX_UNIT_PRICE,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an ISO-4217-style currency code: exactly three ASCII letters.
///
/// Case is not checked; codes are normalized before lookup.
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: format!("'{code}' is not a three-letter currency code"),
        });
    }

    Ok(())
}

/// Validates a room name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_room_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "room name".to_string(),
        });
    }

    if name.chars().count() > MAX_ROOM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "room name".to_string(),
            max: MAX_ROOM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Zero is allowed (placeholder lines)
/// - Must not be negative
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - Must not be negative
/// - Must not exceed MAX_UNIT_PRICE (keeps pricing arithmetic in range)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.amount() > Decimal::from(MAX_UNIT_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates a margin percentage.
///
/// ## Rules
/// - Greater than -100 (a -100% margin would give the goods away)
/// - At most MAX_MARGIN_PERCENT
pub fn validate_margin(margin: Margin) -> ValidationResult<()> {
    let pct = margin.percent();
    if pct <= Decimal::from(-100) || pct > Decimal::from(MAX_MARGIN_PERCENT) {
        return Err(ValidationError::OutOfRange {
            field: "margin".to_string(),
            min: -100,
            max: MAX_MARGIN_PERCENT,
        });
    }

    Ok(())
}

/// Validates a conversion rate: strictly positive, at most MAX_EXCHANGE_RATE.
pub fn validate_exchange_rate(rate: ExchangeRate) -> ValidationResult<()> {
    if rate.value() <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "exchange rate".to_string(),
        });
    }

    if rate.value() > Decimal::from(MAX_EXCHANGE_RATE) {
        return Err(ValidationError::OutOfRange {
            field: "exchange rate".to_string(),
            min: 0,
            max: MAX_EXCHANGE_RATE,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates one line item's priced fields.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    if let Some(margin) = item.margin {
        validate_margin(margin)?;
    }
    Ok(())
}

/// Validates a room and all of its line items.
pub fn validate_room(room: &Room) -> CoreResult<()> {
    validate_room_name(&room.name).map_err(|source| CoreError::InvalidRoom {
        room: room.name.clone(),
        source,
    })?;

    for (idx, item) in room.boq.iter().enumerate() {
        validate_line_item(item).map_err(|source| CoreError::InvalidLineItem {
            room: room.name.clone(),
            line: idx + 1,
            source,
        })?;
    }

    Ok(())
}

/// Validates every room of a project. Stops at the first problem.
pub fn validate_project(project: &Project) -> CoreResult<()> {
    project.rooms.iter().try_for_each(validate_room)
}

// =============================================================================
// Unit Tests
// =============================================================================
