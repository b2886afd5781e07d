//! # Validation Module
//!
//! Boundary checks for raw price queries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront                                                   │
//! │  └── Dropdowns only offer known materials, shapes and sizes            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (query strings → typed values)                   │
//! │  ├── Closed-set parsing for material / shape / size                    │
//! │  └── Quantity inside the ladder bounds                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: PricingEngine                                                │
//! │  └── Total over typed input, never fails                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sticker_core::validation::{parse_quantity, validate_quantity};
//! use sticker_core::PricingEngine;
//!
//! let engine = PricingEngine::standard();
//! let raw = parse_quantity("250").unwrap();
//! assert_eq!(validate_quantity(raw, engine).unwrap(), 250);
//! assert!(validate_quantity(2000, engine).is_err());
//! ```

use crate::engine::PricingEngine;
use crate::error::ValidationError;
use crate::types::{Material, Shape, Size};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Closed-Set Parsers
// =============================================================================

pub fn parse_material(raw: &str) -> ValidationResult<Material> {
    raw.parse()
}

pub fn parse_shape(raw: &str) -> ValidationResult<Shape> {
    raw.parse()
}

/// Parses a size, accepting only sizes a customer can order.
///
/// `custom` is a known size but has no price of its own yet, so it is
/// rejected here instead of silently pricing as the smallest size.
pub fn parse_size(raw: &str) -> ValidationResult<Size> {
    let size: Size = raw.parse()?;
    if !size.is_orderable() {
        return Err(ValidationError::NotAllowed {
            field: "size".to_string(),
            allowed: Size::ORDERABLE.iter().map(|s| s.as_str().to_string()).collect(),
        });
    }
    Ok(size)
}

// =============================================================================
// Quantity
// =============================================================================

/// Parses a quantity query parameter.
///
/// ## Rules
/// - Must not be empty
/// - Must be a whole number ("12.5" and "abc" are rejected)
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a whole number".to_string(),
    })
}

/// Validates a quantity against the engine's ladder.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must lie within `[smallest tier, largest tier]`
///
/// ## Flow
/// ```text
/// quantity=3    → OutOfRange { min: 5, max: 1000 }
/// quantity=0    → MustBePositive
/// quantity=42   → Ok(42)   (between tiers is fine)
/// quantity=1000 → Ok(1000)
/// ```
pub fn validate_quantity(qty: i64, engine: &PricingEngine) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if !engine.is_valid_quantity(qty) {
        let (min, max) = engine.tables().quantity_bounds().unwrap_or((0, 0));
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: i64::from(min),
            max: i64::from(max),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
