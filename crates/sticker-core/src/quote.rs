//! # Quote Contract
//!
//! The request/response shapes the storefront's pricing endpoint exposes,
//! without any transport attached.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /pricing?material=..&shape=..&size=..[&quantity=..]               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingQuery (raw strings)                                            │
//! │       │  validation.rs: closed sets, quantity bounds                   │
//! │       │  tables.ensure_priced: no silent baseline at the boundary      │
//! │       ▼                                                                 │
//! │  quantity given? ──yes──► PricingQuote::Single  { pricing, ... }        │
//! │       │                                                                 │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  PricingQuote::Matrix { matrix, ..., available_quantities }            │
//! │                                                                         │
//! │  Any failure ──► ApiError { code, message, field }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::engine::PricingEngine;
use crate::error::{CoreError, ValidationError};
use crate::types::{Material, PriceResult, PricingConfig, Shape, Size};
use crate::validation::{parse_material, parse_quantity, parse_shape, parse_size, validate_quantity};

// =============================================================================
// Request
// =============================================================================

/// Raw query parameters, exactly as received.
///
/// Older storefront builds send `support`, `forme` and `taille`; those names
/// are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingQuery {
    #[serde(alias = "support")]
    pub material: Option<String>,
    #[serde(alias = "forme")]
    pub shape: Option<String>,
    #[serde(alias = "taille")]
    pub size: Option<String>,
    pub quantity: Option<String>,
}

impl PricingQuery {
    pub fn new(material: &str, shape: &str, size: &str, quantity: Option<&str>) -> Self {
        PricingQuery {
            material: Some(material.to_string()),
            shape: Some(shape.to_string()),
            size: Some(size.to_string()),
            quantity: quantity.map(str::to_string),
        }
    }
}

/// The validated configuration echoed back with every quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteConfiguration {
    pub material: Material,
    pub shape: Shape,
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<u32>,
}

// =============================================================================
// Response
// =============================================================================

/// A single price or the full matrix, depending on whether a quantity was
/// requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum PricingQuote {
    Single {
        pricing: PriceResult,
        configuration: QuoteConfiguration,
    },
    Matrix {
        matrix: Vec<PriceResult>,
        configuration: QuoteConfiguration,
        available_quantities: Vec<u32>,
    },
}

/// Response of the quantities listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuantitiesResponse {
    pub quantities: Vec<u32>,
}

// =============================================================================
// Errors
// =============================================================================

/// Error returned to the storefront.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "quantity must be between 5 and 1000",
///   "field": "quantity"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Offending query parameter, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Malformed or out-of-range query parameter (400)
    ValidationError,

    /// Configuration the loaded tables do not price (400)
    UnknownCoefficientKey,

    /// Pricing tables are unusable (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status the transport layer should answer with.
    pub const fn http_status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError | ErrorCode::UnknownCoefficientKey => 400,
            ErrorCode::Internal => 500,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn is_client_error(&self) -> bool {
        self.code.http_status() < 500
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            field: Some(err.field().to_string()),
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::UnknownCoefficientKey { ref kind, .. } => ApiError {
                code: ErrorCode::UnknownCoefficientKey,
                field: Some(kind.clone()),
                message: err.to_string(),
            },
            CoreError::InvalidTables { .. } | CoreError::TablesFormat(_) => {
                // Details are for operators, not customers
                tracing::error!("Pricing tables unusable: {}", err);
                ApiError::internal("Pricing is temporarily unavailable")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Operations
// =============================================================================

fn required(value: &Option<String>, field: &str) -> Result<String, ValidationError> {
    value.clone().ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

/// Answers a price query.
///
/// ## Example
/// ```rust
/// use sticker_core::quote::{quote, PricingQuery, PricingQuote};
/// use sticker_core::PricingEngine;
///
/// let query = PricingQuery::new("white-vinyl", "round", "5x5", Some("100"));
/// match quote(PricingEngine::standard(), &query).unwrap() {
///     PricingQuote::Single { pricing, .. } => assert_eq!(pricing.unit_price_cents, 351),
///     PricingQuote::Matrix { .. } => unreachable!(),
/// }
/// ```
pub fn quote(engine: &PricingEngine, query: &PricingQuery) -> Result<PricingQuote, ApiError> {
    let material = parse_material(&required(&query.material, "material")?)?;
    let shape = parse_shape(&required(&query.shape, "shape")?)?;
    let size = parse_size(&required(&query.size, "size")?)?;

    let quantity = match query.quantity.as_deref() {
        Some(raw) => Some(validate_quantity(parse_quantity(raw)?, engine)?),
        None => None,
    };

    if let Err(err) = engine.tables().ensure_priced(material, shape, size) {
        warn!(%material, %shape, %size, "Rejected quote for configuration missing from tables");
        return Err(err.into());
    }

    let configuration = QuoteConfiguration {
        material,
        shape,
        size,
        quantity,
    };

    match quantity {
        Some(quantity) => {
            debug!(%material, %shape, %size, quantity, "Single price quote");
            let pricing = engine.calculate_price(&PricingConfig::new(material, shape, size, quantity));
            Ok(PricingQuote::Single {
                pricing,
                configuration,
            })
        }
        None => {
            debug!(%material, %shape, %size, "Price matrix quote");
            Ok(PricingQuote::Matrix {
                matrix: engine.generate_price_matrix(material, shape, size),
                configuration,
                available_quantities: engine.available_quantities(),
            })
        }
    }
}

/// Lists the orderable quantity ladder.
pub fn available_quantities(engine: &PricingEngine) -> QuantitiesResponse {
    QuantitiesResponse {
        quantities: engine.available_quantities(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
