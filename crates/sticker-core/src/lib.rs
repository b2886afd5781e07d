//! # sticker-core: Pure Pricing Logic for the Sticker Shop
//!
//! This crate prices custom vinyl stickers. Everything in it is a pure
//! function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sticker Shop Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Storefront / HTTP layer / quote-cli                     │   │
//! │  │    material, shape, size, quantity? ──► JSON quote              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sticker-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   quote   │  │  engine   │  │  tables   │  │   money   │  │   │
//! │  │   │  request  │─►│  price    │─►│  ladder   │  │   cents   │  │   │
//! │  │   │  response │  │  matrix   │  │  coeffs   │  │   bps     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Material, Shape, Size, Coefficient, PricingConfig, PriceResult
//! - [`money`] - Money type with integer arithmetic and half-up rounding
//! - [`tables`] - Base prices, coefficients and the discount ladder
//! - [`engine`] - The pricing engine
//! - [`validation`] - Boundary checks for raw query parameters
//! - [`quote`] - Request/response contract of the pricing endpoint
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same configuration and tables, same price
//! 2. **No I/O**: tables arrive as values or strings, never as paths
//! 3. **Integer Money**: cents for prices, basis points for multipliers
//! 4. **Fail open inside, strict at the edge**: the engine prices unknown
//!    keys at baseline; the quote boundary rejects them
//!
//! ## Example Usage
//!
//! ```rust
//! use sticker_core::{Material, PricingConfig, PricingEngine, Shape, Size};
//!
//! let engine = PricingEngine::standard();
//! let result = engine.calculate_price(&PricingConfig::new(
//!     Material::WhiteVinyl,
//!     Shape::Round,
//!     Size::S5x5,
//!     100,
//! ));
//!
//! assert_eq!(result.discount_percentage, 22);
//! assert_eq!(result.unit_price_cents, 351);
//! assert_eq!(result.total_price_cents, 35100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod quote;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::PricingEngine;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{ApiError, ErrorCode, PricingQuery, PricingQuote, QuantitiesResponse};
pub use tables::{PricingTables, QuantityTier};
pub use types::*;
