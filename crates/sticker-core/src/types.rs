//! # Domain Types
//!
//! Value types for sticker pricing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Material     │   │     Shape       │   │      Size       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  white-vinyl    │   │  round          │   │  5x5 ... 15x15  │       │
//! │  │  transparent    │   │  square         │   │  custom         │       │
//! │  │  holographic    │   │  rectangle      │   │                 │       │
//! │  │  mirror         │   │  cut-contour    │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  Coefficient    │   │  DiscountRate   │    10_000 bps = 1.0         │
//! │  │  bps (u32)      │   │  bps (u32)      │                             │
//! │  │  12_000 = ×1.2  │   │  2_200 = 22%    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  PricingConfig ──► PricingEngine ──► PriceResult                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Basis points in one whole unit.
pub const BPS_SCALE: u32 = 10_000;

// =============================================================================
// Coefficient
// =============================================================================

/// Multiplicative price adjustment in basis points.
///
/// ## Why Basis Points?
/// 1.08 cannot be represented exactly as a float. 10_800 bps can, which keeps
/// `base × material × shape` exact until the single rounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Coefficient(u32);

impl Coefficient {
    /// ×1.0, the value used when a table has no entry.
    pub const BASELINE: Coefficient = Coefficient(BPS_SCALE);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Coefficient(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the multiplier as a float (for display only).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / BPS_SCALE as f64
    }
}

impl Default for Coefficient {
    fn default() -> Self {
        Coefficient::BASELINE
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Fraction taken off a unit price, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    pub const NONE: DiscountRate = DiscountRate(0);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountRate(percent * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Whole percentage points (0-100), truncating sub-percent rates.
    #[inline]
    pub const fn percentage(&self) -> u32 {
        self.0 / 100
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::NONE
    }
}

// =============================================================================
// Closed Sets
// =============================================================================

/// Vinyl the sticker is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Material {
    /// Baseline material.
    #[serde(alias = "vinyle-blanc")]
    WhiteVinyl,
    #[serde(alias = "vinyle-transparent")]
    TransparentVinyl,
    #[serde(alias = "vinyle-holographique")]
    HolographicVinyl,
    #[serde(alias = "vinyle-miroir")]
    MirrorVinyl,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::WhiteVinyl,
        Material::TransparentVinyl,
        Material::HolographicVinyl,
        Material::MirrorVinyl,
    ];

    /// Wire name, as used in query strings and table files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Material::WhiteVinyl => "white-vinyl",
            Material::TransparentVinyl => "transparent-vinyl",
            Material::HolographicVinyl => "holographic-vinyl",
            Material::MirrorVinyl => "mirror-vinyl",
        }
    }

    /// Name used by storefront clients that predate the English vocabulary.
    pub const fn legacy_name(&self) -> Option<&'static str> {
        match self {
            Material::WhiteVinyl => Some("vinyle-blanc"),
            Material::TransparentVinyl => Some("vinyle-transparent"),
            Material::HolographicVinyl => Some("vinyle-holographique"),
            Material::MirrorVinyl => Some("vinyle-miroir"),
        }
    }
}

/// Cut applied to the sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Shape {
    /// Baseline shape.
    #[serde(alias = "rond")]
    Round,
    #[serde(alias = "carre")]
    Square,
    Rectangle,
    /// Die cut following the artwork outline.
    CutContour,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Round, Shape::Square, Shape::Rectangle, Shape::CutContour];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Shape::Round => "round",
            Shape::Square => "square",
            Shape::Rectangle => "rectangle",
            Shape::CutContour => "cut-contour",
        }
    }

    pub const fn legacy_name(&self) -> Option<&'static str> {
        match self {
            Shape::Round => Some("rond"),
            Shape::Square => Some("carre"),
            Shape::Rectangle | Shape::CutContour => None,
        }
    }
}

/// Physical size of the sticker, in centimetres.
///
/// Variants are declared smallest first; the derived `Ord` is what the
/// tables use to find the smallest priced size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Size {
    #[serde(rename = "5x5")]
    S5x5,
    #[serde(rename = "8x8")]
    S8x8,
    #[serde(rename = "10x10")]
    S10x10,
    #[serde(rename = "15x15")]
    S15x15,
    /// Free-form dimensions. Not orderable through the storefront yet.
    #[serde(rename = "custom")]
    Custom,
}

impl Size {
    pub const ALL: [Size; 5] = [Size::S5x5, Size::S8x8, Size::S10x10, Size::S15x15, Size::Custom];

    /// Sizes a customer can order.
    pub const ORDERABLE: [Size; 4] = [Size::S5x5, Size::S8x8, Size::S10x10, Size::S15x15];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Size::S5x5 => "5x5",
            Size::S8x8 => "8x8",
            Size::S10x10 => "10x10",
            Size::S15x15 => "15x15",
            Size::Custom => "custom",
        }
    }

    pub fn is_orderable(&self) -> bool {
        Size::ORDERABLE.contains(self)
    }

    /// Size names never changed.
    pub const fn legacy_name(&self) -> Option<&'static str> {
        None
    }
}

macro_rules! wire_enum {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ValidationError::Required {
                        field: $field.to_string(),
                    });
                }
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s || v.legacy_name() == Some(s))
                    .ok_or_else(|| ValidationError::NotAllowed {
                        field: $field.to_string(),
                        allowed: <$ty>::ALL.iter().map(|v| v.as_str().to_string()).collect(),
                    })
            }
        }
    };
}

wire_enum!(Material, "material");
wire_enum!(Shape, "shape");
wire_enum!(Size, "size");

// =============================================================================
// Pricing Config
// =============================================================================

/// One sticker configuration to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingConfig {
    pub material: Material,
    pub shape: Shape,
    pub size: Size,
    pub quantity: u32,
}

impl PricingConfig {
    pub fn new(material: Material, shape: Shape, size: Size, quantity: u32) -> Self {
        PricingConfig {
            material,
            shape,
            size,
            quantity,
        }
    }
}

// =============================================================================
// Price Result
// =============================================================================

/// Outcome of pricing one configuration.
///
/// Every intermediate stage is kept so each rounding step can be checked on
/// its own. Multipliers serialize as basis points; no floats on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceResult {
    /// Per-unit price for the size, before coefficients.
    #[ts(type = "number")]
    pub base_price_cents: i64,

    #[serde(rename = "material_coefficient_bps")]
    pub material_coefficient: Coefficient,

    #[serde(rename = "shape_coefficient_bps")]
    pub shape_coefficient: Coefficient,

    /// `base × material × shape`, rounded half up.
    #[ts(type = "number")]
    pub price_with_coefficients_cents: i64,

    /// Exact discount of the selected tier.
    #[serde(rename = "discount_bps")]
    pub discount: DiscountRate,

    /// Same discount as 0-100.
    pub discount_percentage: u32,

    /// Final per-unit price after discount, rounded half up.
    #[ts(type = "number")]
    pub unit_price_cents: i64,

    /// `unit_price_cents × quantity`, exact.
    #[ts(type = "number")]
    pub total_price_cents: i64,

    pub quantity: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================
