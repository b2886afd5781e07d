//! # Pricing Tables
//!
//! The static configuration the engine prices against.
//!
//! ## Standard Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Base price (cents)      Material            Shape                      │
//! │  ─────────────────       ────────────────    ──────────────────         │
//! │  5x5    450              white        ×1.00  round         ×1.00        │
//! │  8x8    550              transparent  ×1.08  square        ×1.00        │
//! │  10x10  650              holographic  ×1.20  rectangle     ×1.00        │
//! │  15x15  900              mirror       ×1.15  cut-contour   ×1.10        │
//! │                                                                         │
//! │  Quantity ladder                                                        │
//! │  ───────────────────────────────────────────────────────────────        │
//! │  qty  ≥5   ≥10   ≥25   ≥50   ≥100   ≥250   ≥500   ≥1000                 │
//! │  off  0%   5%    10%   15%   22%    30%    38%    45%                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are immutable once built. Alternate tables (a seasonal price list,
//! a test fixture) are loaded with [`PricingTables::from_json`] and go
//! through the same [`PricingTables::validate`] as the standard set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Coefficient, DiscountRate, Material, Shape, Size, BPS_SCALE};

/// Largest unit price whose total still fits in `i64` for any `u32` quantity.
pub const MAX_UNIT_PRICE_CENTS: i64 = i64::MAX / u32::MAX as i64;

// =============================================================================
// Quantity Tier
// =============================================================================

/// One rung of the discount ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityTier {
    /// Smallest quantity the discount applies to (inclusive).
    pub min_quantity: u32,

    #[serde(rename = "discount_bps")]
    pub discount: DiscountRate,
}

impl QuantityTier {
    pub const fn new(min_quantity: u32, discount: DiscountRate) -> Self {
        QuantityTier {
            min_quantity,
            discount,
        }
    }
}

// =============================================================================
// Pricing Tables
// =============================================================================

/// Base prices, coefficients and the discount ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTables {
    /// Base unit price per size.
    pub base_prices: BTreeMap<Size, Money>,

    pub material_coefficients: BTreeMap<Material, Coefficient>,

    pub shape_coefficients: BTreeMap<Shape, Coefficient>,

    /// Discount ladder, ascending by `min_quantity`.
    pub quantity_tiers: Vec<QuantityTier>,
}

impl PricingTables {
    /// The shop's current price list.
    pub fn standard() -> Self {
        let base_prices = BTreeMap::from([
            (Size::S5x5, Money::from_cents(450)),
            (Size::S8x8, Money::from_cents(550)),
            (Size::S10x10, Money::from_cents(650)),
            (Size::S15x15, Money::from_cents(900)),
        ]);

        let material_coefficients = BTreeMap::from([
            (Material::WhiteVinyl, Coefficient::BASELINE),
            (Material::TransparentVinyl, Coefficient::from_bps(10_800)),
            (Material::HolographicVinyl, Coefficient::from_bps(12_000)),
            (Material::MirrorVinyl, Coefficient::from_bps(11_500)),
        ]);

        let shape_coefficients = BTreeMap::from([
            (Shape::Round, Coefficient::BASELINE),
            (Shape::Square, Coefficient::BASELINE),
            (Shape::Rectangle, Coefficient::BASELINE),
            (Shape::CutContour, Coefficient::from_bps(11_000)),
        ]);

        let quantity_tiers = [
            (5, 0),
            (10, 5),
            (25, 10),
            (50, 15),
            (100, 22),
            (250, 30),
            (500, 38),
            (1000, 45),
        ]
        .into_iter()
        .map(|(qty, pct)| QuantityTier::new(qty, DiscountRate::from_percent(pct)))
        .collect();

        PricingTables {
            base_prices,
            material_coefficients,
            shape_coefficients,
            quantity_tiers,
        }
    }

    /// Parses and validates tables from JSON.
    ///
    /// ## Format
    /// ```json
    /// {
    ///   "base_prices": { "5x5": 450, "10x10": 650 },
    ///   "material_coefficients": { "white-vinyl": 10000 },
    ///   "shape_coefficients": { "round": 10000 },
    ///   "quantity_tiers": [
    ///     { "min_quantity": 5, "discount_bps": 0 },
    ///     { "min_quantity": 100, "discount_bps": 2000 }
    ///   ]
    /// }
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let tables: PricingTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Checks the invariants the engine relies on.
    ///
    /// ## Rules
    /// - At least one base price, every base price positive
    /// - Every coefficient non-zero
    /// - The dearest configuration stays at or below [`MAX_UNIT_PRICE_CENTS`]
    /// - Ladder non-empty, thresholds positive and strictly ascending
    /// - First tier has no discount
    /// - Discounts never decrease and stay below 100%
    ///
    /// Non-decreasing discounts are what keep the unit price non-increasing
    /// across the price matrix.
    pub fn validate(&self) -> CoreResult<()> {
        if self.base_prices.is_empty() {
            return Err(CoreError::invalid_tables("base prices are empty"));
        }
        if let Some((size, _)) = self.base_prices.iter().find(|(_, p)| !p.is_positive()) {
            return Err(CoreError::invalid_tables(format!(
                "base price for {size} must be positive"
            )));
        }
        if let Some((material, _)) = self.material_coefficients.iter().find(|(_, c)| c.bps() == 0) {
            return Err(CoreError::invalid_tables(format!(
                "coefficient for {material} must be positive"
            )));
        }
        if let Some((shape, _)) = self.shape_coefficients.iter().find(|(_, c)| c.bps() == 0) {
            return Err(CoreError::invalid_tables(format!(
                "coefficient for {shape} must be positive"
            )));
        }

        let dearest = self.dearest_unit_price();
        if dearest.cents() > MAX_UNIT_PRICE_CENTS {
            return Err(CoreError::invalid_tables(format!(
                "dearest unit price {} exceeds the {} cent limit",
                dearest.cents(),
                MAX_UNIT_PRICE_CENTS
            )));
        }

        let first = self
            .quantity_tiers
            .first()
            .ok_or_else(|| CoreError::invalid_tables("quantity tiers are empty"))?;
        if first.min_quantity == 0 {
            return Err(CoreError::invalid_tables("smallest tier must start above zero"));
        }
        if first.discount != DiscountRate::NONE {
            return Err(CoreError::invalid_tables("smallest tier must have no discount"));
        }

        for pair in self.quantity_tiers.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if upper.min_quantity <= lower.min_quantity {
                return Err(CoreError::invalid_tables(format!(
                    "tier {} listed after tier {}; thresholds must ascend",
                    upper.min_quantity, lower.min_quantity
                )));
            }
            if upper.discount < lower.discount {
                return Err(CoreError::invalid_tables(format!(
                    "discount drops at tier {}",
                    upper.min_quantity
                )));
            }
        }

        if let Some(tier) = self
            .quantity_tiers
            .iter()
            .find(|t| t.discount.bps() >= BPS_SCALE)
        {
            return Err(CoreError::invalid_tables(format!(
                "discount at tier {} must be below 100%",
                tier.min_quantity
            )));
        }

        Ok(())
    }

    /// Undiscounted unit price of the most expensive configuration.
    ///
    /// Baseline counts as a candidate, since missing keys price at ×1.0.
    fn dearest_unit_price(&self) -> Money {
        let base = self.base_prices.values().copied().max().unwrap_or_default();
        let material = self
            .material_coefficients
            .values()
            .copied()
            .fold(Coefficient::BASELINE, Coefficient::max);
        let shape = self
            .shape_coefficients
            .values()
            .copied()
            .fold(Coefficient::BASELINE, Coefficient::max);
        base.apply_coefficients(material, shape)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Base unit price for a size.
    ///
    /// Sizes without an entry price at the smallest defined size.
    pub fn base_price(&self, size: Size) -> Money {
        if let Some(price) = self.base_prices.get(&size) {
            return *price;
        }
        let fallback = self.smallest_base_price().unwrap_or_default();
        debug!(size = %size, fallback_cents = fallback.cents(), "No base price for size, using smallest size");
        fallback
    }

    /// Base price of the smallest size in the table.
    pub fn smallest_base_price(&self) -> Option<Money> {
        self.base_prices.values().next().copied()
    }

    /// Material multiplier, ×1.0 when missing.
    pub fn material_coefficient(&self, material: Material) -> Coefficient {
        self.material_coefficients.get(&material).copied().unwrap_or_else(|| {
            debug!(material = %material, "No coefficient for material, using baseline");
            Coefficient::BASELINE
        })
    }

    /// Shape multiplier, ×1.0 when missing.
    pub fn shape_coefficient(&self, shape: Shape) -> Coefficient {
        self.shape_coefficients.get(&shape).copied().unwrap_or_else(|| {
            debug!(shape = %shape, "No coefficient for shape, using baseline");
            Coefficient::BASELINE
        })
    }

    /// Discount of the highest tier whose threshold is `<= quantity`.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::tables::PricingTables;
    ///
    /// let tables = PricingTables::standard();
    /// assert_eq!(tables.discount_for(4).percentage(), 0);
    /// assert_eq!(tables.discount_for(100).percentage(), 22);
    /// assert_eq!(tables.discount_for(249).percentage(), 22);
    /// assert_eq!(tables.discount_for(5000).percentage(), 45);
    /// ```
    pub fn discount_for(&self, quantity: u32) -> DiscountRate {
        self.quantity_tiers
            .iter()
            .rev()
            .find(|tier| tier.min_quantity <= quantity)
            .map(|tier| tier.discount)
            .unwrap_or(DiscountRate::NONE)
    }

    /// Ladder thresholds, ascending.
    pub fn quantities(&self) -> Vec<u32> {
        self.quantity_tiers.iter().map(|t| t.min_quantity).collect()
    }

    /// Smallest and largest ladder thresholds.
    pub fn quantity_bounds(&self) -> Option<(u32, u32)> {
        let first = self.quantity_tiers.first()?;
        let last = self.quantity_tiers.last()?;
        Some((first.min_quantity, last.min_quantity))
    }

    /// Strict coverage check: every key has an explicit entry.
    pub fn ensure_priced(&self, material: Material, shape: Shape, size: Size) -> CoreResult<()> {
        if !self.base_prices.contains_key(&size) {
            return Err(unknown_key("size", size.as_str()));
        }
        if !self.material_coefficients.contains_key(&material) {
            return Err(unknown_key("material", material.as_str()));
        }
        if !self.shape_coefficients.contains_key(&shape) {
            return Err(unknown_key("shape", shape.as_str()));
        }
        Ok(())
    }
}

impl Default for PricingTables {
    fn default() -> Self {
        PricingTables::standard()
    }
}

fn unknown_key(kind: &str, key: &str) -> CoreError {
    CoreError::UnknownCoefficientKey {
        kind: kind.to_string(),
        key: key.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_are_valid() {
        let tables = PricingTables::standard();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.quantities(), vec![5, 10, 25, 50, 100, 250, 500, 1000]);
        assert_eq!(tables.quantity_bounds(), Some((5, 1000)));
    }

    #[test]
    fn test_discount_for_tier_boundaries() {
        let tables = PricingTables::standard();
        assert_eq!(tables.discount_for(0), DiscountRate::NONE);
        assert_eq!(tables.discount_for(5), DiscountRate::NONE);
        assert_eq!(tables.discount_for(9), DiscountRate::NONE);
        assert_eq!(tables.discount_for(10).percentage(), 5);
        assert_eq!(tables.discount_for(99).percentage(), 15);
        assert_eq!(tables.discount_for(250).percentage(), 30);
        assert_eq!(tables.discount_for(1000).percentage(), 45);
    }

    #[test]
    fn test_base_price_falls_back_to_smallest_size() {
        let tables = PricingTables::standard();
        assert_eq!(tables.base_price(Size::S10x10).cents(), 650);
        assert_eq!(tables.base_price(Size::Custom).cents(), 450);

        let mut tables = PricingTables::standard();
        tables.base_prices.remove(&Size::S5x5);
        assert_eq!(tables.base_price(Size::Custom).cents(), 550);
    }

    #[test]
    fn test_missing_coefficients_fall_back_to_baseline() {
        let mut tables = PricingTables::standard();
        tables.material_coefficients.remove(&Material::MirrorVinyl);
        tables.shape_coefficients.clear();
        assert_eq!(tables.material_coefficient(Material::MirrorVinyl), Coefficient::BASELINE);
        assert_eq!(tables.shape_coefficient(Shape::CutContour), Coefficient::BASELINE);
        assert_eq!(tables.material_coefficient(Material::HolographicVinyl).bps(), 12_000);
    }

    #[test]
    fn test_ensure_priced() {
        let tables = PricingTables::standard();
        assert!(tables
            .ensure_priced(Material::MirrorVinyl, Shape::CutContour, Size::S15x15)
            .is_ok());

        let err = tables
            .ensure_priced(Material::WhiteVinyl, Shape::Round, Size::Custom)
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownCoefficientKey { ref kind, .. } if kind == "size"));

        let mut tables = PricingTables::standard();
        tables.material_coefficients.remove(&Material::MirrorVinyl);
        let err = tables
            .ensure_priced(Material::MirrorVinyl, Shape::Round, Size::S5x5)
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownCoefficientKey { ref key, .. } if key == "mirror-vinyl"));
    }

    #[test]
    fn test_validate_rejects_broken_ladders() {
        let mut tables = PricingTables::standard();
        tables.quantity_tiers.clear();
        assert!(matches!(tables.validate(), Err(CoreError::InvalidTables { .. })));

        let mut tables = PricingTables::standard();
        tables.quantity_tiers.swap(2, 3);
        assert!(tables.validate().is_err());

        let mut tables = PricingTables::standard();
        tables.quantity_tiers[0].discount = DiscountRate::from_percent(5);
        assert!(tables.validate().is_err());

        let mut tables = PricingTables::standard();
        tables.quantity_tiers[5].discount = DiscountRate::from_percent(10);
        assert!(tables.validate().is_err());

        let mut tables = PricingTables::standard();
        tables.quantity_tiers[7].discount = DiscountRate::from_percent(100);
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_prices() {
        let mut tables = PricingTables::standard();
        tables.base_prices.clear();
        assert!(tables.validate().is_err());

        let mut tables = PricingTables::standard();
        tables.base_prices.insert(Size::S8x8, Money::zero());
        assert!(tables.validate().is_err());

        let mut tables = PricingTables::standard();
        tables
            .shape_coefficients
            .insert(Shape::Square, Coefficient::from_bps(0));
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "base_prices": { "5x5": 500, "10x10": 700 },
            "material_coefficients": { "white-vinyl": 10000, "holographic-vinyl": 13000 },
            "shape_coefficients": { "round": 10000 },
            "quantity_tiers": [
                { "min_quantity": 10, "discount_bps": 0 },
                { "min_quantity": 100, "discount_bps": 1250 }
            ]
        }"#;
        let tables = PricingTables::from_json(json).unwrap();
        assert_eq!(tables.base_price(Size::S10x10).cents(), 700);
        assert_eq!(tables.base_price(Size::S15x15).cents(), 500);
        assert_eq!(tables.discount_for(150).bps(), 1250);
        assert_eq!(tables.quantities(), vec![10, 100]);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            PricingTables::from_json("{ not json"),
            Err(CoreError::TablesFormat(_))
        ));

        let json = r#"{
            "base_prices": { "5x5": 500 },
            "material_coefficients": {},
            "shape_coefficients": {},
            "quantity_tiers": []
        }"#;
        assert!(matches!(
            PricingTables::from_json(json),
            Err(CoreError::InvalidTables { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_prices_that_overflow_totals() {
        let json = r#"{
            "base_prices": { "5x5": 100000000000000000 },
            "material_coefficients": { "white-vinyl": 10000 },
            "shape_coefficients": { "round": 10000 },
            "quantity_tiers": [{ "min_quantity": 5, "discount_bps": 0 }]
        }"#;
        assert!(matches!(
            PricingTables::from_json(json),
            Err(CoreError::InvalidTables { .. })
        ));

        let json = r#"{
            "base_prices": { "5x5": 5000000000000000000 },
            "material_coefficients": { "white-vinyl": 20000 },
            "shape_coefficients": { "round": 10000 },
            "quantity_tiers": [{ "min_quantity": 5, "discount_bps": 0 }]
        }"#;
        assert!(matches!(
            PricingTables::from_json(json),
            Err(CoreError::InvalidTables { .. })
        ));
    }

    #[test]
    fn test_unit_price_limit_counts_coefficients() {
        let mut tables = PricingTables::standard();
        tables.base_prices.insert(Size::S15x15, Money::from_cents(MAX_UNIT_PRICE_CENTS));
        tables.material_coefficients.clear();
        tables.shape_coefficients.clear();
        assert!(tables.validate().is_ok());

        tables
            .shape_coefficients
            .insert(Shape::CutContour, Coefficient::from_bps(11_000));
        assert!(matches!(tables.validate(), Err(CoreError::InvalidTables { .. })));
    }

    #[test]
    fn test_standard_tables_round_trip_json() {
        let tables = PricingTables::standard();
        let json = serde_json::to_string(&tables).unwrap();
        assert_eq!(PricingTables::from_json(&json).unwrap(), tables);
    }
}
