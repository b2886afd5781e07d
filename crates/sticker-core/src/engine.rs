//! # Pricing Engine
//!
//! Deterministic price computation over a set of [`PricingTables`].
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingConfig { material, shape, size, quantity }                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. base    = base_prices[size]            (smallest size if missing)   │
//! │  2. m, s    = coefficients[material/shape] (×1.0 if missing)            │
//! │  3. priced  = round_half_up(base × m × s)  ◄── first rounding          │
//! │  4. d       = highest tier ≤ quantity      (0 below the ladder)         │
//! │  5. unit    = round_half_up(priced × (1-d)) ◄── second rounding        │
//! │  6. total   = unit × quantity              (exact)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PriceResult (every stage kept)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both rounding steps matter: rounding once at the end gives different
//! prices for some configurations.

use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::error::CoreResult;
use crate::tables::PricingTables;
use crate::types::{Material, PriceResult, PricingConfig, Shape, Size};

/// Prices sticker configurations.
///
/// Cheap to clone and safe to share between threads; the tables are never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    tables: Arc<PricingTables>,
}

impl PricingEngine {
    /// Builds an engine over validated tables.
    pub fn new(tables: PricingTables) -> CoreResult<Self> {
        tables.validate()?;
        Ok(PricingEngine {
            tables: Arc::new(tables),
        })
    }

    /// Process-wide engine over [`PricingTables::standard`].
    pub fn standard() -> &'static PricingEngine {
        static STANDARD: OnceLock<PricingEngine> = OnceLock::new();
        STANDARD.get_or_init(|| PricingEngine {
            tables: Arc::new(PricingTables::standard()),
        })
    }

    pub fn tables(&self) -> &PricingTables {
        &self.tables
    }

    /// Prices one configuration.
    ///
    /// Total over its input: keys missing from the tables price at baseline
    /// rather than failing. Use [`PricingTables::ensure_priced`] first when
    /// that is not wanted.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::{Material, PricingConfig, PricingEngine, Shape, Size};
    ///
    /// let engine = PricingEngine::standard();
    /// let config = PricingConfig::new(Material::HolographicVinyl, Shape::CutContour, Size::S10x10, 250);
    /// let result = engine.calculate_price(&config);
    ///
    /// assert_eq!(result.price_with_coefficients_cents, 858);
    /// assert_eq!(result.discount_percentage, 30);
    /// assert_eq!(result.unit_price_cents, 601);
    /// ```
    pub fn calculate_price(&self, config: &PricingConfig) -> PriceResult {
        let base_price = self.tables.base_price(config.size);
        let material_coefficient = self.tables.material_coefficient(config.material);
        let shape_coefficient = self.tables.shape_coefficient(config.shape);

        let priced = base_price.apply_coefficients(material_coefficient, shape_coefficient);

        let discount = self.tables.discount_for(config.quantity);
        let unit_price = priced.apply_discount(discount);
        let total_price = unit_price.multiply_quantity(config.quantity);

        trace!(
            material = %config.material,
            material_coefficient = material_coefficient.as_f64(),
            shape = %config.shape,
            shape_coefficient = shape_coefficient.as_f64(),
            size = %config.size,
            quantity = config.quantity,
            unit = %unit_price,
            total = %total_price,
            "Priced configuration"
        );

        PriceResult {
            base_price_cents: base_price.cents(),
            material_coefficient,
            shape_coefficient,
            price_with_coefficients_cents: priced.cents(),
            discount,
            discount_percentage: discount.percentage(),
            unit_price_cents: unit_price.cents(),
            total_price_cents: total_price.cents(),
            quantity: config.quantity,
        }
    }

    /// Prices every ladder quantity, ascending.
    pub fn generate_price_matrix(&self, material: Material, shape: Shape, size: Size) -> Vec<PriceResult> {
        self.tables
            .quantity_tiers
            .iter()
            .map(|tier| {
                self.calculate_price(&PricingConfig::new(material, shape, size, tier.min_quantity))
            })
            .collect()
    }

    /// Whether a quantity can be ordered.
    ///
    /// Anything between the smallest and largest ladder value is accepted,
    /// not only the ladder values themselves.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::PricingEngine;
    ///
    /// let engine = PricingEngine::standard();
    /// assert!(engine.is_valid_quantity(5));
    /// assert!(engine.is_valid_quantity(42));
    /// assert!(!engine.is_valid_quantity(1));
    /// assert!(!engine.is_valid_quantity(2000));
    /// ```
    pub fn is_valid_quantity(&self, quantity: i64) -> bool {
        match self.tables.quantity_bounds() {
            Some((min, max)) => quantity >= i64::from(min) && quantity <= i64::from(max),
            None => false,
        }
    }

    /// The quantity ladder, ascending.
    pub fn available_quantities(&self) -> Vec<u32> {
        self.tables.quantities()
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        PricingEngine::standard().clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Coefficient, DiscountRate};

    fn config(material: Material, shape: Shape, size: Size, quantity: u32) -> PricingConfig {
        PricingConfig::new(material, shape, size, quantity)
    }

    #[test]
    fn test_baseline_price() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::Round, Size::S5x5, 5));

        assert_eq!(result.base_price_cents, 450);
        assert_eq!(result.material_coefficient, Coefficient::BASELINE);
        assert_eq!(result.shape_coefficient, Coefficient::BASELINE);
        assert_eq!(result.discount_percentage, 0);
        assert_eq!(result.unit_price_cents, 450);
        assert_eq!(result.total_price_cents, 2250);
        assert_eq!(result.quantity, 5);
    }

    #[test]
    fn test_holographic_material_coefficient() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(Material::HolographicVinyl, Shape::Round, Size::S5x5, 5));

        assert!((result.material_coefficient.as_f64() - 1.2).abs() < 1e-9);
        assert_eq!(result.unit_price_cents, 540);
    }

    #[test]
    fn test_cut_contour_shape_coefficient() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::CutContour, Size::S5x5, 5));

        assert!((result.shape_coefficient.as_f64() - 1.1).abs() < 1e-9);
        assert_eq!(result.unit_price_cents, 495);
    }

    #[test]
    fn test_hundred_unit_discount() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::Round, Size::S5x5, 100));

        assert_eq!(result.discount_percentage, 22);
        assert_eq!(result.unit_price_cents, 351);
        assert_eq!(result.total_price_cents, 35100);
    }

    #[test]
    fn test_all_coefficients_and_discount() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(
            Material::HolographicVinyl,
            Shape::CutContour,
            Size::S10x10,
            250,
        ));

        assert_eq!(result.base_price_cents, 650);
        assert_eq!(result.material_coefficient.bps(), 12_000);
        assert_eq!(result.shape_coefficient.bps(), 11_000);
        assert_eq!(result.price_with_coefficients_cents, 858);
        assert_eq!(result.discount_percentage, 30);
        // 858 × 0.7 = 600.6
        assert_eq!(result.unit_price_cents, 601);
        assert_eq!(result.total_price_cents, 601 * 250);
    }

    #[test]
    fn test_exact_tie_rounds_up() {
        let engine = PricingEngine::standard();
        // 650 × 1.15 = 747.5 exactly
        let result = engine.calculate_price(&config(Material::MirrorVinyl, Shape::Round, Size::S10x10, 5));

        assert_eq!(result.price_with_coefficients_cents, 748);
        assert_eq!(result.unit_price_cents, 748);
    }

    #[test]
    fn test_largest_accepted_tables_do_not_overflow() {
        let mut tables = PricingTables::standard();
        tables
            .base_prices
            .insert(Size::S15x15, Money::from_cents(crate::tables::MAX_UNIT_PRICE_CENTS));
        tables.material_coefficients.clear();
        tables.shape_coefficients.clear();
        let engine = PricingEngine::new(tables).unwrap();

        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::Round, Size::S15x15, u32::MAX));
        assert_eq!(result.unit_price_cents, crate::tables::MAX_UNIT_PRICE_CENTS);
        assert_eq!(
            result.total_price_cents,
            crate::tables::MAX_UNIT_PRICE_CENTS * i64::from(u32::MAX)
        );
    }

    #[test]
    fn test_intermediate_quantity_uses_lower_tier() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::Round, Size::S5x5, 99));
        assert_eq!(result.discount_percentage, 15);
        // 450 × 0.85 = 382.5 → 383
        assert_eq!(result.unit_price_cents, 383);
        assert_eq!(result.total_price_cents, 383 * 99);
    }

    #[test]
    fn test_below_ladder_gets_no_discount() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::Round, Size::S8x8, 1));
        assert_eq!(result.discount, DiscountRate::NONE);
        assert_eq!(result.unit_price_cents, 550);
        assert_eq!(result.total_price_cents, 550);
    }

    #[test]
    fn test_custom_size_prices_as_smallest() {
        let engine = PricingEngine::standard();
        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::Round, Size::Custom, 5));
        assert_eq!(result.base_price_cents, 450);
        assert_eq!(result.unit_price_cents, 450);
    }

    #[test]
    fn test_missing_coefficient_prices_at_baseline() {
        let mut tables = PricingTables::standard();
        tables.material_coefficients.remove(&Material::MirrorVinyl);
        let engine = PricingEngine::new(tables).unwrap();

        let result = engine.calculate_price(&config(Material::MirrorVinyl, Shape::Round, Size::S5x5, 5));
        assert_eq!(result.material_coefficient, Coefficient::BASELINE);
        assert_eq!(result.unit_price_cents, 450);
    }

    #[test]
    fn test_new_rejects_invalid_tables() {
        let mut tables = PricingTables::standard();
        tables.quantity_tiers.reverse();
        assert!(PricingEngine::new(tables).is_err());
    }

    #[test]
    fn test_price_matrix() {
        let engine = PricingEngine::standard();
        let matrix = engine.generate_price_matrix(Material::WhiteVinyl, Shape::Round, Size::S5x5);

        assert_eq!(matrix.len(), 8);
        assert_eq!(matrix[0].quantity, 5);
        assert_eq!(matrix[7].quantity, 1000);

        let units: Vec<i64> = matrix.iter().map(|r| r.unit_price_cents).collect();
        assert_eq!(units, vec![450, 428, 405, 383, 351, 315, 279, 248]);

        for pair in matrix.windows(2) {
            assert!(pair[1].quantity > pair[0].quantity);
            assert!(pair[1].unit_price_cents <= pair[0].unit_price_cents);
        }
    }

    #[test]
    fn test_is_valid_quantity() {
        let engine = PricingEngine::standard();
        for qty in [5, 50, 100, 500, 1000, 7, 999] {
            assert!(engine.is_valid_quantity(qty), "{qty} should be valid");
        }
        for qty in [i64::MIN, -5, 0, 1, 4, 1001, 2000] {
            assert!(!engine.is_valid_quantity(qty), "{qty} should be invalid");
        }
    }

    #[test]
    fn test_available_quantities_is_stable() {
        let engine = PricingEngine::standard();
        let first = engine.available_quantities();
        assert_eq!(first, vec![5, 10, 25, 50, 100, 250, 500, 1000]);
        assert_eq!(engine.available_quantities(), first);
    }

    #[test]
    fn test_alternate_tables() {
        let mut tables = PricingTables::standard();
        tables.base_prices.insert(Size::S5x5, Money::from_cents(500));
        tables.quantity_tiers.truncate(3);
        let engine = PricingEngine::new(tables).unwrap();

        assert_eq!(engine.available_quantities(), vec![5, 10, 25]);
        assert!(!engine.is_valid_quantity(26));
        let result = engine.calculate_price(&config(Material::WhiteVinyl, Shape::Round, Size::S5x5, 500));
        assert_eq!(result.discount_percentage, 10);
        assert_eq!(result.unit_price_cents, 450);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PricingEngine>();
    }
}
