use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

use crate::config::{MAX_DISCOUNT_PERCENTAGE, MIN_DISCOUNT_PERCENTAGE};

/// Errors from price computations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Discount percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(u32),
}

/// Service for discount math on item prices
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// Calculate the discount percentage implied by an original/discounted
    /// price pair.
    ///
    /// Rounds half-up to a whole percent. Returns 0 when `original <= 0`
    /// (guards divide-by-zero) or when the pair implies a negative discount;
    /// this function never fails.
    pub fn discount_percentage(original: Decimal, discounted: Decimal) -> u32 {
        if original <= Decimal::ZERO {
            return 0;
        }

        let percentage = (original - discounted) / original * Decimal::from(100);
        percentage
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }

    /// Calculate a discounted price from an original price and a percentage
    /// off.
    ///
    /// # Errors
    /// `PricingError::InvalidPercentage` when `percentage` is above 100.
    pub fn discounted_price(original: Decimal, percentage: u32) -> Result<Decimal, PricingError> {
        if percentage > 100 {
            return Err(PricingError::InvalidPercentage(percentage));
        }

        Ok(original * (Decimal::from(100 - percentage) / Decimal::from(100)))
    }

    /// Calculate the total price of an order line.
    pub fn order_total(unit_price: Decimal, quantity: i32) -> Decimal {
        unit_price * Decimal::from(quantity)
    }
}

/// Schema-boundary check for an item's price pair: the discount price must be
/// strictly below the original, and the implied percentage must sit inside
/// the configured band.
pub fn validate_discount(original: Decimal, discounted: Decimal) -> Result<(), ValidationError> {
    if discounted >= original {
        let mut err = ValidationError::new("discount_not_below_original");
        err.message = Some("discount_price must be strictly less than original_price".into());
        return Err(err);
    }

    let percentage = DiscountCalculator::discount_percentage(original, discounted);
    if percentage < MIN_DISCOUNT_PERCENTAGE || percentage > MAX_DISCOUNT_PERCENTAGE {
        let mut err = ValidationError::new("discount_out_of_band");
        err.message = Some(
            format!(
                "discount_price implies {}% off; discount must be between {}% and {}%",
                percentage, MIN_DISCOUNT_PERCENTAGE, MAX_DISCOUNT_PERCENTAGE
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discount_percentage_basic() {
        assert_eq!(
            DiscountCalculator::discount_percentage(dec!(100.00), dec!(70.00)),
            30
        );
        assert_eq!(
            DiscountCalculator::discount_percentage(dec!(40.00), dec!(10.00)),
            75
        );
    }

    #[test]
    fn test_discount_percentage_rounds_half_up() {
        // (30 - 19.95) / 30 = 33.5% -> 34
        assert_eq!(
            DiscountCalculator::discount_percentage(dec!(30.00), dec!(19.95)),
            34
        );
    }

    #[test]
    fn test_discount_percentage_zero_original_is_zero() {
        assert_eq!(DiscountCalculator::discount_percentage(dec!(0), dec!(5)), 0);
        assert_eq!(
            DiscountCalculator::discount_percentage(dec!(-1), dec!(5)),
            0
        );
    }

    #[test]
    fn test_discount_percentage_negative_discount_is_zero() {
        // Discounted above original would imply a negative percentage
        assert_eq!(
            DiscountCalculator::discount_percentage(dec!(10), dec!(15)),
            0
        );
    }

    #[test]
    fn test_discounted_price_basic() {
        assert_eq!(
            DiscountCalculator::discounted_price(dec!(100.00), 30).unwrap(),
            dec!(70.00)
        );
        assert_eq!(
            DiscountCalculator::discounted_price(dec!(50.00), 0).unwrap(),
            dec!(50.00)
        );
        assert_eq!(
            DiscountCalculator::discounted_price(dec!(50.00), 100).unwrap(),
            dec!(0.00)
        );
    }

    #[test]
    fn test_discounted_price_rejects_out_of_range_percentage() {
        assert_eq!(
            DiscountCalculator::discounted_price(dec!(100.00), 101),
            Err(PricingError::InvalidPercentage(101))
        );
    }

    #[test]
    fn test_order_total() {
        assert_eq!(DiscountCalculator::order_total(dec!(12.50), 3), dec!(37.50));
        assert_eq!(DiscountCalculator::order_total(dec!(9.90), 1), dec!(9.90));
    }

    #[test]
    fn test_validate_discount_within_band() {
        assert!(validate_discount(dec!(100.00), dec!(50.00)).is_ok());
        assert!(validate_discount(dec!(100.00), dec!(90.00)).is_ok()); // 10%
        assert!(validate_discount(dec!(100.00), dec!(10.00)).is_ok()); // 90%
    }

    #[test]
    fn test_validate_discount_rejects_price_not_below_original() {
        let err = validate_discount(dec!(50.00), dec!(50.00)).unwrap_err();
        assert_eq!(err.code, "discount_not_below_original");
        assert!(validate_discount(dec!(50.00), dec!(60.00)).is_err());
    }

    #[test]
    fn test_validate_discount_rejects_out_of_band() {
        // 5% off is below the minimum band
        let err = validate_discount(dec!(100.00), dec!(95.00)).unwrap_err();
        assert_eq!(err.code, "discount_out_of_band");
        // 95% off is above the maximum band
        assert!(validate_discount(dec!(100.00), dec!(5.00)).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    /// Recovering the discounted price from the computed percentage lands
    /// within rounding tolerance of the input: the percentage is rounded to
    /// a whole percent, so the recovered price may drift by at most half a
    /// percent of the original.
    #[test]
    fn prop_percentage_price_round_trip() {
        proptest!(|(
            original_cents in 100u32..=1_000_000,
            discounted_fraction in 1u32..=99
        )| {
            let original = Decimal::from(original_cents) / Decimal::from(100);
            let discounted = original * Decimal::from(discounted_fraction) / Decimal::from(100);

            let pct = DiscountCalculator::discount_percentage(original, discounted);
            let recovered = DiscountCalculator::discounted_price(original, pct).unwrap();

            let tolerance = original * dec!(0.005);
            let delta = (recovered - discounted).abs();
            prop_assert!(
                delta <= tolerance,
                "round trip drifted by {} (tolerance {})",
                delta,
                tolerance
            );
        });
    }

    /// The computed percentage is always within 0..=100 for positive pairs
    /// with discounted below original.
    #[test]
    fn prop_percentage_is_bounded() {
        proptest!(|(
            original_cents in 1u32..=1_000_000,
            discounted_cents in 0u32..=1_000_000
        )| {
            let original = Decimal::from(original_cents) / Decimal::from(100);
            let discounted = Decimal::from(discounted_cents.min(original_cents)) / Decimal::from(100);

            let pct = DiscountCalculator::discount_percentage(original, discounted);
            prop_assert!(pct <= 100, "percentage {} out of range", pct);
        });
    }

    /// Order totals scale linearly with quantity.
    #[test]
    fn prop_order_total_is_linear() {
        proptest!(|(
            price_cents in 1u32..=100_000,
            quantity in 1i32..=50
        )| {
            let unit = Decimal::from(price_cents) / Decimal::from(100);
            let total = DiscountCalculator::order_total(unit, quantity);
            prop_assert_eq!(total, unit * Decimal::from(quantity));
            prop_assert!(total >= unit);
        });
    }
}
