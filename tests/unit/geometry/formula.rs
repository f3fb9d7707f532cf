//! Tests for measurement names and formula strategy evaluation

#[cfg(test)]
mod tests {
    use piecegrid::{GridError, Measurement, Strategy};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Tests measurement names parse case-insensitively and print lowercase
    #[test]
    fn test_measurement_names_round_trip() {
        for measurement in Measurement::ALL {
            let upper = measurement.name().to_uppercase();
            assert!(matches!(upper.parse::<Measurement>(), Ok(m) if m == measurement));
            assert_eq!(measurement.to_string(), measurement.name());
        }
        assert!("depth".parse::<Measurement>().is_err());
    }

    // Tests the simple strategies over ordered inputs
    // Verified by summing instead of multiplying in Product
    #[test]
    fn test_simple_strategies() {
        let m = Measurement::Area;
        assert!(matches!(Strategy::Identity.evaluate(m, &[7]), Ok(v) if close(v, 7.0)));
        assert!(matches!(Strategy::Product.evaluate(m, &[2, 3, 4]), Ok(v) if close(v, 24.0)));
        assert!(matches!(Strategy::Power(3).evaluate(m, &[2]), Ok(v) if close(v, 8.0)));
        assert!(matches!(Strategy::Scaled(0.5).evaluate(m, &[3, 4]), Ok(v) if close(v, 6.0)));
    }

    // Tests regular polygon area against the closed forms for squares and hexagons
    #[test]
    fn test_polygon_area_matches_closed_forms() {
        let square = Strategy::RegularPolygonArea { sides: 4 }.evaluate(Measurement::Area, &[3]);
        assert!(matches!(square, Ok(v) if (v - 9.0).abs() < 1e-6));

        let expected_hexagon = 3.0 * 3.0_f64.sqrt() / 2.0 * 4.0;
        let hexagon = Strategy::RegularPolygonArea { sides: 6 }.evaluate(Measurement::Area, &[2]);
        assert!(matches!(hexagon, Ok(v) if (v - expected_hexagon).abs() < 1e-6));

        let prism = Strategy::PrismVolume { sides: 6 }.evaluate(Measurement::Volume, &[2, 10]);
        assert!(matches!(prism, Ok(v) if (v - expected_hexagon * 10.0).abs() < 1e-6));
    }

    // Tests arity mismatches are reported instead of silently computing
    // Verified by skipping the arity check
    #[test]
    fn test_arity_mismatch_is_invalid_formula() {
        let result = Strategy::Power(2).evaluate(Measurement::Length, &[1, 2]);
        assert!(matches!(
            result,
            Err(GridError::InvalidFormula {
                measurement: Measurement::Length,
                ..
            })
        ));

        assert!(Strategy::Product.evaluate(Measurement::Area, &[]).is_err());
        assert!(
            Strategy::PrismVolume { sides: 6 }
                .evaluate(Measurement::Volume, &[2])
                .is_err()
        );
    }

    // Tests polygons with fewer than three sides are rejected
    #[test]
    fn test_degenerate_polygon_rejected() {
        let result = Strategy::RegularPolygonArea { sides: 2 }.evaluate(Measurement::Area, &[4]);
        assert!(matches!(result, Err(GridError::InvalidFormula { .. })));
    }

    // Tests exponents beyond i32 are rejected instead of wrapping
    // Verified by casting the exponent with `as`
    #[test]
    fn test_oversized_exponent_rejected() {
        let m = Measurement::Volume;
        let largest = u32::try_from(i32::MAX).unwrap_or_default();
        assert!(matches!(Strategy::Power(largest).evaluate(m, &[1]), Ok(v) if close(v, 1.0)));
        assert!(matches!(
            Strategy::Power(largest + 1).evaluate(m, &[2]),
            Err(GridError::InvalidFormula { .. })
        ));
        assert!(Strategy::Power(u32::MAX).evaluate(m, &[2]).is_err());
    }

    #[test]
    fn test_strategy_arity() {
        assert_eq!(Strategy::Identity.arity(), Some(1));
        assert_eq!(Strategy::PrismVolume { sides: 6 }.arity(), Some(2));
        assert_eq!(Strategy::Product.arity(), None);
    }
}
