//! Tests for error message formatting and source chaining

#[cfg(test)]
mod tests {
    use std::error::Error;

    use piecegrid::io::error::{invalid_argument, invalid_snapshot};
    use piecegrid::{GridError, Location, Measurement, Scope};

    // Tests OutOfRange names both the location and the scope
    // Verified by omitting the scope from the message
    #[test]
    fn test_out_of_range_message() {
        let Ok(scope) = Scope::new(3, 3, 1) else {
            unreachable!("valid scope rejected");
        };
        let error = GridError::OutOfRange {
            location: Location::new(4, 1, 1),
            scope,
        };
        let message = error.to_string();
        assert!(message.contains("(4, 1, 1)"));
        assert!(message.contains("3x3x1"));
    }

    // Tests the two formula failures read differently
    #[test]
    fn test_formula_messages_are_distinct() {
        let undefined = GridError::FormulaUndefined {
            measurement: Measurement::Volume,
        };
        let missing = GridError::MissingMeasurement {
            measurement: Measurement::Volume,
            required: vec!["length".to_string(), "height".to_string()],
            available: vec!["length".to_string()],
        };
        assert!(undefined.to_string().contains("No formula to calculate volume"));
        assert!(missing.to_string().contains("requires [length, height]"));
        assert!(missing.to_string().contains("currently set [length]"));
    }

    // Tests invalid argument helpers carry every field
    #[test]
    fn test_invalid_argument_helper() {
        let message = invalid_argument("place", &"A@x", &"expected NAME@X,Y[,Z]").to_string();
        assert!(message.contains("place"));
        assert!(message.contains("A@x"));
        assert!(message.contains("expected NAME@X,Y[,Z]"));
        assert!(invalid_snapshot(&"bad slot").to_string().contains("bad slot"));
        assert!(GridError::HandlesExhausted.to_string().contains("handles"));
    }

    // Tests serialization errors keep their source
    #[test]
    fn test_serialization_source_chain() {
        let parse = serde_json::from_str::<u8>("not json");
        let Err(source) = parse else {
            unreachable!("invalid JSON parsed");
        };
        let error = GridError::from(source);
        assert!(error.source().is_some());
        assert!(GridError::EmptyMeasurements.source().is_none());
    }
}
