//! Item placement parsing.
//!
//! The model reports which exam questions belong to a topic as a
//! comma-separated string such as `"1, 5, 10"`.

use crate::domain::foundation::ValidationError;

const FIELD: &str = "itemPlacement";

/// Parses an item placement string into question numbers, in listed order.
///
/// Whitespace around entries is ignored and an empty (or all-blank) string
/// yields no numbers. Question numbers are 1-based, so `0` is rejected, as is
/// any entry that is not a plain unsigned integer.
pub fn parse_item_placement(raw: &str) -> Result<Vec<u32>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(ValidationError::invalid_format(FIELD, "empty entry between commas"));
            }
            let number: u32 = entry.parse().map_err(|_| {
                ValidationError::invalid_format(FIELD, format!("'{}' is not a question number", entry))
            })?;
            if number == 0 {
                return Err(ValidationError::out_of_range(FIELD, 1, i64::from(u32::MAX), 0));
            }
            Ok(number)
        })
        .collect()
}

/// Formats question numbers back into the canonical `"1, 5, 10"` form.
pub fn format_item_placement(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_spaced_list() {
        assert_eq!(parse_item_placement("1, 5, 10").unwrap(), vec![1, 5, 10]);
    }

    #[test]
    fn parses_single_number() {
        assert_eq!(parse_item_placement("6").unwrap(), vec![6]);
    }

    #[test]
    fn keeps_listed_order() {
        assert_eq!(parse_item_placement("7,2 ,3").unwrap(), vec![7, 2, 3]);
    }

    #[test]
    fn blank_is_empty() {
        assert!(parse_item_placement("").unwrap().is_empty());
        assert!(parse_item_placement("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_zero() {
        assert!(matches!(
            parse_item_placement("0, 1"),
            Err(ValidationError::OutOfRange { actual: 0, .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_entries() {
        assert!(matches!(
            parse_item_placement("1, two"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_item_placement("1-3").is_err());
    }

    #[test]
    fn rejects_dangling_comma() {
        assert!(parse_item_placement("1, 2,").is_err());
    }

    #[test]
    fn formats_canonically() {
        assert_eq!(format_item_placement(&[1, 5, 10]), "1, 5, 10");
        assert_eq!(format_item_placement(&[]), "");
    }

    proptest! {
        #[test]
        fn canonical_form_parses_back(numbers in proptest::collection::vec(1u32..500, 0..40)) {
            let text = format_item_placement(&numbers);
            prop_assert_eq!(parse_item_placement(&text).unwrap(), numbers);
        }
    }
}
