use once_cell::sync::Lazy;
use regex::Regex;

/// Order identifiers are three hyphen-separated numeric groups of 3, 7 and
/// 7 digits.
static ORDER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{7}-\d{7}$").expect("order id pattern compiles"));

const MIN_CONDITION_CODE: i32 = 0;
const MAX_CONDITION_CODE: i32 = 6;

/// Indicates whether the given string is a well-formed order id.
pub fn is_valid_order_id(order_id: &str) -> bool {
    ORDER_ID_PATTERN.is_match(order_id)
}

/// Indicates whether the given numeric condition code is in range.
pub fn is_valid_condition(condition_code: i32) -> bool {
    (MIN_CONDITION_CODE..=MAX_CONDITION_CODE).contains(&condition_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_order_ids() {
        assert!(is_valid_order_id("900-3746401-0000001"));
        assert!(is_valid_order_id("111-1234567-7654321"));
    }

    #[test]
    fn test_malformed_order_ids() {
        assert!(!is_valid_order_id(""));
        assert!(!is_valid_order_id("900-3746401"));
        assert!(!is_valid_order_id("9003-746401-0000001"));
        assert!(!is_valid_order_id("900-3746401-00000012"));
        assert!(!is_valid_order_id("900-374640a-0000001"));
        assert!(!is_valid_order_id(" 900-3746401-0000001"));
    }

    #[test]
    fn test_condition_code_range() {
        assert!(is_valid_condition(0));
        assert!(is_valid_condition(6));
        assert!(!is_valid_condition(-1));
        assert!(!is_valid_condition(7));
    }
}
