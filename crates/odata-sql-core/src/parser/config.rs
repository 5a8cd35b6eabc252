//! Operator configuration: precedence and function tables.

/// Returns the infix binding power for an operator word.
///
/// Returns `(left_bp, right_bp)` where a higher binding power binds tighter
/// and `left_bp < right_bp` makes the operator left-associative. Lower
/// precedence operators end up closer to the root of the tree.
///
/// Returns `None` if the word is not an infix operator.
#[must_use]
pub fn infix_binding_power(word: &str) -> Option<(u8, u8)> {
    match word {
        "or" => Some((1, 2)),
        "and" => Some((3, 4)),
        "eq" | "ne" | "gt" | "ge" | "lt" | "le" => Some((5, 6)),
        _ => None,
    }
}

/// Returns true if the word names a unary function (including `not`).
#[must_use]
pub fn is_unary_function(word: &str) -> bool {
    matches!(
        word,
        "not"
            | "length"
            | "indexof"
            | "tolower"
            | "toupper"
            | "trim"
            | "year"
            | "month"
            | "day"
            | "hour"
            | "minute"
            | "second"
            | "fractionalsecond"
            | "date"
            | "time"
            | "now"
            | "round"
            | "floor"
            | "ceiling"
    )
}

/// Returns true if the word names a binary function.
#[must_use]
pub fn is_binary_function(word: &str) -> bool {
    matches!(word, "concat" | "contains" | "startswith" | "endswith")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        let or_bp = infix_binding_power("or").unwrap();
        let and_bp = infix_binding_power("and").unwrap();
        let eq_bp = infix_binding_power("eq").unwrap();
        assert!(and_bp.0 > or_bp.0);
        assert!(eq_bp.0 > and_bp.0);
    }

    #[test]
    fn test_left_associativity() {
        for op in ["or", "and", "eq", "ne", "gt", "ge", "lt", "le"] {
            let (left, right) = infix_binding_power(op).unwrap();
            assert!(left < right, "{op} should be left-associative");
        }
    }

    #[test]
    fn test_function_tables() {
        assert!(is_unary_function("not"));
        assert!(is_unary_function("fractionalsecond"));
        assert!(!is_unary_function("contains"));
        assert!(is_binary_function("concat"));
        assert!(is_binary_function("endswith"));
        assert!(!is_binary_function("length"));
        assert!(infix_binding_power("contains").is_none());
    }
}
