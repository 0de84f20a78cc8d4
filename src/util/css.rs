//! Lenient CSS value parsing.

/// Leading number of a computed style value (`"12px"` → 12, `" -3.5rem"` →
/// -3.5). `None` when the value does not start with a number.
#[must_use]
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in value.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_with_units() {
        assert_eq!(parse_leading_number("12px"), Some(12.0));
        assert_eq!(parse_leading_number("  -3.5rem"), Some(-3.5));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("+8"), Some(8.0));
        assert_eq!(parse_leading_number("1.2.3"), Some(1.2));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("auto"), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("."), None);
    }
}
