//! Cell access and numeric parsing helpers shared by the classifiers

/// Read a trimmed cell, treating missing cells as empty.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.trim()).unwrap_or("")
}

/// Parse a decimal floating literal.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent and an optional `f`/`F`/`d`/`D` suffix, plus the exact words
/// `NaN`, `Infinity` and `-Infinity`/`+Infinity`. Loose spellings such as
/// `inf` or `nan` are rejected.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    match s {
        "NaN" | "+NaN" | "-NaN" => return Some(f64::NAN),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let body = match s.as_bytes()[s.len() - 1] {
        b'f' | b'F' | b'd' | b'D' => &s[..s.len() - 1],
        _ => s,
    };

    if body.is_empty()
        || !body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        || !body.bytes().any(|b| b.is_ascii_digit())
    {
        return None;
    }

    body.parse::<f64>().ok()
}

/// Whether a value parses as a number.
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Parse a feature cell, reading unparseable or empty cells as 0.0.
pub fn parse_or_zero(value: &str) -> f64 {
    parse_numeric(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric("-3.5"), Some(-3.5));
        assert_eq!(parse_numeric("+.5"), Some(0.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric(" 7 "), Some(7.0));
    }

    #[test]
    fn test_parse_type_suffix() {
        assert_eq!(parse_numeric("2.5f"), Some(2.5));
        assert_eq!(parse_numeric("10D"), Some(10.0));
        assert_eq!(parse_numeric("f"), None);
    }

    #[test]
    fn test_rejects_loose_special_values() {
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("nan"), None);
        assert_eq!(parse_numeric("infinity"), None);
        assert!(parse_numeric("NaN").unwrap().is_nan());
        assert_eq!(parse_numeric("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_rejects_words_and_empty() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12abc"), None);
        assert_eq!(parse_numeric("e5"), None);
        assert_eq!(parse_numeric("."), None);
    }

    #[test]
    fn test_cell_pads_short_rows() {
        let row = vec![" a ".to_string()];
        assert_eq!(cell(&row, 0), "a");
        assert_eq!(cell(&row, 3), "");
        assert_eq!(parse_or_zero(cell(&row, 3)), 0.0);
    }
}
