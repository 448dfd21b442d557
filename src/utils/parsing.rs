/// Parse a boolean flag from an optional string value
pub fn parse_flag(value: Option<&String>, default: bool) -> bool {
    match value {
        Some(v) => {
            let t = v.trim().to_lowercase();
            if t.is_empty() {
                default
            } else {
                matches!(t.as_str(), "1" | "true" | "yes" | "on")
            }
        }
        None => default,
    }
}

/// Split a comma separated setting, dropping blanks.
pub fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the longest leading decimal number of `s`, ignoring leading
/// whitespace. `"6.45abc"` → `6.45`, `"abc"` → `NaN`.
///
/// Upstream coordinates arrive as strings with stray suffixes often enough
/// that a strict `str::parse` would drop valid markers.
pub fn parse_leading_float(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut valid_end = 0;
    while end < bytes.len() {
        let c = bytes[end];
        if c.is_ascii_digit() {
            seen_digit = true;
            end += 1;
            valid_end = end;
        } else if c == b'.' && !seen_dot && !seen_exp {
            seen_dot = true;
            end += 1;
            if seen_digit {
                valid_end = end;
            }
        } else if (c == b'e' || c == b'E') && seen_digit && !seen_exp {
            // only accept the exponent if digits follow it
            let mut cursor = end + 1;
            if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
                cursor += 1;
            }
            if cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
                seen_exp = true;
                end = cursor;
            } else {
                break;
            }
        } else {
            break;
        }
    }

    if !seen_digit {
        return f64::NAN;
    }
    t[..valid_end].trim_end_matches('.').parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_defaults_when_missing_or_blank() {
        assert!(parse_flag(None, true));
        assert!(!parse_flag(Some(&"  ".to_string()), false));
        assert!(parse_flag(Some(&"Yes".to_string()), false));
        assert!(!parse_flag(Some(&"off".to_string()), true));
    }

    #[test]
    fn csv_list_skips_blanks() {
        assert_eq!(parse_csv_list(" 7, ,8,"), vec!["7", "8"]);
        assert!(parse_csv_list("").is_empty());
    }

    #[test]
    fn leading_float_behaves_like_parse_float() {
        assert_eq!(parse_leading_float("6.4550"), 6.455);
        assert_eq!(parse_leading_float("  -3.5xyz"), -3.5);
        assert_eq!(parse_leading_float("12."), 12.0);
        assert_eq!(parse_leading_float("1e3"), 1000.0);
        assert_eq!(parse_leading_float("2e"), 2.0);
        assert!(parse_leading_float("").is_nan());
        assert!(parse_leading_float("abc").is_nan());
        assert!(parse_leading_float("-").is_nan());
    }
}
