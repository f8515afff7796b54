use crate::config::MIN_UPPER_BOUND;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for upper bound parsing
static GROUPED_DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:[_,]\d{3})+$").unwrap());
static SCIENTIFIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[eE](\d+)$").unwrap());
static POWER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s*\^\s*(\d+)$").unwrap());

/// Upper bound parsing error types
#[derive(Debug, PartialEq, Eq)]
pub enum BoundParseError {
    EmptyInput,
    InvalidFormat(String),
    TooLarge,
    OutOfRange { min: u64, max: u64 },
}

impl std::fmt::Display for BoundParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundParseError::EmptyInput => write!(f, "Upper bound cannot be empty"),
            BoundParseError::InvalidFormat(hint) => {
                write!(f, "Invalid upper bound format. {}", hint)
            }
            BoundParseError::TooLarge => write!(f, "Upper bound does not fit in 64 bits"),
            BoundParseError::OutOfRange { min, max } => write!(
                f,
                "Upper bound must be between {} and {}",
                format_with_separators(*min),
                format_with_separators(*max)
            ),
        }
    }
}

impl std::error::Error for BoundParseError {}

fn checked_power(base: u64, exponent: &str) -> Result<u64, BoundParseError> {
    let exponent: u32 = exponent.parse().map_err(|_| BoundParseError::TooLarge)?;
    base.checked_pow(exponent).ok_or(BoundParseError::TooLarge)
}

fn parse_bound_literal(trimmed: &str) -> Result<u64, BoundParseError> {
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().map_err(|_| BoundParseError::TooLarge);
    }

    if GROUPED_DIGITS_REGEX.is_match(trimmed) {
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        return digits.parse().map_err(|_| BoundParseError::TooLarge);
    }

    if let Some(captures) = SCIENTIFIC_REGEX.captures(trimmed) {
        let mantissa: u64 = captures[1]
            .parse()
            .map_err(|_| BoundParseError::TooLarge)?;
        let scale = checked_power(10, &captures[2])?;
        return mantissa
            .checked_mul(scale)
            .ok_or(BoundParseError::TooLarge);
    }

    if let Some(captures) = POWER_REGEX.captures(trimmed) {
        let base: u64 = captures[1]
            .parse()
            .map_err(|_| BoundParseError::TooLarge)?;
        return checked_power(base, &captures[2]);
    }

    Err(BoundParseError::InvalidFormat(
        "Use: 1000000, 1_000_000, 1,000,000, 1e6 or 10^6".to_string(),
    ))
}

/// Parse an upper bound written in one of several common notations.
///
/// Supported formats:
/// - Plain digits: "1000000"
/// - Grouped digits: "1_000_000" or "1,000,000"
/// - Scientific: "1e6"
/// - Power: "10^6"
///
/// The result must lie in `MIN_UPPER_BOUND..=max`.
///
/// # Examples
/// ```
/// use collatz_chain::utils::parse_upper_bound;
/// assert_eq!(parse_upper_bound("1e6", 10_000_000), Ok(1_000_000));
/// assert_eq!(parse_upper_bound("10^3", 10_000_000), Ok(1_000));
/// assert_eq!(parse_upper_bound("1,000", 10_000_000), Ok(1_000));
/// ```
pub fn parse_upper_bound(input: &str, max: u64) -> Result<u64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BoundParseError::EmptyInput.to_string());
    }

    let value = parse_bound_literal(trimmed).map_err(|e| e.to_string())?;
    validate_range(value, MIN_UPPER_BOUND, max)
}

fn validate_range(value: u64, min: u64, max: u64) -> Result<u64, String> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(BoundParseError::OutOfRange { min, max }.to_string())
    }
}

/// Render a number with comma thousands separators ("837,799").
pub fn format_with_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Join a chain into "a → b → c", eliding the middle past `max_shown` values.
///
/// At least the first and last values are always shown.
pub fn format_trajectory(values: &[u64], max_shown: usize) -> String {
    let max_shown = max_shown.max(2);
    let join = |part: &[u64]| {
        part.iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    };

    if values.len() <= max_shown {
        return join(values);
    }

    let head = max_shown / 2;
    let tail = max_shown - head;
    format!(
        "{} → … ({} more) … → {}",
        join(&values[..head]),
        values.len() - max_shown,
        join(&values[values.len() - tail..])
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MAX: u64 = 10_000_000;

    #[test]
    fn parses_supported_notations() {
        for input in ["1000000", "1_000_000", "1,000,000", "1e6", "1E6", "10^6", " 10 ^ 6 "] {
            assert_eq!(parse_upper_bound(input, MAX), Ok(1_000_000), "input {:?}", input);
        }
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert_eq!(
            parse_upper_bound("  ", MAX),
            Err("Upper bound cannot be empty".to_string())
        );
        assert!(parse_upper_bound("1,00,000", MAX)
            .unwrap_err()
            .starts_with("Invalid upper bound format"));
        assert!(parse_upper_bound("-5", MAX).is_err());
        assert!(parse_upper_bound("one million", MAX).is_err());
    }

    #[test]
    fn enforces_range() {
        assert_eq!(
            parse_upper_bound("1", MAX),
            Err("Upper bound must be between 2 and 10,000,000".to_string())
        );
        assert!(parse_upper_bound("1e8", MAX).is_err());
        assert_eq!(parse_upper_bound("2", MAX), Ok(2));
        assert_eq!(parse_upper_bound("1e7", MAX), Ok(MAX));
    }

    #[test]
    fn reports_overflow() {
        assert_eq!(
            parse_upper_bound("10^40", MAX),
            Err("Upper bound does not fit in 64 bits".to_string())
        );
        assert_eq!(
            parse_upper_bound("99999999999999999999999", MAX),
            Err("Upper bound does not fit in 64 bits".to_string())
        );
    }

    #[test]
    fn separators() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(999), "999");
        assert_eq!(format_with_separators(1_000), "1,000");
        assert_eq!(format_with_separators(837_799), "837,799");
        assert_eq!(format_with_separators(1_000_000), "1,000,000");
    }

    #[test]
    fn trajectory_formatting() {
        assert_eq!(format_trajectory(&[6, 3, 10, 5], 8), "6 → 3 → 10 → 5");
        assert_eq!(
            format_trajectory(&[6, 3, 10, 5, 16, 8, 4, 2, 1], 4),
            "6 → 3 → … (5 more) … → 2 → 1"
        );
    }

    #[test]
    fn tiny_preview_keeps_both_ends() {
        let chain = [6, 3, 10, 5, 16];
        for max_shown in [0, 1, 2] {
            assert_eq!(format_trajectory(&chain, max_shown), "6 → … (3 more) … → 16");
        }
        assert_eq!(format_trajectory(&[2, 1], 0), "2 → 1");
        assert_eq!(format_trajectory(&[1], 1), "1");
    }
}
