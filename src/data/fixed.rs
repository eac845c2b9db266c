//! Fixed-precision rendering of statistics for display.

/// Largest supported number of fractional digits.
pub const MAX_DECIMALS: u32 = 20;

/// Render `value` with exactly `decimals` fractional digits.
///
/// Rounding works on the exact binary value, so `1.115` (stored just below
/// the half) renders as `1.11`. Exact halves round away from zero. Negative
/// zero renders without a sign. Non-finite values render as `NaN`,
/// `Infinity` or `-Infinity` so a corrupted statistic stays visible on the
/// display instead of looking like a real number.
pub fn to_fixed(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let decimals = decimals.min(MAX_DECIMALS);
    let precision = decimals as usize;
    let value = if value == 0.0 { 0.0 } else { value };

    if is_exact_half(value, decimals) {
        let magnitude = round_half_up(&format!("{:.*}", precision + 1, value.abs()));
        return if value < 0.0 {
            format!("-{}", magnitude)
        } else {
            magnitude
        };
    }

    // Formatting rounds the exact expansion; only exact halves need help
    format!("{:.*}", precision, value)
}

/// Whether `value` lies exactly halfway between two `decimals`-digit numbers.
///
/// A decimal with `decimals + 1` fractional digits ending in 5 is only
/// representable when the value has at most `decimals + 1` fractional bits,
/// in which case its expansion at that precision is exact.
fn is_exact_half(value: f64, decimals: u32) -> bool {
    let shifted = value * 2f64.powi(decimals as i32 + 1);
    if !shifted.is_finite() || shifted.fract() != 0.0 {
        return false;
    }
    format!("{:.*}", decimals as usize + 1, value).ends_with('5')
}

/// Drop the trailing 5 of an exact decimal and round the rest up in magnitude.
fn round_half_up(expansion: &str) -> String {
    let mut digits: Vec<u8> = expansion.as_bytes().to_vec();
    digits.pop();
    if digits.last() == Some(&b'.') {
        digits.pop();
    }

    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        match *digit {
            b'.' => continue,
            b'9' => *digit = b'0',
            _ => {
                *digit += 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_precision() {
        assert_eq!(to_fixed(120.0, 0), "120");
        assert_eq!(to_fixed(119.6, 0), "120");
        assert_eq!(to_fixed(20.0, 2), "20.00");
    }

    #[test]
    fn test_truncates_to_precision() {
        assert_eq!(to_fixed(1.23456, 2), "1.23");
        assert_eq!(to_fixed(1.23556, 2), "1.24");
        assert_eq!(to_fixed(-7.891, 1), "-7.9");
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.25, 1), "1.3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(9.5, 0), "10");
        assert_eq!(to_fixed(-0.375, 2), "-0.38");
        assert_eq!(to_fixed(99.875, 2), "99.88");
    }

    #[test]
    fn test_rounds_the_stored_value() {
        // each is stored just below the half
        assert_eq!(to_fixed(1.115, 2), "1.11");
        assert_eq!(to_fixed(8.345, 2), "8.34");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.1, 20), "0.10000000000000000555");
    }

    #[test]
    fn test_signed_zero() {
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(-0.0, 0), "0");
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 0), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 3), "-Infinity");
    }

    #[test]
    fn test_precision_is_clamped() {
        let text = to_fixed(1.5, 40);
        let fraction = text.split('.').nth(1).unwrap();
        assert_eq!(fraction.len(), MAX_DECIMALS as usize);
    }

    #[test]
    fn test_large_values_keep_digits() {
        assert_eq!(to_fixed(1e17, 1), "100000000000000000.0");
    }
}
