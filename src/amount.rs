use crate::error::VaultClientError;

/// Convert a human-readable decimal amount into integer base units.
///
/// The input is parsed as a plain non-negative decimal string; no floating
/// point is involved at any point, so nothing can round. Fractional digits
/// beyond what `decimals` can represent fail with `PrecisionLoss` unless
/// they are trailing zeros. Values past `u64::MAX` base units fail with
/// `InvalidAmount`.
pub fn to_base_units(human: &str, decimals: u8) -> Result<u64, VaultClientError> {
    let (integer, fraction) = split_decimal(human)?;

    // Trailing zeros carry no precision.
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(VaultClientError::PrecisionLoss {
            amount: human.to_string(),
            decimals,
        });
    }

    let mut digits = String::with_capacity(integer.len() + decimals as usize);
    digits.push_str(integer);
    digits.push_str(fraction);
    for _ in fraction.len()..decimals as usize {
        digits.push('0');
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }

    digits.parse::<u64>().map_err(|_| {
        VaultClientError::InvalidAmount(format!("{} exceeds the u64 base-unit range", human))
    })
}

/// Render integer base units as a canonical decimal string.
///
/// Canonical means no trailing fractional zeros and a bare integer when the
/// fraction is zero, so the output round-trips through `to_base_units`.
pub fn to_human(base: u64, decimals: u8) -> String {
    let digits = base.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let (integer, fraction) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        let mut padded = String::with_capacity(decimals);
        for _ in digits.len()..decimals {
            padded.push('0');
        }
        padded.push_str(&digits);
        ("0".to_string(), padded)
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer
    } else {
        format!("{}.{}", integer, fraction)
    }
}

fn split_decimal(human: &str) -> Result<(&str, &str), VaultClientError> {
    if human.is_empty() {
        return Err(VaultClientError::InvalidAmount("empty amount".into()));
    }

    let (integer, fraction) = match human.split_once('.') {
        Some(parts) => parts,
        None => (human, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err(VaultClientError::InvalidAmount(format!(
            "{:?} has no digits",
            human
        )));
    }
    if !integer.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(VaultClientError::InvalidAmount(format!(
            "{:?} is not a non-negative decimal",
            human
        )));
    }

    Ok((integer, fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_token_at_six_decimals() {
        assert_eq!(to_base_units("0.5", 6).unwrap(), 500_000);
        assert_eq!(to_human(500_000, 6), "0.5");
    }

    #[test]
    fn test_round_trip_for_canonical_amounts() {
        let cases = [
            ("0.5", 6),
            ("1", 6),
            ("123.456789", 6),
            ("0.000001", 6),
            ("42", 0),
            ("7.25", 2),
        ];
        for (human, decimals) in cases {
            let base = to_base_units(human, decimals).unwrap();
            assert_eq!(to_human(base, decimals), human, "case {human}@{decimals}");
        }
    }

    #[test]
    fn test_fractional_overflow_is_precision_loss() {
        let result = to_base_units("0.1234567", 6);
        assert!(matches!(
            result,
            Err(VaultClientError::PrecisionLoss { decimals: 6, .. })
        ));

        let result = to_base_units("1.001", 2);
        assert!(matches!(
            result,
            Err(VaultClientError::PrecisionLoss { decimals: 2, .. })
        ));
    }

    #[test]
    fn test_trailing_zeros_lose_nothing() {
        assert_eq!(to_base_units("0.5000000", 6).unwrap(), 500_000);
        assert_eq!(to_base_units("2.000", 2).unwrap(), 200);
    }

    #[test]
    fn test_zero_forms() {
        for zero in ["0", "0.0", ".0", "0.", "0.000000"] {
            assert_eq!(to_base_units(zero, 6).unwrap(), 0, "form {zero:?}");
        }
        assert_eq!(to_human(0, 6), "0");
    }

    #[test]
    fn test_rejects_garbage_and_signs() {
        for bad in ["", ".", "-1", "+1", "1.2.3", "abc", "1e5", " 1"] {
            let result = to_base_units(bad, 6);
            assert!(
                matches!(result, Err(VaultClientError::InvalidAmount(_))),
                "input {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_bare_integer_and_bare_fraction_forms() {
        assert_eq!(to_base_units(".5", 6).unwrap(), 500_000);
        assert_eq!(to_base_units("5.", 6).unwrap(), 5_000_000);
    }

    #[test]
    fn test_large_magnitudes_do_not_lose_precision() {
        let max = u64::MAX.to_string();
        assert_eq!(to_base_units(&max, 0).unwrap(), u64::MAX);
        assert_eq!(to_human(u64::MAX, 0), max);

        assert_eq!(to_base_units("18446744073709.551615", 6).unwrap(), u64::MAX);
        assert_eq!(to_human(u64::MAX, 6), "18446744073709.551615");
    }

    #[test]
    fn test_overflow_is_invalid_amount() {
        let result = to_base_units("18446744073709551616", 0);
        assert!(matches!(result, Err(VaultClientError::InvalidAmount(_))));

        // Fits as an integer but overflows once scaled by the decimals.
        let result = to_base_units("18446744073709551615", 6);
        assert!(matches!(result, Err(VaultClientError::InvalidAmount(_))));
    }

    #[test]
    fn test_to_human_pads_small_values() {
        assert_eq!(to_human(1, 6), "0.000001");
        assert_eq!(to_human(1_500_000, 6), "1.5");
        assert_eq!(to_human(5, 20), "0.00000000000000000005");
    }
}
