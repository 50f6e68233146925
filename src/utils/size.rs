//! Size formatting and parsing utilities.
//!
//! [`human_readable_size`] renders byte counts the way `du -h` style tools do
//! (`1.5K`, `3.0M`), and [`parse_size`] turns such strings back into bytes for
//! threshold options like `--min-size`.

use anyhow::{Result, anyhow, bail};

/// Units used by [`human_readable_size`], each 1024 times the previous one.
const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];

/// Format a byte count with the largest unit in `B, K, M, G, T` that keeps the
/// printed value below `1024.0`, with one decimal place and no space.
///
/// Values of 1024 TiB and above stay in `T`.
///
/// ```
/// # use du_improved::human_readable_size;
/// assert_eq!(human_readable_size(1536), "1.5K");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_readable_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    // Promote on the value as printed, so 1023.96K shows as 1.0M rather
    // than 1024.0K.
    while (value * 10.0).round() >= 10_240.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.1}{}", UNITS[unit])
}

/// Parse a human-readable size string into bytes.
///
/// Accepts plain byte counts and decimal values with a unit suffix.
///
/// # Supported Units
///
/// - **Binary, `du` style**: K, M, G, T (1024ⁿ)
/// - **Binary**: KiB, MiB, GiB, TiB (1024ⁿ)
/// - **Decimal**: KB, MB, GB, TB (1000ⁿ)
/// - **Bytes**: B or a plain number
///
/// Units are case-insensitive.
///
/// # Errors
///
/// This function will return an error if:
/// - The size string format is invalid (e.g., "1.2.3M", "invalid")
/// - The number cannot be parsed as a valid integer or decimal
/// - The resulting value would overflow `u64`
/// - The decimal has too many fractional digits (more than 9)
pub fn parse_size(size_str: &str) -> Result<u64> {
    let size_str = size_str.trim().to_uppercase();
    let (number_str, multiplier) = parse_size_unit(&size_str);
    scale(number_str, multiplier)
}

/// Parse the unit suffix and return the numeric part with its multiplier.
fn parse_size_unit(size_str: &str) -> (&str, u64) {
    const UNITS: &[(&str, u64)] = &[
        ("TIB", 1 << 40),
        ("GIB", 1 << 30),
        ("MIB", 1 << 20),
        ("KIB", 1 << 10),
        ("TB", 1_000_000_000_000),
        ("GB", 1_000_000_000),
        ("MB", 1_000_000),
        ("KB", 1_000),
        ("T", 1 << 40),
        ("G", 1 << 30),
        ("M", 1 << 20),
        ("K", 1 << 10),
        ("B", 1),
    ];

    for (suffix, multiplier) in UNITS {
        if let Some(number) = size_str.strip_suffix(suffix) {
            return (number.trim_end(), *multiplier);
        }
    }

    (size_str, 1)
}

/// Multiply a plain or decimal number (`"3"`, `"1.5"`, `".25"`) by
/// `multiplier`, truncating to whole bytes.
///
/// The arithmetic runs in `u128` so only the final narrowing can fail.
fn scale(number_str: &str, multiplier: u64) -> Result<u64> {
    let (whole, fraction) = number_str.split_once('.').unwrap_or((number_str, ""));

    if whole.is_empty() && fraction.is_empty() {
        bail!("Missing number in size: {number_str:?}");
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        bail!("Invalid size number: {number_str:?}");
    }
    if fraction.len() > 9 {
        bail!("Too many decimal places: {fraction}");
    }

    let multiplier = u128::from(multiplier);
    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse()? };
    let whole_bytes = whole
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow!("Size {number_str} is too large"))?;

    let fraction_bytes = if fraction.is_empty() {
        0
    } else {
        let digits: u128 = fraction.parse()?;
        digits * multiplier / 10u128.pow(u32::try_from(fraction.len())?)
    };

    u64::try_from(whole_bytes + fraction_bytes)
        .map_err(|_| anyhow!("Size {number_str} does not fit in 64 bits"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_zero() {
        assert_eq!(human_readable_size(0), "0.0B");
    }

    #[test]
    fn test_human_readable_bytes() {
        assert_eq!(human_readable_size(1), "1.0B");
        assert_eq!(human_readable_size(1023), "1023.0B");
    }

    #[test]
    fn test_human_readable_unit_boundaries() {
        assert_eq!(human_readable_size(1024), "1.0K");
        assert_eq!(human_readable_size(1536), "1.5K");
        assert_eq!(human_readable_size(1_048_576), "1.0M");
        assert_eq!(human_readable_size(1 << 30), "1.0G");
        assert_eq!(human_readable_size(1 << 40), "1.0T");
    }

    #[test]
    fn test_human_readable_promotes_when_rounding_reaches_next_unit() {
        assert_eq!(human_readable_size(1_048_575), "1.0M");
        assert_eq!(human_readable_size(1_048_524), "1023.9K");
        assert_eq!(human_readable_size((1 << 30) - 1), "1.0G");
    }

    #[test]
    fn test_human_readable_caps_at_terabytes() {
        assert_eq!(human_readable_size(2048 << 40), "2048.0T");
    }

    #[test]
    fn test_human_readable_rounds_to_one_decimal() {
        assert_eq!(human_readable_size(1_363_149), "1.3M");
        assert_eq!(human_readable_size(11_059), "10.8K");
    }

    #[test]
    fn test_parse_size_zero() {
        assert_eq!(parse_size("0").unwrap(), 0);
        assert_eq!(parse_size("0K").unwrap(), 0);
    }

    #[test]
    fn test_parse_size_plain_bytes() {
        assert_eq!(parse_size("1000").unwrap(), 1000);
        assert_eq!(parse_size("512B").unwrap(), 512);
    }

    #[test]
    fn test_parse_size_du_style_units() {
        assert_eq!(parse_size("1K").unwrap(), 1024);
        assert_eq!(parse_size("1.5K").unwrap(), 1536);
        assert_eq!(parse_size("2M").unwrap(), 2_097_152);
        assert_eq!(parse_size("1G").unwrap(), 1_073_741_824);
        assert_eq!(parse_size("1T").unwrap(), 1_099_511_627_776);
    }

    #[test]
    fn test_parse_size_binary_units() {
        assert_eq!(parse_size("1KiB").unwrap(), 1_024);
        assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
        assert_eq!(parse_size("1.5MiB").unwrap(), 1_572_864);
    }

    #[test]
    fn test_parse_size_decimal_units() {
        assert_eq!(parse_size("1KB").unwrap(), 1_000);
        assert_eq!(parse_size("2.5MB").unwrap(), 2_500_000);
        assert_eq!(parse_size("1GB").unwrap(), 1_000_000_000);
    }

    #[test]
    fn test_parse_size_case_insensitive() {
        assert_eq!(parse_size("1k").unwrap(), 1024);
        assert_eq!(parse_size("1kb").unwrap(), 1000);
        assert_eq!(parse_size("1mib").unwrap(), 1_048_576);
    }

    #[test]
    fn test_parse_size_allows_space_before_unit() {
        assert_eq!(parse_size("10 M").unwrap(), 10 << 20);
    }

    #[test]
    fn test_parse_size_invalid_formats() {
        assert!(parse_size("").is_err());
        assert!(parse_size("invalid").is_err());
        assert!(parse_size("1.2.3M").is_err());
        assert!(parse_size("M1").is_err());
        assert!(parse_size("-1M").is_err());
    }

    #[test]
    fn test_parse_size_overflow() {
        assert!(parse_size(&u64::MAX.to_string()).is_ok());
        assert!(parse_size("99999999999999T").is_err());
    }

    #[test]
    fn test_scale_truncates_fraction() {
        assert_eq!(scale("1.5", 1024).unwrap(), 1536);
        assert_eq!(scale(".25", 1000).unwrap(), 250);
        assert_eq!(scale("0.001", 1024).unwrap(), 1);
        assert_eq!(scale("1.", 10).unwrap(), 10);
        assert!(scale(".", 1).is_err());
        assert!(scale("1.1234567890", 1).is_err());
    }

    #[test]
    fn test_parse_size_unit() {
        assert_eq!(parse_size_unit("100GB"), ("100", 1_000_000_000));
        assert_eq!(parse_size_unit("50MIB"), ("50", 1_048_576));
        assert_eq!(parse_size_unit("3K"), ("3", 1024));
        assert_eq!(parse_size_unit("1024"), ("1024", 1));
    }
}
