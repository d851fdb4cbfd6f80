//! Display formatting for paces, durations and rounded figures

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a pace in seconds per km as `M'SS"`.
///
/// Fractional seconds are truncated, so an average pace of 525.9 s/km
/// renders as `8'45"`.
pub fn format_pace(seconds_per_km: f64) -> String {
    let total = seconds_per_km.max(0.0);
    let minutes = (total / 60.0).floor() as i64;
    let seconds = (total % 60.0).floor() as i64;
    format!("{}'{:02}\"", minutes, seconds)
}

/// Format a duration as `H:MM:SS`, or `M:SS` when under an hour
pub fn format_duration(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Round to `dp` decimal places, halves away from zero.
///
/// Non-finite input maps to zero.
pub fn round_to(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(300.0), "5'00\"");
        assert_eq!(format_pace(525.0), "8'45\"");
        assert_eq!(format_pace(525.9), "8'45\"");
        assert_eq!(format_pace(59.0), "0'59\"");
        assert_eq!(format_pace(725.0), "12'05\"");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(1805), "30:05");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3 * 3600 + 7 * 60 + 9), "3:07:09");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.3456, 2), dec!(12.35));
        assert_eq!(round_to(1.25, 1), dec!(1.3));
        assert_eq!(round_to(0.6666, 1), dec!(0.7));
        assert_eq!(round_to(f64::NAN, 2), Decimal::ZERO);
    }
}
