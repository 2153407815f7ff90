//! Color scale mapping and range formatting

use super::RangeValue;

/// Lowest scale value with its own palette entry
pub const SCALE_FLOOR: i64 = 1;

/// Highest scale value with its own palette entry
pub const SCALE_CEILING: i64 = 40;

/// Scale value assumed when a style has no color range
pub const DEFAULT_SCALE: f64 = 10.0;

/// Approximate display color for SRM 1 through 40
const PALETTE: [&str; 40] = [
    "#FFE699", "#FFD878", "#FFCA5A", "#FFBF42", "#FBB123", "#F8A600", "#F39C00", "#EA8F00",
    "#E58500", "#DE7C00", "#D77200", "#CF6900", "#CB6200", "#C35900", "#BB5100", "#B54C00",
    "#B04500", "#A63E00", "#A13700", "#9B3200", "#952D00", "#8E2900", "#882300", "#821E00",
    "#7B1A00", "#771900", "#701400", "#6A0E00", "#660D00", "#5E0B00", "#5A0A02", "#560A05",
    "#520907", "#4C0505", "#470606", "#440607", "#3F0708", "#3B0607", "#3A0607", "#360607",
];

/// Average of a color range, or [`DEFAULT_SCALE`] when the range is absent
#[must_use]
pub fn average_scale(range: Option<&RangeValue>) -> f64 {
    range.map_or(DEFAULT_SCALE, RangeValue::midpoint)
}

/// Map a scale value to a palette color token
///
/// The value is rounded, then clamped into `SCALE_FLOOR..=SCALE_CEILING`.
/// Non-finite input maps to the darkest entry.
///
/// # Examples
/// ```
/// use stylebook::styles::color_for_scale;
///
/// assert_eq!(color_for_scale(0.3), color_for_scale(1.0));
/// assert_eq!(color_for_scale(55.0), color_for_scale(40.0));
/// ```
#[must_use]
pub fn color_for_scale(value: f64) -> &'static str {
    if !value.is_finite() {
        return PALETTE[PALETTE.len() - 1];
    }
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round().clamp(SCALE_FLOOR as f64, SCALE_CEILING as f64) as i64;
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let index = (rounded - SCALE_FLOOR) as usize;
    PALETTE[index]
}

/// Palette color for a style's color range
#[must_use]
pub fn color_for_range(range: Option<&RangeValue>) -> &'static str {
    color_for_scale(average_scale(range))
}

/// Human-readable range, `N/A` when absent
///
/// Uses the minimum's unit for both bounds.
#[must_use]
pub fn format_range(range: Option<&RangeValue>) -> String {
    range.map_or_else(
        || "N/A".to_string(),
        |r| format!("{} - {} {}", r.minimum.value, r.maximum.value, r.minimum.unit)
            .trim_end()
            .to_string(),
    )
}

/// Parse a `#RRGGBB` token into its components
#[must_use]
pub fn hex_to_rgb(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_saturation() {
        assert_eq!(color_for_scale(0.3), color_for_scale(1.0));
        assert_eq!(color_for_scale(-12.0), "#FFE699");
    }

    #[test]
    fn test_ceiling_saturation() {
        assert_eq!(color_for_scale(55.0), color_for_scale(40.0));
        assert_eq!(color_for_scale(40.0), "#360607");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(color_for_scale(9.6), "#DE7C00");
        assert_eq!(color_for_scale(9.4), "#E58500");
    }

    #[test]
    fn test_non_finite_maps_to_darkest() {
        assert_eq!(color_for_scale(f64::NAN), "#360607");
        assert_eq!(color_for_scale(f64::INFINITY), "#360607");
    }

    #[test]
    fn test_absent_range_uses_default() {
        assert!((average_scale(None) - DEFAULT_SCALE).abs() < f64::EPSILON);
        assert_eq!(color_for_range(None), "#DE7C00");
    }

    #[test]
    fn test_average_scale() {
        let range = RangeValue::new(2.0, 4.0, "SRM");
        assert!((average_scale(Some(&range)) - 3.0).abs() < f64::EPSILON);
        assert_eq!(color_for_range(Some(&range)), "#FFCA5A");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(None), "N/A");
        assert_eq!(format_range(Some(&RangeValue::new(4.5, 6.0, "%"))), "4.5 - 6 %");
        assert_eq!(format_range(Some(&RangeValue::new(1.04, 1.06, ""))), "1.04 - 1.06");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FFE699"), Some((0xFF, 0xE6, 0x99)));
        assert_eq!(hex_to_rgb("FFE699"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
    }
}
