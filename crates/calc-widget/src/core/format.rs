//! Display formatting for results and history entries

/// Maximum number of fractional digits shown for non-integer values
pub const MAX_FRACTION_DIGITS: i32 = 4;

/// Formats a value for display.
///
/// - `NaN`, `Infinity` and `-Infinity` render literally
/// - integers render without a decimal point (`-0` renders as `0`)
/// - other values are rounded half away from zero to four fractional
///   digits, then trailing zeros and a dangling point are removed
///
/// ```rust
/// use calc_widget::core::format_number;
///
/// assert_eq!(format_number(12.5), "12.5");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if value.fract() == 0.0 {
        return format_integer(value);
    }

    // `{:.N}` rounds the exact binary value but breaks exact ties to even.
    // A tie at N places is a value whose 2^(N+1) multiple is an odd integer.
    let halves = value * 2f64.powi(MAX_FRACTION_DIGITS + 1);
    let target = if halves.fract() == 0.0 && halves % 2.0 != 0.0 {
        let scale = 10f64.powi(MAX_FRACTION_DIGITS);
        (value * scale).round() / scale
    } else {
        value
    };

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS as usize, target);
    match fixed.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn format_integer(value: f64) -> String {
    if value == 0.0 {
        // Collapses -0
        "0".to_string()
    } else {
        format!("{value}")
    }
}
