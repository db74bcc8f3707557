/// Compact balance rendering: `1.5M`, `-2.5K`, `500`.
///
/// The magnitude is divided as a float and rounded to one decimal place on
/// the exact binary value of that quotient, with exact halves rounding up.
/// `1_150_000` therefore renders `1.1M` (1.15 is stored just below itself)
/// while `1_250_000` renders `1.3M`, matching what browser clients show.
pub fn format_amount(balance: i64) -> String {
    let sign = if balance < 0 { "-" } else { "" };
    let abs = balance.unsigned_abs();

    let (divisor, suffix) = if abs >= 1_000_000 {
        (1_000_000u64, "M")
    } else if abs >= 1_000 {
        (1_000u64, "K")
    } else {
        return format!("{}{}", sign, abs);
    };

    let tenths = round_to_tenths(abs as f64 / divisor as f64);
    format!("{}{}.{}{}", sign, tenths / 10, tenths % 10, suffix)
}

/// Nearest multiple of 0.1 to a finite, non-negative `value`, expressed in
/// tenths. Computed on the mantissa so no second float rounding creeps in.
fn round_to_tenths(value: f64) -> u128 {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = u128::from((bits & ((1u64 << 52) - 1)) | (1u64 << 52));

    if exponent >= 0 {
        return (mantissa << exponent) * 10;
    }

    let shift = exponent.unsigned_abs();
    let scaled = mantissa * 10;
    let tenths = scaled >> shift;
    let remainder = scaled - (tenths << shift);
    if remainder << 1 >= 1u128 << shift {
        tenths + 1
    } else {
        tenths
    }
}
