// Numeric literal grammar shared by SG_, BA_DEF_ and BA_ records.
//
//   literal  := sign? mantissa exponent?
//   mantissa := digits ('.' digits?)? | '.' digits
//   exponent := ('e' | 'E') sign? digits
//
// `f64::from_str` alone would also accept "inf", "NaN" and friends.

pub(crate) fn is_decimal_literal(s: &str) -> bool {
    let b: &[u8] = s.as_bytes();
    let mut i: usize = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == b.len()
}

/// Parses a decimal/exponential literal, `None` when it does not follow the
/// grammar or overflows `f64`.
pub(crate) fn parse_f64(s: &str) -> Option<f64> {
    if !is_decimal_literal(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
