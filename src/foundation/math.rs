/// Tolerance (in points) below which leftover free space is not worth splitting off.
pub const SPLIT_EPSILON: f64 = 0.0001;

/// Is `a` greater than `b` by more than `eps`?
///
/// Not the inverse of a "less than within eps" test: values within `eps` of each
/// other are neither greater nor less.
pub fn approx_gt(a: f64, b: f64, eps: f64) -> bool {
    a - eps > b
}

/// Totally ordered `f64` for use as a set/map key.
///
/// Coordinates in a layout are all finite, so `total_cmp` agrees with the usual order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Coord(pub(crate) f64);

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for Coord {}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Format a length the way the typesetter expects it: at most six significant
/// digits, no trailing zeros, no exponent.
pub fn format_significant(v: f64) -> String {
    const SIG: i32 = 6;
    if v == 0.0 || !v.is_finite() {
        return if v.is_finite() { "0".to_string() } else { v.to_string() };
    }
    let magnitude = v.abs().log10().floor() as i32;
    let decimals = (SIG - 1 - magnitude).max(0) as usize;
    let mut s = format!("{v:.decimals$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
