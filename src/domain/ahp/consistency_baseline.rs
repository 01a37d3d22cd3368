//! Random consistency index (RI) baselines by matrix order.

/// RI(n) for n = 1..=10, index 0 holds RI(1).
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// RI used for any order above the tabulated range.
pub const RANDOM_INDEX_FALLBACK: f64 = 1.45;

/// Returns the random consistency index for a matrix of order `n`.
///
/// Orders 0..=2 have no consistency constraint and return 0.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        1..=10 => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabulated_orders_match_reference_values() {
        assert_eq!(random_index(1), 0.0);
        assert_eq!(random_index(2), 0.0);
        assert_eq!(random_index(3), 0.58);
        assert_eq!(random_index(4), 0.90);
        assert_eq!(random_index(5), 1.12);
        assert_eq!(random_index(9), 1.45);
        assert_eq!(random_index(10), 1.49);
    }

    #[test]
    fn orders_above_ten_use_fallback() {
        assert_eq!(random_index(11), RANDOM_INDEX_FALLBACK);
        assert_eq!(random_index(40), RANDOM_INDEX_FALLBACK);
    }

    #[test]
    fn order_zero_has_no_baseline() {
        assert_eq!(random_index(0), 0.0);
    }
}
