use std::cmp::Ordering;

/// Descending-score order with ascending position as the tie-break.
/// NaN scores compare as the lowest value.
#[inline]
pub fn desc_score_then_pos(a: (usize, f64), b: (usize, f64)) -> Ordering {
    match (a.1.is_nan(), b.1.is_nan()) {
        (true, true) => a.0.cmp(&b.0),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)),
    }
}

/// Select the `n` best (position, score) pairs, highest score first.
/// Equal scores keep ascending position, so the result does not depend on
/// the order of `scored`.
///
/// Partial selection then sort of the selected head: O(len + n log n).
pub fn top_n_stable(mut scored: Vec<(usize, f64)>, n: usize) -> Vec<(usize, f64)> {
    if n == 0 || scored.is_empty() {
        return Vec::new();
    }
    if n < scored.len() {
        scored.select_nth_unstable_by(n - 1, |a, b| desc_score_then_pos(*a, *b));
        scored.truncate(n);
    }
    scored.sort_unstable_by(|a, b| desc_score_then_pos(*a, *b));
    scored
}
