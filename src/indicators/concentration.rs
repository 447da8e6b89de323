//! Herfindahl-Hirschman concentration index.

/// Normalized HHI of a set of non-negative values
///
/// Sum of squared shares, in (0, 1]. A single partner gives 1.0; `n`
/// equal partners give `1/n`.
///
/// # Returns
/// `None` when the total is zero (no shares to measure)
pub fn herfindahl_index(values: &[f64]) -> Option<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return None;
    }

    Some(
        values
            .iter()
            .map(|v| {
                let share = v / total;
                share * share
            })
            .sum(),
    )
}

/// Count of strictly positive values (the HHI lower bound is `1/n`)
pub fn nonzero_count(values: &[f64]) -> usize {
    values.iter().filter(|v| **v > 0.0).count()
}
