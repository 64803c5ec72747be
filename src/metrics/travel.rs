use crate::trial::{Challenge, Vec3};

#[inline(always)]
pub fn norm3(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Sum of rotational travel magnitudes over every keypress.
/// Keypresses without a recorded rotation contribute nothing.
pub fn rotational_travel(challenge: &Challenge) -> f64 {
    challenge
        .keypresses
        .iter()
        .filter_map(|kp| kp.rotation())
        .map(norm3)
        .sum()
}

/// Same as [`rotational_travel`] for the positional component.
pub fn positional_travel(challenge: &Challenge) -> f64 {
    challenge
        .keypresses
        .iter()
        .filter_map(|kp| kp.translation())
        .map(norm3)
        .sum()
}

/// Percent of ideal travel. `None` when the ideal is zero.
pub fn percent_of_ideal(actual: f64, ideal: f64) -> Option<f64> {
    if ideal > 0.0 {
        Some(100.0 * actual / ideal)
    } else {
        None
    }
}
