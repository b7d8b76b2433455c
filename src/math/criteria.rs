//! Model-selection criteria as pure functions.
//!
//! - BIC = -2 * logL + p * ln(N), lower is better
//! - DIC = logL - mean(logL of the other labels), higher is better
//!
//! For a Gaussian HMM with diagonal covariances over `M` features and `n` states
//! the free parameter count is taken as `p = n^2 + 2 * n * M - 1`.

/// Free parameters of an `n`-state model over `n_features` features.
pub fn free_parameters(num_states: usize, n_features: usize) -> usize {
    let n = num_states;
    (n * n + 2 * n * n_features).saturating_sub(1)
}

/// Bayesian Information Criterion.
pub fn bic_score(log_likelihood: f64, num_states: usize, n_features: usize, n_rows: usize) -> f64 {
    let p = free_parameters(num_states, n_features) as f64;
    -2.0 * log_likelihood + p * (n_rows as f64).ln()
}

/// Discriminative Information Criterion.
///
/// Returns `None` when `anti_log_likelihoods` is empty: the mean over the other
/// labels is undefined with fewer than two labels.
pub fn dic_score(log_likelihood: f64, anti_log_likelihoods: &[f64]) -> Option<f64> {
    mean(anti_log_likelihoods).map(|anti| log_likelihood - anti)
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_count_matches_hand_values() {
        assert_eq!(free_parameters(2, 6), 27);
        assert_eq!(free_parameters(3, 6), 44);
        assert_eq!(free_parameters(4, 6), 63);
    }

    #[test]
    fn bic_matches_hand_computation() {
        let score = bic_score(-100.0, 2, 6, 50);
        let expected = 200.0 + 27.0 * 50f64.ln();
        assert!((score - expected).abs() < 1e-12);
        assert!((score - 305.62).abs() < 0.01, "got {score}");
    }

    #[test]
    fn bic_penalty_grows_with_states() {
        let scores: Vec<f64> = (2..=8).map(|n| bic_score(-50.0, n, 4, 120)).collect();
        assert!(scores.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn dic_needs_other_labels() {
        assert_eq!(dic_score(-10.0, &[]), None);
        assert_eq!(dic_score(-10.0, &[-30.0, -50.0]), Some(30.0));
    }
}
