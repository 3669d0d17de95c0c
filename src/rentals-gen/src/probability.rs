use std::collections::HashMap;

/// 1-based dense ranks over the distinct values in `counts`, descending.
/// The highest count gets rank 1 and ties share a rank.
pub fn dense_ranks(counts: &[u64]) -> Vec<usize> {
    let mut distinct = counts.to_vec();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();
    let rank_of: HashMap<u64, usize> = distinct
        .into_iter()
        .enumerate()
        .map(|(idx, count)| (count, idx + 1))
        .collect();
    counts.iter().map(|c| rank_of[c]).collect()
}

/// Power-law weight for one dense rank. The rank is shifted by one before
/// exponentiation: rank 1 weighs 1/2^alpha rather than 1.
pub fn zipfian_weight(rank: usize, alpha: f64) -> f64 {
    1.0 / ((rank + 1) as f64).powf(alpha)
}

/// Scales weights in place to sum to 1.0. A zero total falls back to uniform.
pub fn normalize(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    } else {
        let uniform = 1.0 / weights.len() as f64;
        for w in weights.iter_mut() {
            *w = uniform;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_ranks_descending() {
        assert_eq!(dense_ranks(&[50, 10, 0]), vec![1, 2, 3]);
        assert_eq!(dense_ranks(&[0, 50, 10]), vec![3, 1, 2]);
    }

    #[test]
    fn test_dense_ranks_ties_share_rank() {
        assert_eq!(dense_ranks(&[7, 7, 3, 0, 0]), vec![1, 1, 2, 3, 3]);
        assert_eq!(dense_ranks(&[5, 5, 5]), vec![1, 1, 1]);
    }

    #[test]
    fn test_zipfian_weight_shifts_rank() {
        assert_eq!(zipfian_weight(1, 1.0), 0.5);
        assert_eq!(zipfian_weight(3, 1.0), 0.25);
        assert_eq!(zipfian_weight(1, 2.0), 0.25);
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let mut weights = vec![0.5, 1.0 / 3.0, 0.25];
        normalize(&mut weights);
        let total: f64 = weights.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((weights[0] - 6.0 / 13.0).abs() < 1e-9);
        assert!((weights[1] - 4.0 / 13.0).abs() < 1e-9);
        assert!((weights[2] - 3.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_zero_total_goes_uniform() {
        let mut weights = vec![0.0, 0.0, 0.0, 0.0];
        normalize(&mut weights);
        for w in weights {
            assert!((w - 0.25).abs() < 1e-9);
        }
    }
}
