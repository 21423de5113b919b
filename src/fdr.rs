// ==============================================================================
// fdr.rs - Benjamini-Hochberg False Discovery Rate Adjustment
// ==============================================================================
// Description: Step-up BH adjusted p-values for one family of hypotheses
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::cmp::Ordering;

/// Benjamini-Hochberg adjusted p-values, returned in input order
///
/// # Algorithm
/// 1. Sort p-values ascending (stable), giving ranks i = 1..m
/// 2. Scale each: q_(i) = p_(i) * m / i
/// 3. Running minimum from the largest rank down: q_(i) = min(q_(i), q_(i+1))
/// 4. Cap at 1.0 and map back to the original positions
///
/// An empty slice yields an empty vector; a single p-value is returned as is.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        p_values[a]
            .partial_cmp(&p_values[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut adjusted = vec![0.0; m];
    let mut running_min = f64::INFINITY;

    for (rank0, &idx) in order.iter().enumerate().rev() {
        let rank = (rank0 + 1) as f64;
        let scaled = p_values[idx] * m as f64 / rank;
        running_min = running_min.min(scaled);
        adjusted[idx] = running_min.min(1.0);
    }

    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(benjamini_hochberg(&[]).is_empty());
    }

    #[test]
    fn test_single_value_unchanged() {
        assert_eq!(benjamini_hochberg(&[0.01]), vec![0.01]);
        assert_eq!(benjamini_hochberg(&[0.8]), vec![0.8]);
    }

    #[test]
    fn test_known_values() {
        // Matches statsmodels fdrcorrection / R p.adjust(method = "BH")
        let p = [0.01, 0.04, 0.03, 0.005];
        let adjusted = benjamini_hochberg(&p);
        assert_close(&adjusted, &[0.02, 0.04, 0.04, 0.02]);
    }

    #[test]
    fn test_step_up_running_minimum() {
        // Raw scaled values [0.03, 0.0375, 0.0333..] must be made monotone
        let p = [0.01, 0.025, 0.033333333333333333];
        let adjusted = benjamini_hochberg(&p);
        assert_close(&adjusted, &[0.03, 0.033333333333333333, 0.033333333333333333]);
    }

    #[test]
    fn test_capped_at_one() {
        let adjusted = benjamini_hochberg(&[0.9, 0.95, 0.99]);
        assert!(adjusted.iter().all(|&q| q <= 1.0));
        assert_close(&adjusted, &[0.99, 0.99, 0.99]);
    }

    #[test]
    fn test_monotone_in_raw_pvalue() {
        let p = [0.2, 0.001, 0.04, 0.04, 0.5, 0.0301, 0.9, 0.015];
        let adjusted = benjamini_hochberg(&p);
        for i in 0..p.len() {
            assert!(adjusted[i] >= p[i]);
            for j in 0..p.len() {
                if p[i] <= p[j] {
                    assert!(adjusted[i] <= adjusted[j], "p[{}]={} p[{}]={}", i, p[i], j, p[j]);
                }
            }
        }
    }
}
