//! Property tests for the rank and z-score transform.
//!
//! Uses proptest to verify:
//! 1. Rank bounds - every rank lies in [1, N], missing values share max + 1
//! 2. Tie averaging - equal values always share one rank
//! 3. Rank mass - observed ranks sum to 1 + 2 + ... + (N - k)
//! 4. Standardization - z-scores have mean 0 and std-dev 1
//! 5. Capping - capped z-scores stay within [-3, 3]

use hobart_factors::{ZScore, rank_and_zscore};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

/// Columns drawn from a small integer grid so ties are common.
fn arb_column() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, (-20i32..20).prop_map(f64::from)), 1..80)
        .prop_filter("needs an observed value", |v| v.iter().any(Option::is_some))
}

/// Columns of distinct-ish continuous values.
fn arb_continuous() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6_f64, 2..120)
}

// ── 1-3. Ranks ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ranks_within_bounds(values in arb_column(), smaller in any::<bool>()) {
        let column = rank_and_zscore(&values, smaller).unwrap();
        let n = values.len() as f64;

        for (rank, value) in column.ranks.iter().zip(&values) {
            prop_assert!(*rank >= 1.0 && *rank <= n);
            if value.is_none() {
                prop_assert_eq!(*rank, column.missing_rank);
            } else {
                prop_assert!(*rank < column.missing_rank);
            }
        }
    }

    #[test]
    fn ties_share_rank(values in arb_column(), smaller in any::<bool>()) {
        let column = rank_and_zscore(&values, smaller).unwrap();

        for i in 0..values.len() {
            for j in 0..values.len() {
                if let (Some(a), Some(b)) = (values[i], values[j]) {
                    if a == b {
                        prop_assert_eq!(column.ranks[i], column.ranks[j]);
                    } else if (a < b) == smaller {
                        prop_assert!(column.ranks[i] < column.ranks[j]);
                    }
                }
            }
        }
    }

    #[test]
    fn observed_ranks_fill_one_to_m(values in arb_column(), smaller in any::<bool>()) {
        let column = rank_and_zscore(&values, smaller).unwrap();
        let m = values.iter().filter(|v| v.is_some()).count();

        let total: f64 = column
            .ranks
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_some())
            .map(|(r, _)| *r)
            .sum();
        prop_assert_eq!(total, (m * (m + 1)) as f64 / 2.0);
        prop_assert_eq!(column.observed, m);
    }
}

// ── 4-5. Z-scores ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn zscores_are_standardized(values in arb_continuous()) {
        let column: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let ranked = rank_and_zscore(&column, false).unwrap();
        prop_assume!(!ranked.is_degenerate());

        let z: Vec<f64> = ranked.zscores.iter().filter_map(|z| z.value()).collect();
        prop_assert_eq!(z.len(), values.len());

        let n = z.len() as f64;
        let mean = z.iter().sum::<f64>() / n;
        let std = (z.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
        prop_assert!(mean.abs() < 1e-9);
        prop_assert!((std - 1.0).abs() < 1e-9);
    }

    #[test]
    fn direction_flips_sign(values in arb_continuous()) {
        let column: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let up = rank_and_zscore(&column, false).unwrap();
        let down = rank_and_zscore(&column, true).unwrap();

        for (a, b) in up.zscores.iter().zip(&down.zscores) {
            match (a, b) {
                (ZScore::Value(x), ZScore::Value(y)) => prop_assert_eq!(*x, -*y),
                (x, y) => prop_assert_eq!(x, y),
            }
        }
    }

    #[test]
    fn capped_zscores_within_three(values in arb_column(), smaller in any::<bool>()) {
        let column = rank_and_zscore(&values, smaller).unwrap();

        for (z, capped) in column.zscores.iter().zip(&column.capped_zscores) {
            match (z, capped) {
                (ZScore::Value(raw), ZScore::Value(c)) => {
                    prop_assert!((-3.0..=3.0).contains(c));
                    if raw.abs() <= 3.0 {
                        prop_assert_eq!(raw, c);
                    }
                }
                (raw, c) => prop_assert_eq!(raw, c),
            }
        }
    }
}
