use serde::{Deserialize, Serialize};

/// Raw counting stats feeding the rate formulas. Any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountingInputs {
    pub ab: Option<f64>,
    pub h: Option<f64>,
    pub bb: Option<f64>,
    pub hbp: Option<f64>,
    pub sf: Option<f64>,
    pub tb: Option<f64>,
}

/// AVG / OBP / SLG / OPS. `None` means the stat is undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct RateStats {
    pub avg: Option<f64>,
    pub obp: Option<f64>,
    pub slg: Option<f64>,
    pub ops: Option<f64>,
}

/// Divides, mapping zero denominators and non-finite results to `None`.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator)
}

pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

// AVG = H / AB
pub fn batting_average(h: Option<f64>, ab: Option<f64>) -> Option<f64> {
    ratio(h?, ab?)
}

// OBP = (H + BB + HBP) / (AB + BB + HBP + SF)
pub fn on_base_percentage(
    h: Option<f64>,
    bb: Option<f64>,
    hbp: Option<f64>,
    ab: Option<f64>,
    sf: Option<f64>,
) -> Option<f64> {
    let (h, bb, hbp, ab, sf) = (h?, bb?, hbp?, ab?, sf?);
    ratio(h + bb + hbp, ab + bb + hbp + sf)
}

// SLG = TB / AB
pub fn slugging(tb: Option<f64>, ab: Option<f64>) -> Option<f64> {
    ratio(tb?, ab?)
}

// OPS = OBP + SLG
pub fn on_base_plus_slugging(obp: Option<f64>, slg: Option<f64>) -> Option<f64> {
    finite(obp? + slg?)
}

impl RateStats {
    /// Computes every rate stat from raw counts.
    pub fn from_counts(counts: &CountingInputs) -> Self {
        Self::resolve(counts, &RateStats::default())
    }

    /// Fills in the rate stats missing from `known` using `counts`.
    ///
    /// Values already present in `known` always win, and OPS is taken as
    /// OBP + SLG whenever both are available so the three stay consistent
    /// with upstream data.
    pub fn resolve(counts: &CountingInputs, known: &RateStats) -> Self {
        let avg = known
            .avg
            .and_then(finite)
            .or_else(|| batting_average(counts.h, counts.ab));
        let obp = known.obp.and_then(finite).or_else(|| {
            on_base_percentage(counts.h, counts.bb, counts.hbp, counts.ab, counts.sf)
        });
        let slg = known
            .slg
            .and_then(finite)
            .or_else(|| slugging(counts.tb, counts.ab));
        let ops = known
            .ops
            .and_then(finite)
            .or_else(|| on_base_plus_slugging(obp, slg));

        RateStats { avg, obp, slg, ops }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(ab: f64, h: f64, bb: f64, hbp: f64, sf: f64, tb: f64) -> CountingInputs {
        CountingInputs {
            ab: Some(ab),
            h: Some(h),
            bb: Some(bb),
            hbp: Some(hbp),
            sf: Some(sf),
            tb: Some(tb),
        }
    }

    #[test]
    fn test_standard_line() {
        let rates = RateStats::from_counts(&counts(4.0, 2.0, 1.0, 0.0, 0.0, 5.0));
        assert_eq!(rates.avg, Some(0.5));
        assert_eq!(rates.obp, Some(0.6));
        assert_eq!(rates.slg, Some(1.25));
        assert!((rates.ops.unwrap() - 1.85).abs() < 1e-12);
    }

    #[test]
    fn test_zero_at_bats_leaves_avg_and_slg_undefined() {
        // Walked twice, no official at-bats.
        let rates = RateStats::from_counts(&counts(0.0, 0.0, 2.0, 0.0, 0.0, 0.0));
        assert_eq!(rates.avg, None);
        assert_eq!(rates.slg, None);
        assert_eq!(rates.obp, Some(1.0));
        assert_eq!(rates.ops, None);
    }

    #[test]
    fn test_empty_line_is_all_undefined() {
        let rates = RateStats::from_counts(&counts(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(rates, RateStats::default());
    }

    #[test]
    fn test_missing_input_is_undefined_not_error() {
        let mut line = counts(3.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        line.hbp = None;
        let rates = RateStats::from_counts(&line);
        assert!(rates.avg.is_some());
        assert_eq!(rates.obp, None);
        assert_eq!(rates.ops, None);
    }

    #[test]
    fn test_ratio_never_returns_non_finite() {
        assert_eq!(ratio(1.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(f64::NAN, 2.0), None);
        assert_eq!(ratio(f64::INFINITY, 2.0), None);
    }

    #[test]
    fn test_precomputed_values_are_preferred() {
        let known = RateStats {
            avg: Some(0.333),
            obp: Some(0.4),
            slg: Some(0.5),
            ops: None,
        };
        let rates = RateStats::resolve(&counts(4.0, 2.0, 1.0, 0.0, 0.0, 5.0), &known);
        assert_eq!(rates.avg, Some(0.333));
        assert_eq!(rates.obp, Some(0.4));
        assert_eq!(rates.slg, Some(0.5));
        assert!((rates.ops.unwrap() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_precomputed_value_is_recomputed() {
        let known = RateStats {
            avg: Some(f64::NAN),
            ..Default::default()
        };
        let rates = RateStats::resolve(&counts(4.0, 1.0, 0.0, 0.0, 0.0, 1.0), &known);
        assert_eq!(rates.avg, Some(0.25));
    }

    #[test]
    fn test_ops_direct_matches_sum_of_components() {
        let lines = [
            counts(4.0, 2.0, 1.0, 0.0, 0.0, 5.0),
            counts(550.0, 160.0, 70.0, 6.0, 5.0, 290.0),
            counts(3.0, 0.0, 0.0, 1.0, 1.0, 0.0),
        ];
        for line in &lines {
            let rates = RateStats::from_counts(line);
            let direct = on_base_percentage(line.h, line.bb, line.hbp, line.ab, line.sf).unwrap()
                + slugging(line.tb, line.ab).unwrap();
            assert!((rates.ops.unwrap() - direct).abs() < 1e-12);
        }
    }
}
