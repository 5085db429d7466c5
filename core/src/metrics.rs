//! Derives the A1 (coverage bias) and A2 (angular skew) descriptors from a
//! scanning matrix.

use crate::geometry::AngularPartition;
use crate::stats::normalized_trapezoid;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Collapse rule from per-threshold statistics to one scalar per signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Trapezoidal area under the per-threshold curve, rescaled to a mean
    /// height so sweeps of different lengths stay comparable.
    AreaUnderCurve,
    Maximum,
    Mean,
}

/// Descriptor pair for one signal. Fields are `None` only when every
/// threshold row of the scanning matrix carried zero qualifying weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalMetrics {
    /// A1: non-uniformity of sector coverage, 0 for perfectly even spread,
    /// 1 when all qualifying weight sits in a single sector.
    pub coverage_bias: Option<f64>,
    /// A2: mean resultant length of the sector-weight distribution, 0 for a
    /// directionally balanced spread, approaching 1 for a single direction.
    pub angular_skew: Option<f64>,
    /// Threshold rows that carried qualifying weight and entered the
    /// aggregate.
    pub evaluated_rows: usize,
}

/// Computes A1 and A2 for one M x K scanning matrix.
///
/// Rows with zero total weight are excluded from aggregation rather than
/// scored as zero; treating them as "no bias" would drag the aggregate
/// toward uniformity exactly where no data qualified.
pub fn compute_metrics(
    rsp: ArrayView2<f64>,
    partition: &AngularPartition,
    aggregation: Aggregation,
) -> SignalMetrics {
    let k = partition.sectors() as f64;
    let mut bias_rows = Vec::with_capacity(rsp.nrows());
    let mut skew_rows = Vec::with_capacity(rsp.nrows());

    for row in rsp.rows() {
        let total: f64 = row.sum();
        if total <= 0.0 {
            continue;
        }
        let mut sum_sq = 0.0;
        let mut resultant_x = 0.0;
        let mut resultant_y = 0.0;
        for (sector, &weight) in row.iter().enumerate() {
            let share = weight / total;
            sum_sq += share * share;
            let theta = partition.central_angle(sector);
            resultant_x += share * theta.cos();
            resultant_y += share * theta.sin();
        }
        // Normalized so a uniform row scores 0 and a single-sector row 1.
        bias_rows.push(((k * sum_sq - 1.0) / (k - 1.0)).max(0.0));
        skew_rows.push(resultant_x.hypot(resultant_y));
    }

    SignalMetrics {
        coverage_bias: aggregate(&bias_rows, aggregation),
        angular_skew: aggregate(&skew_rows, aggregation),
        evaluated_rows: bias_rows.len(),
    }
}

fn aggregate(rows: &[f64], aggregation: Aggregation) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(match aggregation {
        Aggregation::AreaUnderCurve => normalized_trapezoid(rows),
        Aggregation::Maximum => rows.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregation::Mean => rows.iter().sum::<f64>() / rows.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use std::f64::consts::TAU;

    fn quadrants() -> AngularPartition {
        AngularPartition::new(4, 0.0).unwrap()
    }

    #[test]
    fn uniform_row_scores_zero_bias_and_skew() {
        let rsp = array![[25.0, 25.0, 25.0, 25.0]];
        let metrics = compute_metrics(rsp.view(), &quadrants(), Aggregation::Mean);
        assert!(metrics.coverage_bias.unwrap().abs() < 1e-12);
        assert!(metrics.angular_skew.unwrap().abs() < 1e-12);
        assert_eq!(metrics.evaluated_rows, 1);
    }

    #[test]
    fn single_sector_row_scores_maximal_bias_and_skew() {
        let rsp = array![[100.0, 0.0, 0.0, 0.0]];
        let metrics = compute_metrics(rsp.view(), &quadrants(), Aggregation::Mean);
        assert!((metrics.coverage_bias.unwrap() - 1.0).abs() < 1e-12);
        assert!((metrics.angular_skew.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposed_sectors_cancel_skew_but_not_bias() {
        let rsp = array![[50.0, 0.0, 50.0, 0.0]];
        let metrics = compute_metrics(rsp.view(), &quadrants(), Aggregation::Mean);
        assert!(metrics.coverage_bias.unwrap() > 0.2);
        assert!(metrics.angular_skew.unwrap().abs() < 1e-12);
    }

    #[test]
    fn empty_rows_are_excluded_from_the_aggregate() {
        let rsp = array![[100.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]];
        let metrics = compute_metrics(rsp.view(), &quadrants(), Aggregation::Mean);
        assert_eq!(metrics.evaluated_rows, 1);
        assert!((metrics.coverage_bias.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_empty_matrix_yields_undefined_markers() {
        let rsp = Array2::<f64>::zeros((3, 4));
        let metrics = compute_metrics(rsp.view(), &quadrants(), Aggregation::Mean);
        assert_eq!(metrics.coverage_bias, None);
        assert_eq!(metrics.angular_skew, None);
        assert_eq!(metrics.evaluated_rows, 0);
    }

    #[test]
    fn aggregation_strategies_collapse_rows_differently() {
        let rsp = array![
            [25.0, 25.0, 25.0, 25.0],
            [50.0, 0.0, 0.0, 0.0],
        ];
        let mean = compute_metrics(rsp.view(), &quadrants(), Aggregation::Mean);
        let max = compute_metrics(rsp.view(), &quadrants(), Aggregation::Maximum);
        let auc = compute_metrics(rsp.view(), &quadrants(), Aggregation::AreaUnderCurve);
        assert!((mean.coverage_bias.unwrap() - 0.5).abs() < 1e-12);
        assert!((max.coverage_bias.unwrap() - 1.0).abs() < 1e-12);
        assert!((auc.coverage_bias.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn bias_is_invariant_under_sector_width_rotations() {
        // Rotating the frame by whole sector widths relabels sectors without
        // changing the weight multiset, so A1 and A2 must not move.
        let partition = AngularPartition::new(4, 0.0).unwrap();
        let angles: Vec<f64> = (0..200).map(|i| TAU * (i as f64) / 200.0).collect();
        let values = vec![1.0; 200];
        let sweep = crate::scan::ThresholdSweep::generate(
            &values,
            1,
            crate::scan::ThresholdMethod::Linear,
            None,
            None,
        )
        .unwrap();
        let base_sectors = partition.assign_all(&angles);
        let base_rsp = crate::scan::build_rsp(
            &base_sectors,
            &values,
            &sweep,
            4,
            crate::scan::Weighting::Count,
        )
        .unwrap();
        let base = compute_metrics(base_rsp.view(), &partition, Aggregation::Mean);

        for step in 1..4 {
            let rotated = partition.rotated(step as f64 * partition.width());
            let sectors = rotated.assign_all(&angles);
            let rsp = crate::scan::build_rsp(
                &sectors,
                &values,
                &sweep,
                4,
                crate::scan::Weighting::Count,
            )
            .unwrap();
            let shifted = compute_metrics(rsp.view(), &rotated, Aggregation::Mean);
            assert!(
                (base.coverage_bias.unwrap() - shifted.coverage_bias.unwrap()).abs() < 1e-9
            );
            assert!((base.angular_skew.unwrap() - shifted.angular_skew.unwrap()).abs() < 1e-9);
        }
    }
}
