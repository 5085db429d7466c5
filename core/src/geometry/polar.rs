use crate::{RspError, RspResult};
use ndarray::ArrayView2;
use std::collections::HashSet;
use std::f64::consts::{PI, TAU};

/// An embedding converted to polar form around a fixed vantage point.
///
/// Built once per analysis run and shared read-only across every signal
/// evaluated against the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarEmbedding {
    center: (f64, f64),
    radius: Vec<f64>,
    angle: Vec<f64>,
}

impl PolarEmbedding {
    /// Converts an N x 2 coordinate matrix to (radius, angle) pairs. The
    /// vantage point defaults to the arithmetic centroid when not supplied;
    /// angles land in [0, 2pi).
    pub fn from_coordinates(
        coordinates: ArrayView2<f64>,
        center: Option<(f64, f64)>,
    ) -> RspResult<Self> {
        if coordinates.ncols() != 2 {
            return Err(RspError::InvalidGeometry(format!(
                "expected an N x 2 coordinate matrix, got N x {}",
                coordinates.ncols()
            )));
        }
        let n = coordinates.nrows();
        if n < 3 {
            return Err(RspError::InvalidGeometry(format!(
                "need at least 3 points, got {}",
                n
            )));
        }
        if coordinates.iter().any(|v| !v.is_finite()) {
            return Err(RspError::InvalidGeometry(
                "coordinates contain non-finite values".into(),
            ));
        }

        let mut distinct = HashSet::new();
        for row in coordinates.rows() {
            distinct.insert((row[0].to_bits(), row[1].to_bits()));
            if distinct.len() >= 3 {
                break;
            }
        }
        if distinct.len() == 1 {
            return Err(RspError::InvalidGeometry(
                "all points are coincident; angles are undefined".into(),
            ));
        }
        if distinct.len() < 3 {
            return Err(RspError::InvalidGeometry(format!(
                "need at least 3 distinct points, got {}",
                distinct.len()
            )));
        }

        let center = center.unwrap_or_else(|| {
            let sum = coordinates
                .rows()
                .into_iter()
                .fold((0.0, 0.0), |acc, row| (acc.0 + row[0], acc.1 + row[1]));
            (sum.0 / n as f64, sum.1 / n as f64)
        });

        let mut radius = Vec::with_capacity(n);
        let mut angle = Vec::with_capacity(n);
        for row in coordinates.rows() {
            let dx = row[0] - center.0;
            let dy = row[1] - center.1;
            radius.push(dx.hypot(dy));
            angle.push(dy.atan2(dx).rem_euclid(TAU));
        }

        Ok(Self {
            center,
            radius,
            angle,
        })
    }

    pub fn len(&self) -> usize {
        self.angle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angle.is_empty()
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn radii(&self) -> &[f64] {
        &self.radius
    }

    pub fn angles(&self) -> &[f64] {
        &self.angle
    }
}

/// Recentres `angles` around `center_angle`, returning offsets in [-pi, pi).
pub fn shift_angles(angles: &[f64], center_angle: f64) -> Vec<f64> {
    angles
        .iter()
        .map(|&a| (a - center_angle + PI).rem_euclid(TAU) - PI)
        .collect()
}

/// Membership mask for an angular window of `width` radians centred on
/// `center_angle`. The width must lie in (0, 2pi].
pub fn within_window(angles: &[f64], center_angle: f64, width: f64) -> RspResult<Vec<bool>> {
    if !(width > 0.0 && width <= TAU) {
        return Err(RspError::InvalidPartition(format!(
            "window width must be in (0, 2pi], got {}",
            width
        )));
    }
    let half = width / 2.0;
    Ok(angles
        .iter()
        .map(|&a| ((a - center_angle + PI).rem_euclid(TAU) - PI).abs() <= half)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn centroid_is_default_vantage_point() {
        let coords = array![[0.0, 0.0], [2.0, 0.0], [0.0, 2.0], [2.0, 2.0]];
        let polar = PolarEmbedding::from_coordinates(coords.view(), None).unwrap();
        assert_eq!(polar.center(), (1.0, 1.0));
        assert_eq!(polar.len(), 4);
        for &r in polar.radii() {
            assert!((r - std::f64::consts::SQRT_2).abs() < 1e-12);
        }
    }

    #[test]
    fn explicit_center_overrides_centroid() {
        let coords = array![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]];
        let polar = PolarEmbedding::from_coordinates(coords.view(), Some((0.0, 0.0))).unwrap();
        assert_eq!(polar.center(), (0.0, 0.0));
        assert!((polar.angles()[0] - 0.0).abs() < 1e-12);
        assert!((polar.angles()[1] - PI / 2.0).abs() < 1e-12);
        assert!((polar.angles()[2] - PI).abs() < 1e-12);
    }

    #[test]
    fn angles_stay_in_full_turn_range() {
        let coords = array![[1.0, -1.0], [-1.0, -1.0], [0.0, 1.0]];
        let polar = PolarEmbedding::from_coordinates(coords.view(), Some((0.0, 0.0))).unwrap();
        for &a in polar.angles() {
            assert!((0.0..TAU).contains(&a));
        }
    }

    #[test]
    fn fewer_than_three_points_is_invalid() {
        let coords = array![[0.0, 0.0], [1.0, 1.0]];
        let err = PolarEmbedding::from_coordinates(coords.view(), None).unwrap_err();
        assert!(matches!(err, RspError::InvalidGeometry(_)));
    }

    #[test]
    fn duplicated_points_do_not_count_as_distinct() {
        let coords = array![[0.0, 0.0], [0.0, 0.0], [1.0, 1.0], [1.0, 1.0]];
        let err = PolarEmbedding::from_coordinates(coords.view(), None).unwrap_err();
        assert!(matches!(err, RspError::InvalidGeometry(_)));
    }

    #[test]
    fn coincident_cloud_is_invalid() {
        let coords = array![[3.0, 4.0], [3.0, 4.0], [3.0, 4.0]];
        let err = PolarEmbedding::from_coordinates(coords.view(), None).unwrap_err();
        assert!(matches!(err, RspError::InvalidGeometry(_)));
    }

    #[test]
    fn non_finite_coordinates_are_invalid() {
        let coords = array![[0.0, 0.0], [1.0, f64::NAN], [2.0, 2.0]];
        assert!(PolarEmbedding::from_coordinates(coords.view(), None).is_err());
    }

    #[test]
    fn shift_angles_recentres_to_half_open_interval() {
        let shifted = shift_angles(&[0.0, PI / 2.0, PI, 3.0 * PI / 2.0], PI / 2.0);
        assert!((shifted[0] + PI / 2.0).abs() < 1e-12);
        assert!(shifted[1].abs() < 1e-12);
        assert!((shifted[2] - PI / 2.0).abs() < 1e-12);
        assert!((shifted[3] + PI).abs() < 1e-12);
    }

    #[test]
    fn within_window_wraps_across_zero() {
        let mask = within_window(&[0.1, TAU - 0.1, PI], 0.0, 0.5).unwrap();
        assert_eq!(mask, vec![true, true, false]);
    }

    #[test]
    fn within_window_rejects_bad_width() {
        assert!(within_window(&[0.0], 0.0, 0.0).is_err());
        assert!(within_window(&[0.0], 0.0, TAU + 0.1).is_err());
    }
}
