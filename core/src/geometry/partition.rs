use crate::{RspError, RspResult};
use std::f64::consts::TAU;

/// Fixed partition of the full circle into K equal-width sectors.
///
/// Sector boundaries are frozen for a whole run so scanning matrices built
/// across thresholds, signals, and null replicates stay directly comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularPartition {
    sectors: usize,
    offset: f64,
}

impl AngularPartition {
    pub fn new(sectors: usize, offset: f64) -> RspResult<Self> {
        if sectors < 2 {
            return Err(RspError::InvalidPartition(format!(
                "need at least 2 sectors, got {}",
                sectors
            )));
        }
        Ok(Self {
            sectors,
            offset: offset.rem_euclid(TAU),
        })
    }

    pub fn sectors(&self) -> usize {
        self.sectors
    }

    /// Angular width of one sector, 2pi / K.
    pub fn width(&self) -> f64 {
        TAU / self.sectors as f64
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Sector index for one angle. Assignment is half-open and
    /// lower-inclusive: a point exactly on a boundary belongs to the sector
    /// whose range starts there.
    pub fn assign(&self, angle: f64) -> usize {
        let relative = (angle - self.offset).rem_euclid(TAU);
        let index = (relative / self.width()) as usize;
        // rem_euclid can round up to exactly 2pi for angles a hair below the
        // offset, which would index one past the last sector.
        index.min(self.sectors - 1)
    }

    pub fn assign_all(&self, angles: &[f64]) -> Vec<usize> {
        angles.iter().map(|&a| self.assign(a)).collect()
    }

    /// Absolute central angle of sector `index`, in [0, 2pi).
    pub fn central_angle(&self, index: usize) -> f64 {
        (self.offset + (index as f64 + 0.5) * self.width()).rem_euclid(TAU)
    }

    /// The same partition rotated by `delta` radians. Used by the rotation
    /// null, which re-bins fixed points against a randomly shifted frame.
    pub fn rotated(&self, delta: f64) -> Self {
        Self {
            sectors: self.sectors,
            offset: (self.offset + delta).rem_euclid(TAU),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn quadrant_partition_assigns_by_quadrant() {
        let partition = AngularPartition::new(4, 0.0).unwrap();
        assert_eq!(partition.assign(0.1), 0);
        assert_eq!(partition.assign(FRAC_PI_2 + 0.1), 1);
        assert_eq!(partition.assign(PI + 0.1), 2);
        assert_eq!(partition.assign(TAU - 0.1), 3);
    }

    #[test]
    fn boundary_angle_joins_the_sector_it_starts() {
        let partition = AngularPartition::new(4, 0.0).unwrap();
        assert_eq!(partition.assign(0.0), 0);
        assert_eq!(partition.assign(FRAC_PI_2), 1);
        assert_eq!(partition.assign(PI), 2);
    }

    #[test]
    fn offset_shifts_sector_zero() {
        let partition = AngularPartition::new(4, FRAC_PI_2).unwrap();
        assert_eq!(partition.assign(FRAC_PI_2), 0);
        assert_eq!(partition.assign(0.0), 3);
    }

    #[test]
    fn fewer_than_two_sectors_is_invalid() {
        assert!(matches!(
            AngularPartition::new(1, 0.0),
            Err(RspError::InvalidPartition(_))
        ));
        assert!(matches!(
            AngularPartition::new(0, 0.0),
            Err(RspError::InvalidPartition(_))
        ));
    }

    #[test]
    fn central_angles_sit_mid_sector() {
        let partition = AngularPartition::new(4, 0.0).unwrap();
        assert!((partition.central_angle(0) - FRAC_PI_2 / 2.0).abs() < 1e-12);
        assert!((partition.central_angle(2) - (PI + FRAC_PI_2 / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn rotation_by_full_turn_is_identity() {
        let partition = AngularPartition::new(8, 0.3).unwrap();
        let rotated = partition.rotated(TAU);
        for angle in [0.0, 1.0, 2.5, 4.0, 6.0] {
            assert_eq!(partition.assign(angle), rotated.assign(angle));
        }
    }

    #[test]
    fn assignment_never_exceeds_sector_range() {
        let partition = AngularPartition::new(6, 0.123).unwrap();
        for i in 0..1000 {
            let angle = TAU * i as f64 / 1000.0;
            assert!(partition.assign(angle) < partition.sectors());
        }
    }
}
