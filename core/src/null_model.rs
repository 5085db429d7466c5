//! Randomized replicates backing the empirical null distributions for the
//! A1/A2 descriptors.

use crate::geometry::{AngularPartition, PolarEmbedding};
use crate::metrics::{compute_metrics, Aggregation};
use crate::scan::{build_rsp, ThresholdSweep, Weighting};
use crate::RspResult;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Randomization scheme behind the null distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullStrategy {
    /// Shuffle the value-to-point assignment; the layout stays fixed. Breaks
    /// any spatial association while preserving the value distribution.
    LabelPermutation,
    /// Re-bin fixed points against a randomly rotated partition; values stay
    /// attached to their points. Breaks directional bias relative to the
    /// original frame while preserving spatial clustering.
    Rotation,
}

/// Empirical (A1, A2) samples for one signal. Replicates whose scanning
/// matrix came out entirely empty are skipped, so the vectors may be shorter
/// than the replicate count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NullDistribution {
    pub coverage_bias: Vec<f64>,
    pub angular_skew: Vec<f64>,
}

impl NullDistribution {
    pub fn len(&self) -> usize {
        self.coverage_bias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coverage_bias.is_empty()
    }
}

/// One independent RNG stream per (signal, replicate) pair, derived from the
/// master seed by a splitmix-style mixer. Parallel scheduling therefore
/// cannot change which randomness a replicate draws.
pub fn replicate_rng(master_seed: u64, signal_index: usize, replicate: usize) -> StdRng {
    let mut state = mix64(master_seed ^ 0x5851_f42d_4c95_7f2d);
    state = mix64(state ^ signal_index as u64);
    state = mix64(state ^ replicate as u64);
    StdRng::seed_from_u64(state)
}

fn mix64(mut value: u64) -> u64 {
    value = (value ^ (value >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    value ^ (value >> 31)
}

/// Runs the full builder + metric pipeline on randomized replicates of one
/// signal, sharing the immutable embedding and partition.
pub struct NullModel<'a> {
    embedding: &'a PolarEmbedding,
    partition: AngularPartition,
    strategy: NullStrategy,
    weighting: Weighting,
    aggregation: Aggregation,
    num_permutations: usize,
}

impl<'a> NullModel<'a> {
    pub fn new(
        embedding: &'a PolarEmbedding,
        partition: AngularPartition,
        strategy: NullStrategy,
        weighting: Weighting,
        aggregation: Aggregation,
        num_permutations: usize,
    ) -> Self {
        Self {
            embedding,
            partition,
            strategy,
            weighting,
            aggregation,
            num_permutations,
        }
    }

    /// Collects the null samples for one signal. Each replicate owns its
    /// seeded RNG stream, so the output is identical across thread schedules.
    pub fn sample(
        &self,
        sectors: &[usize],
        values: &[f64],
        sweep: &ThresholdSweep,
        master_seed: u64,
        signal_index: usize,
    ) -> RspResult<NullDistribution> {
        let samples: Vec<(Option<f64>, Option<f64>)> = (0..self.num_permutations)
            .into_par_iter()
            .map(|replicate| {
                let mut rng = replicate_rng(master_seed, signal_index, replicate);
                let metrics = match self.strategy {
                    NullStrategy::LabelPermutation => {
                        let mut shuffled = values.to_vec();
                        shuffled.shuffle(&mut rng);
                        let rsp = build_rsp(
                            sectors,
                            &shuffled,
                            sweep,
                            self.partition.sectors(),
                            self.weighting,
                        )?;
                        compute_metrics(rsp.view(), &self.partition, self.aggregation)
                    }
                    NullStrategy::Rotation => {
                        let rotated = self.partition.rotated(rng.gen_range(0.0..TAU));
                        let rotated_sectors = rotated.assign_all(self.embedding.angles());
                        let rsp = build_rsp(
                            &rotated_sectors,
                            values,
                            sweep,
                            rotated.sectors(),
                            self.weighting,
                        )?;
                        compute_metrics(rsp.view(), &rotated, self.aggregation)
                    }
                };
                Ok((metrics.coverage_bias, metrics.angular_skew))
            })
            .collect::<RspResult<Vec<_>>>()?;

        let mut null = NullDistribution::default();
        for (bias, skew) in samples {
            if let (Some(a1), Some(a2)) = (bias, skew) {
                null.coverage_bias.push(a1);
                null.angular_skew.push(a2);
            }
        }
        Ok(null)
    }
}
