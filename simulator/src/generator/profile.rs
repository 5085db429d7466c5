use anyhow::{ensure, Context};
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rspcore::batch::SignalVector;
use rspcore::geometry::within_window;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Configuration for generating a synthetic embedding and signal panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub points: usize,
    pub signals: usize,
    /// Fraction of signals planted with a directional cluster.
    pub structured_fraction: f64,
    /// Angular width of the planted cluster window, radians.
    pub cluster_width: f64,
    pub base_level: f64,
    /// Added on top of the base level inside a planted cluster.
    pub boost: f64,
    pub noise: f64,
    pub seed: u64,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            points: 2000,
            signals: 50,
            structured_fraction: 0.3,
            cluster_width: TAU / 8.0,
            base_level: 1.0,
            boost: 4.0,
            noise: 0.25,
            seed: 0,
            description: None,
        }
    }
}

/// Synthetic embedding plus signal panel consumed by the workflow runner.
pub struct Dataset {
    pub coordinates: Array2<f64>,
    pub signals: Vec<SignalVector>,
}

/// Builds a uniform-disc embedding and a panel of signals: a structured
/// share with a planted directional cluster, a flat remainder, and one
/// constant signal to exercise the degenerate-sweep path.
pub fn build_dataset(config: &GeneratorConfig) -> anyhow::Result<Dataset> {
    ensure!(config.points >= 3, "need at least 3 points, got {}", config.points);
    ensure!(config.signals >= 1, "need at least 1 signal");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut coordinates = Array2::zeros((config.points, 2));
    let mut angles = Vec::with_capacity(config.points);
    for i in 0..config.points {
        let theta = rng.gen_range(0.0..TAU);
        // sqrt keeps the disc uniform by area rather than piling up centrally
        let radius = rng.gen::<f64>().sqrt();
        coordinates[[i, 0]] = radius * theta.cos();
        coordinates[[i, 1]] = radius * theta.sin();
        angles.push(theta);
    }

    let structured = (config.signals as f64 * config.structured_fraction).round() as usize;
    let mut signals = Vec::with_capacity(config.signals);
    for index in 0..config.signals {
        if index + 1 == config.signals {
            signals.push(SignalVector::new(
                "constant",
                vec![config.base_level; config.points],
            ));
            continue;
        }
        let values = if index < structured {
            let direction = rng.gen_range(0.0..TAU);
            let inside = within_window(&angles, direction, config.cluster_width)
                .context("building the planted cluster window")?;
            inside
                .iter()
                .map(|&in_cluster| {
                    let boost = if in_cluster { config.boost } else { 0.0 };
                    config.base_level + boost + jitter(&mut rng, config.noise)
                })
                .collect()
        } else {
            (0..config.points)
                .map(|_| config.base_level + jitter(&mut rng, config.noise))
                .collect()
        };
        signals.push(SignalVector::new(format!("signal-{:03}", index), values));
    }

    Ok(Dataset {
        coordinates,
        signals,
    })
}

fn jitter(rng: &mut StdRng, noise: f64) -> f64 {
    if noise > 0.0 {
        rng.gen_range(-noise..noise)
    } else {
        0.0
    }
}
