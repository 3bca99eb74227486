//! Synthetic sensor signals for demos and regression tests.
//!
//! Every profile is a 10·sin(t) carrier over `t = linspace(0, 10, length)`
//! plus Gaussian noise; pass a seed for reproducible output.

use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CARRIER_AMPLITUDE: f64 = 10.0;
const TIME_SPAN: f64 = 10.0;
const DRIFT_TOTAL: f64 = 5.0;
const OSCILLATION_AMPLITUDE: f64 = 5.0;
const OSCILLATION_FREQUENCY: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalProfile {
    /// Carrier with light noise (σ 0.5)
    Normal,
    /// Light noise plus a linear 0→5 drift
    Drifting,
    /// Heavy noise (σ 3.0)
    Noisy,
    /// Fast 5·sin(10t) oscillation with σ 0.2 noise
    Oscillation,
}

impl SignalProfile {
    pub const ALL: [SignalProfile; 4] = [
        SignalProfile::Normal,
        SignalProfile::Drifting,
        SignalProfile::Noisy,
        SignalProfile::Oscillation,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Drifting => "Drifting",
            Self::Noisy => "Noisy",
            Self::Oscillation => "Oscillation",
        }
    }

    fn noise_sigma(self) -> f64 {
        match self {
            Self::Normal | Self::Drifting => 0.5,
            Self::Noisy => 3.0,
            Self::Oscillation => 0.2,
        }
    }
}

impl fmt::Display for SignalProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignalProfile {
    type Err = SyntheticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SyntheticError::UnknownProfile(s.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntheticError {
    #[error("Unknown signal profile '{0}' (expected Normal, Drifting, Noisy or Oscillation)")]
    UnknownProfile(String),

    #[error("Signal length must be at least 1")]
    EmptySignal,

    #[error("Invalid noise distribution: {0}")]
    Distribution(String),
}

/// Generated samples with their time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSignal {
    pub t: Vec<f64>,
    pub values: Vec<f64>,
}

/// Generate `length` samples of `profile`. `seed = None` draws from entropy.
pub fn generate(
    profile: SignalProfile,
    length: usize,
    seed: Option<u64>,
) -> Result<SyntheticSignal, SyntheticError> {
    if length == 0 {
        return Err(SyntheticError::EmptySignal);
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let noise = Normal::new(0.0, profile.noise_sigma())
        .map_err(|e| SyntheticError::Distribution(e.to_string()))?;

    let t = linspace(0.0, TIME_SPAN, length);
    let drift = linspace(0.0, DRIFT_TOTAL, length);

    let values = t
        .iter()
        .zip(&drift)
        .map(|(&ti, &di)| {
            let carrier = ti.sin() * CARRIER_AMPLITUDE;
            let shape = match profile {
                SignalProfile::Drifting => di,
                SignalProfile::Oscillation => (ti * OSCILLATION_FREQUENCY).sin() * OSCILLATION_AMPLITUDE,
                SignalProfile::Normal | SignalProfile::Noisy => 0.0,
            };
            carrier + shape + noise.sample(&mut rng)
        })
        .collect();

    Ok(SyntheticSignal { t, values })
}

/// `n` evenly spaced points from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
