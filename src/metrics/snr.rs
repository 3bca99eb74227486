use super::stats::{linregress_index, percentile};

const SIGNAL_FLOOR: f64 = 1e-6;
const NOISE_FLOOR: f64 = 1e-9;

/// Signal-to-noise ratio in dB.
///
/// Signal is the robust peak-to-peak spread (95th minus 5th percentile); noise
/// is the RMS of the data after removing its own least-squares line.
/// Fewer than 2 samples → 0.0.
pub fn snr_db(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }

    let mut signal_pp = percentile(data, 95.0) - percentile(data, 5.0);
    if signal_pp == 0.0 {
        signal_pp = SIGNAL_FLOOR;
    }

    let noise_rms = match linregress_index(data) {
        Ok(fit) => {
            let sum_sq: f64 = data
                .iter()
                .enumerate()
                .map(|(i, &v)| (v - fit.predict(i as f64)).powi(2))
                .sum();
            (sum_sq / data.len() as f64).sqrt()
        }
        Err(_) => 0.0,
    };
    let noise_rms = noise_rms.max(NOISE_FLOOR);

    20.0 * (signal_pp / noise_rms).log10()
}
