//! Smoothing filters: zero-padded median, centered moving average, and
//! Savitzky-Golay polynomial smoothing.

use super::ProcessingError;
use crate::metrics::stats::{polyfit, solve};

/// Median filter with an odd `kernel`, zero-padded at both edges.
///
/// Even kernels are widened by one. Edge samples see zeros for the
/// out-of-range neighbours, so the first and last outputs are
/// `median(0, x0, x1)` and `median(x[n-2], x[n-1], 0)` for kernel 3.
pub fn median_filter(data: &[f64], kernel: usize) -> Vec<f64> {
    let kernel = if kernel % 2 == 0 { kernel + 1 } else { kernel };
    let half = kernel / 2;
    let n = data.len();
    let mut window = Vec::with_capacity(kernel);

    (0..n)
        .map(|i| {
            window.clear();
            for offset in 0..kernel {
                let pos = (i + offset).checked_sub(half);
                let value = pos.and_then(|p| data.get(p)).copied().unwrap_or(0.0);
                window.push(value);
            }
            window.sort_by(f64::total_cmp);
            window[half]
        })
        .collect()
}

/// Centered moving average over an odd `window`.
///
/// Positions without a full window take the nearest fully-averaged value
/// (back-fill at the head, forward-fill at the tail). Sequences shorter than
/// the window are returned unchanged.
pub fn moving_average_centered(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    if window == 0 || n < window {
        return data.to_vec();
    }
    let half = window / 2;
    let mut smooth = vec![0.0; n];

    let mut sum: f64 = data[..window].iter().sum();
    smooth[half] = sum / window as f64;
    for i in (half + 1)..(n - half) {
        sum += data[i + half] - data[i - half - 1];
        smooth[i] = sum / window as f64;
    }

    let head = smooth[half];
    let tail = smooth[n - half - 1];
    smooth[..half].fill(head);
    smooth[(n - half)..].fill(tail);
    smooth
}

/// Savitzky-Golay smoothing with polynomial `order` over an odd `window`.
///
/// Interior samples use the least-squares convolution weights; the first and
/// last `window / 2` samples are evaluated from a polynomial fitted to the
/// first / last `window` samples.
pub fn savgol_filter(data: &[f64], window: usize, order: usize) -> Result<Vec<f64>, ProcessingError> {
    let n = data.len();
    if window % 2 == 0 || order >= window || window > n {
        return Err(ProcessingError::InvalidFilter { window, order });
    }
    if window == 1 {
        return Ok(data.to_vec());
    }

    let half = window / 2;
    let weights = savgol_coefficients(window, order)?;
    let mut out = vec![0.0; n];

    for i in half..(n - half) {
        out[i] = weights
            .iter()
            .zip(&data[(i - half)..=(i + half)])
            .map(|(w, v)| w * v)
            .sum();
    }

    let head_x: Vec<f64> = (0..window).map(|i| i as f64).collect();
    let head = polyfit(&head_x, &data[..window], order)?;
    for (i, slot) in out.iter_mut().enumerate().take(half) {
        *slot = head.eval(i as f64);
    }

    let tail_start = n - window;
    let tail_x: Vec<f64> = (tail_start..n).map(|i| i as f64).collect();
    let tail = polyfit(&tail_x, &data[tail_start..], order)?;
    for (i, slot) in out.iter_mut().enumerate().skip(n - half) {
        *slot = tail.eval(i as f64);
    }

    if out.iter().all(|v| v.is_finite()) {
        Ok(out)
    } else {
        Err(ProcessingError::NonFinite("savgol filter"))
    }
}

/// Convolution weights that evaluate the local least-squares polynomial at
/// the window center.
fn savgol_coefficients(window: usize, order: usize) -> Result<Vec<f64>, ProcessingError> {
    let half = window / 2;
    let terms = order + 1;
    let u: Vec<f64> = (0..window)
        .map(|j| (j as f64 - half as f64) / half as f64)
        .collect();

    let mut ata = vec![vec![0.0; terms]; terms];
    for &uj in &u {
        for r in 0..terms {
            for c in 0..terms {
                ata[r][c] += uj.powi((r + c) as i32);
            }
        }
    }

    let mut e0 = vec![0.0; terms];
    e0[0] = 1.0;
    let c = solve(ata, e0)?;

    Ok(u.iter()
        .map(|&uj| c.iter().enumerate().map(|(k, ck)| ck * uj.powi(k as i32)).sum())
        .collect())
}
