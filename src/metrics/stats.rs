//! Shared numerical helpers: least-squares fits, percentiles, moments.
//!
//! Mean and standard deviation go through `statrs`; the fits are small
//! closed-form solvers because every caller needs a handful of coefficients
//! over a short window, never a general linear-algebra package.

use statrs::statistics::Statistics;

use crate::processing::ProcessingError;

/// Result of an ordinary least-squares line fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination (Pearson r squared).
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares regression of `y` on `x`.
///
/// Fails when fewer than two points are given, the lengths differ, or `x`
/// has zero variance. A constant `y` yields `r_squared = 0`.
pub fn linregress(x: &[f64], y: &[f64]) -> Result<LinearFit, ProcessingError> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return Err(ProcessingError::InsufficientPoints {
            needed: 2,
            available: n.min(y.len()),
        });
    }

    let x_mean = x.mean();
    let y_mean = y.mean();

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    if ss_xx == 0.0 {
        return Err(ProcessingError::SingularSystem(
            "regressor has zero variance".to_string(),
        ));
    }

    let slope = ss_xy / ss_xx;
    let intercept = y_mean - slope * x_mean;
    let r = if ss_yy == 0.0 {
        0.0
    } else {
        (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0)
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared: r * r,
    })
}

/// Regression of `y` against its sample index `0..n`.
pub fn linregress_index(y: &[f64]) -> Result<LinearFit, ProcessingError> {
    let x = index_axis(y.len());
    linregress(&x, y)
}

/// `[0.0, 1.0, ..., n-1]`
pub fn index_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        0.0
    } else {
        data.mean()
    }
}

/// Population standard deviation (ddof = 0); 0.0 for an empty slice.
pub fn population_std(data: &[f64]) -> f64 {
    if data.is_empty() {
        0.0
    } else {
        data.population_std_dev()
    }
}

/// Peak-to-peak range.
pub fn peak_to_peak(data: &[f64]) -> f64 {
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if data.is_empty() {
        0.0
    } else {
        max - min
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// `p` is in percent (0-100). Rank position is `p/100 * (n-1)`.
pub fn percentile(data: &[f64], p: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

// ============================================================================
// Polynomial least squares
// ============================================================================

/// Least-squares polynomial in a centered, scaled abscissa.
///
/// The fit is done on `u = (x - center) / scale` so that the normal
/// equations stay well conditioned for windows of a few dozen samples.
#[derive(Debug, Clone)]
pub struct Polynomial {
    /// Coefficients in ascending power of `u`.
    coeffs: Vec<f64>,
    center: f64,
    scale: f64,
}

impl Polynomial {
    pub fn eval(&self, x: f64) -> f64 {
        let u = (x - self.center) / self.scale;
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * u + c)
    }
}

/// Fit a polynomial of degree `order` to `(x, y)`.
pub fn polyfit(x: &[f64], y: &[f64], order: usize) -> Result<Polynomial, ProcessingError> {
    let n = x.len();
    if n != y.len() || n <= order {
        return Err(ProcessingError::InsufficientPoints {
            needed: order + 1,
            available: n.min(y.len()),
        });
    }

    let center = x.mean();
    let half_span = x
        .iter()
        .map(|&xi| (xi - center).abs())
        .fold(0.0_f64, f64::max);
    let scale = if half_span > 0.0 { half_span } else { 1.0 };

    let terms = order + 1;
    let mut ata = vec![vec![0.0; terms]; terms];
    let mut aty = vec![0.0; terms];

    for (&xi, &yi) in x.iter().zip(y) {
        let u = (xi - center) / scale;
        let powers: Vec<f64> = std::iter::successors(Some(1.0), |p| Some(p * u))
            .take(terms)
            .collect();
        for r in 0..terms {
            aty[r] += powers[r] * yi;
            for c in 0..terms {
                ata[r][c] += powers[r] * powers[c];
            }
        }
    }

    let coeffs = solve(ata, aty)?;
    Ok(Polynomial {
        coeffs,
        center,
        scale,
    })
}

/// Gaussian elimination with partial pivoting.
pub(crate) fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, ProcessingError> {
    let n = b.len();
    let norm = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = norm * f64::EPSILON * n as f64;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        if a[pivot_row][col].abs() <= tolerance {
            return Err(ProcessingError::SingularSystem(format!(
                "pivot {col} below tolerance {tolerance:e}"
            )));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }

    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(ProcessingError::NonFinite("polynomial solve"))
    }
}
