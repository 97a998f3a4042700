use crate::Vector;
use crate::dataset::Dataset;
use crate::error::{Result, VizError};

/// Halved mean squared error of the line `w·x + b`:
/// `Σ(w·xᵢ + b − yᵢ)² / (2n)`. An empty dataset has zero loss.
pub fn loss(dataset: &Dataset, w: f64, b: f64) -> f64 {
    let n = dataset.n_samples();
    if n == 0 {
        return 0.0;
    }

    let sum = dataset
        .xs()
        .iter()
        .zip(dataset.ys().iter())
        .map(|(&x, &y)| {
            let residual = w * x + b - y;
            residual * residual
        })
        .sum::<f64>();

    sum / (2.0 * n as f64)
}

pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(VizError::LengthMismatch {
            xs: y_true.len(),
            ys: y_pred.len(),
        });
    }

    let y_mean = y_true.mean().unwrap_or(0.0);
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(1.0);
    }

    Ok(1.0 - ss_res / ss_tot)
}
