use super::Parameters;
use crate::Vector;
use crate::dataset::Dataset;
use crate::error::{Result, VizError};
use log::debug;

/// Closed-form ordinary least squares on a single feature.
#[derive(Clone, Debug, Default)]
pub struct LinearRegression {
    pub params: Option<Parameters>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self { params: None }
    }

    /// Fits `y = w·x + b` and keeps the result. A failed fit leaves the
    /// previous parameters in place.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<Parameters> {
        let params = Self::solve(dataset)?;
        self.params = Some(params);
        Ok(params)
    }

    pub fn predict(&self, xs: &Vector) -> Result<Vector> {
        let params = self.params.ok_or(VizError::NotFitted)?;
        Ok(xs.mapv(|x| params.predict(x)))
    }

    pub fn score(&self, dataset: &Dataset) -> Result<f64> {
        let y_pred = self.predict(dataset.xs())?;
        crate::metrics::r2_score(dataset.ys(), &y_pred)
    }

    /// The normal equations on centered data:
    /// `w = Σ(x − x̄)(y − ȳ) / Σ(x − x̄)²`, `b = ȳ − w·x̄`.
    pub fn solve(dataset: &Dataset) -> Result<Parameters> {
        let n_samples = dataset.n_samples();
        if n_samples < 2 {
            return Err(VizError::DegenerateDataset {
                n_samples,
                reason: "need at least 2 points".to_string(),
            });
        }

        let (xs, ys) = (dataset.xs(), dataset.ys());
        let n = n_samples as f64;
        let x_mean = xs.sum() / n;
        let y_mean = ys.sum() / n;

        let x_centered = xs - x_mean;
        let y_centered = ys - y_mean;
        let sxx = x_centered.dot(&x_centered);
        let sxy = x_centered.dot(&y_centered);

        let first = xs[0];
        if sxx == 0.0 || xs.iter().all(|&x| x == first) {
            return Err(VizError::DegenerateDataset {
                n_samples,
                reason: "all points share the same x".to_string(),
            });
        }

        let w = sxy / sxx;
        let b = y_mean - w * x_mean;

        if !w.is_finite() || !b.is_finite() {
            return Err(VizError::DegenerateDataset {
                n_samples,
                reason: format!("fit is not finite (w={}, b={})", w, b),
            });
        }

        debug!("ols fit over {} points: w={:.6}, b={:.6}", n_samples, w, b);
        Ok(Parameters::new(w, b))
    }
}
