//! Straight-line models over one feature.
//!
//! `Parameters` is a candidate model `ŷ = w·x + b`; `LinearRegression`
//! produces the least-squares one for a dataset.
//!
//! # Examples
//!
//! ```rust
//! use lossviz::{Dataset, LinearRegression, Point};
//!
//! let data = Dataset::new(&[Point::new(1.0, 2.0), Point::new(4.0, 4.0)]).unwrap();
//!
//! let mut model = LinearRegression::new();
//! let best = model.fit(&data).unwrap();
//! assert!((best.w - 2.0 / 3.0).abs() < 1e-12);
//! ```

mod linear_regression;

pub use linear_regression::LinearRegression;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub w: f64,
    pub b: f64,
}

impl Parameters {
    pub fn new(w: f64, b: f64) -> Self {
        Self { w, b }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.w * x + self.b
    }
}
