use crate::Vector;
use crate::error::{Result, VizError};
use crate::mapper::Range;
use ndarray::Array1;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Normal, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One observed sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Uniform draw inside `x_range` × `y_range`.
    pub fn random<R: Rng>(x_range: Range, y_range: Range, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(x_range.min()..=x_range.max()),
            y: rng.gen_range(y_range.min()..=y_range.max()),
        }
    }
}

/// Ordered samples stored column-wise. Never edited in place: appending
/// produces a new `Dataset`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    xs: Vector,
    ys: Vector,
}

impl Dataset {
    pub fn new(points: &[Point]) -> Result<Self> {
        let xs = points.iter().map(|p| p.x).collect::<Vector>();
        let ys = points.iter().map(|p| p.y).collect::<Vector>();
        Self::from_columns(xs, ys)
    }

    pub fn from_columns(xs: Vector, ys: Vector) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(VizError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        if let Some((index, (&x, &y))) = xs
            .iter()
            .zip(ys.iter())
            .enumerate()
            .find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
        {
            return Err(VizError::InvalidPoint { index, x, y });
        }

        Ok(Self { xs, ys })
    }

    /// Samples `n` points around the line `y = w·x + b`, with x uniform in
    /// `x_range` and gaussian noise of standard deviation `noise` on y.
    pub fn random_linear<R: Rng>(
        n: usize,
        w: f64,
        b: f64,
        x_range: Range,
        noise: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let normal = Normal::new(0.0, noise)
            .map_err(|e| VizError::InvalidConfig(format!("noise {}: {}", noise, e)))?;

        let uniform = Uniform::new_inclusive(x_range.min(), x_range.max());
        let xs = Array1::random_using(n, uniform, rng);
        let ys = xs.mapv(|x| w * x + b) + Array1::random_using(n, normal, rng);

        Self::from_columns(xs, ys)
    }

    pub fn n_samples(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &Vector {
        &self.xs
    }

    pub fn ys(&self) -> &Vector {
        &self.ys
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        Some(Point::new(*self.xs.get(index)?, *self.ys.get(index)?))
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }

    /// Returns a new dataset with `point` appended.
    pub fn with_point(&self, point: Point) -> Result<Self> {
        let mut xs = self.xs.to_vec();
        let mut ys = self.ys.to_vec();
        xs.push(point.x);
        ys.push(point.y);
        Self::from_columns(Vector::from(xs), Vector::from(ys))
    }
}
