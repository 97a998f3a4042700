//! Threshold-band contours of the loss surface.
//!
//! The surface is sampled once per pixel into a [`LossGrid`]. A pixel belongs
//! to level `L` when `|loss − L| < band`, and each such pixel becomes a
//! one-pixel horizontal tick. Contours therefore render as dotted bands
//! rather than connected curves; [`ContourSet::strokes`] joins neighbouring
//! ticks without changing which pixels qualify.
//!
//! # Examples
//!
//! ```rust
//! use lossviz::{ContourExtractor, Dataset, LossGrid, ParameterSpaceMapper, Point, Range, SurfaceSize};
//!
//! let data = Dataset::new(&[Point::new(1.0, 2.0), Point::new(4.0, 4.0)]).unwrap();
//! let mapper = ParameterSpaceMapper::new(
//!     Range::new(-1.0, 3.0).unwrap(),
//!     Range::new(-1.0, 5.0).unwrap(),
//!     SurfaceSize::new(60, 60),
//! );
//!
//! let grid = LossGrid::compute(&data, &mapper);
//! let contours = ContourExtractor::default().extract(&grid);
//! assert!(!contours.segments().is_empty());
//! ```

use crate::Matrix;
use crate::dataset::Dataset;
use crate::error::{Result, VizError};
use crate::linear_model::Parameters;
use crate::mapper::{ParameterSpaceMapper, PixelPoint, SurfaceSize};
use crate::metrics::loss;
use log::debug;
use serde::Serialize;

pub const DEFAULT_LEVELS: [f64; 6] = [0.5, 1.0, 2.0, 4.0, 8.0, 16.0];
pub const DEFAULT_BAND: f64 = 0.1;

/// Visual identity of a contour level, shared by strokes and legend.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LevelStyle {
    pub level: f64,
    pub index: usize,
    pub hue: f64,
}

impl LevelStyle {
    pub const STROKE_ALPHA: f64 = 0.5;
    pub const LEGEND_ALPHA: f64 = 1.0;

    pub fn new(level: f64, index: usize) -> Self {
        Self {
            level,
            index,
            hue: 180.0 + 30.0 * index as f64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ContourSegment {
    pub p1: PixelPoint,
    pub p2: PixelPoint,
    pub level: f64,
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub anchor: PixelPoint,
    pub style: LevelStyle,
}

/// Loss sampled at every pixel of the surface, indexed `[px, py]` where
/// `py` counts rows upward from the bottom of the `b` range.
#[derive(Clone, Debug)]
pub struct LossGrid {
    values: Matrix,
    size: SurfaceSize,
}

impl LossGrid {
    pub fn compute(dataset: &Dataset, mapper: &ParameterSpaceMapper) -> Self {
        let size = mapper.size();
        let values = Matrix::from_shape_fn((size.width, size.height), |(px, py)| {
            let params = Self::sample_params(mapper, px, py);
            loss(dataset, params.w, params.b)
        });

        debug!(
            "loss grid {}x{} over {} points",
            size.width,
            size.height,
            dataset.n_samples()
        );
        Self { values, size }
    }

    /// Parameters sampled by grid cell `(px, py)`.
    pub fn sample_params(mapper: &ParameterSpaceMapper, px: usize, py: usize) -> Parameters {
        let size = mapper.size();
        Parameters::new(
            mapper.w_range().lerp(px as f64 / size.width as f64),
            mapper.b_range().lerp(py as f64 / size.height as f64),
        )
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn value(&self, px: usize, py: usize) -> Option<f64> {
        self.values.get((px, py)).copied()
    }

    pub fn values(&self) -> &Matrix {
        &self.values
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContourExtractor {
    levels: Vec<f64>,
    band: f64,
}

impl ContourExtractor {
    pub fn new(levels: Vec<f64>, band: f64) -> Result<Self> {
        if levels.iter().any(|l| !l.is_finite()) {
            return Err(VizError::InvalidConfig(
                "contour levels must be finite".to_string(),
            ));
        }
        if levels.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(VizError::InvalidConfig(
                "contour levels must be strictly ascending".to_string(),
            ));
        }
        if !(band.is_finite() && band > 0.0) {
            return Err(VizError::InvalidConfig(format!(
                "contour band must be positive, got {}",
                band
            )));
        }
        Ok(Self { levels, band })
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn band(&self) -> f64 {
        self.band
    }

    pub fn styles(&self) -> Vec<LevelStyle> {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, &level)| LevelStyle::new(level, index))
            .collect()
    }

    pub fn extract(&self, grid: &LossGrid) -> ContourSet {
        let height = grid.size().height as f64;
        let mut segments = Vec::new();

        for style in self.styles() {
            for ((px, py), &value) in grid.values().indexed_iter() {
                if (value - style.level).abs() < self.band {
                    let x = px as f64;
                    let y = height - py as f64;
                    segments.push(ContourSegment {
                        p1: PixelPoint::new(x, y),
                        p2: PixelPoint::new(x + 1.0, y),
                        level: style.level,
                        index: style.index,
                    });
                }
            }
        }

        debug!(
            "extracted {} contour ticks across {} levels",
            segments.len(),
            self.levels.len()
        );
        ContourSet {
            generation: 0,
            segments,
            styles: self.styles(),
            size: grid.size(),
        }
    }

    /// Samples the grid and extracts in one go.
    pub fn extract_from(&self, dataset: &Dataset, mapper: &ParameterSpaceMapper) -> ContourSet {
        self.extract(&LossGrid::compute(dataset, mapper))
    }
}

impl Default for ContourExtractor {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS.to_vec(),
            band: DEFAULT_BAND,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContourSet {
    generation: u64,
    segments: Vec<ContourSegment>,
    styles: Vec<LevelStyle>,
    size: SurfaceSize,
}

impl ContourSet {
    /// Tags the set with the dataset generation it was computed from.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn segments(&self) -> &[ContourSegment] {
        &self.segments
    }

    pub fn styles(&self) -> &[LevelStyle] {
        &self.styles
    }

    pub fn for_level(&self, index: usize) -> impl Iterator<Item = &ContourSegment> {
        self.segments.iter().filter(move |s| s.index == index)
    }

    /// Ticks of the same level on the same row joined into runs.
    pub fn strokes(&self) -> Vec<ContourSegment> {
        let mut ticks = self.segments.clone();
        ticks.sort_by(|a, b| {
            a.index
                .cmp(&b.index)
                .then_with(|| a.p1.y.total_cmp(&b.p1.y))
                .then_with(|| a.p1.x.total_cmp(&b.p1.x))
        });

        let mut strokes: Vec<ContourSegment> = Vec::new();
        for tick in ticks {
            if let Some(last) = strokes.last_mut() {
                if last.index == tick.index && last.p2.y == tick.p1.y && last.p2.x == tick.p1.x {
                    last.p2 = tick.p2;
                    continue;
                }
            }
            strokes.push(tick);
        }
        strokes
    }

    /// Legend labels stacked up from the bottom right corner.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let width = self.size.width as f64;
        let height = self.size.height as f64;
        self.styles
            .iter()
            .map(|style| LegendEntry {
                label: format!("Loss: {}", style.level),
                anchor: PixelPoint::new(width - 60.0, height - 20.0 * style.index as f64 - 10.0),
                style: *style,
            })
            .collect()
    }
}
