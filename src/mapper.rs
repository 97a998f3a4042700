//! Mapping between the `(w, b)` parameter plane and a drawing surface.
//!
//! Pixel `x` grows with `w`. Pixel `y` grows downward while `b` grows
//! upward, so `b = b_range.min` sits on the bottom edge (`y = height`).

use crate::error::{Result, VizError};
use crate::linear_model::Parameters;
use serde::{Deserialize, Serialize};

/// A closed interval with finite `min < max`. Only built through
/// [`Range::new`] or deserialization, both of which validate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for Range {
    type Error = VizError;

    fn try_from(raw: RawRange) -> Result<Self> {
        Range::new(raw.min, raw.max)
    }
}

impl Range {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(VizError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// For compile-time defaults whose bounds are known to be valid.
    pub(crate) const fn from_valid(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Position of `value` inside the interval, 0 at `min` and 1 at `max`.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    pub fn lerp(&self, fraction: f64) -> f64 {
        self.min + fraction * self.span()
    }
}

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: usize,
    pub height: usize,
}

impl SurfaceSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(300, 300)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSpaceMapper {
    w_range: Range,
    b_range: Range,
    size: SurfaceSize,
}

impl ParameterSpaceMapper {
    pub fn new(w_range: Range, b_range: Range, size: SurfaceSize) -> Self {
        Self {
            w_range,
            b_range,
            size,
        }
    }

    pub fn w_range(&self) -> Range {
        self.w_range
    }

    pub fn b_range(&self) -> Range {
        self.b_range
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn to_pixel(&self, w: f64, b: f64) -> PixelPoint {
        let width = self.size.width as f64;
        let height = self.size.height as f64;
        PixelPoint::new(
            self.w_range.normalize(w) * width,
            height - self.b_range.normalize(b) * height,
        )
    }

    pub fn params_to_pixel(&self, params: Parameters) -> PixelPoint {
        self.to_pixel(params.w, params.b)
    }

    pub fn to_parameter(&self, px: f64, py: f64) -> Parameters {
        let width = self.size.width as f64;
        let height = self.size.height as f64;
        Parameters::new(
            self.w_range.lerp(px / width),
            self.b_range.lerp((height - py) / height),
        )
    }

    /// Whether `(w, b)` lies in the visible parameter domain.
    pub fn contains(&self, w: f64, b: f64) -> bool {
        self.w_range.contains(w) && self.b_range.contains(b)
    }
}
