//! Input drivers decide which parameters the session is looking at.
//!
//! A slider feeds a [`ProgressDriver`], which walks the straight path from the
//! `initial` anchor to the best fit. A pointer feeds a [`ClickDriver`], which
//! pins an explicit selection. The controller keeps whichever driver fired
//! last and re-resolves it whenever the anchors move.

use crate::interpolate::PathInterpolator;
use crate::linear_model::Parameters;
use crate::mapper::ParameterSpaceMapper;
use log::warn;
use std::fmt::Debug;

/// What a driver may look at when resolving.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverContext {
    pub initial: Parameters,
    pub best: Parameters,
}

pub trait InputDriver: Debug {
    fn resolve(&self, ctx: &DriverContext) -> Parameters;

    /// Slider position, when this driver has one.
    fn progress(&self) -> Option<f64> {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressDriver {
    progress: f64,
}

impl ProgressDriver {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Out-of-range or NaN input is clamped into `[0, 100]`.
    pub fn new(progress: f64) -> Self {
        let clamped = if progress.is_nan() {
            Self::MIN
        } else {
            progress.clamp(Self::MIN, Self::MAX)
        };
        if clamped != progress {
            warn!("progress {} outside [0, 100], using {}", progress, clamped);
        }
        Self { progress: clamped }
    }
}

impl Default for ProgressDriver {
    fn default() -> Self {
        Self { progress: Self::MIN }
    }
}

impl InputDriver for ProgressDriver {
    fn resolve(&self, ctx: &DriverContext) -> Parameters {
        PathInterpolator::new(ctx.initial, ctx.best).at_progress(self.progress)
    }

    fn progress(&self) -> Option<f64> {
        Some(self.progress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickDriver {
    selection: Parameters,
}

impl ClickDriver {
    pub fn new(selection: Parameters) -> Self {
        Self { selection }
    }

    /// Selection under a pointer at `(px, py)` on the contour surface.
    pub fn from_pixel(mapper: &ParameterSpaceMapper, px: f64, py: f64) -> Self {
        Self::new(mapper.to_parameter(px, py))
    }
}

impl InputDriver for ClickDriver {
    fn resolve(&self, _ctx: &DriverContext) -> Parameters {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{Range, SurfaceSize};

    fn ctx() -> DriverContext {
        DriverContext {
            initial: Parameters::new(0.0, 0.0),
            best: Parameters::new(2.0 / 3.0, 4.0 / 3.0),
        }
    }

    #[test]
    fn test_progress_walks_from_initial_to_best() {
        assert_eq!(ProgressDriver::new(0.0).resolve(&ctx()), ctx().initial);
        assert_eq!(ProgressDriver::new(100.0).resolve(&ctx()), ctx().best);

        let half = ProgressDriver::new(50.0).resolve(&ctx());
        assert!((half.w - 1.0 / 3.0).abs() < 1e-12);
        assert!((half.b - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(ProgressDriver::new(150.0).progress(), Some(100.0));
        assert_eq!(ProgressDriver::new(-3.0).progress(), Some(0.0));
        assert_eq!(ProgressDriver::new(f64::NAN).progress(), Some(0.0));
    }

    #[test]
    fn test_click_ignores_anchors() {
        let mapper = ParameterSpaceMapper::new(
            Range::new(-1.0, 3.0).unwrap(),
            Range::new(-1.0, 5.0).unwrap(),
            SurfaceSize::new(300, 300),
        );
        let driver = ClickDriver::from_pixel(&mapper, 150.0, 150.0);

        assert_eq!(driver.resolve(&ctx()), Parameters::new(1.0, 2.0));
        assert_eq!(driver.progress(), None);
    }
}
