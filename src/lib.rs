//! Parameter-space loss engine for visualising straight-line least squares.
//!
//! Given a handful of 2-D points the crate fits the best line, evaluates the
//! loss at any `(w, b)`, scans the loss surface for contour bands, maps
//! between parameters and drawing-surface pixels, and interpolates along the
//! path from a starting guess to the best fit.
//!
//! ```rust
//! use lossviz::{VisualizationController, VizConfig};
//!
//! let mut session = VisualizationController::new(VizConfig::default()).unwrap();
//! session.set_progress(100.0);
//!
//! let state = session.current_state();
//! assert!((state.w - 2.0 / 3.0).abs() < 1e-12);
//! assert!(state.loss < 1e-12);
//! ```

pub use ndarray::{Array1, Array2};

pub mod config;
pub mod contour;
pub mod controller;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod interpolate;
pub mod linear_model;
pub mod mapper;
pub mod metrics;
pub mod profile;
pub mod render;

pub use config::{AnchorMode, VizConfig};
pub use contour::{ContourExtractor, ContourSegment, ContourSet, LegendEntry, LevelStyle, LossGrid};
pub use controller::VisualizationController;
pub use dataset::{Dataset, Point};
pub use driver::{ClickDriver, DriverContext, InputDriver, ProgressDriver};
pub use error::{Result, VizError};
pub use interpolate::{PathInterpolator, interpolate};
pub use linear_model::{LinearRegression, Parameters};
pub use mapper::{ParameterSpaceMapper, PixelPoint, Range, SurfaceSize};
pub use metrics::loss;
pub use profile::LossProfile;
pub use render::{Color, CurrentState, DrawCommand, Frame, PathSegment, RegressionLine, Renderer};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_path_halves_residuals() {
        let config = VizConfig::default();
        let dataset = Dataset::new(&config.points).unwrap();
        let best = LinearRegression::solve(&dataset).unwrap();
        assert!(config.mapper().contains(best.w, best.b));

        // the loss is quadratic with a zero at the best fit, so halfway along
        // the path it drops to a quarter of the starting 5.0
        let halfway = interpolate(Parameters::default(), best, 0.5);
        assert!((loss(&dataset, halfway.w, halfway.b) - 1.25).abs() < 1e-12);
    }
}
