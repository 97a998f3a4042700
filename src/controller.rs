//! Session state and recomputation.
//!
//! Two independent triggers drive the controller. A dataset change refits the
//! best line, re-resolves the current parameters and rescans the loss surface.
//! An input change (slider or click) only re-resolves the current parameters
//! and their loss. Everything is recomputed synchronously and replaced whole.

use crate::config::{AnchorMode, VizConfig};
use crate::contour::{ContourExtractor, ContourSegment, ContourSet, LegendEntry};
use crate::dataset::{Dataset, Point};
use crate::driver::{ClickDriver, DriverContext, InputDriver, ProgressDriver};
use crate::error::{Result, VizError};
use crate::linear_model::{LinearRegression, Parameters};
use crate::mapper::{ParameterSpaceMapper, PixelPoint, Range};
use crate::metrics::loss;
use crate::profile::LossProfile;
use crate::render::{
    Color, CurrentState, DrawCommand, Frame, PathSegment, RegressionLine, Renderer,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Internal work state. Every public call returns in `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Refitting,
    Recomputing,
}

#[derive(Debug)]
pub struct VisualizationController {
    config: VizConfig,
    mapper: ParameterSpaceMapper,
    extractor: ContourExtractor,
    chart_x: Range,
    chart_y: Range,
    profile_axis: Range,
    rng: StdRng,
    fitter: LinearRegression,
    dataset: Dataset,
    best: Parameters,
    initial: Parameters,
    driver: Box<dyn InputDriver>,
    current: Parameters,
    loss: f64,
    generation: u64,
    contours: ContourSet,
    phase: Phase,
    last_error: Option<VizError>,
}

impl VisualizationController {
    /// Starts a session on `config.points`. Fails when the config is invalid
    /// or the starting dataset cannot be fitted, since there is no earlier
    /// state to fall back to.
    pub fn new(config: VizConfig) -> Result<Self> {
        config.validate()?;

        let mapper = config.mapper();
        let extractor = config.contour_extractor()?;
        let (chart_x, chart_y) = config.chart_ranges()?;
        let profile_axis = Range::new(0.0, config.profile_loss_max)?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let dataset = Dataset::new(&config.points)?;
        let mut fitter = LinearRegression::new();
        let best = fitter.fit(&dataset)?;

        let initial = match config.anchor {
            AnchorMode::Zero => Parameters::default(),
            AnchorMode::Random => Parameters::new(
                rng.gen_range(config.w_range.min()..=config.w_range.max()),
                rng.gen_range(config.b_range.min()..=config.b_range.max()),
            ),
        };

        let driver: Box<dyn InputDriver> = Box::new(ProgressDriver::default());
        let current = driver.resolve(&DriverContext { initial, best });
        let current_loss = loss(&dataset, current.w, current.b);
        let contours = extractor.extract_from(&dataset, &mapper).with_generation(1);

        info!(
            "session started with {} points, best w={:.3} b={:.3}, initial w={:.3} b={:.3}",
            dataset.n_samples(),
            best.w,
            best.b,
            initial.w,
            initial.b
        );

        Ok(Self {
            config,
            mapper,
            extractor,
            chart_x,
            chart_y,
            profile_axis,
            rng,
            fitter,
            dataset,
            best,
            initial,
            driver,
            current,
            loss: current_loss,
            generation: 1,
            contours,
            phase: Phase::Idle,
            last_error: None,
        })
    }

    pub fn set_dataset(&mut self, points: &[Point]) -> Result<()> {
        let dataset = Dataset::new(points)?;
        self.replace_dataset(dataset)
    }

    pub fn append_point(&mut self, point: Point) -> Result<()> {
        let dataset = self.dataset.with_point(point)?;
        self.replace_dataset(dataset)
    }

    /// Appends a point drawn uniformly inside the scatter chart axes.
    pub fn append_random_point(&mut self) -> Result<Point> {
        let point = Point::random(self.chart_x, self.chart_y, &mut self.rng);
        self.append_point(point)?;
        Ok(point)
    }

    /// Refits on `dataset`. On failure the previous dataset, fit and contours
    /// stay in place and the error is both recorded and returned.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> Result<()> {
        self.enter(Phase::Refitting);

        let best = match self.fitter.fit(&dataset) {
            Ok(best) => best,
            Err(e) => {
                warn!("keeping previous fit: {}", e);
                self.last_error = Some(e.clone());
                self.enter(Phase::Idle);
                return Err(e);
            }
        };

        self.dataset = dataset;
        self.best = best;
        self.generation += 1;
        info!(
            "refit on {} points (generation {}): w={:.3} b={:.3} r2={:.3}",
            self.dataset.n_samples(),
            self.generation,
            best.w,
            best.b,
            self.r_squared().unwrap_or(f64::NAN)
        );

        self.recompute_current();

        let contours = self
            .extractor
            .extract_from(&self.dataset, &self.mapper)
            .with_generation(self.generation);
        self.apply_contours(contours);

        self.last_error = None;
        self.enter(Phase::Idle);
        Ok(())
    }

    /// Installs `contours` unless a newer dataset has superseded them.
    pub fn apply_contours(&mut self, contours: ContourSet) -> bool {
        if contours.generation() != self.generation {
            debug!(
                "discarding contours from generation {} (current {})",
                contours.generation(),
                self.generation
            );
            return false;
        }
        self.contours = contours;
        true
    }

    /// Slider input in `[0, 100]`; anything outside is clamped.
    pub fn set_progress(&mut self, progress: f64) {
        self.set_driver(Box::new(ProgressDriver::new(progress)));
    }

    pub fn select_parameters(&mut self, w: f64, b: f64) {
        if !self.mapper.contains(w, b) {
            debug!("selection w={:.3} b={:.3} is outside the visible domain", w, b);
        }
        self.set_driver(Box::new(ClickDriver::new(Parameters::new(w, b))));
    }

    /// Pointer input in contour-surface pixels.
    pub fn select_pixel(&mut self, px: f64, py: f64) {
        let selection = self.mapper.to_parameter(px, py);
        self.select_parameters(selection.w, selection.b);
    }

    pub fn set_driver(&mut self, driver: Box<dyn InputDriver>) {
        self.driver = driver;
        self.recompute_current();
    }

    fn recompute_current(&mut self) {
        let resumed = self.enter(Phase::Recomputing);

        let ctx = DriverContext {
            initial: self.initial,
            best: self.best,
        };
        self.current = self.driver.resolve(&ctx);
        self.loss = loss(&self.dataset, self.current.w, self.current.b);
        debug!(
            "current w={:.3} b={:.3} loss={:.3}",
            self.current.w, self.current.b, self.loss
        );

        self.enter(resumed);
    }

    /// Switches to `phase` and returns the one it replaced.
    fn enter(&mut self, phase: Phase) -> Phase {
        let previous = std::mem::replace(&mut self.phase, phase);
        debug!("phase {:?} -> {:?}", previous, phase);
        previous
    }

    pub fn current_state(&self) -> CurrentState {
        CurrentState {
            w: self.current.w,
            b: self.current.b,
            loss: self.loss,
            best_w: self.best.w,
            best_b: self.best.b,
        }
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn mapper(&self) -> &ParameterSpaceMapper {
        &self.mapper
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn best(&self) -> Parameters {
        self.best
    }

    pub fn initial(&self) -> Parameters {
        self.initial
    }

    pub fn current(&self) -> Parameters {
        self.current
    }

    /// Coefficient of determination of the best fit on the current dataset.
    pub fn r_squared(&self) -> Result<f64> {
        self.fitter.score(&self.dataset)
    }

    pub fn progress(&self) -> Option<f64> {
        self.driver.progress()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_error(&self) -> Option<&VizError> {
        self.last_error.as_ref()
    }

    pub fn contours(&self) -> &ContourSet {
        &self.contours
    }

    pub fn contour_segments(&self) -> &[ContourSegment] {
        self.contours.segments()
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.contours.legend()
    }

    /// From the best fit to the current parameters, in surface pixels.
    pub fn path_segment(&self) -> PathSegment {
        PathSegment {
            from: self.mapper.params_to_pixel(self.best),
            to: self.mapper.params_to_pixel(self.current),
        }
    }

    pub fn current_marker(&self) -> PixelPoint {
        self.mapper.params_to_pixel(self.current)
    }

    /// The current line across the scatter chart, from `x = 0` to the right
    /// edge of the chart.
    pub fn regression_line(&self) -> RegressionLine {
        let x_max = self.chart_x.max();
        RegressionLine {
            start: Point::new(0.0, self.current.predict(0.0)),
            end: Point::new(x_max, self.current.predict(x_max)),
        }
    }

    /// Loss against `w` at the best-fit intercept.
    pub fn loss_profile(&self) -> LossProfile {
        LossProfile::compute(
            &self.dataset,
            self.mapper.w_range(),
            self.best.b,
            self.current.w,
            self.mapper.size(),
            self.profile_axis,
        )
    }

    pub fn frame(&self) -> Frame {
        let styles = self.contours.styles();
        let mut surface: Vec<DrawCommand> = self
            .contours
            .strokes()
            .iter()
            .filter_map(|s| styles.get(s.index).map(|style| DrawCommand::contour(s, style)))
            .collect();
        surface.extend(self.legend().iter().map(DrawCommand::legend));

        let path = self.path_segment();
        surface.push(DrawCommand::Line {
            from: path.from,
            to: path.to,
            color: Color::PATH,
            width: 2.0,
        });
        surface.push(DrawCommand::Circle {
            center: self.current_marker(),
            radius: self.config.marker_radius,
            fill: Color::PATH,
        });

        let profile = self.loss_profile();
        let mut profile_commands: Vec<DrawCommand> = profile
            .curve
            .windows(2)
            .map(|pair| DrawCommand::Line {
                from: pair[0],
                to: pair[1],
                color: Color::DATA,
                width: 2.0,
            })
            .collect();
        profile_commands.push(DrawCommand::Circle {
            center: profile.marker,
            radius: self.config.marker_radius,
            fill: Color::PATH,
        });

        Frame {
            generation: self.generation,
            state: self.current_state(),
            points: self.dataset.points().collect(),
            regression_line: self.regression_line(),
            surface,
            profile: profile_commands,
        }
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.render(&self.frame());
    }
}
