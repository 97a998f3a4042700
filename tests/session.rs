use lossviz::{
    ContourExtractor, CurrentState, Dataset, DrawCommand, Frame, LinearRegression, Point, Range,
    RegressionLine, Renderer, SurfaceSize, VisualizationController, VizConfig, VizError, loss,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
struct RecordingRenderer {
    charts: Vec<(Vec<Point>, RegressionLine)>,
    surfaces: Vec<Vec<DrawCommand>>,
    profiles: usize,
    states: Vec<CurrentState>,
}

impl Renderer for RecordingRenderer {
    fn draw_chart(&mut self, points: &[Point], line: &RegressionLine) {
        self.charts.push((points.to_vec(), *line));
    }

    fn draw_surface(&mut self, commands: &[DrawCommand]) {
        self.surfaces.push(commands.to_vec());
    }

    fn draw_profile(&mut self, _commands: &[DrawCommand]) {
        self.profiles += 1;
    }

    fn show_state(&mut self, state: &CurrentState) {
        self.states.push(*state);
    }
}

fn config() -> VizConfig {
    VizConfig {
        surface: SurfaceSize::new(100, 100),
        ..VizConfig::default()
    }
}

#[test]
fn test_slider_session_end_to_end() {
    let mut session = VisualizationController::new(config()).unwrap();
    let mut renderer = RecordingRenderer::default();

    for progress in [0.0, 25.0, 50.0, 75.0, 100.0] {
        session.set_progress(progress);
        session.render(&mut renderer);
    }

    assert_eq!(renderer.charts.len(), 5);
    assert_eq!(renderer.surfaces.len(), 5);
    assert_eq!(renderer.profiles, 5);

    // loss falls monotonically along the straight path to the optimum
    let losses: Vec<f64> = renderer.states.iter().map(|s| s.loss).collect();
    assert_eq!(losses[0], 5.0);
    assert!(losses.windows(2).all(|pair| pair[1] <= pair[0]));
    assert!(losses[4] < 1e-12);

    let last = renderer.states[4];
    assert_eq!((last.w, last.b), (last.best_w, last.best_b));
}

#[test]
fn test_path_collapses_at_best_fit() {
    let mut session = VisualizationController::new(config()).unwrap();

    session.set_progress(0.0);
    let path = session.path_segment();
    assert_eq!(path.to, session.mapper().to_pixel(0.0, 0.0));
    assert_eq!(path.from, session.mapper().params_to_pixel(session.best()));

    session.set_progress(100.0);
    let path = session.path_segment();
    assert_eq!(path.from, path.to);
    assert_eq!(session.current_marker(), path.to);
}

#[test]
fn test_click_session_selects_under_pointer() {
    let mut session = VisualizationController::new(config()).unwrap();
    session.select_pixel(50.0, 50.0);

    let state = session.current_state();
    assert!((state.w - 1.0).abs() < 1e-12);
    assert!((state.b - 2.0).abs() < 1e-12);
    assert_eq!(session.progress(), None);

    let data = Dataset::new(&[Point::new(1.0, 2.0), Point::new(4.0, 4.0)]).unwrap();
    assert_eq!(state.loss, loss(&data, state.w, state.b));

    // a selection survives a refit, only the loss follows the new data
    session.append_point(Point::new(3.0, 1.0)).unwrap();
    let after = session.current_state();
    assert_eq!((after.w, after.b), (state.w, state.b));
    assert_ne!(after.best_w, state.best_w);
    assert_eq!(after.loss, loss(session.dataset(), after.w, after.b));
}

#[test]
fn test_refit_rescans_contours() {
    let mut session = VisualizationController::new(config()).unwrap();
    let generation = session.generation();

    let point = session.append_random_point().unwrap();
    assert!(point.x >= 0.0 && point.x <= 5.0);
    assert!(point.y >= 0.0 && point.y <= 6.0);
    assert_eq!(session.generation(), generation + 1);
    assert_eq!(session.contours().generation(), session.generation());

    let expected = ContourExtractor::default().extract_from(session.dataset(), session.mapper());
    assert_eq!(session.contour_segments(), expected.segments());

    let best = LinearRegression::solve(session.dataset()).unwrap();
    assert_eq!(session.best(), best);
}

#[test]
fn test_degenerate_dataset_is_reported_and_survived() {
    let mut session = VisualizationController::new(config()).unwrap();
    let before: Frame = session.frame();

    let err = session.set_dataset(&[Point::new(3.0, 1.0)]).unwrap_err();
    assert!(matches!(err, VizError::DegenerateDataset { n_samples: 1, .. }));
    assert_eq!(session.last_error(), Some(&err));
    assert_eq!(session.frame(), before);
}

#[test]
fn test_config_from_json_drives_session() {
    let config = VizConfig::from_json_str(
        r#"{
            "points": [{"x": 0.0, "y": 1.0}, {"x": 2.0, "y": 5.0}, {"x": 4.0, "y": 9.0}],
            "surface": {"width": 40, "height": 30},
            "levels": [1.0, 4.0]
        }"#,
    )
    .unwrap();

    let mut session = VisualizationController::new(config).unwrap();
    session.set_progress(100.0);

    let state = session.current_state();
    assert!((state.w - 2.0).abs() < 1e-12);
    assert!((state.b - 1.0).abs() < 1e-12);
    assert_eq!(session.legend().len(), 2);
    assert!(session.contour_segments().iter().all(|s| s.index < 2));
}

#[test]
fn test_synthetic_dataset_session() {
    let mut rng = StdRng::seed_from_u64(7);
    let x_range = Range::new(0.0, 5.0).unwrap();
    let synthetic = Dataset::random_linear(40, 0.8, 1.5, x_range, 0.1, &mut rng).unwrap();

    let mut session = VisualizationController::new(config()).unwrap();
    session.replace_dataset(synthetic.clone()).unwrap();
    assert_eq!(session.dataset(), &synthetic);

    let best = LinearRegression::solve(session.dataset()).unwrap();
    assert_eq!(session.best(), best);
    assert!((best.w - 0.8).abs() < 0.1);
    assert!((best.b - 1.5).abs() < 0.3);
    assert!(session.r_squared().unwrap() > 0.95);

    session.set_progress(100.0);
    assert_eq!(session.current(), best);
}
