use lossviz::{
    Color, CurrentState, Dataset, DrawCommand, Point, Range, RegressionLine, Renderer,
    SurfaceSize, VisualizationController, VizConfig,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Draws the contour surface into a character grid, one cell per
/// `scale` pixels.
struct AsciiRenderer {
    cols: usize,
    rows: usize,
    scale: f64,
    cells: Vec<char>,
}

impl AsciiRenderer {
    const LEVEL_GLYPHS: [char; 6] = ['.', ':', '-', '=', '+', '#'];

    fn new(size: SurfaceSize, scale: usize) -> Self {
        let cols = size.width / scale + 1;
        let rows = size.height / scale + 1;
        Self {
            cols,
            rows,
            scale: scale as f64,
            cells: vec![' '; cols * rows],
        }
    }

    fn plot(&mut self, x: f64, y: f64, glyph: char) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let col = (x / self.scale) as usize;
        let row = (y / self.scale) as usize;
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = glyph;
        }
    }

    fn print(&self) {
        for row in self.cells.chunks(self.cols) {
            println!("|{}|", row.iter().collect::<String>());
        }
    }
}

impl Renderer for AsciiRenderer {
    fn draw_chart(&mut self, points: &[Point], line: &RegressionLine) {
        println!(
            "chart: {} points, line ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            points.len(),
            line.start.x,
            line.start.y,
            line.end.x,
            line.end.y
        );
    }

    fn draw_surface(&mut self, commands: &[DrawCommand]) {
        self.cells.iter_mut().for_each(|c| *c = ' ');
        for command in commands {
            match command {
                DrawCommand::Line {
                    from,
                    to,
                    color: Color::Hsla { h, .. },
                    ..
                } => {
                    let index = ((h - 180.0) / 30.0) as usize;
                    let glyph = Self::LEVEL_GLYPHS[index.min(Self::LEVEL_GLYPHS.len() - 1)];
                    let mut x = from.x;
                    while x < to.x {
                        self.plot(x, from.y, glyph);
                        x += 1.0;
                    }
                }
                DrawCommand::Circle { center, .. } => self.plot(center.x, center.y, '@'),
                _ => {}
            }
        }
    }

    fn show_state(&mut self, state: &CurrentState) {
        println!(
            "w: {:.3}, b: {:.3}, Loss: {:.3}  (best w: {:.3}, b: {:.3})",
            state.w, state.b, state.loss, state.best_w, state.best_b
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Slider Sweep: from w=0, b=0 to the best fit ===\n");

    let config = VizConfig::default();
    let size = config.surface;
    let mut session = VisualizationController::new(config)?;

    println!("{:>8} {:>10} {:>10} {:>10}", "progress", "w", "b", "loss");
    println!("{}", "-".repeat(41));
    for progress in (0..=100).step_by(10) {
        session.set_progress(progress as f64);
        let state = session.current_state();
        println!(
            "{:>8} {:>10.4} {:>10.4} {:>10.4}",
            progress, state.w, state.b, state.loss
        );
    }

    println!("\nContour panel at progress 50:\n");
    session.set_progress(50.0);
    let mut renderer = AsciiRenderer::new(size, 6);
    session.render(&mut renderer);
    renderer.print();

    println!("\n=== Noisy synthetic line y = 0.8x + 1.5 ===\n");
    let mut rng = StdRng::seed_from_u64(7);
    let synthetic = Dataset::random_linear(12, 0.8, 1.5, Range::new(0.0, 5.0)?, 0.3, &mut rng)?;
    session.replace_dataset(synthetic)?;

    let best = session.best();
    println!(
        "{} points, best w: {:.3}, b: {:.3}, R²: {:.3}",
        session.dataset().n_samples(),
        best.w,
        best.b,
        session.r_squared()?
    );

    for progress in [0.0, 50.0, 100.0] {
        session.set_progress(progress);
        let state = session.current_state();
        println!(
            "{:>8} {:>10.4} {:>10.4} {:>10.4}",
            progress, state.w, state.b, state.loss
        );
    }

    Ok(())
}
