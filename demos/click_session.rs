use anyhow::Context;
use log::info;
use lossviz::{VisualizationController, VizConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // optional JSON config path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => VizConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => VizConfig::default(),
    };
    let size = config.surface;
    let mut session = VisualizationController::new(config)?;

    println!("=== Click Session ===\n");

    let clicks = [
        (size.width as f64 * 0.25, size.height as f64 * 0.75),
        (size.width as f64 * 0.5, size.height as f64 * 0.5),
        (size.width as f64 * 0.9, size.height as f64 * 0.1),
    ];
    for (px, py) in clicks {
        session.select_pixel(px, py);
        let state = session.current_state();
        println!(
            "click ({:>5.1}, {:>5.1}) -> w: {:.3}, b: {:.3}, Loss: {:.3}",
            px, py, state.w, state.b, state.loss
        );
    }

    println!("\nAdding random points:");
    for _ in 0..3 {
        let point = session.append_random_point()?;
        let state = session.current_state();
        info!("contour ticks now {}", session.contour_segments().len());
        println!(
            "  + ({:.2}, {:.2}) -> best w: {:.3}, b: {:.3}, loss at selection: {:.3}",
            point.x, point.y, state.best_w, state.best_b, state.loss
        );
    }

    let profile = session.loss_profile();
    println!(
        "\nLoss profile at b = {:.3}: {} samples, marker at ({:.1}, {:.1})",
        profile.b,
        profile.curve.len(),
        profile.marker.x,
        profile.marker.y
    );

    println!("\nLegend:");
    for entry in session.legend() {
        println!("  {:<10} hue {:>3}", entry.label, entry.style.hue);
    }

    println!("\nState as JSON: {}", serde_json::to_string(&session.current_state())?);

    Ok(())
}
