use crate::dataset::Dataset;
use crate::mapper::{ParameterSpaceMapper, PixelPoint, Range, SurfaceSize};
use crate::metrics::loss;
use serde::Serialize;

/// Loss against `w` with `b` held fixed, laid out on a panel whose vertical
/// axis is loss (growing upward).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LossProfile {
    pub b: f64,
    pub curve: Vec<PixelPoint>,
    pub marker: PixelPoint,
    pub marker_loss: f64,
}

impl LossProfile {
    /// One sample per column edge across `w_range` (`width + 1` in all),
    /// plus the marker for `current_w`. Losses above `loss_axis.max()` land
    /// above the panel top.
    pub fn compute(
        dataset: &Dataset,
        w_range: Range,
        b: f64,
        current_w: f64,
        size: SurfaceSize,
        loss_axis: Range,
    ) -> Self {
        // reuse the parameter mapper with loss standing in for `b`
        let mapper = ParameterSpaceMapper::new(w_range, loss_axis, size);

        let curve = (0..=size.width)
            .map(|px| {
                let w = w_range.lerp(px as f64 / size.width as f64);
                mapper.to_pixel(w, loss(dataset, w, b))
            })
            .collect();

        let marker_loss = loss(dataset, current_w, b);
        Self {
            b,
            curve,
            marker: mapper.to_pixel(current_w, marker_loss),
            marker_loss,
        }
    }
}
