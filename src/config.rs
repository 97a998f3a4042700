use crate::contour::{ContourExtractor, DEFAULT_BAND, DEFAULT_LEVELS};
use crate::dataset::Point;
use crate::error::{Result, VizError};
use crate::mapper::{ParameterSpaceMapper, Range, SurfaceSize};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the `initial` end of the interpolation path comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// `w = 0, b = 0`
    #[default]
    Zero,
    /// Uniform draw inside the visible parameter ranges.
    Random,
}

/// Session settings. Every field has a default, so a JSON document only
/// needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub points: Vec<Point>,
    pub w_range: Range,
    pub b_range: Range,
    pub surface: SurfaceSize,
    pub levels: Vec<f64>,
    pub band: f64,
    pub chart_x_max: f64,
    pub chart_y_max: f64,
    pub marker_radius: f64,
    pub profile_loss_max: f64,
    pub anchor: AnchorMode,
    pub seed: u64,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            points: vec![Point::new(1.0, 2.0), Point::new(4.0, 4.0)],
            w_range: Range::from_valid(-1.0, 3.0),
            b_range: Range::from_valid(-1.0, 5.0),
            surface: SurfaceSize::default(),
            levels: DEFAULT_LEVELS.to_vec(),
            band: DEFAULT_BAND,
            chart_x_max: 5.0,
            chart_y_max: 6.0,
            marker_radius: 5.0,
            profile_loss_max: 16.0,
            anchor: AnchorMode::Zero,
            seed: 42,
        }
    }
}

impl VizConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| VizError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(VizError::InvalidConfig(format!(
                "surface must be non-empty, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }

        for (name, value) in [
            ("chart_x_max", self.chart_x_max),
            ("chart_y_max", self.chart_y_max),
            ("marker_radius", self.marker_radius),
            ("profile_loss_max", self.profile_loss_max),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(VizError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        self.contour_extractor().map(|_| ())
    }

    pub fn mapper(&self) -> ParameterSpaceMapper {
        ParameterSpaceMapper::new(self.w_range, self.b_range, self.surface)
    }

    pub fn contour_extractor(&self) -> Result<ContourExtractor> {
        ContourExtractor::new(self.levels.clone(), self.band)
    }

    /// Axis extents of the scatter chart, `[0, chart_x_max] × [0, chart_y_max]`.
    pub fn chart_ranges(&self) -> Result<(Range, Range)> {
        Ok((
            Range::new(0.0, self.chart_x_max)?,
            Range::new(0.0, self.chart_y_max)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = VizConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.levels, vec![0.5, 1.0, 2.0, 4.0, 8.0, 16.0]);
        assert_eq!(config.surface, SurfaceSize::new(300, 300));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = VizConfig::from_json_str(
            r#"{"surface": {"width": 120, "height": 80}, "anchor": "random", "seed": 9}"#,
        )
        .unwrap();

        assert_eq!(config.surface, SurfaceSize::new(120, 80));
        assert_eq!(config.anchor, AnchorMode::Random);
        assert_eq!(config.seed, 9);
        assert_eq!(config.w_range, Range::new(-1.0, 3.0).unwrap());
        assert_eq!(config.band, 0.1);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(VizConfig::from_json_str(r#"{"levels": [2.0, 1.0]}"#).is_err());
        assert!(VizConfig::from_json_str(r#"{"band": -0.1}"#).is_err());
        assert!(VizConfig::from_json_str(r#"{"surface": {"width": 0, "height": 10}}"#).is_err());
        assert!(VizConfig::from_json_str(r#"{"w_range": {"min": 3.0, "max": 1.0}}"#).is_err());
        assert!(VizConfig::from_json_str(r#"{"chart_x_max": 0.0}"#).is_err());
        assert!(VizConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = VizConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(VizError::InvalidConfig(_))));
    }
}
