use thiserror::Error;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VizError {
    /// The dataset cannot produce a finite least-squares line.
    #[error("degenerate dataset ({n_samples} samples): {reason}")]
    DegenerateDataset { n_samples: usize, reason: String },
    #[error("point {index} is not finite: ({x}, {y})")]
    InvalidPoint { index: usize, x: f64, y: f64 },
    #[error("x has {xs} samples but y has {ys}")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("invalid range [{min}, {max}]: min must be finite and below max")]
    InvalidRange { min: f64, max: f64 },
    #[error("model not fitted, call fit() first")]
    NotFitted,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        VizError::InvalidConfig(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_message() {
        let err = VizError::DegenerateDataset {
            n_samples: 1,
            reason: "need at least 2 points".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "degenerate dataset (1 samples): need at least 2 points"
        );
    }

    #[test]
    fn test_json_error_becomes_invalid_config() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: VizError = parse.into();
        assert!(matches!(err, VizError::InvalidConfig(_)));
    }
}
