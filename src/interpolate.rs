use crate::linear_model::Parameters;

/// Straight-line path between two anchors in parameter space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathInterpolator {
    pub from: Parameters,
    pub to: Parameters,
}

impl PathInterpolator {
    pub fn new(from: Parameters, to: Parameters) -> Self {
        Self { from, to }
    }

    /// `t = 0` yields `from` and `t = 1` yields `to`, bit for bit.
    pub fn at(&self, t: f64) -> Parameters {
        interpolate(self.from, self.to, t)
    }

    /// Slider position in `[0, 100]`.
    pub fn at_progress(&self, progress: f64) -> Parameters {
        self.at(from_progress(progress))
    }
}

pub fn interpolate(a: Parameters, b: Parameters, t: f64) -> Parameters {
    if t == 0.0 {
        return a;
    }
    if t == 1.0 {
        return b;
    }
    Parameters::new(a.w + (b.w - a.w) * t, a.b + (b.b - a.b) * t)
}

pub fn from_progress(progress: f64) -> f64 {
    progress / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        let a = Parameters::new(0.1, -0.7);
        let b = Parameters::new(2.0 / 3.0, 4.0 / 3.0);

        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);

        let path = PathInterpolator::new(a, b);
        assert_eq!(path.at_progress(0.0), a);
        assert_eq!(path.at_progress(100.0), b);
    }

    #[test]
    fn test_midpoint() {
        let mid = interpolate(Parameters::new(0.0, 0.0), Parameters::new(2.0, 4.0), 0.5);
        assert_eq!(mid, Parameters::new(1.0, 2.0));
    }

    #[test]
    fn test_monotonic_in_each_coordinate() {
        let a = Parameters::new(1.5, -0.5);
        let b = Parameters::new(-0.25, 3.0);
        let path = PathInterpolator::new(a, b);

        let mut prev = path.at_progress(0.0);
        for step in 1..=100 {
            let next = path.at_progress(step as f64);
            assert!(next.w <= prev.w);
            assert!(next.b >= prev.b);
            prev = next;
        }
    }
}
