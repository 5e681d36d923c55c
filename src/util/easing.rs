//! Easing functions for animation interpolation.

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Cubic ease-out: `1 - (1 - t)³`. Decelerates toward the endpoint.
    #[default]
    EaseOutCubic,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::EaseOutCubic => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints_are_exact() {
        let ease = EasingFunction::EaseOutCubic;
        assert_eq!(ease.evaluate(0.0), 0.0);
        assert_eq!(ease.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_out_cubic_shape() {
        let ease = EasingFunction::EaseOutCubic;
        // 1 - 0.5³ = 0.875
        assert!((ease.evaluate(0.5) - 0.875).abs() < 1e-6);
        assert!(ease.evaluate(0.25) > 0.25);
    }

    #[test]
    fn test_input_clamping() {
        let ease = EasingFunction::EaseOutCubic;
        assert_eq!(ease.evaluate(-0.5), 0.0);
        assert_eq!(ease.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_default_is_ease_out_cubic() {
        assert_eq!(EasingFunction::default(), EasingFunction::EaseOutCubic);
    }
}
