//! Time-based camera flights between two poses.

use glam::Vec3;
use web_time::Duration;

use crate::util::easing::EasingFunction;

/// Eye and target of a camera, as written by the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub eye: Vec3,
    /// Look-at target.
    pub target: Vec3,
}

#[derive(Debug, Clone)]
struct Flight {
    from: CameraPose,
    to: CameraPose,
    duration: Duration,
    elapsed: Duration,
}

/// Interpolates the camera eye and target with an ease-out-cubic curve.
///
/// There is no cancel primitive. Calling [`animate`](Self::animate) while a
/// flight is running replaces it, and the new flight starts from whatever
/// pose the caller passes in: the engine always hands over the live
/// (possibly mid-flight) camera pose, so rapid re-triggering produces a
/// non-monotonic overall path.
#[derive(Debug, Clone, Default)]
pub struct CameraAnimator {
    flight: Option<Flight>,
    easing: EasingFunction,
}

impl CameraAnimator {
    /// Create an idle animator using ease-out-cubic.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a flight from `from` to `to` lasting `duration`.
    pub fn animate(
        &mut self,
        from: CameraPose,
        to: CameraPose,
        duration: Duration,
    ) {
        if self.flight.is_some() {
            log::debug!("camera flight superseded");
        }
        self.flight = Some(Flight {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        });
    }

    /// Whether a flight is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    /// Advance by `dt` and return the pose to commit to the live camera,
    /// or `None` when idle. The flight ends on the tick where elapsed time
    /// reaches the duration; that tick returns the exact destination.
    pub fn tick(&mut self, dt: Duration) -> Option<CameraPose> {
        let flight = self.flight.as_mut()?;
        flight.elapsed += dt;

        let progress = if flight.duration.is_zero() {
            1.0
        } else {
            (flight.elapsed.as_secs_f32() / flight.duration.as_secs_f32())
                .clamp(0.0, 1.0)
        };
        let eased = self.easing.evaluate(progress);

        if eased >= 1.0 {
            let to = flight.to;
            self.flight = None;
            return Some(to);
        }

        Some(CameraPose {
            eye: flight.from.eye.lerp(flight.to.eye, eased),
            target: flight.from.target.lerp(flight.to.target, eased),
        })
    }
}
