use glam::Vec3;

use crate::error::InteractionError;

/// Up to two picked points and the distance between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementSession {
    points: Vec<Vec3>,
}

impl MeasurementSession {
    /// Points recorded so far (0, 1 or 2).
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// True once two points are recorded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() == 2
    }

    /// Euclidean distance, available once complete.
    #[must_use]
    pub fn distance(&self) -> Option<f32> {
        match self.points.as_slice() {
            [a, b] => Some(a.distance(*b)),
            _ => None,
        }
    }

    /// Add a point. Returns the distance when this was the second one.
    ///
    /// # Errors
    ///
    /// [`InteractionError::MeasurementComplete`] when two points are
    /// already recorded; the session is left as is.
    pub fn record(
        &mut self,
        point: Vec3,
    ) -> Result<Option<f32>, InteractionError> {
        if self.is_complete() {
            return Err(InteractionError::MeasurementComplete);
        }
        self.points.push(point);
        Ok(self.distance())
    }

    /// Drop all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_point_publishes_euclidean_distance() {
        let mut session = MeasurementSession::default();
        assert_eq!(session.record(Vec3::ZERO), Ok(None));
        let d = session.record(Vec3::new(3.0, 4.0, 0.0)).unwrap().unwrap();
        assert!((d - 5.0).abs() < 1e-6);
        assert_eq!(format!("{d:.3}"), "5.000");
    }

    #[test]
    fn third_point_is_rejected() {
        let mut session = MeasurementSession::default();
        let _ = session.record(Vec3::ZERO).unwrap();
        let _ = session.record(Vec3::X).unwrap();
        assert_eq!(
            session.record(Vec3::Y),
            Err(InteractionError::MeasurementComplete)
        );
        assert_eq!(session.points(), &[Vec3::ZERO, Vec3::X]);
    }

    #[test]
    fn clear_allows_a_new_measurement() {
        let mut session = MeasurementSession::default();
        let _ = session.record(Vec3::ZERO).unwrap();
        let _ = session.record(Vec3::X).unwrap();
        session.clear();
        assert_eq!(session.distance(), None);
        assert_eq!(session.record(Vec3::Y), Ok(None));
    }
}
