use crate::math::distance_2d::dist_sq;
use crate::math::Point2;

/// A directed segment used as a sight ray.
///
/// Rays are transient: the visibility pipeline creates them at full
/// length, shortens their endpoint to the nearest obstacle hit, then
/// consumes them into a light polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    begin: Point2,
    end: Point2,
}

impl Ray {
    /// Creates a ray from explicit endpoints.
    #[must_use]
    pub fn new(begin: Point2, end: Point2) -> Self {
        Self { begin, end }
    }

    /// Creates a ray from an origin, direction angle (radians), and length.
    #[must_use]
    pub fn from_angle(begin: Point2, angle: f64, length: f64) -> Self {
        let end = Point2::new(
            begin.x + length * angle.cos(),
            begin.y + length * angle.sin(),
        );
        Self { begin, end }
    }

    /// The ray's origin.
    #[must_use]
    pub fn begin(&self) -> Point2 {
        self.begin
    }

    /// The ray's current endpoint.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Moves the endpoint, shortening (or redirecting) the ray.
    pub fn set_end(&mut self, end: Point2) {
        self.end = end;
    }

    /// Direction angle in radians, `atan2(end − begin)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        let v = self.end - self.begin;
        v.y.atan2(v.x)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        dist_sq(self.begin, self.end).sqrt()
    }

    /// Returns this ray rotated around its origin by `delta` radians.
    #[must_use]
    pub fn rotated(&self, delta: f64) -> Self {
        Self::from_angle(self.begin, self.angle() + delta, self.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn from_angle_places_endpoint() {
        let ray = Ray::from_angle(Point2::new(1.0, 1.0), 0.0, 5.0);
        assert!((ray.end().x - 6.0).abs() < 1e-12);
        assert!((ray.end().y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn angle_and_length_roundtrip() {
        let ray = Ray::from_angle(Point2::new(0.0, 0.0), FRAC_PI_4, 2.0);
        assert!((ray.angle() - FRAC_PI_4).abs() < 1e-12);
        assert!((ray.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn angle_of_explicit_endpoints() {
        let ray = Ray::new(Point2::new(0.0, 0.0), Point2::new(0.0, 3.0));
        assert!((ray.angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((ray.length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn set_end_shortens() {
        let mut ray = Ray::from_angle(Point2::new(0.0, 0.0), 0.0, 10.0);
        ray.set_end(Point2::new(4.0, 0.0));
        assert!((ray.length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rotated_preserves_origin_and_length() {
        let ray = Ray::from_angle(Point2::new(2.0, -1.0), 0.3, 7.0);
        let turned = ray.rotated(PI);
        assert!((turned.begin().x - 2.0).abs() < 1e-12);
        assert!((turned.begin().y + 1.0).abs() < 1e-12);
        assert!((turned.length() - 7.0).abs() < 1e-9);
        assert!((turned.angle() - (0.3 - PI)).abs() < 1e-9, "angle={}", turned.angle());
    }
}
