use crate::geometry::Ray;
use crate::math::distance_2d::dist_sq;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::Point2;

/// An ordered vertex loop; edge `i` connects vertex `i` to vertex
/// `(i + 1) % n`, the closing edge is implicit.
///
/// Occlusion queries require at least 3 vertices and answer
/// `false`/`None` below that. A polygon is immutable once committed into
/// a scene; vertex editing happens on the scene's draft instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from a vertex loop (closing edge implied).
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// The vertex loop.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the edges, the implicit closing edge included.
    /// Yields nothing below 2 vertices.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Even-odd (parity) containment test.
    ///
    /// Uses the half-open edge span `p1.y <= y < p2.y` (or its mirror), so
    /// boundary-touching horizontal edges behave consistently: points on
    /// the lower/left boundary count as inside, upper/right as outside.
    #[must_use]
    pub fn contains_point(&self, point: Point2) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        let mut crossings = 0_u32;
        for (p1, p2) in self.edges() {
            let spans = (p1.y <= point.y && point.y < p2.y) || (p2.y <= point.y && point.y < p1.y);
            if spans && point.x < (p2.x - p1.x) * (point.y - p1.y) / (p2.y - p1.y) + p1.x {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Returns `true` if any edge pair intersects, or either polygon's
    /// first vertex lies inside the other (full containment produces no
    /// edge crossings). Both polygons need at least 3 vertices.
    #[must_use]
    pub fn intersects(&self, other: &Polygon, eps: f64) -> bool {
        if self.vertices.len() < 3 || other.vertices.len() < 3 {
            return false;
        }

        for (a0, a1) in self.edges() {
            for (b0, b1) in other.edges() {
                if segment_segment_intersect_2d(a0, a1, b0, b1, eps).is_some() {
                    return true;
                }
            }
        }

        other.contains_point(self.vertices[0]) || self.contains_point(other.vertices[0])
    }

    /// Nearest intersection of the ray's defining segment with this
    /// polygon's edges, measured from the ray's origin.
    ///
    /// Hits within `origin_eps_sq` of the origin are discarded so a ray
    /// starting exactly on an edge does not hit itself.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray, eps: f64, origin_eps_sq: f64) -> Option<Point2> {
        if self.vertices.len() < 2 {
            return None;
        }

        let begin = ray.begin();
        let end = ray.end();
        let mut closest: Option<(f64, Point2)> = None;

        for (e0, e1) in self.edges() {
            if let Some(hit) = segment_segment_intersect_2d(begin, end, e0, e1, eps) {
                let d = dist_sq(begin, hit);
                if d < origin_eps_sq {
                    continue;
                }
                if closest.is_none_or(|(best, _)| d < best) {
                    closest = Some((d, hit));
                }
            }
        }
        closest.map(|(_, hit)| hit)
    }

    /// Crossing points of non-adjacent edge pairs of this polygon.
    ///
    /// Edge pairs sharing a vertex are skipped symmetrically, the
    /// wrap-around pair `(0, n−1)` included. Needs at least 4 vertices.
    #[must_use]
    pub fn self_intersections(&self, eps: f64) -> Vec<Point2> {
        let n = self.vertices.len();
        if n < 4 {
            return Vec::new();
        }

        let mut crossings = Vec::new();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    // Wrap-around neighbours share vertex 0.
                    continue;
                }
                let a0 = self.vertices[i];
                let a1 = self.vertices[(i + 1) % n];
                let b0 = self.vertices[j];
                let b1 = self.vertices[(j + 1) % n];
                if let Some(p) = segment_segment_intersect_2d(a0, a1, b0, b1, eps) {
                    crossings.push(p);
                }
            }
        }
        crossings
    }

    /// Signed area via the shoelace formula.
    ///
    /// Positive for counter-clockwise winding, negative for clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for (p1, p2) in self.edges() {
            sum += p1.x * p2.y - p2.x * p1.y;
        }
        sum * 0.5
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` when empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Some((min, max))
    }
}
