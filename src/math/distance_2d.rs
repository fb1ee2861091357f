use super::Point2;

/// Squared Euclidean distance between two points.
#[must_use]
pub fn dist_sq(a: Point2, b: Point2) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Tolerance identity: `true` if both coordinate deltas are within `eps`.
#[must_use]
pub fn points_coincident(a: Point2, b: Point2, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// Returns the minimum distance from point `p` to the line segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: Point2, a: Point2, b: Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return dist_sq(p, a).sqrt();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest = Point2::new(a.x + t * dx, a.y + t * dy);
    dist_sq(p, closest).sqrt()
}
