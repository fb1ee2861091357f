use super::Point2;

/// Bounded segment-segment intersection in 2D.
///
/// Solves the 2×2 parametric system for segments `a0→a1` and `b0→b1` via
/// the cross-product determinant. Returns the intersection point if the
/// segments cross, endpoints included within `eps`; returns `None` when
/// the segments are parallel or coincident (coincident overlap is not
/// resolved into a point).
///
/// This is the single shared intersection primitive; every higher-level
/// query routes through it.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: Point2,
    a1: Point2,
    b0: Point2,
    b1: Point2,
    eps: f64,
) -> Option<Point2> {
    let da = a1 - a0;
    let db = b1 - b0;

    let den = da.x * db.y - da.y * db.x;
    if den.abs() < eps {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / den;
    let u = (dx * da.y - dy * da.x) / den;

    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        Some(Point2::new(a0.x + da.x * t, a0.y + da.y * t))
    } else {
        None
    }
}
