use tracing::debug;

use crate::config::{EngineConfig, Tolerances};
use crate::geometry::{Polygon, Ray};
use crate::math::distance_2d::dist_sq;
use crate::math::point_set::PointSet;
use crate::math::Point2;

use super::obstacle::Obstacle;

/// Computes the visibility polygon for a single source point.
///
/// Runs the full pipeline from scratch: cast rays at every obstacle
/// vertex and self-intersection point, shorten each ray to its nearest
/// obstacle hit, sort by angle and collapse near-duplicate endpoints,
/// then read the surviving endpoints off as the polygon's vertex loop
/// (angle order around the source is already the correct winding for a
/// star-shaped region). Returns `None` when fewer than 3 rays survive.
pub(crate) fn light_area(
    source: Point2,
    obstacles: &[Obstacle],
    config: &EngineConfig,
) -> Option<Polygon> {
    let mut rays = cast_rays(source, obstacles, config);
    if rays.is_empty() {
        return None;
    }
    let cast_count = rays.len();

    shorten_rays(&mut rays, obstacles, &config.tolerances);
    merge_adjacent_rays(&mut rays, config.cast.merge_dist_sq);

    if rays.len() < 3 {
        debug!(
            x = source.x,
            y = source.y,
            rays = rays.len(),
            "degenerate light area skipped"
        );
        return None;
    }
    debug!(
        x = source.x,
        y = source.y,
        cast = cast_count,
        merged = rays.len(),
        "light area assembled"
    );
    Some(Polygon::new(rays.iter().map(Ray::end).collect()))
}

/// Casts three rays per target point: one at the exact target angle
/// (skipped when the target coincides with the source) and one on either
/// side of it, offset by the configured corner angle. The offset pair
/// detects the visible surface immediately past an occluding corner.
fn cast_rays(source: Point2, obstacles: &[Obstacle], config: &EngineConfig) -> Vec<Ray> {
    let targets = self_intersection_targets(obstacles, &config.tolerances);
    let vertex_total: usize = obstacles.iter().map(|ob| ob.polygon.vertex_count()).sum();

    let mut rays = Vec::with_capacity((vertex_total + targets.len()) * 3);
    for ob in obstacles {
        for &vertex in ob.polygon.vertices() {
            cast_at_target(&mut rays, source, vertex, config);
        }
    }
    for &target in &targets {
        cast_at_target(&mut rays, source, target, config);
    }
    rays
}

fn cast_at_target(rays: &mut Vec<Ray>, source: Point2, target: Point2, config: &EngineConfig) {
    let angle = (target.y - source.y).atan2(target.x - source.x);
    let length = config.cast.ray_length;
    if dist_sq(source, target) > config.tolerances.origin_eps_sq {
        rays.push(Ray::from_angle(source, angle, length));
    }
    rays.push(Ray::from_angle(source, angle - config.cast.angle_offset, length));
    rays.push(Ray::from_angle(source, angle + config.cast.angle_offset, length));
}

/// Collects the self-intersection points of all user obstacles,
/// deduplicated under the point-identity tolerance. The boundary is
/// excluded from the scan.
fn self_intersection_targets(obstacles: &[Obstacle], tolerances: &Tolerances) -> Vec<Point2> {
    let mut targets = PointSet::new(tolerances.point_eps);
    for ob in obstacles.iter().filter(|ob| !ob.is_boundary()) {
        for crossing in ob.polygon.self_intersections(tolerances.segment_eps) {
            targets.insert(crossing);
        }
    }
    targets.into_points()
}

/// Shortens every ray to its nearest obstacle hit; a ray hitting nothing
/// keeps its full cast length.
fn shorten_rays(rays: &mut [Ray], obstacles: &[Obstacle], tolerances: &Tolerances) {
    for ray in rays.iter_mut() {
        let begin = ray.begin();
        let mut closest = ray.end();
        let mut min_dist_sq = dist_sq(begin, closest);
        for ob in obstacles {
            if let Some(hit) =
                ob.polygon
                    .intersect_ray(ray, tolerances.segment_eps, tolerances.origin_eps_sq)
            {
                let d = dist_sq(begin, hit);
                if d < min_dist_sq {
                    min_dist_sq = d;
                    closest = hit;
                }
            }
        }
        ray.set_end(closest);
    }
}

/// Sorts rays by angle, then collapses runs of consecutive rays whose
/// endpoints fall within the merge threshold of the last kept
/// representative. The first ray of each run survives; the first and
/// last rays of the whole sweep are never compared with each other.
fn merge_adjacent_rays(rays: &mut Vec<Ray>, merge_dist_sq: f64) {
    if rays.len() < 2 {
        return;
    }
    rays.sort_by(|a, b| a.angle().total_cmp(&b.angle()));
    rays.dedup_by(|candidate, kept| dist_sq(candidate.end(), kept.end()) < merge_dist_sq);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::distance_2d::point_to_segment_dist;
    use crate::math::intersect_2d::segment_segment_intersect_2d;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    // ── casting ──

    #[test]
    fn three_rays_per_vertex() {
        let obstacles = vec![Obstacle::user(Polygon::new(vec![
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(-5.0, -5.0),
        ]))];
        let rays = cast_rays(Point2::new(0.0, 0.0), &obstacles, &EngineConfig::default());
        assert_eq!(rays.len(), 9);
        for ray in &rays {
            assert!((ray.length() - 5000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn exact_ray_skipped_when_source_sits_on_vertex() {
        let obstacles = vec![Obstacle::user(Polygon::new(vec![
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(-5.0, -5.0),
        ]))];
        let rays = cast_rays(Point2::new(5.0, 0.0), &obstacles, &EngineConfig::default());
        assert_eq!(rays.len(), 8);
    }

    #[test]
    fn self_intersections_become_targets() {
        // Bow-tie: 4 vertices plus one crossing at (1, 1).
        let obstacles = vec![Obstacle::user(Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]))];
        let rays = cast_rays(Point2::new(10.0, 10.0), &obstacles, &EngineConfig::default());
        assert_eq!(rays.len(), 15);
    }

    #[test]
    fn boundary_self_intersections_are_not_scanned() {
        let obstacles = vec![Obstacle::boundary(Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]))];
        let targets = self_intersection_targets(&obstacles, &Tolerances::default());
        assert!(targets.is_empty());
    }

    // ── shortening ──

    #[test]
    fn rays_stop_at_enclosing_square() {
        let obstacles = vec![Obstacle::boundary(rect(-5.0, -5.0, 5.0, 5.0))];
        let mut rays = cast_rays(Point2::new(0.0, 0.0), &obstacles, &EngineConfig::default());
        shorten_rays(&mut rays, &obstacles, &Tolerances::default());
        for ray in &rays {
            let end = ray.end();
            assert!(
                end.x.abs() <= 5.0 + 1e-6 && end.y.abs() <= 5.0 + 1e-6,
                "end={end:?}"
            );
        }
    }

    #[test]
    fn unobstructed_ray_keeps_full_length() {
        let obstacles = vec![Obstacle::user(rect(10.0, -1.0, 12.0, 1.0))];
        let mut rays = vec![Ray::from_angle(Point2::new(0.0, 0.0), std::f64::consts::PI, 5000.0)];
        shorten_rays(&mut rays, &obstacles, &Tolerances::default());
        assert!((rays[0].length() - 5000.0).abs() < 1e-6);
    }

    // ── merging ──

    #[test]
    fn merge_keeps_first_of_each_run() {
        let origin = Point2::new(0.0, 0.0);
        let mut rays = vec![
            Ray::new(origin, Point2::new(10.0, 0.0)),
            Ray::new(origin, Point2::new(10.0, 0.1)),
            Ray::new(origin, Point2::new(0.0, 10.0)),
        ];
        merge_adjacent_rays(&mut rays, 0.25);
        assert_eq!(rays.len(), 2);
        assert!(rays[0].end().y.abs() < 1e-12, "kept={:?}", rays[0].end());
    }

    #[test]
    fn merge_does_not_wrap_around() {
        let origin = Point2::new(0.0, 0.0);
        // First and last rays of the sweep end close together on the
        // negative-x axis; only a wrap-around pass would merge them.
        let mut rays = vec![
            Ray::new(origin, Point2::new(-10.0, -0.01)),
            Ray::new(origin, Point2::new(10.0, 0.0)),
            Ray::new(origin, Point2::new(-10.0, 0.01)),
        ];
        merge_adjacent_rays(&mut rays, 0.25);
        assert_eq!(rays.len(), 3, "rays={rays:?}");
    }

    #[test]
    fn merge_sorts_by_angle() {
        let origin = Point2::new(0.0, 0.0);
        let mut rays = vec![
            Ray::new(origin, Point2::new(0.0, 10.0)),
            Ray::new(origin, Point2::new(10.0, 0.0)),
            Ray::new(origin, Point2::new(10.0, 10.0)),
        ];
        merge_adjacent_rays(&mut rays, 0.25);
        assert!((rays[0].angle()).abs() < 1e-12);
        assert!((rays[2].angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    // ── full pipeline ──

    #[test]
    fn no_obstacles_no_polygon() {
        assert!(light_area(Point2::new(0.0, 0.0), &[], &EngineConfig::default()).is_none());
    }

    #[test]
    fn empty_scene_collapses_to_four_corner_clusters() {
        let obstacles = vec![Obstacle::boundary(rect(-1000.0, -1000.0, 1000.0, 1000.0))];
        let area = light_area(Point2::new(0.0, 0.0), &obstacles, &EngineConfig::default())
            .unwrap();
        assert_eq!(area.vertex_count(), 4, "area={:?}", area.vertices());

        let corners = [
            Point2::new(-1000.0, -1000.0),
            Point2::new(1000.0, -1000.0),
            Point2::new(1000.0, 1000.0),
            Point2::new(-1000.0, 1000.0),
        ];
        for corner in corners {
            let nearest = area
                .vertices()
                .iter()
                .map(|v| dist_sq(*v, corner).sqrt())
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 1.0, "no vertex near corner {corner:?}");
        }
    }

    #[test]
    fn triangle_silhouette_has_no_interior_endpoints() {
        let triangle = Polygon::new(vec![
            Point2::new(100.0, 0.0),
            Point2::new(-50.0, 87.0),
            Point2::new(-50.0, -87.0),
        ]);
        let obstacles = vec![
            Obstacle::boundary(rect(-10000.0, -10000.0, 10000.0, 10000.0)),
            Obstacle::user(triangle.clone()),
        ];
        let area = light_area(Point2::new(0.0, 0.0), &obstacles, &EngineConfig::default())
            .unwrap();

        for &v in area.vertices() {
            let strictly_inside = triangle.contains_point(v)
                && triangle
                    .edges()
                    .map(|(a, b)| point_to_segment_dist(v, a, b))
                    .fold(f64::INFINITY, f64::min)
                    > 1e-6;
            assert!(!strictly_inside, "endpoint inside the triangle: {v:?}");
        }
    }

    #[test]
    fn visibility_polygon_is_star_shaped() {
        let source = Point2::new(0.0, 0.0);
        let obstacles = vec![
            Obstacle::boundary(rect(-50.0, -50.0, 50.0, 50.0)),
            Obstacle::user(rect(10.0, -5.0, 20.0, 5.0)),
            Obstacle::user(Polygon::new(vec![
                Point2::new(-30.0, -30.0),
                Point2::new(-20.0, -30.0),
                Point2::new(-25.0, -20.0),
            ])),
        ];
        let area = light_area(source, &obstacles, &EngineConfig::default()).unwrap();

        // Every vertex must be reachable from the source without crossing
        // an obstacle edge strictly before it.
        for &v in area.vertices() {
            let reach = dist_sq(source, v).sqrt();
            for ob in &obstacles {
                for (a, b) in ob.polygon.edges() {
                    if let Some(hit) = segment_segment_intersect_2d(source, v, a, b, 1e-9) {
                        let d = dist_sq(source, hit).sqrt();
                        if d * d < 1e-9 {
                            continue;
                        }
                        assert!(
                            d >= reach - 1e-6,
                            "segment to {v:?} blocked at {hit:?} ({d} < {reach})"
                        );
                    }
                }
            }
        }
    }
}
