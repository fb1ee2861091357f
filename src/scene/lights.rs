use std::f64::consts::PI;

use crate::config::LightConfig;
use crate::math::Point2;

/// Spreads below this produce no satellites: they would all sit on the
/// center and multiply pipeline cost for identical output.
const MIN_SPREAD: f64 = 1e-6;

/// Builds the dynamic light constellation for a center position.
///
/// The center itself is source 0; `count − 1` satellites follow, evenly
/// spaced on a circle of radius `spread` (angle step `2π / (count − 1)`).
/// A count of 0 yields no sources; a count of 1, the center alone.
/// Pure function of its inputs — the whole constellation is rebuilt on
/// every center change.
#[must_use]
pub(crate) fn constellation(center: Point2, config: LightConfig) -> Vec<Point2> {
    let mut sources = Vec::new();
    if config.count == 0 {
        return sources;
    }
    sources.push(center);

    let satellites = config.count - 1;
    if satellites > 0 && config.spread > MIN_SPREAD {
        let angle_step = 2.0 * PI / f64::from(satellites);
        for i in 0..satellites {
            let angle = f64::from(i) * angle_step;
            sources.push(Point2::new(
                center.x + config.spread * angle.cos(),
                center.y + config.spread * angle.sin(),
            ));
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::distance_2d::dist_sq;

    #[test]
    fn center_is_source_zero() {
        let center = Point2::new(3.0, -2.0);
        let sources = constellation(center, LightConfig::default());
        assert_eq!(sources.len(), 5);
        assert!(dist_sq(sources[0], center) < 1e-18);
    }

    #[test]
    fn satellites_sit_on_the_spread_circle() {
        let center = Point2::new(1.0, 1.0);
        let config = LightConfig {
            count: 5,
            spread: 6.0,
        };
        for satellite in &constellation(center, config)[1..] {
            let r = dist_sq(*satellite, center).sqrt();
            assert!((r - 6.0).abs() < 1e-9, "radius={r}");
        }
    }

    #[test]
    fn satellites_are_evenly_spaced() {
        let center = Point2::new(0.0, 0.0);
        let config = LightConfig {
            count: 5,
            spread: 2.0,
        };
        let sources = constellation(center, config);
        let step = 2.0 * PI / 4.0;
        for (i, satellite) in sources[1..].iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let angle = i as f64 * step;
            assert!((satellite.x - 2.0 * angle.cos()).abs() < 1e-9);
            assert!((satellite.y - 2.0 * angle.sin()).abs() < 1e-9);
        }
    }

    #[test]
    fn count_one_is_center_only() {
        let sources = constellation(
            Point2::new(0.0, 0.0),
            LightConfig {
                count: 1,
                spread: 6.0,
            },
        );
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn count_zero_is_empty() {
        let sources = constellation(
            Point2::new(0.0, 0.0),
            LightConfig {
                count: 0,
                spread: 6.0,
            },
        );
        assert!(sources.is_empty());
    }

    #[test]
    fn vanishing_spread_collapses_to_center() {
        let sources = constellation(
            Point2::new(4.0, 4.0),
            LightConfig {
                count: 5,
                spread: 0.0,
            },
        );
        assert_eq!(sources.len(), 1);
    }
}
