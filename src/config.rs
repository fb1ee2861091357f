/// Numerical tolerances shared by the geometric queries.
///
/// These are empirically tuned; changing one shifts which borderline hits
/// are accepted, so they travel together as a group rather than as
/// scattered literals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Epsilon for the segment-intersection determinant and the
    /// parametric acceptance range `[-eps, 1 + eps]`.
    pub segment_eps: f64,
    /// Squared distance below which a hit counts as the ray's own origin
    /// and is discarded.
    pub origin_eps_sq: f64,
    /// Coordinate-wise epsilon under which two points are the same point.
    pub point_eps: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            segment_eps: 1e-9,
            origin_eps_sq: 1e-9,
            point_eps: 1e-7,
        }
    }
}

/// Parameters of the ray-casting step of the visibility pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastConfig {
    /// Length of every cast ray. Must exceed the farthest obstacle extent
    /// so an unobstructed ray reaches past the scene.
    pub ray_length: f64,
    /// Angular offset (radians) of the two extra rays cast on either side
    /// of each target angle.
    pub angle_offset: f64,
    /// Squared endpoint distance under which consecutive (by angle) rays
    /// collapse into one.
    pub merge_dist_sq: f64,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            ray_length: 5000.0,
            angle_offset: 1e-4,
            merge_dist_sq: 0.25,
        }
    }
}

/// Shape of the dynamic light-source constellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    /// Total number of dynamic sources, the center included.
    pub count: u32,
    /// Radius of the satellite circle around the center.
    pub spread: f64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            count: 5,
            spread: 6.0,
        }
    }
}

/// All tuning constants of the engine, grouped into one value handed to
/// [`Scene`](crate::Scene) at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineConfig {
    pub tolerances: Tolerances,
    pub cast: CastConfig,
    pub lights: LightConfig,
}
