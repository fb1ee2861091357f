use crate::geometry::Polygon;

/// Role of an obstacle within the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// The outer bounding frame. Occludes rays like any obstacle, but is
    /// excluded from collision validation, self-intersection scanning,
    /// and the logical polygon index space.
    Boundary,
    /// A user-committed occluder.
    User,
}

/// A committed polygon tagged with its role.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub polygon: Polygon,
}

impl Obstacle {
    /// Wraps a polygon as the scene boundary.
    #[must_use]
    pub fn boundary(polygon: Polygon) -> Self {
        Self {
            kind: ObstacleKind::Boundary,
            polygon,
        }
    }

    /// Wraps a polygon as a user occluder.
    #[must_use]
    pub fn user(polygon: Polygon) -> Self {
        Self {
            kind: ObstacleKind::User,
            polygon,
        }
    }

    /// Returns `true` for the boundary obstacle.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.kind == ObstacleKind::Boundary
    }
}
