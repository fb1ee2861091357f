use thiserror::Error;

/// Rejection reasons for scene edits.
///
/// None of these are fatal: every variant reports an edit the scene
/// refused, with the scene left exactly as it was. Geometric queries that
/// can simply miss return `Option`/empty results instead of an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("a polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("candidate polygon intersects obstacle {index}")]
    OverlapsObstacle { index: usize },

    #[error("a light source lies inside the candidate polygon")]
    EnclosesLightSource,

    #[error("position lies inside an obstacle")]
    InsideObstacle,

    #[error("index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no polygon is being drawn")]
    NoDraft,
}

/// Convenience type alias for results using [`SceneError`].
pub type Result<T> = std::result::Result<T, SceneError>;
