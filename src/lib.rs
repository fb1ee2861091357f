pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod scene;

pub use config::EngineConfig;
pub use error::{Result, SceneError};
pub use geometry::{Polygon, Ray};
pub use math::{Point2, Vector2};
pub use scene::Scene;
