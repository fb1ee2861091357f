pub mod distance_2d;
pub mod intersect_2d;
pub mod point_set;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;
