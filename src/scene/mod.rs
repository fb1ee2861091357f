pub mod draft;
pub mod obstacle;

mod lights;
mod visibility;

pub use draft::DraftPolygon;
pub use obstacle::{Obstacle, ObstacleKind};

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{Result, SceneError};
use crate::geometry::Polygon;
use crate::math::Point2;

/// Extra room added on each side of the boundary rectangle so geometry
/// sitting exactly on the requested frame still falls inside it.
const BOUNDARY_MARGIN: f64 = 1.0;

/// Central owner of all obstacles and light sources.
///
/// The scene validates polygon edits, maintains the dynamic light
/// constellation and the static light list, and runs the visibility
/// pipeline over its obstacles. Obstacle slot 0 holds the boundary once
/// [`set_boundary`](Scene::set_boundary) has been called; the public
/// polygon index space counts user obstacles only.
///
/// All state is owned here — callers read through accessors and never
/// hold references across edits.
#[derive(Debug, Clone)]
pub struct Scene {
    config: EngineConfig,
    obstacles: Vec<Obstacle>,
    draft: Option<DraftPolygon>,
    light_center: Point2,
    dynamic_lights: Vec<Point2>,
    static_lights: Vec<Point2>,
}

impl Scene {
    /// Creates a scene with the reference configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a scene with an explicit configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let light_center = Point2::new(0.0, 0.0);
        let dynamic_lights = lights::constellation(light_center, config.lights);
        Self {
            config,
            obstacles: Vec::new(),
            draft: None,
            light_center,
            dynamic_lights,
            static_lights: Vec::new(),
        }
    }

    /// The configuration this scene was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Obstacle registry ---

    /// Installs the outer bounding frame: a rectangle over
    /// `(min_x, min_y)`–`(max_x, max_y)` expanded by a fixed margin on
    /// each side. Replaces the previous boundary if one exists; otherwise
    /// inserts it at obstacle slot 0. Call once during scene setup,
    /// before obstacles are committed.
    pub fn set_boundary(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        let polygon = Polygon::new(vec![
            Point2::new(min_x - BOUNDARY_MARGIN, min_y - BOUNDARY_MARGIN),
            Point2::new(max_x + BOUNDARY_MARGIN, min_y - BOUNDARY_MARGIN),
            Point2::new(max_x + BOUNDARY_MARGIN, max_y + BOUNDARY_MARGIN),
            Point2::new(min_x - BOUNDARY_MARGIN, max_y + BOUNDARY_MARGIN),
        ]);
        match self.obstacles.first_mut() {
            Some(first) if first.is_boundary() => *first = Obstacle::boundary(polygon),
            _ => self.obstacles.insert(0, Obstacle::boundary(polygon)),
        }
    }

    /// Commits a polygon as a user obstacle. Any in-progress draft is
    /// discarded, whether or not the commit succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error — leaving the obstacle list unchanged — if the
    /// polygon has fewer than 3 vertices, intersects an existing user
    /// obstacle, or encloses a light source.
    pub fn add_polygon(&mut self, polygon: Polygon) -> Result<()> {
        self.draft = None;

        let count = polygon.vertex_count();
        if count < 3 {
            debug!(count, "polygon rejected: too few vertices");
            return Err(SceneError::TooFewVertices { count });
        }

        let eps = self.config.tolerances.segment_eps;
        for (index, ob) in self.user_obstacles().enumerate() {
            if polygon.intersects(&ob.polygon, eps) {
                debug!(index, "polygon rejected: intersects existing obstacle");
                return Err(SceneError::OverlapsObstacle { index });
            }
        }

        let encloses_light = self
            .dynamic_lights
            .iter()
            .chain(self.static_lights.iter())
            .any(|&light| polygon.contains_point(light));
        if encloses_light {
            debug!("polygon rejected: encloses a light source");
            return Err(SceneError::EnclosesLightSource);
        }

        self.obstacles.push(Obstacle::user(polygon));
        Ok(())
    }

    /// Removes the user obstacle at `index` (boundary excluded from the
    /// index space).
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn remove_polygon(&mut self, index: usize) -> Result<()> {
        let list_index = self
            .user_list_index(index)
            .ok_or(SceneError::IndexOutOfRange {
                index,
                len: self.polygon_count(),
            })?;
        self.obstacles.remove(list_index);
        Ok(())
    }

    /// Number of user obstacles (the boundary does not count).
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.user_obstacles().count()
    }

    /// All obstacles in list order, the boundary included — the render
    /// view.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The boundary polygon, if one has been installed.
    #[must_use]
    pub fn boundary(&self) -> Option<&Polygon> {
        self.obstacles
            .first()
            .filter(|ob| ob.is_boundary())
            .map(|ob| &ob.polygon)
    }

    /// The user obstacle at `index`, if in range.
    #[must_use]
    pub fn user_polygon(&self, index: usize) -> Option<&Polygon> {
        self.user_list_index(index)
            .map(|list_index| &self.obstacles[list_index].polygon)
    }

    /// Maps a user-facing index to an obstacle-list index. The boundary
    /// occupies slot 0 when present, so the mapping is a fixed offset;
    /// this is the only place that offset exists.
    fn user_list_index(&self, index: usize) -> Option<usize> {
        let offset = usize::from(self.obstacles.first().is_some_and(Obstacle::is_boundary));
        let list_index = index.checked_add(offset)?;
        match self.obstacles.get(list_index) {
            Some(ob) if !ob.is_boundary() => Some(list_index),
            _ => None,
        }
    }

    fn user_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|ob| !ob.is_boundary())
    }

    fn point_in_user_obstacle(&self, point: Point2) -> bool {
        self.user_obstacles()
            .any(|ob| ob.polygon.contains_point(point))
    }

    // --- Polygon editing ---

    /// Begins drawing a new polygon at `first`. An in-progress draft is
    /// finalized first (committed if it qualifies, discarded otherwise).
    pub fn start_polygon(&mut self, first: Point2) {
        let _ = self.finalize_polygon();
        self.draft = Some(DraftPolygon::new(first));
    }

    /// Fixes the draft's cursor as a vertex at `vertex`. No-op when no
    /// draft is in progress.
    pub fn add_draft_vertex(&mut self, vertex: Point2) {
        if let Some(draft) = &mut self.draft {
            draft.push_vertex(vertex);
        }
    }

    /// Moves the draft's live cursor without fixing a vertex. No-op when
    /// no draft is in progress.
    pub fn update_draft_cursor(&mut self, position: Point2) {
        if let Some(draft) = &mut self.draft {
            draft.set_cursor(position);
        }
    }

    /// Ends the draft, dropping the live cursor and committing the fixed
    /// vertices via [`add_polygon`](Scene::add_polygon). The draft is
    /// cleared in every case.
    ///
    /// # Errors
    ///
    /// Returns an error if no draft is in progress, or the commit was
    /// rejected (see [`add_polygon`](Scene::add_polygon)).
    pub fn finalize_polygon(&mut self) -> Result<()> {
        let draft = self.draft.take().ok_or(SceneError::NoDraft)?;
        let vertices = draft.into_fixed();
        if vertices.len() < 3 {
            debug!(count = vertices.len(), "draft discarded: too few vertices");
            return Err(SceneError::TooFewVertices {
                count: vertices.len(),
            });
        }
        self.add_polygon(Polygon::new(vertices))
    }

    /// The polygon currently being drawn, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&DraftPolygon> {
        self.draft.as_ref()
    }

    // --- Light sources ---

    /// Moves the dynamic light center. The constellation is rebuilt only
    /// when the center actually changes (exact comparison).
    ///
    /// # Errors
    ///
    /// Returns an error — leaving the lights unchanged — if `center`
    /// lies inside a user obstacle.
    pub fn set_light_center(&mut self, center: Point2) -> Result<()> {
        if self.point_in_user_obstacle(center) {
            debug!(x = center.x, y = center.y, "light center rejected: inside an obstacle");
            return Err(SceneError::InsideObstacle);
        }
        if center != self.light_center {
            self.light_center = center;
            self.dynamic_lights = lights::constellation(center, self.config.lights);
        }
        Ok(())
    }

    /// The dynamic light center.
    #[must_use]
    pub fn light_center(&self) -> Point2 {
        self.light_center
    }

    /// The dynamic constellation: the center followed by its satellites.
    #[must_use]
    pub fn dynamic_lights(&self) -> &[Point2] {
        &self.dynamic_lights
    }

    /// Places a persistent static light source.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` lies inside a user obstacle.
    pub fn add_static_light(&mut self, position: Point2) -> Result<()> {
        if self.point_in_user_obstacle(position) {
            debug!(x = position.x, y = position.y, "static light rejected: inside an obstacle");
            return Err(SceneError::InsideObstacle);
        }
        self.static_lights.push(position);
        Ok(())
    }

    /// Removes the static light source at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn remove_static_light(&mut self, index: usize) -> Result<()> {
        if index >= self.static_lights.len() {
            return Err(SceneError::IndexOutOfRange {
                index,
                len: self.static_lights.len(),
            });
        }
        self.static_lights.remove(index);
        Ok(())
    }

    /// The static light sources in placement order.
    #[must_use]
    pub fn static_lights(&self) -> &[Point2] {
        &self.static_lights
    }

    /// Number of static light sources.
    #[must_use]
    pub fn static_light_count(&self) -> usize {
        self.static_lights.len()
    }

    // --- Visibility ---

    /// Computes the visibility polygon for an arbitrary source point, or
    /// `None` when the region is degenerate (fewer than 3 rays survive
    /// the pipeline, e.g. in an empty scene).
    #[must_use]
    pub fn light_area(&self, source: Point2) -> Option<Polygon> {
        visibility::light_area(source, &self.obstacles, &self.config)
    }

    /// Visibility polygons for the dynamic constellation, one per source
    /// that yields a non-degenerate region, in source order.
    #[must_use]
    pub fn dynamic_light_areas(&self) -> Vec<Polygon> {
        self.light_areas_for(&self.dynamic_lights)
    }

    /// Visibility polygons for the static light sources, one per source
    /// that yields a non-degenerate region, in placement order.
    #[must_use]
    pub fn static_light_areas(&self) -> Vec<Polygon> {
        self.light_areas_for(&self.static_lights)
    }

    fn light_areas_for(&self, sources: &[Point2]) -> Vec<Polygon> {
        sources
            .iter()
            .filter_map(|&source| visibility::light_area(source, &self.obstacles, &self.config))
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
