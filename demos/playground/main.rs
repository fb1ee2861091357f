//! Lumigon playground — builds a small scene and prints the light areas.
//!
//! Usage:
//! ```text
//! cargo run --example playground
//! RUST_LOG=lumigon=debug cargo run --example playground   # pipeline stats
//! ```

use lumigon::{Point2, Polygon, Scene};

fn main() -> Result<(), lumigon::SceneError> {
    // Default: INFO for everything, DEBUG for lumigon.
    // Override with the RUST_LOG env var.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .add_directive("lumigon=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut scene = Scene::new();
    scene.set_boundary(-200.0, -200.0, 200.0, 200.0);

    // One obstacle drawn vertex by vertex, the way a UI collaborator
    // would drive the draft API.
    scene.start_polygon(Point2::new(60.0, -20.0));
    scene.add_draft_vertex(Point2::new(100.0, -20.0));
    scene.add_draft_vertex(Point2::new(100.0, 20.0));
    scene.update_draft_cursor(Point2::new(60.0, 20.0));
    scene.add_draft_vertex(Point2::new(60.0, 20.0));
    scene.finalize_polygon()?;

    // One committed directly.
    scene.add_polygon(Polygon::new(vec![
        Point2::new(-120.0, -80.0),
        Point2::new(-60.0, -80.0),
        Point2::new(-90.0, -30.0),
    ]))?;

    scene.set_light_center(Point2::new(-40.0, 0.0))?;
    scene.add_static_light(Point2::new(0.0, 120.0))?;

    println!(
        "scene: {} obstacle(s) + boundary, {} dynamic source(s), {} static source(s), rays {} long",
        scene.polygon_count(),
        scene.dynamic_lights().len(),
        scene.static_light_count(),
        scene.config().cast.ray_length,
    );

    for (i, area) in scene.dynamic_light_areas().iter().enumerate() {
        describe("dynamic", i, area);
    }
    for (i, area) in scene.static_light_areas().iter().enumerate() {
        describe("static", i, area);
    }
    Ok(())
}

fn describe(kind: &str, index: usize, area: &Polygon) {
    let extent = area
        .bounding_box()
        .map_or_else(String::new, |(min, max)| {
            format!(
                ", extent ({:.1}, {:.1})–({:.1}, {:.1})",
                min.x, min.y, max.x, max.y
            )
        });
    println!(
        "{kind} light {index}: {} vertices, area {:.1}{extent}",
        area.vertex_count(),
        area.signed_area(),
    );
}
