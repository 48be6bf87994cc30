//! Drop demo: objects fall onto a static ground slab
//!
//! Usage: `drop_demo [scene.toml|scene.ron] [steps]`
//!
//! Without a scene file a ground slab plus a handful of randomly placed
//! boxes, spheres and cylinders is generated. The world is stepped at its
//! fixed timestep and every object's mesh is synchronized after each step.

use physics_scene::prelude::*;
use rand::prelude::*;

// Configuration constants
const DEFAULT_STEPS: u32 = 300;
const RANDOM_OBJECTS: usize = 12;
const REPORT_INTERVAL: u32 = 60;
const PALETTE: [u32; 5] = [0xe63946, 0xf1a208, 0x2a9d8f, 0x457b9d, 0x00ff00];

fn random_scene(rng: &mut impl Rng) -> SceneConfig {
    let mut config = SceneConfig::default().with_object(
        "box",
        ObjectConfig::default()
            .with_mass(0.0)
            .with_size([20.0, 1.0, 20.0])
            .with_position([0.0, -0.5, 0.0])
            .with_color(0x808080),
    );

    for i in 0..RANDOM_OBJECTS {
        let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
        let extent = rng.gen_range(0.3..1.2);
        let options = ObjectConfig::default()
            .with_mass(rng.gen_range(0.5..5.0))
            .with_size([extent, extent * 1.5, extent])
            .with_position([
                rng.gen_range(-4.0..4.0),
                2.0 + i as f32 * 1.5,
                rng.gen_range(-4.0..4.0),
            ])
            .with_color(PALETTE[i % PALETTE.len()]);
        config = config.with_object(kind.as_str(), options);
    }

    config
}

fn report(scene: &Scene) {
    log::info!("t = {:.2}s", scene.world().elapsed());
    for (index, object) in scene.objects().iter().enumerate() {
        let p = object.mesh.transform.position;
        log::info!(
            "  #{:<2} {:<8} ({:>7.3}, {:>7.3}, {:>7.3})",
            index,
            object.shape().kind(),
            p.x,
            p.y,
            p.z
        );
    }
}

fn run(scene_path: Option<&str>, steps: u32) -> Result<(), SceneError> {
    let mut scene = match scene_path {
        Some(path) => Scene::load(path)?,
        None => {
            log::info!("No scene file given, generating a random drop scene");
            random_scene(&mut thread_rng()).build()?
        }
    };

    log::info!(
        "Simulating {} steps with {} bodies",
        steps,
        scene.world().body_count()
    );

    for step in 1..=steps {
        scene.step()?;
        if step % REPORT_INTERVAL == 0 {
            report(&scene);
        }
    }

    let resting = scene
        .objects()
        .iter()
        .filter(|object| !object.is_static())
        .filter_map(|object| scene.world().body(object.body_handle()))
        .filter(|body| body.is_sleeping())
        .count();
    log::info!("{} dynamic bodies asleep after {} steps", resting, steps);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    physics_scene::foundation::logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting drop demo");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let scene_path = args.first().map(String::as_str);
    let steps = match args.get(1) {
        Some(value) => value.parse()?,
        None => DEFAULT_STEPS,
    };

    match run(scene_path, steps) {
        Ok(()) => {
            log::info!("Drop demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Drop demo failed: {}", e);
            Err(e.into())
        }
    }
}
