//! Orrery - two-body orbit simulation
//!
//! Headless frame driver: loads a scene, feeds it millisecond timestamps the
//! way a render loop would, and logs where the bodies ended up.

use std::path::Path;
use std::process::ExitCode;

use orrery::config::AppConfig;
use orrery::systems::{FrameClock, SimulationSystem};
use orrery_core::{Scene, Session};

/// Load the configured scene, falling back to the built-in one if the file is absent
fn load_scene(path: &str) -> Result<Scene, orrery_core::SceneLoadError> {
    if Path::new(path).exists() {
        let scene = Scene::load(path)?;
        log::info!("Loaded scene '{}' from {}", scene.name, path);
        Ok(scene)
    } else {
        log::warn!("Scene file {} not found, using built-in earth/sun scene", path);
        Ok(Scene::earth_sun())
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.driver.validate()?;
    let scene = load_scene(&config.scene.path)?;
    let mut session = Session::from_scene(
        &scene,
        config.physics.to_physics_config(),
        config.trail.effective_capacity(),
    )?;

    let clock = if config.driver.realtime {
        FrameClock::realtime()
    } else {
        FrameClock::fixed(config.driver.frame_interval_ms)
    };
    let mut simulation =
        SimulationSystem::new(clock).with_log_interval(config.debug.log_every_n_frames);

    let frames = simulation.run_for(
        &mut session,
        config.driver.duration_secs * 1000.0,
        config.driver.frame_interval_ms,
    )?;

    let orbiter = session.orbiter_position()?;
    let attractor = session.attractor_position()?;
    let stats = session.stats();
    log::info!(
        "Ran {} frames: {} applied, {} invalid timestamps, {} degenerate, {} frozen",
        frames,
        stats.applied,
        stats.skipped_invalid_time,
        stats.skipped_degenerate,
        stats.frozen
    );
    log::info!(
        "{} at ({:.3}, {:.3}, {:.3}), {} at ({:.3}, {:.3}, {:.3})",
        session.orbiter_name(),
        orbiter.x,
        orbiter.y,
        orbiter.z,
        session.attractor_name(),
        attractor.x,
        attractor.y,
        attractor.z
    );
    if let (Some(min), Some(max)) = (stats.min_distance, stats.max_distance) {
        log::info!("Separation ranged from {:.3} to {:.3}", min, max);
    }
    log::info!("Trail holds {} points", session.trail().len());

    Ok(())
}

fn main() -> ExitCode {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Orrery");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
