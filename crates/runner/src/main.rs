//! Headless flight session.
//!
//! Loads content, puts the player in a ship surrounded by a few fleets and
//! flies a fixed number of frames with scripted thinkers, then logs what
//! happened.
//!
//! ```bash
//! FLIGHT_FRAMES=3600 RUST_LOG=flight_core=debug cargo run -p flight-runner
//! ```

mod ai;
mod config;
mod summary;

use core::f64::consts::TAU;

use anyhow::{Context, Result};
use flight_content::ContentFactory;
use flight_core::{FrameStepper, NoDestination, PilotSpec, SimEnv, StandardDamage, Vec2, World};

use crate::ai::{ChaseAi, PlayerAutopilot};
use crate::config::RunnerConfig;
use crate::summary::Summary;

/// Distance from the player at which fleets appear.
const FLEET_DISTANCE: f64 = 1500.0;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    setup_logging();

    let config = RunnerConfig::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), frames = config.frames, "starting session");

    let content = ContentFactory::new(&config.data_dir)
        .load()
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;
    let damage = StandardDamage;
    let navigation = NoDestination;
    let env = SimEnv::new(&content.factions, &damage, &navigation);

    let mut world = World::new(content.config.clone(), config.seed)
        .with_player_input(PlayerAutopilot)
        .with_ai(ChaseAi::default());

    let ship = content
        .catalog
        .ship(&config.player_ship)
        .with_context(|| format!("unknown player ship '{}'", config.player_ship))?;
    let faction = content
        .factions
        .id("Player")
        .context("factions file has no 'Player' faction")?;
    world.create_pilot(PilotSpec::new(ship, faction).player().named("Player"));

    let fleets: Vec<_> = config
        .fleets
        .iter()
        .filter_map(|name| content.catalog.fleet(name))
        .collect();
    for (index, fleet) in fleets.iter().enumerate() {
        let angle = TAU * index as f64 / fleets.len() as f64;
        let spawned = world.spawn_fleet(fleet, Vec2::from_polar(FLEET_DISTANCE, angle), Vec2::ZERO);
        tracing::info!(fleet = %fleet.name, pilots = spawned.len(), "fleet entered the system");
    }

    let mut stepper = FrameStepper::from_config(world.config());
    let mut summary = Summary::default();
    for _ in 0..config.frames {
        let outcome = stepper.advance(config.frame_time, world.time_compression(), |dt| {
            world.update(dt, &env);
            world.time_compression()
        });
        summary.record_frame(outcome);
        summary.record_events(&world.drain_events());
        if world.player().is_none() {
            tracing::info!("player destroyed, ending session");
            break;
        }
    }

    tracing::info!(
        time = world.time(),
        frames = summary.frames,
        skipped = summary.skipped_frames,
        steps = summary.steps,
        pilots = world.pilots().len(),
        "session finished"
    );
    tracing::info!(
        shots = summary.shots,
        explosions = summary.explosions,
        kills = summary.kills,
        rating = summary.rating,
        cargo_jettisoned = summary.cargo_jettisoned,
        player_dead = summary.player_dead,
        player_jumped = summary.player_jumped,
        "combat summary"
    );
    if let Some(player) = world.player() {
        tracing::info!(
            armour = player.armour().current,
            shield = player.shield().current,
            outfits = %player.outfit_summary(),
            "player status"
        );
    }
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
