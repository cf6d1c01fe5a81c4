//! Pilot simulation core.
//!
//! `flight-core` owns the rules of ship flight: derived ship statistics,
//! outfit loadouts, damage and death, the hyperspace jump sequence, cargo
//! accounting and the pilot registry. It never renders or plays sound; every
//! visible consequence of a step is reported as a [`SimEvent`].
//!
//! All state mutation flows through [`World`]. Static content (ships, outfits,
//! fleets) is shared through `Arc` definitions gathered in a [`Catalog`], and
//! collaborators the core consults (faction relations, damage tables,
//! navigation) are reached through the oracle traits bundled in [`SimEnv`].
pub mod config;
pub mod control;
pub mod env;
pub mod error;
pub mod events;
pub mod physics;
pub mod pilot;
pub mod registry;
pub mod stats;
pub mod stepper;
pub mod world;

pub use config::SimConfig;
pub use control::{Idle, Intent, Neighbours, Thinker};
pub use env::{
    AfterburnerData, AmmoData, BoltData, Catalog, CatalogError, Commodity, DamageOracle,
    DamageSplit, DamageType, FactionId, FactionOracle, FactionTable, FixedHeading, Fleet,
    FleetPilot, LauncherData, MapData, ModificationData, NavigationOracle, NoDestination, Outfit,
    OutfitCategory, OutfitKind, PcgRng, Ship, ShipOutfit, SimEnv, StandardDamage,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{EffectLayer, ExplosionSize, SimEvent};
pub use physics::{Solid, Vec2, angle_diff, normalize_angle};
pub use pilot::{
    CargoLot, Controller, DeathClock, HitOutcome, HookHandle, HookKind, MissionCargoId, Pilot,
    PilotFlags, PilotHook, PilotId, PilotOutfit, PilotSpec, ResourceMeter, StepContext,
    parse_outfit_summary,
};
pub use registry::PilotStack;
pub use stats::{ShipStats, StatData, StatEntry, StatError, StatKind, StatLine, StatList};
pub use stepper::{FrameOutcome, FrameStepper};
pub use world::World;
