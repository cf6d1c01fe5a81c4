//! Notifications emitted by the simulation.
//!
//! The core never renders, plays sounds or spawns projectiles itself. Every
//! externally visible consequence of a step is pushed as a [`SimEvent`] and
//! drained by the host after the frame.

use std::sync::Arc;

use strum::{AsRefStr, Display};

use crate::env::{Commodity, FactionId, Outfit};
use crate::physics::Vec2;
use crate::pilot::{HookHandle, HookKind, PilotId};

/// Size class of an explosion effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ExplosionSize {
    #[strum(serialize = "ExpS")]
    Small,
    #[strum(serialize = "ExpM")]
    Medium,
    #[strum(serialize = "ExpL")]
    Large,
}

/// Render layer for effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectLayer {
    Back,
    Front,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    /// A weapon fired; the projectile system owns it from here on.
    ProjectileSpawned {
        /// Bolt outfit, or the ammunition outfit for launchers.
        outfit: Arc<Outfit>,
        heading: f64,
        origin: Vec2,
        velocity: Vec2,
        shooter: PilotId,
        target: PilotId,
    },
    Explosion {
        size: ExplosionSize,
        pos: Vec2,
        vel: Vec2,
        layer: EffectLayer,
    },
    HookTriggered {
        pilot: PilotId,
        kind: HookKind,
        handle: HookHandle,
    },
    /// Cargo thrown out by an exploding hull.
    CargoJettisoned {
        pilot: PilotId,
        commodity: Arc<Commodity>,
        quantity: u32,
    },
    MapRevealed {
        radius: u32,
    },
    ScreenShake {
        magnitude: f64,
    },
    CombatRatingGained {
        amount: f64,
    },
    FactionStandingChanged {
        faction: FactionId,
        delta: f64,
    },
    PlayerDead,
    PlayerDestroyed,
    PlayerBrokeHyperspace,
}
