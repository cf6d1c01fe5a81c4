//! Per-tick decision making.
//!
//! Each pilot is steered by either the player-input collaborator or the AI
//! collaborator; both implement [`Thinker`]. A thinker reads the pilot and its
//! neighbours and answers with an [`Intent`], which the world applies before
//! integrating physics.

use crate::env::SimEnv;
use crate::pilot::{Pilot, PilotId};
use crate::registry;

/// What a pilot wants to do this tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intent {
    /// Turn input in `[-1, 1]`, scaled by the pilot's turn rate.
    pub turn: f64,
    /// Thrust input in `[0, 1]`, scaled by the pilot's thrust.
    pub thrust: f64,
    /// Heading to steer toward; overrides `turn` when set.
    pub face: Option<f64>,
    /// Fire primary weapons at this target.
    pub primary: Option<PilotId>,
    /// Fire the secondary weapon at this target.
    pub secondary: Option<PilotId>,
    /// Engage (`true`) or release (`false`) the afterburner.
    pub afterburner: Option<bool>,
    /// Start preparing a hyperspace jump.
    pub hyperspace: bool,
}

impl Intent {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Decision maker for pilots.
pub trait Thinker {
    fn think(&mut self, pilot: &Pilot, others: &Neighbours<'_>, env: &SimEnv<'_>) -> Intent;

    /// Called once when a pilot steered by this thinker enters the registry.
    fn on_create(&mut self, _pilot: &Pilot) {}

    /// Called once when a pilot steered by this thinker leaves the registry.
    fn on_destroy(&mut self, _pilot: &Pilot) {}
}

/// Thinker that never acts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Idle;

impl Thinker for Idle {
    fn think(&mut self, _pilot: &Pilot, _others: &Neighbours<'_>, _env: &SimEnv<'_>) -> Intent {
        Intent::idle()
    }
}

/// Every registered pilot except the one currently thinking.
#[derive(Clone, Copy)]
pub struct Neighbours<'a> {
    before: &'a [Box<Pilot>],
    after: &'a [Box<Pilot>],
}

impl<'a> Neighbours<'a> {
    pub(crate) fn new(before: &'a [Box<Pilot>], after: &'a [Box<Pilot>]) -> Self {
        Self { before, after }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Pilot> + 'a {
        self.before.iter().chain(self.after.iter()).map(|pilot| &**pilot)
    }

    pub fn get(&self, id: PilotId) -> Option<&'a Pilot> {
        self.iter().find(|pilot| pilot.id() == id)
    }

    pub fn player(&self) -> Option<&'a Pilot> {
        self.get(PilotId::PLAYER)
    }

    /// Nearest pilot whose faction is at war with `pilot`'s.
    pub fn nearest_enemy(&self, pilot: &Pilot, env: &SimEnv<'_>) -> Option<PilotId> {
        registry::nearest_enemy(pilot, self.iter(), env.factions())
    }
}
