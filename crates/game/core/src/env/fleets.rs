//! Fleet templates.

use std::sync::Arc;

use super::{FactionId, Ship};

/// Named group of pilots spawned together under one AI profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Fleet {
    pub name: String,
    pub faction: FactionId,
    /// AI profile every member runs.
    pub ai: String,
    pub pilots: Vec<FleetPilot>,
}

/// One potential fleet member.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetPilot {
    /// Display name; defaults to the hull name when absent.
    pub name: Option<String>,
    pub ship: Arc<Ship>,
    /// Spawn chance in percent (`1..=100`).
    pub chance: u32,
}

impl FleetPilot {
    pub fn new(ship: Arc<Ship>, chance: u32) -> Self {
        Self {
            name: None,
            ship,
            chance,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
