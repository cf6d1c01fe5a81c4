//! Outfit definitions.
//!
//! # Design: Base + Kind Pattern
//!
//! - [`Outfit`] holds what every outfit has (name, mass, stacking limit)
//! - [`OutfitKind`] holds the type-specific payload (weapon timing, ammo
//!   damage, stat modifiers, afterburner limits, map radius)
//!
//! Launchers reference their ammunition by name; the pilot resolves the name
//! against its own installed outfits when the launcher is selected.

use strum::{AsRefStr, Display, EnumString};

use super::damage::DamageType;
use crate::stats::StatList;

/// Immutable outfit definition shared through `Arc` by every pilot carrying it.
#[derive(Clone, Debug, PartialEq)]
pub struct Outfit {
    pub name: String,
    /// Mass per unit, charged against the hull's weapon capacity.
    pub mass: u32,
    /// Maximum quantity a single pilot may carry.
    pub max: u32,
    /// Fired only through the secondary weapon binding.
    pub secondary: bool,
    pub kind: OutfitKind,
}

impl Outfit {
    pub fn new(name: impl Into<String>, mass: u32, max: u32, kind: OutfitKind) -> Self {
        Self {
            name: name.into(),
            mass,
            max,
            secondary: false,
            kind,
        }
    }

    /// Marks the outfit as a secondary weapon (builder pattern).
    #[must_use]
    pub fn secondary(mut self) -> Self {
        self.secondary = true;
        self
    }

    pub fn is_turret(&self) -> bool {
        matches!(self.kind, OutfitKind::TurretBolt(_))
    }

    pub fn is_launcher(&self) -> bool {
        matches!(self.kind, OutfitKind::Launcher(_))
    }

    pub fn is_ammo(&self) -> bool {
        matches!(self.kind, OutfitKind::Ammo(_))
    }

    pub fn is_afterburner(&self) -> bool {
        matches!(self.kind, OutfitKind::Afterburner(_))
    }

    /// Minimum seconds between shots for a single unit, `0` for non-weapons.
    pub fn delay(&self) -> f64 {
        match &self.kind {
            OutfitKind::Bolt(bolt) | OutfitKind::TurretBolt(bolt) => bolt.delay,
            OutfitKind::Launcher(launcher) => launcher.delay,
            _ => 0.0,
        }
    }

    /// Energy drawn per shot, `0` for non-weapons.
    pub fn energy(&self) -> f64 {
        match &self.kind {
            OutfitKind::Bolt(bolt) | OutfitKind::TurretBolt(bolt) => bolt.energy,
            OutfitKind::Launcher(launcher) => launcher.energy,
            _ => 0.0,
        }
    }

    /// Name of the ammunition this launcher consumes.
    pub fn ammo_name(&self) -> Option<&str> {
        match &self.kind {
            OutfitKind::Launcher(launcher) => Some(launcher.ammo.as_str()),
            _ => None,
        }
    }

    pub fn category(&self) -> OutfitCategory {
        match self.kind {
            OutfitKind::Bolt(_) => OutfitCategory::Bolt,
            OutfitKind::TurretBolt(_) => OutfitCategory::TurretBolt,
            OutfitKind::Launcher(_) => OutfitCategory::Launcher,
            OutfitKind::Ammo(_) => OutfitCategory::Ammo,
            OutfitKind::Modification(_) => OutfitCategory::Modification,
            OutfitKind::Afterburner(_) => OutfitCategory::Afterburner,
            OutfitKind::Map(_) => OutfitCategory::Map,
        }
    }
}

/// Outfit type with type-specific data.
#[derive(Clone, Debug, PartialEq)]
pub enum OutfitKind {
    /// Forward-firing energy weapon.
    Bolt(BoltData),

    /// Turret-mounted energy weapon.
    TurretBolt(BoltData),

    /// Missile launcher, draws from a named ammunition outfit.
    Launcher(LauncherData),

    /// Launcher ammunition; also describes the spawned projectile.
    Ammo(AmmoData),

    /// Passive stat modification.
    Modification(ModificationData),

    /// Engine boost engaged on demand.
    Afterburner(AfterburnerData),

    /// Star chart; consumed on purchase instead of installed.
    Map(MapData),
}

/// Outfit type tag without payload, for logs and summaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum OutfitCategory {
    Bolt,
    TurretBolt,
    Launcher,
    Ammo,
    Modification,
    Afterburner,
    Map,
}

/// Bolt weapon data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoltData {
    /// Seconds between shots of one unit.
    pub delay: f64,
    /// Energy drawn per shot.
    pub energy: f64,
    pub damage_type: DamageType,
    pub damage: f64,
    /// Projectile speed relative to the shooter.
    pub speed: f64,
    pub range: f64,
}

/// Launcher data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LauncherData {
    pub delay: f64,
    pub energy: f64,
    /// Name of the ammunition outfit.
    pub ammo: String,
}

/// Ammunition and projectile data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoData {
    pub damage_type: DamageType,
    pub damage: f64,
    pub speed: f64,
    /// Seconds before the projectile expires.
    pub duration: f64,
}

/// Stat modification data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModificationData {
    pub stats: StatList,
}

/// Afterburner data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfterburnerData {
    /// Multiplier over the normal speed limit.
    pub speed_perc: f64,
    /// Flat bonus over the normal speed limit.
    pub speed_abs: f64,
    /// Energy drained per second while engaged.
    pub energy: f64,
}

impl AfterburnerData {
    /// Speed cap while engaged for a hull whose normal cap is `speed`.
    pub fn boosted_speed(&self, speed: f64) -> f64 {
        speed * self.speed_perc + self.speed_abs
    }
}

/// Map data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapData {
    /// Jumps revealed around the current system.
    pub radius: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laser() -> Outfit {
        Outfit::new(
            "Laser Cannon",
            2,
            5,
            OutfitKind::Bolt(BoltData {
                delay: 0.5,
                energy: 4.0,
                damage_type: DamageType::Energy,
                damage: 10.0,
                speed: 600.0,
                range: 800.0,
            }),
        )
    }

    #[test]
    fn weapon_accessors_read_payload() {
        let outfit = laser();
        assert_eq!(outfit.delay(), 0.5);
        assert_eq!(outfit.energy(), 4.0);
        assert_eq!(outfit.category(), OutfitCategory::Bolt);
        assert_eq!(outfit.category().as_ref(), "bolt");
        assert!(outfit.ammo_name().is_none());
        assert!(!outfit.secondary);
    }

    #[test]
    fn launcher_names_its_ammo() {
        let launcher = Outfit::new(
            "Missile Launcher",
            10,
            2,
            OutfitKind::Launcher(LauncherData {
                delay: 2.0,
                energy: 0.0,
                ammo: "Missile".into(),
            }),
        )
        .secondary();
        assert!(launcher.secondary);
        assert!(launcher.is_launcher());
        assert_eq!(launcher.ammo_name(), Some("Missile"));
    }

    #[test]
    fn afterburner_boost() {
        let data = AfterburnerData {
            speed_perc: 1.5,
            speed_abs: 20.0,
            energy: 10.0,
        };
        assert_eq!(data.boosted_speed(100.0), 170.0);
    }
}
