//! Pilots: ships in flight with their loadout, cargo and life cycle.
//!
//! A pilot is created from a hull ([`Ship`]) plus a [`PilotSpec`]. Its maxima
//! (armour, shield, energy, fuel, thrust, turn, speed) are always derived from
//! the hull and installed outfits by [`Pilot::calc_stats`]; only the current
//! values are free state.
//!
//! Lifecycle:
//!
//! ```text
//! alive ──armour<30%──▶ disabled ──armour=0──▶ dead ──timer──▶ pending delete
//!   │                                          ▲
//!   └──────────────────armour=0────────────────┘
//! alive ──jump──▶ preparing ──aligned──▶ spooling ──delay──▶ in transit
//! ```

mod cargo;
mod combat;
mod flight;
mod loadout;
mod stats;

use std::sync::Arc;

use bitflags::bitflags;
use strum::{AsRefStr, Display};

use crate::config::SimConfig;
use crate::env::{Commodity, FactionId, Outfit, PcgRng, Ship};
use crate::events::SimEvent;
use crate::physics::{Solid, Vec2};
use crate::stats::ShipStats;

pub use cargo::{CargoLot, MissionCargoId};
pub use combat::HitOutcome;
pub use loadout::{PilotOutfit, parse_outfit_summary};

/// Unique pilot identifier.
///
/// The player is always [`PilotId::PLAYER`]; everyone else gets an id from a
/// strictly increasing counter starting at 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PilotId(pub u32);

impl PilotId {
    pub const PLAYER: Self = Self(0);

    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl core::fmt::Display for PilotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Pilot state bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PilotFlags: u16 {
        const PLAYER      = 1 << 0;
        const HOSTILE     = 1 << 1;
        const HAS_TURRET  = 1 << 2;
        const AFTERBURNER = 1 << 3;
        const DISABLED    = 1 << 4;
        const DEAD        = 1 << 5;
        const EXPLODED    = 1 << 6;
        const DELETE      = 1 << 7;
        /// Preparing: braking and aligning for a jump.
        const HYP_PREP    = 1 << 8;
        /// Spooling up the jump engine.
        const HYP_BEGIN   = 1 << 9;
        /// In transit.
        const HYPERSPACE  = 1 << 10;
    }
}

impl PilotFlags {
    pub const JUMPING: Self = Self::HYP_PREP.union(Self::HYP_BEGIN).union(Self::HYPERSPACE);
}

/// Event a pilot's single hook slot listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum HookKind {
    Death,
    Disable,
}

/// Opaque handle of a scripted hook owned by the hook system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PilotHook {
    pub kind: HookKind,
    pub handle: HookHandle,
}

/// Who steers the pilot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Controller {
    Player,
    /// Steered by the AI collaborator running the named profile.
    Autonomous { profile: String },
}

impl Controller {
    pub fn autonomous(profile: impl Into<String>) -> Self {
        Self::Autonomous {
            profile: profile.into(),
        }
    }
}

/// Bounded pool with a derived maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourceMeter {
    pub current: f64,
    pub maximum: f64,
}

impl ResourceMeter {
    pub const fn full(maximum: f64) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Current over maximum; an empty pool with no capacity counts as full.
    pub fn fraction(&self) -> f64 {
        if self.maximum > 0.0 {
            self.current / self.maximum
        } else {
            1.0
        }
    }

    fn clamp(&mut self) {
        self.current = self.current.clamp(0.0, self.maximum.max(0.0));
    }
}

/// Countdown started when a pilot dies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeathClock {
    pub started: f64,
    /// Time of the next secondary explosion.
    pub next_explosion: f64,
    /// Removal time.
    pub expires: f64,
}

/// Creation parameters for a pilot (builder pattern).
#[derive(Clone, Debug)]
pub struct PilotSpec {
    pub ship: Arc<Ship>,
    pub name: Option<String>,
    pub faction: FactionId,
    pub controller: Controller,
    pub dir: f64,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Install the hull's default outfits.
    pub loadout: bool,
    /// Secondary weapon to select on creation.
    pub secondary: Option<String>,
}

impl PilotSpec {
    pub fn new(ship: Arc<Ship>, faction: FactionId) -> Self {
        Self {
            ship,
            name: None,
            faction,
            controller: Controller::autonomous("generic"),
            dir: 0.0,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            loadout: true,
            secondary: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn player(mut self) -> Self {
        self.controller = Controller::Player;
        self
    }

    #[must_use]
    pub fn autonomous(mut self, profile: impl Into<String>) -> Self {
        self.controller = Controller::autonomous(profile);
        self
    }

    #[must_use]
    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    #[must_use]
    pub fn moving(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[must_use]
    pub fn facing(mut self, dir: f64) -> Self {
        self.dir = dir;
        self
    }

    /// Spawns with an empty outfit list.
    #[must_use]
    pub fn without_outfits(mut self) -> Self {
        self.loadout = false;
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, outfit: impl Into<String>) -> Self {
        self.secondary = Some(outfit.into());
        self
    }
}

/// Mutable simulation services a pilot operation may touch.
pub struct StepContext<'a> {
    /// Current simulation time in seconds.
    pub now: f64,
    pub config: &'a SimConfig,
    pub events: &'a mut Vec<SimEvent>,
    pub rng: &'a mut PcgRng,
}

impl<'a> StepContext<'a> {
    pub fn new(
        now: f64,
        config: &'a SimConfig,
        events: &'a mut Vec<SimEvent>,
        rng: &'a mut PcgRng,
    ) -> Self {
        Self {
            now,
            config,
            events,
            rng,
        }
    }
}

/// A ship in flight.
#[derive(Clone, Debug)]
pub struct Pilot {
    id: PilotId,
    name: String,
    ship: Arc<Ship>,
    faction: FactionId,
    controller: Controller,
    flags: PilotFlags,

    pub solid: Solid,

    thrust: f64,
    turn: f64,
    speed: f64,

    armour: ResourceMeter,
    shield: ResourceMeter,
    energy: ResourceMeter,
    fuel: ResourceMeter,
    armour_regen: f64,
    shield_regen: f64,
    energy_regen: f64,

    stats: ShipStats,

    outfits: Vec<PilotOutfit>,
    secondary: Option<usize>,
    ammo: Option<usize>,
    afterburner: Option<usize>,

    cargo: Vec<CargoLot>,
    cargo_capacity: i64,
    cargo_free: i64,

    hook: Option<PilotHook>,
    death: Option<DeathClock>,
    hyperspace_timer: f64,
}

impl Pilot {
    /// Builds a pilot outside of any registry.
    ///
    /// Pools start full: the meters are seeded at `1/1` so that the first
    /// [`calc_stats`](Self::calc_stats) scales them to their new maxima.
    pub fn new(id: PilotId, spec: PilotSpec) -> Self {
        let PilotSpec {
            ship,
            name,
            faction,
            controller,
            dir,
            pos,
            vel,
            loadout,
            secondary,
        } = spec;

        let mut flags = PilotFlags::empty();
        if controller == Controller::Player {
            flags |= PilotFlags::PLAYER;
        }

        let outfits = if loadout {
            ship.outfits
                .iter()
                .filter(|entry| entry.quantity > 0 && entry.outfit.max > 0)
                .map(|entry| {
                    let quantity = entry.quantity.min(entry.outfit.max);
                    if quantity < entry.quantity {
                        tracing::warn!(
                            ship = %ship.name,
                            outfit = %entry.outfit.name,
                            "hull loadout exceeds the outfit maximum"
                        );
                    }
                    PilotOutfit::new(Arc::clone(&entry.outfit), quantity)
                })
                .collect()
        } else {
            Vec::new()
        };

        let seed = ResourceMeter::full(1.0);
        let mut pilot = Self {
            id,
            name: name.unwrap_or_else(|| ship.name.clone()),
            faction,
            controller,
            flags,
            solid: Solid::new(ship.mass, dir, pos, vel),
            thrust: 0.0,
            turn: 0.0,
            speed: 0.0,
            armour: seed,
            shield: seed,
            energy: seed,
            fuel: seed,
            armour_regen: 0.0,
            shield_regen: 0.0,
            energy_regen: 0.0,
            stats: ShipStats::new(),
            outfits,
            secondary: None,
            ammo: None,
            afterburner: None,
            cargo: Vec::new(),
            cargo_capacity: i64::from(ship.cap_cargo),
            cargo_free: i64::from(ship.cap_cargo),
            hook: None,
            death: None,
            hyperspace_timer: 0.0,
            ship,
        };
        pilot.calc_stats();

        let secondary = secondary.or_else(|| match pilot.controller {
            Controller::Autonomous { .. } => pilot
                .outfits
                .iter()
                .find(|slot| slot.outfit.secondary)
                .map(|slot| slot.outfit.name.clone()),
            Controller::Player => None,
        });
        if let Some(name) = secondary {
            pilot.set_secondary(Some(&name));
        }
        pilot
    }

    pub fn id(&self) -> PilotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ship(&self) -> &Arc<Ship> {
        &self.ship
    }

    pub fn faction(&self) -> FactionId {
        self.faction
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn flags(&self) -> PilotFlags {
        self.flags
    }

    pub fn has_flag(&self, flag: PilotFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_player(&self) -> bool {
        self.has_flag(PilotFlags::PLAYER)
    }

    pub fn is_dead(&self) -> bool {
        self.has_flag(PilotFlags::DEAD)
    }

    pub fn is_disabled(&self) -> bool {
        self.has_flag(PilotFlags::DISABLED)
    }

    pub fn is_pending_delete(&self) -> bool {
        self.has_flag(PilotFlags::DELETE)
    }

    pub fn is_hostile(&self) -> bool {
        self.has_flag(PilotFlags::HOSTILE)
    }

    /// Marks the pilot as hostile (or not) toward the player.
    pub fn set_hostile(&mut self, hostile: bool) {
        self.flags.set(PilotFlags::HOSTILE, hostile);
    }

    /// Whether the pilot gets a think step this tick.
    pub fn can_think(&self) -> bool {
        !self.flags.intersects(PilotFlags::DISABLED | PilotFlags::DEAD)
    }

    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    /// Turn rate in radians per second.
    pub fn turn_rate(&self) -> f64 {
        self.turn
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn armour(&self) -> ResourceMeter {
        self.armour
    }

    pub fn shield(&self) -> ResourceMeter {
        self.shield
    }

    pub fn energy(&self) -> ResourceMeter {
        self.energy
    }

    pub fn fuel(&self) -> ResourceMeter {
        self.fuel
    }

    pub fn armour_regen(&self) -> f64 {
        self.armour_regen
    }

    pub fn shield_regen(&self) -> f64 {
        self.shield_regen
    }

    pub fn energy_regen(&self) -> f64 {
        self.energy_regen
    }

    pub fn set_armour(&mut self, value: f64) {
        self.armour.current = value;
        self.armour.clamp();
    }

    pub fn set_shield(&mut self, value: f64) {
        self.shield.current = value;
        self.shield.clamp();
    }

    pub fn set_energy(&mut self, value: f64) {
        self.energy.current = value;
        self.energy.clamp();
    }

    pub fn set_fuel(&mut self, value: f64) {
        self.fuel.current = value;
        self.fuel.clamp();
    }

    pub fn stats(&self) -> &ShipStats {
        &self.stats
    }

    pub fn hook(&self) -> Option<PilotHook> {
        self.hook
    }

    /// Binds the pilot's hook slot, replacing any previous binding.
    pub fn add_hook(&mut self, kind: HookKind, handle: HookHandle) {
        if let Some(previous) = self.hook {
            tracing::debug!(pilot = %self.id, ?previous, "replacing pilot hook");
        }
        self.hook = Some(PilotHook { kind, handle });
    }

    pub fn death_clock(&self) -> Option<DeathClock> {
        self.death
    }

    fn run_hook(&self, kind: HookKind, events: &mut Vec<SimEvent>) {
        if let Some(hook) = self.hook.filter(|hook| hook.kind == kind) {
            events.push(SimEvent::HookTriggered {
                pilot: self.id,
                kind,
                handle: hook.handle,
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn flags_mut(&mut self) -> &mut PilotFlags {
        &mut self.flags
    }

    fn outfit_position(&self, outfit: &Outfit) -> Option<usize> {
        self.outfits.iter().position(|slot| slot.outfit.name == outfit.name)
    }

    fn commodity_lot(&self, commodity: &Commodity) -> Option<usize> {
        self.cargo
            .iter()
            .position(|lot| lot.mission_id.is_none() && lot.commodity.name == commodity.name)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::env::{
        AfterburnerData, AmmoData, BoltData, DamageType, LauncherData, ModificationData, OutfitKind,
        ShipOutfit,
    };
    use crate::stats::{StatKind, StatList};

    pub fn laser() -> Arc<Outfit> {
        Arc::new(Outfit::new(
            "Laser Cannon",
            4,
            10,
            OutfitKind::Bolt(BoltData {
                delay: 0.5,
                energy: 5.0,
                damage_type: DamageType::Energy,
                damage: 10.0,
                speed: 600.0,
                range: 800.0,
            }),
        ))
    }

    pub fn turret() -> Arc<Outfit> {
        Arc::new(Outfit::new(
            "Laser Turret",
            6,
            4,
            OutfitKind::TurretBolt(BoltData {
                delay: 0.8,
                energy: 8.0,
                damage_type: DamageType::Energy,
                damage: 12.0,
                speed: 550.0,
                range: 700.0,
            }),
        ))
    }

    pub fn launcher() -> Arc<Outfit> {
        Arc::new(
            Outfit::new(
                "Missile Launcher",
                8,
                2,
                OutfitKind::Launcher(LauncherData {
                    delay: 2.0,
                    energy: 3.0,
                    ammo: "Missile".into(),
                }),
            )
            .secondary(),
        )
    }

    pub fn missile() -> Arc<Outfit> {
        Arc::new(Outfit::new(
            "Missile",
            1,
            20,
            OutfitKind::Ammo(AmmoData {
                damage_type: DamageType::Kinetic,
                damage: 25.0,
                speed: 400.0,
                duration: 5.0,
            }),
        ))
    }

    pub fn shield_booster() -> Arc<Outfit> {
        Arc::new(Outfit::new(
            "Shield Booster",
            2,
            5,
            OutfitKind::Modification(ModificationData {
                stats: StatList::new().with(StatKind::Shield, 50.0),
            }),
        ))
    }

    pub fn afterburner() -> Arc<Outfit> {
        Arc::new(Outfit::new(
            "Afterburner",
            5,
            1,
            OutfitKind::Afterburner(AfterburnerData {
                speed_perc: 1.5,
                speed_abs: 20.0,
                energy: 10.0,
            }),
        ))
    }

    pub fn hull() -> Ship {
        Ship {
            name: "Llama".into(),
            mass: 100.0,
            thrust: 200.0,
            turn: 2.0,
            speed: 100.0,
            armour: 100.0,
            armour_regen: 1.0,
            shield: 100.0,
            shield_regen: 2.0,
            energy: 100.0,
            energy_regen: 5.0,
            fuel: 300,
            cap_cargo: 20,
            cap_weapon: 40,
            size: Vec2::new(40.0, 30.0),
            stats: ShipStats::new(),
            outfits: vec![ShipOutfit::new(laser(), 2)],
        }
    }

    pub fn npc() -> Pilot {
        Pilot::new(PilotId(1), PilotSpec::new(Arc::new(hull()), FactionId(1)))
    }

    pub fn bare_npc() -> Pilot {
        Pilot::new(
            PilotId(1),
            PilotSpec::new(Arc::new(hull()), FactionId(1)).without_outfits(),
        )
    }

    pub fn player() -> Pilot {
        Pilot::new(
            PilotId::PLAYER,
            PilotSpec::new(Arc::new(hull()), FactionId(0)).player(),
        )
    }

    pub fn food() -> Arc<Commodity> {
        Arc::new(Commodity::new("Food", 10))
    }

    pub fn ore() -> Arc<Commodity> {
        Arc::new(Commodity::new("Ore", 40))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::env::ShipOutfit;

    #[test]
    fn new_pilot_starts_full() {
        let pilot = npc();
        assert_eq!(pilot.armour(), ResourceMeter::full(100.0));
        assert_eq!(pilot.shield(), ResourceMeter::full(100.0));
        assert_eq!(pilot.energy(), ResourceMeter::full(100.0));
        assert_eq!(pilot.fuel(), ResourceMeter::full(300.0));
        assert_eq!(pilot.name(), "Llama");
        assert!(pilot.hook().is_none());
        assert!(!pilot.is_player());
    }

    #[test]
    fn new_pilot_copies_hull_loadout() {
        let pilot = npc();
        assert_eq!(pilot.outfit_summary(), "2x Laser Cannon");
        assert_eq!(bare_npc().outfit_summary(), "");
    }

    #[test]
    fn player_flag_follows_controller() {
        let pilot = player();
        assert!(pilot.is_player());
        assert_eq!(pilot.id(), PilotId::PLAYER);
        assert_eq!(pilot.controller(), &Controller::Player);
    }

    #[test]
    fn clone_is_independent() {
        let original = npc();
        let mut copy = original.clone();
        copy.set_armour(10.0);
        assert_eq!(original.armour().current, 100.0);
        assert_eq!(copy.armour().current, 10.0);
        assert!(Arc::ptr_eq(original.ship(), copy.ship()));
    }

    #[test]
    fn setters_clamp_to_maxima() {
        let mut pilot = npc();
        pilot.set_shield(1_000.0);
        assert_eq!(pilot.shield().current, 100.0);
        pilot.set_energy(-5.0);
        assert_eq!(pilot.energy().current, 0.0);
    }

    #[test]
    fn hook_slot_is_overwritten() {
        let mut pilot = npc();
        pilot.add_hook(HookKind::Death, HookHandle(1));
        pilot.add_hook(HookKind::Disable, HookHandle(2));
        assert_eq!(
            pilot.hook(),
            Some(PilotHook {
                kind: HookKind::Disable,
                handle: HookHandle(2),
            })
        );
    }

    #[test]
    fn autonomous_pilots_select_a_secondary() {
        let mut ship = hull();
        ship.outfits.push(ShipOutfit::new(launcher(), 1));
        ship.outfits.push(ShipOutfit::new(missile(), 5));
        let pilot = Pilot::new(PilotId(3), PilotSpec::new(Arc::new(ship), FactionId(1)));
        let secondary = pilot.secondary_outfit().unwrap();
        assert_eq!(secondary.outfit.name, "Missile Launcher");
        assert_eq!(pilot.ammo_outfit().unwrap().outfit.name, "Missile");
    }
}
