//! The simulation world.
//!
//! [`World`] is the single owned context of a running session: registry,
//! clock, random source, event queue and the two decision makers. Hosts drive
//! it with [`World::update`] (usually through a
//! [`FrameStepper`](crate::stepper::FrameStepper)) and drain
//! [`SimEvent`]s afterwards.

use std::sync::Arc;

use core::f64::consts::TAU;

use crate::config::SimConfig;
use crate::control::{Idle, Neighbours, Thinker};
use crate::env::{Commodity, DamageType, Fleet, PcgRng, SimEnv};
use crate::events::SimEvent;
use crate::physics::{Solid, Vec2};
use crate::pilot::{
    Controller, HitOutcome, MissionCargoId, Pilot, PilotFlags, PilotId, PilotSpec, StepContext,
};
use crate::registry::PilotStack;

/// Owned simulation state.
pub struct World {
    config: SimConfig,
    pilots: PilotStack,
    /// Last id handed to a non-player pilot.
    last_id: u32,
    /// Last mission cargo id handed out.
    last_mission_cargo: u32,
    time: f64,
    time_compression: f64,
    rng: PcgRng,
    events: Vec<SimEvent>,
    player_input: Box<dyn Thinker>,
    ai: Box<dyn Thinker>,
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("time", &self.time)
            .field("pilots", &self.pilots.len())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl World {
    /// Creates an empty world whose pilots all idle until thinkers are set.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            pilots: PilotStack::new(config.registry_chunk),
            config,
            last_id: 0,
            last_mission_cargo: 0,
            time: 0.0,
            time_compression: 1.0,
            rng: PcgRng::new(seed),
            events: Vec::new(),
            player_input: Box::new(Idle),
            ai: Box::new(Idle),
        }
    }

    #[must_use]
    pub fn with_player_input(mut self, thinker: impl Thinker + 'static) -> Self {
        self.player_input = Box::new(thinker);
        self
    }

    #[must_use]
    pub fn with_ai(mut self, thinker: impl Thinker + 'static) -> Self {
        self.ai = Box::new(thinker);
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_compression(&self) -> f64 {
        self.time_compression
    }

    pub fn set_time_compression(&mut self, compression: f64) {
        self.time_compression = compression.max(0.0);
    }

    pub fn pilots(&self) -> &PilotStack {
        &self.pilots
    }

    /// Every pilot except the player.
    pub fn renderable(&self) -> impl Iterator<Item = &Pilot> {
        self.pilots.renderable()
    }

    pub fn pilot(&self, id: PilotId) -> Option<&Pilot> {
        self.pilots.get(id)
    }

    pub fn pilot_mut(&mut self, id: PilotId) -> Option<&mut Pilot> {
        self.pilots.get_mut(id)
    }

    pub fn player(&self) -> Option<&Pilot> {
        self.pilots.get(PilotId::PLAYER)
    }

    /// Successor of `id` in the registry, or the player sentinel.
    pub fn next_id(&self, id: PilotId) -> PilotId {
        self.pilots.next_id(id)
    }

    /// Takes every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        core::mem::take(&mut self.events)
    }

    /// Registers a new pilot.
    ///
    /// A player spec always gets [`PilotId::PLAYER`] and replaces any player
    /// already registered; everyone else gets the next id from the counter.
    pub fn create_pilot(&mut self, spec: PilotSpec) -> PilotId {
        let id = if spec.controller == Controller::Player {
            if let Some(index) = self.pilots.index_of(PilotId::PLAYER) {
                tracing::warn!("replacing the registered player pilot");
                self.pilots.remove_at(index);
            }
            PilotId::PLAYER
        } else {
            self.last_id += 1;
            PilotId(self.last_id)
        };

        let pilot = Box::new(Pilot::new(id, spec));
        if matches!(pilot.controller(), Controller::Autonomous { .. }) {
            self.ai.on_create(&pilot);
        }
        tracing::debug!(pilot = %id, ship = %pilot.ship().name, "pilot created");
        self.pilots.insert(pilot);
        id
    }

    /// Removes a pilot immediately. Returns `false` if it is not registered.
    pub fn destroy(&mut self, id: PilotId) -> bool {
        match self.pilots.index_of(id) {
            Some(index) => {
                self.destroy_at(index);
                true
            }
            None => {
                tracing::debug!(pilot = %id, "destroy of unknown pilot");
                false
            }
        }
    }

    fn destroy_at(&mut self, index: usize) {
        let pilot = self.pilots.remove_at(index);
        Self::release(&mut *self.ai, &pilot);
    }

    fn release(ai: &mut dyn Thinker, pilot: &Pilot) {
        if matches!(pilot.controller(), Controller::Autonomous { .. }) {
            ai.on_destroy(pilot);
        }
        tracing::debug!(pilot = %pilot.id(), "pilot destroyed");
    }

    /// Removes every pilot except the player.
    pub fn clean(&mut self) {
        let ai = &mut *self.ai;
        self.pilots
            .drain_where(|pilot| !pilot.is_player(), |pilot| Self::release(ai, &pilot));
    }

    /// Removes every pilot, the player included.
    pub fn clean_all(&mut self) {
        let ai = &mut *self.ai;
        self.pilots
            .drain_where(|_| true, |pilot| Self::release(ai, &pilot));
    }

    /// Removes every pilot and releases the registry storage.
    pub fn free(&mut self) {
        self.clean_all();
        self.pilots.release();
    }

    /// Advances every pilot by `dt` seconds of simulation time.
    ///
    /// Pilots are visited in id order. Each one thinks (or runs the
    /// hyperspace state machine while jumping), then integrates. A pilot
    /// flagged for deletion is removed on the spot and the pilot that slides
    /// into its slot is visited next, so nobody is skipped or visited twice.
    pub fn update(&mut self, dt: f64, env: &SimEnv<'_>) {
        self.time += dt;

        let mut index = 0;
        while index < self.pilots.len() {
            self.think_at(index, env);
            if self.pilots.slots[index].is_pending_delete() {
                self.destroy_at(index);
                continue;
            }

            let pilot = &mut self.pilots.slots[index];
            let mut ctx = StepContext::new(self.time, &self.config, &mut self.events, &mut self.rng);
            pilot.update(dt, &mut ctx);
            if pilot.is_pending_delete() {
                self.destroy_at(index);
                continue;
            }
            index += 1;
        }
    }

    fn think_at(&mut self, index: usize, env: &SimEnv<'_>) {
        let (before, rest) = self.pilots.slots.split_at_mut(index);
        let Some((pilot, after)) = rest.split_first_mut() else {
            return;
        };
        if !pilot.can_think() {
            return;
        }

        let mut ctx = StepContext::new(self.time, &self.config, &mut self.events, &mut self.rng);
        if pilot.has_flag(PilotFlags::HYP_PREP) {
            pilot.hyperspace(env.navigation(), &mut ctx);
            return;
        }

        let others = Neighbours::new(before, after);
        let thinker: &mut dyn Thinker = match pilot.controller() {
            Controller::Player => &mut *self.player_input,
            Controller::Autonomous { .. } => &mut *self.ai,
        };
        let intent = thinker.think(&**pilot, &others, env);
        pilot.apply_intent(&intent, &mut ctx);
    }

    /// Applies a weapon impact to `target`.
    ///
    /// Returns `None` when the target is not registered.
    pub fn hit(
        &mut self,
        target: PilotId,
        weapon: &Solid,
        shooter: PilotId,
        damage_type: DamageType,
        damage: f64,
        env: &SimEnv<'_>,
    ) -> Option<HitOutcome> {
        let pilot = self.pilots.get_mut(target)?;
        let mut ctx = StepContext::new(self.time, &self.config, &mut self.events, &mut self.rng);
        Some(pilot.hit(weapon, shooter, damage_type, damage, env.damage(), &mut ctx))
    }

    /// Loads mission cargo under a fresh session-unique id.
    ///
    /// Returns the id and the quantity that fit, or `None` when the pilot is
    /// not registered.
    pub fn add_mission_cargo(
        &mut self,
        pilot: PilotId,
        commodity: &Arc<Commodity>,
        quantity: u32,
    ) -> Option<(MissionCargoId, u32)> {
        let target = self.pilots.get_mut(pilot)?;
        self.last_mission_cargo += 1;
        let id = MissionCargoId(self.last_mission_cargo);
        let loaded = target.add_mission_cargo(id, commodity, quantity);
        Some((id, loaded))
    }

    pub fn remove_mission_cargo(&mut self, pilot: PilotId, id: MissionCargoId) -> bool {
        self.pilots
            .get_mut(pilot)
            .is_some_and(|target| target.remove_mission_cargo(id))
    }

    /// Spawns the members of `fleet` around `pos`.
    ///
    /// Each member spawns if a `1..=100` roll does not exceed its chance.
    /// Returns the ids of the pilots created.
    pub fn spawn_fleet(&mut self, fleet: &Fleet, pos: Vec2, vel: Vec2) -> Vec<PilotId> {
        let spread = self.config.fleet_spread;
        let mut spawned = Vec::new();
        for member in &fleet.pilots {
            if self.rng.range(1, 100) > member.chance {
                continue;
            }
            let offset = Vec2::new(
                self.rng.range_f64(-spread, spread),
                self.rng.range_f64(-spread, spread),
            );
            let dir = self.rng.next_f64() * TAU;

            let mut spec = PilotSpec::new(Arc::clone(&member.ship), fleet.faction)
                .autonomous(fleet.ai.clone())
                .at(pos + offset)
                .moving(vel)
                .facing(dir);
            if let Some(name) = &member.name {
                spec = spec.named(name.clone());
            }
            spawned.push(self.create_pilot(spec));
        }
        tracing::debug!(fleet = %fleet.name, spawned = spawned.len(), "fleet spawned");
        spawned
    }

    /// Nearest pilot at war with `id`'s faction.
    pub fn nearest_enemy(&self, id: PilotId, env: &SimEnv<'_>) -> Option<PilotId> {
        let pilot = self.pilots.get(id)?;
        self.pilots.nearest_enemy(pilot, env.factions())
    }

    /// Nearest pilot hostile to the player.
    pub fn nearest_hostile(&self) -> Option<PilotId> {
        let origin = self.player().map_or(Vec2::ZERO, |player| player.solid.pos);
        self.pilots.nearest_hostile(origin)
    }

    pub fn nearest_pilot(&self, id: PilotId) -> Option<PilotId> {
        let pilot = self.pilots.get(id)?;
        self.pilots.nearest_pilot(id, pilot.solid.pos)
    }

    pub fn nearest_pilot_to_player(&self) -> Option<PilotId> {
        self.nearest_pilot(PilotId::PLAYER)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::control::Intent;
    use crate::env::{
        FactionId, FactionTable, FixedHeading, FleetPilot, NoDestination, Ship, StandardDamage,
    };

    fn hull() -> Arc<Ship> {
        Arc::new(Ship {
            mass: 50.0,
            thrust: 100.0,
            turn: 2.0,
            speed: 80.0,
            armour: 60.0,
            shield: 40.0,
            energy: 50.0,
            fuel: 200,
            cap_cargo: 10,
            ..Ship::new("Hyena")
        })
    }

    fn npc(x: f64) -> PilotSpec {
        PilotSpec::new(hull(), FactionId(1)).at(Vec2::new(x, 0.0))
    }

    struct Fixture {
        factions: FactionTable,
        damage: StandardDamage,
        navigation: NoDestination,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                factions: FactionTable::new(),
                damage: StandardDamage,
                navigation: NoDestination,
            }
        }

        fn env(&self) -> SimEnv<'_> {
            SimEnv::new(&self.factions, &self.damage, &self.navigation)
        }
    }

    /// Records lifecycle callbacks and thrusts every pilot forward.
    #[derive(Clone, Default)]
    struct Recorder {
        created: Rc<RefCell<Vec<PilotId>>>,
        destroyed: Rc<RefCell<Vec<PilotId>>>,
        thought: Rc<RefCell<Vec<PilotId>>>,
    }

    impl Thinker for Recorder {
        fn think(&mut self, pilot: &Pilot, _others: &Neighbours<'_>, _env: &SimEnv<'_>) -> Intent {
            self.thought.borrow_mut().push(pilot.id());
            Intent {
                thrust: 1.0,
                ..Intent::idle()
            }
        }

        fn on_create(&mut self, pilot: &Pilot) {
            self.created.borrow_mut().push(pilot.id());
        }

        fn on_destroy(&mut self, pilot: &Pilot) {
            self.destroyed.borrow_mut().push(pilot.id());
        }
    }

    fn ids(world: &World) -> Vec<u32> {
        world.pilots().iter().map(|p| p.id().0).collect()
    }

    #[test]
    fn ids_are_unique_and_sorted() {
        let mut world = World::new(SimConfig::new(), 1);
        let a = world.create_pilot(npc(0.0));
        let b = world.create_pilot(npc(0.0));
        let player = world.create_pilot(npc(0.0).player());
        let c = world.create_pilot(npc(0.0));
        assert_eq!((a, b, c), (PilotId(1), PilotId(2), PilotId(3)));
        assert_eq!(player, PilotId::PLAYER);
        assert_eq!(ids(&world), vec![0, 1, 2, 3]);

        assert!(world.destroy(b));
        assert!(!world.destroy(b));
        let d = world.create_pilot(npc(0.0));
        assert_eq!(d, PilotId(4));
        assert_eq!(ids(&world), vec![0, 1, 3, 4]);
        for id in [a, c, d] {
            assert_eq!(world.pilot(id).map(Pilot::id), Some(id));
        }
        assert!(world.pilot(b).is_none());
    }

    #[test]
    fn a_second_player_replaces_the_first() {
        let mut world = World::new(SimConfig::new(), 1);
        world.create_pilot(npc(0.0).player().named("Old"));
        world.create_pilot(npc(0.0).player().named("New"));
        assert_eq!(world.pilots().len(), 1);
        assert_eq!(world.player().map(Pilot::name), Some("New"));
    }

    #[test]
    fn ai_is_told_about_autonomous_pilots_only() {
        let recorder = Recorder::default();
        let mut world = World::new(SimConfig::new(), 1).with_ai(recorder.clone());
        world.create_pilot(npc(0.0).player());
        let npc_id = world.create_pilot(npc(0.0));
        world.clean_all();
        assert_eq!(*recorder.created.borrow(), vec![npc_id]);
        assert_eq!(*recorder.destroyed.borrow(), vec![npc_id]);
    }

    #[test]
    fn update_dispatches_by_controller() {
        let input = Recorder::default();
        let ai = Recorder::default();
        let mut world = World::new(SimConfig::new(), 1)
            .with_player_input(input.clone())
            .with_ai(ai.clone());
        world.create_pilot(npc(0.0).player());
        world.create_pilot(npc(100.0));
        world.create_pilot(npc(200.0));

        let fixture = Fixture::new();
        world.update(0.1, &fixture.env());
        assert_eq!(*input.thought.borrow(), vec![PilotId::PLAYER]);
        assert_eq!(*ai.thought.borrow(), vec![PilotId(1), PilotId(2)]);
        // full thrust for 0.1 s on a 50 t hull
        let player = world.player().unwrap();
        assert!(player.solid.vel.x > 0.0);
        assert!((world.time() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn disabled_pilots_do_not_think() {
        let ai = Recorder::default();
        let mut world = World::new(SimConfig::new(), 1).with_ai(ai.clone());
        let id = world.create_pilot(npc(0.0));
        world.pilot_mut(id).unwrap().set_armour(5.0);

        let fixture = Fixture::new();
        world.update(0.1, &fixture.env());
        world.update(0.1, &fixture.env());
        assert!(world.pilot(id).unwrap().is_disabled());
        // the first pass thinks before the disablement check
        assert_eq!(ai.thought.borrow().len(), 1);
    }

    #[test]
    fn deletions_mid_update_skip_nobody() {
        let ai = Recorder::default();
        let mut world = World::new(SimConfig::new(), 1).with_ai(ai.clone());
        for x in [0.0, 10.0, 20.0, 30.0] {
            world.create_pilot(npc(x));
        }
        for id in [2, 3] {
            world
                .pilot_mut(PilotId(id))
                .unwrap()
                .flags_mut()
                .insert(PilotFlags::DELETE);
        }

        let fixture = Fixture::new();
        world.update(0.1, &fixture.env());
        assert_eq!(ids(&world), vec![1, 4]);
        assert_eq!(*ai.thought.borrow(), vec![PilotId(1), PilotId(2), PilotId(3), PilotId(4)]);
        assert_eq!(*ai.destroyed.borrow(), vec![PilotId(2), PilotId(3)]);
    }

    #[test]
    fn dead_pilots_are_removed_after_their_timer() {
        let mut world = World::new(SimConfig::new(), 9);
        let id = world.create_pilot(npc(0.0));
        world.create_pilot(npc(50.0));
        let fixture = Fixture::new();
        let env = fixture.env();

        let outcome = world.hit(id, &Solid::default(), PilotId(2), DamageType::Kinetic, 500.0, &env);
        assert_eq!(outcome, Some(HitOutcome::ShieldBroken));
        for _ in 0..40 {
            world.update(0.1, &env);
        }
        assert!(world.pilot(id).is_none());
        assert_eq!(ids(&world), vec![2]);
        let events = world.drain_events();
        assert!(events.iter().any(|event| matches!(event, SimEvent::Explosion { .. })));
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn jumping_npcs_leave_the_registry() {
        let ai = Recorder::default();
        let mut world = World::new(SimConfig::new(), 3).with_ai(ai.clone());
        let id = world.create_pilot(npc(500.0));
        assert!(world.pilot_mut(id).unwrap().begin_hyperspace(&SimConfig::new()));

        let fixture = Fixture::new();
        let navigation = FixedHeading(1.0);
        let env = SimEnv::new(&fixture.factions, &fixture.damage, &navigation);
        for _ in 0..200 {
            world.update(0.05, &env);
            if world.pilot(id).is_none() {
                break;
            }
        }
        assert!(world.pilot(id).is_none());
        // the thinker is bypassed while jumping
        assert!(ai.thought.borrow().is_empty());
        assert_eq!(*ai.destroyed.borrow(), vec![id]);
    }

    #[test]
    fn clean_keeps_the_player() {
        let mut world = World::new(SimConfig::new(), 1);
        world.create_pilot(npc(0.0).player());
        world.create_pilot(npc(0.0));
        world.create_pilot(npc(0.0));
        world.clean();
        assert_eq!(ids(&world), vec![0]);
        world.free();
        assert!(world.pilots().is_empty());
        assert_eq!(world.pilots().capacity(), 0);
    }

    #[test]
    fn mission_cargo_ids_are_unique() {
        let mut world = World::new(SimConfig::new(), 1);
        let a = world.create_pilot(npc(0.0));
        let b = world.create_pilot(npc(0.0));
        let parcels = Arc::new(Commodity::new("Parcels", 0));

        let (first, loaded) = world.add_mission_cargo(a, &parcels, 4).unwrap();
        let (second, _) = world.add_mission_cargo(b, &parcels, 4).unwrap();
        assert_eq!(loaded, 4);
        assert_ne!(first, second);
        assert!(world.add_mission_cargo(PilotId(99), &parcels, 1).is_none());

        assert!(!world.remove_mission_cargo(a, second));
        assert!(world.remove_mission_cargo(a, first));
        assert_eq!(world.pilot(a).unwrap().cargo_used(), 0);
    }

    #[test]
    fn fleets_spawn_certain_members() {
        let mut world = World::new(SimConfig::new(), 5);
        let fleet = Fleet {
            name: "Pirate Raiders".into(),
            faction: FactionId(2),
            ai: "pirate".into(),
            pilots: vec![
                FleetPilot::new(hull(), 100).named("Pirate Hyena"),
                FleetPilot::new(hull(), 100),
            ],
        };
        let spawned = world.spawn_fleet(&fleet, Vec2::new(1000.0, 0.0), Vec2::ZERO);
        assert_eq!(spawned.len(), 2);

        let first = world.pilot(spawned[0]).unwrap();
        assert_eq!(first.name(), "Pirate Hyena");
        assert_eq!(first.faction(), FactionId(2));
        assert_eq!(first.controller(), &Controller::autonomous("pirate"));
        assert!(first.solid.pos.distance(Vec2::new(1000.0, 0.0)) <= 75.0 * 2f64.sqrt());
        assert_eq!(world.pilot(spawned[1]).unwrap().name(), "Hyena");
    }

    #[test]
    fn proximity_queries_from_the_player() {
        let mut factions = FactionTable::new();
        let traders = factions.add("Traders");
        let pirates = factions.add("Pirates");
        factions.set_enemies(traders, pirates);
        let damage = StandardDamage;
        let navigation = NoDestination;
        let env = SimEnv::new(&factions, &damage, &navigation);

        let mut world = World::new(SimConfig::new(), 1);
        world.create_pilot(PilotSpec::new(hull(), traders).player());
        let trader = world.create_pilot(PilotSpec::new(hull(), traders).at(Vec2::new(10.0, 0.0)));
        let pirate = world.create_pilot(PilotSpec::new(hull(), pirates).at(Vec2::new(40.0, 0.0)));

        assert_eq!(world.nearest_pilot_to_player(), Some(trader));
        assert_eq!(world.nearest_enemy(PilotId::PLAYER, &env), Some(pirate));
        assert_eq!(world.nearest_hostile(), None);
        world.pilot_mut(pirate).unwrap().set_hostile(true);
        assert_eq!(world.nearest_hostile(), Some(pirate));
        assert_eq!(world.next_id(pirate), PilotId::PLAYER);
    }
}
