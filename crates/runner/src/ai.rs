//! Simple thinkers for headless sessions.

use std::collections::HashMap;

use flight_core::{Intent, Neighbours, OutfitKind, Pilot, PilotId, SimEnv, Thinker, Vec2};

/// Heading error under which weapons are fired.
const FIRE_CONE: f64 = 0.15;

/// Range assumed for hulls without bolt weapons.
const DEFAULT_RANGE: f64 = 600.0;

/// Longest reach among the pilot's primary weapons.
fn weapon_range(pilot: &Pilot) -> f64 {
    pilot
        .outfits()
        .iter()
        .filter_map(|slot| match &slot.outfit.kind {
            OutfitKind::Bolt(data) | OutfitKind::TurretBolt(data) => Some(data.range),
            _ => None,
        })
        .reduce(f64::max)
        .unwrap_or(DEFAULT_RANGE)
}

/// Steers toward `target` and fires once it is lined up and in range.
fn attack(pilot: &Pilot, target: &Pilot) -> Intent {
    let offset = target.solid.pos - pilot.solid.pos;
    let heading = offset.angle();
    let error = flight_core::angle_diff(pilot.solid.dir, heading).abs();
    let distance = offset.modulus();
    let in_range = distance < weapon_range(pilot);
    let lined_up = error < FIRE_CONE;

    Intent {
        face: Some(heading),
        thrust: if lined_up && distance > 150.0 { 1.0 } else { 0.0 },
        primary: (lined_up && in_range).then_some(target.id()),
        secondary: (lined_up && in_range && pilot.secondary_outfit().is_some())
            .then_some(target.id()),
        afterburner: Some(lined_up && distance > 2.0 * weapon_range(pilot)),
        ..Intent::idle()
    }
}

/// AI for every autonomous pilot.
///
/// `merchant` pilots run for the system edge and jump out once they are far
/// enough from the centre; every other profile hunts the nearest enemy and
/// sticks with it until it leaves the registry or is disabled.
#[derive(Debug, Default)]
pub struct ChaseAi {
    targets: HashMap<PilotId, PilotId>,
    profiles: HashMap<PilotId, String>,
}

impl ChaseAi {
    /// Distance from the centre at which merchants start their jump.
    const MERCHANT_JUMP_RADIUS: f64 = 2500.0;

    fn merchant(pilot: &Pilot) -> Intent {
        let outward = if pilot.solid.pos == Vec2::ZERO {
            pilot.solid.dir
        } else {
            pilot.solid.pos.angle()
        };
        Intent {
            face: Some(outward),
            thrust: 1.0,
            hyperspace: pilot.solid.pos.modulus() > Self::MERCHANT_JUMP_RADIUS,
            ..Intent::idle()
        }
    }
}

impl Thinker for ChaseAi {
    fn think(&mut self, pilot: &Pilot, others: &Neighbours<'_>, env: &SimEnv<'_>) -> Intent {
        if self.profiles.get(&pilot.id()).is_some_and(|profile| profile == "merchant") {
            return Self::merchant(pilot);
        }

        let current = self
            .targets
            .get(&pilot.id())
            .and_then(|id| others.get(*id))
            .filter(|target| !target.is_disabled() && !target.is_dead());
        let target = match current {
            Some(target) => Some(target),
            None => others
                .nearest_enemy(pilot, env)
                .and_then(|id| others.get(id)),
        };

        match target {
            Some(target) => {
                self.targets.insert(pilot.id(), target.id());
                attack(pilot, target)
            }
            None => {
                self.targets.remove(&pilot.id());
                Intent::idle()
            }
        }
    }

    fn on_create(&mut self, pilot: &Pilot) {
        if let flight_core::Controller::Autonomous { profile } = pilot.controller() {
            self.profiles.insert(pilot.id(), profile.clone());
        }
    }

    fn on_destroy(&mut self, pilot: &Pilot) {
        self.profiles.remove(&pilot.id());
        self.targets.remove(&pilot.id());
    }
}

/// Stands in for the keyboard: attacks the nearest enemy, otherwise drifts.
#[derive(Debug, Default)]
pub struct PlayerAutopilot;

impl Thinker for PlayerAutopilot {
    fn think(&mut self, pilot: &Pilot, others: &Neighbours<'_>, env: &SimEnv<'_>) -> Intent {
        others
            .nearest_enemy(pilot, env)
            .and_then(|id| others.get(id))
            .map_or_else(Intent::idle, |target| attack(pilot, target))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use flight_core::{
        BoltData, DamageType, FactionId, FactionTable, NoDestination, Outfit, PilotSpec, Ship,
        ShipOutfit, SimConfig, SimEvent, StandardDamage, World,
    };

    use super::*;

    fn armed_hull() -> Arc<Ship> {
        let laser = Arc::new(Outfit::new(
            "Laser Cannon",
            4,
            10,
            OutfitKind::Bolt(BoltData {
                delay: 0.5,
                energy: 4.0,
                damage_type: DamageType::Energy,
                damage: 10.0,
                speed: 600.0,
                range: 800.0,
            }),
        ));
        Arc::new(Ship {
            mass: 50.0,
            thrust: 200.0,
            turn: 3.0,
            speed: 250.0,
            armour: 50.0,
            shield: 50.0,
            energy: 100.0,
            energy_regen: 5.0,
            fuel: 300,
            outfits: vec![ShipOutfit::new(laser, 2)],
            ..Ship::new("Hyena")
        })
    }

    #[test]
    fn hunters_open_fire_on_enemies() {
        let mut factions = FactionTable::new();
        let traders = factions.add("Trader");
        let pirates = factions.add("Pirate");
        factions.set_enemies(traders, pirates);
        let env = SimEnv::new(&factions, &StandardDamage, &NoDestination);

        let mut world = World::new(SimConfig::new(), 1).with_ai(ChaseAi::default());
        world.create_pilot(PilotSpec::new(armed_hull(), pirates).autonomous("pirate"));
        world.create_pilot(
            PilotSpec::new(armed_hull(), traders)
                .autonomous("merchant")
                .at(Vec2::new(300.0, 0.0)),
        );

        let mut shots = 0;
        for _ in 0..60 {
            world.update(1.0 / 30.0, &env);
            shots += world
                .drain_events()
                .iter()
                .filter(|event| matches!(event, SimEvent::ProjectileSpawned { shooter, .. } if *shooter == PilotId(1)))
                .count();
        }
        assert!(shots > 0);
    }

    #[test]
    fn merchants_head_outward() {
        let pilot = Pilot::new(
            PilotId(4),
            PilotSpec::new(armed_hull(), FactionId(0)).at(Vec2::new(0.0, 100.0)),
        );
        let intent = ChaseAi::merchant(&pilot);
        assert!((intent.face.unwrap() - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(!intent.hyperspace);
    }

    #[test]
    fn lifecycle_hooks_track_profiles() {
        let mut ai = ChaseAi::default();
        let pilot = Pilot::new(
            PilotId(2),
            PilotSpec::new(armed_hull(), FactionId(0)).autonomous("merchant"),
        );
        ai.on_create(&pilot);
        assert_eq!(ai.profiles.get(&PilotId(2)).map(String::as_str), Some("merchant"));
        ai.on_destroy(&pilot);
        assert!(ai.profiles.is_empty());
    }
}
