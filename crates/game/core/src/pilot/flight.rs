//! Per-tick flight: steering, regeneration, disablement, death and jumps.

use core::f64::consts::{PI, TAU};

use super::{HookKind, Pilot, PilotFlags, StepContext};
use crate::config::SimConfig;
use crate::control::Intent;
use crate::env::{NavigationOracle, OutfitKind};
use crate::events::{EffectLayer, ExplosionSize, SimEvent};
use crate::physics::{Vec2, angle_diff};

impl Pilot {
    /// Steers toward `heading`, returning the remaining heading error.
    ///
    /// Angular velocity is proportional to the error and saturates at the
    /// pilot's turn rate once the error exceeds 0.1 rad.
    pub fn face(&mut self, heading: f64) -> f64 {
        let diff = angle_diff(self.solid.dir, heading);
        let turn = (10.0 * diff).clamp(-1.0, 1.0);
        self.solid.dir_vel = self.turn * turn;
        diff
    }

    /// Applies a thinker's decision for this tick.
    pub fn apply_intent(&mut self, intent: &Intent, ctx: &mut StepContext<'_>) {
        if intent.hyperspace && self.begin_hyperspace(ctx.config) {
            return;
        }

        match intent.face {
            Some(heading) => {
                self.face(heading);
            }
            None => self.solid.dir_vel = intent.turn.clamp(-1.0, 1.0) * self.turn,
        }
        self.solid.force = Vec2::from_polar(intent.thrust.clamp(0.0, 1.0) * self.thrust, self.solid.dir);

        match intent.afterburner {
            Some(true) => {
                self.engage_afterburner();
            }
            Some(false) => self.flags.remove(PilotFlags::AFTERBURNER),
            None => {}
        }

        if let Some(target) = intent.primary {
            self.shoot(target, false, ctx.now, ctx.events);
        }
        if let Some(target) = intent.secondary {
            self.shoot(target, true, ctx.now, ctx.events);
        }
    }

    /// Engages the afterburner if one is installed and there is energy to burn.
    pub fn engage_afterburner(&mut self) -> bool {
        if self.afterburner.is_none() || self.energy.current < 1.0 || !self.can_think() {
            return false;
        }
        self.flags.insert(PilotFlags::AFTERBURNER);
        true
    }

    /// Number of jumps the current fuel allows.
    pub fn jumps_remaining(&self, config: &SimConfig) -> u32 {
        if config.hyperspace_fuel <= 0.0 {
            return u32::MAX;
        }
        (self.fuel.current / config.hyperspace_fuel).floor() as u32
    }

    /// Burns fuel for a jump and starts preparing for it.
    ///
    /// Fails for dead, disabled or already jumping pilots and when the fuel
    /// does not cover a jump.
    pub fn begin_hyperspace(&mut self, config: &SimConfig) -> bool {
        if !self.can_think() || self.flags.intersects(PilotFlags::JUMPING) {
            return false;
        }
        if self.fuel.current < config.hyperspace_fuel {
            tracing::debug!(pilot = %self.id, fuel = self.fuel.current, "not enough fuel to jump");
            return false;
        }
        self.fuel.current -= config.hyperspace_fuel;
        self.flags.remove(PilotFlags::AFTERBURNER);
        self.flags.insert(PilotFlags::HYP_PREP);
        true
    }

    /// Seconds spent spooling the jump engine once aligned.
    fn jump_spool(&self, config: &SimConfig) -> f64 {
        if self.stats.instant_jump {
            0.0
        } else {
            config.hyperspace_engine_delay * self.stats.jump_delay
        }
    }

    /// Runs the hyperspace state machine in place of a think step.
    pub fn hyperspace(&mut self, navigation: &dyn NavigationOracle, ctx: &mut StepContext<'_>) {
        let now = ctx.now;
        let config = ctx.config;

        if self.has_flag(PilotFlags::HYPERSPACE) {
            if now > self.hyperspace_timer {
                if self.is_player() {
                    ctx.events.push(SimEvent::PlayerBrokeHyperspace);
                    self.flags.remove(PilotFlags::JUMPING);
                } else {
                    self.flags.insert(PilotFlags::DELETE);
                }
                tracing::debug!(pilot = %self.id, "left the system");
                return;
            }
            self.solid.force =
                Vec2::from_polar(self.thrust * config.hyperspace_thrust_factor, self.solid.dir);
        } else if self.has_flag(PilotFlags::HYP_BEGIN) {
            if now > self.hyperspace_timer {
                self.hyperspace_timer = now + config.hyperspace_fly_delay;
                self.flags.insert(PilotFlags::HYPERSPACE);
            }
        } else if self.solid.vel.modulus() > config.min_vel_err {
            let brake = self.solid.vel.angle() + PI;
            if self.stats.reverse_thrust {
                self.solid.dir_vel = 0.0;
                self.solid.force = Vec2::from_polar(self.thrust, brake);
            } else if self.face(brake).abs() < config.max_dir_err {
                self.solid.force = Vec2::from_polar(self.thrust, self.solid.dir);
            } else {
                self.solid.force = Vec2::ZERO;
            }
        } else {
            self.solid.force = Vec2::ZERO;
            let outward = self.solid.pos.angle();
            let heading = if self.is_player() {
                navigation.hyperspace_heading().unwrap_or(outward)
            } else {
                outward
            };
            if self.face(heading).abs() < config.max_dir_err {
                self.solid.dir_vel = 0.0;
                self.hyperspace_timer = now + self.jump_spool(config);
                self.flags.insert(PilotFlags::HYP_BEGIN);
            }
        }
    }

    /// Advances the pilot by `dt` seconds.
    pub fn update(&mut self, dt: f64, ctx: &mut StepContext<'_>) {
        if self.is_dead() {
            if self.advance_death(ctx) {
                return;
            }
        } else if self.armour.current <= 0.0 {
            self.die(ctx);
        }

        // dead hulls only drift
        if !self.is_player()
            && !self.is_dead()
            && self.armour.current < ctx.config.disable_armour_fraction * self.armour.maximum
        {
            if !self.is_disabled() {
                self.flags.insert(PilotFlags::DISABLED);
                self.flags.remove(PilotFlags::JUMPING | PilotFlags::AFTERBURNER);
                self.run_hook(HookKind::Disable, ctx.events);
                tracing::debug!(pilot = %self.id, "pilot disabled");
            }
            let decay = (1.0 - dt * ctx.config.disabled_velocity_decay).max(0.0);
            self.solid.vel = self.solid.vel * decay;
            self.solid.force = Vec2::ZERO;
            self.solid.dir_vel = 0.0;
            self.solid.update(dt);
            return;
        }

        if self.is_dead() {
            self.solid.update(dt);
            return;
        }

        if self.armour.current < self.armour.maximum {
            self.armour.current += self.armour_regen * dt;
        } else {
            self.shield.current += self.shield_regen * dt;
        }
        if self.energy.current < 1.0 {
            self.flags.remove(PilotFlags::AFTERBURNER);
        }
        self.energy.current += self.energy_regen * dt;
        self.armour.clamp();
        self.shield.clamp();
        self.energy.clamp();

        self.solid.update(dt);

        if self.has_flag(PilotFlags::HYPERSPACE) {
            return;
        }
        let boost = self
            .afterburner_outfit()
            .filter(|_| self.has_flag(PilotFlags::AFTERBURNER))
            .and_then(|slot| match slot.outfit.kind {
                OutfitKind::Afterburner(data) => Some(data),
                _ => None,
            });
        match boost {
            Some(data) if self.energy.current > data.energy * dt => {
                self.solid.limit_speed(data.boosted_speed(self.speed));
                self.energy.current -= data.energy * dt;
                if self.is_player() {
                    ctx.events.push(SimEvent::ScreenShake {
                        magnitude: ctx.config.afterburner_shake * dt,
                    });
                }
            }
            _ => self.solid.limit_speed(self.speed),
        }
    }

    /// Runs the post-death explosion sequence.
    ///
    /// Returns `true` once the pilot is marked for deletion.
    fn advance_death(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let Some(mut clock) = self.death else {
            return false;
        };
        let now = ctx.now;
        let config = ctx.config;

        if now > clock.expires {
            if self.is_player() {
                ctx.events.push(SimEvent::PlayerDestroyed);
            }
            self.flags.insert(PilotFlags::DELETE);
            return true;
        }

        if !self.has_flag(PilotFlags::EXPLODED) && now > clock.expires - config.final_explosion_lead {
            ctx.events.push(SimEvent::Explosion {
                size: ExplosionSize::Large,
                pos: self.solid.pos,
                vel: self.solid.vel,
                layer: EffectLayer::Back,
            });
            self.flags.insert(PilotFlags::EXPLODED);
            self.jettison_cargo(ctx.events);
        } else if now > clock.next_explosion {
            let span = clock.expires - clock.started;
            let remaining = clock.expires - clock.next_explosion;
            let scale = if span > 0.0 { remaining / span } else { 0.0 };
            clock.next_explosion = now + config.explosion_cadence * scale;
            self.death = Some(clock);

            let angle = ctx.rng.next_f64() * TAU;
            let size = self.ship.size;
            let offset = Vec2::new(
                angle.cos() * ctx.rng.next_f64() * size.x / 2.0,
                angle.sin() * ctx.rng.next_f64() * size.y / 2.0,
            );
            let explosion = if ctx.rng.next_f64() > 1.0 - config.medium_explosion_chance {
                ExplosionSize::Medium
            } else {
                ExplosionSize::Small
            };
            let layer = if self.is_player() {
                EffectLayer::Front
            } else {
                EffectLayer::Back
            };
            ctx.events.push(SimEvent::Explosion {
                size: explosion,
                pos: self.solid.pos + offset,
                vel: self.solid.vel,
                layer,
            });
        }
        false
    }
}
