//! Weapons fire, damage and death.

use std::sync::Arc;

use super::{DeathClock, HookKind, Pilot, PilotFlags, PilotId, StepContext};
use crate::env::{DamageOracle, DamageType, Outfit, OutfitKind};
use crate::events::SimEvent;
use crate::physics::Solid;

/// Which layer absorbed a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Shield soaked the whole hit.
    Shield,
    /// Shield collapsed and the remainder reached the armour.
    ShieldBroken,
    /// Armour took the hit and held.
    Armour,
    /// Armour reached zero; the pilot died from this hit.
    Destroyed,
    /// Armour was already gone; the pilot was dead before this hit.
    AlreadyDead,
}

impl Pilot {
    /// Fires primary weapons (every non-secondary outfit) or the bound secondary.
    pub fn shoot(
        &mut self,
        target: PilotId,
        secondary: bool,
        now: f64,
        events: &mut Vec<SimEvent>,
    ) {
        if self.outfits.is_empty() {
            return;
        }

        if secondary {
            if let Some(index) = self.secondary {
                self.shoot_weapon(index, target, now, events);
            }
        } else {
            for index in 0..self.outfits.len() {
                if !self.outfits[index].outfit.secondary {
                    self.shoot_weapon(index, target, now, events);
                }
            }
        }
    }

    /// Quantity that sets a slot's fire rate.
    ///
    /// Ammunition slots fire at the rate of the selected launcher stack.
    fn effective_quantity(&self, index: usize) -> u32 {
        let slot = &self.outfits[index];
        match self.secondary {
            Some(secondary) if slot.outfit.is_ammo() => self.outfits[secondary].quantity,
            _ => slot.quantity,
        }
    }

    fn fire_rate(&self, outfit: &Outfit) -> f64 {
        match outfit.kind {
            OutfitKind::Bolt(_) => self.stats.fwd_firerate,
            OutfitKind::TurretBolt(_) => self.stats.tur_firerate,
            OutfitKind::Launcher(_) => self.stats.launch_rate,
            _ => 1.0,
        }
    }

    fn energy_cost(&self, outfit: &Outfit) -> f64 {
        let factor = match outfit.kind {
            OutfitKind::Bolt(_) => self.stats.fwd_energy,
            OutfitKind::TurretBolt(_) => self.stats.tur_energy,
            _ => 1.0,
        };
        outfit.energy() * factor
    }

    fn shoot_weapon(&mut self, index: usize, target: PilotId, now: f64, events: &mut Vec<SimEvent>) {
        let quantity = self.effective_quantity(index);
        let outfit = Arc::clone(&self.outfits[index].outfit);
        let rate = self.fire_rate(&outfit);
        if quantity == 0 || rate <= 0.0 {
            return;
        }

        let cooldown = outfit.delay() / (f64::from(quantity) * rate);
        if let Some(last) = self.outfits[index].last_fired {
            if now - last < cooldown {
                return;
            }
        }

        let projectile = match &outfit.kind {
            OutfitKind::Bolt(_) | OutfitKind::TurretBolt(_) => {
                let cost = self.energy_cost(&outfit);
                if self.energy.current < cost {
                    return;
                }
                self.energy.current -= cost;
                Arc::clone(&outfit)
            }
            OutfitKind::Launcher(_) => {
                if self.secondary != Some(index) || target == self.id {
                    return;
                }
                let Some(ammo) = self.ammo else {
                    return;
                };
                if self.outfits[ammo].quantity == 0 {
                    return;
                }
                let cost = self.energy_cost(&outfit);
                if self.energy.current < cost {
                    return;
                }
                self.energy.current -= cost;
                self.outfits[ammo].quantity -= 1;
                Arc::clone(&self.outfits[ammo].outfit)
            }
            _ => return,
        };

        events.push(SimEvent::ProjectileSpawned {
            outfit: projectile,
            heading: self.solid.dir,
            origin: self.solid.pos,
            velocity: self.solid.vel,
            shooter: self.id,
            target,
        });
        self.outfits[index].last_fired = Some(now);
    }

    /// Applies a weapon impact.
    ///
    /// Shield absorbs first; whatever the shield could not hold reaches the
    /// armour. A killing blow from the player credits combat rating and
    /// costs standing with the victim's faction. Every hit also transfers
    /// momentum from `weapon` to the pilot.
    pub fn hit(
        &mut self,
        weapon: &Solid,
        shooter: PilotId,
        damage_type: DamageType,
        damage: f64,
        oracle: &dyn DamageOracle,
        ctx: &mut StepContext<'_>,
    ) -> HitOutcome {
        let split = oracle.compute(damage_type, damage);
        let absorb = (1.0 - self.stats.absorb).clamp(0.0, 1.0);
        let shield_damage = split.shield * absorb;
        let armour_damage = split.armour * absorb;

        let damage_mod;
        let outcome;
        if self.shield.current - shield_damage > 0.0 {
            self.shield.current -= shield_damage;
            damage_mod = shield_damage / self.shield.maximum;
            outcome = HitOutcome::Shield;
        } else if self.shield.current > 0.0 {
            let soaked = self.shield.current / shield_damage;
            self.armour.current = (self.armour.current - (1.0 - soaked) * armour_damage).max(0.0);
            self.shield.current = 0.0;
            damage_mod = (shield_damage + armour_damage) / (self.shield.maximum + self.armour.maximum);
            outcome = HitOutcome::ShieldBroken;
        } else if self.armour.current - armour_damage > 0.0 {
            self.armour.current -= armour_damage;
            damage_mod = armour_damage / self.armour.maximum;
            if self.is_player() {
                ctx.events.push(SimEvent::ScreenShake {
                    magnitude: damage_mod * ctx.config.damage_shake,
                });
            }
            outcome = HitOutcome::Armour;
        } else {
            self.armour.current = 0.0;
            damage_mod = 0.0;
            if self.is_dead() {
                outcome = HitOutcome::AlreadyDead;
            } else {
                self.die(ctx);
                if shooter == PilotId::PLAYER {
                    let mass = self.ship.mass;
                    ctx.events.push(SimEvent::CombatRatingGained {
                        amount: (mass / 50.0).max(1.0),
                    });
                    ctx.events.push(SimEvent::FactionStandingChanged {
                        faction: self.faction,
                        delta: -(mass / 10.0),
                    });
                }
                outcome = HitOutcome::Destroyed;
            }
        }

        if self.solid.mass > 0.0 {
            let transfer = split.knockback * (damage_mod / 6.0 + weapon.mass / self.solid.mass / 6.0);
            self.solid.vel += weapon.vel * transfer;
        }
        tracing::trace!(pilot = %self.id, %shooter, ?outcome, "hit");
        outcome
    }

    /// Starts the death sequence. Does nothing for a pilot that is already dead.
    pub fn die(&mut self, ctx: &mut StepContext<'_>) {
        if self.is_dead() {
            return;
        }
        if self.is_player() {
            ctx.events.push(SimEvent::PlayerDead);
        }

        let now = ctx.now;
        self.death = Some(DeathClock {
            started: now,
            next_explosion: now,
            expires: now + ctx.config.death_delay(self.armour.maximum, self.shield.maximum),
        });
        self.flags.remove(PilotFlags::JUMPING | PilotFlags::AFTERBURNER);
        self.flags.insert(PilotFlags::DEAD);
        self.run_hook(HookKind::Death, ctx.events);
        tracing::debug!(pilot = %self.id, name = %self.name, "pilot died");
    }
}
