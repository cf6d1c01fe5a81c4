//! Derived characteristics.

use super::{Pilot, ResourceMeter};
use crate::env::OutfitKind;
use crate::stats::ShipStats;

impl Pilot {
    /// Recomputes every derived maximum from the hull and installed outfits.
    ///
    /// Current armour, shield, energy and fuel keep the fraction of their
    /// maximum they had before the recomputation.
    pub fn calc_stats(&mut self) {
        let armour = self.armour.fraction();
        let shield = self.shield.fraction();
        let energy = self.energy.fraction();
        let fuel = self.fuel.fraction();

        let mut stats = ShipStats::new();
        stats.merge(&self.ship.stats);
        for slot in &self.outfits {
            if let OutfitKind::Modification(data) = &slot.outfit.kind {
                for _ in 0..slot.quantity {
                    stats.apply_list(&data.stats);
                }
            }
        }

        let ship = &self.ship;
        self.thrust = (ship.thrust + stats.thrust) * stats.thrust_mod;
        self.turn = (ship.turn + stats.turn) * stats.turn_mod;
        self.speed = (ship.speed + stats.speed) * stats.speed_mod;

        let armour_max = (ship.armour + stats.armour) * stats.armour_mod;
        let shield_max = (ship.shield + stats.shield) * stats.shield_mod;
        let energy_max = (ship.energy + stats.energy) * stats.energy_mod;
        let fuel_max = (f64::from(ship.fuel) + f64::from(stats.fuel)).max(0.0);
        self.armour_regen = (ship.armour_regen + stats.armour_regen) * stats.armour_regen_mod;
        self.shield_regen = (ship.shield_regen + stats.shield_regen) * stats.shield_regen_mod;
        self.energy_regen = (ship.energy_regen + stats.energy_regen) * stats.energy_regen_mod;

        let cargo = (i64::from(ship.cap_cargo) + i64::from(stats.cargo)).max(0) as f64;
        self.cargo_capacity = (cargo * stats.cargo_mod).floor() as i64;

        self.stats = stats;
        self.calc_cargo();

        self.armour = rescaled(armour, armour_max);
        self.shield = rescaled(shield, shield_max);
        self.energy = rescaled(energy, energy_max);
        self.fuel = rescaled(fuel, fuel_max);
    }
}

fn rescaled(fraction: f64, maximum: f64) -> ResourceMeter {
    ResourceMeter {
        current: fraction * maximum,
        maximum,
    }
}
