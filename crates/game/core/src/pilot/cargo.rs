//! Cargo hold.
//!
//! Ordinary cargo is merged per commodity; mission cargo is kept in separate
//! lots tagged with a session-unique id so it can be removed exactly. Cargo
//! weighs on the hull: every tonne moved in or out adjusts the pilot's mass.

use std::sync::Arc;

use super::Pilot;
use crate::env::Commodity;
use crate::events::SimEvent;

/// Identifier of a mission cargo lot, unique for the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionCargoId(pub u32);

/// A quantity of one commodity in the hold.
#[derive(Clone, Debug, PartialEq)]
pub struct CargoLot {
    pub commodity: Arc<Commodity>,
    pub quantity: u32,
    /// Set for mission cargo; `None` for ordinary, tradeable cargo.
    pub mission_id: Option<MissionCargoId>,
}

impl Pilot {
    pub fn cargo(&self) -> &[CargoLot] {
        &self.cargo
    }

    pub fn cargo_capacity(&self) -> i64 {
        self.cargo_capacity
    }

    pub fn cargo_free(&self) -> i64 {
        self.cargo_free
    }

    pub fn cargo_used(&self) -> i64 {
        self.cargo.iter().map(|lot| i64::from(lot.quantity)).sum()
    }

    /// Ordinary cargo of a commodity currently held.
    pub fn cargo_quantity(&self, commodity: &Commodity) -> u32 {
        self.commodity_lot(commodity)
            .map_or(0, |index| self.cargo[index].quantity)
    }

    /// Loads up to `quantity` tonnes of ordinary cargo, returning what fit.
    pub fn add_cargo(&mut self, commodity: &Arc<Commodity>, quantity: u32) -> u32 {
        let free = u32::try_from(self.cargo_free.max(0)).unwrap_or(u32::MAX);
        let quantity = quantity.min(free);
        if quantity == 0 {
            return 0;
        }

        match self.commodity_lot(commodity) {
            Some(index) => self.cargo[index].quantity += quantity,
            None => self.cargo.push(CargoLot {
                commodity: Arc::clone(commodity),
                quantity,
                mission_id: None,
            }),
        }
        self.shift_cargo(i64::from(quantity));
        quantity
    }

    /// Unloads up to `quantity` tonnes of ordinary cargo, returning what was removed.
    ///
    /// Mission cargo of the same commodity is never touched.
    pub fn remove_cargo(&mut self, commodity: &Commodity, quantity: u32) -> u32 {
        let Some(index) = self.commodity_lot(commodity) else {
            tracing::warn!(
                pilot = %self.id,
                commodity = %commodity.name,
                "removing cargo the pilot does not carry"
            );
            return 0;
        };

        let held = self.cargo[index].quantity;
        let removed = quantity.min(held);
        if removed == held {
            self.cargo.remove(index);
        } else {
            self.cargo[index].quantity -= removed;
        }
        self.shift_cargo(-i64::from(removed));
        removed
    }

    /// Loads a mission cargo lot under an id allocated by the caller.
    ///
    /// The lot is clipped to free space but always recorded, so the id stays
    /// removable even when nothing fit.
    pub fn add_mission_cargo(
        &mut self,
        id: MissionCargoId,
        commodity: &Arc<Commodity>,
        quantity: u32,
    ) -> u32 {
        let free = u32::try_from(self.cargo_free.max(0)).unwrap_or(u32::MAX);
        let quantity = quantity.min(free);
        self.cargo.push(CargoLot {
            commodity: Arc::clone(commodity),
            quantity,
            mission_id: Some(id),
        });
        self.shift_cargo(i64::from(quantity));
        quantity
    }

    /// Removes the mission lot with exactly this id.
    pub fn remove_mission_cargo(&mut self, id: MissionCargoId) -> bool {
        let Some(index) = self.cargo.iter().position(|lot| lot.mission_id == Some(id)) else {
            tracing::debug!(pilot = %self.id, ?id, "mission cargo not found");
            return false;
        };
        let lot = self.cargo.remove(index);
        self.shift_cargo(-i64::from(lot.quantity));
        true
    }

    /// Recomputes free space and mass from the hold contents.
    pub(super) fn calc_cargo(&mut self) {
        let used = self.cargo_used();
        self.cargo_free = self.cargo_capacity - used;
        self.solid.mass =
            self.ship.mass * self.stats.mass_mod + used as f64 * self.stats.cargo_inertia;
    }

    fn shift_cargo(&mut self, delta: i64) {
        self.cargo_free -= delta;
        self.solid.mass += delta as f64 * self.stats.cargo_inertia;
    }

    /// Throws every lot out of the hull (used when it explodes).
    pub(super) fn jettison_cargo(&self, events: &mut Vec<SimEvent>) {
        for lot in self.cargo.iter().filter(|lot| lot.quantity > 0) {
            events.push(SimEvent::CargoJettisoned {
                pilot: self.id,
                commodity: Arc::clone(&lot.commodity),
                quantity: lot.quantity,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    fn assert_hold_balanced(pilot: &Pilot) {
        assert_eq!(pilot.cargo_free() + pilot.cargo_used(), pilot.cargo_capacity());
        let expected = pilot.ship().mass + pilot.cargo_used() as f64;
        assert!((pilot.solid.mass - expected).abs() < 1e-9);
    }

    #[test]
    fn add_merges_and_clips() {
        let mut pilot = npc();
        assert_eq!(pilot.add_cargo(&food(), 8), 8);
        assert_eq!(pilot.add_cargo(&food(), 8), 8);
        assert_eq!(pilot.add_cargo(&food(), 8), 4);
        assert_eq!(pilot.cargo().len(), 1);
        assert_eq!(pilot.cargo_quantity(&food()), 20);
        assert_eq!(pilot.add_cargo(&ore(), 1), 0);
        assert_hold_balanced(&pilot);
    }

    #[test]
    fn removing_absent_cargo_changes_nothing() {
        let mut pilot = npc();
        pilot.add_cargo(&food(), 3);
        assert_eq!(pilot.remove_cargo(&ore(), 2), 0);
        assert_eq!(pilot.cargo_quantity(&food()), 3);
        assert_hold_balanced(&pilot);
    }

    #[test]
    fn add_then_remove_restores_mass() {
        let mut pilot = npc();
        let mass = pilot.solid.mass;
        let free = pilot.cargo_free();
        let loaded = pilot.add_cargo(&ore(), 12);
        assert!((pilot.solid.mass - (mass + 12.0)).abs() < 1e-9);
        assert_eq!(pilot.remove_cargo(&ore(), loaded), loaded);
        assert_eq!(pilot.cargo_free(), free);
        assert!((pilot.solid.mass - mass).abs() < 1e-9);
        assert!(pilot.cargo().is_empty());
    }

    #[test]
    fn partial_removal_keeps_the_lot() {
        let mut pilot = npc();
        pilot.add_cargo(&food(), 10);
        assert_eq!(pilot.remove_cargo(&food(), 4), 4);
        assert_eq!(pilot.cargo_quantity(&food()), 6);
        assert_eq!(pilot.remove_cargo(&food(), 50), 6);
        assert_eq!(pilot.remove_cargo(&food(), 1), 0);
        assert_hold_balanced(&pilot);
    }

    #[test]
    fn mission_cargo_is_separate() {
        let mut pilot = npc();
        pilot.add_cargo(&food(), 5);
        assert_eq!(pilot.add_mission_cargo(MissionCargoId(1), &food(), 5), 5);
        assert_eq!(pilot.add_mission_cargo(MissionCargoId(2), &food(), 5), 5);
        assert_eq!(pilot.cargo().len(), 3);

        // ordinary removal never reaches mission lots
        assert_eq!(pilot.remove_cargo(&food(), 20), 5);
        assert_eq!(pilot.cargo().len(), 2);

        assert!(pilot.remove_mission_cargo(MissionCargoId(2)));
        assert!(!pilot.remove_mission_cargo(MissionCargoId(2)));
        assert_eq!(pilot.cargo()[0].mission_id, Some(MissionCargoId(1)));
        assert_hold_balanced(&pilot);
    }
}
