//! Pilot registry.
//!
//! Pilots are owned by a [`PilotStack`] kept sorted by ascending id, which is
//! what makes id lookups a binary search. Storage grows in fixed chunks. The
//! proximity queries are free functions over any pilot iterator so both the
//! registry and a thinker's [`Neighbours`](crate::control::Neighbours) view
//! share them.

use crate::env::FactionOracle;
use crate::physics::Vec2;
use crate::pilot::{Pilot, PilotId};

/// Whether a pilot can be picked as a combat target.
fn targetable(pilot: &Pilot) -> bool {
    !pilot.is_disabled() && !pilot.is_dead()
}

/// Returns the id of the closest candidate matching `accept`.
///
/// Ties keep the candidate seen first.
fn nearest_matching<'a>(
    origin: Vec2,
    candidates: impl IntoIterator<Item = &'a Pilot>,
    mut accept: impl FnMut(&Pilot) -> bool,
) -> Option<PilotId> {
    let mut best: Option<(f64, PilotId)> = None;
    for candidate in candidates {
        if !accept(candidate) {
            continue;
        }
        let distance = candidate.solid.pos.distance(origin);
        if best.is_none_or(|(closest, _)| distance < closest) {
            best = Some((distance, candidate.id()));
        }
    }
    best.map(|(_, id)| id)
}

/// Nearest targetable pilot whose faction is an enemy of `pilot`'s.
pub fn nearest_enemy<'a>(
    pilot: &Pilot,
    candidates: impl IntoIterator<Item = &'a Pilot>,
    factions: &dyn FactionOracle,
) -> Option<PilotId> {
    nearest_matching(pilot.solid.pos, candidates, |candidate| {
        candidate.id() != pilot.id()
            && targetable(candidate)
            && factions.are_enemies(pilot.faction(), candidate.faction())
    })
}

/// Nearest targetable pilot flagged hostile to the player.
pub fn nearest_hostile<'a>(
    origin: Vec2,
    candidates: impl IntoIterator<Item = &'a Pilot>,
) -> Option<PilotId> {
    nearest_matching(origin, candidates, |candidate| {
        !candidate.is_player() && candidate.is_hostile() && targetable(candidate)
    })
}

/// Nearest targetable pilot to `origin` other than `exclude`.
pub fn nearest_pilot<'a>(
    exclude: PilotId,
    origin: Vec2,
    candidates: impl IntoIterator<Item = &'a Pilot>,
) -> Option<PilotId> {
    nearest_matching(origin, candidates, |candidate| {
        candidate.id() != exclude && targetable(candidate)
    })
}

/// Sorted, chunk-grown pilot storage.
#[derive(Debug)]
pub struct PilotStack {
    pub(crate) slots: Vec<Box<Pilot>>,
    chunk: usize,
}

impl PilotStack {
    pub fn new(chunk: usize) -> Self {
        Self {
            slots: Vec::new(),
            chunk: chunk.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pilot> {
        self.slots.iter().map(|pilot| &**pilot)
    }

    /// Every pilot except the player, in id order.
    pub fn renderable(&self) -> impl Iterator<Item = &Pilot> {
        self.iter().filter(|pilot| !pilot.is_player())
    }

    pub(crate) fn index_of(&self, id: PilotId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |pilot| pilot.id()).ok()
    }

    pub fn get(&self, id: PilotId) -> Option<&Pilot> {
        self.index_of(id).map(|index| &*self.slots[index])
    }

    pub fn get_mut(&mut self, id: PilotId) -> Option<&mut Pilot> {
        self.index_of(id).map(|index| &mut *self.slots[index])
    }

    /// Smallest registered id strictly greater than `id`.
    ///
    /// Wraps around to [`PilotId::PLAYER`] past the last pilot, which makes
    /// repeated calls cycle through every target.
    pub fn next_id(&self, id: PilotId) -> PilotId {
        let index = self.slots.partition_point(|pilot| pilot.id() <= id);
        self.slots
            .get(index)
            .map_or(PilotId::PLAYER, |pilot| pilot.id())
    }

    /// Inserts a pilot at its sorted position.
    pub(crate) fn insert(&mut self, pilot: Box<Pilot>) {
        if self.slots.len() == self.slots.capacity() {
            self.slots.reserve_exact(self.chunk);
        }
        let index = self.slots.partition_point(|other| other.id() < pilot.id());
        self.slots.insert(index, pilot);
    }

    /// Removes the pilot at `index`, shifting later pilots down.
    pub(crate) fn remove_at(&mut self, index: usize) -> Box<Pilot> {
        self.slots.remove(index)
    }

    /// Removes every pilot matching `predicate`, handing each to `on_removed`.
    pub(crate) fn drain_where(
        &mut self,
        mut predicate: impl FnMut(&Pilot) -> bool,
        mut on_removed: impl FnMut(Box<Pilot>),
    ) {
        let mut index = 0;
        while index < self.slots.len() {
            if predicate(&self.slots[index]) {
                on_removed(self.slots.remove(index));
            } else {
                index += 1;
            }
        }
    }

    /// Drops all storage, including reserved capacity.
    pub(crate) fn release(&mut self) {
        self.slots = Vec::new();
    }

    pub fn nearest_enemy(&self, pilot: &Pilot, factions: &dyn FactionOracle) -> Option<PilotId> {
        nearest_enemy(pilot, self.iter(), factions)
    }

    pub fn nearest_hostile(&self, origin: Vec2) -> Option<PilotId> {
        nearest_hostile(origin, self.iter())
    }

    pub fn nearest_pilot(&self, exclude: PilotId, origin: Vec2) -> Option<PilotId> {
        nearest_pilot(exclude, origin, self.iter())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::env::{FactionId, FactionTable, Ship};
    use crate::pilot::PilotSpec;

    fn pilot(id: u32, faction: u32, x: f64) -> Box<Pilot> {
        let ship = Arc::new(Ship {
            mass: 10.0,
            armour: 50.0,
            ..Ship::new("Hyena")
        });
        let mut spec = PilotSpec::new(ship, FactionId(faction)).at(Vec2::new(x, 0.0));
        if id == 0 {
            spec = spec.player();
        }
        Box::new(Pilot::new(PilotId(id), spec))
    }

    fn stack(ids: &[u32]) -> PilotStack {
        let mut stack = PilotStack::new(32);
        for &id in ids {
            stack.insert(pilot(id, 1, f64::from(id) * 10.0));
        }
        stack
    }

    #[test]
    fn next_id_cycles_through_the_registry() {
        let stack = stack(&[0, 1, 5, 9]);
        assert_eq!(stack.next_id(PilotId(1)), PilotId(5));
        assert_eq!(stack.next_id(PilotId(5)), PilotId(9));
        assert_eq!(stack.next_id(PilotId(9)), PilotId::PLAYER);
        // an unregistered id still yields its successor
        assert_eq!(stack.next_id(PilotId(3)), PilotId(5));
    }

    #[test]
    fn insert_keeps_ids_sorted() {
        let stack = stack(&[3, 1, 0, 2]);
        let ids: Vec<_> = stack.iter().map(|p| p.id().0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert!(stack.get(PilotId(2)).is_some());
        assert!(stack.get(PilotId(7)).is_none());
    }

    #[test]
    fn storage_grows_in_chunks() {
        let mut stack = PilotStack::new(4);
        stack.insert(pilot(1, 1, 0.0));
        assert_eq!(stack.capacity(), 4);
        for id in 2..=5 {
            stack.insert(pilot(id, 1, 0.0));
        }
        assert_eq!(stack.capacity(), 8);
    }

    #[test]
    fn renderable_skips_the_player() {
        let stack = stack(&[0, 1, 2]);
        let ids: Vec<_> = stack.renderable().map(|p| p.id().0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn nearest_enemy_ignores_friends_and_wrecks() {
        let mut factions = FactionTable::new();
        let empire = factions.add("Empire");
        let pirate = factions.add("Pirate");
        factions.set_enemies(empire, pirate);

        let mut stack = PilotStack::new(32);
        stack.insert(pilot(1, empire.0, 0.0));
        stack.insert(pilot(2, empire.0, 5.0));
        stack.insert(pilot(3, pirate.0, 50.0));
        stack.insert(pilot(4, pirate.0, 80.0));

        let me = stack.get(PilotId(1)).unwrap().clone();
        assert_eq!(stack.nearest_enemy(&me, &factions), Some(PilotId(3)));

        stack
            .get_mut(PilotId(3))
            .unwrap()
            .flags_mut()
            .insert(crate::pilot::PilotFlags::DISABLED);
        assert_eq!(stack.nearest_enemy(&me, &factions), Some(PilotId(4)));
    }

    #[test]
    fn ties_go_to_the_lower_id() {
        let mut stack = PilotStack::new(32);
        stack.insert(pilot(1, 1, 0.0));
        stack.insert(pilot(2, 1, 10.0));
        stack.insert(pilot(3, 1, -10.0));
        assert_eq!(stack.nearest_pilot(PilotId(1), Vec2::ZERO), Some(PilotId(2)));
    }

    #[test]
    fn nearest_hostile_needs_the_flag() {
        let mut stack = stack(&[0, 1, 2]);
        assert_eq!(stack.nearest_hostile(Vec2::ZERO), None);
        stack.get_mut(PilotId(2)).unwrap().set_hostile(true);
        assert_eq!(stack.nearest_hostile(Vec2::ZERO), Some(PilotId(2)));
    }
}
