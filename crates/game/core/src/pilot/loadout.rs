//! Installed outfits and weapon bindings.
//!
//! Bindings (secondary weapon, its ammunition, the afterburner) are stored as
//! indices into the outfit list. Any structural change to the list re-resolves
//! them by name so they never dangle.

use std::sync::Arc;

use super::{Pilot, PilotFlags};
use crate::env::{Outfit, OutfitKind};
use crate::events::SimEvent;

/// An outfit installed on a pilot.
#[derive(Clone, Debug, PartialEq)]
pub struct PilotOutfit {
    pub outfit: Arc<Outfit>,
    pub quantity: u32,
    /// Time this slot last fired.
    pub last_fired: Option<f64>,
}

impl PilotOutfit {
    pub fn new(outfit: Arc<Outfit>, quantity: u32) -> Self {
        Self {
            outfit,
            quantity,
            last_fired: None,
        }
    }
}

/// Parses an outfit summary (`"2x Laser Cannon, 1x Missile Launcher"`).
///
/// Malformed items are skipped.
pub fn parse_outfit_summary(summary: &str) -> Vec<(u32, String)> {
    summary
        .split(", ")
        .filter_map(|item| {
            let (quantity, name) = item.split_once("x ")?;
            Some((quantity.trim().parse().ok()?, name.to_string()))
        })
        .collect()
}

impl Pilot {
    pub fn outfits(&self) -> &[PilotOutfit] {
        &self.outfits
    }

    pub fn secondary_outfit(&self) -> Option<&PilotOutfit> {
        self.secondary.and_then(|index| self.outfits.get(index))
    }

    pub fn ammo_outfit(&self) -> Option<&PilotOutfit> {
        self.ammo.and_then(|index| self.outfits.get(index))
    }

    pub fn afterburner_outfit(&self) -> Option<&PilotOutfit> {
        self.afterburner.and_then(|index| self.outfits.get(index))
    }

    /// Installed quantity of an outfit, `0` if absent.
    pub fn outfit_quantity(&self, outfit: &Outfit) -> u32 {
        self.outfit_position(outfit)
            .map_or(0, |index| self.outfits[index].quantity)
    }

    /// Weapon capacity not used by installed outfits.
    pub fn free_space(&self) -> i64 {
        let used: i64 = self
            .outfits
            .iter()
            .map(|slot| i64::from(slot.quantity) * i64::from(slot.outfit.mass))
            .sum();
        i64::from(self.ship.cap_weapon) - used
    }

    /// Installs up to `quantity` units of `outfit`, returning how many fit.
    ///
    /// The request is clipped to free weapon capacity and to the outfit's
    /// per-pilot maximum. Maps are not installed: they reveal the chart and
    /// count as one unit.
    pub fn add_outfit(
        &mut self,
        outfit: &Arc<Outfit>,
        quantity: u32,
        events: &mut Vec<SimEvent>,
    ) -> u32 {
        if let OutfitKind::Map(map) = &outfit.kind {
            events.push(SimEvent::MapRevealed { radius: map.radius });
            return 1;
        }

        let mut quantity = quantity;
        if outfit.mass > 0 {
            let wanted = i64::from(quantity) * i64::from(outfit.mass);
            let free = self.free_space().max(0);
            if wanted > free {
                quantity = u32::try_from(free / i64::from(outfit.mass)).unwrap_or(0);
            }
        }
        if quantity == 0 {
            return 0;
        }

        let secondary = self.secondary_name();
        match self.outfit_position(outfit) {
            Some(index) => {
                let slot = &mut self.outfits[index];
                quantity = quantity.min(outfit.max.saturating_sub(slot.quantity));
                if quantity == 0 {
                    return 0;
                }
                slot.quantity += quantity;
            }
            None => {
                quantity = quantity.min(outfit.max);
                if quantity == 0 {
                    return 0;
                }
                self.outfits.push(PilotOutfit::new(Arc::clone(outfit), quantity));
            }
        }

        self.rebind(secondary.as_deref());
        self.calc_stats();
        quantity
    }

    /// Removes up to `quantity` units of `outfit`, returning how many were removed.
    ///
    /// Removing at least the installed amount drops the outfit entirely.
    pub fn remove_outfit(&mut self, outfit: &Outfit, quantity: u32) -> u32 {
        let Some(index) = self.outfit_position(outfit) else {
            tracing::warn!(pilot = %self.id, outfit = %outfit.name, "removing outfit the pilot does not have");
            return 0;
        };

        let installed = self.outfits[index].quantity;
        let removed = quantity.min(installed);
        if quantity >= installed {
            let secondary = self.secondary_name();
            self.outfits.remove(index);
            self.rebind(secondary.as_deref());
        } else {
            self.outfits[index].quantity -= quantity;
        }

        self.calc_stats();
        removed
    }

    /// Comma separated `"{quantity}x {name}"` list of installed outfits.
    pub fn outfit_summary(&self) -> String {
        self.outfits
            .iter()
            .map(|slot| format!("{}x {}", slot.quantity, slot.outfit.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Selects the secondary weapon by outfit name, or clears it with `None`.
    ///
    /// Selecting a launcher also binds the ammunition it names.
    pub fn set_secondary(&mut self, name: Option<&str>) {
        let Some(name) = name else {
            self.secondary = None;
            self.ammo = None;
            return;
        };
        if !self.outfits.iter().any(|slot| slot.outfit.name == name) {
            tracing::warn!(pilot = %self.id, outfit = name, "selecting non-existent secondary weapon");
        }
        self.rebind(Some(name));
    }

    fn secondary_name(&self) -> Option<String> {
        self.secondary_outfit().map(|slot| slot.outfit.name.clone())
    }

    /// Re-resolves every binding against the current outfit list.
    pub(super) fn rebind(&mut self, secondary: Option<&str>) {
        self.secondary =
            secondary.and_then(|name| self.outfits.iter().position(|slot| slot.outfit.name == name));

        let ammo_name = self
            .secondary_outfit()
            .and_then(|slot| slot.outfit.ammo_name())
            .map(str::to_string);
        self.ammo = ammo_name
            .and_then(|name| self.outfits.iter().position(|slot| slot.outfit.name == name));

        self.afterburner = self.outfits.iter().position(|slot| slot.outfit.is_afterburner());

        let has_turret = self.outfits.iter().any(|slot| slot.outfit.is_turret());
        self.flags.set(PilotFlags::HAS_TURRET, has_turret);
    }
}
