//! Faction relations.

use std::collections::HashSet;

/// Faction identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactionId(pub u32);

impl core::fmt::Display for FactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "faction:{}", self.0)
    }
}

/// Answers whether two factions are at war.
pub trait FactionOracle: Send + Sync {
    fn are_enemies(&self, a: FactionId, b: FactionId) -> bool;
}

/// Named factions with a symmetric enemy relation.
#[derive(Clone, Debug, Default)]
pub struct FactionTable {
    names: Vec<String>,
    enemies: HashSet<(FactionId, FactionId)>,
}

impl FactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a faction, returning the existing id for a known name.
    pub fn add(&mut self, name: impl Into<String>) -> FactionId {
        let name = name.into();
        if let Some(id) = self.id(&name) {
            return id;
        }
        self.names.push(name);
        FactionId(self.names.len() as u32 - 1)
    }

    pub fn id(&self, name: &str) -> Option<FactionId> {
        self.names
            .iter()
            .position(|known| known == name)
            .map(|index| FactionId(index as u32))
    }

    pub fn name(&self, id: FactionId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Declares two factions mutual enemies.
    pub fn set_enemies(&mut self, a: FactionId, b: FactionId) {
        self.enemies.insert((a, b));
        self.enemies.insert((b, a));
    }
}

impl FactionOracle for FactionTable {
    fn are_enemies(&self, a: FactionId, b: FactionId) -> bool {
        self.enemies.contains(&(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enmity_is_symmetric() {
        let mut table = FactionTable::new();
        let empire = table.add("Empire");
        let pirate = table.add("Pirate");
        let trader = table.add("Trader");
        table.set_enemies(empire, pirate);

        assert!(table.are_enemies(pirate, empire));
        assert!(table.are_enemies(empire, pirate));
        assert!(!table.are_enemies(empire, trader));
        assert!(!table.are_enemies(empire, empire));
    }

    #[test]
    fn re_adding_a_name_keeps_its_id() {
        let mut table = FactionTable::new();
        let first = table.add("Empire");
        assert_eq!(table.add("Empire"), first);
        assert_eq!(table.len(), 1);
        assert_eq!(table.name(first), Some("Empire"));
    }
}
