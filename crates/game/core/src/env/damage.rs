//! Damage resolution collaborator.

use strum::{AsRefStr, Display, EnumString};

/// Kind of damage a weapon deals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    Energy,
    Kinetic,
}

/// Raw damage split into its shield and armour components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DamageSplit {
    pub shield: f64,
    pub armour: f64,
    /// Fraction of the impacting body's velocity transferred to the target.
    pub knockback: f64,
}

/// Converts raw weapon damage into shield damage, armour damage and knockback.
pub trait DamageOracle: Send + Sync {
    fn compute(&self, damage_type: DamageType, damage: f64) -> DamageSplit;
}

/// Stock damage table.
///
/// | type    | shield | armour | knockback |
/// |---------|--------|--------|-----------|
/// | energy  | ×1.1   | ×0.7   | 0.1       |
/// | kinetic | ×0.8   | ×1.2   | 1.0       |
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDamage;

impl DamageOracle for StandardDamage {
    fn compute(&self, damage_type: DamageType, damage: f64) -> DamageSplit {
        match damage_type {
            DamageType::Energy => DamageSplit {
                shield: damage * 1.1,
                armour: damage * 0.7,
                knockback: 0.1,
            },
            DamageType::Kinetic => DamageSplit {
                shield: damage * 0.8,
                armour: damage * 1.2,
                knockback: 1.0,
            },
        }
    }
}
