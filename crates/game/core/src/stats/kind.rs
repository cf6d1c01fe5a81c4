//! Stat identifiers and their value families.

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Every ship stat an outfit or hull can modify.
///
/// The discriminant doubles as the index into the stat lookup table, and the
/// snake_case rendering is the name used by data files and scripting.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumCount,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    // Relative modifiers (multiplicative, baseline 1).
    SpeedMod,
    TurnMod,
    ThrustMod,
    CargoMod,
    ArmourMod,
    ArmourRegenMod,
    ShieldMod,
    ShieldRegenMod,
    EnergyMod,
    EnergyRegenMod,
    JumpDelay,
    CargoInertia,
    MassMod,
    LaunchRate,
    FwdFirerate,
    FwdEnergy,
    TurFirerate,
    TurEnergy,

    // Absolute modifiers (additive).
    Thrust,
    Turn,
    Speed,
    Energy,
    EnergyRegen,
    Shield,
    ShieldRegen,
    Armour,
    ArmourRegen,

    // Absolute percentages (additive fractions).
    Absorb,

    // Integers.
    Fuel,
    Cargo,

    // Booleans.
    InstantJump,
    ReverseThrust,
}

impl StatKind {
    /// Resolves a stat by its data-file name.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Index into the stat lookup table.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// How a stat's value is stored and combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatData {
    /// Multiplier around a baseline of `1.0`; contributions multiply.
    Relative,
    /// Plain additive quantity.
    Absolute,
    /// Additive fraction, displayed as a percentage.
    AbsolutePercent,
    /// Additive integer.
    Integer,
    /// Flag; contributions OR together.
    Boolean,
}

impl StatData {
    /// Whether data files express this stat as a percentage.
    pub const fn is_percentage(self) -> bool {
        matches!(self, Self::Relative | Self::AbsolutePercent)
    }
}
