//! Stat lookup table.
//!
//! One [`StatInfo`] per [`StatKind`], stored in discriminant order so a kind
//! indexes its own row. Each row carries display metadata plus accessors into
//! the matching [`ShipStats`] field, which is what lets the generic
//! init/merge/apply/get/set code stay free of per-stat matches.

use strum::EnumCount;

use super::{ShipStats, StatData, StatError, StatKind};

/// Accessor into the [`ShipStats`] field backing a stat.
#[derive(Clone, Copy)]
pub(crate) enum StatField {
    Double {
        get: fn(&ShipStats) -> f64,
        get_mut: fn(&mut ShipStats) -> &mut f64,
    },
    Integer {
        get: fn(&ShipStats) -> i32,
        get_mut: fn(&mut ShipStats) -> &mut i32,
    },
    Boolean {
        get: fn(&ShipStats) -> bool,
        get_mut: fn(&mut ShipStats) -> &mut bool,
    },
}

/// Metadata for one stat.
#[derive(Clone, Copy)]
pub struct StatInfo {
    pub kind: StatKind,
    pub data: StatData,
    /// Human readable label used in descriptions.
    pub label: &'static str,
    /// Unit suffix for absolute and integer stats.
    pub unit: &'static str,
    /// Positive values are bad (e.g. longer jump time).
    pub inverted: bool,
    /// Already visible in a hull's base characteristics; omitted from ship views.
    pub ship_redundant: bool,
    pub(crate) field: StatField,
}

impl core::fmt::Debug for StatInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatInfo")
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("label", &self.label)
            .field("inverted", &self.inverted)
            .field("ship_redundant", &self.ship_redundant)
            .finish()
    }
}

impl StatInfo {
    /// Data-file name of the stat.
    pub fn name(&self) -> &'static str {
        self.kind.into()
    }
}

macro_rules! double {
    ($kind:ident, $data:ident, $field:ident, $label:literal, $unit:literal, $inverted:literal, $redundant:literal) => {
        StatInfo {
            kind: StatKind::$kind,
            data: StatData::$data,
            label: $label,
            unit: $unit,
            inverted: $inverted,
            ship_redundant: $redundant,
            field: StatField::Double {
                get: |s| s.$field,
                get_mut: |s| &mut s.$field,
            },
        }
    };
}

macro_rules! integer {
    ($kind:ident, $field:ident, $label:literal, $unit:literal) => {
        StatInfo {
            kind: StatKind::$kind,
            data: StatData::Integer,
            label: $label,
            unit: $unit,
            inverted: false,
            ship_redundant: false,
            field: StatField::Integer {
                get: |s| s.$field,
                get_mut: |s| &mut s.$field,
            },
        }
    };
}

macro_rules! boolean {
    ($kind:ident, $field:ident, $label:literal) => {
        StatInfo {
            kind: StatKind::$kind,
            data: StatData::Boolean,
            label: $label,
            unit: "",
            inverted: false,
            ship_redundant: false,
            field: StatField::Boolean {
                get: |s| s.$field,
                get_mut: |s| &mut s.$field,
            },
        }
    };
}

static STAT_TABLE: [StatInfo; StatKind::COUNT] = [
    double!(SpeedMod, Relative, speed_mod, "Speed", "", false, true),
    double!(TurnMod, Relative, turn_mod, "Turn", "", false, true),
    double!(ThrustMod, Relative, thrust_mod, "Thrust", "", false, true),
    double!(CargoMod, Relative, cargo_mod, "Cargo Space", "", false, true),
    double!(ArmourMod, Relative, armour_mod, "Armour Strength", "", false, true),
    double!(ArmourRegenMod, Relative, armour_regen_mod, "Armour Regeneration", "", false, true),
    double!(ShieldMod, Relative, shield_mod, "Shield Strength", "", false, true),
    double!(ShieldRegenMod, Relative, shield_regen_mod, "Shield Regeneration", "", false, true),
    double!(EnergyMod, Relative, energy_mod, "Energy Capacity", "", false, true),
    double!(EnergyRegenMod, Relative, energy_regen_mod, "Energy Regeneration", "", false, true),
    double!(JumpDelay, Relative, jump_delay, "Jump Time", "", true, false),
    double!(CargoInertia, Relative, cargo_inertia, "Cargo Inertia", "", true, false),
    double!(MassMod, Relative, mass_mod, "Ship Mass", "", true, true),
    double!(LaunchRate, Relative, launch_rate, "Fire Rate (Launcher)", "", false, false),
    double!(FwdFirerate, Relative, fwd_firerate, "Fire Rate (Cannon)", "", false, false),
    double!(FwdEnergy, Relative, fwd_energy, "Energy Usage (Cannon)", "", true, false),
    double!(TurFirerate, Relative, tur_firerate, "Fire Rate (Turret)", "", false, false),
    double!(TurEnergy, Relative, tur_energy, "Energy Usage (Turret)", "", true, false),
    double!(Thrust, Absolute, thrust, "Thrust", "MN/t", false, false),
    double!(Turn, Absolute, turn, "Turn Rate", "rad/s", false, false),
    double!(Speed, Absolute, speed, "Maximum Speed", "m/s", false, false),
    double!(Energy, Absolute, energy, "Energy Capacity", "MJ", false, false),
    double!(EnergyRegen, Absolute, energy_regen, "Energy Regeneration", "MW", false, false),
    double!(Shield, Absolute, shield, "Shield Capacity", "MJ", false, false),
    double!(ShieldRegen, Absolute, shield_regen, "Shield Regeneration", "MW", false, false),
    double!(Armour, Absolute, armour, "Armour", "MJ", false, false),
    double!(ArmourRegen, Absolute, armour_regen, "Armour Regeneration", "MW", false, false),
    double!(Absorb, AbsolutePercent, absorb, "Damage Absorption", "", false, false),
    integer!(Fuel, fuel, "Fuel", "units"),
    integer!(Cargo, cargo, "Cargo Space", "t"),
    boolean!(InstantJump, instant_jump, "Instant Jump"),
    boolean!(ReverseThrust, reverse_thrust, "Reverse Thrusters"),
];

/// Returns the lookup row for a stat.
pub fn stat_info(kind: StatKind) -> &'static StatInfo {
    &STAT_TABLE[kind.index()]
}

/// Iterates the whole table in index order.
pub fn stat_table() -> impl Iterator<Item = &'static StatInfo> {
    STAT_TABLE.iter()
}

/// Validates that every row sits at the index of its own kind.
///
/// # Errors
///
/// Returns [`StatError::TableOutOfOrder`] for the first misplaced row.
pub fn check() -> Result<(), StatError> {
    check_rows(&STAT_TABLE)
}

fn check_rows(rows: &[StatInfo]) -> Result<(), StatError> {
    for (index, info) in rows.iter().enumerate() {
        if info.kind.index() != index {
            return Err(StatError::TableOutOfOrder {
                name: info.name(),
                index,
                expected: info.kind.index(),
            });
        }
        let storage_matches = matches!(
            (info.data, info.field),
            (
                StatData::Relative | StatData::Absolute | StatData::AbsolutePercent,
                StatField::Double { .. }
            ) | (StatData::Integer, StatField::Integer { .. })
                | (StatData::Boolean, StatField::Boolean { .. })
        );
        if !storage_matches {
            return Err(StatError::StorageMismatch { name: info.name() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_consistent() {
        assert_eq!(check(), Ok(()));
        assert_eq!(stat_table().count(), StatKind::COUNT);
    }

    #[test]
    fn misplaced_row_is_reported() {
        let mut rows = STAT_TABLE;
        rows.swap(0, 1);
        let err = check_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            StatError::TableOutOfOrder {
                name: "turn_mod",
                index: 0,
                expected: 1,
            }
        );
    }

    #[test]
    fn rows_point_at_their_fields() {
        let mut stats = ShipStats::new();
        stats.cargo_inertia = 0.5;
        match stat_info(StatKind::CargoInertia).field {
            StatField::Double { get, .. } => assert_eq!(get(&stats), 0.5),
            _ => panic!("cargo_inertia must be a double"),
        }
    }
}
