//! Ship stat system.
//!
//! [`ShipStats`] is a flat record of every modifier a hull or outfit can
//! contribute. The generic operations below walk the lookup table in
//! [`table`] instead of matching on individual stats:
//!
//! ```text
//! data type         init   merge   apply(v)            display
//! Relative          1.0    a * b   x *= 1 + v (>= 0)   100 * (x - 1) %
//! Absolute          0.0    a + b   x += v              x
//! AbsolutePercent   0.0    a + b   x += v              100 * x %
//! Integer           0      a + b   x += v              x
//! Boolean           false  a | b   x = true if v != 0  x
//! ```

mod kind;
mod list;
mod table;

pub use kind::{StatData, StatKind};
pub use list::{StatEntry, StatList};
pub use table::{StatInfo, check, stat_info, stat_table};

use table::StatField;

/// Values closer to zero than this are left out of descriptions.
const DESCRIBE_EPSILON: f64 = 1e-3;

/// Errors raised by the stat table and name-based access.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    #[error("stat table row '{name}' sits at index {index}, expected {expected}")]
    TableOutOfOrder {
        name: &'static str,
        index: usize,
        expected: usize,
    },

    #[error("stat table row '{name}' has storage that does not match its data type")]
    StorageMismatch { name: &'static str },

    #[error("unknown ship stat '{0}'")]
    UnknownStat(String),
}

impl crate::error::GameError for StatError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        use crate::error::ErrorSeverity;
        match self {
            Self::TableOutOfOrder { .. } | Self::StorageMismatch { .. } => ErrorSeverity::Fatal,
            Self::UnknownStat(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TableOutOfOrder { .. } => "STAT_TABLE_OUT_OF_ORDER",
            Self::StorageMismatch { .. } => "STAT_STORAGE_MISMATCH",
            Self::UnknownStat(_) => "STAT_UNKNOWN",
        }
    }
}

/// Aggregated modifiers of a hull plus its installed outfits.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipStats {
    pub speed_mod: f64,
    pub turn_mod: f64,
    pub thrust_mod: f64,
    pub cargo_mod: f64,
    pub armour_mod: f64,
    pub armour_regen_mod: f64,
    pub shield_mod: f64,
    pub shield_regen_mod: f64,
    pub energy_mod: f64,
    pub energy_regen_mod: f64,
    pub jump_delay: f64,
    pub cargo_inertia: f64,
    pub mass_mod: f64,
    pub launch_rate: f64,
    pub fwd_firerate: f64,
    pub fwd_energy: f64,
    pub tur_firerate: f64,
    pub tur_energy: f64,

    pub thrust: f64,
    pub turn: f64,
    pub speed: f64,
    pub energy: f64,
    pub energy_regen: f64,
    pub shield: f64,
    pub shield_regen: f64,
    pub armour: f64,
    pub armour_regen: f64,

    pub absorb: f64,

    pub fuel: i32,
    pub cargo: i32,

    pub instant_jump: bool,
    pub reverse_thrust: bool,
}

/// One rendered description line.
#[derive(Clone, Debug, PartialEq)]
pub struct StatLine {
    pub kind: StatKind,
    pub text: String,
    /// Whether the modifier helps the ship (accounts for inverted stats).
    pub positive: bool,
}

impl ShipStats {
    /// Baseline stats: relative multipliers at `1.0`, everything else zeroed.
    pub fn new() -> Self {
        let mut stats = Self {
            speed_mod: 0.0,
            turn_mod: 0.0,
            thrust_mod: 0.0,
            cargo_mod: 0.0,
            armour_mod: 0.0,
            armour_regen_mod: 0.0,
            shield_mod: 0.0,
            shield_regen_mod: 0.0,
            energy_mod: 0.0,
            energy_regen_mod: 0.0,
            jump_delay: 0.0,
            cargo_inertia: 0.0,
            mass_mod: 0.0,
            launch_rate: 0.0,
            fwd_firerate: 0.0,
            fwd_energy: 0.0,
            tur_firerate: 0.0,
            tur_energy: 0.0,
            thrust: 0.0,
            turn: 0.0,
            speed: 0.0,
            energy: 0.0,
            energy_regen: 0.0,
            shield: 0.0,
            shield_regen: 0.0,
            armour: 0.0,
            armour_regen: 0.0,
            absorb: 0.0,
            fuel: 0,
            cargo: 0,
            instant_jump: false,
            reverse_thrust: false,
        };
        for info in stat_table() {
            if let (StatData::Relative, StatField::Double { get_mut, .. }) = (info.data, info.field)
            {
                *get_mut(&mut stats) = 1.0;
            }
        }
        stats
    }

    /// Folds another stat record into this one.
    pub fn merge(&mut self, other: &ShipStats) {
        for info in stat_table() {
            match info.field {
                StatField::Double { get, get_mut } => {
                    let incoming = get(other);
                    let slot = get_mut(self);
                    if info.data == StatData::Relative {
                        *slot *= incoming;
                    } else {
                        *slot += incoming;
                    }
                }
                StatField::Integer { get, get_mut } => *get_mut(self) += get(other),
                StatField::Boolean { get, get_mut } => *get_mut(self) |= get(other),
            }
        }
    }

    /// Applies a single modifier.
    pub fn apply(&mut self, entry: &StatEntry) {
        let info = stat_info(entry.kind);
        match info.field {
            StatField::Double { get_mut, .. } => {
                let slot = get_mut(self);
                if info.data == StatData::Relative {
                    *slot = (*slot * (1.0 + entry.value)).max(0.0);
                } else {
                    *slot += entry.value;
                }
            }
            StatField::Integer { get_mut, .. } => *get_mut(self) += entry.value.round() as i32,
            StatField::Boolean { get_mut, .. } => {
                if entry.value != 0.0 {
                    *get_mut(self) = true;
                }
            }
        }
    }

    /// Applies every modifier of a list in order.
    pub fn apply_list(&mut self, list: &StatList) {
        for entry in list.iter() {
            self.apply(entry);
        }
    }

    /// Reads a stat in display units (percent for relative and percentage stats).
    pub fn get(&self, kind: StatKind) -> f64 {
        let info = stat_info(kind);
        match info.field {
            StatField::Double { get, .. } => {
                let value = get(self);
                match info.data {
                    StatData::Relative => 100.0 * (value - 1.0),
                    StatData::AbsolutePercent => 100.0 * value,
                    _ => value,
                }
            }
            StatField::Integer { get, .. } => f64::from(get(self)),
            StatField::Boolean { get, .. } => {
                if get(self) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Writes a stat from display units.
    ///
    /// With `overwrite` the stored value is replaced, otherwise the value is
    /// combined the way [`merge`](Self::merge) would combine it.
    pub fn set(&mut self, kind: StatKind, value: f64, overwrite: bool) {
        let info = stat_info(kind);
        match info.field {
            StatField::Double { get_mut, .. } => {
                let slot = get_mut(self);
                match info.data {
                    StatData::Relative => {
                        let factor = (1.0 + value / 100.0).max(0.0);
                        if overwrite {
                            *slot = factor;
                        } else {
                            *slot = (*slot * factor).max(0.0);
                        }
                    }
                    StatData::AbsolutePercent => {
                        let fraction = value / 100.0;
                        if overwrite {
                            *slot = fraction;
                        } else {
                            *slot += fraction;
                        }
                    }
                    _ => {
                        if overwrite {
                            *slot = value;
                        } else {
                            *slot += value;
                        }
                    }
                }
            }
            StatField::Integer { get_mut, .. } => {
                let slot = get_mut(self);
                let value = value.round() as i32;
                if overwrite {
                    *slot = value;
                } else {
                    *slot += value;
                }
            }
            StatField::Boolean { get_mut, .. } => {
                let slot = get_mut(self);
                let value = value != 0.0;
                if overwrite {
                    *slot = value;
                } else {
                    *slot |= value;
                }
            }
        }
    }

    /// Name-based [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownStat`] if no stat has this name.
    pub fn get_by_name(&self, name: &str) -> Result<f64, StatError> {
        let kind = StatKind::from_name(name).ok_or_else(|| StatError::UnknownStat(name.into()))?;
        Ok(self.get(kind))
    }

    /// Name-based [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownStat`] if no stat has this name.
    pub fn set_by_name(&mut self, name: &str, value: f64, overwrite: bool) -> Result<(), StatError> {
        let kind = StatKind::from_name(name).ok_or_else(|| StatError::UnknownStat(name.into()))?;
        self.set(kind, value, overwrite);
        Ok(())
    }

    /// Renders every non-neutral stat as a description line.
    ///
    /// With `ship_view` set, stats already visible in a hull's base
    /// characteristics are skipped.
    pub fn describe(&self, ship_view: bool) -> Vec<StatLine> {
        stat_table()
            .filter(|info| !(ship_view && info.ship_redundant))
            .filter_map(|info| describe_line(info, self.get(info.kind)))
            .collect()
    }
}

/// Formats one stat given its display value; `None` when it is neutral.
fn describe_line(info: &StatInfo, value: f64) -> Option<StatLine> {
    if value.abs() < DESCRIBE_EPSILON {
        return None;
    }
    let shown = (value * 100.0).round() / 100.0;
    let text = match info.data {
        StatData::Relative | StatData::AbsolutePercent => format!("{shown:+}% {}", info.label),
        StatData::Absolute | StatData::Integer => format!("{shown:+} {} {}", info.unit, info.label),
        StatData::Boolean => info.label.to_string(),
    };
    Some(StatLine {
        kind: info.kind,
        text,
        positive: (value > 0.0) != info.inverted,
    })
}

impl Default for ShipStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_neutral() {
        let stats = ShipStats::new();
        assert_eq!(stats.speed_mod, 1.0);
        assert_eq!(stats.jump_delay, 1.0);
        assert_eq!(stats.thrust, 0.0);
        assert_eq!(stats.fuel, 0);
        assert!(!stats.instant_jump);
        assert!(stats.describe(false).is_empty());
    }

    #[test]
    fn relative_modifiers_compound() {
        let mut stats = ShipStats::new();
        let plus_ten = StatEntry::new(StatKind::SpeedMod, 0.10);
        stats.apply(&plus_ten);
        stats.apply(&plus_ten);
        assert!((stats.speed_mod - 1.21).abs() < 1e-12);
        assert!((stats.get(StatKind::SpeedMod) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn relative_modifiers_never_go_negative() {
        let mut stats = ShipStats::new();
        stats.apply(&StatEntry::new(StatKind::ThrustMod, -1.5));
        assert_eq!(stats.thrust_mod, 0.0);
    }

    #[test]
    fn set_keeps_relative_modifiers_non_negative() {
        let mut stats = ShipStats::new();
        stats.set(StatKind::SpeedMod, -200.0, true);
        assert_eq!(stats.speed_mod, 0.0);
        assert_eq!(stats.get(StatKind::SpeedMod), -100.0);

        stats.set(StatKind::SpeedMod, -150.0, false);
        assert_eq!(stats.speed_mod, 0.0);

        stats.set_by_name("thrust_mod", 50.0, true).unwrap();
        stats.set_by_name("thrust_mod", -300.0, false).unwrap();
        assert_eq!(stats.thrust_mod, 0.0);
    }

    #[test]
    fn zero_valued_boolean_entries_leave_the_flag_unset() {
        let mut stats = ShipStats::new();
        stats.apply(&StatEntry::new(StatKind::InstantJump, 0.0));
        assert!(!stats.instant_jump);
        stats.apply(&StatEntry::new(StatKind::InstantJump, 1.0));
        assert!(stats.instant_jump);
    }

    #[test]
    fn merge_multiplies_relative_and_adds_the_rest() {
        let mut a = ShipStats::new();
        a.set(StatKind::ArmourMod, 50.0, true);
        a.armour = 10.0;
        a.cargo = 3;
        let mut b = ShipStats::new();
        b.set(StatKind::ArmourMod, 100.0, true);
        b.armour = 5.0;
        b.cargo = 2;
        b.instant_jump = true;

        a.merge(&b);
        assert!((a.armour_mod - 3.0).abs() < 1e-12);
        assert_eq!(a.armour, 15.0);
        assert_eq!(a.cargo, 5);
        assert!(a.instant_jump);
    }

    #[test]
    fn set_and_get_round_trip_in_display_units() {
        let mut stats = ShipStats::new();
        stats.set_by_name("absorb", 20.0, true).unwrap();
        assert!((stats.absorb - 0.2).abs() < 1e-12);
        assert!((stats.get_by_name("absorb").unwrap() - 20.0).abs() < 1e-9);

        stats.set_by_name("speed_mod", 10.0, false).unwrap();
        stats.set_by_name("speed_mod", 10.0, false).unwrap();
        assert!((stats.get(StatKind::SpeedMod) - 21.0).abs() < 1e-9);

        stats.set(StatKind::ReverseThrust, 1.0, false);
        assert_eq!(stats.get(StatKind::ReverseThrust), 1.0);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut stats = ShipStats::new();
        assert_eq!(
            stats.set_by_name("warp_factor", 9.0, true),
            Err(StatError::UnknownStat("warp_factor".into()))
        );
        assert!(stats.get_by_name("warp_factor").is_err());
    }

    #[test]
    fn describe_marks_inverted_stats() {
        let mut stats = ShipStats::new();
        stats.set(StatKind::JumpDelay, 25.0, true);
        stats.set(StatKind::Cargo, 10.0, true);
        stats.set(StatKind::SpeedMod, 5.0, true);

        let lines = stats.describe(false);
        assert_eq!(lines.len(), 3);
        let jump = lines.iter().find(|l| l.kind == StatKind::JumpDelay).unwrap();
        assert_eq!(jump.text, "+25% Jump Time");
        assert!(!jump.positive);
        let cargo = lines.iter().find(|l| l.kind == StatKind::Cargo).unwrap();
        assert_eq!(cargo.text, "+10 t Cargo Space");
        assert!(cargo.positive);

        // speed_mod is redundant with the hull's own speed
        assert_eq!(stats.describe(true).len(), 2);
    }
}
