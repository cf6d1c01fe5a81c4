//! Stat modifier lists carried by outfits and hulls.

use super::{StatData, StatKind, StatLine, describe_line, stat_info};

/// One stat modification in internal units.
///
/// Relative stats hold a fraction (`0.1` for +10%), percentages hold a
/// fraction, absolutes hold the raw amount, integers hold a whole number and
/// booleans are set by any non-zero value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatEntry {
    pub kind: StatKind,
    pub value: f64,
}

impl StatEntry {
    pub const fn new(kind: StatKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Builds an entry from a data-file name and value.
    ///
    /// Data files write relative and percentage stats as percentages, so those
    /// are divided by 100. Returns `None` (with a warning) for unknown names.
    pub fn from_named(name: &str, value: f64) -> Option<Self> {
        let Some(kind) = StatKind::from_name(name) else {
            tracing::warn!(stat = name, "unknown ship stat");
            return None;
        };
        let value = match stat_info(kind).data {
            StatData::Relative | StatData::AbsolutePercent => value / 100.0,
            StatData::Integer => value.round(),
            StatData::Absolute | StatData::Boolean => value,
        };
        Some(Self { kind, value })
    }
}

/// Ordered list of stat entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatList {
    entries: Vec<StatEntry>,
}

impl StatList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: StatEntry) {
        self.entries.push(entry);
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: f64) -> Self {
        self.push(StatEntry::new(kind, value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One description line per non-neutral entry, in list order.
    pub fn describe(&self) -> Vec<StatLine> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let info = stat_info(entry.kind);
                let value = match info.data {
                    StatData::Relative | StatData::AbsolutePercent => entry.value * 100.0,
                    StatData::Boolean => f64::from(u8::from(entry.value != 0.0)),
                    StatData::Absolute | StatData::Integer => entry.value,
                };
                describe_line(info, value)
            })
            .collect()
    }
}

impl FromIterator<StatEntry> for StatList {
    fn from_iter<T: IntoIterator<Item = StatEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
