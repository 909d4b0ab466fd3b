//! Per-player statistic counters.
//!
//! Keys are typed so per-cause counters can only name causes the catalog
//! accepted. Reading an unseen key yields zero without inserting it; the
//! map still remembers every key ever written for full-record export.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::catalog::Cause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Deaths,
    Kills,
    Suicides,
    TeamKills,
    QuadPickups,
    PentPickups,
    FlagPickups,
    FlagDrops,
    FlagCaptures,
    FlagReturns,
    ReturnAssists,
    CarrierFrags,
    CarrierDefends,
    CarrierDangerDefends,
    FlagDefends,
    CtfPoints,
    KillsWith(Cause),
    TeamKillsWith(Cause),
    DeathsBy(Cause),
    SuicidesBy(Cause),
}

impl Stat {
    /// Stable string key used in exported records.
    pub fn key(&self) -> Cow<'static, str> {
        match self {
            Self::Deaths => "deaths".into(),
            Self::Kills => "kills".into(),
            Self::Suicides => "suicides".into(),
            Self::TeamKills => "tkills".into(),
            Self::QuadPickups => "quad_count".into(),
            Self::PentPickups => "pent_count".into(),
            Self::FlagPickups => "ctf-pickups".into(),
            Self::FlagDrops => "ctf-drops".into(),
            Self::FlagCaptures => "ctf-caps".into(),
            Self::FlagReturns => "ctf-returns".into(),
            Self::ReturnAssists => "ctf-return-assists".into(),
            Self::CarrierFrags => "ctf-carrier-frags".into(),
            Self::CarrierDefends => "ctf-carrier-defends".into(),
            Self::CarrierDangerDefends => "ctf-carrier-danger-defends".into(),
            Self::FlagDefends => "ctf-flag-defends".into(),
            Self::CtfPoints => "ctf-points".into(),
            Self::KillsWith(cause) => format!("kills-{}", cause.key()).into(),
            Self::TeamKillsWith(cause) => format!("tkills-{}", cause.key()).into(),
            Self::DeathsBy(cause) => format!("deaths-{}", cause.key()).into(),
            Self::SuicidesBy(cause) => format!("suicide-{}", cause.key()).into(),
        }
    }
}

/// Sparse counter map with get-or-zero reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatCounters {
    counts: BTreeMap<Stat, i32>,
}

impl StatCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, zero if never written.
    pub fn get(&self, stat: Stat) -> i32 {
        self.counts.get(&stat).copied().unwrap_or(0)
    }

    pub fn add(&mut self, stat: Stat, delta: i32) -> i32 {
        let value = self.counts.entry(stat).or_insert(0);
        *value += delta;
        *value
    }

    pub fn increment(&mut self, stat: Stat) -> i32 {
        self.add(stat, 1)
    }

    /// Every key ever written, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.counts.iter().map(|(stat, value)| (*stat, *value))
    }

    pub fn contains(&self, stat: Stat) -> bool {
        self.counts.contains_key(&stat)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of a per-cause family, e.g. all `KillsWith(_)` counters.
    pub fn sum_by_cause(&self, family: fn(Cause) -> Stat) -> i32 {
        self.counts
            .iter()
            .filter(|(stat, _)| match stat {
                Stat::KillsWith(c)
                | Stat::TeamKillsWith(c)
                | Stat::DeathsBy(c)
                | Stat::SuicidesBy(c) => family(*c) == **stat,
                _ => false,
            })
            .map(|(_, value)| *value)
            .sum()
    }
}

impl Serialize for StatCounters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (stat, value) in &self.counts {
            map.serialize_entry(stat.key().as_ref(), value)?;
        }
        map.end()
    }
}
