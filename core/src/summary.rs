//! End-of-session summary record
//!
//! One document per session in the stats exchange format (version 3):
//! session metadata plus a record for every player on a scoring team.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Cause;
use crate::roster::{ClientId, Player, Roster, Stat, Team};
use crate::session::SessionReport;

pub const SUMMARY_VERSION: u32 = 3;

/// Session metadata the core cannot know
#[derive(Debug, Clone, Default)]
pub struct SummaryMeta {
    /// `YYYY-MM-DD HH:MM:SS +ZZZZ`
    pub date: String,
    /// Recording file name
    pub demo: String,
    pub hostname: String,
    pub ip: String,
    pub port: u16,
    /// Server time limit in minutes
    pub timelimit: u32,
    pub deathmatch: u32,
    pub teamplay: u32,
}

/// Client string reported for every player.
pub const CLIENT_NAME: &str = "Quake 1.07";

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub version: u32,
    pub date: String,
    pub map: String,
    pub hostname: String,
    pub ip: String,
    pub port: u16,
    pub mode: &'static str,
    pub tl: u32,
    pub dm: u32,
    pub tp: u32,
    pub duration: u32,
    pub demo: String,
    pub teams: [Team; 2],
    pub players: Vec<PlayerSummary>,
}

/// Per-player record. Blocks the recording cannot populate are emitted as
/// zeros so the document keeps the full version 3 shape.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    #[serde(rename = "top-color")]
    pub top_color: u8,
    #[serde(rename = "bottom-color")]
    pub bottom_color: u8,
    pub ping: u32,
    pub login: String,
    pub name: String,
    pub team: Team,
    pub client: &'static str,
    pub player_id: String,
    pub stats: FragStats,
    pub dmg: DamageStats,
    pub xfer: i32,
    pub spree: SpreeStats,
    pub control: i32,
    pub speed: SpeedStats,
    pub weapons: BTreeMap<&'static str, WeaponStats>,
    pub items: ItemStats,
    pub ctf: CtfStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FragStats {
    pub frags: i32,
    pub deaths: i32,
    pub tk: i32,
    #[serde(rename = "spawn-frags")]
    pub spawn_frags: i32,
    pub kills: i32,
    pub suicides: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DamageStats {
    pub taken: i32,
    pub given: i32,
    pub team: i32,
    #[serde(rename = "self")]
    pub self_damage: i32,
    pub team_weapons: i32,
    pub enemy_weapons: i32,
    pub taken_to_die: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpreeStats {
    pub max: i32,
    pub quad: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpeedStats {
    pub max: f32,
    pub avg: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Accuracy {
    pub attacks: i32,
    pub hits: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeaponKills {
    pub total: i32,
    pub team: i32,
    pub enemy: i32,
    #[serde(rename = "self")]
    pub suicides: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeaponStats {
    pub acc: Accuracy,
    pub kills: WeaponKills,
    pub deaths: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Took {
    pub took: i32,
}

/// Powerup pickups; hold time is not tracked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimedTook {
    pub took: i32,
    pub time: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemStats {
    pub health_15: Took,
    pub health_25: Took,
    pub health_100: Took,
    pub ga: Took,
    pub ya: Took,
    pub ra: Took,
    pub q: TimedTook,
    pub p: TimedTook,
    pub r: Took,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CtfStats {
    pub points: i32,
    pub caps: i32,
    #[serde(rename = "carrier-frags")]
    pub carrier_frags: i32,
    /// Plain and danger carrier defends together
    #[serde(rename = "carrier-defends")]
    pub carrier_defends: i32,
    pub pickups: i32,
    pub returns: i32,
    /// Resistance, strength, haste, regeneration
    pub runes: [i32; 4],
}

impl SessionSummary {
    pub fn build(report: &SessionReport, meta: SummaryMeta) -> Self {
        Self {
            version: SUMMARY_VERSION,
            date: meta.date,
            map: report.state.map_name.clone().unwrap_or_default(),
            hostname: meta.hostname,
            ip: meta.ip,
            port: meta.port,
            mode: "ctf",
            tl: meta.timelimit,
            dm: meta.deathmatch,
            tp: meta.teamplay,
            duration: report.state.duration.max(0.0).round() as u32,
            demo: meta.demo,
            teams: [Team::Red, Team::Blue],
            players: report.roster.scoring_players().map(PlayerSummary::from_player).collect(),
        }
    }
}

impl PlayerSummary {
    pub fn from_player(player: &Player) -> Self {
        let weapons = Cause::WEAPONS
            .iter()
            .filter_map(|&cause| Some((cause.short_name()?, WeaponStats::for_cause(player, cause))))
            .collect();

        Self {
            top_color: player.top_color,
            bottom_color: player.bottom_color,
            ping: 0,
            login: String::new(),
            name: player.name.clone(),
            team: player.team,
            client: CLIENT_NAME,
            player_id: player.id.to_string(),
            stats: FragStats {
                frags: player.frags,
                deaths: player.stat(Stat::Deaths),
                tk: player.stat(Stat::TeamKills),
                spawn_frags: 0,
                kills: player.stat(Stat::Kills),
                suicides: player.stat(Stat::Suicides),
            },
            dmg: DamageStats::default(),
            xfer: 0,
            spree: SpreeStats::default(),
            control: 0,
            speed: SpeedStats::default(),
            weapons,
            items: ItemStats {
                health_15: Took::default(),
                health_25: Took::default(),
                health_100: Took::default(),
                ga: Took::default(),
                ya: Took::default(),
                ra: Took::default(),
                q: TimedTook {
                    took: player.stat(Stat::QuadPickups),
                    time: 0,
                },
                p: TimedTook {
                    took: player.stat(Stat::PentPickups),
                    time: 0,
                },
                r: Took::default(),
            },
            ctf: CtfStats {
                points: player.stat(Stat::CtfPoints),
                caps: player.stat(Stat::FlagCaptures),
                carrier_frags: player.stat(Stat::CarrierFrags),
                carrier_defends: player.stat(Stat::CarrierDefends) + player.stat(Stat::CarrierDangerDefends),
                pickups: player.stat(Stat::FlagPickups),
                returns: player.stat(Stat::FlagReturns),
                runes: [0; 4],
            },
        }
    }
}

impl WeaponStats {
    fn for_cause(player: &Player, cause: Cause) -> Self {
        let total = player.stat(Stat::KillsWith(cause));
        let team = player.stat(Stat::TeamKillsWith(cause));
        Self {
            acc: Accuracy::default(),
            kills: WeaponKills {
                total,
                team,
                enemy: total - team,
                suicides: player.stat(Stat::SuicidesBy(cause)),
            },
            deaths: player.stat(Stat::DeathsBy(cause)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Score reconciliation
// ─────────────────────────────────────────────────────────────────────────────

/// Server frag count against the total rebuilt from tracked events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreCheck {
    pub player_id: ClientId,
    pub name: String,
    pub team: Team,
    pub frags: i32,
    pub derived: i32,
}

impl ScoreCheck {
    /// Positive when the server awarded frags no tracked event explains.
    pub fn delta(&self) -> i32 {
        self.frags - self.derived
    }
}

/// One check per scoring player, highest frags first.
pub fn reconcile(roster: &Roster) -> Vec<ScoreCheck> {
    let mut checks: Vec<_> = roster
        .scoring_players()
        .map(|p| ScoreCheck {
            player_id: p.id,
            name: p.name.clone(),
            team: p.team,
            frags: p.frags,
            derived: p.derived_score(),
        })
        .collect();
    checks.sort_by(|a, b| b.frags.cmp(&a.frags));
    checks
}
