use fragstats_types::ScoringSettings;
use serde::Serialize;

use crate::catalog::{Cause, EventKind};
use crate::ledger::Ledger;
use crate::matcher::Match;
use crate::roster::{ClientId, Player, Roster, Stat};

/// Current quad kill-credit owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadHolder {
    pub owner: ClientId,
    /// Game time ownership was granted
    pub since: f32,
}

/// Session-wide scoring state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoringState {
    /// Current game time
    pub time: f32,
    /// Latest game time seen at an intermission or finale
    pub duration: f32,
    pub map_name: Option<String>,
    pub quad: Option<QuadHolder>,
}

impl ScoringState {
    pub fn quad_owner(&self) -> Option<ClientId> {
        self.quad.map(|q| q.owner)
    }

    fn clear_quad(&mut self, reason: &'static str) {
        if let Some(holder) = self.quad.take() {
            tracing::debug!(owner = holder.owner, since = holder.since, time = self.time, reason, "Quad cleared");
        }
    }
}

/// Applies matched notifications to the roster and ledgers.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    settings: ScoringSettings,
    state: ScoringState,
}

impl ScoringEngine {
    pub fn new(settings: ScoringSettings) -> Self {
        Self {
            settings,
            state: ScoringState::default(),
        }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    pub fn state(&self) -> &ScoringState {
        &self.state
    }

    pub fn into_state(self) -> ScoringState {
        self.state
    }

    // ─── Clock and session metadata ────────────────────────────────────────

    pub fn set_time(&mut self, time: f32) {
        self.state.time = time;
    }

    /// Phase change: extend the session duration to the current time.
    pub fn mark_phase_end(&mut self) {
        self.state.duration = self.state.duration.max(self.state.time);
    }

    pub fn set_map_name(&mut self, map_name: impl Into<String>) {
        self.state.map_name = Some(map_name.into());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply one matched notification.
    pub fn apply(&mut self, event: &Match, roster: &mut Roster, ledger: &mut Ledger) {
        let Some(first) = event.first() else {
            tracing::warn!(kind = event.kind.name(), "Match without players");
            return;
        };

        match event.kind {
            EventKind::PlayerDeath { cause } => self.player_death(first, cause, roster, ledger),
            EventKind::PlayerSuicide { cause } => self.player_suicide(first, cause, roster, ledger),
            EventKind::Fragged { cause, quad } => {
                let Some(killer) = event.second() else {
                    tracing::warn!(victim = first, "Frag without killer");
                    return;
                };
                self.fragged(first, killer, cause, quad, roster, ledger);
            }
            EventKind::FlagTouch => self.flag_touch(first, roster, ledger),
            EventKind::FlagDrop => {
                self.with_player(roster, first, |p| {
                    p.stats.increment(Stat::FlagDrops);
                    p.carrying_since = None;
                });
            }
            EventKind::FlagCapture => self.flag_capture(first, roster, ledger),
            EventKind::FlagReturnAssist => {
                let bonus = self.settings.return_assist_bonus;
                self.award(roster, first, Stat::ReturnAssists, bonus);
            }
            EventKind::FlagFragAssist => {
                let bonus = self.settings.carrier_frag_bonus;
                self.award(roster, first, Stat::CarrierFrags, bonus);
            }
            EventKind::FlagReturn => {
                let bonus = self.settings.flag_return_bonus;
                self.award(roster, first, Stat::FlagReturns, bonus);
            }
            EventKind::FlagDefend => {
                let bonus = self.settings.flag_defend_bonus;
                self.award(roster, first, Stat::FlagDefends, bonus);
            }
            EventKind::CarrierDefend => {
                let bonus = self.settings.carrier_defend_bonus;
                self.award(roster, first, Stat::CarrierDefends, bonus);
            }
            EventKind::CarrierDangerDefend => {
                let bonus = self.settings.carrier_danger_defend_bonus;
                self.award(roster, first, Stat::CarrierDangerDefends, bonus);
            }
        }
    }

    // ─── Obituaries ─────────────────────────────────────────────────────────

    fn player_death(&mut self, id: ClientId, cause: Option<Cause>, roster: &mut Roster, ledger: &mut Ledger) {
        let Some(player) = roster.get_mut(id) else {
            tracing::warn!(id, "Death for unknown player");
            return;
        };
        player.stats.increment(Stat::Deaths);
        player.stats.increment(Stat::DeathsBy(bucket(cause)));
        ledger.log_frags(self.state.time, player, false);

        if self.state.quad_owner() == Some(id) {
            self.state.clear_quad("owner died");
        }
    }

    fn player_suicide(&mut self, id: ClientId, cause: Option<Cause>, roster: &mut Roster, ledger: &mut Ledger) {
        let Some(player) = roster.get_mut(id) else {
            tracing::warn!(id, "Suicide for unknown player");
            return;
        };
        let cause = bucket(cause);
        player.stats.increment(Stat::Deaths);
        player.stats.increment(Stat::DeathsBy(cause));
        player.stats.increment(Stat::Suicides);
        player.stats.increment(Stat::SuicidesBy(cause));
        ledger.log_frags(self.state.time, player, true);

        if self.state.quad_owner() == Some(id) {
            self.state.clear_quad("owner suicided");
        }
    }

    fn fragged(
        &mut self,
        victim: ClientId,
        killer: ClientId,
        cause: Option<Cause>,
        quad: bool,
        roster: &mut Roster,
        ledger: &mut Ledger,
    ) {
        let now = self.state.time;
        let bucketed = bucket(cause);

        let Some(v) = roster.get_mut(victim) else {
            tracing::warn!(victim, "Frag for unknown victim");
            return;
        };
        v.stats.increment(Stat::Deaths);
        v.stats.increment(Stat::DeathsBy(bucketed));
        ledger.log_frags(now, v, false);
        let victim_team = v.team;
        let carried_since = v.carrying_since;

        let Some(k) = roster.get_mut(killer) else {
            tracing::warn!(killer, "Frag for unknown killer");
            return;
        };
        k.stats.increment(Stat::Kills);
        k.stats.increment(Stat::KillsWith(bucketed));
        if victim_team.is_teammate(k.team) {
            k.stats.increment(Stat::TeamKills);
            k.stats.increment(Stat::TeamKillsWith(bucketed));
        }

        // Quad ownership transitions
        let killer_holds = self.state.quad_owner() == Some(killer);
        if quad && !killer_holds {
            if let Some(previous) = self.state.quad_owner() {
                tracing::debug!(previous, owner = killer, time = now, "Quad changed hands");
            }
            self.state.quad = Some(QuadHolder {
                owner: killer,
                since: now,
            });
            k.stats.increment(Stat::QuadPickups);
            ledger.log_items(now, k);
        } else if !quad && killer_holds && cause.is_some_and(|c| c.is_high_tier()) {
            self.state.clear_quad("owner fragged without quad");
        }

        if self.state.quad_owner() == Some(victim) {
            self.state.clear_quad("owner fragged");
        }

        if let Some(holder) = self.state.quad
            && now > holder.since + self.settings.quad_duration
        {
            self.state.clear_quad("expired");
        }

        // Carrier frag bonus
        if let Some(since) = carried_since {
            let carried = now - since;
            tracing::debug!(victim, carried, "Carrier fragged");
            if carried > self.settings.carrier_frag_timeout {
                k.stats.add(Stat::CtfPoints, self.settings.carrier_frag_bonus);
            }
        }
    }

    // ─── Flag alerts ────────────────────────────────────────────────────────

    fn flag_touch(&mut self, id: ClientId, roster: &mut Roster, ledger: &mut Ledger) {
        let now = self.state.time;
        let Some(player) = roster.get_mut(id) else {
            tracing::warn!(id, "Flag touch for unknown player");
            return;
        };
        player.stats.increment(Stat::FlagPickups);
        player.carrying_since = Some(now);
        ledger.log_items(now, player);
    }

    fn flag_capture(&mut self, id: ClientId, roster: &mut Roster, ledger: &mut Ledger) {
        let now = self.state.time;
        let Some(capturer) = roster.get_mut(id) else {
            tracing::warn!(id, "Capture for unknown player");
            return;
        };
        capturer.stats.increment(Stat::FlagCaptures);
        capturer.carrying_since = None;
        capturer.stats.add(Stat::CtfPoints, self.settings.capture_carrier_bonus);
        ledger.log_items(now, capturer);
        let team = capturer.team;

        let mut rewarded = 0usize;
        for teammate in roster
            .iter_mut()
            .filter(|p| p.id != id && p.team.is_teammate(team))
        {
            teammate.stats.add(Stat::CtfPoints, self.settings.capture_team_bonus);
            rewarded += 1;
        }
        tracing::debug!(capturer = id, %team, rewarded, time = now, "Flag captured");
    }

    /// Count the event and add `bonus` to the player's points.
    fn award(&self, roster: &mut Roster, id: ClientId, stat: Stat, bonus: i32) {
        self.with_player(roster, id, |p| {
            p.stats.increment(stat);
            p.stats.add(Stat::CtfPoints, bonus);
        });
    }

    fn with_player(&self, roster: &mut Roster, id: ClientId, f: impl FnOnce(&mut Player)) {
        match roster.get_mut(id) {
            Some(player) => f(player),
            None => tracing::warn!(id, "Flag alert for unknown player"),
        }
    }
}

/// Per-cause counters need a key even for cause-less definitions.
fn bucket(cause: Option<Cause>) -> Cause {
    cause.unwrap_or(Cause::Unspecified)
}
