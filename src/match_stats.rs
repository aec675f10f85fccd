use std::collections::HashMap;

use crate::events::{Event, EventKind};
use crate::pitch::{in_box, in_deep_zone, in_final_third};

pub const DEFAULT_TEAM: &str = "Liverpool";

/// Raw per-player accumulators. Every stat has an under-pressure twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Shots,
    Goals,
    Xg,
    ExecutionValue,
    TouchesFinalThird,
    TouchesInBox,
    DeepTouches,
    DeepCompletions,
    KeyPassesFinalThird,
    AssistsFinalThird,
    PassesIntoBox,
    PassesIntoDeepZone,
    ProgressionsPass,
    ProgressionsCarry,
    ProgressionsPassDeep,
    ProgressionsCarryDeep,
    DribblesAttempted,
    DribblesCompleted,
    Miscontrols,
    Dispossessed,
    FoulsWon,
}

pub const STAT_COUNT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pressure {
    Any,
    Under,
}

impl Stat {
    pub const ALL: [Stat; STAT_COUNT] = [
        Stat::Shots,
        Stat::Goals,
        Stat::Xg,
        Stat::ExecutionValue,
        Stat::TouchesFinalThird,
        Stat::TouchesInBox,
        Stat::DeepTouches,
        Stat::DeepCompletions,
        Stat::KeyPassesFinalThird,
        Stat::AssistsFinalThird,
        Stat::PassesIntoBox,
        Stat::PassesIntoDeepZone,
        Stat::ProgressionsPass,
        Stat::ProgressionsCarry,
        Stat::ProgressionsPassDeep,
        Stat::ProgressionsCarryDeep,
        Stat::DribblesAttempted,
        Stat::DribblesCompleted,
        Stat::Miscontrols,
        Stat::Dispossessed,
        Stat::FoulsWon,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// xG and execution value are float sums; everything else counts events.
    pub fn is_count(self) -> bool {
        !matches!(self, Stat::Xg | Stat::ExecutionValue)
    }

    pub fn column(self, pressure: Pressure) -> &'static str {
        let (base, up) = match self {
            Stat::Shots => ("shots", "shots_up"),
            Stat::Goals => ("goals", "goals_up"),
            Stat::Xg => ("xg", "xg_up"),
            Stat::ExecutionValue => ("execution_value_sum", "execution_value_sum_up"),
            Stat::TouchesFinalThird => ("touches_final_third", "touches_final_third_up"),
            Stat::TouchesInBox => ("touches_in_box", "touches_in_box_up"),
            Stat::DeepTouches => ("deep_touches", "deep_touches_up"),
            Stat::DeepCompletions => ("deep_completions", "deep_completions_up"),
            Stat::KeyPassesFinalThird => ("key_passes_final_third", "key_passes_final_third_up"),
            Stat::AssistsFinalThird => ("assists_final_third", "assists_final_third_up"),
            Stat::PassesIntoBox => ("passes_into_box", "passes_into_box_up"),
            Stat::PassesIntoDeepZone => ("passes_into_deep_zone", "passes_into_deep_zone_up"),
            Stat::ProgressionsPass => ("deep_progressions_pass", "deep_progressions_pass_up"),
            Stat::ProgressionsCarry => ("deep_progressions_carry", "deep_progressions_carry_up"),
            Stat::ProgressionsPassDeep => (
                "deep_progressions_pass_deep",
                "deep_progressions_pass_deep_up",
            ),
            Stat::ProgressionsCarryDeep => (
                "deep_progressions_carry_deep",
                "deep_progressions_carry_deep_up",
            ),
            Stat::DribblesAttempted => ("dribbles_attempted_ft", "dribbles_attempted_ft_up"),
            Stat::DribblesCompleted => ("dribbles_completed_ft", "dribbles_completed_ft_up"),
            Stat::Miscontrols => ("miscontrols_ft", "miscontrols_ft_up"),
            Stat::Dispossessed => ("dispossessed_ft", "dispossessed_ft_up"),
            Stat::FoulsWon => ("fouls_won_ft", "fouls_won_ft_up"),
        };
        match pressure {
            Pressure::Any => base,
            Pressure::Under => up,
        }
    }
}

/// Output order of the raw columns: each thematic group lists its base
/// stats first, then the under-pressure twins.
pub const RAW_COLUMNS: [(Stat, Pressure); STAT_COUNT * 2] = {
    use Pressure::{Any, Under};
    use Stat::*;
    [
        (Shots, Any),
        (Goals, Any),
        (Xg, Any),
        (ExecutionValue, Any),
        (Shots, Under),
        (Goals, Under),
        (Xg, Under),
        (ExecutionValue, Under),
        (TouchesFinalThird, Any),
        (TouchesInBox, Any),
        (DeepTouches, Any),
        (DeepCompletions, Any),
        (TouchesFinalThird, Under),
        (TouchesInBox, Under),
        (DeepTouches, Under),
        (DeepCompletions, Under),
        (KeyPassesFinalThird, Any),
        (AssistsFinalThird, Any),
        (PassesIntoBox, Any),
        (PassesIntoDeepZone, Any),
        (KeyPassesFinalThird, Under),
        (AssistsFinalThird, Under),
        (PassesIntoBox, Under),
        (PassesIntoDeepZone, Under),
        (ProgressionsPass, Any),
        (ProgressionsCarry, Any),
        (ProgressionsPassDeep, Any),
        (ProgressionsCarryDeep, Any),
        (ProgressionsPass, Under),
        (ProgressionsCarry, Under),
        (ProgressionsPassDeep, Under),
        (ProgressionsCarryDeep, Under),
        (DribblesAttempted, Any),
        (DribblesCompleted, Any),
        (DribblesAttempted, Under),
        (DribblesCompleted, Under),
        (Miscontrols, Any),
        (Miscontrols, Under),
        (Dispossessed, Any),
        (Dispossessed, Under),
        (FoulsWon, Any),
        (FoulsWon, Under),
    ]
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatLine {
    all: [f64; STAT_COUNT],
    under_pressure: [f64; STAT_COUNT],
}

impl StatLine {
    pub fn get(&self, stat: Stat, pressure: Pressure) -> f64 {
        match pressure {
            Pressure::Any => self.all[stat.index()],
            Pressure::Under => self.under_pressure[stat.index()],
        }
    }

    pub fn total(&self, stat: Stat) -> f64 {
        self.get(stat, Pressure::Any)
    }

    /// Adds `amount` to the stat, and to its twin when the event was under pressure.
    pub fn record(&mut self, stat: Stat, under_pressure: bool, amount: f64) {
        self.all[stat.index()] += amount;
        if under_pressure {
            self.under_pressure[stat.index()] += amount;
        }
    }

    pub fn bump(&mut self, stat: Stat, under_pressure: bool) {
        self.record(stat, under_pressure, 1.0);
    }

    pub fn absorb(&mut self, other: &StatLine) {
        for (acc, v) in self.all.iter_mut().zip(other.all.iter()) {
            *acc += v;
        }
        for (acc, v) in self
            .under_pressure
            .iter_mut()
            .zip(other.under_pressure.iter())
        {
            *acc += v;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub player_id: u64,
    pub player_name: String,
    pub stats: StatLine,
}

impl PlayerStats {
    pub fn new(player_id: u64, player_name: impl Into<String>) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            stats: StatLine::default(),
        }
    }

    /// Sums `other` into `self`. The display name stays the one seen first.
    pub fn absorb(&mut self, other: &PlayerStats) {
        self.stats.absorb(&other.stats);
    }
}

pub fn reduce_match(events: &[Event], team_name: &str) -> HashMap<u64, PlayerStats> {
    let mut per_player: HashMap<u64, PlayerStats> = HashMap::new();

    for ev in events {
        if !ev.is_for_team(team_name) {
            continue;
        }
        let Some(player) = ev.player.as_ref() else {
            continue;
        };
        let entry = per_player
            .entry(player.id)
            .or_insert_with(|| PlayerStats::new(player.id, player.name.clone()));
        apply_event(&mut entry.stats, ev);
    }

    per_player
}

pub fn apply_event(line: &mut StatLine, ev: &Event) {
    let up = ev.under_pressure;
    let loc = ev.location;

    if ev.kind.is_touch() && loc.is_some() {
        if in_final_third(loc) {
            line.bump(Stat::TouchesFinalThird, up);
        }
        if in_box(loc) {
            line.bump(Stat::TouchesInBox, up);
        }
        if in_deep_zone(loc) {
            line.bump(Stat::DeepTouches, up);
        }
    }

    let (completion_end, completed) = match &ev.kind {
        EventKind::Pass(pass) => (pass.end_location, pass.completed()),
        EventKind::Carry { end_location } => (*end_location, true),
        EventKind::BallReceipt { has_outcome } => (loc, !has_outcome),
        _ => (None, false),
    };
    if completed && in_deep_zone(completion_end) {
        line.bump(Stat::DeepCompletions, up);
    }

    match &ev.kind {
        EventKind::Shot(shot) if in_final_third(loc) => {
            let goal = if shot.is_goal() { 1.0 } else { 0.0 };
            line.bump(Stat::Shots, up);
            line.record(Stat::Goals, up, goal);
            line.record(Stat::Xg, up, shot.xg);
            line.record(Stat::ExecutionValue, up, goal - shot.xg);
        }
        EventKind::Pass(pass) => {
            let start_ft = in_final_third(loc);
            let end = pass.end_location;
            let completed = pass.completed();

            if start_ft && pass.is_key_pass() {
                line.bump(Stat::KeyPassesFinalThird, up);
            }
            if start_ft && pass.goal_assist {
                line.bump(Stat::AssistsFinalThird, up);
            }
            if completed && in_box(end) {
                line.bump(Stat::PassesIntoBox, up);
            }
            if completed && in_deep_zone(end) {
                line.bump(Stat::PassesIntoDeepZone, up);
            }
            if loc.is_some() && end.is_some() && completed && !start_ft {
                if in_final_third(end) {
                    line.bump(Stat::ProgressionsPass, up);
                }
                if in_deep_zone(end) {
                    line.bump(Stat::ProgressionsPassDeep, up);
                }
            }
        }
        EventKind::Carry { end_location } => {
            let end = *end_location;
            if loc.is_some() && end.is_some() && !in_final_third(loc) {
                if in_final_third(end) {
                    line.bump(Stat::ProgressionsCarry, up);
                }
                if in_deep_zone(end) {
                    line.bump(Stat::ProgressionsCarryDeep, up);
                }
            }
        }
        EventKind::Dribble { outcome } if in_final_third(loc) => {
            line.bump(Stat::DribblesAttempted, up);
            if outcome.as_deref() == Some("Complete") {
                line.bump(Stat::DribblesCompleted, up);
            }
        }
        EventKind::Miscontrol if in_final_third(loc) => line.bump(Stat::Miscontrols, up),
        EventKind::Dispossessed if in_final_third(loc) => line.bump(Stat::Dispossessed, up),
        EventKind::FoulWon if in_final_third(loc) => line.bump(Stat::FoulsWon, up),
        _ => {}
    }
}
