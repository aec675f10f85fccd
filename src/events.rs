use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::pitch::PitchPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotDetail {
    pub xg: f64,
    pub outcome: Option<String>,
}

impl ShotDetail {
    pub fn is_goal(&self) -> bool {
        self.outcome.as_deref() == Some("Goal")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassDetail {
    pub end_location: Option<PitchPoint>,
    /// StatsBomb only sets an outcome on unsuccessful passes.
    pub has_outcome: bool,
    pub shot_assist: bool,
    pub goal_assist: bool,
    pub assisted_shot_id: Option<String>,
}

impl PassDetail {
    pub fn completed(&self) -> bool {
        !self.has_outcome
    }

    pub fn is_key_pass(&self) -> bool {
        self.shot_assist || self.assisted_shot_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Shot(ShotDetail),
    Pass(PassDetail),
    Carry { end_location: Option<PitchPoint> },
    BallReceipt { has_outcome: bool },
    Dribble { outcome: Option<String> },
    Miscontrol,
    Dispossessed,
    FoulWon,
    Other(String),
}

impl EventKind {
    /// Event types that count as a touch of the ball.
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            EventKind::Shot(_)
                | EventKind::Pass(_)
                | EventKind::Carry { .. }
                | EventKind::BallReceipt { .. }
                | EventKind::Dribble { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub team: Option<String>,
    pub location: Option<PitchPoint>,
    pub under_pressure: bool,
    pub player: Option<PlayerRef>,
    pub kind: EventKind,
}

impl Event {
    pub fn is_for_team(&self, team_name: &str) -> bool {
        self.team.as_deref() == Some(team_name)
    }
}

/// Parses one match file. Accepts the open-data layout (a JSON array) and the
/// flattened export layout (an object keyed by row index).
pub fn parse_match_events_json(raw: &str) -> Result<Vec<Event>> {
    let root: Value = serde_json::from_str(raw.trim()).context("invalid match events json")?;
    match root {
        Value::Array(items) => Ok(items.iter().map(parse_event).collect()),
        Value::Object(map) => {
            // map keys come back string-sorted ("10" < "2"); restore row order
            let mut rows = map.iter().collect::<Vec<_>>();
            rows.sort_by(|(a, _), (b, _)| row_key(a).cmp(&row_key(b)));
            Ok(rows.into_iter().map(|(_, ev)| parse_event(ev)).collect())
        }
        other => Err(anyhow!(
            "match events must be an array or object, got {}",
            json_kind(&other)
        )),
    }
}

pub fn parse_event(value: &Value) -> Event {
    let kind_name = value
        .get("type")
        .and_then(|t| t.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    Event {
        team: value
            .get("team")
            .and_then(|t| t.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        location: parse_point(value.get("location")),
        under_pressure: value
            .get("under_pressure")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        player: parse_player(value.get("player")),
        kind: parse_kind(kind_name, value),
    }
}

fn parse_kind(name: &str, value: &Value) -> EventKind {
    match name {
        "Shot" => {
            let shot = value.get("shot").unwrap_or(&Value::Null);
            EventKind::Shot(ShotDetail {
                xg: shot.get("statsbomb_xg").and_then(as_f64).unwrap_or(0.0),
                outcome: outcome_name(shot),
            })
        }
        "Pass" => {
            let pass = value.get("pass").unwrap_or(&Value::Null);
            EventKind::Pass(PassDetail {
                end_location: parse_point(pass.get("end_location")),
                has_outcome: is_present(pass.get("outcome")),
                shot_assist: pass.get("shot_assist").is_some_and(truthy),
                goal_assist: pass.get("goal_assist").is_some_and(truthy),
                assisted_shot_id: pass
                    .get("assisted_shot_id")
                    .filter(|v| !v.is_null())
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    }),
            })
        }
        "Carry" => EventKind::Carry {
            end_location: parse_point(value.get("carry").and_then(|c| c.get("end_location"))),
        },
        "Ball Receipt*" => EventKind::BallReceipt {
            has_outcome: is_present(value.get("ball_receipt").and_then(|b| b.get("outcome"))),
        },
        "Dribble" => EventKind::Dribble {
            outcome: value.get("dribble").and_then(outcome_name),
        },
        "Miscontrol" => EventKind::Miscontrol,
        "Dispossessed" => EventKind::Dispossessed,
        "Foul Won" => EventKind::FoulWon,
        other => EventKind::Other(other.to_string()),
    }
}

/// Numeric row keys first, in numeric order; anything else after, by name.
fn row_key(key: &str) -> (bool, u64, &str) {
    match key.trim().parse::<u64>() {
        Ok(idx) => (false, idx, key),
        Err(_) => (true, 0, key),
    }
}

fn parse_player(value: Option<&Value>) -> Option<PlayerRef> {
    let player = value?;
    let id = match player.get("id")? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    let name = player
        .get("name")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    Some(PlayerRef { id, name })
}

fn parse_point(value: Option<&Value>) -> Option<PitchPoint> {
    let coords = value?.as_array()?;
    let x = coords.first().and_then(as_f64)?;
    let y = coords.get(1).and_then(as_f64)?;
    Some(PitchPoint::new(x, y))
}

fn outcome_name(value: &Value) -> Option<String> {
    value
        .get("outcome")
        .and_then(|o| o.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn is_present(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

fn as_f64(value: &Value) -> Option<f64> {
    let num = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    num.is_finite().then_some(num)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
