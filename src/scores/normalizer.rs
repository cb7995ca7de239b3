use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::sports::SportConfig;
use crate::models::game::NormalizedGame;

const UNKNOWN_STATUS: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Result of normalizing one provider game.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalization {
    Ready(NormalizedGame),
    Skipped { reason: &'static str },
}

/// Read-only view over a provider game payload. The provider does not keep a
/// stable shape across sports, seasons and endpoints, so every access is optional.
#[derive(Debug, Clone, Copy)]
pub struct ProviderGame<'a>(&'a Value);

impl<'a> ProviderGame<'a> {
    pub fn new(payload: &'a Value) -> Self {
        Self(payload)
    }

    /// Walks `path` through nested objects. JSON `null` counts as absent.
    pub fn lookup(&self, path: &[&str]) -> Option<&'a Value> {
        let mut current = self.0;
        for key in path {
            current = current.as_object()?.get(*key)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    pub fn team_name(&self, side: Side) -> Option<&'a str> {
        self.lookup(&["teams", side.as_str(), "name"])
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// First usable score in the order `scores.<side>.total`, `scores.<side>.score`,
    /// `scores.<side>`, `<side>_score`.
    pub fn score(&self, side: Side) -> Option<i32> {
        let side = side.as_str();
        let flat_key = format!("{}_score", side);

        self.lookup(&["scores", side, "total"]).and_then(score_value)
            .or_else(|| self.lookup(&["scores", side, "score"]).and_then(score_value))
            .or_else(|| self.lookup(&["scores", side]).and_then(score_value))
            .or_else(|| self.lookup(&[flat_key.as_str()]).and_then(score_value))
    }

    pub fn status(&self) -> Option<&'a str> {
        let candidates: [&[&str]; 3] = [&["status", "long"], &["status", "short"], &["status"]];
        candidates
            .iter()
            .find_map(|path| self.lookup(path).and_then(Value::as_str))
    }

    /// `date`, falling back to `time`. Blank strings count as absent; only
    /// the first present field is parsed.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        let raw = ["date", "time"]
            .into_iter()
            .find_map(|key| self.lookup(&[key]).filter(|value| !is_blank(value)))?;
        parse_start_time(raw)
    }

    pub fn league_name(&self) -> Option<&'a str> {
        self.lookup(&["league", "name"]).and_then(Value::as_str)
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.trim().is_empty())
}

fn score_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// Parses a provider start time. Offsets are honoured, naive date-times are
/// read as server-local, bare dates as UTC midnight and numbers as epoch millis.
pub fn parse_start_time(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(text) => parse_start_time_str(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn parse_start_time_str(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Maps one provider game onto the flat record shape. Only missing team
/// names cause a skip; every other field has a fallback.
pub fn normalize_game(sport_config: &SportConfig, payload: &Value) -> Normalization {
    let game = ProviderGame::new(payload);

    let (home_team, away_team) = match (game.team_name(Side::Home), game.team_name(Side::Away)) {
        (Some(home), Some(away)) => (home, away),
        _ => {
            return Normalization::Skipped {
                reason: "missing team names",
            }
        }
    };

    let start_time = game.start_time();
    if start_time.is_none() {
        tracing::warn!(
            "No usable start time for {} vs {}, storing without one",
            home_team,
            away_team
        );
    }

    Normalization::Ready(NormalizedGame {
        sport: sport_config.sport.as_str().to_string(),
        league: game
            .league_name()
            .unwrap_or(sport_config.default_league_name.as_str())
            .to_string(),
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_score: game.score(Side::Home).unwrap_or(0),
        away_score: game.score(Side::Away).unwrap_or(0),
        status: game.status().unwrap_or(UNKNOWN_STATUS).to_string(),
        start_time,
    })
}
