use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored game, one per (sport, home team, away team) matchup.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub sport: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: i32,
    pub away_score: i32,
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
}

impl GameRecord {
    pub fn matches_key(&self, sport: &str, home_team: &str, away_team: &str) -> bool {
        self.sport == sport && self.home_team == home_team && self.away_team == away_team
    }
}

/// Flattened provider game, ready to be written over whatever the store holds
/// for the same matchup.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGame {
    pub sport: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: i32,
    pub away_score: i32,
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
}

impl NormalizedGame {
    pub fn into_record(self, id: Uuid, last_updated: DateTime<Utc>) -> GameRecord {
        GameRecord {
            id,
            sport: self.sport,
            league: self.league,
            home_team: self.home_team,
            away_team: self.away_team,
            home_score: self.home_score,
            away_score: self.away_score,
            status: self.status,
            start_time: self.start_time,
            last_updated,
        }
    }
}

// Query values stay strings so malformed filters are dropped instead of rejected.
#[derive(Debug, Deserialize, Default)]
pub struct ScoresByDateQuery {
    pub sport: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GamesQuery {
    pub sport: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateScoresRequest {
    #[serde(default)]
    pub date: Option<String>,
}
