use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::NamedRef;
use crate::score::{ScoreError, ScoreSheet};

/// One side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// The recorded score of a single game (set) within a match.
///
/// Game numbers are 1-based and dense: the n-th recorded game always has
/// number n.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub number: u8,
    pub home: u16,
    pub away: u16,
}

impl GameScore {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            home: 0,
            away: 0,
        }
    }

    pub fn score(&self, side: Side) -> u16 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn set_score(&mut self, side: Side, value: u16) {
        match side {
            Side::Home => self.home = value,
            Side::Away => self.away = value,
        }
    }

    /// Whether either side has scored in this game.
    pub fn has_points(&self) -> bool {
        self.home > 0 || self.away > 0
    }
}

/// Match format: the maximum number of games played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BestOf {
    One,
    Three,
    Five,
    Seven,
}

impl BestOf {
    /// Maximum number of games in this format.
    pub fn max_games(self) -> u8 {
        match self {
            BestOf::One => 1,
            BestOf::Three => 3,
            BestOf::Five => 5,
            BestOf::Seven => 7,
        }
    }

    /// Games a side must win to decide the match: ceil(n / 2).
    pub fn games_to_win(self) -> u8 {
        self.max_games() / 2 + 1
    }

    /// Path segment used by the format-specific score endpoint.
    pub(crate) fn route_segment(self) -> String {
        format!("best-of-{}", self.max_games())
    }
}

impl TryFrom<u8> for BestOf {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BestOf::One),
            3 => Ok(BestOf::Three),
            5 => Ok(BestOf::Five),
            7 => Ok(BestOf::Seven),
            other => Err(format!("invalid best-of value: {other}")),
        }
    }
}

impl From<BestOf> for u8 {
    fn from(value: BestOf) -> Self {
        value.max_games()
    }
}

/// Lifecycle status of a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
}

/// Summary information for a single match as shown in filtered lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: u32,
    pub home_team: NamedRef,
    pub away_team: NamedRef,
    pub status: MatchStatus,
    pub best_of: BestOf,
    #[serde(default)]
    pub games: Vec<GameScore>,
    pub round: String,
    pub venue: Option<NamedRef>,
    pub referee: Option<NamedRef>,
    pub scheduled_at: Option<NaiveDateTime>,
}

/// Full details of a single match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u32,
    pub tournament: NamedRef,
    pub category: String,
    pub round: String,
    pub home_team: NamedRef,
    pub away_team: NamedRef,
    pub best_of: BestOf,
    #[serde(default)]
    pub games: Vec<GameScore>,
    pub completed: bool,
    pub venue: Option<NamedRef>,
    pub referee: Option<NamedRef>,
    pub scheduled_at: Option<NaiveDateTime>,
}

impl Match {
    /// Open the recorded games for editing.
    ///
    /// Fails if the stored games violate the format (more games than
    /// `bestOf` allows, or non-dense numbering).
    pub fn score_sheet(&self) -> Result<ScoreSheet, ScoreError> {
        ScoreSheet::from_games(self.best_of, self.games.clone())
    }
}

/// Payload for creating a match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDraft {
    pub tournament_id: u32,
    pub category: String,
    pub round: String,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub best_of: BestOf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<NaiveDateTime>,
}

/// Payload pushed to the live-score endpoint on every debounced flush.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveScoreUpdate {
    pub match_id: u32,
    pub games: Vec<GameScore>,
}

/// Aggregate result of a bulk referee assignment.
///
/// Partial failures are reported as a count only, never per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkAssignOutcome {
    pub assigned: usize,
    pub failed: usize,
}

impl BulkAssignOutcome {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_of_thresholds() {
        assert_eq!(BestOf::One.games_to_win(), 1);
        assert_eq!(BestOf::Three.games_to_win(), 2);
        assert_eq!(BestOf::Five.games_to_win(), 3);
        assert_eq!(BestOf::Seven.games_to_win(), 4);
    }

    #[test]
    fn best_of_rejects_even_values() {
        assert!(BestOf::try_from(0).is_err());
        assert!(BestOf::try_from(2).is_err());
        assert!(BestOf::try_from(9).is_err());
        assert_eq!(BestOf::try_from(5).unwrap(), BestOf::Five);
    }

    #[test]
    fn best_of_round_trips_as_integer() {
        let json = serde_json::to_string(&BestOf::Three).unwrap();
        assert_eq!(json, "3");
        let parsed: BestOf = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, BestOf::Three);
    }

    #[test]
    fn match_deserializes_camel_case() {
        let json = r#"{
            "id": 311,
            "tournament": {"id": 4, "name": "Spring Cup"},
            "category": "U18",
            "round": "semi-final",
            "homeTeam": {"id": 7, "name": "Falcons"},
            "awayTeam": {"id": 9, "name": "Harriers"},
            "bestOf": 3,
            "games": [{"number": 1, "home": 21, "away": 18}],
            "completed": false,
            "venue": null,
            "referee": null,
            "scheduledAt": "2026-05-02T14:30:00"
        }"#;
        let m: Match = serde_json::from_str(json).unwrap();
        assert_eq!(m.best_of, BestOf::Three);
        assert_eq!(m.games.len(), 1);
        assert_eq!(m.games[0].score(Side::Home), 21);
        assert!(m.scheduled_at.is_some());
    }
}
