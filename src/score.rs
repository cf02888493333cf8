//! Score-sheet editing for best-of-N matches.
//!
//! A [`ScoreSheet`] is the editable, in-memory form of a match's recorded
//! games. It enforces the format invariants (never more than `bestOf` games,
//! dense 1-based game numbers, no adding games once the match is decided)
//! and collects the validation issues that block submission.

use itertools::Itertools;

use crate::model::{BestOf, GameScore, Side};

/// A rejected score-sheet mutation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// One side has already won enough games; no further games may be added.
    #[error("match is already decided")]
    MatchDecided,

    /// The sheet already holds `bestOf` games.
    #[error("all games of the format have been recorded")]
    SheetFull,

    /// The last remaining game cannot be removed.
    #[error("a match must keep at least one game")]
    LastGame,

    /// No game with the given number exists on the sheet.
    #[error("no game numbered {0}")]
    UnknownGame(u8),

    /// A stored game list does not fit its format.
    #[error("stored games do not fit a best-of-{} match", .0.max_games())]
    MalformedGames(BestOf),
}

/// A single problem that blocks submitting a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A game finished with equal non-zero scores.
    TiedGame { game_number: u8 },
    /// No game on the sheet has any points recorded.
    NoScores,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::TiedGame { game_number } => {
                write!(f, "game {game_number} ends in a tie")
            }
            ValidationIssue::NoScores => write!(f, "no scores have been entered"),
        }
    }
}

/// The full list of issues found by [`ScoreSheet::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid score sheet: {}", .issues.iter().join("; "))]
pub struct ScoreValidation {
    pub issues: Vec<ValidationIssue>,
}

/// Editable per-game scores for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    best_of: BestOf,
    games: Vec<GameScore>,
}

impl ScoreSheet {
    /// Start a fresh sheet with a single 0-0 game.
    pub fn new(best_of: BestOf) -> Self {
        Self {
            best_of,
            games: vec![GameScore::new(1)],
        }
    }

    /// Open a sheet over previously recorded games.
    ///
    /// An empty list behaves like [`ScoreSheet::new`]. Fails if the list is
    /// longer than the format allows or the game numbers are not a dense
    /// 1-based sequence.
    pub fn from_games(best_of: BestOf, games: Vec<GameScore>) -> Result<Self, ScoreError> {
        if games.is_empty() {
            return Ok(Self::new(best_of));
        }
        if games.len() > best_of.max_games() as usize {
            return Err(ScoreError::MalformedGames(best_of));
        }
        let dense = games
            .iter()
            .enumerate()
            .all(|(i, game)| game.number as usize == i + 1);
        if !dense {
            return Err(ScoreError::MalformedGames(best_of));
        }
        Ok(Self { best_of, games })
    }

    pub fn best_of(&self) -> BestOf {
        self.best_of
    }

    pub fn games(&self) -> &[GameScore] {
        &self.games
    }

    pub fn into_games(self) -> Vec<GameScore> {
        self.games
    }

    /// Set one side's score in a game. Negative input is clamped to zero;
    /// an unknown game number is a no-op.
    pub fn update_score(&mut self, game_number: u8, side: Side, value: i32) {
        let value = value.max(0).min(u16::MAX as i32) as u16;
        if let Some(game) = self
            .games
            .iter_mut()
            .find(|game| game.number == game_number)
        {
            game.set_score(side, value);
        }
    }

    /// Append the next game, returning its number.
    pub fn add_game(&mut self) -> Result<u8, ScoreError> {
        if self.decided() {
            return Err(ScoreError::MatchDecided);
        }
        if self.games.len() >= self.best_of.max_games() as usize {
            return Err(ScoreError::SheetFull);
        }
        let number = self.games.len() as u8 + 1;
        self.games.push(GameScore::new(number));
        Ok(number)
    }

    /// Remove a game. The survivors are renumbered to stay dense.
    pub fn remove_game(&mut self, game_number: u8) -> Result<(), ScoreError> {
        if self.games.len() == 1 {
            return Err(ScoreError::LastGame);
        }
        let index = self
            .games
            .iter()
            .position(|game| game.number == game_number)
            .ok_or(ScoreError::UnknownGame(game_number))?;
        self.games.remove(index);
        for (i, game) in self.games.iter_mut().enumerate() {
            game.number = i as u8 + 1;
        }
        Ok(())
    }

    /// Games won by a side: games where its score is strictly greater.
    pub fn wins(&self, side: Side) -> u8 {
        self.games
            .iter()
            .filter(|game| game.score(side) > game.score(side.opponent()))
            .count() as u8
    }

    /// Whether either side has reached the win threshold.
    pub fn decided(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        let needed = self.best_of.games_to_win();
        if self.wins(Side::Home) >= needed {
            Some(Side::Home)
        } else if self.wins(Side::Away) >= needed {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Whether [`ScoreSheet::add_game`] would currently succeed.
    pub fn can_add_game(&self) -> bool {
        !self.decided() && self.games.len() < self.best_of.max_games() as usize
    }

    /// Collect everything that blocks submission: one issue per tied game
    /// (equal non-zero scores), plus a single issue when no game has any
    /// points at all.
    pub fn validate(&self) -> Result<(), ScoreValidation> {
        let mut issues: Vec<ValidationIssue> = self
            .games
            .iter()
            .filter(|game| game.home == game.away && game.home > 0)
            .map(|game| ValidationIssue::TiedGame {
                game_number: game.number,
            })
            .collect();
        if !self.games.iter().any(GameScore::has_points) {
            issues.push(ValidationIssue::NoScores);
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ScoreValidation { issues })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with(best_of: BestOf, scores: &[(u16, u16)]) -> ScoreSheet {
        let games = scores
            .iter()
            .enumerate()
            .map(|(i, &(home, away))| GameScore {
                number: i as u8 + 1,
                home,
                away,
            })
            .collect();
        ScoreSheet::from_games(best_of, games).unwrap()
    }

    #[test]
    fn starts_with_one_blank_game() {
        let sheet = ScoreSheet::new(BestOf::Five);
        assert_eq!(sheet.games().len(), 1);
        assert_eq!(sheet.games()[0], GameScore::new(1));
    }

    #[test]
    fn update_clamps_negative_to_zero() {
        let mut sheet = ScoreSheet::new(BestOf::Three);
        sheet.update_score(1, Side::Home, -5);
        assert_eq!(sheet.games()[0].home, 0);
        sheet.update_score(1, Side::Away, 23);
        assert_eq!(sheet.games()[0].away, 23);
    }

    #[test]
    fn update_unknown_game_is_noop() {
        let mut sheet = ScoreSheet::new(BestOf::Three);
        sheet.update_score(4, Side::Home, 10);
        assert_eq!(sheet.games().len(), 1);
        assert_eq!(sheet.games()[0].home, 0);
    }

    #[test]
    fn game_count_never_exceeds_best_of() {
        for best_of in [BestOf::One, BestOf::Three, BestOf::Five, BestOf::Seven] {
            let mut sheet = ScoreSheet::new(best_of);
            // All games stay 0-0 so the match never decides; only the
            // format cap can stop us.
            for _ in 0..10 {
                let _ = sheet.add_game();
            }
            assert_eq!(sheet.games().len(), best_of.max_games() as usize);
            assert_eq!(sheet.add_game(), Err(ScoreError::SheetFull));
        }
    }

    #[test]
    fn add_game_unavailable_exactly_at_win_threshold() {
        for best_of in [BestOf::Three, BestOf::Five, BestOf::Seven] {
            let needed = best_of.games_to_win();
            let mut sheet = ScoreSheet::new(best_of);
            for win in 1..=needed {
                sheet.update_score(win, Side::Home, 25);
                sheet.update_score(win, Side::Away, 20);
                if win < needed {
                    assert!(sheet.can_add_game(), "one win short must allow another game");
                    sheet.add_game().unwrap();
                }
            }
            assert!(sheet.decided());
            assert_eq!(sheet.winner(), Some(Side::Home));
            assert_eq!(sheet.add_game(), Err(ScoreError::MatchDecided));
        }
    }

    #[test]
    fn best_of_three_worked_example() {
        let mut sheet = sheet_with(BestOf::Three, &[(21, 18), (19, 21)]);
        assert_eq!(sheet.wins(Side::Home), 1);
        assert_eq!(sheet.wins(Side::Away), 1);
        assert!(sheet.can_add_game());

        let number = sheet.add_game().unwrap();
        assert_eq!(number, 3);
        sheet.update_score(3, Side::Home, 21);
        sheet.update_score(3, Side::Away, 15);

        assert_eq!(sheet.wins(Side::Home), 2);
        assert!(sheet.decided());
        assert_eq!(sheet.winner(), Some(Side::Home));
        assert_eq!(sheet.add_game(), Err(ScoreError::MatchDecided));
    }

    #[test]
    fn remove_keeps_numbers_dense_and_last_game_stays() {
        let mut sheet = sheet_with(BestOf::Five, &[(25, 20), (20, 25), (25, 23)]);
        sheet.remove_game(2).unwrap();
        let numbers: Vec<u8> = sheet.games().iter().map(|g| g.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(sheet.games()[1].home, 25);
        assert_eq!(sheet.games()[1].away, 23);

        assert_eq!(sheet.remove_game(9), Err(ScoreError::UnknownGame(9)));
        sheet.remove_game(2).unwrap();
        assert_eq!(sheet.remove_game(1), Err(ScoreError::LastGame));
    }

    #[test]
    fn validate_reports_every_tied_game() {
        let sheet = sheet_with(BestOf::Five, &[(21, 21), (25, 23), (19, 19)]);
        let err = sheet.validate().unwrap_err();
        assert_eq!(
            err.issues,
            vec![
                ValidationIssue::TiedGame { game_number: 1 },
                ValidationIssue::TiedGame { game_number: 3 },
            ]
        );
    }

    #[test]
    fn validate_rejects_sheet_with_no_points() {
        let sheet = ScoreSheet::new(BestOf::Three);
        let err = sheet.validate().unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::NoScores]);
    }

    #[test]
    fn zero_zero_is_not_a_tie_issue() {
        let sheet = sheet_with(BestOf::Three, &[(0, 0), (25, 20)]);
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn from_games_rejects_overflow_and_gaps() {
        let too_many: Vec<GameScore> = (1..=4).map(GameScore::new).collect();
        assert_eq!(
            ScoreSheet::from_games(BestOf::Three, too_many),
            Err(ScoreError::MalformedGames(BestOf::Three))
        );

        let gapped = vec![GameScore::new(1), GameScore::new(3)];
        assert_eq!(
            ScoreSheet::from_games(BestOf::Five, gapped),
            Err(ScoreError::MalformedGames(BestOf::Five))
        );
    }
}
