//! Debounced live-score transmission.
//!
//! A [`LiveScoreSession`] wraps a [`ScoreSheet`] for one match: every
//! accepted mutation (re)schedules a debounced push of the full game list to
//! the live-score endpoint. An authorization failure is terminal for the
//! session — scores revert to the last acknowledged snapshot and all further
//! input is rejected until a new session is opened. Any other transmission
//! failure is transient: local edits stand, and the next edit's flush is the
//! retry.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::error::RefdeskError;
use crate::model::{GameScore, LiveScoreUpdate, Side};
use crate::score::{ScoreError, ScoreSheet};

/// Quiet period between the last edit and the push.
pub const LIVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where live-score updates are sent.
///
/// Implemented by [`crate::RefdeskClient`]; tests substitute an in-memory
/// transport.
#[async_trait]
pub trait LiveScoreTransport: Send + Sync {
    async fn send_live_score(&self, update: LiveScoreUpdate) -> Result<(), RefdeskError>;
}

/// Lifecycle of a live-scoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No point recorded yet; nothing has been transmitted.
    Idle,
    /// Edits exist; a flush is pending or has completed.
    Editing,
    /// A push is in flight.
    Transmitting,
    /// Terminal: the endpoint rejected the session's credentials.
    Unauthorized,
}

/// A rejected mutation on a live session.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveError {
    /// The session froze after an authorization failure.
    #[error("live session is frozen after an authorization failure")]
    SessionFrozen,

    #[error(transparent)]
    Score(#[from] ScoreError),
}

struct SessionState {
    match_id: u32,
    sheet: ScoreSheet,
    /// Last game list the endpoint acknowledged (or the pre-edit scores).
    snapshot: Vec<GameScore>,
    phase: SessionPhase,
    transient_error: Option<String>,
}

/// Live-score entry for a single match.
pub struct LiveScoreSession {
    state: Arc<Mutex<SessionState>>,
    transport: Arc<dyn LiveScoreTransport>,
    debouncer: Debouncer,
}

impl LiveScoreSession {
    pub fn new(transport: Arc<dyn LiveScoreTransport>, match_id: u32, sheet: ScoreSheet) -> Self {
        Self::with_debounce(transport, match_id, sheet, LIVE_DEBOUNCE)
    }

    pub fn with_debounce(
        transport: Arc<dyn LiveScoreTransport>,
        match_id: u32,
        sheet: ScoreSheet,
        debounce: Duration,
    ) -> Self {
        let snapshot = sheet.games().to_vec();
        Self {
            state: Arc::new(Mutex::new(SessionState {
                match_id,
                sheet,
                snapshot,
                phase: SessionPhase::Idle,
                transient_error: None,
            })),
            transport,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Set one side's score in a game and schedule a push.
    ///
    /// Edits that change nothing (unknown game number, same value) do not
    /// start a transmission.
    pub fn record_score(
        &mut self,
        game_number: u8,
        side: Side,
        value: i32,
    ) -> Result<(), LiveError> {
        let changed = {
            let mut state = self.lock();
            if state.phase == SessionPhase::Unauthorized {
                return Err(LiveError::SessionFrozen);
            }
            let before = state.sheet.games().to_vec();
            state.sheet.update_score(game_number, side, value);
            let changed = state.sheet.games() != before.as_slice();
            if changed && state.phase == SessionPhase::Idle {
                state.phase = SessionPhase::Editing;
            }
            changed
        };
        if changed {
            self.schedule_flush();
        }
        Ok(())
    }

    /// Append the next game and schedule a push.
    pub fn add_game(&mut self) -> Result<u8, LiveError> {
        let number = {
            let mut state = self.lock();
            if state.phase == SessionPhase::Unauthorized {
                return Err(LiveError::SessionFrozen);
            }
            let number = state.sheet.add_game()?;
            if state.phase == SessionPhase::Idle {
                state.phase = SessionPhase::Editing;
            }
            number
        };
        self.schedule_flush();
        Ok(number)
    }

    /// Remove a game and schedule a push.
    pub fn remove_game(&mut self, game_number: u8) -> Result<(), LiveError> {
        {
            let mut state = self.lock();
            if state.phase == SessionPhase::Unauthorized {
                return Err(LiveError::SessionFrozen);
            }
            state.sheet.remove_game(game_number)?;
            if state.phase == SessionPhase::Idle {
                state.phase = SessionPhase::Editing;
            }
        }
        self.schedule_flush();
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase
    }

    /// Whether input is disabled after an authorization failure.
    pub fn is_frozen(&self) -> bool {
        self.phase() == SessionPhase::Unauthorized
    }

    /// The currently displayed games.
    pub fn games(&self) -> Vec<GameScore> {
        self.lock().sheet.games().to_vec()
    }

    /// The message of the last transient transmission failure, cleared by
    /// the next successful push.
    pub fn transient_error(&self) -> Option<String> {
        self.lock().transient_error.clone()
    }

    fn schedule_flush(&mut self) {
        let state = Arc::clone(&self.state);
        let transport = Arc::clone(&self.transport);
        self.debouncer.schedule(flush(state, transport));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn flush(state: Arc<Mutex<SessionState>>, transport: Arc<dyn LiveScoreTransport>) {
    let update = {
        let mut state = state.lock().unwrap_or_else(|p| p.into_inner());
        if state.phase == SessionPhase::Unauthorized {
            return;
        }
        state.phase = SessionPhase::Transmitting;
        LiveScoreUpdate {
            match_id: state.match_id,
            games: state.sheet.games().to_vec(),
        }
    };

    // The lock is not held across the network call; a new edit during the
    // push simply schedules the next flush.
    let result = transport.send_live_score(update.clone()).await;

    let mut state = state.lock().unwrap_or_else(|p| p.into_inner());
    match result {
        Ok(()) => {
            debug!(
                match_id = update.match_id,
                games = update.games.len(),
                "live score transmitted"
            );
            state.snapshot = update.games;
            state.transient_error = None;
            state.phase = SessionPhase::Editing;
        }
        Err(err) if err.is_unauthorized() => {
            warn!(match_id = update.match_id, "live score rejected, freezing session");
            let best_of = state.sheet.best_of();
            let snapshot = state.snapshot.clone();
            state.sheet = ScoreSheet::from_games(best_of, snapshot)
                .unwrap_or_else(|_| ScoreSheet::new(best_of));
            state.phase = SessionPhase::Unauthorized;
        }
        Err(err) => {
            warn!(match_id = update.match_id, error = %err, "live score transmission failed");
            state.transient_error = Some(err.to_string());
            state.phase = SessionPhase::Editing;
        }
    }
}
