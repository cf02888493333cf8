pub use client::{RefdeskClient, Session};
pub use error::{RefdeskError, Result};
pub use filter::{
    FilterChange, FilterState, FilterSync, Refresh, Selection, StatusFilter, SyncPhase,
    SEARCH_DEBOUNCE,
};
pub use live::{LiveError, LiveScoreSession, LiveScoreTransport, SessionPhase, LIVE_DEBOUNCE};
pub use model::*;
pub use score::{ScoreError, ScoreSheet, ScoreValidation, ValidationIssue};

mod api;
pub mod client;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod live;
pub mod model;
pub mod score;
