use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{instrument, warn};

use crate::api::{self, Api};
use crate::error::{RefdeskError, Result};
use crate::filter::FilterState;
use crate::live::{LiveScoreSession, LiveScoreTransport};
use crate::model::*;
use crate::score::ScoreSheet;

/// An authenticated identity: the bearer token plus whatever the caller
/// knows about who it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            display_name: None,
        }
    }

    pub fn named(token: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            display_name: Some(display_name.into()),
        }
    }
}

/// The main entry point for talking to a refdesk server.
///
/// `RefdeskClient` wraps a [`reqwest::Client`], the server's base URL, and
/// the current [`Session`]. How the token is obtained is the caller's
/// business; the client only carries it and reacts to its rejection.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> refdesk::Result<()> {
/// use refdesk::{FilterChange, FilterSync, RefdeskClient, Selection, Session};
///
/// let client = RefdeskClient::new("https://api.refdesk.example/v1", Session::new("token"));
///
/// let mut filters = FilterSync::from_query("tournament=12&page=2");
/// filters.go_live();
/// filters.apply(FilterChange::Category(Selection::only("u18")));
///
/// let page = client.list_matches(filters.state()).await?;
/// println!("{} matches", page.total_items);
/// # Ok(())
/// # }
/// ```
pub struct RefdeskClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl RefdeskClient {
    /// Create a client with default HTTP settings.
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session: Session,
    ) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
            session: Some(session),
        }
    }

    /// Install a new session, replacing any previous one.
    pub fn login(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drop the current session. Every subsequent call fails fast with
    /// [`RefdeskError::NotAuthenticated`] until `login` is called again.
    pub fn logout(&mut self) -> Option<Session> {
        self.session.take()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn api(&self) -> Result<Api<'_>> {
        let session = self.session.as_ref().ok_or(RefdeskError::NotAuthenticated)?;
        Ok(Api {
            http: &self.http,
            base_url: &self.base_url,
            token: &session.token,
        })
    }

    /// Fetch all tournaments.
    #[instrument(skip(self))]
    pub async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        api::tournaments::list_tournaments(&self.api()?).await
    }

    /// Fetch the dependent-filter option lists for a tournament.
    #[instrument(skip(self))]
    pub async fn filter_options(&self, tournament_id: u32) -> Result<FilterOptions> {
        api::tournaments::filter_options(&self.api()?, tournament_id).await
    }

    /// Fetch one page of matches for the given filter state.
    #[instrument(skip(self, filters))]
    pub async fn list_matches(&self, filters: &FilterState) -> Result<Page<MatchSummary>> {
        api::matches::list_matches(&self.api()?, filters).await
    }

    /// Fetch full details for a specific match by id.
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: u32) -> Result<Match> {
        api::matches::get_match(&self.api()?, match_id).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create_match(&self, draft: &MatchDraft) -> Result<Match> {
        api::matches::create_match(&self.api()?, draft).await
    }

    #[instrument(skip(self))]
    pub async fn delete_match(&self, match_id: u32) -> Result<()> {
        api::matches::delete_match(&self.api()?, match_id).await
    }

    /// Submit a finished score sheet.
    ///
    /// The sheet is validated first; a sheet with tied games or no scores is
    /// rejected locally and never sent. The match is marked completed when
    /// the sheet is decided.
    #[instrument(skip(self, sheet))]
    pub async fn submit_score(&self, match_id: u32, sheet: &ScoreSheet) -> Result<Match> {
        sheet.validate()?;
        api::matches::update_score(
            &self.api()?,
            match_id,
            sheet.best_of(),
            sheet.games(),
            sheet.decided(),
        )
        .await
    }

    /// Assign a referee to a single match.
    #[instrument(skip(self))]
    pub async fn assign_referee(&self, match_id: u32, referee_id: u32) -> Result<()> {
        api::matches::assign_referee(&self.api()?, match_id, referee_id).await
    }

    /// Assign a referee to several matches at once.
    ///
    /// The per-match requests are issued concurrently and partial failures
    /// are aggregated into a count; no per-item detail is reported.
    #[instrument(skip(self, match_ids))]
    pub async fn assign_referee_bulk(
        &self,
        referee_id: u32,
        match_ids: &[u32],
    ) -> Result<BulkAssignOutcome> {
        let api = self.api()?;
        let results = join_all(
            match_ids
                .iter()
                .map(|&match_id| api::matches::assign_referee(&api, match_id, referee_id)),
        )
        .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(referee_id, failed, total = results.len(), "bulk assign had failures");
        }
        Ok(BulkAssignOutcome {
            assigned: results.len() - failed,
            failed,
        })
    }

    /// Fetch all referees.
    #[instrument(skip(self))]
    pub async fn list_referees(&self) -> Result<Vec<Referee>> {
        api::referees::list_referees(&self.api()?).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create_referee(&self, draft: &RefereeDraft) -> Result<Referee> {
        api::referees::create_referee(&self.api()?, draft).await
    }

    #[instrument(skip(self, draft))]
    pub async fn update_referee(&self, referee_id: u32, draft: &RefereeDraft) -> Result<Referee> {
        api::referees::update_referee(&self.api()?, referee_id, draft).await
    }

    #[instrument(skip(self))]
    pub async fn delete_referee(&self, referee_id: u32) -> Result<()> {
        api::referees::delete_referee(&self.api()?, referee_id).await
    }

    /// Fetch all venues.
    #[instrument(skip(self))]
    pub async fn list_venues(&self) -> Result<Vec<Venue>> {
        api::venues::list_venues(&self.api()?).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create_venue(&self, draft: &VenueDraft) -> Result<Venue> {
        api::venues::create_venue(&self.api()?, draft).await
    }

    #[instrument(skip(self, draft))]
    pub async fn update_venue(&self, venue_id: u32, draft: &VenueDraft) -> Result<Venue> {
        api::venues::update_venue(&self.api()?, venue_id, draft).await
    }

    #[instrument(skip(self))]
    pub async fn delete_venue(&self, venue_id: u32) -> Result<()> {
        api::venues::delete_venue(&self.api()?, venue_id).await
    }

    /// Open a live-scoring session for a match, transmitting through this
    /// client.
    pub fn live_session(self: &Arc<Self>, match_id: u32, sheet: ScoreSheet) -> LiveScoreSession {
        LiveScoreSession::new(
            Arc::clone(self) as Arc<dyn LiveScoreTransport>,
            match_id,
            sheet,
        )
    }
}

#[async_trait]
impl LiveScoreTransport for RefdeskClient {
    async fn send_live_score(&self, update: LiveScoreUpdate) -> Result<()> {
        api::live::post_live_score(&self.api()?, &update).await
    }
}
