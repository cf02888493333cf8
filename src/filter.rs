//! Filter and pagination state for the match list, kept in sync with a URL
//! query string.
//!
//! The query string is the only place this state is persisted: it is parsed
//! once when a view mounts ([`FilterSync::from_query`]) and re-serialized
//! after every change, with default-valued keys omitted so URLs stay
//! minimal. Dependent filters reset in a declared order, but only for
//! user-driven changes — never while the state is being rebuilt from the
//! URL.

use std::time::Duration;

use tracing::debug;

/// How long search input is debounced before a fetch fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// A single-choice filter value; `All` means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// The restricting value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }

    fn from_param(raw: &str) -> Self {
        if raw.is_empty() || raw == "all" {
            Selection::All
        } else {
            Selection::Only(raw.to_string())
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(value) => f.write_str(value),
        }
    }
}

/// Match status restriction for list views.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Scheduled,
    Live,
    Completed,
}

/// Everything the match list can be filtered and paginated by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub tournament: Selection,
    pub category: Selection,
    pub format: Selection,
    pub round: Selection,
    pub venue: Selection,
    pub team: Selection,
    pub referee: Selection,
    pub date: Selection,
    pub status: StatusFilter,
    pub search: String,
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            tournament: Selection::All,
            category: Selection::All,
            format: Selection::All,
            round: Selection::All,
            venue: Selection::All,
            team: Selection::All,
            referee: Selection::All,
            date: Selection::All,
            status: StatusFilter::All,
            search: String::new(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// Rebuild state from a URL query string.
    ///
    /// Unknown keys are ignored; absent or unparsable values fall back to
    /// their defaults.
    pub fn from_query(query: &str) -> Self {
        let mut state = Self::default();
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query).unwrap_or_default();
        for (key, value) in pairs {
            match key.as_str() {
                "tournament" => state.tournament = Selection::from_param(&value),
                "category" => state.category = Selection::from_param(&value),
                "format" => state.format = Selection::from_param(&value),
                "round" => state.round = Selection::from_param(&value),
                "venue" => state.venue = Selection::from_param(&value),
                "team" => state.team = Selection::from_param(&value),
                "referee" => state.referee = Selection::from_param(&value),
                "date" => state.date = Selection::from_param(&value),
                "status" => state.status = value.parse().unwrap_or_default(),
                "search" => state.search = value,
                "page" => {
                    state.page = value.parse().ok().filter(|&p| p >= 1).unwrap_or(DEFAULT_PAGE)
                }
                "pageSize" => {
                    state.page_size = value
                        .parse()
                        .ok()
                        .filter(|&s| s >= 1)
                        .unwrap_or(DEFAULT_PAGE_SIZE)
                }
                _ => {}
            }
        }
        state
    }

    /// The non-default key/value pairs, in canonical key order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let selections = [
            ("tournament", &self.tournament),
            ("category", &self.category),
            ("format", &self.format),
            ("round", &self.round),
            ("venue", &self.venue),
            ("team", &self.team),
            ("referee", &self.referee),
            ("date", &self.date),
        ];
        for (key, selection) in selections {
            if let Some(value) = selection.value() {
                pairs.push((key, value.to_string()));
            }
        }
        if self.status != StatusFilter::All {
            pairs.push(("status", self.status.to_string()));
        }
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if self.page != DEFAULT_PAGE {
            pairs.push(("page", self.page.to_string()));
        }
        if self.page_size != DEFAULT_PAGE_SIZE {
            pairs.push(("pageSize", self.page_size.to_string()));
        }
        pairs
    }

    /// Serialize to a URL query string, omitting default-valued keys.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self.query_pairs()).unwrap_or_default()
    }
}

/// A change to one filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Tournament(Selection),
    Category(Selection),
    Format(Selection),
    Round(Selection),
    Venue(Selection),
    Team(Selection),
    Referee(Selection),
    Date(Selection),
    Status(StatusFilter),
    Search(String),
    Page(u32),
    PageSize(u32),
}

/// What the caller should do with the data fetch after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Fetch now.
    Immediate,
    /// Fetch after [`SEARCH_DEBOUNCE`] of quiet.
    Debounced,
    /// Nothing changed; leave the current data alone.
    None,
}

/// Whether state is being rebuilt from the URL or reacting to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Hydrating,
    Live,
}

/// Bidirectional synchronizer between filter state and the URL.
///
/// Starts in [`SyncPhase::Hydrating`]; assignments in that phase are plain
/// writes with no cascades and no page reset. Once [`FilterSync::go_live`]
/// has been called, every genuine change runs the dependent-filter cascade
/// and resets the page.
#[derive(Debug, Clone)]
pub struct FilterSync {
    state: FilterState,
    phase: SyncPhase,
}

impl FilterSync {
    pub fn new() -> Self {
        Self {
            state: FilterState::default(),
            phase: SyncPhase::Hydrating,
        }
    }

    /// Hydrate from the current URL query string.
    pub fn from_query(query: &str) -> Self {
        Self {
            state: FilterState::from_query(query),
            phase: SyncPhase::Hydrating,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// The query string to mirror back into the URL.
    pub fn query_string(&self) -> String {
        self.state.to_query_string()
    }

    /// Finish hydration; subsequent changes are treated as user-driven.
    pub fn go_live(&mut self) {
        self.phase = SyncPhase::Live;
    }

    /// Apply a change and report how the data fetch should react.
    pub fn apply(&mut self, change: FilterChange) -> Refresh {
        if self.phase == SyncPhase::Hydrating {
            self.assign(change);
            return Refresh::None;
        }
        if !self.changes_state(&change) {
            return Refresh::None;
        }

        let debounced = matches!(change, FilterChange::Search(_));
        let keeps_page = matches!(change, FilterChange::Page(_) | FilterChange::PageSize(_));

        self.cascade(&change);
        self.assign(change);
        if !keeps_page {
            self.state.page = DEFAULT_PAGE;
        }
        debug!(query = %self.query_string(), "filter state changed");

        if debounced {
            Refresh::Debounced
        } else {
            Refresh::Immediate
        }
    }

    fn changes_state(&self, change: &FilterChange) -> bool {
        let state = &self.state;
        match change {
            FilterChange::Tournament(v) => *v != state.tournament,
            FilterChange::Category(v) => *v != state.category,
            FilterChange::Format(v) => *v != state.format,
            FilterChange::Round(v) => *v != state.round,
            FilterChange::Venue(v) => *v != state.venue,
            FilterChange::Team(v) => *v != state.team,
            FilterChange::Referee(v) => *v != state.referee,
            FilterChange::Date(v) => *v != state.date,
            FilterChange::Status(v) => *v != state.status,
            FilterChange::Search(v) => *v != state.search,
            FilterChange::Page(v) => *v != state.page,
            FilterChange::PageSize(v) => *v != state.page_size,
        }
    }

    // Dependent-filter resets chain: a tournament change clears category,
    // and a cleared category clears format and venue, and so on down.
    fn cascade(&mut self, change: &FilterChange) {
        match change {
            FilterChange::Tournament(_) => self.reset_category(),
            FilterChange::Category(_) => {
                self.reset_format();
                self.reset_venue();
            }
            FilterChange::Format(_) => self.reset_round(),
            _ => {}
        }
    }

    fn reset_category(&mut self) {
        self.state.category = Selection::All;
        self.reset_format();
        self.reset_venue();
    }

    fn reset_format(&mut self) {
        self.state.format = Selection::All;
        self.reset_round();
    }

    fn reset_venue(&mut self) {
        self.state.venue = Selection::All;
    }

    fn reset_round(&mut self) {
        self.state.round = Selection::All;
    }

    fn assign(&mut self, change: FilterChange) {
        let state = &mut self.state;
        match change {
            FilterChange::Tournament(v) => state.tournament = v,
            FilterChange::Category(v) => state.category = v,
            FilterChange::Format(v) => state.format = v,
            FilterChange::Round(v) => state.round = v,
            FilterChange::Venue(v) => state.venue = v,
            FilterChange::Team(v) => state.team = v,
            FilterChange::Referee(v) => state.referee = v,
            FilterChange::Date(v) => state.date = v,
            FilterChange::Status(v) => state.status = v,
            FilterChange::Search(v) => state.search = v,
            FilterChange::Page(v) => state.page = v.max(1),
            FilterChange::PageSize(v) => state.page_size = v.max(1),
        }
    }
}

impl Default for FilterSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_sync() -> FilterSync {
        let mut sync = FilterSync::new();
        sync.go_live();
        sync
    }

    #[test]
    fn default_state_serializes_to_empty_query() {
        assert_eq!(FilterState::default().to_query_string(), "");
    }

    #[test]
    fn query_round_trip_is_idempotent() {
        let query = "tournament=spring-cup&category=u18&status=live&search=falcons&page=3";
        let state = FilterState::from_query(query);
        assert_eq!(state.to_query_string(), query);
        assert_eq!(FilterState::from_query(&state.to_query_string()), state);
    }

    #[test]
    fn unknown_and_invalid_keys_fall_back_to_defaults() {
        let state = FilterState::from_query("page=abc&wat=1&status=bogus&pageSize=0");
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 20);
        assert_eq!(state.status, StatusFilter::All);
    }

    #[test]
    fn all_and_empty_parse_as_no_restriction() {
        let state = FilterState::from_query("tournament=all&venue=");
        assert!(state.tournament.is_all());
        assert!(state.venue.is_all());
    }

    #[test]
    fn tournament_change_resets_all_dependents() {
        let mut sync = live_sync();
        sync.apply(FilterChange::Tournament(Selection::only("t1")));
        sync.apply(FilterChange::Category(Selection::only("u18")));
        sync.apply(FilterChange::Format(Selection::only("indoor")));
        sync.apply(FilterChange::Round(Selection::only("final")));
        sync.apply(FilterChange::Venue(Selection::only("arena")));

        sync.apply(FilterChange::Tournament(Selection::only("t2")));
        let state = sync.state();
        assert_eq!(state.tournament, Selection::only("t2"));
        assert!(state.category.is_all());
        assert!(state.format.is_all());
        assert!(state.venue.is_all());
        assert!(state.round.is_all());
    }

    #[test]
    fn category_change_resets_format_venue_and_round() {
        let mut sync = live_sync();
        sync.apply(FilterChange::Format(Selection::only("beach")));
        sync.apply(FilterChange::Round(Selection::only("semi")));
        sync.apply(FilterChange::Venue(Selection::only("hall-2")));
        sync.apply(FilterChange::Team(Selection::only("falcons")));

        sync.apply(FilterChange::Category(Selection::only("seniors")));
        let state = sync.state();
        assert!(state.format.is_all());
        assert!(state.venue.is_all());
        assert!(state.round.is_all());
        // Team is not a dependent of category.
        assert_eq!(state.team, Selection::only("falcons"));
    }

    #[test]
    fn page_resets_on_filter_changes_but_not_page_size() {
        let mut sync = live_sync();
        sync.apply(FilterChange::Page(4));
        assert_eq!(sync.state().page, 4);

        sync.apply(FilterChange::PageSize(50));
        assert_eq!(sync.state().page, 4);

        sync.apply(FilterChange::Status(StatusFilter::Completed));
        assert_eq!(sync.state().page, 1);
    }

    #[test]
    fn unchanged_value_is_a_noop() {
        let mut sync = live_sync();
        sync.apply(FilterChange::Page(3));
        assert_eq!(
            sync.apply(FilterChange::Status(StatusFilter::All)),
            Refresh::None
        );
        assert_eq!(sync.state().page, 3);
    }

    #[test]
    fn search_is_debounced_other_changes_are_immediate() {
        let mut sync = live_sync();
        assert_eq!(
            sync.apply(FilterChange::Search("falc".into())),
            Refresh::Debounced
        );
        assert_eq!(
            sync.apply(FilterChange::Venue(Selection::only("arena"))),
            Refresh::Immediate
        );
    }

    #[test]
    fn hydration_assignments_skip_cascades_and_page_reset() {
        let mut sync = FilterSync::from_query("tournament=t1&category=u18&page=5");
        assert_eq!(sync.phase(), SyncPhase::Hydrating);
        // URL-driven tournament assignment must not clear the category that
        // was hydrated alongside it.
        assert_eq!(
            sync.apply(FilterChange::Format(Selection::only("indoor"))),
            Refresh::None
        );
        let state = sync.state();
        assert_eq!(state.category, Selection::only("u18"));
        assert_eq!(state.format, Selection::only("indoor"));
        assert_eq!(state.page, 5);

        sync.go_live();
        sync.apply(FilterChange::Tournament(Selection::only("t2")));
        assert!(sync.state().category.is_all());
        assert_eq!(sync.state().page, 1);
    }
}
