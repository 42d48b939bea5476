use crate::state::network::LoadingState;
use cricket_api::{LiveMatch, Match, News, Player, PointsTableEntry, Scorecard, Series};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadDashboard,
    RefreshLive,
    LoadMatchDetail { match_id: String },
    LoadSeriesDetail { series_id: String },
}

/// Everything the tabs show, fetched together.
/// A section that failed keeps its slot empty and adds a line to `failures`.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub live: Vec<LiveMatch>,
    pub upcoming: Vec<Match>,
    pub recent: Vec<Match>,
    pub series: Vec<Series>,
    pub news: Vec<News>,
    pub news_message: String,
    pub failures: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MatchDetail {
    pub match_id: String,
    pub info: Option<Match>,
    pub live: Option<LiveMatch>,
    pub scorecard: Option<Scorecard>,
    pub squad: Vec<Player>,
    /// Stub messages and failed sections.
    pub notes: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SeriesDetail {
    pub series_id: String,
    pub upcoming: Vec<Match>,
    pub recent: Vec<Match>,
    pub points_table: Vec<PointsTableEntry>,
    pub notes: Vec<String>,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    DashboardLoaded { dashboard: Dashboard },
    /// Periodic poll: only the live section is replaced.
    LiveUpdated { matches: Vec<LiveMatch> },
    MatchDetailLoaded { detail: MatchDetail },
    SeriesDetailLoaded { detail: SeriesDetail },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
