use crate::app::MenuItem;
use crate::state::messages::{Dashboard, MatchDetail, SeriesDetail};
use chrono::Local;
use cricket_api::{LiveMatch, Match, News, Series};

// ---------------------------------------------------------------------------
// Dashboard lists
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DashboardState {
    pub live: Vec<LiveMatch>,
    pub upcoming: Vec<Match>,
    pub recent: Vec<Match>,
    pub series: Vec<Series>,
    pub news: Vec<News>,
    /// Envelope message of the last news load; shown when news degraded.
    pub news_message: String,
    pub failures: Vec<String>,
    pub loaded: bool,
    pub last_updated: Option<String>,
}

impl DashboardState {
    pub fn load(&mut self, dashboard: Dashboard) {
        self.live = dashboard.live;
        self.upcoming = dashboard.upcoming;
        self.recent = dashboard.recent;
        self.series = dashboard.series;
        self.news = dashboard.news;
        self.news_message = dashboard.news_message;
        self.failures = dashboard.failures;
        self.loaded = true;
        self.touch();
    }

    pub fn replace_live(&mut self, matches: Vec<LiveMatch>) {
        self.live = matches;
        self.touch();
    }

    /// Number of rows the tab lists; 0 for tabs that are not lists.
    pub fn len(&self, tab: MenuItem) -> usize {
        match tab {
            MenuItem::Live => self.live.len(),
            MenuItem::Upcoming => self.upcoming.len(),
            MenuItem::Recent => self.recent.len(),
            MenuItem::Series => self.series.len(),
            MenuItem::News => self.news.len(),
            MenuItem::Detail | MenuItem::Help => 0,
        }
    }

    fn touch(&mut self) {
        self.last_updated = Some(Local::now().format("%H:%M:%S").to_string());
    }
}

// ---------------------------------------------------------------------------
// Selection, one cursor per list tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursors {
    live: usize,
    upcoming: usize,
    recent: usize,
    series: usize,
    news: usize,
}

impl Cursors {
    pub fn get(&self, tab: MenuItem) -> usize {
        match tab {
            MenuItem::Live => self.live,
            MenuItem::Upcoming => self.upcoming,
            MenuItem::Recent => self.recent,
            MenuItem::Series => self.series,
            MenuItem::News => self.news,
            MenuItem::Detail | MenuItem::Help => 0,
        }
    }

    fn slot(&mut self, tab: MenuItem) -> Option<&mut usize> {
        match tab {
            MenuItem::Live => Some(&mut self.live),
            MenuItem::Upcoming => Some(&mut self.upcoming),
            MenuItem::Recent => Some(&mut self.recent),
            MenuItem::Series => Some(&mut self.series),
            MenuItem::News => Some(&mut self.news),
            MenuItem::Detail | MenuItem::Help => None,
        }
    }

    pub fn move_down(&mut self, tab: MenuItem, len: usize) {
        if let Some(cursor) = self.slot(tab)
            && *cursor + 1 < len
        {
            *cursor += 1;
        }
    }

    pub fn move_up(&mut self, tab: MenuItem) {
        if let Some(cursor) = self.slot(tab) {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Keep the cursor on a row after the list shrank.
    pub fn clamp(&mut self, tab: MenuItem, len: usize) {
        if let Some(cursor) = self.slot(tab) {
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }
}

// ---------------------------------------------------------------------------
// Detail pane
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum DetailView {
    Match(MatchDetail),
    Series(SeriesDetail),
    News(News),
}

#[derive(Debug, Default)]
pub struct DetailState {
    pub view: Option<DetailView>,
    /// Title of the record being fetched, shown until the response lands.
    pub pending: Option<String>,
    pub scroll_offset: u16,
}

impl DetailState {
    pub fn open(&mut self, view: DetailView) {
        self.view = Some(view);
        self.pending = None;
        self.scroll_offset = 0;
    }

    pub fn request(&mut self, title: String) {
        self.view = None;
        self.pending = Some(title);
        self.scroll_offset = 0;
    }

    pub fn match_id(&self) -> Option<&str> {
        match &self.view {
            Some(DetailView::Match(detail)) => Some(detail.match_id.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub provider: String,
    pub dashboard: DashboardState,
    pub cursors: Cursors,
    pub detail: DetailState,
}

impl AppState {
    pub fn new(provider: &str) -> Self {
        Self {
            provider: provider.to_owned(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stops_at_list_edges() {
        let mut cursors = Cursors::default();
        cursors.move_up(MenuItem::Live);
        assert_eq!(cursors.get(MenuItem::Live), 0);

        cursors.move_down(MenuItem::Live, 2);
        cursors.move_down(MenuItem::Live, 2);
        assert_eq!(cursors.get(MenuItem::Live), 1);

        cursors.move_down(MenuItem::News, 0);
        assert_eq!(cursors.get(MenuItem::News), 0);
    }

    #[test]
    fn cursors_are_independent_per_tab() {
        let mut cursors = Cursors::default();
        cursors.move_down(MenuItem::Upcoming, 5);
        cursors.move_down(MenuItem::Upcoming, 5);
        cursors.move_down(MenuItem::Recent, 5);
        assert_eq!(cursors.get(MenuItem::Upcoming), 2);
        assert_eq!(cursors.get(MenuItem::Recent), 1);
        assert_eq!(cursors.get(MenuItem::Series), 0);
    }

    #[test]
    fn clamp_follows_a_shrinking_list() {
        let mut cursors = Cursors::default();
        for _ in 0..4 {
            cursors.move_down(MenuItem::Live, 10);
        }
        cursors.clamp(MenuItem::Live, 2);
        assert_eq!(cursors.get(MenuItem::Live), 1);
        cursors.clamp(MenuItem::Live, 0);
        assert_eq!(cursors.get(MenuItem::Live), 0);
    }

    #[test]
    fn loading_marks_the_dashboard_fresh() {
        let mut dashboard = DashboardState::default();
        assert!(!dashboard.loaded);
        dashboard.load(Dashboard {
            upcoming: vec![Match::default(), Match::default()],
            ..Dashboard::default()
        });
        assert!(dashboard.loaded);
        assert!(dashboard.last_updated.is_some());
        assert_eq!(dashboard.len(MenuItem::Upcoming), 2);
        assert_eq!(dashboard.len(MenuItem::Help), 0);
    }
}
