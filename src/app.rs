use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, DetailView};
use crate::state::messages::{Dashboard, MatchDetail, NetworkRequest, SeriesDetail};
use cricket_api::LiveMatch;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Live,
    Upcoming,
    Recent,
    Series,
    News,
    Detail,
    Help,
}

impl MenuItem {
    pub const TABS: [MenuItem; 5] = [
        MenuItem::Live,
        MenuItem::Upcoming,
        MenuItem::Recent,
        MenuItem::Series,
        MenuItem::News,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Live => "Live",
            MenuItem::Upcoming => "Upcoming",
            MenuItem::Recent => "Recent",
            MenuItem::Series => "Series",
            MenuItem::News => "News",
            MenuItem::Detail => "Detail",
            MenuItem::Help => "Help",
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, provider: &str) -> Self {
        let app = Self {
            state: AppState::new(provider),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_dashboard_loaded(&mut self, dashboard: Dashboard) {
        self.state.last_error = None;
        self.state.dashboard.load(dashboard);
        for tab in MenuItem::TABS {
            let len = self.state.dashboard.len(tab);
            self.state.cursors.clamp(tab, len);
        }
    }

    /// Replaces the live list and refreshes an open detail pane for one of its matches.
    pub fn on_live_updated(&mut self, matches: Vec<LiveMatch>) {
        if let Some(DetailView::Match(detail)) = self.state.detail.view.as_mut()
            && let Some(fresh) = matches.iter().find(|m| m.match_info.id == detail.match_id)
        {
            detail.live = Some(fresh.clone());
        }
        self.state.dashboard.replace_live(matches);
        let len = self.state.dashboard.len(MenuItem::Live);
        self.state.cursors.clamp(MenuItem::Live, len);
    }

    pub fn on_match_detail_loaded(&mut self, detail: MatchDetail) {
        self.state.last_error = None;
        self.state.detail.open(DetailView::Match(detail));
    }

    pub fn on_series_detail_loaded(&mut self, detail: SeriesDetail) {
        self.state.last_error = None;
        self.state.detail.open(DetailView::Series(detail));
    }

    pub fn on_error(&mut self, message: String) {
        self.state.detail.pending = None;
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn close_detail(&mut self) {
        if self.state.active_tab == MenuItem::Detail {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn move_down(&mut self) {
        let tab = self.state.active_tab;
        if tab == MenuItem::Detail {
            self.state.detail.scroll_offset = self.state.detail.scroll_offset.saturating_add(1);
            return;
        }
        let len = self.state.dashboard.len(tab);
        self.state.cursors.move_down(tab, len);
    }

    pub fn move_up(&mut self) {
        let tab = self.state.active_tab;
        if tab == MenuItem::Detail {
            self.state.detail.scroll_offset = self.state.detail.scroll_offset.saturating_sub(1);
            return;
        }
        self.state.cursors.move_up(tab);
    }

    /// Opens the detail pane for the selected row. Returns the request that
    /// fills it, or `None` when the row is shown from data already held.
    pub fn select(&mut self) -> Option<NetworkRequest> {
        let tab = self.state.active_tab;
        let index = self.state.cursors.get(tab);
        let dashboard = &self.state.dashboard;

        let (title, request) = match tab {
            MenuItem::Live => {
                let m = &dashboard.live.get(index)?.match_info;
                (m.title(), NetworkRequest::LoadMatchDetail { match_id: m.id.clone() })
            }
            MenuItem::Upcoming | MenuItem::Recent => {
                let list = if tab == MenuItem::Upcoming { &dashboard.upcoming } else { &dashboard.recent };
                let m = list.get(index)?;
                (m.title(), NetworkRequest::LoadMatchDetail { match_id: m.id.clone() })
            }
            MenuItem::Series => {
                let s = dashboard.series.get(index)?;
                (s.name.clone(), NetworkRequest::LoadSeriesDetail { series_id: s.id.clone() })
            }
            MenuItem::News => {
                let news = dashboard.news.get(index)?.clone();
                self.state.detail.open(DetailView::News(news));
                self.update_tab(MenuItem::Detail);
                return None;
            }
            MenuItem::Detail | MenuItem::Help => return None,
        };

        self.state.detail.request(title);
        self.update_tab(MenuItem::Detail);
        Some(request)
    }

    /// Request that reloads the open match detail, if one is open.
    pub fn reload_detail(&self) -> Option<NetworkRequest> {
        let match_id = self.state.detail.match_id()?;
        Some(NetworkRequest::LoadMatchDetail { match_id: match_id.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_api::{Match, News, Score, Series};

    fn app() -> App {
        App::new(AppSettings::default(), "sportmonks")
    }

    fn fixture(id: &str) -> Match {
        Match { id: id.into(), ..Match::default() }
    }

    fn live(id: &str, runs: u32) -> LiveMatch {
        let mut score = Score::default();
        score.batting.runs = Some(runs);
        LiveMatch { match_info: fixture(id), score }
    }

    fn loaded() -> App {
        let mut app = app();
        app.on_dashboard_loaded(Dashboard {
            live: vec![live("l1", 10), live("l2", 20)],
            upcoming: vec![fixture("u1"), fixture("u2"), fixture("u3")],
            series: vec![Series { id: "s1".into(), name: "Ashes".into(), ..Series::default() }],
            news: vec![News { id: "n1".into(), title: "Headline".into(), ..News::default() }],
            ..Dashboard::default()
        });
        app
    }

    #[test]
    fn enter_on_a_match_requests_its_detail() {
        let mut app = loaded();
        app.update_tab(MenuItem::Upcoming);
        app.move_down();
        app.move_down();
        app.move_down();

        let request = app.select();
        assert!(matches!(request, Some(NetworkRequest::LoadMatchDetail { ref match_id }) if match_id == "u3"));
        assert_eq!(app.state.active_tab, MenuItem::Detail);
        assert!(app.state.detail.pending.is_some());

        app.close_detail();
        assert_eq!(app.state.active_tab, MenuItem::Upcoming);
    }

    #[test]
    fn enter_on_series_requests_series_detail() {
        let mut app = loaded();
        app.update_tab(MenuItem::Series);
        let request = app.select();
        assert!(matches!(request, Some(NetworkRequest::LoadSeriesDetail { ref series_id }) if series_id == "s1"));
        assert_eq!(app.state.detail.pending.as_deref(), Some("Ashes"));
    }

    #[test]
    fn enter_on_news_opens_without_a_request() {
        let mut app = loaded();
        app.update_tab(MenuItem::News);
        assert!(app.select().is_none());
        assert!(matches!(app.state.detail.view, Some(DetailView::News(ref n)) if n.title == "Headline"));
        assert_eq!(app.state.active_tab, MenuItem::Detail);
    }

    #[test]
    fn enter_on_an_empty_list_does_nothing() {
        let mut app = app();
        assert!(app.select().is_none());
        assert_eq!(app.state.active_tab, MenuItem::Live);
    }

    #[test]
    fn live_refresh_updates_open_detail_and_clamps_cursor() {
        let mut app = loaded();
        app.move_down();
        assert_eq!(app.state.cursors.get(MenuItem::Live), 1);

        app.on_match_detail_loaded(MatchDetail { match_id: "l1".into(), ..MatchDetail::default() });
        app.on_live_updated(vec![live("l1", 55)]);

        assert_eq!(app.state.cursors.get(MenuItem::Live), 0);
        let Some(DetailView::Match(detail)) = &app.state.detail.view else {
            panic!("match detail should stay open");
        };
        assert_eq!(detail.live.as_ref().and_then(|l| l.score.batting.runs), Some(55));
        assert!(matches!(app.reload_detail(), Some(NetworkRequest::LoadMatchDetail { .. })));
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Recent);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Recent);
    }

    #[test]
    fn detail_scrolls_instead_of_moving_cursor() {
        let mut app = loaded();
        app.update_tab(MenuItem::News);
        app.select();
        app.move_down();
        app.move_down();
        app.move_up();
        assert_eq!(app.state.detail.scroll_offset, 1);
        assert_eq!(app.state.cursors.get(MenuItem::News), 0);
    }
}
