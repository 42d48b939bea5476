use crate::state::messages::{Dashboard, MatchDetail, NetworkRequest, NetworkResponse, SeriesDetail};
use cricket_api::{ApiError, ApiResponse, ApiResult, CricketApi};
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: CricketApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: CricketApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadDashboard => self.handle_load_dashboard().await,
                NetworkRequest::RefreshLive => self.handle_refresh_live().await,
                NetworkRequest::LoadMatchDetail { match_id } => {
                    self.handle_load_match_detail(match_id).await
                }
                NetworkRequest::LoadSeriesDetail { series_id } => {
                    self.handle_load_series_detail(series_id).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_dashboard(&self) -> ApiResult<NetworkResponse> {
        debug!("loading dashboard from {}", self.client.provider_name());
        let (live, upcoming, recent, series, news) = tokio::join!(
            self.client.live_matches(),
            self.client.upcoming_matches(),
            self.client.recent_matches(),
            self.client.series_list(),
            self.client.news_list(),
        );

        let mut sections = Sections::default();
        let live = sections.take("live", live);
        let upcoming = sections.take("upcoming", upcoming);
        let recent = sections.take("recent", recent);
        let series = sections.take("series", series);
        sections.give_up_if_failed(4)?;

        // news_list never fails
        let (news, news_message) = match news {
            Ok(res) => (res.data, res.message),
            Err(e) => (Vec::new(), e.to_string()),
        };

        Ok(NetworkResponse::DashboardLoaded {
            dashboard: Dashboard {
                live,
                upcoming,
                recent,
                series,
                news,
                news_message,
                failures: sections.notes,
            },
        })
    }

    async fn handle_refresh_live(&self) -> ApiResult<NetworkResponse> {
        debug!("refreshing live scores");
        let matches = self.client.live_matches().await?.data;
        Ok(NetworkResponse::LiveUpdated { matches })
    }

    async fn handle_load_match_detail(&self, match_id: String) -> ApiResult<NetworkResponse> {
        debug!("loading match detail for {match_id}");
        let (info, live, scorecard, squad) = tokio::join!(
            self.client.match_info(&match_id),
            self.client.live_match(&match_id),
            self.client.scorecard(&match_id),
            self.client.squad(&match_id),
        );

        let mut sections = Sections::default();
        let info = sections.take("match info", info);
        let live = sections.take("live score", live);
        let scorecard = sections.take("scorecard", scorecard);
        let squad = sections.take("squad", squad);
        sections.give_up_if_failed(4)?;

        Ok(NetworkResponse::MatchDetailLoaded {
            detail: MatchDetail { match_id, info, live, scorecard, squad, notes: sections.notes },
        })
    }

    async fn handle_load_series_detail(&self, series_id: String) -> ApiResult<NetworkResponse> {
        debug!("loading series detail for {series_id}");
        let (upcoming, recent, points_table) = tokio::join!(
            self.client.upcoming_matches_by_series(&series_id),
            self.client.recent_matches_by_series(&series_id),
            self.client.points_table(&series_id),
        );

        let mut sections = Sections::default();
        let upcoming = sections.take("upcoming", upcoming);
        let recent = sections.take("recent", recent);
        let points_table = sections.take("points table", points_table);
        sections.give_up_if_failed(3)?;

        Ok(NetworkResponse::SeriesDetailLoaded {
            detail: SeriesDetail { series_id, upcoming, recent, points_table, notes: sections.notes },
        })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// Gathers the sections of a multi-call screen. A failed section reads as
/// empty; the screen only fails when every section did.
#[derive(Debug, Default)]
struct Sections {
    notes: Vec<String>,
    failed: usize,
    last_error: Option<ApiError>,
}

impl Sections {
    fn take<T: Default>(&mut self, label: &str, result: ApiResult<ApiResponse<T>>) -> T {
        match result {
            Ok(res) => {
                if !res.is_success() {
                    self.notes.push(res.message);
                }
                res.data
            }
            Err(e) => {
                warn!("{label} failed: {e}");
                self.notes.push(format!("{label}: {e}"));
                self.failed += 1;
                self.last_error = Some(e);
                T::default()
            }
        }
    }

    fn give_up_if_failed(&mut self, total: usize) -> ApiResult<()> {
        match self.last_error.take() {
            Some(e) if self.failed >= total => Err(e),
            Some(e) => {
                self.last_error = Some(e);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> ApiError {
        ApiError::Upstream { message: "down".into() }
    }

    #[test]
    fn degraded_sections_leave_a_note() {
        let mut sections = Sections::default();
        let squad: Vec<u32> =
            sections.take("squad", Ok(ApiResponse::degraded("squad is not supported by x", vec![])));
        let live: Vec<u32> = sections.take("live", Ok(ApiResponse::success(vec![1, 2])));
        assert!(squad.is_empty());
        assert_eq!(live, vec![1, 2]);
        assert_eq!(sections.notes, vec!["squad is not supported by x".to_string()]);
        assert!(sections.give_up_if_failed(2).is_ok());
    }

    #[test]
    fn screen_fails_only_when_every_section_failed() {
        let mut sections = Sections::default();
        let _: Vec<u32> = sections.take("a", Err(failure()));
        let _: Vec<u32> = sections.take("b", Ok(ApiResponse::success(vec![])));
        assert!(sections.give_up_if_failed(2).is_ok());
        assert_eq!(sections.notes, vec!["a: upstream rejected request: down".to_string()]);

        let _: Vec<u32> = sections.take("c", Err(failure()));
        assert!(matches!(sections.give_up_if_failed(2), Err(ApiError::Upstream { .. })));
    }
}
