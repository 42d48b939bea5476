use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Polls live scores on a fixed interval. Only sends RefreshLive; the rest of
/// the dashboard is loaded on startup and on manual reload.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut live_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        live_interval.tick().await;

        loop {
            live_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::RefreshLive)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
