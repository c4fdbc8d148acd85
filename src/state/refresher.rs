use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Re-requests the open competition's fixtures once a minute so live scores move.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests, period: REFRESH_INTERVAL }
    }

    pub async fn run(self) {
        let mut fixtures_interval = interval(self.period);
        // First tick fires immediately; startup loading is already under way.
        fixtures_interval.tick().await;

        loop {
            fixtures_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::RefreshFixtures)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
