use crate::state::messages::{NetworkRequest, NetworkResponse};
use football_data_api::client::FootballDataApi;
use football_data_api::{ApiError, ApiResult, PositionRanking};
use log::{debug, error};
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
    client: FootballDataApi,
    ranking: PositionRanking,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
    /// Target of `RefreshFixtures`: the last competition that was opened.
    current_competition: Option<String>,
}

impl NetworkWorker {
    pub fn new(
        client: FootballDataApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            ranking: PositionRanking::default(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
            current_competition: None,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            if matches!(request, NetworkRequest::RefreshFixtures) && self.current_competition.is_none() {
                debug!("no competition open, skipping fixture refresh");
                continue;
            }

            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadCompetitions => self.handle_load_competitions().await,
                NetworkRequest::LoadCompetition { competition_id } => {
                    self.handle_load_competition(competition_id).await
                }
                NetworkRequest::LoadSquad { team_id, team_name } => {
                    self.handle_load_squad(team_id, team_name).await
                }
                NetworkRequest::LoadFixture { fixture_id } => {
                    self.handle_load_fixture(fixture_id).await
                }
                NetworkRequest::RefreshFixtures => self.handle_refresh_fixtures().await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| {
                error!("{err}");
                NetworkResponse::Error { message: err.to_string() }
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_competitions(&self) -> ApiResult<NetworkResponse> {
        debug!("loading competitions");
        let competitions = self.client.fetch_competitions().await?;
        Ok(NetworkResponse::CompetitionsLoaded { competitions })
    }

    async fn handle_load_competition(&mut self, competition_id: String) -> ApiResult<NetworkResponse> {
        debug!("loading competition {competition_id}");

        let (competition, standings, schedule, teams) = tokio::try_join!(
            self.client.fetch_competition(&competition_id),
            self.fetch_standings(&competition_id),
            self.client.fetch_fixture_schedule(&competition_id),
            self.client.fetch_teams(&competition_id),
        )?;

        // Only a competition that actually reached the screen is refreshed.
        self.current_competition = Some(competition_id);

        Ok(NetworkResponse::CompetitionLoaded { competition, standings, schedule, teams })
    }

    /// Cup competitions outside their group stage have no table; that is not an error.
    async fn fetch_standings(
        &self,
        competition_id: &str,
    ) -> ApiResult<Option<football_data_api::LeagueStandings>> {
        match self.client.fetch_league_table(competition_id).await {
            Ok(standings) => Ok(Some(standings)),
            Err(ApiError::NotFound(url)) => {
                debug!("no league table at {url}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn handle_refresh_fixtures(&self) -> ApiResult<NetworkResponse> {
        let Some(competition_id) = self.current_competition.clone() else {
            return Err(ApiError::NotFound("no competition selected".into()));
        };
        debug!("refreshing fixtures for competition {competition_id}");
        let schedule = self.client.fetch_fixture_schedule(&competition_id).await?;
        Ok(NetworkResponse::FixturesRefreshed { competition_id, schedule })
    }

    async fn handle_load_squad(&self, team_id: String, team_name: String) -> ApiResult<NetworkResponse> {
        debug!("loading squad for team {team_id}");
        let groups = self
            .client
            .fetch_players_grouped(&team_id, &self.ranking)
            .await?;
        Ok(NetworkResponse::SquadLoaded { team_id, team_name, groups })
    }

    async fn handle_load_fixture(&self, fixture_id: String) -> ApiResult<NetworkResponse> {
        debug!("loading fixture {fixture_id}");
        let fixture = self.client.fetch_fixture(&fixture_id).await?;
        Ok(NetworkResponse::FixtureLoaded { fixture })
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
