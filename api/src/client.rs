use crate::decode;
use crate::error::{ApiError, ApiResult, DecodeResult};
use crate::grouping::{self, FixtureSchedule, PositionGroup, PositionRanking};
use crate::league_table::LeagueStandings;
use crate::{Competition, Fixture, Player, Team};
use chrono::{Local, NaiveDate};
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://api.football-data.org/v1";
pub const BASE_URL_ENV: &str = "FOOTBALL_DATA_BASE_URL";
pub const API_KEY_ENV: &str = "FOOTBALL_DATA_API_KEY";
const AUTH_HEADER: &str = "X-Auth-Token";

/// Where to reach the API and which token, if any, to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ApiConfig {
    /// Read `FOOTBALL_DATA_BASE_URL` and `FOOTBALL_DATA_API_KEY`; blank values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            base_url: non_blank(BASE_URL_ENV).unwrap_or(defaults.base_url),
            api_key: non_blank(API_KEY_ENV),
            timeout: defaults.timeout,
        }
    }
}

/// football-data.org v1 client. Responses are decoded with [`crate::decode`].
#[derive(Debug, Clone)]
pub struct FootballDataApi {
    client: Client,
    config: ApiConfig,
}

impl Default for FootballDataApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

impl FootballDataApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent("pitchside/0.1 (terminal football viewer)")
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn fetch_competitions(&self) -> ApiResult<Vec<Competition>> {
        self.fetch("competitions/", decode::competitions).await
    }

    pub async fn fetch_competition(&self, competition_id: &str) -> ApiResult<Competition> {
        self.fetch(&format!("competitions/{competition_id}"), decode::competition)
            .await
    }

    pub async fn fetch_teams(&self, competition_id: &str) -> ApiResult<Vec<Team>> {
        self.fetch(&format!("competitions/{competition_id}/teams"), decode::teams)
            .await
    }

    pub async fn fetch_competition_fixtures(&self, competition_id: &str) -> ApiResult<Vec<Fixture>> {
        self.fetch(&format!("competitions/{competition_id}/fixtures"), decode::fixtures)
            .await
    }

    /// League or group tables, depending on the competition's format.
    pub async fn fetch_league_table(&self, competition_id: &str) -> ApiResult<LeagueStandings> {
        self.fetch(
            &format!("competitions/{competition_id}/leagueTable"),
            LeagueStandings::decode,
        )
        .await
    }

    pub async fn fetch_team(&self, team_id: &str) -> ApiResult<Team> {
        self.fetch(&format!("teams/{team_id}"), decode::team).await
    }

    pub async fn fetch_team_fixtures(&self, team_id: &str) -> ApiResult<Vec<Fixture>> {
        self.fetch(&format!("teams/{team_id}/fixtures"), decode::fixtures)
            .await
    }

    /// Squad with ages and contract lengths as of today (local time).
    pub async fn fetch_players(&self, team_id: &str) -> ApiResult<Vec<Player>> {
        self.fetch_players_on(team_id, Local::now().date_naive()).await
    }

    pub async fn fetch_players_on(&self, team_id: &str, today: NaiveDate) -> ApiResult<Vec<Player>> {
        self.fetch(&format!("teams/{team_id}/players"), |value| {
            decode::players(value, today)
        })
        .await
    }

    /// Fixture with head-to-head history; the fixture itself is not among the
    /// previous meetings.
    pub async fn fetch_fixture(&self, fixture_id: &str) -> ApiResult<Fixture> {
        self.fetch(&format!("fixtures/{fixture_id}"), decode::fixture_detail)
            .await
    }

    pub async fn fetch_players_grouped(
        &self,
        team_id: &str,
        ranking: &PositionRanking,
    ) -> ApiResult<Vec<PositionGroup>> {
        let players = self.fetch_players(team_id).await?;
        Ok(grouping::group_players_by_position(players, ranking))
    }

    pub async fn fetch_fixture_schedule(&self, competition_id: &str) -> ApiResult<FixtureSchedule> {
        let fixtures = self.fetch_competition_fixtures(competition_id).await?;
        Ok(FixtureSchedule::from_fixtures(fixtures))
    }

    async fn fetch<T>(
        &self,
        path: &str,
        decode: impl FnOnce(&Value) -> DecodeResult<Option<T>>,
    ) -> ApiResult<T> {
        let url = self.url(path);
        let value = self.get_json(&url).await?;
        match decode(&value) {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => Err(ApiError::NotFound(url)),
            Err(e) => Err(ApiError::Decode(e, url)),
        }
    }

    async fn get_json(&self, url: &str) -> ApiResult<Value> {
        debug!("GET {url}");
        let mut request = self.client.get(url).timeout(self.config.timeout);
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTH_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_owned()));
        }

        match response.error_for_status() {
            Ok(res) => res
                .json::<Value>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;
    use serde_json::json;

    fn api_for(server: &mockito::Server, api_key: Option<&str>) -> FootballDataApi {
        FootballDataApi::new(ApiConfig {
            base_url: server.url(),
            api_key: api_key.map(str::to_owned),
            timeout: Duration::from_secs(5),
        })
    }

    fn fixture_json(id: u32, matchday: u32, status: &str) -> Value {
        json!({
            "_links": {
                "self": {"href": format!("http://api.football-data.org/v1/fixtures/{id}")},
                "competition": {"href": "http://api.football-data.org/v1/competitions/426"},
                "homeTeam": {"href": "http://api.football-data.org/v1/teams/57"},
                "awayTeam": {"href": "http://api.football-data.org/v1/teams/72"}
            },
            "date": "2016-10-15T14:00:00Z",
            "status": status,
            "matchday": matchday,
            "homeTeamName": "Arsenal FC",
            "awayTeamName": "Swansea City FC",
            "result": {"goalsHomeTeam": 3, "goalsAwayTeam": 2}
        })
    }

    #[test]
    fn config_reads_lookup_and_ignores_blanks() {
        let config = ApiConfig::from_lookup(|key| match key {
            BASE_URL_ENV => Some("http://localhost:9000/v1".into()),
            API_KEY_ENV => Some("   ".into()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.api_key, None);

        let defaults = ApiConfig::from_lookup(|_| None);
        assert_eq!(defaults, ApiConfig::default());
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let api = FootballDataApi::new(ApiConfig {
            base_url: "http://api.football-data.org/v1/".into(),
            ..ApiConfig::default()
        });
        assert_eq!(api.url("/teams/57"), "http://api.football-data.org/v1/teams/57");
    }

    #[tokio::test]
    async fn fetches_competitions_with_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/competitions/")
            .match_header("x-auth-token", "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"id": 426, "caption": "Premier League 2016/17", "league": "PL", "year": "2016"},
                    {"id": 430, "caption": "1. Bundesliga 2016/17", "league": "BL1", "year": "2016"}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let competitions = api_for(&server, Some("secret")).fetch_competitions().await.unwrap();
        mock.assert_async().await;
        let ids: Vec<&str> = competitions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["426", "430"]);
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/999")
            .with_status(404)
            .create_async()
            .await;

        let err = api_for(&server, None).fetch_team("999").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(url) if url.ends_with("/teams/999")));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/competitions/426")
            .with_status(500)
            .create_async()
            .await;

        let err = api_for(&server, None).fetch_competition("426").await.unwrap_err();
        assert!(matches!(err, ApiError::Api(..)));
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/57")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = api_for(&server, None).fetch_team("57").await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(..)));
    }

    #[tokio::test]
    async fn null_body_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/57")
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;

        let err = api_for(&server, None).fetch_team("57").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(..)));
    }

    #[tokio::test]
    async fn decode_failure_carries_url() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/57")
            .with_status(200)
            .with_body(json!({"name": "Arsenal FC"}).to_string())
            .create_async()
            .await;

        let err = api_for(&server, None).fetch_team("57").await.unwrap_err();
        match err {
            ApiError::Decode(DecodeError::MalformedLink { entity, relation }, url) => {
                assert_eq!((entity, relation), ("Team", "self"));
                assert!(url.ends_with("/teams/57"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn fixture_detail_excludes_itself_from_head_to_head() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "fixture": fixture_json(150766, 8, "FINISHED"),
            "head2head": {
                "count": 2,
                "homeTeamWins": 1,
                "awayTeamWins": 0,
                "draws": 1,
                "fixtures": [fixture_json(150766, 8, "FINISHED"), fixture_json(11, 20, "FINISHED")]
            }
        });
        let _mock = server
            .mock("GET", "/fixtures/150766")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let fixture = api_for(&server, None).fetch_fixture("150766").await.unwrap();
        assert_eq!(fixture.id, "150766");
        let h2h = fixture.head_to_head.unwrap();
        let ids: Vec<&str> = h2h.fixtures().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["11"]);
    }

    #[tokio::test]
    async fn players_use_the_given_day() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "count": 2,
            "players": [
                {
                    "name": "Shkodran Mustafi",
                    "position": "Centre Back",
                    "jerseyNumber": 20,
                    "dateOfBirth": "1992-04-17",
                    "nationality": "Germany",
                    "contractUntil": "2021-06-30",
                    "marketValue": "20,000,000 €"
                },
                null
            ]
        });
        let _mock = server
            .mock("GET", "/teams/57/players")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let today = NaiveDate::from_ymd_opt(2016, 10, 13).unwrap();
        let players = api_for(&server, None).fetch_players_on("57", today).await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].age, 24);
    }

    #[tokio::test]
    async fn fixture_schedule_splits_competition_fixtures() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "count": 3,
            "fixtures": [
                fixture_json(1, 1, "FINISHED"),
                fixture_json(2, 2, "FINISHED"),
                fixture_json(3, 3, "TIMED")
            ]
        });
        let _mock = server
            .mock("GET", "/competitions/426/fixtures")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let schedule = api_for(&server, None).fetch_fixture_schedule("426").await.unwrap();
        let results: Vec<u32> = schedule.results.iter().map(|d| d.number).collect();
        assert_eq!(results, vec![2, 1]);
        assert_eq!(schedule.upcoming.len(), 1);
    }

    #[tokio::test]
    async fn league_table_fetch_returns_groups() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "leagueCaption": "European Championships France 2016",
            "standings": {
                "A": [{"group": "A", "rank": 1, "team": "France", "teamId": 773, "playedGames": 3, "points": 7, "goals": 4, "goalsAgainst": 1}]
            }
        });
        let _mock = server
            .mock("GET", "/competitions/424/leagueTable")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let standings = api_for(&server, None).fetch_league_table("424").await.unwrap();
        assert!(standings.is_grouped());
    }
}
