use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use football_data_api::{
    Competition, Fixture, FixtureSchedule, LeagueStandings, PositionGroup, Team,
};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadCompetitions,
    /// Competition header, league table, fixtures and teams in one go.
    LoadCompetition { competition_id: String },
    LoadSquad { team_id: String, team_name: String },
    LoadFixture { fixture_id: String },
    /// Re-fetch fixtures of the most recently loaded competition, if any.
    RefreshFixtures,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    CompetitionsLoaded { competitions: Vec<Competition> },
    CompetitionLoaded {
        competition: Competition,
        standings: Option<LeagueStandings>,
        schedule: FixtureSchedule,
        teams: Vec<Team>,
    },
    FixturesRefreshed { competition_id: String, schedule: FixtureSchedule },
    SquadLoaded { team_id: String, team_name: String, groups: Vec<PositionGroup> },
    FixtureLoaded { fixture: Fixture },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
