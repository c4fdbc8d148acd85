pub mod client;
pub mod decode;
pub mod error;
pub mod grouping;
pub mod league_table;
pub mod links;
pub mod wire;

pub use error::{ApiError, ApiResult, DecodeError, DecodeResult};
pub use grouping::{FixtureSchedule, Matchday, Matchdays, PositionGroup, PositionRanking};
pub use league_table::LeagueStandings;

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Format used for every user-facing date: `17/04/1992`.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Status token for a fixture that has been played out.
pub const STATUS_FINISHED: &str = "FINISHED";

// ---------------------------------------------------------------------------
// Domain types, independent of the football-data wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub year: u16,
    pub league: Option<String>, // "PL", "BL1", "EC"
    pub current_matchday: Option<u32>,
    pub number_of_matchdays: Option<u32>,
    pub number_of_teams: Option<u32>,
    pub number_of_games: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Always the trailing segment of the team's `self` link.
    pub id: String,
    pub name: String,                 // "Arsenal FC"
    pub short_name: String,           // "Arsenal"
    pub code: Option<String>,         // "AFC"
    pub market_value: Option<String>, // "468,500,000 €"
    pub crest_url: Option<String>,
}

/// Remaining contract length, rendered as the API's consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractDuration {
    /// Less than a full year left, including contracts that already ran out.
    UnderOneYear,
    Years(u32),
}

impl ContractDuration {
    pub fn between(today: NaiveDate, contract_until: NaiveDate) -> Self {
        match contract_until.years_since(today) {
            Some(years) if years >= 1 => ContractDuration::Years(years),
            _ => ContractDuration::UnderOneYear,
        }
    }
}

impl fmt::Display for ContractDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractDuration::UnderOneYear => write!(f, "< 1"),
            ContractDuration::Years(years) => write!(f, "{years}"),
        }
    }
}

/// Whole years elapsed between `date_of_birth` and `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(date_of_birth).unwrap_or(0)
}

/// Player fields as they arrive from the API, before derived values exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: String,
    pub position: String,
    pub jersey_number: Option<u32>,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
    pub contract_until: Option<NaiveDate>,
    pub market_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub position: String, // "Keeper", "Centre Back", ...
    pub jersey_number: Option<u32>,
    pub date_of_birth: NaiveDate,
    pub dob: String, // display form of date_of_birth
    pub age: u32,
    pub nationality: String,
    pub contract_until_date: Option<NaiveDate>,
    pub contract_until: Option<String>, // display form of contract_until_date
    pub contract_duration: Option<ContractDuration>,
    pub market_value: Option<String>,
}

impl Player {
    /// Build a player, deriving age and contract length relative to `today`.
    pub fn new(profile: PlayerProfile, today: NaiveDate) -> Self {
        let PlayerProfile {
            name,
            position,
            jersey_number,
            date_of_birth,
            nationality,
            contract_until,
            market_value,
        } = profile;

        Self {
            name,
            position,
            jersey_number,
            dob: date_of_birth.format(DISPLAY_DATE_FORMAT).to_string(),
            age: age_on(date_of_birth, today),
            date_of_birth,
            nationality,
            contract_until: contract_until.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string()),
            contract_duration: contract_until.map(|d| ContractDuration::between(today, d)),
            contract_until_date: contract_until,
            market_value,
        }
    }
}

/// Final (or current) score of a fixture. Unset counts are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub home_goals: u32,
    pub away_goals: u32,
    pub halftime_home_goals: u32,
    pub halftime_away_goals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub id: String,
    pub competition_id: String,
    pub kickoff: DateTime<Utc>,
    pub date: String, // kickoff formatted with DISPLAY_DATE_FORMAT
    /// Opaque API token: "FINISHED", "TIMED", "SCHEDULED", "IN_PLAY", ...
    pub status: String,
    pub home_team_name: String,
    pub home_team_id: String,
    pub away_team_name: String,
    pub away_team_id: String,
    pub result: Option<MatchResult>,
    pub head_to_head: Option<Box<HeadToHead>>,
    pub matchday: u32,
}

impl Fixture {
    pub fn is_finished(&self) -> bool {
        self.status == STATUS_FINISHED
    }

    /// Attach head-to-head history, dropping this fixture from its list.
    pub fn with_head_to_head(mut self, head_to_head: HeadToHead) -> Self {
        self.head_to_head = Some(Box::new(head_to_head.without_fixture(&self.id)));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadToHead {
    pub count: u32,
    pub time_frame_start: Option<NaiveDate>,
    pub time_frame_end: Option<NaiveDate>,
    pub home_team_wins: u32,
    pub away_team_wins: u32,
    pub draws: u32,
    pub last_home_win_home_team: Option<Fixture>,
    pub last_win_home_team: Option<Fixture>,
    pub last_away_win_away_team: Option<Fixture>,
    pub last_win_away_team: Option<Fixture>,
    fixtures: Vec<Fixture>,
}

impl HeadToHead {
    pub fn new(
        count: u32,
        time_frame: (Option<NaiveDate>, Option<NaiveDate>),
        home_team_wins: u32,
        away_team_wins: u32,
        draws: u32,
        last_fixtures: [Option<Fixture>; 4],
        fixtures: Vec<Fixture>,
    ) -> Self {
        let [last_home_win_home_team, last_win_home_team, last_away_win_away_team, last_win_away_team] =
            last_fixtures;
        Self {
            count,
            time_frame_start: time_frame.0,
            time_frame_end: time_frame.1,
            home_team_wins,
            away_team_wins,
            draws,
            last_home_win_home_team,
            last_win_home_team,
            last_away_win_away_team,
            last_win_away_team,
            fixtures,
        }
    }

    /// Previous meetings, in API order.
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Remove the meeting with `fixture_id` (the fixture being viewed).
    pub fn without_fixture(mut self, fixture_id: &str) -> Self {
        self.fixtures.retain(|f| f.id != fixture_id);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamForm {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamForm {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub team_id: String,
    pub team_name: String,
    pub crest_uri: Option<String>,
    pub position: u32, // 1-based rank
    pub played_games: u32,
    pub goals: u32,
    pub points: u32,
    pub form: TeamForm,
    pub home: Option<TeamForm>, // None for cup group tables
    pub away: Option<TeamForm>,
}

impl Standing {
    pub fn goal_difference(&self) -> i64 {
        self.form.goal_difference()
    }
}

/// Standings ordered by table position. The order is fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueTable {
    standings: Vec<Standing>,
}

impl LeagueTable {
    pub fn new(mut standings: Vec<Standing>) -> Self {
        standings.sort_by_key(|s| s.position);
        Self { standings }
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn len(&self) -> usize {
        self.standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    pub fn into_standings(self) -> Vec<Standing> {
        self.standings
    }
}
