use crate::app::MenuItem;
use football_data_api::{
    Competition, Fixture, FixtureSchedule, LeagueStandings, Matchdays, PositionGroup, Standing,
    Team,
};

// ---------------------------------------------------------------------------
// Competitions list
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CompetitionsState {
    pub competitions: Vec<Competition>,
    pub selected: usize,
}

impl CompetitionsState {
    pub fn load(&mut self, competitions: Vec<Competition>) {
        self.competitions = competitions;
        self.selected = self.selected.min(self.competitions.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.competitions.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected(&self) -> Option<&Competition> {
        self.competitions.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// League table
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TableState {
    pub competition: Option<Competition>,
    /// `None` while loading, or when the competition publishes no table.
    pub standings: Option<LeagueStandings>,
    pub teams: Vec<Team>,
    pub selected: usize,
}

impl TableState {
    pub fn load(
        &mut self,
        competition: Competition,
        standings: Option<LeagueStandings>,
        teams: Vec<Team>,
    ) {
        self.competition = Some(competition);
        self.standings = standings;
        self.teams = teams;
        self.selected = 0;
    }

    /// Every standing in display order; group tables follow one another.
    pub fn rows(&self) -> Vec<&Standing> {
        self.standings
            .as_ref()
            .map(|s| {
                s.tables()
                    .into_iter()
                    .flat_map(|(_, table)| table.standings())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_standing(&self) -> Option<&Standing> {
        self.rows().get(self.selected).copied()
    }

    /// Short name from the competition's team list, falling back to the table's name.
    pub fn display_name<'a>(&'a self, standing: &'a Standing) -> &'a str {
        self.teams
            .iter()
            .find(|t| t.id == standing.team_id)
            .map(|t| t.short_name.as_str())
            .unwrap_or(standing.team_name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FixtureView {
    Results,
    #[default]
    Upcoming,
}

#[derive(Debug, Default)]
pub struct FixturesState {
    pub schedule: FixtureSchedule,
    pub view: FixtureView,
    pub selected: usize,
}

impl FixturesState {
    pub fn load(&mut self, schedule: FixtureSchedule) {
        self.view = if schedule.upcoming.is_empty() {
            FixtureView::Results
        } else {
            FixtureView::Upcoming
        };
        self.schedule = schedule;
        self.selected = 0;
    }

    /// Swap in a refreshed schedule, keeping the selected fixture when it still exists.
    pub fn refresh(&mut self, schedule: FixtureSchedule) {
        let selected_id = self.selected_fixture().map(|f| f.id.clone());
        self.schedule = schedule;
        self.selected = selected_id
            .and_then(|id| self.visible_fixtures().iter().position(|f| f.id == id))
            .unwrap_or(0);
    }

    pub fn matchdays(&self) -> &Matchdays {
        match self.view {
            FixtureView::Results => &self.schedule.results,
            FixtureView::Upcoming => &self.schedule.upcoming,
        }
    }

    pub fn visible_fixtures(&self) -> Vec<&Fixture> {
        self.matchdays()
            .iter()
            .flat_map(|day| day.fixtures.iter())
            .collect()
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            FixtureView::Results => FixtureView::Upcoming,
            FixtureView::Upcoming => FixtureView::Results,
        };
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_fixtures().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_fixture(&self) -> Option<&Fixture> {
        self.visible_fixtures().get(self.selected).copied()
    }
}

// ---------------------------------------------------------------------------
// Squad and match detail
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SquadState {
    pub team_id: Option<String>,
    pub team_name: String,
    pub groups: Vec<PositionGroup>,
    pub scroll_offset: u16,
}

impl SquadState {
    pub fn player_count(&self) -> usize {
        self.groups.iter().map(|g| g.players.len()).sum()
    }
}

#[derive(Debug, Default)]
pub struct MatchState {
    pub fixture: Option<Fixture>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub competitions: CompetitionsState,
    pub table: TableState,
    pub fixtures: FixturesState,
    pub squad: SquadState,
    pub match_detail: MatchState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the competition whose table and fixtures are on screen.
    pub fn current_competition_id(&self) -> Option<&str> {
        self.table.competition.as_ref().map(|c| c.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use football_data_api::{LeagueTable, TeamForm};
    use std::collections::BTreeMap;

    fn competition(id: &str) -> Competition {
        Competition {
            id: id.into(),
            name: format!("Competition {id}"),
            year: 2016,
            league: None,
            current_matchday: None,
            number_of_matchdays: None,
            number_of_teams: None,
            number_of_games: None,
        }
    }

    fn standing(team_id: &str, position: u32) -> Standing {
        Standing {
            team_id: team_id.into(),
            team_name: format!("{team_id} FC"),
            crest_uri: None,
            position,
            played_games: 3,
            goals: 4,
            points: 6,
            form: TeamForm::default(),
            home: None,
            away: None,
        }
    }

    fn fixture(id: &str, matchday: u32, status: &str) -> Fixture {
        Fixture {
            id: id.into(),
            competition_id: "426".into(),
            kickoff: Utc.with_ymd_and_hms(2016, 10, 15, 14, 0, 0).unwrap(),
            date: "15/10/2016".into(),
            status: status.into(),
            home_team_name: "Arsenal FC".into(),
            home_team_id: "57".into(),
            away_team_name: "Swansea City FC".into(),
            away_team_id: "72".into(),
            result: None,
            head_to_head: None,
            matchday,
        }
    }

    #[test]
    fn competition_selection_is_clamped() {
        let mut state = CompetitionsState::default();
        state.load(vec![competition("424"), competition("426")]);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected().map(|c| c.id.as_str()), Some("426"));

        state.load(vec![competition("430")]);
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected().map(|c| c.id.as_str()), Some("430"));
    }

    #[test]
    fn grouped_table_rows_follow_group_order() {
        let mut groups = BTreeMap::new();
        groups.insert("B".to_string(), LeagueTable::new(vec![standing("wal", 1)]));
        groups.insert(
            "A".to_string(),
            LeagueTable::new(vec![standing("sui", 2), standing("fra", 1)]),
        );

        let mut table = TableState::default();
        table.load(competition("424"), Some(LeagueStandings::Groups(groups)), Vec::new());

        let ids: Vec<&str> = table.rows().iter().map(|s| s.team_id.as_str()).collect();
        assert_eq!(ids, vec!["fra", "sui", "wal"]);

        table.select_next();
        table.select_next();
        table.select_next();
        assert_eq!(table.selected_standing().map(|s| s.team_id.as_str()), Some("wal"));
    }

    #[test]
    fn table_prefers_team_short_name() {
        let mut table = TableState::default();
        let team = Team {
            id: "57".into(),
            name: "Arsenal FC".into(),
            short_name: "Arsenal".into(),
            code: None,
            market_value: None,
            crest_url: None,
        };
        table.load(
            competition("426"),
            Some(LeagueStandings::League(LeagueTable::new(vec![standing("57", 1), standing("65", 2)]))),
            vec![team],
        );
        let rows = table.rows();
        assert_eq!(table.display_name(rows[0]), "Arsenal");
        assert_eq!(table.display_name(rows[1]), "65 FC");
    }

    #[test]
    fn fixtures_default_to_results_when_nothing_upcoming() {
        let mut fixtures = FixturesState::default();
        fixtures.load(FixtureSchedule::from_fixtures(vec![fixture("1", 1, "FINISHED")]));
        assert_eq!(fixtures.view, FixtureView::Results);

        fixtures.load(FixtureSchedule::from_fixtures(vec![
            fixture("1", 1, "FINISHED"),
            fixture("2", 2, "TIMED"),
        ]));
        assert_eq!(fixtures.view, FixtureView::Upcoming);
        assert_eq!(fixtures.selected_fixture().map(|f| f.id.as_str()), Some("2"));

        fixtures.toggle_view();
        assert_eq!(fixtures.selected_fixture().map(|f| f.id.as_str()), Some("1"));
    }

    #[test]
    fn refresh_keeps_selected_fixture() {
        let mut fixtures = FixturesState::default();
        fixtures.load(FixtureSchedule::from_fixtures(vec![
            fixture("3", 9, "TIMED"),
            fixture("4", 10, "TIMED"),
        ]));
        fixtures.select_next();
        assert_eq!(fixtures.selected_fixture().map(|f| f.id.as_str()), Some("4"));

        fixtures.refresh(FixtureSchedule::from_fixtures(vec![
            fixture("3", 9, "FINISHED"),
            fixture("4", 10, "TIMED"),
        ]));
        assert_eq!(fixtures.selected_fixture().map(|f| f.id.as_str()), Some("4"));
    }
}
