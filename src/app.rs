use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use football_data_api::{
    Competition, Fixture, FixtureSchedule, LeagueStandings, PositionGroup, Team,
};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Competitions,
    Table,
    Fixtures,
    Squad,
    Match,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
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

    pub fn on_competitions_loaded(&mut self, competitions: Vec<Competition>) {
        self.state.last_error = None;
        self.state.competitions.load(competitions);
    }

    pub fn on_competition_loaded(
        &mut self,
        competition: Competition,
        standings: Option<LeagueStandings>,
        schedule: FixtureSchedule,
        teams: Vec<Team>,
    ) {
        self.state.last_error = None;
        self.state.table.load(competition, standings, teams);
        self.state.fixtures.load(schedule);
    }

    pub fn on_fixtures_refreshed(&mut self, competition_id: &str, schedule: FixtureSchedule) {
        // A refresh can race a switch to another competition.
        if self.state.current_competition_id() == Some(competition_id) {
            self.state.fixtures.refresh(schedule);
        }
    }

    pub fn on_squad_loaded(&mut self, team_id: String, team_name: String, groups: Vec<PositionGroup>) {
        self.state.last_error = None;
        let squad = &mut self.state.squad;
        squad.team_id = Some(team_id);
        squad.team_name = team_name;
        squad.groups = groups;
        squad.scroll_offset = 0;
    }

    pub fn on_fixture_loaded(&mut self, fixture: Fixture) {
        self.state.last_error = None;
        self.state.match_detail.fixture = Some(fixture);
        self.state.match_detail.scroll_offset = 0;
    }

    pub fn on_error(&mut self, message: String) {
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

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Selection: each returns what to load and switches tab as a side-effect
    // -----------------------------------------------------------------------

    pub fn select_competition(&mut self) -> Option<String> {
        let id = self.state.competitions.selected()?.id.clone();
        self.update_tab(MenuItem::Table);
        Some(id)
    }

    /// Returns (team_id, team_name) of the highlighted table row.
    pub fn select_team(&mut self) -> Option<(String, String)> {
        let standing = self.state.table.selected_standing()?;
        let selection = (standing.team_id.clone(), standing.team_name.clone());
        self.update_tab(MenuItem::Squad);
        Some(selection)
    }

    pub fn select_fixture(&mut self) -> Option<String> {
        let id = self.state.fixtures.selected_fixture()?.id.clone();
        self.update_tab(MenuItem::Match);
        Some(id)
    }

    pub fn move_down(&mut self) {
        match self.state.active_tab {
            MenuItem::Competitions => self.state.competitions.select_next(),
            MenuItem::Table => self.state.table.select_next(),
            MenuItem::Fixtures => self.state.fixtures.select_next(),
            MenuItem::Squad => {
                self.state.squad.scroll_offset = self.state.squad.scroll_offset.saturating_add(1)
            }
            MenuItem::Match => {
                self.state.match_detail.scroll_offset =
                    self.state.match_detail.scroll_offset.saturating_add(1)
            }
            MenuItem::Help => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.state.active_tab {
            MenuItem::Competitions => self.state.competitions.select_prev(),
            MenuItem::Table => self.state.table.select_prev(),
            MenuItem::Fixtures => self.state.fixtures.select_prev(),
            MenuItem::Squad => {
                self.state.squad.scroll_offset = self.state.squad.scroll_offset.saturating_sub(1)
            }
            MenuItem::Match => {
                self.state.match_detail.scroll_offset =
                    self.state.match_detail.scroll_offset.saturating_sub(1)
            }
            MenuItem::Help => {}
        }
    }
}
