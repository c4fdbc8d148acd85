use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request: Option<NetworkRequest> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Competitions),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Table),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Fixtures),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Squad),
        (_, Char('5'), _) => guard.update_tab(MenuItem::Match),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Movement within the active tab
        (_, Char('j') | KeyCode::Down, _) => guard.move_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.move_up(),

        // Drill down
        (MenuItem::Competitions, KeyCode::Enter, _) => {
            request = guard
                .select_competition()
                .map(|competition_id| NetworkRequest::LoadCompetition { competition_id });
        }
        (MenuItem::Table, KeyCode::Enter, _) => {
            request = guard
                .select_team()
                .map(|(team_id, team_name)| NetworkRequest::LoadSquad { team_id, team_name });
        }
        (MenuItem::Fixtures, KeyCode::Enter, _) => {
            request = guard
                .select_fixture()
                .map(|fixture_id| NetworkRequest::LoadFixture { fixture_id });
        }
        (MenuItem::Fixtures, KeyCode::Tab, _) => guard.state.fixtures.toggle_view(),

        // Back out
        (MenuItem::Table | MenuItem::Fixtures, KeyCode::Esc, _) => {
            guard.update_tab(MenuItem::Competitions)
        }
        (MenuItem::Squad, KeyCode::Esc, _) => guard.update_tab(MenuItem::Table),
        (MenuItem::Match, KeyCode::Esc, _) => guard.update_tab(MenuItem::Fixtures),

        // Global
        (_, Char('r'), _) => request = Some(NetworkRequest::RefreshFixtures),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
