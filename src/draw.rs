use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::fixtures::{
    fixture_line, half_time_label, head_to_head_summary, score_label, time_frame_label,
};
use crate::components::standings::StandingsView;
use crate::state::app_state::FixtureView;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use football_data_api::Fixture;

static TABS: &[&str; 5] = &["Competitions", "Table", "Fixtures", "Squad", "Match"];

const HELP_TEXT: &str = "q=quit  1-5=tabs  j/k=move  Enter=open  Esc=back  Tab=results/upcoming  r=refresh  f=full screen  \"=logs";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Competitions => draw_competitions(f, layout.main, app),
            MenuItem::Table => draw_table(f, layout.main, app),
            MenuItem::Fixtures => draw_fixtures(f, layout.main, app),
            MenuItem::Squad => draw_squad(f, layout.main, app),
            MenuItem::Match => draw_match(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Competitions => 0,
        MenuItem::Table => 1,
        MenuItem::Fixtures => 2,
        MenuItem::Squad => 3,
        MenuItem::Match => 4,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// Message shown in place of content that has not arrived yet.
fn pending_message(app: &App, what: &str, hint: &str) -> String {
    match app.state.last_error.as_deref() {
        Some(err) => format!("{what} failed to load:\n{err}"),
        None => hint.to_string(),
    }
}

fn draw_competitions(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Competitions ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let competitions = &app.state.competitions;
    if competitions.competitions.is_empty() {
        let msg = pending_message(app, "Competitions", "Loading competitions...");
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines = Vec::with_capacity(competitions.competitions.len() + 2);
    lines.push(Line::from(Span::styled(
        "j/k to move, Enter to open",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    for (idx, competition) in competitions.competitions.iter().enumerate() {
        let selected = idx == competitions.selected;
        let marker = if selected { ">" } else { " " };
        let matchday = match (competition.current_matchday, competition.number_of_matchdays) {
            (Some(current), Some(total)) => format!("matchday {current}/{total}"),
            (Some(current), None) => format!("matchday {current}"),
            _ => String::new(),
        };
        let text = format!(
            "{marker} {:<5} {:<40} {:>4}  {matchday}",
            competition.league.as_deref().unwrap_or(""),
            competition.name,
            competition.year
        );
        let style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let visible = inner.height as usize;
    let offset = (competitions.selected + 3).saturating_sub(visible);
    f.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), inner);
}

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
    let table = &app.state.table;
    let title = table
        .competition
        .as_ref()
        .map(|c| format!(" {} ", c.name))
        .unwrap_or_else(|| " Table ".to_string());
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(competition) = table.competition.as_ref() else {
        let msg = pending_message(app, "Competition", "Pick a competition on the Competitions tab");
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    if table.standings.is_none() {
        f.render_widget(
            Paragraph::new(format!("{} has no league table", competition.name))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("j/k to move, Enter for squad")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );
    f.render_widget(StandingsView::new(table), content);
}

fn draw_fixtures(f: &mut Frame, area: Rect, app: &App) {
    let fixtures = &app.state.fixtures;
    let block = default_border(Color::White).title(" Fixtures ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.table.competition.is_none() {
        let msg = pending_message(app, "Fixtures", "Pick a competition on the Competitions tab");
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let active = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(Color::DarkGray);
    let (results_style, upcoming_style) = match fixtures.view {
        FixtureView::Results => (active, idle),
        FixtureView::Upcoming => (idle, active),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Results ({})", fixtures.schedule.results.fixture_count()),
                results_style,
            ),
            Span::raw("  |  "),
            Span::styled(
                format!("Upcoming ({})", fixtures.schedule.upcoming.fixture_count()),
                upcoming_style,
            ),
            Span::styled("   Tab to switch, Enter for detail", idle),
        ]),
        Line::from(""),
    ];

    let team_width = (inner.width as usize).saturating_sub(40).max(12) / 2;
    let mut selected_line = 0usize;
    let mut fixture_idx = 0usize;

    for matchday in fixtures.matchdays() {
        lines.push(Line::from(Span::styled(
            format!("Matchday {}", matchday.number),
            Style::default().fg(Color::Cyan),
        )));
        for fixture in &matchday.fixtures {
            let selected = fixture_idx == fixtures.selected;
            if selected {
                selected_line = lines.len();
            }
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{marker} {}", fixture_line(fixture, team_width)),
                style,
            )));
            fixture_idx += 1;
        }
    }

    if fixture_idx == 0 {
        lines.push(Line::from(Span::styled("No fixtures", idle)));
    }

    let visible = inner.height as usize;
    let offset = (selected_line + 1).saturating_sub(visible);
    f.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), inner);
}

fn draw_squad(f: &mut Frame, area: Rect, app: &App) {
    let squad = &app.state.squad;
    let title = if squad.team_name.is_empty() {
        " Squad ".to_string()
    } else {
        format!(" {} ({} players) ", squad.team_name, squad.player_count())
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if squad.team_id.is_none() {
        let msg = pending_message(app, "Squad", "Select a team in the Table tab and press Enter");
        f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)), inner);
        return;
    }

    let mut lines = Vec::new();
    for group in &squad.groups {
        lines.push(Line::from(Span::styled(
            group.position.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for player in &group.players {
            let jersey = player
                .jersey_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            let contract = match (&player.contract_until, &player.contract_duration) {
                (Some(until), Some(years)) => format!("until {until} ({years} yrs)"),
                _ => "no contract data".to_string(),
            };
            lines.push(Line::from(format!(
                "  {:>3}  {:<28} {:>3}  {:<10}  {:<16}  {:<28}  {}",
                jersey,
                player.name,
                player.age,
                player.dob,
                player.nationality,
                contract,
                player.market_value.as_deref().unwrap_or("")
            )));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).scroll((squad.scroll_offset, 0)),
        inner,
    );
}

fn draw_match(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Match ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(fixture) = app.state.match_detail.fixture.as_ref() else {
        let msg = pending_message(app, "Match", "Select a fixture in the Fixtures tab and press Enter");
        f.render_widget(Paragraph::new(msg), inner);
        return;
    };

    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{}  {}  {}",
                fixture.home_team_name,
                score_label(fixture),
                fixture.away_team_name
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Matchday {}  |  {} {} UTC  |  {}{}",
                fixture.matchday,
                fixture.date,
                fixture.kickoff.format("%H:%M"),
                fixture.status,
                half_time_label(fixture)
                    .map(|ht| format!("  |  {ht}"))
                    .unwrap_or_default()
            ),
            dim,
        )),
        Line::from(""),
    ];

    match fixture.head_to_head.as_deref() {
        None => lines.push(Line::from(Span::styled("No head-to-head history", dim))),
        Some(h2h) => {
            lines.push(Line::from(Span::styled(
                format!("Head to head ({} meetings)", h2h.count),
                Style::default().fg(Color::Cyan),
            )));
            lines.push(Line::from(head_to_head_summary(fixture, h2h)));
            if let Some(frame) = time_frame_label(h2h) {
                lines.push(Line::from(Span::styled(frame, dim)));
            }
            lines.push(Line::from(""));

            let last = [
                (format!("Last home win, {}", fixture.home_team_name), &h2h.last_home_win_home_team),
                (format!("Last win, {}", fixture.home_team_name), &h2h.last_win_home_team),
                (format!("Last away win, {}", fixture.away_team_name), &h2h.last_away_win_away_team),
                (format!("Last win, {}", fixture.away_team_name), &h2h.last_win_away_team),
            ];
            for (label, previous) in last {
                if let Some(previous) = previous {
                    lines.push(Line::from(format!("{label}: {}", meeting_line(previous))));
                }
            }

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Previous meetings (j/k scroll)",
                Style::default().fg(Color::Cyan),
            )));
            for previous in h2h.fixtures() {
                lines.push(Line::from(format!("  {}", meeting_line(previous))));
            }
        }
    }

    f.render_widget(
        Paragraph::new(lines).scroll((app.state.match_detail.scroll_offset, 0)),
        inner,
    );
}

fn meeting_line(fixture: &Fixture) -> String {
    format!(
        "{}  {} {} {}",
        fixture.date,
        fixture.home_team_name,
        score_label(fixture),
        fixture.away_team_name
    )
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
