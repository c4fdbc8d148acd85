use football_data_api::Standing;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

use crate::state::app_state::TableState;

/// Fixed columns after the team name: P W D L GF:GA GD Pts.
const STATS_WIDTH: usize = 4 * 3 + 8 + 5 + 5;
/// Position column plus the selection marker.
const LEAD_WIDTH: usize = 2 + 3 + 1;
const MIN_NAME_WIDTH: usize = 8;

enum Entry<'a> {
    Group(&'a str),
    Row { standing: &'a Standing, name: &'a str },
}

/// Renders a league table, or group tables one after another, with the
/// selected row kept on screen.
pub struct StandingsView<'a> {
    entries: Vec<Entry<'a>>,
    selected: usize,
}

impl<'a> StandingsView<'a> {
    pub fn new(state: &'a TableState) -> Self {
        let mut entries = Vec::new();
        if let Some(standings) = &state.standings {
            for (group, table) in standings.tables() {
                if let Some(group) = group {
                    entries.push(Entry::Group(group));
                }
                for standing in table.standings() {
                    entries.push(Entry::Row { standing, name: state.display_name(standing) });
                }
            }
        }
        Self { entries, selected: state.selected }
    }

    /// Index into `entries` of the selected standing.
    fn selected_entry(&self) -> usize {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, Entry::Row { .. }))
            .nth(self.selected)
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }
}

impl<'a> Widget for StandingsView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < 20 {
            return;
        }

        let width = area.width as usize;
        let name_width = width.saturating_sub(LEAD_WIDTH + STATS_WIDTH).max(MIN_NAME_WIDTH);
        let dim = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);
        buf.set_stringn(area.x, area.y, format_header(name_width), width, dim);

        let body_rows = (area.height - 1) as usize;
        let selected_entry = self.selected_entry();
        let offset = (selected_entry + 1).saturating_sub(body_rows);

        let mut row_idx = 0usize;
        for (entry_idx, entry) in self.entries.iter().enumerate() {
            if let Entry::Row { .. } = entry {
                row_idx += 1;
            }
            if entry_idx < offset || entry_idx >= offset + body_rows {
                continue;
            }
            let y = area.y + 1 + (entry_idx - offset) as u16;

            match entry {
                Entry::Group(name) => {
                    let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
                    buf.set_stringn(area.x, y, group_label(name), width, style);
                }
                Entry::Row { standing, name } => {
                    let selected = row_idx - 1 == self.selected;
                    let marker = if selected { '>' } else { ' ' };
                    let style = if selected {
                        Style::default().fg(Color::Black).bg(Color::White)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let line = format!("{marker} {}", format_standing_row(standing, name, name_width));
                    buf.set_stringn(area.x, y, line, width, style);
                }
            }
        }
    }
}

/// "A" becomes "Group A"; names that already say "Group" are kept.
pub fn group_label(name: &str) -> String {
    if name.to_ascii_lowercase().starts_with("group") {
        name.to_string()
    } else {
        format!("Group {name}")
    }
}

pub fn format_header(name_width: usize) -> String {
    format!(
        "  {:>3} {:<name_width$}{:>3}{:>3}{:>3}{:>3}{:>8}{:>5}{:>5}",
        "#", "Team", "P", "W", "D", "L", "Goals", "GD", "Pts"
    )
}

pub fn format_standing_row(standing: &Standing, name: &str, name_width: usize) -> String {
    let name: String = name.chars().take(name_width.saturating_sub(1)).collect();
    let goals = format!("{}:{}", standing.form.goals_for, standing.form.goals_against);
    format!(
        "{:>3} {:<name_width$}{:>3}{:>3}{:>3}{:>3}{:>8}{:>5}{:>5}",
        standing.position,
        name,
        standing.played_games,
        standing.form.wins,
        standing.form.draws,
        standing.form.losses,
        goals,
        format_goal_difference(standing.goal_difference()),
        standing.points,
    )
}

fn format_goal_difference(diff: i64) -> String {
    if diff > 0 { format!("+{diff}") } else { diff.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use football_data_api::{Competition, LeagueStandings, LeagueTable, TeamForm};
    use std::collections::BTreeMap;

    fn standing(team_id: &str, name: &str, position: u32, goals_for: u32, goals_against: u32) -> Standing {
        Standing {
            team_id: team_id.into(),
            team_name: name.into(),
            crest_uri: None,
            position,
            played_games: 7,
            goals: goals_for,
            points: 18,
            form: TeamForm { wins: 6, draws: 0, losses: 1, goals_for, goals_against },
            home: None,
            away: None,
        }
    }

    fn table_state(standings: LeagueStandings, selected: usize) -> TableState {
        let mut state = TableState::default();
        state.load(
            Competition {
                id: "426".into(),
                name: "Premier League 2016/17".into(),
                year: 2016,
                league: None,
                current_matchday: None,
                number_of_matchdays: None,
                number_of_teams: None,
                number_of_games: None,
            },
            Some(standings),
            Vec::new(),
        );
        state.selected = selected;
        state
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn row_has_fixed_width() {
        let row = format_standing_row(&standing("65", "Manchester City FC", 1, 18, 7), "Manchester City FC", 20);
        assert_eq!(row.chars().count(), 4 + 20 + STATS_WIDTH);
        assert!(row.contains("18:7"));
        assert!(row.contains("+11"));
    }

    #[test]
    fn long_names_are_clipped() {
        let row = format_standing_row(&standing("1", "x", 1, 0, 0), "Borussia Mönchengladbach", 10);
        assert!(row.contains("Borussia "));
        assert!(!row.contains("Mönchengladbach"));
    }

    #[test]
    fn goal_difference_signs() {
        assert_eq!(format_goal_difference(11), "+11");
        assert_eq!(format_goal_difference(0), "0");
        assert_eq!(format_goal_difference(-4), "-4");
    }

    #[test]
    fn group_labels() {
        assert_eq!(group_label("A"), "Group A");
        assert_eq!(group_label("Group B"), "Group B");
    }

    #[test]
    fn renders_selected_row_marker() {
        let state = table_state(
            LeagueStandings::League(LeagueTable::new(vec![
                standing("65", "Manchester City FC", 1, 18, 7),
                standing("57", "Arsenal FC", 2, 17, 8),
            ])),
            1,
        );
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buffer::empty(area);
        StandingsView::new(&state).render(area, &mut buf);

        assert!(line(&buf, 0).contains("Pts"));
        assert!(line(&buf, 1).starts_with("    1 Manchester City FC"));
        assert!(line(&buf, 2).starts_with(">   2 Arsenal FC"));
    }

    #[test]
    fn scrolls_to_keep_selection_visible_across_groups() {
        let mut groups = BTreeMap::new();
        groups.insert("A".to_string(), LeagueTable::new(vec![standing("773", "France", 1, 4, 1)]));
        groups.insert("B".to_string(), LeagueTable::new(vec![standing("833", "Wales", 1, 6, 3)]));
        let state = table_state(LeagueStandings::Groups(groups), 1);

        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        StandingsView::new(&state).render(area, &mut buf);

        assert!(line(&buf, 1).starts_with("Group B"));
        assert!(line(&buf, 2).starts_with(">   1 Wales"));
    }
}
