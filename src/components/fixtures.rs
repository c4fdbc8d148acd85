use football_data_api::{DISPLAY_DATE_FORMAT, Fixture, HeadToHead, MatchResult};

const STATUS_IN_PLAY: &str = "IN_PLAY";
const STATUS_PAUSED: &str = "PAUSED";

/// Whether the fixture's result block holds a real score yet.
pub fn has_score(fixture: &Fixture) -> bool {
    fixture.result.is_some()
        && (fixture.is_finished() || fixture.status == STATUS_IN_PLAY || fixture.status == STATUS_PAUSED)
}

/// "3 - 2" once a score exists, otherwise the UTC kickoff time.
pub fn score_label(fixture: &Fixture) -> String {
    match fixture.result {
        Some(MatchResult { home_goals, away_goals, .. }) if has_score(fixture) => {
            format!("{home_goals} - {away_goals}")
        }
        _ => fixture.kickoff.format("%H:%M").to_string(),
    }
}

pub fn half_time_label(fixture: &Fixture) -> Option<String> {
    let result = fixture.result.filter(|_| fixture.is_finished())?;
    Some(format!(
        "HT {} - {}",
        result.halftime_home_goals, result.halftime_away_goals
    ))
}

/// One line of a fixture list: date, home team, score, away team, status.
pub fn fixture_line(fixture: &Fixture, team_width: usize) -> String {
    let home: String = fixture.home_team_name.chars().take(team_width).collect();
    let away: String = fixture.away_team_name.chars().take(team_width).collect();
    format!(
        "{}  {:>team_width$} {:^7} {:<team_width$}  {}",
        fixture.date,
        home,
        score_label(fixture),
        away,
        fixture.status
    )
}

/// "Arsenal FC 4 wins, Swansea City FC 0 wins, 1 draw"
pub fn head_to_head_summary(fixture: &Fixture, h2h: &HeadToHead) -> String {
    format!(
        "{} {} {}, {} {} {}, {} {}",
        fixture.home_team_name,
        h2h.home_team_wins,
        plural(h2h.home_team_wins, "win", "wins"),
        fixture.away_team_name,
        h2h.away_team_wins,
        plural(h2h.away_team_wins, "win", "wins"),
        h2h.draws,
        plural(h2h.draws, "draw", "draws"),
    )
}

/// "01/01/2014 to 15/10/2016" when the API reported both ends of the window.
pub fn time_frame_label(h2h: &HeadToHead) -> Option<String> {
    let (start, end) = (h2h.time_frame_start?, h2h.time_frame_end?);
    Some(format!(
        "{} to {}",
        start.format(DISPLAY_DATE_FORMAT),
        end.format(DISPLAY_DATE_FORMAT)
    ))
}

fn plural(count: u32, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}
