//! Ordering and grouping of decoded entities for display.
//!
//! Every function here builds a fresh structure per call; nothing is cached
//! between calls.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{Fixture, Player};

/// Position names in the order a squad is listed, goalkeeper first.
pub const DEFAULT_POSITIONS: [&str; 11] = [
    "Keeper",
    "Centre Back",
    "Left-Back",
    "Right-Back",
    "Defensive Midfield",
    "Central Midfield",
    "Left Wing",
    "Right Wing",
    "Attacking Midfield",
    "Centre Forward",
    "Secondary Striker",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchday {
    pub number: u32,
    pub fixtures: Vec<Fixture>,
}

/// Fixtures bucketed by matchday, buckets ordered by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matchdays {
    days: Vec<Matchday>,
}

impl Matchdays {
    pub fn group(fixtures: impl IntoIterator<Item = Fixture>) -> Self {
        let mut days: Vec<Matchday> = Vec::new();
        let mut index: HashMap<u32, usize> = HashMap::new();

        for fixture in fixtures {
            match index.get(&fixture.matchday) {
                Some(&slot) => days[slot].fixtures.push(fixture),
                None => {
                    index.insert(fixture.matchday, days.len());
                    days.push(Matchday {
                        number: fixture.matchday,
                        fixtures: vec![fixture],
                    });
                }
            }
        }

        Self { days }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Matchday> {
        self.days.iter()
    }

    pub fn get(&self, number: u32) -> Option<&Matchday> {
        self.days.iter().find(|d| d.number == number)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn fixture_count(&self) -> usize {
        self.days.iter().map(|d| d.fixtures.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Matchdays {
    type Item = &'a Matchday;
    type IntoIter = std::slice::Iter<'a, Matchday>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Priority order for squad positions. Positions not listed sort after all
/// listed ones, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRanking {
    order: Vec<String>,
}

impl PositionRanking {
    pub fn new<I, S>(positions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: positions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rank(&self, position: &str) -> Option<usize> {
        self.order.iter().position(|p| p == position)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

impl Default for PositionRanking {
    fn default() -> Self {
        Self::new(DEFAULT_POSITIONS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGroup {
    pub position: String,
    pub players: Vec<Player>,
}

/// Group a squad by position, groups ordered by `ranking`. Players keep their
/// input order within a group.
pub fn group_players_by_position(
    players: impl IntoIterator<Item = Player>,
    ranking: &PositionRanking,
) -> Vec<PositionGroup> {
    let mut groups: Vec<PositionGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for player in players {
        match index.get(&player.position) {
            Some(&slot) => groups[slot].players.push(player),
            None => {
                index.insert(player.position.clone(), groups.len());
                groups.push(PositionGroup {
                    position: player.position.clone(),
                    players: vec![player],
                });
            }
        }
    }

    groups.sort_by(|a, b| ranking.compare(&a.position, &b.position));
    groups
}

/// A competition's or team's fixtures split into played and unplayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSchedule {
    /// Finished fixtures, most recent matchday first.
    pub results: Matchdays,
    /// Everything else, earliest matchday first.
    pub upcoming: Matchdays,
}

impl FixtureSchedule {
    pub fn from_fixtures(fixtures: impl IntoIterator<Item = Fixture>) -> Self {
        let (mut results, mut upcoming): (Vec<Fixture>, Vec<Fixture>) =
            fixtures.into_iter().partition(Fixture::is_finished);

        results.sort_by(|a, b| b.matchday.cmp(&a.matchday));
        upcoming.sort_by_key(|f| f.matchday);

        Self {
            results: Matchdays::group(results),
            upcoming: Matchdays::group(upcoming),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.upcoming.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerProfile;
    use chrono::{NaiveDate, TimeZone, Utc};

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

    fn player(name: &str, position: &str) -> Player {
        let today = NaiveDate::from_ymd_opt(2016, 10, 13).unwrap();
        Player::new(
            PlayerProfile {
                name: name.into(),
                position: position.into(),
                jersey_number: None,
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                nationality: "England".into(),
                contract_until: None,
                market_value: None,
            },
            today,
        )
    }

    fn ids(day: &Matchday) -> Vec<&str> {
        day.fixtures.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn matchdays_keep_first_appearance_order() {
        let days = Matchdays::group(vec![
            fixture("1", 3, "TIMED"),
            fixture("2", 1, "TIMED"),
            fixture("3", 3, "TIMED"),
            fixture("4", 2, "TIMED"),
            fixture("5", 1, "TIMED"),
        ]);
        let numbers: Vec<u32> = days.iter().map(|d| d.number).collect();
        assert_eq!(numbers, vec![3, 1, 2]);
        assert_eq!(ids(days.get(3).unwrap()), vec!["1", "3"]);
        assert_eq!(ids(days.get(1).unwrap()), vec!["2", "5"]);
        assert_eq!(days.fixture_count(), 5);
    }

    #[test]
    fn grouping_twice_starts_fresh() {
        let first = Matchdays::group(vec![fixture("1", 1, "TIMED")]);
        let second = Matchdays::group(vec![fixture("2", 1, "TIMED")]);
        assert_eq!(first.fixture_count(), 1);
        assert_eq!(ids(second.get(1).unwrap()), vec!["2"]);
    }

    #[test]
    fn empty_input_has_no_matchdays() {
        let days = Matchdays::group(Vec::new());
        assert!(days.is_empty());
        assert!(days.get(1).is_none());
    }

    #[test]
    fn players_grouped_by_default_ranking() {
        let groups = group_players_by_position(
            vec![
                player("Alexis Sánchez", "Left Wing"),
                player("Petr Čech", "Keeper"),
                player("Shkodran Mustafi", "Centre Back"),
                player("David Ospina", "Keeper"),
                player("Laurent Koscielny", "Centre Back"),
            ],
            &PositionRanking::default(),
        );
        let positions: Vec<&str> = groups.iter().map(|g| g.position.as_str()).collect();
        assert_eq!(positions, vec!["Keeper", "Centre Back", "Left Wing"]);

        let keepers: Vec<&str> = groups[0].players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(keepers, vec!["Petr Čech", "David Ospina"]);
    }

    #[test]
    fn unknown_positions_sort_last_alphabetically() {
        let groups = group_players_by_position(
            vec![
                player("A", "Sweeper"),
                player("B", "Libero"),
                player("C", "Centre Forward"),
            ],
            &PositionRanking::default(),
        );
        let positions: Vec<&str> = groups.iter().map(|g| g.position.as_str()).collect();
        assert_eq!(positions, vec!["Centre Forward", "Libero", "Sweeper"]);
    }

    #[test]
    fn ranking_is_injectable() {
        let ranking = PositionRanking::new(["Centre Forward", "Keeper"]);
        let groups = group_players_by_position(
            vec![player("A", "Keeper"), player("B", "Centre Forward")],
            &ranking,
        );
        assert_eq!(groups[0].position, "Centre Forward");
        assert_eq!(ranking.rank("Keeper"), Some(1));
        assert_eq!(ranking.rank("Left-Back"), None);
    }

    #[test]
    fn schedule_splits_results_and_upcoming() {
        let schedule = FixtureSchedule::from_fixtures(vec![
            fixture("1", 1, "FINISHED"),
            fixture("5", 9, "TIMED"),
            fixture("2", 2, "FINISHED"),
            fixture("4", 8, "SCHEDULED"),
            fixture("3", 2, "FINISHED"),
            fixture("6", 8, "IN_PLAY"),
        ]);

        let results: Vec<u32> = schedule.results.iter().map(|d| d.number).collect();
        assert_eq!(results, vec![2, 1]);
        assert_eq!(ids(schedule.results.get(2).unwrap()), vec!["2", "3"]);

        let upcoming: Vec<u32> = schedule.upcoming.iter().map(|d| d.number).collect();
        assert_eq!(upcoming, vec![8, 9]);
        assert_eq!(ids(schedule.upcoming.get(8).unwrap()), vec!["4", "6"]);
        assert!(!schedule.is_empty());
    }
}
