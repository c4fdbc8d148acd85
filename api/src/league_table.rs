//! `competitions/{id}/leagueTable` decoding.
//!
//! League competitions answer with one flat `standing` list; cup competitions
//! answer with `standings`, a map of group name to that group's records. The
//! two record shapes differ, so each has its own decoder.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::decode::{self, FieldCheck, STANDING};
use crate::error::{DecodeError, DecodeResult};
use crate::wire::{self, LeagueTableEnvelope, RawGroupStanding};
use crate::{LeagueTable, Standing};

const LEAGUE_TABLE: &str = "LeagueTable";
const GROUP_STANDING: &str = "GroupStanding";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeagueStandings {
    /// One table for the whole competition.
    League(LeagueTable),
    /// One table per group, keyed by group name ("A", "B", ...).
    Groups(BTreeMap<String, LeagueTable>),
}

impl LeagueStandings {
    /// Decode a league-table payload of either shape.
    ///
    /// `standings` wins when both keys are present; a payload with neither is
    /// [`DecodeError::ShapeAmbiguity`].
    pub fn decode(value: &Value) -> DecodeResult<Option<Self>> {
        let Some(envelope) = wire::parse::<LeagueTableEnvelope>(LEAGUE_TABLE, value)? else {
            return Ok(None);
        };

        if let Some(groups) = envelope.standings {
            let mut tables = BTreeMap::new();
            for (group, records) in groups {
                let standings = decode::decode_all(GROUP_STANDING, records, group_standing_from)?;
                tables.insert(group, LeagueTable::new(standings));
            }
            return Ok(Some(LeagueStandings::Groups(tables)));
        }

        if let Some(records) = envelope.standing {
            let standings = decode::decode_all(STANDING, records, decode::standing_from)?;
            return Ok(Some(LeagueStandings::League(LeagueTable::new(standings))));
        }

        Err(DecodeError::ShapeAmbiguity)
    }

    /// Every table in display order: the single league table, or each group.
    pub fn tables(&self) -> Vec<(Option<&str>, &LeagueTable)> {
        match self {
            LeagueStandings::League(table) => vec![(None, table)],
            LeagueStandings::Groups(groups) => groups
                .iter()
                .map(|(name, table)| (Some(name.as_str()), table))
                .collect(),
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, LeagueStandings::Groups(_))
    }
}

/// Cup records carry the team inline and only goal counters for form.
fn group_standing_from(raw: RawGroupStanding) -> DecodeResult<Standing> {
    let mut check = FieldCheck::new(GROUP_STANDING);
    let team_id = check.id("teamId", raw.team_id);
    let team_name = check.text("team", raw.team);
    let position = check.rank("rank", raw.rank);
    let played_games = check.int("playedGames", raw.played_games);
    let points = check.int("points", raw.points);
    let form = check.form(raw.overall);
    check.finish()?;

    Ok(Standing {
        team_id,
        team_name,
        crest_uri: raw.crest_uri,
        position,
        played_games,
        goals: form.goals_for,
        points,
        form,
        home: None,
        away: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn league_record(team_id: u32, name: &str, position: u32, points: u32) -> Value {
        json!({
            "_links": {"team": {"href": format!("http://api.football-data.org/v1/teams/{team_id}")}},
            "position": position,
            "teamName": name,
            "playedGames": 7,
            "points": points,
            "goals": 12,
            "goalsAgainst": 6,
            "goalDifference": 6,
            "wins": 4,
            "draws": 1,
            "losses": 2,
            "home": {"goals": 7, "goalsAgainst": 2, "wins": 3, "draws": 0, "losses": 0},
            "away": {"goals": 5, "goalsAgainst": 4, "wins": 1, "draws": 1, "losses": 2}
        })
    }

    fn group_record(group: &str, team_id: u32, name: &str, rank: u32) -> Value {
        json!({
            "group": group,
            "rank": rank,
            "team": name,
            "teamId": team_id,
            "playedGames": 3,
            "crestURI": null,
            "points": 9 - rank,
            "goals": 6,
            "goalsAgainst": 2,
            "goalDifference": 4
        })
    }

    #[test]
    fn decodes_flat_league_sorted_by_position() {
        let value = json!({
            "leagueCaption": "Premier League 2016/17",
            "matchday": 8,
            "standing": [
                league_record(57, "Arsenal FC", 2, 16),
                league_record(65, "Manchester City FC", 1, 18),
                league_record(61, "Chelsea FC", 5, 13)
            ]
        });
        let Some(LeagueStandings::League(table)) = LeagueStandings::decode(&value).unwrap() else {
            panic!("expected a league table");
        };
        let ids: Vec<&str> = table.standings().iter().map(|s| s.team_id.as_str()).collect();
        assert_eq!(ids, vec!["65", "57", "61"]);
        assert!(table.standings().iter().all(|s| s.home.is_some() && s.away.is_some()));
    }

    #[test]
    fn decodes_groups_in_key_order_sorted_by_rank() {
        let value = json!({
            "leagueCaption": "Champions League 2016/17",
            "matchday": 3,
            "standings": {
                "B": [group_record("B", 503, "FC Porto", 2), group_record("B", 1887, "FC Kobenhavn", 1)],
                "A": [
                    group_record("A", 516, "Olympique Marseille", 3),
                    group_record("A", 524, "Paris Saint-Germain", 1),
                    group_record("A", 57, "Arsenal FC", 2)
                ]
            }
        });
        let standings = LeagueStandings::decode(&value).unwrap().unwrap();
        assert!(standings.is_grouped());
        let LeagueStandings::Groups(groups) = standings else {
            panic!("expected grouped standings");
        };
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);

        let group_a: Vec<(u32, &str)> = groups["A"]
            .standings()
            .iter()
            .map(|s| (s.position, s.team_id.as_str()))
            .collect();
        assert_eq!(group_a, vec![(1, "524"), (2, "57"), (3, "516")]);

        let paris = &groups["A"].standings()[0];
        assert_eq!(paris.team_name, "Paris Saint-Germain");
        assert_eq!(paris.goals, 6);
        assert_eq!(paris.form.wins, 0);
        assert!(paris.home.is_none() && paris.away.is_none());
    }

    #[test]
    fn decodes_named_groups_in_order() {
        let value = json!({
            "standings": {
                "Group B": [group_record("B", 2, "Wales", 1)],
                "Group A": [group_record("A", 1, "France", 1)]
            }
        });
        let standings = LeagueStandings::decode(&value).unwrap().unwrap();
        let labels: Vec<Option<&str>> = standings.tables().into_iter().map(|(name, _)| name).collect();
        assert_eq!(labels, vec![Some("Group A"), Some("Group B")]);
    }

    #[test]
    fn grouped_shape_wins_when_both_keys_present() {
        let value = json!({
            "standing": [league_record(57, "Arsenal FC", 1, 3)],
            "standings": {"A": [group_record("A", 1, "France", 1)]}
        });
        assert!(LeagueStandings::decode(&value).unwrap().unwrap().is_grouped());
    }

    #[test]
    fn payload_without_either_shape_is_ambiguous() {
        let value = json!({"leagueCaption": "Mystery Cup", "matchday": 1});
        assert_eq!(LeagueStandings::decode(&value).unwrap_err(), DecodeError::ShapeAmbiguity);
    }

    #[test]
    fn null_payload_is_no_value() {
        assert_eq!(LeagueStandings::decode(&Value::Null).unwrap(), None);
    }

    #[test]
    fn group_record_missing_team_fields() {
        let value = json!({"standings": {"A": [{"rank": 1, "playedGames": 3, "points": 9, "goals": 6, "goalsAgainst": 1}]}});
        assert_eq!(
            LeagueStandings::decode(&value).unwrap_err(),
            DecodeError::MissingField { entity: "GroupStanding", fields: vec!["teamId", "team"] }
        );
    }

    #[test]
    fn group_record_lists_every_missing_field() {
        let value = json!({"standings": {"A": [{"rank": 1, "team": "France", "teamId": 773, "playedGames": 3}]}});
        assert_eq!(
            LeagueStandings::decode(&value).unwrap_err(),
            DecodeError::MissingField {
                entity: "GroupStanding",
                fields: vec!["points", "goals", "goalsAgainst"],
            }
        );
    }

    #[test]
    fn group_rank_zero_is_rejected() {
        let value = json!({"standings": {"A": [group_record("A", 773, "France", 0)]}});
        assert_eq!(
            LeagueStandings::decode(&value).unwrap_err(),
            DecodeError::Format { entity: "GroupStanding", field: "rank", value: "0".into() }
        );
    }

    #[test]
    fn league_record_without_team_link_fails_the_table() {
        let mut broken = league_record(57, "Arsenal FC", 1, 3);
        broken.as_object_mut().unwrap().remove("_links");
        let value = json!({"standing": [broken]});
        assert_eq!(
            LeagueStandings::decode(&value).unwrap_err(),
            DecodeError::MalformedLink { entity: "Standing", relation: "team" }
        );
    }
}
