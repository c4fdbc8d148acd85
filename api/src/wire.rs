//! football-data.org v1 raw wire types: serde shapes for the hypermedia responses.
//!
//! Every field is optional: presence is validated by the decoders in `decode.rs`
//! so a missing field surfaces as a `DecodeError` naming it, not as a serde error.
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::error::{DecodeError, DecodeResult};

/// Deserialize `value` into a wire shape, treating JSON `null` as "no value".
pub(crate) fn parse<T: DeserializeOwned>(entity: &'static str, value: &Value) -> DecodeResult<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    T::deserialize(value)
        .map(Some)
        .map_err(|e| DecodeError::Schema { entity, message: e.to_string() })
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Named hypermedia relations, e.g. `self`, `team`, `homeTeam`.
pub type Links = HashMap<String, Link>;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Link {
    pub href: Option<String>,
}

/// The API is inconsistent about integers: `year` is a string, `matchday` a number.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum IntLike {
    Int(i64),
    Text(String),
    /// Anything else (floats, booleans, objects); rejected per field by the decoders.
    Other(Value),
}

/// Date and timestamp fields: a string, or whatever else the API sent in its place.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TextLike {
    Text(String),
    Other(Value),
}

// ---------------------------------------------------------------------------
// Competitions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawCompetition {
    #[serde(rename = "_links")]
    pub links: Option<Links>,
    pub id: Option<IntLike>,
    pub caption: Option<String>,
    pub league: Option<String>,
    pub year: Option<IntLike>,
    pub current_matchday: Option<IntLike>,
    pub number_of_matchdays: Option<IntLike>,
    pub number_of_teams: Option<IntLike>,
    pub number_of_games: Option<IntLike>,
    pub last_updated: Option<String>,
}

// ---------------------------------------------------------------------------
// Teams and players
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawTeam {
    #[serde(rename = "_links")]
    pub links: Option<Links>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub short_name: Option<String>,
    pub squad_market_value: Option<String>,
    pub crest_url: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsEnvelope {
    pub teams: Option<Vec<Option<RawTeam>>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    pub name: Option<String>,
    pub position: Option<String>,
    pub jersey_number: Option<IntLike>,
    pub date_of_birth: Option<TextLike>,
    pub nationality: Option<String>,
    pub contract_until: Option<TextLike>,
    pub market_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayersEnvelope {
    pub players: Option<Vec<Option<RawPlayer>>>,
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawFixture {
    #[serde(rename = "_links")]
    pub links: Option<Links>,
    pub date: Option<TextLike>,
    pub status: Option<String>,
    pub matchday: Option<IntLike>,
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub result: Option<RawResult>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    pub goals_home_team: Option<IntLike>,
    pub goals_away_team: Option<IntLike>,
    pub half_time: Option<RawHalfTime>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawHalfTime {
    pub goals_home_team: Option<IntLike>,
    pub goals_away_team: Option<IntLike>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixturesEnvelope {
    pub fixtures: Option<Vec<Option<RawFixture>>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawHeadToHead {
    pub count: Option<IntLike>,
    pub time_frame_start: Option<TextLike>,
    pub time_frame_end: Option<TextLike>,
    pub home_team_wins: Option<IntLike>,
    pub away_team_wins: Option<IntLike>,
    pub draws: Option<IntLike>,
    pub last_home_win_home_team: Option<RawFixture>,
    pub last_win_home_team: Option<RawFixture>,
    pub last_away_win_away_team: Option<RawFixture>,
    pub last_win_away_team: Option<RawFixture>,
    pub fixtures: Option<Vec<Option<RawFixture>>>,
}

/// `fixtures/{id}` response: the subject fixture plus its head-to-head history.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixtureDetailEnvelope {
    pub fixture: Option<RawFixture>,
    pub head2head: Option<RawHeadToHead>,
}

// ---------------------------------------------------------------------------
// League tables
// ---------------------------------------------------------------------------

/// Win/draw/loss and goal counters. Appears nested (`home`, `away`) and
/// flattened into the top level of a standing record.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawForm {
    pub wins: Option<IntLike>,
    pub draws: Option<IntLike>,
    pub losses: Option<IntLike>,
    pub goals: Option<IntLike>,
    pub goals_against: Option<IntLike>,
}

/// Flat league record (`standing[]`).
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawStanding {
    #[serde(rename = "_links")]
    pub links: Option<Links>,
    pub position: Option<IntLike>,
    pub team_name: Option<String>,
    #[serde(rename = "crestURI")]
    pub crest_uri: Option<String>,
    pub played_games: Option<IntLike>,
    pub points: Option<IntLike>,
    #[serde(flatten)]
    pub overall: RawForm,
    pub home: Option<RawForm>,
    pub away: Option<RawForm>,
}

/// Cup group record (`standings.<group>[]`): carries its team id and name inline.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawGroupStanding {
    pub group: Option<String>,
    pub rank: Option<IntLike>,
    pub team: Option<String>,
    pub team_id: Option<IntLike>,
    #[serde(rename = "crestURI")]
    pub crest_uri: Option<String>,
    pub played_games: Option<IntLike>,
    pub points: Option<IntLike>,
    #[serde(flatten)]
    pub overall: RawForm,
}

/// Both league-table shapes in one envelope; `league_table.rs` picks one.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueTableEnvelope {
    pub league_caption: Option<String>,
    pub matchday: Option<IntLike>,
    pub standing: Option<Vec<Option<RawStanding>>>,
    pub standings: Option<BTreeMap<String, Vec<Option<RawGroupStanding>>>>,
}
