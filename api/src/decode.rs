//! Entity decoders: raw football-data JSON → validated domain types.
//!
//! Every public decoder takes a `serde_json::Value` and returns
//! `Ok(None)` for JSON `null`, `Ok(Some(entity))` on success, or a
//! [`DecodeError`] describing exactly what was wrong. Required fields are
//! collected up front so one error names every missing field of an entity.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::error::{DecodeError, DecodeResult};
use crate::links;
use crate::wire::{
    self, FixtureDetailEnvelope, FixturesEnvelope, IntLike, Links, PlayersEnvelope,
    RawCompetition, RawFixture, RawForm, RawHalfTime, RawHeadToHead, RawPlayer, RawResult,
    RawStanding, RawTeam, TeamsEnvelope, TextLike,
};
use crate::{
    Competition, DISPLAY_DATE_FORMAT, Fixture, HeadToHead, MatchResult, Player, PlayerProfile,
    Standing, Team, TeamForm,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const COMPETITION: &str = "Competition";
const COMPETITION_LIST: &str = "CompetitionList";
const TEAM: &str = "Team";
const TEAM_LIST: &str = "TeamList";
const PLAYER: &str = "Player";
const PLAYER_LIST: &str = "PlayerList";
const RESULT: &str = "Result";
const HALF_TIME: &str = "HalfTime";
const TEAM_FORM: &str = "TeamForm";
pub(crate) const STANDING: &str = "Standing";
const FIXTURE: &str = "Fixture";
const FIXTURE_LIST: &str = "FixtureList";
const FIXTURE_DETAIL: &str = "FixtureDetail";
const HEAD_TO_HEAD: &str = "HeadToHead";

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Collects missing, unparsable and unlinked fields of one entity.
///
/// Accessors hand back a placeholder when a field is unusable; `finish` must
/// be called before any of those values reach a domain type. Missing fields
/// are reported first (all of them), then a broken link, then the first
/// unparsable value.
pub(crate) struct FieldCheck {
    entity: &'static str,
    missing: Vec<&'static str>,
    malformed: Option<DecodeError>,
    invalid: Option<DecodeError>,
}

impl FieldCheck {
    pub(crate) fn new(entity: &'static str) -> Self {
        Self { entity, missing: Vec::new(), malformed: None, invalid: None }
    }

    pub(crate) fn require<T>(&mut self, field: &'static str, value: Option<&T>) {
        if value.is_none() {
            self.missing.push(field);
        }
    }

    /// Id carried by `relation` in `links`.
    pub(crate) fn link(&mut self, links: Option<&Links>, relation: &'static str) -> String {
        match links::resolve_id(self.entity, links, relation) {
            Ok(id) => id,
            Err(err) => {
                if self.malformed.is_none() {
                    self.malformed = Some(err);
                }
                String::new()
            }
        }
    }

    pub(crate) fn text(&mut self, field: &'static str, value: Option<String>) -> String {
        value.unwrap_or_else(|| {
            self.missing.push(field);
            String::new()
        })
    }

    pub(crate) fn int(&mut self, field: &'static str, value: Option<IntLike>) -> u32 {
        match value {
            Some(v) => self.coerce(field, v).unwrap_or_default(),
            None => {
                self.missing.push(field);
                0
            }
        }
    }

    pub(crate) fn optional_int(&mut self, field: &'static str, value: Option<IntLike>) -> Option<u32> {
        value.and_then(|v| self.coerce(field, v))
    }

    /// Table positions count from 1.
    pub(crate) fn rank(&mut self, field: &'static str, value: Option<IntLike>) -> u32 {
        let present = value.is_some();
        let rank = self.int(field, value);
        if present && rank == 0 {
            self.reject(field, "0".to_owned());
        }
        rank
    }

    /// Ids arrive as numbers or strings; either way they become strings.
    pub(crate) fn id(&mut self, field: &'static str, value: Option<IntLike>) -> String {
        match value {
            Some(IntLike::Int(n)) => n.to_string(),
            Some(IntLike::Text(s)) if !s.trim().is_empty() => s.trim().to_owned(),
            Some(IntLike::Text(s)) => {
                self.reject(field, s);
                String::new()
            }
            Some(IntLike::Other(v)) => {
                self.reject(field, v.to_string());
                String::new()
            }
            None => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    pub(crate) fn date(&mut self, field: &'static str, value: Option<TextLike>) -> NaiveDate {
        match value {
            Some(raw) => self.parse_date(field, raw).unwrap_or(NaiveDate::MIN),
            None => {
                self.missing.push(field);
                NaiveDate::MIN
            }
        }
    }

    pub(crate) fn optional_date(&mut self, field: &'static str, value: Option<TextLike>) -> Option<NaiveDate> {
        value.and_then(|raw| self.parse_date(field, raw))
    }

    pub(crate) fn timestamp(&mut self, field: &'static str, value: Option<TextLike>) -> DateTime<Utc> {
        let Some(raw) = value else {
            self.missing.push(field);
            return DateTime::<Utc>::MIN_UTC;
        };
        let parsed = self
            .text_like(field, raw)
            .and_then(|raw| match NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT) {
                Ok(dt) => Some(dt.and_utc()),
                Err(_) => {
                    self.reject(field, raw);
                    None
                }
            });
        parsed.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Overall win/draw/loss and goal counters of a form record.
    pub(crate) fn form(&mut self, raw: RawForm) -> TeamForm {
        let wins = self.optional_int("wins", raw.wins);
        let draws = self.optional_int("draws", raw.draws);
        let losses = self.optional_int("losses", raw.losses);
        let goals_for = self.int("goals", raw.goals);
        let goals_against = self.int("goalsAgainst", raw.goals_against);
        TeamForm {
            wins: wins.unwrap_or_default(),
            draws: draws.unwrap_or_default(),
            losses: losses.unwrap_or_default(),
            goals_for,
            goals_against,
        }
    }

    pub(crate) fn finish(self) -> DecodeResult<()> {
        if !self.missing.is_empty() {
            return Err(DecodeError::MissingField { entity: self.entity, fields: self.missing });
        }
        match self.malformed.or(self.invalid) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn coerce(&mut self, field: &'static str, value: IntLike) -> Option<u32> {
        let parsed = match &value {
            IntLike::Int(n) => u32::try_from(*n).ok(),
            IntLike::Text(s) => s.trim().parse::<u32>().ok(),
            IntLike::Other(_) => None,
        };
        if parsed.is_none() {
            let raw = match value {
                IntLike::Int(n) => n.to_string(),
                IntLike::Text(s) => s,
                IntLike::Other(v) => v.to_string(),
            };
            self.reject(field, raw);
        }
        parsed
    }

    fn text_like(&mut self, field: &'static str, value: TextLike) -> Option<String> {
        match value {
            TextLike::Text(s) => Some(s),
            TextLike::Other(v) => {
                self.reject(field, v.to_string());
                None
            }
        }
    }

    fn parse_date(&mut self, field: &'static str, raw: TextLike) -> Option<NaiveDate> {
        let raw = self.text_like(field, raw)?;
        match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.reject(field, raw);
                None
            }
        }
    }

    fn reject(&mut self, field: &'static str, value: String) {
        if self.invalid.is_none() {
            self.invalid = Some(DecodeError::Format { entity: self.entity, field, value });
        }
    }
}

/// Decode every non-null entry of a list; the first failing entry fails the list.
pub(crate) fn decode_all<R, T>(
    entity: &'static str,
    items: Vec<Option<R>>,
    decode: impl FnMut(R) -> DecodeResult<T>,
) -> DecodeResult<Vec<T>> {
    let total = items.len();
    let decoded = items
        .into_iter()
        .flatten()
        .map(decode)
        .collect::<DecodeResult<Vec<T>>>()?;
    if decoded.len() < total {
        warn!("{entity}: skipped {} null entries", total - decoded.len());
    }
    debug!("{entity}: decoded {} entries", decoded.len());
    Ok(decoded)
}

fn required_list<R>(entity: &'static str, field: &'static str, list: Option<Vec<R>>) -> DecodeResult<Vec<R>> {
    list.ok_or_else(|| DecodeError::MissingField { entity, fields: vec![field] })
}

// ---------------------------------------------------------------------------
// Competitions
// ---------------------------------------------------------------------------

pub fn competition(value: &Value) -> DecodeResult<Option<Competition>> {
    wire::parse::<RawCompetition>(COMPETITION, value)?
        .map(competition_from)
        .transpose()
}

/// `competitions/` returns a bare JSON array.
pub fn competitions(value: &Value) -> DecodeResult<Option<Vec<Competition>>> {
    wire::parse::<Vec<Option<RawCompetition>>>(COMPETITION_LIST, value)?
        .map(|items| decode_all(COMPETITION_LIST, items, competition_from))
        .transpose()
}

fn competition_from(raw: RawCompetition) -> DecodeResult<Competition> {
    let mut check = FieldCheck::new(COMPETITION);
    let id = check.id("id", raw.id);
    let name = check.text("caption", raw.caption);
    let year = check.int("year", raw.year);
    let current_matchday = check.optional_int("currentMatchday", raw.current_matchday);
    let number_of_matchdays = check.optional_int("numberOfMatchdays", raw.number_of_matchdays);
    let number_of_teams = check.optional_int("numberOfTeams", raw.number_of_teams);
    let number_of_games = check.optional_int("numberOfGames", raw.number_of_games);
    check.finish()?;

    let year = u16::try_from(year).map_err(|_| DecodeError::Format {
        entity: COMPETITION,
        field: "year",
        value: year.to_string(),
    })?;

    Ok(Competition {
        id,
        name,
        year,
        league: raw.league,
        current_matchday,
        number_of_matchdays,
        number_of_teams,
        number_of_games,
    })
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

pub fn team(value: &Value) -> DecodeResult<Option<Team>> {
    wire::parse::<RawTeam>(TEAM, value)?.map(team_from).transpose()
}

/// `competitions/{id}/teams` envelope.
pub fn teams(value: &Value) -> DecodeResult<Option<Vec<Team>>> {
    let Some(envelope) = wire::parse::<TeamsEnvelope>(TEAM_LIST, value)? else {
        return Ok(None);
    };
    let items = required_list(TEAM_LIST, "teams", envelope.teams)?;
    decode_all(TEAM_LIST, items, team_from).map(Some)
}

fn team_from(raw: RawTeam) -> DecodeResult<Team> {
    let mut check = FieldCheck::new(TEAM);
    let id = check.link(raw.links.as_ref(), links::SELF);
    let name = check.text("name", raw.name);
    check.finish()?;

    Ok(Team {
        id,
        short_name: raw.short_name.unwrap_or_else(|| name.clone()),
        name,
        code: raw.code,
        market_value: raw.squad_market_value,
        crest_url: raw.crest_url,
    })
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Decode one player. Age and contract length are computed relative to `today`.
pub fn player(value: &Value, today: NaiveDate) -> DecodeResult<Option<Player>> {
    wire::parse::<RawPlayer>(PLAYER, value)?
        .map(|raw| player_from(raw, today))
        .transpose()
}

/// `teams/{id}/players` envelope.
pub fn players(value: &Value, today: NaiveDate) -> DecodeResult<Option<Vec<Player>>> {
    let Some(envelope) = wire::parse::<PlayersEnvelope>(PLAYER_LIST, value)? else {
        return Ok(None);
    };
    let items = required_list(PLAYER_LIST, "players", envelope.players)?;
    decode_all(PLAYER_LIST, items, |raw| player_from(raw, today)).map(Some)
}

fn player_from(raw: RawPlayer, today: NaiveDate) -> DecodeResult<Player> {
    let mut check = FieldCheck::new(PLAYER);
    let name = check.text("name", raw.name);
    let position = check.text("position", raw.position);
    let jersey_number = check.optional_int("jerseyNumber", raw.jersey_number);
    let date_of_birth = check.date("dateOfBirth", raw.date_of_birth);
    let nationality = check.text("nationality", raw.nationality);
    let contract_until = check.optional_date("contractUntil", raw.contract_until);
    check.finish()?;

    let profile = PlayerProfile {
        name,
        position,
        jersey_number,
        date_of_birth,
        nationality,
        contract_until,
        market_value: raw.market_value,
    };
    Ok(Player::new(profile, today))
}

// ---------------------------------------------------------------------------
// Results and forms
// ---------------------------------------------------------------------------

pub fn result(value: &Value) -> DecodeResult<Option<MatchResult>> {
    wire::parse::<RawResult>(RESULT, value)?.map(result_from).transpose()
}

fn result_from(raw: RawResult) -> DecodeResult<MatchResult> {
    let mut check = FieldCheck::new(RESULT);
    let home_goals = check.optional_int("goalsHomeTeam", raw.goals_home_team);
    let away_goals = check.optional_int("goalsAwayTeam", raw.goals_away_team);
    check.finish()?;

    let (halftime_home_goals, halftime_away_goals) = match raw.half_time {
        Some(half_time) => half_time_from(half_time)?,
        None => (0, 0),
    };

    Ok(MatchResult {
        home_goals: home_goals.unwrap_or_default(),
        away_goals: away_goals.unwrap_or_default(),
        halftime_home_goals,
        halftime_away_goals,
    })
}

/// Both half-time scores or neither; an all-null half-time block counts as neither.
fn half_time_from(raw: RawHalfTime) -> DecodeResult<(u32, u32)> {
    if raw.goals_home_team.is_none() && raw.goals_away_team.is_none() {
        return Ok((0, 0));
    }
    let mut check = FieldCheck::new(HALF_TIME);
    let home = check.int("goalsHomeTeam", raw.goals_home_team);
    let away = check.int("goalsAwayTeam", raw.goals_away_team);
    check.finish()?;
    Ok((home, away))
}

pub fn team_form(value: &Value) -> DecodeResult<Option<TeamForm>> {
    wire::parse::<RawForm>(TEAM_FORM, value)?.map(team_form_from).transpose()
}

fn team_form_from(raw: RawForm) -> DecodeResult<TeamForm> {
    let mut check = FieldCheck::new(TEAM_FORM);
    let form = check.form(raw);
    check.finish()?;
    Ok(form)
}

// ---------------------------------------------------------------------------
// Standings (flat league shape)
// ---------------------------------------------------------------------------

/// Decode one `standing[]` record of a league table.
pub fn standing(value: &Value) -> DecodeResult<Option<Standing>> {
    wire::parse::<RawStanding>(STANDING, value)?
        .map(standing_from)
        .transpose()
}

pub(crate) fn standing_from(raw: RawStanding) -> DecodeResult<Standing> {
    let mut check = FieldCheck::new(STANDING);
    let team_id = check.link(raw.links.as_ref(), links::TEAM);
    let team_name = check.text("teamName", raw.team_name);
    let position = check.rank("position", raw.position);
    let played_games = check.int("playedGames", raw.played_games);
    let points = check.int("points", raw.points);
    let form = check.form(raw.overall);
    check.finish()?;

    let home = raw.home.map(team_form_from).transpose()?;
    let away = raw.away.map(team_form_from).transpose()?;

    Ok(Standing {
        team_id,
        team_name,
        crest_uri: raw.crest_uri,
        position,
        played_games,
        goals: form.goals_for,
        points,
        form,
        home,
        away,
    })
}

// ---------------------------------------------------------------------------
// Fixtures and head-to-head
// ---------------------------------------------------------------------------

pub fn fixture(value: &Value) -> DecodeResult<Option<Fixture>> {
    wire::parse::<RawFixture>(FIXTURE, value)?.map(fixture_from).transpose()
}

/// `competitions/{id}/fixtures` and `teams/{id}/fixtures` envelope.
pub fn fixtures(value: &Value) -> DecodeResult<Option<Vec<Fixture>>> {
    let Some(envelope) = wire::parse::<FixturesEnvelope>(FIXTURE_LIST, value)? else {
        return Ok(None);
    };
    let items = required_list(FIXTURE_LIST, "fixtures", envelope.fixtures)?;
    decode_all(FIXTURE_LIST, items, fixture_from).map(Some)
}

fn fixture_from(raw: RawFixture) -> DecodeResult<Fixture> {
    let mut check = FieldCheck::new(FIXTURE);
    let links = raw.links.as_ref();
    let id = check.link(links, links::SELF);
    let competition_id = check.link(links, links::COMPETITION);
    let home_team_id = check.link(links, links::HOME_TEAM);
    let away_team_id = check.link(links, links::AWAY_TEAM);
    let kickoff = check.timestamp("date", raw.date);
    let status = check.text("status", raw.status);
    let matchday = check.int("matchday", raw.matchday);
    let home_team_name = check.text("homeTeamName", raw.home_team_name);
    let away_team_name = check.text("awayTeamName", raw.away_team_name);
    check.finish()?;

    let result = raw.result.map(result_from).transpose()?;

    Ok(Fixture {
        id,
        competition_id,
        date: kickoff.format(DISPLAY_DATE_FORMAT).to_string(),
        kickoff,
        status,
        home_team_name,
        home_team_id,
        away_team_name,
        away_team_id,
        result,
        head_to_head: None,
        matchday,
    })
}

/// Decode head-to-head history. The list still contains every meeting the
/// API returned; see [`fixture_detail`] for removal of the subject fixture.
pub fn head_to_head(value: &Value) -> DecodeResult<Option<HeadToHead>> {
    wire::parse::<RawHeadToHead>(HEAD_TO_HEAD, value)?
        .map(head_to_head_from)
        .transpose()
}

fn head_to_head_from(raw: RawHeadToHead) -> DecodeResult<HeadToHead> {
    let mut check = FieldCheck::new(HEAD_TO_HEAD);
    let count = check.int("count", raw.count);
    let time_frame_start = check.optional_date("timeFrameStart", raw.time_frame_start);
    let time_frame_end = check.optional_date("timeFrameEnd", raw.time_frame_end);
    let home_team_wins = check.int("homeTeamWins", raw.home_team_wins);
    let away_team_wins = check.int("awayTeamWins", raw.away_team_wins);
    let draws = check.int("draws", raw.draws);
    check.require("fixtures", raw.fixtures.as_ref());
    check.finish()?;

    let last_fixtures = [
        raw.last_home_win_home_team.map(fixture_from).transpose()?,
        raw.last_win_home_team.map(fixture_from).transpose()?,
        raw.last_away_win_away_team.map(fixture_from).transpose()?,
        raw.last_win_away_team.map(fixture_from).transpose()?,
    ];
    let fixtures = decode_all(HEAD_TO_HEAD, raw.fixtures.unwrap_or_default(), fixture_from)?;

    Ok(HeadToHead::new(
        count,
        (time_frame_start, time_frame_end),
        home_team_wins,
        away_team_wins,
        draws,
        last_fixtures,
        fixtures,
    ))
}

/// `fixtures/{id}` envelope: the fixture with its head-to-head attached and
/// the fixture itself removed from the head-to-head meeting list.
pub fn fixture_detail(value: &Value) -> DecodeResult<Option<Fixture>> {
    let Some(envelope) = wire::parse::<FixtureDetailEnvelope>(FIXTURE_DETAIL, value)? else {
        return Ok(None);
    };
    let raw_fixture = envelope.fixture.ok_or(DecodeError::MissingField {
        entity: FIXTURE_DETAIL,
        fields: vec!["fixture"],
    })?;

    let fixture = fixture_from(raw_fixture)?;
    let head_to_head = envelope.head2head.map(head_to_head_from).transpose()?;

    Ok(Some(match head_to_head {
        Some(h2h) => fixture.with_head_to_head(h2h),
        None => fixture,
    }))
}
