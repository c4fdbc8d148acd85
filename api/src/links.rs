//! Identifier extraction from hypermedia `_links` relations.

use crate::error::{DecodeError, DecodeResult};
use crate::wire::Links;

pub const SELF: &str = "self";
pub const TEAM: &str = "team";
pub const COMPETITION: &str = "competition";
pub const HOME_TEAM: &str = "homeTeam";
pub const AWAY_TEAM: &str = "awayTeam";

/// Final `/`-delimited segment of `href`. An href without `/` is its own id.
pub fn last_segment(href: &str) -> Option<&str> {
    let id = match href.rfind('/') {
        Some(idx) => &href[idx + 1..],
        None => href,
    };
    (!id.is_empty()).then_some(id)
}

/// Resolve the id carried by `relation` in an entity's `_links`.
///
/// There is no fallback: an entity without a resolvable link has no id and
/// is rejected with [`DecodeError::MalformedLink`].
pub fn resolve_id(
    entity: &'static str,
    links: Option<&Links>,
    relation: &'static str,
) -> DecodeResult<String> {
    links
        .and_then(|l| l.get(relation))
        .and_then(|link| link.href.as_deref())
        .and_then(last_segment)
        .map(str::to_owned)
        .ok_or(DecodeError::MalformedLink { entity, relation })
}
