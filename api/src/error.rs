//! Error types for decoding football-data payloads and fetching them.

use thiserror::Error;

pub type DecodeResult<T> = Result<T, DecodeError>;
pub type ApiResult<T> = Result<T, ApiError>;

/// Why a raw payload could not be turned into a domain entity.
///
/// Every variant is fatal to the entity being decoded; the decoders never hand
/// back a partially populated value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{entity}: hyperlink relation `{relation}` is missing or has no id segment")]
    MalformedLink {
        entity: &'static str,
        relation: &'static str,
    },

    #[error("{entity}: missing required field(s): {}", .fields.join(", "))]
    MissingField {
        entity: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{entity}: field `{field}` has unparsable value {value:?}")]
    Format {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("league table payload has neither `standing` nor `standings`")]
    ShapeAmbiguity,

    #[error("{entity}: payload does not match the expected shape: {message}")]
    Schema {
        entity: &'static str,
        message: String,
    },
}

impl DecodeError {
    /// Name of the entity whose decode failed, if the error is tied to one.
    pub fn entity(&self) -> Option<&'static str> {
        match self {
            DecodeError::MalformedLink { entity, .. }
            | DecodeError::MissingField { entity, .. }
            | DecodeError::Format { entity, .. }
            | DecodeError::Schema { entity, .. } => Some(entity),
            DecodeError::ShapeAmbiguity => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error for {1}: {0}")]
    Network(#[source] reqwest::Error, String),

    #[error("API error for {1}: {0}")]
    Api(#[source] reqwest::Error, String),

    #[error("Parse error for {1}: {0}")]
    Parsing(#[source] reqwest::Error, String),

    #[error("Decode error for {1}: {0}")]
    Decode(#[source] DecodeError, String),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_lists_every_field() {
        let err = DecodeError::MissingField {
            entity: "Team",
            fields: vec!["name", "shortName"],
        };
        assert_eq!(
            err.to_string(),
            "Team: missing required field(s): name, shortName"
        );
        assert_eq!(err.entity(), Some("Team"));
    }

    #[test]
    fn shape_ambiguity_has_no_entity() {
        assert_eq!(DecodeError::ShapeAmbiguity.entity(), None);
    }

    #[test]
    fn not_found_display() {
        let err = ApiError::NotFound("teams/999".into());
        assert_eq!(err.to_string(), "Not found: teams/999");
    }
}
