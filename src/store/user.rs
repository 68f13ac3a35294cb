//! User record and request payload types.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;

/// Length of the canonical hyphenated UUID form (8-4-4-4-12).
const HYPHENATED_LEN: usize = 36;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub age: String,
    pub hobbies: Vec<String>,
}

/// Body of a create or update request.
///
/// Every field is optional at the type level; the store decides what is
/// required. Empty strings and empty lists count as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPayload {
    pub username: Option<String>,
    pub age: Option<String>,
    pub hobbies: Option<Vec<String>>,
}

impl UserPayload {
    /// Parse a request body.
    ///
    /// Anything that is not a JSON object yields an empty payload, so it
    /// fails validation like missing fields. Inside an object each field is
    /// read on its own: one of the wrong type is dropped, the others are kept.
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };
        Self {
            username: take_field(&mut fields, "username"),
            age: take_field(&mut fields, "age"),
            hobbies: take_field(&mut fields, "hobbies"),
        }
    }

    pub(crate) fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn age(&self) -> Option<&str> {
        self.age.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn hobbies(&self) -> Option<&[String]> {
        self.hobbies.as_deref().filter(|h| !h.is_empty())
    }

    /// True when at least one updatable field is supplied.
    pub(crate) fn has_any_field(&self) -> bool {
        self.username().is_some() || self.age().is_some() || self.hobbies().is_some()
    }
}

fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, name: &str) -> Option<T> {
    fields
        .remove(name)
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Validate a raw id segment.
///
/// Only the canonical hyphenated form is accepted.
pub fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    if raw.len() != HYPHENATED_LEN {
        return Err(ApiError::InvalidId(raw.to_string()));
    }
    Uuid::try_parse(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let payload =
            UserPayload::from_body(br#"{"username":"Aleksandr","age":"46","hobbies":["books","music"]}"#);
        assert_eq!(payload.username(), Some("Aleksandr"));
        assert_eq!(payload.age(), Some("46"));
        assert_eq!(payload.hobbies().map(<[String]>::len), Some(2));
    }

    #[test]
    fn malformed_bodies_become_empty_payloads() {
        let bodies: [&[u8]; 4] = [
            b"",
            b"not json",
            b"[\"Aleksandr\",\"46\",[]]",
            b"\"username\"",
        ];
        for body in bodies {
            assert_eq!(UserPayload::from_body(body), UserPayload::default());
        }
    }

    #[test]
    fn mistyped_field_does_not_discard_the_others() {
        let payload = UserPayload::from_body(br#"{"username":"Sasha","age":13,"hobbies":["chess",1]}"#);
        assert_eq!(payload.username(), Some("Sasha"));
        assert_eq!(payload.age(), None);
        assert_eq!(payload.hobbies(), None);
        assert!(payload.has_any_field());
    }

    #[test]
    fn empty_values_count_as_missing() {
        let payload = UserPayload::from_body(br#"{"username":"","age":null,"hobbies":[]}"#);
        assert!(!payload.has_any_field());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload = UserPayload::from_body(br#"{"age":"13","role":"admin"}"#);
        assert_eq!(payload.age(), Some("13"));
        assert!(payload.has_any_field());
    }

    #[test]
    fn id_must_be_hyphenated_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);

        let rejected = [
            String::new(),
            "abc".to_string(),
            id.simple().to_string(),
            id.braced().to_string(),
            id.urn().to_string(),
            "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz".to_string(),
        ];
        for raw in &rejected {
            assert_eq!(parse_user_id(raw), Err(ApiError::InvalidId(raw.clone())));
        }
    }
}
