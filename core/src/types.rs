//! Typed payloads carried in the envelope's `data` field.
//!
//! # Design
//! Field names follow the server's camelCase keys through `serde(rename)`.
//! Each struct covers exactly one documented payload. Unknown extra keys are
//! ignored so newer servers that add fields still decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupId {
    #[serde(rename = "groupID")]
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorId {
    #[serde(rename = "authorID")]
    pub author_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId {
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadId {
    #[serde(rename = "padID")]
    pub pad_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadIds {
    #[serde(rename = "padIDs")]
    pub pad_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIds {
    #[serde(rename = "authorIDs")]
    pub author_ids: Vec<String>,
}

/// A session as returned by `getSessionInfo` and the session listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "groupID")]
    pub group_id: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
    /// Unix timestamp in seconds.
    #[serde(rename = "validUntil")]
    pub valid_until: u64,
}

/// Sessions keyed by session ID. The server reports `null` for a session
/// whose record it cannot load; the entry is kept as `None`.
pub type Sessions = BTreeMap<String, Option<SessionInfo>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Html {
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionsCount {
    pub revisions: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadUsersCount {
    #[serde(rename = "padUsersCount")]
    pub pad_users_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOnlyId {
    #[serde(rename = "readOnlyID")]
    pub read_only_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicStatus {
    #[serde(rename = "publicStatus")]
    pub public_status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordProtection {
    #[serde(rename = "isPasswordProtected")]
    pub is_password_protected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEdited {
    /// Milliseconds since the unix epoch.
    #[serde(rename = "lastEdited")]
    pub last_edited: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_listing_decodes_from_server_shape() {
        let raw = r#"{"s.oxf2ras6lvhv2132":{"groupID":"g.s8oes9dhwrvt0zif","authorID":"a.akf8finncvomlqva","validUntil":2312905480}}"#;
        let sessions: Sessions = serde_json::from_str(raw).unwrap();
        let info = sessions["s.oxf2ras6lvhv2132"].as_ref().unwrap();
        assert_eq!(info.group_id, "g.s8oes9dhwrvt0zif");
        assert_eq!(info.author_id, "a.akf8finncvomlqva");
        assert_eq!(info.valid_until, 2312905480);
    }

    #[test]
    fn unloadable_session_decodes_as_none() {
        let raw = r#"{"s.a":{"groupID":"g.1","authorID":"a.1","validUntil":1},"s.b":null}"#;
        let sessions: Sessions = serde_json::from_str(raw).unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions["s.a"].is_some());
        assert!(sessions["s.b"].is_none());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let ids: PadIds = serde_json::from_str(r#"{"padIDs":["g.x$a"],"cursor":null}"#).unwrap();
        assert_eq!(ids.pad_ids, vec!["g.x$a".to_string()]);
    }

    #[test]
    fn missing_key_is_rejected() {
        let result: Result<GroupId, _> = serde_json::from_str(r#"{"group":"g.x"}"#);
        assert!(result.is_err());
    }
}
