//! Storage-path schema for session audio objects.

use uuid::Uuid;

/// The owning identifiers extracted from a session audio object name.
///
/// Session audio lives at
/// `users/{uid}/clients/{clientId}/sessions/{filename...}`. Anything that
/// does not match this schema is an unrelated upload and is filtered out
/// before the pipeline touches any record.
///
/// # Examples
///
/// ```
/// use anamnesis_core::SessionPath;
/// use uuid::Uuid;
///
/// let client = Uuid::new_v4();
/// let name = format!("users/u123/clients/{}/sessions/1700000000.webm", client);
/// let parsed = SessionPath::parse(&name).unwrap();
/// assert_eq!(parsed.uid, "u123");
/// assert_eq!(parsed.client_id, client);
///
/// assert!(SessionPath::parse("avatars/u123/profile.png").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPath {
    /// The owning user id
    pub uid: String,
    /// The owning client id
    pub client_id: Uuid,
}

impl SessionPath {
    /// Parse an object name against the session-path schema.
    ///
    /// Requires at least six segments with the literals `users`, `clients`,
    /// and `sessions` at positions 0, 2, and 4, and non-empty identifier
    /// segments. Returns `None` on any deviation; a mismatch is a filter,
    /// not an error.
    pub fn parse(object_name: &str) -> Option<Self> {
        let parts: Vec<&str> = object_name.split('/').collect();

        if parts.len() < 6 {
            return None;
        }
        if parts[0] != "users" || parts[2] != "clients" || parts[4] != "sessions" {
            return None;
        }
        if parts[1].is_empty() || parts[5].is_empty() {
            return None;
        }

        let client_id = Uuid::parse_str(parts[3]).ok()?;

        Some(Self {
            uid: parts[1].to_string(),
            client_id,
        })
    }

    /// The storage prefix holding every object owned by a user.
    pub fn user_prefix(uid: &str) -> String {
        format!("users/{}/", uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_name(client: Uuid) -> String {
        format!("users/u1/clients/{}/sessions/1700000000.webm", client)
    }

    #[test]
    fn parses_valid_session_path() {
        let client = Uuid::new_v4();
        let parsed = SessionPath::parse(&valid_name(client)).unwrap();
        assert_eq!(parsed.uid, "u1");
        assert_eq!(parsed.client_id, client);
    }

    #[test]
    fn rejects_short_paths() {
        let client = Uuid::new_v4();
        assert!(SessionPath::parse(&format!("users/u1/clients/{}/sessions", client)).is_none());
        assert!(SessionPath::parse("users/u1").is_none());
        assert!(SessionPath::parse("").is_none());
    }

    #[test]
    fn rejects_wrong_literals() {
        let client = Uuid::new_v4();
        assert!(SessionPath::parse(&format!("user/u1/clients/{}/sessions/a.mp3", client)).is_none());
        assert!(SessionPath::parse(&format!("users/u1/client/{}/sessions/a.mp3", client)).is_none());
        assert!(SessionPath::parse(&format!("users/u1/clients/{}/session/a.mp3", client)).is_none());
    }

    #[test]
    fn rejects_empty_identifiers() {
        let client = Uuid::new_v4();
        assert!(SessionPath::parse(&format!("users//clients/{}/sessions/a.mp3", client)).is_none());
        assert!(SessionPath::parse(&format!("users/u1/clients/{}/sessions/", client)).is_none());
    }

    #[test]
    fn rejects_non_uuid_client() {
        assert!(SessionPath::parse("users/u1/clients/not-a-uuid/sessions/a.mp3").is_none());
    }

    #[test]
    fn accepts_nested_filenames() {
        let client = Uuid::new_v4();
        let name = format!("users/u1/clients/{}/sessions/2024/01/rec.webm", client);
        assert!(SessionPath::parse(&name).is_some());
    }
}
