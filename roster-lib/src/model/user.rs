//! Typed user profile record

use serde::Deserialize;
use serde::Serialize;

/// A user profile as stored by the Roster backend.
///
/// Wire field names follow the backend's camelCase JSON contract, with the
/// identifier exposed as `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The backend identifier (matches the identity provider's local user id).
    #[serde(rename = "_id")]
    pub id: String,
    /// Sign-in email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Id of the selected profession.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    /// Self-reported gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Ids of the selected qualities.
    #[serde(default)]
    pub qualities: Vec<String>,
    /// Number of completed meetings.
    #[serde(rename = "completedMeetings", default)]
    pub completed_meetings: u32,
    /// Profile rating, 1 through 5.
    #[serde(default)]
    pub rate: u32,
    /// Avatar image URL.
    #[serde(default)]
    pub image: String,
}

impl UserRecord {
    /// Creates a minimal profile with the given id, email, and name.
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            profession: None,
            sex: None,
            qualities: Vec::new(),
            completed_meetings: 0,
            rate: 0,
            image: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        let json = r#"{
            "_id": "u1",
            "email": "a@b.com",
            "name": "Ada",
            "profession": "p1",
            "sex": "female",
            "qualities": ["q1", "q2"],
            "completedMeetings": 42,
            "rate": 5,
            "image": "https://example.com/a.svg"
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.completed_meetings, 42);
        assert_eq!(user.qualities, vec!["q1", "q2"]);

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["_id"], "u1");
        assert_eq!(back["completedMeetings"], 42);
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"_id": "u2", "email": "b@c.com", "name": "Brin"}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert!(user.profession.is_none());
        assert!(user.qualities.is_empty());
        assert_eq!(user.rate, 0);
    }
}
