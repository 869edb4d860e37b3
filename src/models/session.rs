use serde::{Deserialize, Serialize};

/// Persisted session blob
///
/// `token` and `current_user` are either both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
}

impl SessionData {
    /// A usable session has a non-empty token and a user
    pub fn is_active(&self) -> bool {
        let has_token = self.token.as_deref().is_some_and(|t| !t.is_empty());
        has_token && self.current_user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_session_serializes_nulls() {
        let json = serde_json::to_value(SessionData::default()).unwrap();
        assert!(json["token"].is_null());
        assert!(json["currentUser"].is_null());
        assert!(json["profileName"].is_null());
    }

    #[test]
    fn test_is_active() {
        let mut data = SessionData::default();
        assert!(!data.is_active());

        data.token = Some(String::new());
        data.current_user = Some("alice".into());
        assert!(!data.is_active());

        data.token = Some("session-1".into());
        assert!(data.is_active());

        data.current_user = None;
        assert!(!data.is_active());
    }
}
