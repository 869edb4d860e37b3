use serde::{Deserialize, Serialize};

/// Registered account
///
/// `password` holds whatever the active credential scheme produced. With the
/// default plaintext scheme that is the password itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, case-sensitive identity key
    pub username: String,
    pub password: String,
    pub profile_name: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        profile_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            profile_name: profile_name.into(),
        }
    }
}
