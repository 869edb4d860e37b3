use crate::constants::KEY_SESSION;
use crate::models::SessionData;
use crate::store::BlobStore;

/// Owner of the single active session
pub struct SessionManager {
    blobs: BlobStore,
    data: SessionData,
}

impl SessionManager {
    /// Starts out with no session; call [`SessionManager::restore`] to pick up a saved one
    pub fn new(blobs: BlobStore) -> Self {
        Self {
            blobs,
            data: SessionData::default(),
        }
    }

    /// Adopt the persisted session if it carries a token
    pub fn restore(&mut self) -> bool {
        match self.blobs.load::<SessionData>(KEY_SESSION) {
            Some(saved) if saved.is_active() => {
                tracing::info!(
                    "Restored session for {}",
                    saved.current_user.as_deref().unwrap_or_default()
                );
                self.data = saved;
                true
            }
            Some(saved) if saved.token.as_deref().is_some_and(|t| !t.is_empty()) => {
                tracing::warn!("Ignoring saved session without a user");
                self.data = SessionData::default();
                false
            }
            _ => {
                self.data = SessionData::default();
                false
            }
        }
    }

    pub fn start(&mut self, token: String, username: String, profile_name: String) {
        self.data = SessionData {
            token: Some(token),
            current_user: Some(username),
            profile_name: Some(profile_name),
        };
        self.persist();
    }

    /// Forget the session and persist the cleared state so it cannot come back
    pub fn clear(&mut self) {
        self.data = SessionData::default();
        self.persist();
    }

    /// Forget the session in memory only (the store was wiped underneath us)
    pub fn forget(&mut self) {
        self.data = SessionData::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.data.token.as_deref()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.data.current_user.as_deref()
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.data.profile_name.as_deref()
    }

    fn persist(&self) {
        self.blobs.save(KEY_SESSION, &self.data);
    }
}
