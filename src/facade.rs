//! The single entry point the UI talks to
//!
//! Every operation runs synchronously and answers with a [`Reply`]. Nothing
//! here returns an error to the caller: failures become `success: false`
//! with a message meant for the user.

use serde::Serialize;
use uuid::Uuid;

use crate::constants::{
    ERR_ADD_EXPENSE_FAILED, ERR_LOGIN_FAILED, ERR_MISSING_LOGIN_FIELDS, ERR_REGISTRATION_FAILED,
};
use crate::error::{LedgerError, Result};
use crate::models::{Expense, NewExpense, User};
use crate::records::RecordStore;
use crate::security::{generate_session_token, CredentialScheme};
use crate::session::SessionManager;
use crate::store::BlobStore;
use crate::validation::validate_expense;

/// Uniform result shape: `{ success, message?, data? }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Reply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Convert an internal result, hiding internal failures behind `fallback`
    pub fn from_result(result: Result<T>, fallback: &str) -> Self {
        match result {
            Ok(data) => Reply::ok(data),
            Err(e) => Reply::failure(e.user_message(fallback)),
        }
    }
}

impl Reply<()> {
    /// Success without a payload
    pub fn done() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    fn from_unit(result: Result<()>, fallback: &str) -> Self {
        match result {
            Ok(()) => Reply::done(),
            Err(e) => Reply::failure(e.user_message(fallback)),
        }
    }
}

/// Session plus records, behind one boundary
pub struct AccessFacade {
    blobs: BlobStore,
    records: RecordStore,
    session: SessionManager,
    credentials: CredentialScheme,
}

impl AccessFacade {
    pub fn new(
        blobs: BlobStore,
        records: RecordStore,
        session: SessionManager,
        credentials: CredentialScheme,
    ) -> Self {
        Self {
            blobs,
            records,
            session,
            credentials,
        }
    }

    /// Check the password and start a session; the reply carries the token
    pub fn login(&mut self, username: &str, password: &str) -> Reply<String> {
        Reply::from_result(self.try_login(username, password), ERR_LOGIN_FAILED)
    }

    fn try_login(&mut self, username: &str, password: &str) -> Result<String> {
        if username.is_empty() || password.is_empty() {
            return Err(LedgerError::InvalidInput(ERR_MISSING_LOGIN_FIELDS.to_string()));
        }

        let user = self
            .records
            .find_user(username)
            .ok_or(LedgerError::InvalidCredentials)?;

        if !self.credentials.verify(&user.password, password)? {
            tracing::warn!("Failed login for {}", username);
            return Err(LedgerError::InvalidCredentials);
        }

        let profile_name = user.profile_name.clone();
        let token = generate_session_token();
        self.session
            .start(token.clone(), username.to_string(), profile_name);
        tracing::info!("User {} logged in", username);
        Ok(token)
    }

    /// Create an account; does not log the new user in
    pub fn register(&mut self, username: &str, password: &str, profile_name: &str) -> Reply<()> {
        Reply::from_unit(
            self.try_register(username, password, profile_name),
            ERR_REGISTRATION_FAILED,
        )
    }

    fn try_register(&mut self, username: &str, password: &str, profile_name: &str) -> Result<()> {
        if self.records.find_user(username).is_some() {
            tracing::info!("Registration rejected, {} already exists", username);
            return Err(LedgerError::UserAlreadyExists);
        }
        let stored = self.credentials.protect(password)?;
        self.records
            .create_user(User::new(username, stored, profile_name));
        tracing::info!("New user registered: {}", username);
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.current_user() {
            tracing::info!("User {} logged out", user);
        }
        self.session.clear();
    }

    /// Pick up a session saved by an earlier run
    pub fn restore_session(&mut self) -> bool {
        self.session.restore()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.current_user()
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.session.profile_name()
    }

    /// Expenses of the logged-in user, newest first; empty without a session
    pub fn list_expenses(&self) -> &[Expense] {
        match self.session.current_user() {
            Some(user) => self.records.list_expenses(user),
            None => &[],
        }
    }

    pub fn add_expense(&mut self, expense: NewExpense) -> Reply<Expense> {
        Reply::from_result(self.try_add_expense(expense), ERR_ADD_EXPENSE_FAILED)
    }

    fn try_add_expense(&mut self, expense: NewExpense) -> Result<Expense> {
        let user = self
            .session
            .current_user()
            .ok_or(LedgerError::NotAuthenticated)?;
        if let Err(e) = validate_expense(&expense) {
            tracing::warn!("Rejected expense: {}", e);
            return Err(e);
        }
        Ok(self.records.add_expense(user, expense))
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Reply<()> {
        let Some(user) = self.session.current_user() else {
            return Reply::failure(LedgerError::NotAuthenticated.to_string());
        };
        if self.records.delete_expense(user, id) {
            Reply::done()
        } else {
            Reply::failure(LedgerError::ExpenseNotFound.to_string())
        }
    }

    /// Erase everything in storage and start over from first run
    pub fn wipe_all_data(&mut self) {
        tracing::info!("Wiping all stored data");
        self.blobs.clear();
        self.session.forget();
        self.records.reset();
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }
}
