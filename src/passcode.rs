//! Passcode-gated registration
//!
//! A six-digit code is sent to the applicant's email before an account may
//! be created. Delivery goes through a [`PasscodeSender`]; when it fails and
//! demo fallback is on, the code is handed back to the caller to show instead.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::constants::{ERR_PASSCODE_FAILED, ERR_REGISTRATION_FAILED, PASSCODE_MAX, PASSCODE_MIN};
use crate::error::{LedgerError, Result};
use crate::facade::{AccessFacade, Reply};
use crate::validation::{is_valid_email, require, validate_password, validate_username};

/// Outbound delivery of a passcode, e.g. an email relay
pub trait PasscodeSender {
    fn send(&self, email: &str, profile_name: &str, code: &str) -> Result<()>;
}

/// Sender that only logs; useful offline
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

impl PasscodeSender for LogSender {
    fn send(&self, email: &str, profile_name: &str, _code: &str) -> Result<()> {
        tracing::info!("Passcode for {} <{}> logged instead of sent", profile_name, email);
        Ok(())
    }
}

/// How the code reached the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasscodeDelivery {
    Sent,
    /// Delivery failed, show this code directly
    Demo { code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasscodeIssued {
    pub delivery: PasscodeDelivery,
    pub expires_at: DateTime<Utc>,
}

/// Registration form fields
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub profile_name: String,
    pub passcode: String,
}

#[derive(Debug, Clone)]
struct PendingPasscode {
    code: String,
    expires_at: DateTime<Utc>,
}

/// Issues passcodes and completes registrations against them
pub struct RegistrationDesk {
    ttl: Duration,
    demo_fallback: bool,
    pending: Option<PendingPasscode>,
}

impl RegistrationDesk {
    pub fn new(ttl_secs: i64, demo_fallback: bool) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs),
            demo_fallback,
            pending: None,
        }
    }

    /// Generate a code and send it; replaces any earlier code
    pub fn request_passcode(
        &mut self,
        email: &str,
        profile_name: &str,
        sender: &dyn PasscodeSender,
        now: DateTime<Utc>,
    ) -> Result<PasscodeIssued> {
        let email = email.trim();
        let profile_name = profile_name.trim();
        if email.is_empty() || profile_name.is_empty() {
            return Err(LedgerError::InvalidInput(
                "Please enter both email and profile name".to_string(),
            ));
        }
        if !is_valid_email(email) {
            return Err(LedgerError::InvalidInput(
                "Please enter a valid email address".to_string(),
            ));
        }

        let code = generate_passcode();
        let expires_at = now + self.ttl;
        self.pending = Some(PendingPasscode {
            code: code.clone(),
            expires_at,
        });

        let delivery = match sender.send(email, profile_name, &code) {
            Ok(()) => {
                tracing::info!("Passcode sent to {}", email);
                PasscodeDelivery::Sent
            }
            Err(e) if self.demo_fallback => {
                tracing::warn!("Passcode delivery failed, using demo mode: {}", e);
                tracing::info!("Demo passcode for {}: {}", email, code);
                PasscodeDelivery::Demo { code }
            }
            Err(e) => {
                self.pending = None;
                tracing::error!("Passcode delivery failed: {}", e);
                return Err(match e {
                    LedgerError::Delivery(_) => e,
                    other => LedgerError::Delivery(other.user_message(ERR_PASSCODE_FAILED)),
                });
            }
        };

        Ok(PasscodeIssued {
            delivery,
            expires_at,
        })
    }

    /// Check the form and passcode, then register through the facade
    pub fn complete(
        &mut self,
        facade: &mut AccessFacade,
        form: &RegistrationForm,
        now: DateTime<Utc>,
    ) -> Reply<()> {
        if let Err(e) = self.check(form, now) {
            tracing::warn!("Registration rejected: {}", e);
            return Reply::failure(e.user_message(ERR_REGISTRATION_FAILED));
        }

        let reply = facade.register(
            form.username.trim(),
            form.password.trim(),
            form.profile_name.trim(),
        );
        if reply.success {
            self.pending = None;
        }
        reply
    }

    /// Whether a code is waiting to be used at `now`
    pub fn has_pending(&self, now: DateTime<Utc>) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| now < p.expires_at)
    }

    fn check(&mut self, form: &RegistrationForm, now: DateTime<Utc>) -> Result<()> {
        require(&form.username, "Username")?;
        require(&form.password, "Password")?;
        require(&form.profile_name, "Profile name")?;
        require(&form.passcode, "Passcode")?;
        validate_username(&form.username)?;
        validate_password(&form.password)?;

        let pending = self.pending.as_ref().ok_or(LedgerError::PasscodeMissing)?;
        if now >= pending.expires_at {
            self.pending = None;
            return Err(LedgerError::PasscodeExpired);
        }
        if form.passcode.trim() != pending.code {
            return Err(LedgerError::PasscodeMismatch);
        }
        Ok(())
    }
}

/// Six random digits
fn generate_passcode() -> String {
    rand::thread_rng()
        .gen_range(PASSCODE_MIN..=PASSCODE_MAX)
        .to_string()
}
