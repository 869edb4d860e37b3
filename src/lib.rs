//! Expense Ledger Library
//!
//! Single-session expense tracking: accounts, per-user expense lists, and the
//! active session, all kept in one best-effort blob slot.

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod facade;
pub mod filter;
pub mod models;
pub mod passcode;
pub mod records;
pub mod security;
pub mod session;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{LedgerError, Result};
pub use facade::{AccessFacade, Reply};
pub use filter::{aggregate, apply, apply_on, category_totals, FilterSpec, Period, Summary};
pub use models::{Category, Expense, NewExpense, User};
pub use store::{BlobStore, FileSlot, MemorySlot, Slot};

use passcode::RegistrationDesk;
use records::RecordStore;
use security::CredentialScheme;
use session::SessionManager;

/// Wire up a facade over `blobs`, load persisted records and restore any saved session
pub fn open_ledger_with(blobs: BlobStore, config: &Config) -> Result<AccessFacade> {
    let credentials = CredentialScheme::from_pepper(config.password_pepper.as_deref());
    let seed = User::new(
        config.admin_username.clone(),
        credentials.protect(&config.admin_password)?,
        config.admin_profile_name.clone(),
    );

    let mut records = RecordStore::new(blobs.clone(), seed);
    records.initialize();

    let mut session = SessionManager::new(blobs.clone());
    session.restore();

    Ok(AccessFacade::new(blobs, records, session, credentials))
}

/// Open the ledger on the storage named by `config`
pub fn open_ledger(config: &Config) -> Result<AccessFacade> {
    let blobs = match &config.storage_path {
        Some(path) => BlobStore::new(FileSlot::new(path)),
        None => BlobStore::new(MemorySlot::new()),
    };
    open_ledger_with(blobs, config)
}

/// Registration desk configured from `config`
pub fn registration_desk(config: &Config) -> RegistrationDesk {
    RegistrationDesk::new(config.passcode_ttl_secs, config.passcode_demo_fallback)
}
