//! User table and per-user expense lists
//!
//! This is mechanism only: uniqueness of usernames is the caller's policy.
//! Every mutation is written through the [`BlobStore`] before returning.

use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::constants::{KEY_EXPENSES, KEY_USERS};
use crate::models::{Expense, NewExpense, User};
use crate::store::BlobStore;

/// Username -> expenses, newest first
pub type ExpenseTable = BTreeMap<String, Vec<Expense>>;

pub struct RecordStore {
    blobs: BlobStore,
    seed: User,
    users: Vec<User>,
    expenses: ExpenseTable,
}

impl RecordStore {
    /// Empty store; call [`RecordStore::initialize`] to load persisted data
    ///
    /// `seed` is the account created when no user table exists yet.
    pub fn new(blobs: BlobStore, seed: User) -> Self {
        Self {
            blobs,
            seed,
            users: Vec::new(),
            expenses: ExpenseTable::new(),
        }
    }

    /// Load both tables, seeding the default account on first run
    pub fn initialize(&mut self) {
        match self.blobs.load::<Vec<User>>(KEY_USERS) {
            Some(users) => self.users = users,
            None => {
                tracing::info!("No user table found, seeding {}", self.seed.username);
                self.users = vec![self.seed.clone()];
                self.save_users();
            }
        }

        if let Some(expenses) = self.blobs.load::<ExpenseTable>(KEY_EXPENSES) {
            self.expenses = expenses;
        }

        tracing::info!(
            "Records initialized: {} users, {} expense lists",
            self.users.len(),
            self.expenses.len()
        );
    }

    /// First user with exactly this username
    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Append a user unconditionally
    pub fn create_user(&mut self, user: User) {
        tracing::debug!("Adding user {}", user.username);
        self.users.push(user);
        self.save_users();
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Assign an id, prepend to the user's list, and return the stored record
    pub fn add_expense(&mut self, username: &str, expense: NewExpense) -> Expense {
        let stored = expense.into_expense(Uuid::new_v4(), Utc::now());
        self.expenses
            .entry(username.to_string())
            .or_default()
            .insert(0, stored.clone());
        self.save_expenses();
        tracing::debug!("Added expense {} for {}", stored.id, username);
        stored
    }

    /// The user's expenses, newest first; empty when the user has none
    pub fn list_expenses(&self, username: &str) -> &[Expense] {
        self.expenses
            .get(username)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Remove the expense with `id`; true when something was removed
    pub fn delete_expense(&mut self, username: &str, id: Uuid) -> bool {
        let Some(list) = self.expenses.get_mut(username) else {
            return false;
        };
        let before = list.len();
        list.retain(|e| e.id != id);
        if list.len() == before {
            return false;
        }
        self.save_expenses();
        tracing::debug!("Deleted expense {} for {}", id, username);
        true
    }

    pub fn expense_table(&self) -> &ExpenseTable {
        &self.expenses
    }

    /// Drop in-memory state and start over from the store
    pub fn reset(&mut self) {
        self.users.clear();
        self.expenses.clear();
        self.initialize();
    }

    fn save_users(&self) {
        self.blobs.save(KEY_USERS, &self.users);
    }

    fn save_expenses(&self) {
        self.blobs.save(KEY_EXPENSES, &self.expenses);
    }
}
