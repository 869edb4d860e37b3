//! Integration tests for the Expense Ledger
//!
//! These tests drive the public API the way the UI does: through the facade,
//! the filter functions, the registration desk and the export.

use chrono::{Duration, Local, Utc};
use expense_ledger::passcode::{PasscodeDelivery, PasscodeSender, RegistrationForm};
use expense_ledger::{
    aggregate, apply, category_totals, export, open_ledger, open_ledger_with, registration_desk,
    AccessFacade, BlobStore, Category, Config, FilterSpec, LedgerError, MemorySlot, NewExpense,
    Period, Slot,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashSet;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Facade over a shared in-memory slot; reopening the same slot simulates a reload
fn open(slot: &MemorySlot) -> AccessFacade {
    open_ledger_with(BlobStore::new(slot.clone()), &Config::default())
        .expect("Failed to open ledger")
}

fn expense(description: &str, amount: i64, category: Category, days_ago: i64) -> NewExpense {
    NewExpense::new(
        description,
        Decimal::from(amount),
        category,
        Local::now().date_naive() - Duration::days(days_ago),
    )
}

fn logged_in_alice(slot: &MemorySlot) -> AccessFacade {
    let mut ledger = open(slot);
    assert!(ledger.register("alice", "secret1", "Alice A").success);
    assert!(ledger.login("alice", "secret1").success);
    ledger
}

/// Sender that remembers the last code it was asked to deliver
#[derive(Default)]
struct CapturingSender {
    last_code: RefCell<Option<String>>,
}

impl PasscodeSender for CapturingSender {
    fn send(&self, _email: &str, _profile_name: &str, code: &str) -> expense_ledger::Result<()> {
        *self.last_code.borrow_mut() = Some(code.to_string());
        Ok(())
    }
}

// =============================================================================
// Accounts
// =============================================================================

#[test]
fn test_first_run_seeds_admin_account() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    assert_eq!(ledger.records().users().len(), 1);
    assert!(ledger.login("admin", "admin123").success);
}

#[test]
fn test_registered_users_resolve_after_reload() {
    let slot = MemorySlot::new();
    {
        let mut ledger = open(&slot);
        for name in ["alice", "bob", "carol"] {
            assert!(ledger.register(name, "password", name).success);
        }
    }

    let ledger = open(&slot);
    assert_eq!(ledger.records().users().len(), 4);
    for name in ["alice", "bob", "carol"] {
        assert_eq!(ledger.records().find_user(name).unwrap().username, name);
    }
}

#[test]
fn test_duplicate_registration_fails() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    assert!(ledger.register("alice", "secret1", "Alice A").success);

    let again = ledger.register("alice", "secret1", "Alice A");
    assert!(!again.success);
    assert_eq!(again.message.as_deref(), Some("Username already exists"));

    let admin = ledger.register("admin", "whatever", "Impostor");
    assert!(!admin.success);
}

#[test]
fn test_usernames_are_case_sensitive() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    assert!(ledger.register("Admin", "secret1", "Other Admin").success);
    assert!(!ledger.login("Admin", "admin123").success);
    assert!(ledger.login("Admin", "secret1").success);
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_session_survives_reload() {
    let slot = MemorySlot::new();
    let token = logged_in_alice(&slot)
        .login("alice", "secret1")
        .data
        .unwrap();

    let ledger = open(&slot);
    assert!(ledger.is_authenticated());
    assert_eq!(ledger.current_user(), Some("alice"));
    assert_eq!(ledger.profile_name(), Some("Alice A"));

    let raw: Value = serde_json::from_str(&slot.read().unwrap()).unwrap();
    assert_eq!(raw["session"]["token"], token.as_str());
    assert_eq!(raw["session"]["currentUser"], "alice");
}

#[test]
fn test_logout_survives_reload() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    ledger.logout();

    let reopened = open(&slot);
    assert!(!reopened.is_authenticated());
    assert!(reopened.list_expenses().is_empty());
}

#[test]
fn test_tokens_differ_between_logins() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    let first = ledger.login("admin", "admin123").data.unwrap();
    let second = ledger.login("admin", "admin123").data.unwrap();
    assert_ne!(first, second);
}

// =============================================================================
// Expenses
// =============================================================================

#[test]
fn test_expenses_listed_newest_first() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    let e1 = ledger.add_expense(expense("E1", 1, Category::Food, 0)).data.unwrap();
    let e2 = ledger.add_expense(expense("E2", 2, Category::Food, 0)).data.unwrap();
    let e3 = ledger.add_expense(expense("E3", 3, Category::Food, 0)).data.unwrap();

    let ids: Vec<_> = ledger.list_expenses().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![e3.id, e2.id, e1.id]);
}

#[test]
fn test_expense_ids_are_unique() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    let mut ids = HashSet::new();
    for i in 0..200 {
        let added = ledger.add_expense(expense("burst", i + 1, Category::Other, 0));
        assert!(ids.insert(added.data.unwrap().id));
    }
    assert_eq!(ledger.list_expenses().len(), 200);
}

#[test]
fn test_delete_removes_exactly_one() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    let keep = ledger.add_expense(expense("keep", 1, Category::Food, 0)).data.unwrap();
    let gone = ledger.add_expense(expense("gone", 2, Category::Food, 0)).data.unwrap();

    assert!(ledger.delete_expense(gone.id).success);
    assert_eq!(ledger.list_expenses(), &[keep.clone()]);

    let before = ledger.list_expenses().to_vec();
    assert!(!ledger.delete_expense(gone.id).success);
    assert_eq!(ledger.list_expenses(), before.as_slice());
}

#[test]
fn test_expenses_are_private_to_their_owner() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    let mine = ledger.add_expense(expense("mine", 5, Category::Food, 0)).data.unwrap();

    ledger.logout();
    assert!(ledger.login("admin", "admin123").success);
    assert!(ledger.list_expenses().is_empty());
    assert!(!ledger.delete_expense(mine.id).success);

    ledger.login("alice", "secret1");
    assert_eq!(ledger.list_expenses().len(), 1);
}

#[test]
fn test_reload_reproduces_tables() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    ledger.add_expense(expense("Groceries", 40, Category::Food, 1));
    ledger.add_expense(expense("Electricity", 75, Category::Utilities, 3));

    let reloaded = open(&slot);
    assert_eq!(reloaded.records().users(), ledger.records().users());
    assert_eq!(
        reloaded.records().expense_table(),
        ledger.records().expense_table()
    );
    assert_eq!(reloaded.list_expenses(), ledger.list_expenses());
}

#[test]
fn test_fractional_amounts_reload_exactly() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    let amounts = [
        Decimal::new(99_999_999_999, 2),
        Decimal::new(1_234_567_891, 2),
        Decimal::new(1, 2),
        Decimal::new(3333, 2),
        Decimal::new(10_10, 2),
    ];
    for amount in amounts {
        let added = ledger.add_expense(NewExpense::new(
            "precise",
            amount,
            Category::Other,
            Local::now().date_naive(),
        ));
        assert!(added.success);
    }

    let reloaded = open(&slot);
    let reloaded_amounts: Vec<Decimal> =
        reloaded.list_expenses().iter().map(|e| e.amount).collect();
    let expected: Vec<Decimal> = amounts.iter().rev().copied().collect();
    assert_eq!(reloaded_amounts, expected);
    assert_eq!(reloaded.list_expenses(), ledger.list_expenses());
}

#[test]
fn test_out_of_range_amounts_never_reach_storage() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    ledger.add_expense(expense("Rent", 900, Category::Utilities, 0));

    let too_big = NewExpense::new(
        "Yacht",
        Decimal::MAX,
        Category::Other,
        Local::now().date_naive(),
    );
    assert!(!ledger.add_expense(too_big).success);

    let too_precise = NewExpense::new(
        "Fuel",
        Decimal::new(1_234_567_890_123_456_789, 2),
        Category::Transport,
        Local::now().date_naive(),
    );
    assert!(!ledger.add_expense(too_precise).success);

    let summary = aggregate(ledger.list_expenses());
    assert_eq!(summary.total, Decimal::from(900));

    let reloaded = open(&slot);
    assert_eq!(reloaded.list_expenses().len(), 1);
    assert_eq!(reloaded.list_expenses(), ledger.list_expenses());
}

#[test]
fn test_persisted_layout() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    ledger.add_expense(NewExpense::new(
        "Taxi",
        Decimal::new(1275, 2),
        Category::Transport,
        chrono::NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
    ));

    let raw: Value = serde_json::from_str(&slot.read().unwrap()).unwrap();
    assert_eq!(raw["users"][1]["profileName"], "Alice A");
    let stored = &raw["expenses"]["alice"][0];
    assert_eq!(stored["description"], "Taxi");
    assert_eq!(stored["amount"], 12.75);
    assert_eq!(stored["category"], "transport");
    assert_eq!(stored["date"], "2024-02-10");
    assert!(stored["id"].is_string());
    assert!(stored["timestamp"].is_string());
}

#[test]
fn test_corrupt_storage_starts_fresh() {
    let slot = MemorySlot::with_contents("{{{ definitely not json");
    let mut ledger = open(&slot);
    assert!(!ledger.is_authenticated());
    assert!(ledger.login("admin", "admin123").success);

    // The seed overwrote the garbage
    let raw: Value = serde_json::from_str(&slot.read().unwrap()).unwrap();
    assert!(raw["users"].is_array());
}

#[test]
fn test_wipe_then_reload() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    ledger.add_expense(expense("Lunch", 12, Category::Food, 0));
    ledger.wipe_all_data();

    let reopened = open(&slot);
    assert!(!reopened.is_authenticated());
    assert_eq!(reopened.records().users().len(), 1);
    assert!(reopened.records().expense_table().is_empty());
}

// =============================================================================
// Filtering and Aggregates
// =============================================================================

#[test]
fn test_filtered_view_and_unfiltered_chart() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    ledger.add_expense(expense("Morning Coffee", 4, Category::Food, 0));
    ledger.add_expense(expense("coffee break", 6, Category::Food, 3));
    ledger.add_expense(expense("Tea", 2, Category::Food, 10));
    ledger.add_expense(expense("Cinema", 15, Category::Entertainment, 40));

    let week = apply(ledger.list_expenses(), &FilterSpec::default().period(Period::Week));
    assert_eq!(week.len(), 2);

    let coffee = apply(ledger.list_expenses(), &FilterSpec::default().search("coffee"));
    let summary = aggregate(&coffee);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total, Decimal::from(10));
    assert_eq!(summary.average, Decimal::from(5));

    // Chart totals ignore the active filter
    let totals = category_totals(ledger.list_expenses(), &Category::ALL);
    assert_eq!(totals[&Category::Food], Decimal::from(12));
    assert_eq!(totals[&Category::Entertainment], Decimal::from(15));
}

// =============================================================================
// Registration With Passcode
// =============================================================================

#[test]
fn test_passcode_registration_flow() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    let mut desk = registration_desk(&Config::default());
    let sender = CapturingSender::default();
    let now = Utc::now();

    let issued = desk
        .request_passcode("bob@example.com", "Bob B", &sender, now)
        .unwrap();
    assert_eq!(issued.delivery, PasscodeDelivery::Sent);
    let code = sender.last_code.borrow().clone().unwrap();

    let mut form = RegistrationForm {
        username: "bob".into(),
        password: "hunter22".into(),
        profile_name: "Bob B".into(),
        passcode: "000000".into(),
    };
    let wrong = desk.complete(&mut ledger, &form, now);
    assert!(!wrong.success);
    assert!(desk.has_pending(now));

    form.passcode = code;
    assert!(desk.complete(&mut ledger, &form, now).success);
    assert!(!desk.has_pending(now));
    assert!(!ledger.is_authenticated());
    assert!(ledger.login("bob", "hunter22").success);
}

#[test]
fn test_passcode_expires() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    let mut desk = registration_desk(&Config::default());
    let sender = CapturingSender::default();
    let now = Utc::now();

    desk.request_passcode("bob@example.com", "Bob B", &sender, now)
        .unwrap();
    let form = RegistrationForm {
        username: "bob".into(),
        password: "hunter22".into(),
        profile_name: "Bob B".into(),
        passcode: sender.last_code.borrow().clone().unwrap(),
    };

    let late = desk.complete(&mut ledger, &form, now + Duration::minutes(16));
    assert!(!late.success);
    assert_eq!(
        late.message.as_deref(),
        Some(LedgerError::PasscodeExpired.to_string().as_str())
    );
    assert!(ledger.records().find_user("bob").is_none());
}

#[test]
fn test_registration_form_rules() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    let mut desk = registration_desk(&Config::default());
    let sender = CapturingSender::default();
    let now = Utc::now();
    desk.request_passcode("bob@example.com", "Bob B", &sender, now)
        .unwrap();
    let code = sender.last_code.borrow().clone().unwrap();

    let short_name = RegistrationForm {
        username: "bo".into(),
        password: "hunter22".into(),
        profile_name: "Bob B".into(),
        passcode: code.clone(),
    };
    assert!(!desk.complete(&mut ledger, &short_name, now).success);

    let short_password = RegistrationForm {
        username: "bob".into(),
        password: "123".into(),
        profile_name: "Bob B".into(),
        passcode: code.clone(),
    };
    assert!(!desk.complete(&mut ledger, &short_password, now).success);

    let taken = RegistrationForm {
        username: "admin".into(),
        password: "hunter22".into(),
        profile_name: "Bob B".into(),
        passcode: code,
    };
    let reply = desk.complete(&mut ledger, &taken, now);
    assert_eq!(reply.message.as_deref(), Some("Username already exists"));
    // Code stays usable after a failed attempt
    assert!(desk.has_pending(now));
}

#[test]
fn test_complete_without_passcode() {
    let slot = MemorySlot::new();
    let mut ledger = open(&slot);
    let mut desk = registration_desk(&Config::default());
    let form = RegistrationForm {
        username: "bob".into(),
        password: "hunter22".into(),
        profile_name: "Bob B".into(),
        passcode: "123456".into(),
    };
    let reply = desk.complete(&mut ledger, &form, Utc::now());
    assert!(!reply.success);
    assert_eq!(
        reply.message.as_deref(),
        Some(LedgerError::PasscodeMissing.to_string().as_str())
    );
}

// =============================================================================
// Export and File Storage
// =============================================================================

#[test]
fn test_export_filtered_view() {
    let slot = MemorySlot::new();
    let mut ledger = logged_in_alice(&slot);
    ledger.add_expense(expense("Bus", 3, Category::Transport, 0));
    ledger.add_expense(expense("Pizza", 20, Category::Food, 0));

    let food = apply(
        ledger.list_expenses(),
        &FilterSpec::default().category(Category::Food),
    );
    let csv = export::to_csv(&food).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Pizza"));
    assert!(lines[1].ends_with("Food & Dining,20.00"));
}

#[test]
fn test_file_storage_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("data").join("ledger.json");
    let config = Config {
        storage_path: Some(path.to_string_lossy().into_owned()),
        ..Config::default()
    };

    let expense_id = {
        let mut ledger = open_ledger(&config).unwrap();
        assert!(ledger.register("alice", "secret1", "Alice A").success);
        assert!(ledger.login("alice", "secret1").success);
        ledger
            .add_expense(expense("Rent", 900, Category::Utilities, 2))
            .data
            .unwrap()
            .id
    };

    assert!(path.exists());
    let ledger = open_ledger(&config).unwrap();
    assert_eq!(ledger.current_user(), Some("alice"));
    assert_eq!(ledger.list_expenses()[0].id, expense_id);
}

#[test]
fn test_peppered_storage_hides_passwords() {
    let slot = MemorySlot::new();
    let config = Config {
        password_pepper: Some("server-pepper".into()),
        ..Config::default()
    };
    let mut ledger = open_ledger_with(BlobStore::new(slot.clone()), &config).unwrap();
    assert!(ledger.register("alice", "secret1", "Alice A").success);

    let raw = slot.read().unwrap();
    assert!(!raw.contains("secret1"));
    assert!(!raw.contains("admin123"));
    assert!(ledger.login("admin", "admin123").success);
    assert!(ledger.login("alice", "secret1").success);
}
