// =============================================================================
// Blob Keys
// =============================================================================

/// Blob holding the user table
pub const KEY_USERS: &str = "users";

/// Blob holding the username -> expenses mapping
pub const KEY_EXPENSES: &str = "expenses";

/// Blob holding the active session
pub const KEY_SESSION: &str = "session";

// =============================================================================
// Defaults
// =============================================================================

/// Seed account created on first run
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_PROFILE_NAME: &str = "Admin User";

/// One-time passcode lifetime in seconds (15 minutes)
pub const DEFAULT_PASSCODE_TTL_SECS: i64 = 900;

/// Passcodes are six digits
pub const PASSCODE_MIN: u32 = 100_000;
pub const PASSCODE_MAX: u32 = 999_999;

/// Prefix for generated session tokens
pub const SESSION_TOKEN_PREFIX: &str = "session";

// =============================================================================
// Validation Limits
// =============================================================================

/// Minimum username length (after trimming)
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length (after trimming)
pub const MIN_PASSWORD_LEN: usize = 6;

/// Largest accepted expense amount (999,999,999.99)
/// With `MAX_AMOUNT_SCALE`, amounts stay within the digits an f64 holds exactly
pub const MAX_AMOUNT_CENTS: i64 = 99_999_999_999;

/// Maximum number of decimal places in an expense amount
pub const MAX_AMOUNT_SCALE: u32 = 2;

// =============================================================================
// Messages
// =============================================================================

/// Unknown username or wrong password
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registration with a username that is already taken
pub const ERR_USERNAME_TAKEN: &str = "Username already exists";

/// Expense operation attempted without an active session
pub const ERR_NOT_LOGGED_IN: &str = "Not logged in";

/// Delete of an id the current user does not have
pub const ERR_EXPENSE_NOT_FOUND: &str = "Expense not found";

/// Login form submitted with an empty field
pub const ERR_MISSING_LOGIN_FIELDS: &str = "Please enter both username and password";

/// Export requested for an empty list
pub const ERR_NOTHING_TO_EXPORT: &str = "No expenses to export";

/// Amount over `MAX_AMOUNT_CENTS`
pub const ERR_AMOUNT_TOO_LARGE: &str = "Amount must not exceed 999999999.99";

/// Amount with more than `MAX_AMOUNT_SCALE` decimal places
pub const ERR_AMOUNT_TOO_PRECISE: &str = "Amount can have at most 2 decimal places";

/// Shown in place of an internal failure during login
pub const ERR_LOGIN_FAILED: &str = "Login failed";

/// Shown in place of an internal failure during registration
pub const ERR_REGISTRATION_FAILED: &str = "Registration failed";

/// Shown in place of an internal failure while adding an expense
pub const ERR_ADD_EXPENSE_FAILED: &str = "Could not add expense";

/// Shown in place of an internal failure while sending a passcode
pub const ERR_PASSCODE_FAILED: &str = "Could not send passcode";
