use rust_decimal::Decimal;

use crate::constants::{
    ERR_AMOUNT_TOO_LARGE, ERR_AMOUNT_TOO_PRECISE, MAX_AMOUNT_CENTS, MAX_AMOUNT_SCALE,
    MIN_PASSWORD_LEN, MIN_USERNAME_LEN,
};
use crate::error::{LedgerError, Result};
use crate::models::NewExpense;

/// Username must be at least `MIN_USERNAME_LEN` characters after trimming
pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(LedgerError::InvalidInput(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        )));
    }
    Ok(())
}

/// Password must be at least `MIN_PASSWORD_LEN` characters after trimming
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().chars().count() < MIN_PASSWORD_LEN {
        return Err(LedgerError::InvalidInput(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Loose email shape check: `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // Need something on both sides of at least one dot in the domain
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Required free-text field
pub fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Description present and amount strictly positive, bounded, and in whole cents
pub fn validate_expense(expense: &NewExpense) -> Result<()> {
    require(&expense.description, "Description")?;
    validate_amount(expense.amount)
}

/// Amount in `(0, MAX_AMOUNT_CENTS / 100]` with at most `MAX_AMOUNT_SCALE` decimals
pub fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if amount > Decimal::new(MAX_AMOUNT_CENTS, 2) {
        return Err(LedgerError::InvalidInput(ERR_AMOUNT_TOO_LARGE.to_string()));
    }
    // Trailing zeros don't count: 10.500 is fine
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(LedgerError::InvalidInput(ERR_AMOUNT_TOO_PRECISE.to_string()));
    }
    Ok(())
}
