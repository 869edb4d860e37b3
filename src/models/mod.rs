pub mod expense;
pub mod session;
pub mod user;

pub use expense::{Category, Expense, NewExpense};
pub use session::SessionData;
pub use user::User;
