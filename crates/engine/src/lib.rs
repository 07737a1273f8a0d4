pub use categories::Category;
pub use error::EngineError;
pub use expenses::{Expense, ExpenseNew, ExpensePatch};
pub use ops::{Engine, EngineBuilder};
pub use users::User;

mod categories;
mod error;
mod expenses;
mod ops;
mod password;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
