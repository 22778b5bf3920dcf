//! FinPal engine: typed records, owner-scoped CRUD and budget analysis.
//!
//! Every operation goes through [`Engine`], which is built once and shared
//! behind an `Arc`.

pub use accounts::Account;
pub use analysis::{
    AnalysisError, AnalysisInput, AnalysisResult, Analyzer, BudgetRules, Forecast,
    LocalAnalyzer, Recommendation, RemoteAnalyzer, RemoteAnalyzerConfig, TrendDirection,
};
pub use commands::{
    AccountInput, DebtInput, ExpenseInput, GoalInput, IncomeInput, NewUser, ProfileUpdate,
};
pub use currency::Currency;
pub use debts::Debt;
pub use error::EngineError;
pub use expenses::Expense;
pub use goals::Goal;
pub use incomes::Income;
pub use money::MoneyMinor;
pub use ops::{Engine, EngineBuilder};
pub use recurrence::RecurringPeriod;
pub use report::{FinancialReport, expense_breakdown, savings_rate};
pub use users::User;
pub use util::label_key;

pub mod analysis;

mod accounts;
mod commands;
mod currency;
mod debts;
mod error;
mod expenses;
mod goals;
mod incomes;
mod money;
mod ops;
mod recurrence;
mod report;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
