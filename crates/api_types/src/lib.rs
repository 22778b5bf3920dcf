use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

/// How often a recurring expense or income repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringPeriod {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub access_token: String,
        /// Always `bearer`.
        pub token_type: String,
        /// Lifetime of the token in seconds.
        pub expires_in: u64,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub email: String,
        pub password: String,
        pub first_name: String,
        pub last_name: String,
    }

    /// Full profile replacement for `PUT /users/me`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub email: String,
        pub first_name: String,
        pub last_name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub email: String,
        pub first_name: String,
        pub last_name: String,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }
}

pub mod account {
    use super::*;

    /// Request body for both create and full update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub name: String,
        /// Free label such as `savings` or `checking`.
        pub kind: String,
        pub balance_minor: i64,
        #[serde(default)]
        pub currency: Currency,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub name: String,
        pub kind: String,
        pub balance_minor: i64,
        pub currency: Currency,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Must be > 0.
        pub amount_minor: i64,
        pub category: String,
        pub description: String,
        pub date: NaiveDate,
        #[serde(default)]
        pub is_recurring: bool,
        pub recurring_period: Option<RecurringPeriod>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub amount_minor: i64,
        pub category: String,
        pub description: String,
        pub date: NaiveDate,
        pub is_recurring: bool,
        pub recurring_period: Option<RecurringPeriod>,
    }
}

pub mod income {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeNew {
        /// Must be > 0.
        pub amount_minor: i64,
        pub source: String,
        pub description: String,
        pub date: NaiveDate,
        #[serde(default)]
        pub is_recurring: bool,
        pub recurring_period: Option<RecurringPeriod>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub amount_minor: i64,
        pub source: String,
        pub description: String,
        pub date: NaiveDate,
        pub is_recurring: bool,
        pub recurring_period: Option<RecurringPeriod>,
    }
}

pub mod debt {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtNew {
        pub name: String,
        pub amount_minor: i64,
        /// Annual interest rate, in percent.
        pub interest_rate: f64,
        pub minimum_payment_minor: i64,
        pub due_date: NaiveDate,
        /// Free label such as `student loan` or `credit card`.
        pub kind: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DebtView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub name: String,
        pub amount_minor: i64,
        pub interest_rate: f64,
        pub minimum_payment_minor: i64,
        pub due_date: NaiveDate,
        pub kind: String,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        pub target_minor: i64,
        #[serde(default)]
        pub current_minor: i64,
        pub deadline: Option<NaiveDate>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub name: String,
        pub target_minor: i64,
        pub current_minor: i64,
        pub deadline: Option<NaiveDate>,
        pub description: Option<String>,
        /// Percent of the target reached; may exceed 100.
        pub progress: f64,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetRecommendation {
        pub category: String,
        pub recommended_amount: f64,
        pub reason: String,
    }

    /// Projected spend per category for the next three months.
    ///
    /// Each month also carries a `total` key. Months are empty when no
    /// projection is available.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Forecast {
        pub month1: BTreeMap<String, f64>,
        pub month2: BTreeMap<String, f64>,
        pub month3: BTreeMap<String, f64>,
    }

    /// Amounts are in major units (e.g. `12.5` for 1250 minor units).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinancialReport {
        pub total_income: f64,
        pub total_expenses: f64,
        /// Percentage; negative when spending exceeds income.
        pub savings_rate: f64,
        pub debt_overview: Vec<debt::DebtView>,
        pub expense_breakdown: BTreeMap<String, f64>,
        pub recommendations: Vec<BudgetRecommendation>,
        pub forecasting: Forecast,
    }
}
