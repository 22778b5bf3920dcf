//! Command structs for engine write operations.
//!
//! Every create and full-update takes one of these. `normalized` trims the
//! text fields and rejects values the tables must never hold, so the ops
//! layer only sees clean input.

use chrono::NaiveDate;

use crate::{
    Currency, EngineError, RecurringPeriod, ResultEngine,
    analysis::FORECAST_TOTAL,
    recurrence::check_recurrence,
    util::{
        label_key, normalize_email, normalize_label, normalize_optional, normalize_required,
        require_non_negative, require_positive,
    },
};

/// Register a user. The password must already be hashed by the caller.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    pub(crate) fn normalized(self) -> ResultEngine<Self> {
        if self.hashed_password.is_empty() {
            return Err(EngineError::InvalidField(
                "password hash must not be empty".to_string(),
            ));
        }
        Ok(Self {
            email: normalize_email(&self.email)?,
            hashed_password: self.hashed_password,
            first_name: normalize_required(&self.first_name, "first_name")?,
            last_name: normalize_required(&self.last_name, "last_name")?,
        })
    }
}

/// Full replacement of the editable profile fields.
#[derive(Clone, Debug)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl ProfileUpdate {
    pub(crate) fn normalized(self) -> ResultEngine<Self> {
        Ok(Self {
            email: normalize_email(&self.email)?,
            first_name: normalize_required(&self.first_name, "first_name")?,
            last_name: normalize_required(&self.last_name, "last_name")?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct AccountInput {
    pub name: String,
    pub kind: String,
    pub balance_minor: i64,
    pub currency: Currency,
}

impl AccountInput {
    pub(crate) fn normalized(self) -> ResultEngine<Self> {
        Ok(Self {
            name: normalize_required(&self.name, "account name")?,
            kind: normalize_required(&self.kind, "account kind")?,
            ..self
        })
    }
}

#[derive(Clone, Debug)]
pub struct ExpenseInput {
    pub amount_minor: i64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
}

impl ExpenseInput {
    pub(crate) fn normalized(self) -> ResultEngine<Self> {
        require_positive(self.amount_minor, "expense amount")?;
        check_recurrence(self.is_recurring, self.recurring_period)?;
        let category = normalize_label(&self.category, "category")?;
        if label_key(&category) == FORECAST_TOTAL {
            return Err(EngineError::InvalidField(format!(
                "category \"{category}\" is reserved"
            )));
        }
        Ok(Self {
            category,
            description: self.description.trim().to_string(),
            ..self
        })
    }
}

#[derive(Clone, Debug)]
pub struct IncomeInput {
    pub amount_minor: i64,
    pub source: String,
    pub description: String,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
}

impl IncomeInput {
    pub(crate) fn normalized(self) -> ResultEngine<Self> {
        require_positive(self.amount_minor, "income amount")?;
        check_recurrence(self.is_recurring, self.recurring_period)?;
        Ok(Self {
            source: normalize_label(&self.source, "source")?,
            description: self.description.trim().to_string(),
            ..self
        })
    }
}

#[derive(Clone, Debug)]
pub struct DebtInput {
    pub name: String,
    pub amount_minor: i64,
    pub interest_rate: f64,
    pub minimum_payment_minor: i64,
    pub due_date: NaiveDate,
    pub kind: String,
}

impl DebtInput {
    pub(crate) fn normalized(self) -> ResultEngine<Self> {
        require_non_negative(self.amount_minor, "debt amount")?;
        require_non_negative(self.minimum_payment_minor, "minimum payment")?;
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(EngineError::InvalidAmount(
                "interest rate must be a finite value >= 0".to_string(),
            ));
        }
        Ok(Self {
            name: normalize_required(&self.name, "debt name")?,
            kind: normalize_required(&self.kind, "debt kind")?,
            ..self
        })
    }
}

#[derive(Clone, Debug)]
pub struct GoalInput {
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
}

impl GoalInput {
    pub(crate) fn normalized(self) -> ResultEngine<Self> {
        require_positive(self.target_minor, "goal target")?;
        require_non_negative(self.current_minor, "goal current amount")?;
        Ok(Self {
            name: normalize_required(&self.name, "goal name")?,
            description: normalize_optional(self.description.as_deref()),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn expense_rejects_non_positive_amount() {
        let input = ExpenseInput {
            amount_minor: 0,
            category: "Food".to_string(),
            description: String::new(),
            date: date(),
            is_recurring: false,
            recurring_period: None,
        };
        assert_eq!(
            input.normalized().unwrap_err(),
            EngineError::InvalidAmount("expense amount must be > 0".to_string())
        );
    }

    #[test]
    fn expense_category_is_collapsed() {
        let input = ExpenseInput {
            amount_minor: 1200,
            category: "  Dining   out ".to_string(),
            description: " lunch ".to_string(),
            date: date(),
            is_recurring: true,
            recurring_period: Some(RecurringPeriod::Weekly),
        }
        .normalized()
        .unwrap();
        assert_eq!(input.category, "Dining out");
        assert_eq!(input.description, "lunch");
    }

    #[test]
    fn expense_category_total_is_reserved() {
        let input = ExpenseInput {
            amount_minor: 1000,
            category: " TOTAL ".to_string(),
            description: String::new(),
            date: date(),
            is_recurring: false,
            recurring_period: None,
        };
        assert_eq!(
            input.normalized().unwrap_err(),
            EngineError::InvalidField("category \"TOTAL\" is reserved".to_string())
        );
    }

    #[test]
    fn debt_rejects_negative_rate() {
        let input = DebtInput {
            name: "Card".to_string(),
            amount_minor: 10_000,
            interest_rate: -1.0,
            minimum_payment_minor: 500,
            due_date: date(),
            kind: "credit card".to_string(),
        };
        assert!(matches!(
            input.normalized(),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn goal_drops_blank_description() {
        let goal = GoalInput {
            name: " Emergency fund ".to_string(),
            target_minor: 500_000,
            current_minor: 0,
            deadline: None,
            description: Some("   ".to_string()),
        }
        .normalized()
        .unwrap();
        assert_eq!(goal.name, "Emergency fund");
        assert_eq!(goal.description, None);
    }
}
