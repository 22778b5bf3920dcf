//! Financial summary report and the aggregates it is built from.

use std::collections::BTreeMap;

use crate::{
    Debt, Expense, Income, MoneyMinor, ResultEngine,
    analysis::{AnalysisInput, DebtSample, ExpenseSample, Forecast, Recommendation},
};

/// Assembled summary for one user. Amounts are in major units.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancialReport {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Percentage of income left after expenses; negative when overspending.
    pub savings_rate: f64,
    pub debt_overview: Vec<Debt>,
    pub expense_breakdown: BTreeMap<String, f64>,
    pub recommendations: Vec<Recommendation>,
    pub forecasting: Forecast,
}

/// `(income - expenses) / income * 100`, or `0` without income.
#[must_use]
pub fn savings_rate(total_income: f64, total_expenses: f64) -> f64 {
    if total_income > 0.0 {
        (total_income - total_expenses) / total_income * 100.0
    } else {
        0.0
    }
}

/// Total spent per category label.
pub fn expense_breakdown(expenses: &[Expense]) -> ResultEngine<BTreeMap<String, f64>> {
    let mut minor: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for e in expenses {
        minor.entry(e.category.as_str()).or_default().push(e.amount_minor);
    }
    minor
        .into_iter()
        .map(|(category, amounts)| {
            Ok((category.to_string(), MoneyMinor::checked_sum(amounts)?.to_major()))
        })
        .collect()
}

/// Totals of the fetched rows, in minor units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Totals {
    pub income: MoneyMinor,
    pub expenses: MoneyMinor,
}

impl Totals {
    pub(crate) fn of(incomes: &[Income], expenses: &[Expense]) -> ResultEngine<Self> {
        Ok(Self {
            income: MoneyMinor::checked_sum(incomes.iter().map(|i| i.amount_minor))?,
            expenses: MoneyMinor::checked_sum(expenses.iter().map(|e| e.amount_minor))?,
        })
    }
}

pub(crate) fn analysis_input(expenses: &[Expense], debts: &[Debt], totals: Totals) -> AnalysisInput {
    AnalysisInput {
        expenses: expenses
            .iter()
            .map(|e| ExpenseSample {
                amount: MoneyMinor::new(e.amount_minor).to_major(),
                category: e.category.clone(),
                date: e.date,
                description: e.description.clone(),
            })
            .collect(),
        total_income: totals.income.to_major(),
        total_expenses: totals.expenses.to_major(),
        debts: debts
            .iter()
            .map(|d| DebtSample {
                amount: MoneyMinor::new(d.amount_minor).to_major(),
                minimum_payment: MoneyMinor::new(d.minimum_payment_minor).to_major(),
            })
            .collect(),
    }
}

/// Single recommendation used when the analyzer itself fails.
pub(crate) fn analysis_failed() -> Vec<Recommendation> {
    vec![Recommendation::new(
        "General",
        0.0,
        "AI analysis failed. Unable to provide specific recommendations.",
    )]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    fn expense(amount_minor: i64, category: &str) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            amount_minor,
            category: category.to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_recurring: false,
            recurring_period: None,
        }
    }

    #[test]
    fn savings_rate_can_be_negative() {
        assert_eq!(savings_rate(1000.0, 1200.0), -20.0);
        assert_eq!(savings_rate(1000.0, 750.0), 25.0);
    }

    #[test]
    fn savings_rate_without_income_is_zero() {
        assert_eq!(savings_rate(0.0, 300.0), 0.0);
    }

    #[test]
    fn breakdown_sums_per_category() {
        let breakdown = expense_breakdown(&[
            expense(1050, "Food"),
            expense(250, "Food"),
            expense(99_900, "Rent"),
        ])
        .unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown["Food"], 13.0);
        assert_eq!(breakdown["Rent"], 999.0);
    }
}
