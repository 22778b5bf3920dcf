use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{
    AnalysisError, AnalysisInput, AnalysisResult, Analyzer, BudgetRules, FORECAST_TOTAL, Forecast,
    SpendingPatterns, analyze_spending, generate_recommendations,
};
use crate::util::label_key;

/// Rule-based analyzer running entirely in-process.
#[derive(Clone, Debug, Default)]
pub struct LocalAnalyzer {
    rules: BudgetRules,
}

impl LocalAnalyzer {
    pub fn new(rules: BudgetRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &BudgetRules {
        &self.rules
    }
}

#[async_trait]
impl Analyzer for LocalAnalyzer {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError> {
        validate(input)?;

        let spending_patterns = analyze_spending(&input.expenses, self.rules.min_trend_points);
        let recommendations = generate_recommendations(
            &spending_patterns,
            input.total_income,
            input.total_expenses,
            &input.debts,
            &self.rules,
        );
        let forecasting = flat_forecast(&spending_patterns);

        Ok(AnalysisResult {
            spending_patterns,
            recommendations,
            forecasting,
        })
    }
}

fn validate(input: &AnalysisInput) -> Result<(), AnalysisError> {
    let bad = |v: f64| !v.is_finite() || v < 0.0;
    if let Some(e) = input.expenses.iter().find(|e| bad(e.amount)) {
        return Err(AnalysisError::InvalidInput(format!(
            "expense amount {} in {}",
            e.amount, e.category
        )));
    }
    if let Some(e) = input
        .expenses
        .iter()
        .find(|e| label_key(&e.category) == FORECAST_TOTAL)
    {
        return Err(AnalysisError::InvalidInput(format!(
            "category {} collides with the forecast total",
            e.category
        )));
    }
    if input.debts.iter().any(|d| bad(d.amount) || bad(d.minimum_payment)) {
        return Err(AnalysisError::InvalidInput("debt amount".to_string()));
    }
    if bad(input.total_income) || bad(input.total_expenses) {
        return Err(AnalysisError::InvalidInput("totals".to_string()));
    }
    Ok(())
}

/// Project each category's monthly average unchanged over the next three
/// months. No expenses means no projection.
fn flat_forecast(patterns: &SpendingPatterns) -> Forecast {
    if patterns.average_spending.is_empty() {
        return Forecast::default();
    }
    let mut month: BTreeMap<String, f64> = patterns.average_spending.clone();
    let total = month.values().sum();
    month.insert(FORECAST_TOTAL.to_string(), total);

    Forecast {
        month1: month.clone(),
        month2: month.clone(),
        month3: month,
    }
}
