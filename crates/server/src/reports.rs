//! Report API endpoints

use api_types::report::{BudgetRecommendation, FinancialReport, Forecast};
use axum::{Extension, Json, extract::State};
use engine::User;

use crate::{ServerError, debts, server::ServerState};

/// Handle requests for the financial summary of the current user
pub async fn financial_summary(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<FinancialReport>, ServerError> {
    let report = state.engine.financial_summary(user.id).await?;

    Ok(Json(FinancialReport {
        total_income: report.total_income,
        total_expenses: report.total_expenses,
        savings_rate: report.savings_rate,
        debt_overview: report.debt_overview.into_iter().map(debts::view).collect(),
        expense_breakdown: report.expense_breakdown,
        recommendations: report
            .recommendations
            .into_iter()
            .map(|r| BudgetRecommendation {
                category: r.category,
                recommended_amount: r.recommended_amount,
                reason: r.reason,
            })
            .collect(),
        forecasting: Forecast {
            month1: report.forecasting.month1,
            month2: report.forecasting.month2,
            month3: report.forecasting.month3,
        },
    }))
}
