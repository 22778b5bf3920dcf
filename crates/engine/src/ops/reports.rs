use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use tracing::warn;
use uuid::Uuid;

use crate::{
    Debt, EngineError, Expense, FinancialReport, Income, ResultEngine, debts, expenses, incomes,
    report::{Totals, analysis_failed, analysis_input, expense_breakdown, savings_rate},
};

use super::{Engine, with_tx};

impl Engine {
    /// Build the financial summary of a user.
    ///
    /// Rows are read in one transaction. A failing analyzer does not fail
    /// the report: its recommendations are replaced by a single `General`
    /// entry and the forecast is left empty.
    pub async fn financial_summary(&self, user_id: Uuid) -> ResultEngine<FinancialReport> {
        let (expenses, incomes, debts) = with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let owner = user_id.to_string();

            let expenses = expenses::Entity::find()
                .filter(expenses::Column::UserId.eq(owner.clone()))
                .order_by_asc(expenses::Column::Date)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Expense::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            let incomes = incomes::Entity::find()
                .filter(incomes::Column::UserId.eq(owner.clone()))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Income::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            let debts = debts::Entity::find()
                .filter(debts::Column::UserId.eq(owner))
                .order_by_asc(debts::Column::DueDate)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Debt::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            Ok::<_, EngineError>((expenses, incomes, debts))
        })?;

        let totals = Totals::of(&incomes, &expenses)?;
        let total_income = totals.income.to_major();
        let total_expenses = totals.expenses.to_major();
        let expense_breakdown = expense_breakdown(&expenses)?;

        let input = analysis_input(&expenses, &debts, totals);
        let (recommendations, forecasting) = match self.analyzer.analyze(&input).await {
            Ok(result) => (result.recommendations, result.forecasting),
            Err(err) => {
                warn!(%user_id, error = %err, "budget analysis failed");
                (analysis_failed(), Default::default())
            }
        };

        Ok(FinancialReport {
            total_income,
            total_expenses,
            savings_rate: savings_rate(total_income, total_expenses),
            debt_overview: debts,
            expense_breakdown,
            recommendations,
            forecasting,
        })
    }
}
