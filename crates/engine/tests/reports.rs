use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::Database;

use engine::{
    AnalysisError, AnalysisInput, AnalysisResult, Analyzer, DebtInput, Engine, ExpenseInput,
    IncomeInput, NewUser, RemoteAnalyzer, RemoteAnalyzerConfig, User,
};
use migration::MigratorTrait;

struct FailingAnalyzer;

#[async_trait]
impl Analyzer for FailingAnalyzer {
    async fn analyze(&self, _input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::Unavailable("boom".to_string()))
    }
}

async fn engine_with(analyzer: Option<Arc<dyn Analyzer>>) -> (Engine, User) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let mut builder = Engine::builder().database(db);
    if let Some(analyzer) = analyzer {
        builder = builder.analyzer(analyzer);
    }
    let engine = builder.build().await.unwrap();
    let user = engine
        .create_user(NewUser {
            email: "alice@example.com".to_string(),
            hashed_password: "hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
        })
        .await
        .unwrap();
    (engine, user)
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

async fn spend(engine: &Engine, user: &User, amount_minor: i64, category: &str, on: NaiveDate) {
    engine
        .create_expense(
            user.id,
            ExpenseInput {
                amount_minor,
                category: category.to_string(),
                description: String::new(),
                date: on,
                is_recurring: false,
                recurring_period: None,
            },
        )
        .await
        .unwrap();
}

async fn earn(engine: &Engine, user: &User, amount_minor: i64) {
    engine
        .create_income(
            user.id,
            IncomeInput {
                amount_minor,
                source: "Salary".to_string(),
                description: String::new(),
                date: date(1, 31),
                is_recurring: false,
                recurring_period: None,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_user_gets_an_empty_report() {
    let (engine, user) = engine_with(None).await;
    let report = engine.financial_summary(user.id).await.unwrap();

    assert_eq!(report.total_income, 0.0);
    assert_eq!(report.total_expenses, 0.0);
    assert_eq!(report.savings_rate, 0.0);
    assert!(report.expense_breakdown.is_empty());
    assert!(report.recommendations.is_empty());
    assert!(report.forecasting.month1.is_empty());
}

#[tokio::test]
async fn overspending_gives_negative_savings_rate() {
    let (engine, user) = engine_with(None).await;
    earn(&engine, &user, 100_000).await;
    spend(&engine, &user, 70_000, "Misc", date(1, 3)).await;
    spend(&engine, &user, 50_000, "Misc", date(1, 9)).await;

    let report = engine.financial_summary(user.id).await.unwrap();
    assert_eq!(report.total_income, 1000.0);
    assert_eq!(report.total_expenses, 1200.0);
    assert_eq!(report.savings_rate, -20.0);
    assert_eq!(report.expense_breakdown["Misc"], 1200.0);
    assert_eq!(report.recommendations[0].category, "Savings");
    assert_eq!(report.recommendations[0].recommended_amount, 200.0);
}

#[tokio::test]
async fn rent_and_debt_rules_show_up_in_the_report() {
    let (engine, user) = engine_with(None).await;
    earn(&engine, &user, 500_000).await;
    spend(&engine, &user, 40_000, "Rent", date(1, 1)).await;
    spend(&engine, &user, 60_000, "Other", date(1, 2)).await;
    engine
        .create_debt(
            user.id,
            DebtInput {
                name: "Loan".to_string(),
                amount_minor: 2_000_000,
                interest_rate: 6.0,
                minimum_payment_minor: 150_000,
                due_date: date(2, 1),
                kind: "personal".to_string(),
            },
        )
        .await
        .unwrap();

    let report = engine.financial_summary(user.id).await.unwrap();
    let categories: Vec<_> = report
        .recommendations
        .iter()
        .map(|r| r.category.as_str())
        .collect();
    assert_eq!(categories, ["Debt Payments", "Rent"]);
    assert_eq!(report.recommendations[0].recommended_amount, 1000.0);
    assert!((report.recommendations[1].recommended_amount - 350.0).abs() < 1e-9);
    assert_eq!(report.debt_overview.len(), 1);
    assert_eq!(report.forecasting.month2["total"], 1000.0);
}

#[tokio::test]
async fn failing_analyzer_degrades_to_general_advice() {
    let (engine, user) = engine_with(Some(Arc::new(FailingAnalyzer))).await;
    earn(&engine, &user, 100_000).await;
    spend(&engine, &user, 20_000, "Food", date(1, 2)).await;

    let report = engine.financial_summary(user.id).await.unwrap();
    assert_eq!(report.total_expenses, 200.0);
    assert_eq!(report.savings_rate, 80.0);
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].category, "General");
    assert_eq!(report.recommendations[0].recommended_amount, 0.0);
    assert_eq!(
        report.recommendations[0].reason,
        "AI analysis failed. Unable to provide specific recommendations."
    );
    assert!(report.forecasting.month1.is_empty());
}

#[tokio::test]
async fn unreachable_remote_model_gives_default_advice() {
    let remote = RemoteAnalyzer::new(RemoteAnalyzerConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        api_key: Some("key".to_string()),
        timeout_secs: 2,
        ..RemoteAnalyzerConfig::default()
    })
    .unwrap();
    let (engine, user) = engine_with(Some(Arc::new(remote))).await;
    earn(&engine, &user, 100_000).await;
    spend(&engine, &user, 20_000, "Food", date(1, 2)).await;

    let report = engine.financial_summary(user.id).await.unwrap();
    let recs: Vec<_> = report
        .recommendations
        .iter()
        .map(|r| (r.category.as_str(), r.recommended_amount))
        .collect();
    assert_eq!(recs, [("Savings", 200.0), ("Expenses", 800.0)]);
}
