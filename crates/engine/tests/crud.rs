use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    AccountInput, Currency, DebtInput, Engine, EngineError, ExpenseInput, GoalInput, IncomeInput,
    NewUser, ProfileUpdate, RecurringPeriod, User,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn register(engine: &Engine, email: &str) -> User {
    engine
        .create_user(NewUser {
            email: email.to_string(),
            hashed_password: "$argon2id$stub".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        })
        .await
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(amount_minor: i64, category: &str, on: NaiveDate) -> ExpenseInput {
    ExpenseInput {
        amount_minor,
        category: category.to_string(),
        description: "test".to_string(),
        date: on,
        is_recurring: false,
        recurring_period: None,
    }
}

#[tokio::test]
async fn create_user_normalizes_email_and_rejects_duplicates() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "  Alice@Example.com ").await;
    assert_eq!(user.email, "alice@example.com");
    assert!(user.is_active);

    let err = engine
        .create_user(NewUser {
            email: "ALICE@example.com".to_string(),
            hashed_password: "x".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("alice@example.com".to_string())
    );

    let found = engine.user_by_email("alice@EXAMPLE.com").await.unwrap();
    assert_eq!(found.id, user.id);
}

#[tokio::test]
async fn update_profile_keeps_emails_unique() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    register(&engine, "bob@example.com").await;

    let err = engine
        .update_profile(
            alice.id,
            ProfileUpdate {
                email: "bob@example.com".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Liddell".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    let updated = engine
        .update_profile(
            alice.id,
            ProfileUpdate {
                email: "alice@example.com".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Liddell".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.last_name, "Liddell");
    assert_eq!(engine.user(alice.id).await.unwrap().last_name, "Liddell");
}

#[tokio::test]
async fn account_crud_round_trip() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let account = engine
        .create_account(
            user.id,
            AccountInput {
                name: " Checking ".to_string(),
                kind: "checking".to_string(),
                balance_minor: -2500,
                currency: Currency::default(),
            },
        )
        .await
        .unwrap();
    assert_eq!(account.name, "Checking");
    assert_eq!(account.currency, Currency::Usd);

    let updated = engine
        .update_account(
            user.id,
            account.id,
            AccountInput {
                name: "Main".to_string(),
                kind: "checking".to_string(),
                balance_minor: 10_000,
                currency: Currency::Eur,
            },
        )
        .await
        .unwrap();
    assert_eq!(engine.account(user.id, account.id).await.unwrap(), updated);

    engine.delete_account(user.id, account.id).await.unwrap();
    assert!(engine.accounts(user.id).await.unwrap().is_empty());
    assert_eq!(
        engine.account(user.id, account.id).await.unwrap_err(),
        EngineError::KeyNotFound("account not exists".to_string())
    );
}

#[tokio::test]
async fn records_are_invisible_to_other_users() {
    let (engine, _db) = engine_with_db().await;
    let alice = register(&engine, "alice@example.com").await;
    let bob = register(&engine, "bob@example.com").await;

    let spent = engine
        .create_expense(alice.id, expense(1200, "Food", date(2024, 1, 5)))
        .await
        .unwrap();

    assert!(engine.expenses(bob.id).await.unwrap().is_empty());
    assert!(matches!(
        engine.expense(bob.id, spent.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine
            .update_expense(bob.id, spent.id, expense(1, "Hack", date(2024, 1, 5)))
            .await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_expense(bob.id, spent.id).await,
        Err(EngineError::KeyNotFound(_))
    ));

    // Untouched for the owner.
    assert_eq!(engine.expense(alice.id, spent.id).await.unwrap(), spent);
}

#[tokio::test]
async fn expenses_are_listed_by_date() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    engine
        .create_expense(user.id, expense(300, "Food", date(2024, 3, 1)))
        .await
        .unwrap();
    engine
        .create_expense(user.id, expense(100, "Food", date(2024, 1, 1)))
        .await
        .unwrap();

    let listed = engine.expenses(user.id).await.unwrap();
    let amounts: Vec<_> = listed.iter().map(|e| e.amount_minor).collect();
    assert_eq!(amounts, [100, 300]);
}

#[tokio::test]
async fn recurring_records_need_a_period() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let mut input = IncomeInput {
        amount_minor: 300_000,
        source: "Salary".to_string(),
        description: "monthly pay".to_string(),
        date: date(2024, 1, 31),
        is_recurring: true,
        recurring_period: None,
    };
    assert!(matches!(
        engine.create_income(user.id, input.clone()).await,
        Err(EngineError::InvalidField(_))
    ));

    input.recurring_period = Some(RecurringPeriod::Monthly);
    let income = engine.create_income(user.id, input).await.unwrap();
    let stored = engine.income(user.id, income.id).await.unwrap();
    assert_eq!(stored.recurring_period, Some(RecurringPeriod::Monthly));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    assert!(matches!(
        engine
            .create_expense(user.id, expense(-5, "Food", date(2024, 1, 1)))
            .await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine
            .create_goal(
                user.id,
                GoalInput {
                    name: "Car".to_string(),
                    target_minor: 0,
                    current_minor: 0,
                    deadline: None,
                    description: None,
                },
            )
            .await,
        Err(EngineError::InvalidAmount(_))
    ));
}

#[tokio::test]
async fn debt_and_goal_updates_replace_all_fields() {
    let (engine, _db) = engine_with_db().await;
    let user = register(&engine, "alice@example.com").await;

    let debt = engine
        .create_debt(
            user.id,
            DebtInput {
                name: "Card".to_string(),
                amount_minor: 150_000,
                interest_rate: 19.9,
                minimum_payment_minor: 4500,
                due_date: date(2024, 6, 1),
                kind: "credit card".to_string(),
            },
        )
        .await
        .unwrap();
    let debt = engine
        .update_debt(
            user.id,
            debt.id,
            DebtInput {
                name: "Card".to_string(),
                amount_minor: 100_000,
                interest_rate: 17.5,
                minimum_payment_minor: 3000,
                due_date: date(2024, 7, 1),
                kind: "credit card".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(engine.debts(user.id).await.unwrap(), vec![debt]);

    let goal = engine
        .create_goal(
            user.id,
            GoalInput {
                name: "Trip".to_string(),
                target_minor: 200_000,
                current_minor: 0,
                deadline: Some(date(2025, 1, 1)),
                description: Some("Japan".to_string()),
            },
        )
        .await
        .unwrap();
    let goal = engine
        .update_goal(
            user.id,
            goal.id,
            GoalInput {
                name: "Trip".to_string(),
                target_minor: 200_000,
                current_minor: 50_000,
                deadline: None,
                description: None,
            },
        )
        .await
        .unwrap();
    let stored = engine.goal(user.id, goal.id).await.unwrap();
    assert_eq!(stored.deadline, None);
    assert_eq!(stored.progress(), 25.0);

    engine.delete_goal(user.id, goal.id).await.unwrap();
    assert!(engine.goals(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_cannot_own_records() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .create_expense(Uuid::new_v4(), expense(100, "Food", date(2024, 1, 1)))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user not exists".to_string()));
}
