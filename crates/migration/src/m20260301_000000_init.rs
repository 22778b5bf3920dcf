//! Initial schema for FinPal.
//!
//! - `users`: registered people and their password hashes
//! - `accounts`: bank/savings accounts with a current balance
//! - `expenses` / `incomes`: dated money movements, optionally recurring
//! - `debts`: loans and credit lines with a minimum monthly payment
//! - `goals`: savings targets
//!
//! Every financial table carries `user_id` with `ON DELETE CASCADE`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    HashedPassword,
    IsActive,
    FirstName,
    LastName,
    CreatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    UserId,
    Name,
    Kind,
    BalanceMinor,
    Currency,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    UserId,
    AmountMinor,
    Category,
    Description,
    Date,
    IsRecurring,
    RecurringPeriod,
}

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    UserId,
    AmountMinor,
    Source,
    Description,
    Date,
    IsRecurring,
    RecurringPeriod,
}

#[derive(Iden)]
enum Debts {
    Table,
    Id,
    UserId,
    Name,
    AmountMinor,
    InterestRate,
    MinimumPaymentMinor,
    DueDate,
    Kind,
}

#[derive(Iden)]
enum Goals {
    Table,
    Id,
    UserId,
    Name,
    TargetMinor,
    CurrentMinor,
    Deadline,
    Description,
}

/// Foreign key from `table.user_id` to `users.id`, cascading on delete.
fn owner_fk<T: Iden + 'static>(name: &str, table: T, column: T) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(Users::Table, Users::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::HashedPassword).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::UserId).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::BalanceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Currency)
                            .string()
                            .not_null()
                            .default("USD"),
                    )
                    .foreign_key(&mut owner_fk(
                        "fk-accounts-user_id",
                        Accounts::Table,
                        Accounts::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(
                        ColumnDef::new(Expenses::IsRecurring)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Expenses::RecurringPeriod).string())
                    .foreign_key(&mut owner_fk(
                        "fk-expenses-user_id",
                        Expenses::Table,
                        Expenses::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Incomes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Incomes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Incomes::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Incomes::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Incomes::Source).string().not_null())
                    .col(ColumnDef::new(Incomes::Description).string().not_null())
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .col(
                        ColumnDef::new(Incomes::IsRecurring)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Incomes::RecurringPeriod).string())
                    .foreign_key(&mut owner_fk(
                        "fk-incomes-user_id",
                        Incomes::Table,
                        Incomes::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-incomes-user_id-date")
                    .table(Incomes::Table)
                    .col(Incomes::UserId)
                    .col(Incomes::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Debts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Debts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Debts::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Debts::UserId).string().not_null())
                    .col(ColumnDef::new(Debts::Name).string().not_null())
                    .col(ColumnDef::new(Debts::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Debts::InterestRate).double().not_null())
                    .col(
                        ColumnDef::new(Debts::MinimumPaymentMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Debts::DueDate).date().not_null())
                    .col(ColumnDef::new(Debts::Kind).string().not_null())
                    .foreign_key(&mut owner_fk(
                        "fk-debts-user_id",
                        Debts::Table,
                        Debts::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Goals
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Goals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Goals::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Goals::UserId).string().not_null())
                    .col(ColumnDef::new(Goals::Name).string().not_null())
                    .col(ColumnDef::new(Goals::TargetMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Goals::CurrentMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Goals::Deadline).date())
                    .col(ColumnDef::new(Goals::Description).string())
                    .foreign_key(&mut owner_fk(
                        "fk-goals-user_id",
                        Goals::Table,
                        Goals::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-user_id")
                    .table(Accounts::Table)
                    .col(Accounts::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-debts-user_id")
                    .table(Debts::Table)
                    .col(Debts::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-goals-user_id")
                    .table(Goals::Table)
                    .col(Goals::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first, `users` last.
        manager
            .drop_table(Table::drop().table(Goals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Debts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
