//! Standalone schema tool for FinPal databases.
//!
//! `DATABASE_URL` selects the target (defaults to `./finpal.db`).

use sea_orm::Database;
use sea_orm_migration::prelude::*;

const USAGE: &str = "usage: migration [up [N]|down [N]|fresh|refresh|status]";

enum Command {
    Up(Option<u32>),
    Down(Option<u32>),
    Fresh,
    Refresh,
    Status,
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Option<Command> {
    let name = args.next().unwrap_or_else(|| "up".to_string());
    let steps = match args.next() {
        Some(raw) => Some(raw.parse::<u32>().ok()?),
        None => None,
    };
    match name.as_str() {
        "up" => Some(Command::Up(steps)),
        "down" => Some(Command::Down(steps)),
        "fresh" => Some(Command::Fresh),
        "refresh" => Some(Command::Refresh),
        "status" => Some(Command::Status),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let Some(command) = parse_command(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./finpal.db?mode=rwc".to_string());
    let db = Database::connect(&db_url).await?;

    match command {
        Command::Up(steps) => migration::Migrator::up(&db, steps).await?,
        Command::Down(steps) => migration::Migrator::down(&db, steps).await?,
        Command::Fresh => migration::Migrator::fresh(&db).await?,
        Command::Refresh => migration::Migrator::refresh(&db).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
