use std::{net::SocketAddr, sync::Arc, time::Duration};

use clap::Parser;
use engine::{Analyzer, LocalAnalyzer, RemoteAnalyzer};
use migration::{Migrator, MigratorTrait};
use settings::{AnalysisMode, Database};

mod settings;

#[derive(Debug, Parser)]
#[command(name = "finpal", version, about = "FinPal personal finance API")]
struct Cli {
    /// Settings file, with or without the `.toml` extension.
    #[arg(long, short, default_value = "settings")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finpal={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    if settings.auth.secret == server::DEFAULT_SECRET {
        tracing::warn!("auth.secret is the built-in development secret; set FINPAL_AUTH__SECRET");
    }

    let db = parse_database(&settings.server.database).await?;

    let analyzer: Arc<dyn Analyzer> = match settings.analysis.mode {
        AnalysisMode::Local => {
            tracing::info!("using local budget analysis");
            Arc::new(LocalAnalyzer::new(settings.analysis.rules))
        }
        AnalysisMode::Remote => {
            if settings.analysis.remote.api_key.is_none() {
                tracing::warn!("remote analysis has no api_key; reports will use default advice");
            }
            tracing::info!(
                endpoint = %settings.analysis.remote.endpoint,
                model = %settings.analysis.remote.model,
                "using remote budget analysis"
            );
            Arc::new(RemoteAnalyzer::new(settings.analysis.remote)?)
        }
    };

    let engine = engine::Engine::builder()
        .database(db)
        .analyzer(analyzer)
        .build()
        .await?;
    let auth = server::AuthManager::new(&server::AuthConfig {
        secret: settings.auth.secret,
        token_ttl: Duration::from_secs(settings.auth.token_ttl_minutes * 60),
    })?;

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr: SocketAddr = format!("{}:{}", bind, settings.server.port).parse()?;

    server::run(server::ServerState::new(engine, auth), addr).await;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
