use std::{fmt, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::{
    ResultEngine,
    analysis::{Analyzer, LocalAnalyzer},
};

mod access;
mod accounts;
mod debts;
mod expenses;
mod goals;
mod incomes;
mod reports;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

pub struct Engine {
    database: DatabaseConnection,
    analyzer: Arc<dyn Analyzer>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    analyzer: Option<Arc<dyn Analyzer>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Analysis strategy used by reports. Defaults to [`LocalAnalyzer`]
    /// with the default budget rules.
    pub fn analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> EngineBuilder {
        self.analyzer = Some(analyzer);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            analyzer: self
                .analyzer
                .unwrap_or_else(|| Arc::new(LocalAnalyzer::default())),
        })
    }
}
