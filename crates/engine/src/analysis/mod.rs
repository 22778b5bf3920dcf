//! Budget analysis.
//!
//! An [`Analyzer`] turns a user's expenses, income and debts into spending
//! patterns, budget recommendations and a short forecast. Two strategies are
//! provided:
//!
//! - [`LocalAnalyzer`]: deterministic pattern math plus fixed budget rules
//! - [`RemoteAnalyzer`]: asks an OpenAI-compatible chat-completions endpoint
//!   and falls back to a default advice set when the call fails
//!
//! All amounts here are `f64` major units.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use local::LocalAnalyzer;
pub use patterns::analyze_spending;
pub use remote::{RemoteAnalyzer, RemoteAnalyzerConfig};
pub use rules::{BudgetRules, generate_recommendations};

mod local;
mod patterns;
mod remote;
mod rules;

/// Forecast key holding the sum of every category of a month.
pub(crate) const FORECAST_TOTAL: &str = "total";

#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("invalid analysis input: {0}")]
    InvalidInput(String),
    #[error("analysis provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

/// One expense as seen by the analyzer.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseSample {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebtSample {
    pub amount: f64,
    pub minimum_payment: f64,
}

/// Everything an analyzer needs for one report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisInput {
    pub expenses: Vec<ExpenseSample>,
    pub total_income: f64,
    pub total_expenses: f64,
    pub debts: Vec<DebtSample>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute slope, in amount per observation.
    pub rate: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPattern {
    /// Share of total spend, in percent.
    pub proportion: f64,
    pub monthly_average: f64,
}

/// Per-category pattern output, keyed by category label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendingPatterns {
    pub patterns: BTreeMap<String, CategoryPattern>,
    /// Only categories with enough observations appear here.
    pub trends: BTreeMap<String, Trend>,
    pub average_spending: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub recommended_amount: f64,
    pub reason: String,
}

impl Recommendation {
    pub fn new(category: impl Into<String>, recommended_amount: f64, reason: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            recommended_amount,
            reason: reason.into(),
        }
    }
}

/// Projected spend per category for the next three months, each with a
/// `total` key. Empty months mean no projection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub month1: BTreeMap<String, f64>,
    pub month2: BTreeMap<String, f64>,
    pub month3: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisResult {
    pub spending_patterns: SpendingPatterns,
    pub recommendations: Vec<Recommendation>,
    pub forecasting: Forecast,
}

/// A budget analysis strategy.
///
/// Implementations must be shareable across requests; the engine keeps one
/// behind an `Arc`.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError>;
}
