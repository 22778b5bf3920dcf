use std::{fmt::Write as _, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{
    AnalysisError, AnalysisInput, AnalysisResult, Analyzer, Forecast, Recommendation,
    SpendingPatterns,
};

const SYSTEM_PROMPT: &str = r#"You are a financial expert. Analyse the spending data and provide:
1. Analysis of spending patterns
2. Personalised budget recommendations based on individual spending patterns
3. Expense forecasting for the next 3 months

Follow these guidelines for recommendations:
- Use the 50/30/20 rule (50% needs, 30% wants, 20% savings)
- Housing costs should be below 35% of income
- Debt payments should be below 20% of income
- Focus on REDUCING unnecessary spending, not increasing it
- If someone is spending less than recommended, that's GOOD - don't suggest increasing
- Prioritise savings and debt reduction over spending more
- Only suggest increases if current spending is dangerously low for basic needs

You MUST return your response as a JSON object structured exactly as follows:
{
    "spending_patterns": {
        "patterns": {"category": {"proportion": float, "monthly_average": float}},
        "trends": {"category": {"direction": "increasing|decreasing|stable", "rate": float}},
        "average_spending": {"category": float}
    },
    "recommendations": [
        {"category": "string", "recommended_amount": float, "reason": "string"}
    ],
    "forecasting": {
        "month1": {"category": float, "total": float},
        "month2": {"category": float, "total": float},
        "month3": {"category": float, "total": float}
    }
}"#;

/// Connection settings for an OpenAI-compatible chat-completions API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteAnalyzerConfig {
    /// Base URL; `/chat/completions` is appended.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RemoteAnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Analyzer delegating to a hosted language model.
///
/// It never returns an error: any failure of the call is logged and replaced
/// by generic savings and spending advice.
#[derive(Clone, Debug)]
pub struct RemoteAnalyzer {
    config: RemoteAnalyzerConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl RemoteAnalyzer {
    /// Builds the HTTP client with the configured request timeout.
    pub fn new(config: RemoteAnalyzerConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Unavailable(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    async fn request(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AnalysisError::Unavailable("no API key configured".to_string()))?;

        let url = format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );
        let user_prompt = user_prompt(input);
        debug!(%url, model = %self.config.model, prompt = %user_prompt, "remote analysis request");

        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt},
            ],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Unavailable("request timed out".to_string())
                } else {
                    AnalysisError::Unavailable(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Unavailable(format!("HTTP {status} - {text}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalysisError::MalformedResponse("no message content".to_string()))?;

        parse_completion(&content)
    }
}

#[async_trait]
impl Analyzer for RemoteAnalyzer {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError> {
        if input.expenses.is_empty() {
            return Ok(AnalysisResult::default());
        }
        match self.request(input).await {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!(error = %err, "remote analysis failed, using default advice");
                Ok(default_advice(input.total_income))
            }
        }
    }
}

/// Generic advice returned when the remote model cannot be used.
pub(crate) fn default_advice(total_income: f64) -> AnalysisResult {
    AnalysisResult {
        spending_patterns: SpendingPatterns::default(),
        recommendations: vec![
            Recommendation::new(
                "Savings",
                total_income * 0.2,
                "Try to save at least 20% of your income.",
            ),
            Recommendation::new(
                "Expenses",
                total_income * 0.8,
                "Try to keep expenses below 80% of your income.",
            ),
        ],
        forecasting: Forecast::default(),
    }
}

fn user_prompt(input: &AnalysisInput) -> String {
    let mut expenses = String::new();
    for e in &input.expenses {
        let _ = writeln!(
            expenses,
            "Date: {}, Category: {}, Amount: {:.2}, Description: {}",
            e.date, e.category, e.amount, e.description
        );
    }
    let mut debts = String::new();
    for (i, d) in input.debts.iter().enumerate() {
        let _ = writeln!(
            debts,
            "Debt {}: Amount: {:.2}, Monthly Payment: {:.2}",
            i + 1,
            d.amount,
            d.minimum_payment
        );
    }
    format!(
        "Analyse these financial details and provide both spending patterns analysis and budget recommendations:\n\n\
         Monthly Income: {:.2}\n\
         Monthly Expenses: {:.2}\n\n\
         Expenses:\n{expenses}\n\n\
         Debts:\n{debts}",
        input.total_income, input.total_expenses
    )
}

/// Parse the model's JSON answer.
///
/// Missing sections default to empty; recommendation entries lacking a
/// category, amount or reason are skipped.
pub(crate) fn parse_completion(content: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
    let Some(obj) = value.as_object() else {
        return Err(AnalysisError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    };

    let spending_patterns = obj
        .get("spending_patterns")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();
    let forecasting = obj
        .get("forecasting")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    let recommendations = obj
        .get("recommendations")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(recommendation_from).collect())
        .unwrap_or_default();

    Ok(AnalysisResult {
        spending_patterns,
        recommendations,
        forecasting,
    })
}

fn recommendation_from(item: &Value) -> Option<Recommendation> {
    let category = item.get("category")?.as_str()?;
    let amount = match item.get("recommended_amount")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    let reason = item.get("reason")?.as_str()?;
    Some(Recommendation::new(category, amount, reason))
}
