use serde::Deserialize;

use crate::util::label_key;

use super::{DebtSample, Recommendation, SpendingPatterns, TrendDirection};

/// Ratios and ceilings used by the rule-based recommendations.
///
/// Ratios are fractions of income; ceilings are percentages of total spend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BudgetRules {
    pub savings_ratio: f64,
    pub debt_ratio: f64,
    pub min_trend_points: usize,
    /// `rent`, `housing`
    pub housing_ceiling: f64,
    /// `food`, `groceries`
    pub food_ceiling: f64,
    /// `entertainment`, `dining out`, `shopping`
    pub discretionary_ceiling: f64,
    /// `utilities`, `transportation`
    pub essentials_ceiling: f64,
}

impl Default for BudgetRules {
    fn default() -> Self {
        Self {
            savings_ratio: 0.2,
            debt_ratio: 0.2,
            min_trend_points: 3,
            housing_ceiling: 35.0,
            food_ceiling: 15.0,
            discretionary_ceiling: 10.0,
            essentials_ceiling: 10.0,
        }
    }
}

impl BudgetRules {
    /// Ceiling (percent of total spend) and explanation for a category.
    /// Categories without a ceiling are never flagged.
    fn ceiling(&self, category: &str) -> Option<(f64, String)> {
        match label_key(category).as_str() {
            "rent" | "housing" => Some((
                self.housing_ceiling,
                format!(
                    "Housing costs should ideally be below {}% of your total spending.",
                    self.housing_ceiling
                ),
            )),
            "food" | "groceries" => Some((
                self.food_ceiling,
                format!(
                    "Food costs should ideally be around 10-{}% of your total spending.",
                    self.food_ceiling
                ),
            )),
            "entertainment" | "dining out" | "shopping" => Some((
                self.discretionary_ceiling,
                format!(
                    "{category} spending should ideally be kept under {}% of your total spending.",
                    self.discretionary_ceiling
                ),
            )),
            "utilities" | "transportation" => Some((
                self.essentials_ceiling,
                format!(
                    "{category} costs should ideally be kept under {}% of your total spending.",
                    self.essentials_ceiling
                ),
            )),
            _ => None,
        }
    }
}

/// Apply the budget rules in order: savings, debt load, then each category
/// ceiling in label order.
pub fn generate_recommendations(
    patterns: &SpendingPatterns,
    total_income: f64,
    total_expenses: f64,
    debts: &[DebtSample],
    rules: &BudgetRules,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    let savings_pct = rules.savings_ratio * 100.0;
    let target_savings = total_income * rules.savings_ratio;
    let current_savings = total_income - total_expenses;
    if current_savings < target_savings {
        let gap = target_savings - current_savings;
        out.push(Recommendation::new(
            "Savings",
            target_savings,
            format!(
                "Try to save at least {savings_pct}% of your income ({target_savings:.2}). \
                 You're currently saving {current_savings:.2}, which is {gap:.2} less than recommended."
            ),
        ));
    }

    let debt_cap = total_income * rules.debt_ratio;
    let min_payments: f64 = debts.iter().map(|d| d.minimum_payment).sum();
    if min_payments > debt_cap {
        out.push(Recommendation::new(
            "Debt Payments",
            debt_cap,
            format!(
                "Your debt payments are too high relative to your income. \
                 Try to keep debt payments below {}% of your income.",
                rules.debt_ratio * 100.0
            ),
        ));
    }

    for (category, pattern) in &patterns.patterns {
        let Some((ceiling, mut reason)) = rules.ceiling(category) else {
            continue;
        };
        if pattern.proportion <= ceiling {
            continue;
        }

        let amount = ceiling / 100.0 * total_expenses;
        let increasing = patterns
            .trends
            .get(category)
            .is_some_and(|t| t.direction == TrendDirection::Increasing);
        if increasing {
            reason.push_str(" This category is trending upward, which is concerning.");
        }

        out.push(Recommendation::new(
            category.clone(),
            amount,
            format!(
                "Your {category} spending is {:.1}% of your total expenses, which is higher than \
                 the recommended {ceiling}%. {reason} Consider reducing to around {amount:.2} per month.",
                pattern.proportion
            ),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::analysis::{CategoryPattern, Trend};

    fn patterns(entries: &[(&str, f64)]) -> SpendingPatterns {
        SpendingPatterns {
            patterns: entries
                .iter()
                .map(|(c, p)| {
                    (
                        c.to_string(),
                        CategoryPattern {
                            proportion: *p,
                            monthly_average: 0.0,
                        },
                    )
                })
                .collect(),
            trends: BTreeMap::new(),
            average_spending: BTreeMap::new(),
        }
    }

    #[test]
    fn healthy_budget_has_no_recommendations() {
        let recs = generate_recommendations(
            &patterns(&[("Rent", 30.0), ("Misc", 70.0)]),
            5000.0,
            3000.0,
            &[],
            &BudgetRules::default(),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn savings_shortfall_is_reported() {
        let recs = generate_recommendations(
            &patterns(&[]),
            1000.0,
            1200.0,
            &[],
            &BudgetRules::default(),
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, "Savings");
        assert_eq!(recs[0].recommended_amount, 200.0);
        assert_eq!(
            recs[0].reason,
            "Try to save at least 20% of your income (200.00). You're currently saving -200.00, \
             which is 400.00 less than recommended."
        );
    }

    #[test]
    fn debt_payments_are_capped_at_twenty_percent() {
        let debts = [
            DebtSample {
                amount: 5000.0,
                minimum_payment: 150.0,
            },
            DebtSample {
                amount: 2000.0,
                minimum_payment: 100.0,
            },
        ];
        let recs = generate_recommendations(
            &patterns(&[]),
            1000.0,
            500.0,
            &debts,
            &BudgetRules::default(),
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, "Debt Payments");
        assert_eq!(recs[0].recommended_amount, 200.0);
    }

    #[test]
    fn rent_over_ceiling_gets_thirty_five_percent() {
        let recs = generate_recommendations(
            &patterns(&[("Rent", 40.0), ("Other", 60.0)]),
            10_000.0,
            2000.0,
            &[],
            &BudgetRules::default(),
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, "Rent");
        assert!((recs[0].recommended_amount - 700.0).abs() < 1e-9);
        assert_eq!(
            recs[0].reason,
            "Your Rent spending is 40.0% of your total expenses, which is higher than the \
             recommended 35%. Housing costs should ideally be below 35% of your total spending. \
             Consider reducing to around 700.00 per month."
        );
    }

    #[test]
    fn category_matching_ignores_case_and_punctuation() {
        let mut p = patterns(&[("DINING-OUT", 20.0), ("groceries", 16.0), ("Hobbies", 50.0)]);
        p.trends.insert(
            "groceries".to_string(),
            Trend {
                direction: TrendDirection::Increasing,
                rate: 3.0,
            },
        );
        let recs =
            generate_recommendations(&p, 10_000.0, 1000.0, &[], &BudgetRules::default());
        let categories: Vec<_> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, ["DINING-OUT", "groceries"]);
        assert!(recs[1].reason.contains("trending upward"));
        assert!(!recs[0].reason.contains("trending upward"));
    }
}
