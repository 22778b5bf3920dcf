use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::{CategoryPattern, ExpenseSample, SpendingPatterns, Trend, TrendDirection};

/// Multiple of the rounding error allowed in a fitted slope before it
/// counts as a real trend.
const SLOPE_NOISE_ULPS: f64 = 64.0;

#[derive(Default)]
struct CategoryStats {
    total: f64,
    by_month: BTreeMap<(i32, u32), f64>,
    points: Vec<(NaiveDate, f64)>,
}

/// Group expenses by category and compute proportion, monthly average and
/// trend for each one.
///
/// Trends are only fitted for categories with at least `min_trend_points`
/// observations. Empty input yields empty maps.
pub fn analyze_spending(expenses: &[ExpenseSample], min_trend_points: usize) -> SpendingPatterns {
    if expenses.is_empty() {
        return SpendingPatterns::default();
    }

    let mut stats: BTreeMap<&str, CategoryStats> = BTreeMap::new();
    for expense in expenses {
        let entry = stats.entry(expense.category.as_str()).or_default();
        entry.total += expense.amount;
        *entry
            .by_month
            .entry((expense.date.year(), expense.date.month()))
            .or_insert(0.0) += expense.amount;
        entry.points.push((expense.date, expense.amount));
    }

    let total_spending: f64 = stats.values().map(|s| s.total).sum();
    let mut out = SpendingPatterns::default();

    for (category, mut cat) in stats {
        let monthly_average = cat.by_month.values().sum::<f64>() / cat.by_month.len() as f64;
        let proportion = if total_spending > 0.0 {
            cat.total / total_spending * 100.0
        } else {
            0.0
        };

        out.patterns.insert(
            category.to_string(),
            CategoryPattern {
                proportion,
                monthly_average,
            },
        );
        out.average_spending
            .insert(category.to_string(), monthly_average);

        if cat.points.len() >= min_trend_points.max(2) {
            // Stable sort keeps insertion order for same-day expenses.
            cat.points.sort_by_key(|(date, _)| *date);
            let amounts: Vec<f64> = cat.points.iter().map(|(_, amount)| *amount).collect();
            out.trends.insert(
                category.to_string(),
                classify(linear_slope(&amounts), slope_tolerance(&amounts)),
            );
        }
    }

    out
}

/// Least-squares slope of `values` against their index `0..n`.
fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (num, den) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - mean_x;
            (num + dx * (y - mean_y), den + dx * dx)
        });

    if den == 0.0 { 0.0 } else { num / den }
}

/// Rounding error bound of [`linear_slope`]: it grows with the magnitude of
/// the amounts and shrinks with the number of points.
fn slope_tolerance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean_abs = values.iter().map(|v| v.abs()).sum::<f64>() / n;
    SLOPE_NOISE_ULPS * f64::EPSILON * mean_abs / n
}

fn classify(slope: f64, tolerance: f64) -> Trend {
    if slope.abs() <= tolerance {
        Trend {
            direction: TrendDirection::Stable,
            rate: 0.0,
        }
    } else if slope > 0.0 {
        Trend {
            direction: TrendDirection::Increasing,
            rate: slope,
        }
    } else {
        Trend {
            direction: TrendDirection::Decreasing,
            rate: -slope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(amount: f64, category: &str, date: (i32, u32, u32)) -> ExpenseSample {
        ExpenseSample {
            amount,
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: String::new(),
        }
    }

    #[test]
    fn empty_input_gives_empty_patterns() {
        assert_eq!(analyze_spending(&[], 3), SpendingPatterns::default());
    }

    #[test]
    fn proportions_sum_to_one_hundred() {
        let expenses = [
            sample(400.0, "Rent", (2024, 1, 1)),
            sample(123.45, "Food", (2024, 1, 3)),
            sample(77.7, "Shopping", (2024, 2, 9)),
            sample(10.01, "Food", (2024, 2, 10)),
        ];
        let out = analyze_spending(&expenses, 3);
        let sum: f64 = out.patterns.values().map(|p| p.proportion).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn monthly_average_is_mean_of_month_sums() {
        let expenses = [
            sample(100.0, "Food", (2024, 1, 1)),
            sample(50.0, "Food", (2024, 1, 20)),
            sample(30.0, "Food", (2024, 2, 5)),
        ];
        let out = analyze_spending(&expenses, 3);
        assert_eq!(out.patterns["Food"].monthly_average, 90.0);
        assert_eq!(out.average_spending["Food"], 90.0);
    }

    #[test]
    fn trends_need_three_points() {
        let expenses = [
            sample(10.0, "Food", (2024, 1, 1)),
            sample(20.0, "Food", (2024, 1, 2)),
            sample(10.0, "Fun", (2024, 1, 1)),
            sample(20.0, "Fun", (2024, 1, 2)),
            sample(30.0, "Fun", (2024, 1, 3)),
        ];
        let out = analyze_spending(&expenses, 3);
        assert!(!out.trends.contains_key("Food"));
        assert_eq!(
            out.trends["Fun"],
            Trend {
                direction: TrendDirection::Increasing,
                rate: 10.0
            }
        );
    }

    #[test]
    fn trend_uses_chronological_order() {
        // Inserted newest first; sorted by date the amounts decrease.
        let expenses = [
            sample(10.0, "Fuel", (2024, 3, 1)),
            sample(20.0, "Fuel", (2024, 2, 1)),
            sample(30.0, "Fuel", (2024, 1, 1)),
        ];
        let trend = analyze_spending(&expenses, 3).trends["Fuel"];
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert_eq!(trend.rate, 10.0);
    }

    #[test]
    fn flat_amounts_are_stable() {
        let expenses = [
            sample(12.5, "Gym", (2024, 1, 1)),
            sample(12.5, "Gym", (2024, 2, 1)),
            sample(12.5, "Gym", (2024, 3, 1)),
            sample(12.5, "Gym", (2024, 4, 1)),
        ];
        let trend = analyze_spending(&expenses, 3).trends["Gym"];
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.rate, 0.0);
    }

    #[test]
    fn single_cent_step_over_many_points_is_a_trend() {
        // Slope is roughly 6e-10 per observation.
        let mut expenses: Vec<ExpenseSample> = (0..9_999)
            .map(|_| sample(100.0, "Coffee", (2024, 1, 1)))
            .collect();
        expenses.push(sample(100.01, "Coffee", (2024, 1, 1)));

        let trend = analyze_spending(&expenses, 3).trends["Coffee"];
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!(trend.rate > 0.0 && trend.rate < 1e-9);
    }

    #[test]
    fn all_zero_amounts_are_stable() {
        let expenses = [
            sample(0.0, "Free", (2024, 1, 1)),
            sample(0.0, "Free", (2024, 1, 2)),
            sample(0.0, "Free", (2024, 1, 3)),
        ];
        let trend = analyze_spending(&expenses, 3).trends["Free"];
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn zero_total_gives_zero_proportion() {
        let expenses = [sample(0.0, "Free", (2024, 1, 1))];
        assert_eq!(analyze_spending(&expenses, 3).patterns["Free"].proportion, 0.0);
    }
}
