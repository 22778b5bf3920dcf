use crate::{EngineError, ResultEngine};

/// Signed money amount stored as integer **minor units** (cents).
///
/// Records keep amounts in this form; the analysis engine and the report
/// switch to `f64` major units through [`MoneyMinor::to_major`].
///
/// # Examples
///
/// ```rust
/// use engine::MoneyMinor;
///
/// let total = MoneyMinor::checked_sum([12_34, 66]).unwrap();
/// assert_eq!(total.to_major(), 13.0);
/// assert_eq!(MoneyMinor::new(-1050).to_major(), -10.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyMinor(i64);

impl MoneyMinor {
    pub const ZERO: MoneyMinor = MoneyMinor(0);

    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Value in major units (`1050` → `10.5`).
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Sums amounts, failing instead of wrapping on overflow.
    pub fn checked_sum(values: impl IntoIterator<Item = i64>) -> ResultEngine<MoneyMinor> {
        values
            .into_iter()
            .try_fold(MoneyMinor::ZERO, |acc, v| acc.0.checked_add(v).map(MoneyMinor))
            .ok_or_else(|| EngineError::InvalidAmount("amount total too large".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_major_divides_by_one_hundred() {
        assert_eq!(MoneyMinor::new(0).to_major(), 0.0);
        assert_eq!(MoneyMinor::new(7).to_major(), 0.07);
        assert_eq!(MoneyMinor::new(1050).to_major(), 10.5);
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(
            MoneyMinor::checked_sum([100, 250]).unwrap(),
            MoneyMinor::new(350)
        );
        assert_eq!(MoneyMinor::checked_sum([]).unwrap(), MoneyMinor::ZERO);
        assert!(MoneyMinor::checked_sum([i64::MAX, 1]).is_err());
    }
}
