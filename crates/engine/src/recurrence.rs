use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// How often a recurring expense or income repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringPeriod {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl RecurringPeriod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl TryFrom<&str> for RecurringPeriod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(EngineError::InvalidField(format!(
                "invalid recurring period: {other}"
            ))),
        }
    }
}

/// A recurring record needs a period and a one-off record must not carry one.
pub(crate) fn check_recurrence(
    is_recurring: bool,
    period: Option<RecurringPeriod>,
) -> ResultEngine<()> {
    match (is_recurring, period) {
        (true, None) => Err(EngineError::InvalidField(
            "recurring_period is required for recurring records".to_string(),
        )),
        (false, Some(_)) => Err(EngineError::InvalidField(
            "recurring_period is only allowed on recurring records".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Decode the nullable `recurring_period` column.
pub(crate) fn period_from_column(value: Option<&str>) -> ResultEngine<Option<RecurringPeriod>> {
    value.map(RecurringPeriod::try_from).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurrence_requires_matching_period() {
        assert!(check_recurrence(true, Some(RecurringPeriod::Monthly)).is_ok());
        assert!(check_recurrence(false, None).is_ok());
        assert!(check_recurrence(true, None).is_err());
        assert!(check_recurrence(false, Some(RecurringPeriod::Weekly)).is_err());
    }

    #[test]
    fn period_column_round_trip() {
        for period in [
            RecurringPeriod::Weekly,
            RecurringPeriod::Monthly,
            RecurringPeriod::Quarterly,
            RecurringPeriod::Yearly,
        ] {
            assert_eq!(RecurringPeriod::try_from(period.as_str()).unwrap(), period);
        }
        assert!(RecurringPeriod::try_from("daily").is_err());
        assert_eq!(period_from_column(None).unwrap(), None);
    }
}
