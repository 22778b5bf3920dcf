use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Currency an account is held in.
///
/// Balances and amounts are stored as `i64` minor units; every supported
/// currency uses two fraction digits, so `10.50 USD` ⇄ `1050`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(EngineError::InvalidField(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::try_from(" Gbp ").unwrap(), Currency::Gbp);
        assert_eq!(Currency::try_from("EUR").unwrap().code(), "EUR");
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            Currency::try_from("JPY"),
            Err(EngineError::InvalidField(
                "unsupported currency: JPY".to_string()
            ))
        );
    }
}
