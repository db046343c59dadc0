use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Opaque currency tag attached to expenses and settlements.
///
/// The engine never converts between currencies; balances are arithmetic
/// over minor units and the tag travels alongside unchanged. The only
/// constraint is structural: 1 to 8 ASCII alphanumerics, stored uppercase,
/// so `"EUR"`, `"USD"` and ad-hoc tags like `"POINTS"` are all valid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Canonical (uppercased) currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency("EUR".to_string())
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
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.len() > 8 {
            return Err(EngineError::Validation(format!(
                "invalid currency tag: {value:?}"
            )));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EngineError::Validation(format!(
                "invalid currency tag: {value:?}"
            )));
        }
        Ok(Currency(trimmed.to_ascii_uppercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_uppercases_codes() {
        assert_eq!(Currency::try_from("eur").unwrap().code(), "EUR");
        assert_eq!(Currency::try_from(" USD ").unwrap().code(), "USD");
        assert_eq!(Currency::try_from("points").unwrap().code(), "POINTS");
    }

    #[test]
    fn rejects_malformed_tags() {
        assert!(Currency::try_from("").is_err());
        assert!(Currency::try_from("   ").is_err());
        assert!(Currency::try_from("TOOLONGTAG").is_err());
        assert!(Currency::try_from("EU-R").is_err());
    }
}
