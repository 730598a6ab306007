//! Currency codes and display symbols

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// An ISO-4217 style currency code, always stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, normalizing to uppercase
    pub fn new(code: &str) -> Result<Self, CurrencyCodeError> {
        let code = code.trim();
        if code.len() < 3 || code.len() > 4 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyCodeError(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Russian ruble, the default base currency
    pub fn rub() -> Self {
        Self("RUB".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for the currency; unknown codes render as the code itself
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "RUB" => "₽",
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" | "CNY" => "¥",
            "KZT" => "₸",
            "TRY" => "₺",
            "UAH" => "₴",
            "GEL" => "₾",
            "AMD" => "֏",
            "BYN" => "Br",
            other => other,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Error for malformed currency codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCodeError(pub String);

impl fmt::Display for CurrencyCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid currency code: {:?}", self.0)
    }
}

impl std::error::Error for CurrencyCodeError {}

/// Format an amount in the given currency, e.g. `-₽1,250.00`
pub fn format_money(amount: Money, currency: &CurrencyCode) -> String {
    amount.format_with_symbol(currency.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_normalization() {
        let code = CurrencyCode::new(" usd ").unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.to_string(), "USD");
    }

    #[test]
    fn test_invalid_codes() {
        assert!(CurrencyCode::new("").is_err());
        assert!(CurrencyCode::new("U$").is_err());
        assert!(CurrencyCode::new("DOLLARS").is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(CurrencyCode::new("RUB").unwrap().symbol(), "₽");
        assert_eq!(CurrencyCode::new("EUR").unwrap().symbol(), "€");
        assert_eq!(CurrencyCode::new("CHF").unwrap().symbol(), "CHF");
    }

    #[test]
    fn test_format_money_round_trips() {
        for code in ["RUB", "USD", "CHF", "BYN"] {
            let currency = CurrencyCode::new(code).unwrap();
            let amount = Money::from_cents(-123_456_789);
            let rendered = format_money(amount, &currency);
            assert_eq!(Money::parse(&rendered).unwrap(), amount, "{}", rendered);
        }
    }

    #[test]
    fn test_serde() {
        let code: CurrencyCode = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(code.as_str(), "EUR");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"EUR\"");
        assert!(serde_json::from_str::<CurrencyCode>("\"1\"").is_err());
    }
}
