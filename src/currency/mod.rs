//! Currency codes and locale-aware amount formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Currencies offered by the planner's currency picker.
pub const SUPPORTED_CURRENCIES: [&str; 4] = ["USD", "EUR", "INR", "JPY"];

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// Builds a code after checking it looks like an ISO 4217 alpha code.
    pub fn parse(code: &str) -> Result<Self, LedgerError> {
        let candidate = Self::new(code);
        if candidate.0.len() == 3 && candidate.0.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(candidate)
        } else {
            Err(LedgerError::validation(format!(
                "`{}` is not a three-letter currency code",
                code.trim()
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Separator preferences used when rendering numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "INR" => "₹".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body.as_str(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, locale.grouping_separator)),
        None => group_digits(int_part, locale.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats `amount` in `code`, e.g. `$1,200.00` or `USD 1,200.00`.
pub fn format_currency(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    display: CurrencyDisplay,
) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let sign = if amount < 0.0 { "-" } else { "" };
    match display {
        CurrencyDisplay::Symbol => format!("{}{}{}", sign, symbol_for(code.as_str()), body),
        CurrencyDisplay::Code => format!("{}{} {}", sign, code.as_str(), body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_symbol_and_grouping() {
        let locale = LocaleConfig::default();
        let usd = CurrencyCode::new("usd");
        assert_eq!(
            format_currency(1200.0, &usd, &locale, CurrencyDisplay::Symbol),
            "$1,200.00"
        );
        assert_eq!(
            format_currency(1234567.5, &usd, &locale, CurrencyDisplay::Code),
            "USD 1,234,567.50"
        );
    }

    #[test]
    fn zero_decimal_currencies_skip_minor_units() {
        let locale = LocaleConfig::default();
        let jpy = CurrencyCode::new("JPY");
        assert_eq!(
            format_currency(420.0, &jpy, &locale, CurrencyDisplay::Symbol),
            "¥420"
        );
    }

    #[test]
    fn custom_separators_are_respected() {
        let locale = LocaleConfig {
            language_tag: "de-DE".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        };
        assert_eq!(format_number(&locale, 98765.4, 2), "98.765,40");
        assert_eq!(format_number(&locale, -1000.0, 0), "-1.000");
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        assert!(CurrencyCode::parse("eur").is_ok());
        assert!(CurrencyCode::parse("").is_err());
        assert!(CurrencyCode::parse("US1").is_err());
        assert!(CurrencyCode::parse("DOLLAR").is_err());
    }
}
