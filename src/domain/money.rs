use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For BRL/USD, 1 unit = 100 cents, so R$ 50,00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a plain decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Either `.` or `,` is accepted as the decimal separator.
/// Example: "50.00" -> 5000, "12,5" -> 1250, "-100" -> -10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim().replacen(',', ".", 1);
    // At most one leading sign
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.as_str()),
    };

    let parts: Vec<&str> = input.split('.').collect();
    let cents = match parts.as_slice() {
        [units] => parse_digits(units)? * 100,
        [units, decimals] => {
            if units.is_empty() && decimals.is_empty() {
                return Err(ParseCentsError::InvalidFormat);
            }
            if !decimals.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseCentsError::InvalidFormat);
            }
            let units = if units.is_empty() {
                0
            } else {
                parse_digits(units)?
            };

            // Pad a single digit ("5" means 50 cents), truncate past two
            let decimal_cents = match decimals.len() {
                0 => 0,
                1 => parse_digits(decimals)? * 10,
                _ => parse_digits(&decimals[..2])?,
            };
            units * 100 + decimal_cents
        }
        _ => return Err(ParseCentsError::InvalidFormat),
    };

    Ok(if negative { -cents } else { cents })
}

fn parse_digits(digits: &str) -> Result<i64, ParseCentsError> {
    // 15 digits keeps `units * 100` well inside i64
    if digits.is_empty() || digits.len() > 15 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    digits.parse().map_err(|_| ParseCentsError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

/// Display locale for currency and dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese, Brazilian real.
    #[default]
    PtBr,
    /// US English, US dollar.
    EnUs,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }

    pub fn currency_code(&self) -> &'static str {
        match self {
            Locale::PtBr => "BRL",
            Locale::EnUs => "USD",
        }
    }

    fn currency_symbol(&self) -> &'static str {
        match self {
            Locale::PtBr => "R$\u{a0}",
            Locale::EnUs => "$",
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Locale::PtBr => '.',
            Locale::EnUs => ',',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::PtBr => ',',
            Locale::EnUs => '.',
        }
    }

    fn date_pattern(&self) -> &'static str {
        match self {
            Locale::PtBr => "%d/%m/%Y",
            Locale::EnUs => "%-m/%-d/%Y",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

/// Format cents as a currency string for the given locale.
/// Example: 123456 -> "R$ 1.234,56" (pt-BR), "$1,234.56" (en-US)
pub fn format_currency(cents: Cents, locale: Locale) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = group_thousands(abs_cents / 100, locale.group_separator());
    format!(
        "{}{}{}{}{:02}",
        sign,
        locale.currency_symbol(),
        units,
        locale.decimal_separator(),
        abs_cents % 100
    )
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Format a `YYYY-MM-DD` date string for the given locale.
/// Strings that are not a valid date are returned unchanged.
pub fn format_date(date: &str, locale: Locale) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) => parsed.format(locale.date_pattern()).to_string(),
        Err(_) => date.to_string(),
    }
}

/// Serde adapter: cents in memory, decimal currency units on the wire.
pub mod units {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Cents;

    pub fn serialize<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok((value * 100.0).round() as Cents)
    }

    /// Same as the parent module, for optional fields.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::Cents;

        pub fn serialize<S: Serializer>(
            cents: &Option<Cents>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match cents {
                Some(cents) => serializer.serialize_some(&(*cents as f64 / 100.0)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Cents>, D::Error> {
            let value = Option::<f64>::deserialize(deserializer)?;
            Ok(value.map(|v| (v * 100.0).round() as Cents))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
        assert_eq!(format_cents(Cents::MIN), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("-150"), Ok(-15000));
        assert_eq!(parse_cents("100.999"), Ok(10099)); // Truncates
    }

    #[test]
    fn test_parse_cents_with_comma() {
        assert_eq!(parse_cents("150,75"), Ok(15075));
        assert_eq!(parse_cents("-45,5"), Ok(-4550));
        assert_eq!(parse_cents(" 3000 "), Ok(300000));
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("").is_err());
        assert!(parse_cents("-").is_err());
        assert!(parse_cents(".").is_err());
        assert!(parse_cents("12.34.56").is_err());
        assert!(parse_cents("1.234,56").is_err());
        assert!(parse_cents("12abc").is_err());
        assert!(parse_cents("+12").is_err());
        assert!(parse_cents("--5").is_err());
        assert!(parse_cents("-−5").is_err());
        assert!(parse_cents("- 5").is_err());
    }

    #[test]
    fn test_format_currency_pt_br() {
        assert_eq!(format_currency(300000, Locale::PtBr), "R$\u{a0}3.000,00");
        assert_eq!(format_currency(4500, Locale::PtBr), "R$\u{a0}45,00");
        assert_eq!(format_currency(-272500, Locale::PtBr), "-R$\u{a0}2.725,00");
        assert_eq!(
            format_currency(123456789, Locale::PtBr),
            "R$\u{a0}1.234.567,89"
        );
        assert_eq!(format_currency(0, Locale::PtBr), "R$\u{a0}0,00");
    }

    #[test]
    fn test_format_currency_en_us() {
        assert_eq!(format_currency(300000, Locale::EnUs), "$3,000.00");
        assert_eq!(format_currency(-1, Locale::EnUs), "-$0.01");
        assert_eq!(format_currency(99999, Locale::EnUs), "$999.99");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-10-05", Locale::PtBr), "05/10/2025");
        assert_eq!(format_date("2025-10-05", Locale::EnUs), "10/5/2025");
        assert_eq!(format_date("yesterday", Locale::PtBr), "yesterday");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("pt-BR".parse::<Locale>(), Ok(Locale::PtBr));
        assert_eq!("en_US".parse::<Locale>(), Ok(Locale::EnUs));
        assert!("fr-FR".parse::<Locale>().is_err());
    }
}
