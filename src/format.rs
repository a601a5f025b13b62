//! Currency display for split totals.
//!
//! Only used to render numbers; formatted strings never flow back into
//! [`calculator`](crate::calculator).

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Amount;

/// Decimal digits an `f64` holds without loss
const F64_SIGNIFICANT_DIGITS: u32 = 15;

pub trait CurrencyFormatter {
    /// ISO-4217 code of the currency this formatter renders
    fn currency_code(&self) -> &str;

    fn format_currency(&self, amount: Amount) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1.00`
    Prefix,
    /// `1,00\u{a0}€`
    Suffix,
}

/// Symbol, separators and precision for one currency in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: &'static str,
    pub symbol: &'static str,
    pub position: SymbolPosition,
    pub grouping: char,
    pub decimal: char,
    pub fraction_digits: u32,
}

impl CurrencyFormat {
    pub const USD: CurrencyFormat = CurrencyFormat::prefix("USD", "$", ',', '.', 2);

    const fn prefix(
        code: &'static str,
        symbol: &'static str,
        grouping: char,
        decimal: char,
        fraction_digits: u32,
    ) -> Self {
        Self { code, symbol, position: SymbolPosition::Prefix, grouping, decimal, fraction_digits }
    }

    const fn suffix(
        code: &'static str,
        symbol: &'static str,
        grouping: char,
        decimal: char,
        fraction_digits: u32,
    ) -> Self {
        Self { code, symbol, position: SymbolPosition::Suffix, grouping, decimal, fraction_digits }
    }

    /// Format for an ISO-4217 code in its home conventions. Unknown codes
    /// keep US separators behind the generic currency sign.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Self::USD,
            "EUR" => Self::suffix("EUR", "€", '.', ',', 2),
            "GBP" => Self::prefix("GBP", "£", ',', '.', 2),
            "JPY" => Self::prefix("JPY", "¥", ',', '.', 0),
            "CHF" => Self::prefix("CHF", "CHF ", '\'', '.', 2),
            "INR" => Self::prefix("INR", "₹", ',', '.', 2),
            "CAD" => Self::prefix("CAD", "CA$", ',', '.', 2),
            "AUD" => Self::prefix("AUD", "A$", ',', '.', 2),
            _ => {
                let mut format = Self::USD;
                format.code = "XXX";
                format.symbol = "¤";
                format
            }
        }
    }

    /// Format for a locale such as `en_US`, `de-DE` or `fr_FR`. Unknown
    /// locales fall back to US dollars.
    pub fn from_locale(locale: &str) -> Self {
        let normalized = locale.replace('-', "_");
        let mut parts = normalized.split('_');
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().unwrap_or_default().to_ascii_uppercase();

        match (language.as_str(), region.as_str()) {
            ("en", "GB") => Self::from_code("GBP"),
            ("en", "IN") | ("hi", _) => Self::from_code("INR"),
            ("en", "CA") => Self::prefix("CAD", "$", ',', '.', 2),
            ("en", "AU") => Self::prefix("AUD", "$", ',', '.', 2),
            ("ja", _) | (_, "JP") => Self::from_code("JPY"),
            ("de", "CH") | ("fr", "CH") => Self::from_code("CHF"),
            ("de", _) | ("es", _) | ("it", _) | ("nl", _) => Self::from_code("EUR"),
            ("fr", _) => Self::suffix("EUR", "€", '\u{202f}', ',', 2),
            ("en", "IE") => Self::prefix("EUR", "€", ',', '.', 2),
            _ => Self::USD,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::USD
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn currency_code(&self) -> &str {
        self.code
    }

    fn format_currency(&self, amount: Amount) -> String {
        let Some(rounded) = round_money(amount, self.fraction_digits) else {
            return format!("{}{}", self.symbol, amount);
        };

        let mut digits = rounded.abs();
        digits.rescale(self.fraction_digits);
        let digits = digits.to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut number = group_digits(whole, self.grouping);
        if !fraction.is_empty() {
            number.push(self.decimal);
            number.push_str(fraction);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        match self.position {
            SymbolPosition::Prefix => format!("{sign}{}{number}", self.symbol),
            SymbolPosition::Suffix => format!("{sign}{number}\u{a0}{}", self.symbol),
        }
    }
}

/// Round `amount` to `fraction_digits` places, half away from zero.
///
/// The binary error of the `f64` is dropped first, so `1.005` rounds to
/// `1.01`. `None` for NaN, infinities and amounts outside `Decimal` range.
pub fn round_money(amount: Amount, fraction_digits: u32) -> Option<Decimal> {
    let exact = Decimal::from_f64(amount)?;
    let decimal = exact.round_sf(F64_SIGNIFICANT_DIGITS).unwrap_or(exact);
    Some(decimal.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero))
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Format `amount` the way `locale_code` writes money.
pub fn format_currency(amount: Amount, locale_code: &str) -> String {
    CurrencyFormat::from_locale(locale_code).format_currency(amount)
}
