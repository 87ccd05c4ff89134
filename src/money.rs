//! Currency formatting with en-US digit conventions.
//!
//! The glyph table is explicit rather than locale-driven: CHF and BTC are
//! not reliably known to locale formatters, so every supported code carries
//! its own glyph and fraction digits.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pricing::sanitize_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Chf,
    Cny,
    Mxn,
    Btc,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 8] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Chf,
        CurrencyCode::Cny,
        CurrencyCode::Mxn,
        CurrencyCode::Btc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Chf => "CHF",
            CurrencyCode::Cny => "CNY",
            CurrencyCode::Mxn => "MXN",
            CurrencyCode::Btc => "BTC",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnsupportedCurrency(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyMeta {
    pub code: CurrencyCode,
    /// Glyph a formatted amount starts with.
    pub glyph: &'static str,
    /// Short symbol offered by the form's currency picker.
    pub picker_symbol: &'static str,
    pub flag: &'static str,
    pub fraction_digits: u32,
    /// Alphabetic glyphs are separated from the digits by a no-break space.
    pub spaced: bool,
}

const fn meta(
    code: CurrencyCode,
    glyph: &'static str,
    picker_symbol: &'static str,
    flag: &'static str,
    fraction_digits: u32,
    spaced: bool,
) -> CurrencyMeta {
    CurrencyMeta { code, glyph, picker_symbol, flag, fraction_digits, spaced }
}

const BUILTIN_CURRENCIES: [CurrencyMeta; 8] = [
    meta(CurrencyCode::Usd, "$", "$", "🇺🇸", 2, false),
    meta(CurrencyCode::Eur, "\u{20AC}", "\u{20AC}", "🇪🇺", 2, false),
    meta(CurrencyCode::Gbp, "\u{00A3}", "\u{00A3}", "🇬🇧", 2, false),
    meta(CurrencyCode::Jpy, "\u{00A5}", "\u{00A5}", "🇯🇵", 0, false),
    meta(CurrencyCode::Chf, "CHF", "CHF", "🇨🇭", 2, true),
    meta(CurrencyCode::Cny, "CN\u{00A5}", "\u{00A5}", "🇨🇳", 2, false),
    meta(CurrencyCode::Mxn, "MX$", "$", "🇲🇽", 2, false),
    meta(CurrencyCode::Btc, "BTC", "\u{20BF}", "🪙", 2, true),
];

static BUILTIN: LazyLock<CurrencyCatalog> =
    LazyLock::new(|| CurrencyCatalog::new(BUILTIN_CURRENCIES.to_vec()));

#[derive(Debug, Clone)]
pub struct CurrencyCatalog {
    entries: Vec<CurrencyMeta>,
}

impl CurrencyCatalog {
    pub fn new(entries: Vec<CurrencyMeta>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> &'static CurrencyCatalog {
        &BUILTIN
    }

    pub fn entries(&self) -> &[CurrencyMeta] {
        &self.entries
    }

    pub fn get(&self, code: CurrencyCode) -> Result<&CurrencyMeta> {
        self.entries
            .iter()
            .find(|m| m.code == code)
            .ok_or_else(|| Error::UnsupportedCurrency(code.to_string()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MoneyFormatter<'a> {
    catalog: &'a CurrencyCatalog,
}

impl Default for MoneyFormatter<'static> {
    fn default() -> Self {
        Self::new(CurrencyCatalog::builtin())
    }
}

impl<'a> MoneyFormatter<'a> {
    pub fn new(catalog: &'a CurrencyCatalog) -> Self {
        Self { catalog }
    }

    /// Formats `amount` under `code`, e.g. `$8,000.00` or `CHF 1,234.50`.
    ///
    /// A non-empty `symbol_override` replaces everything ahead of the first
    /// digit. A leading minus survives the splice.
    pub fn format(&self, amount: f64, code: CurrencyCode, symbol_override: Option<&str>) -> Result<String> {
        let meta = self.catalog.get(code)?;
        let amount = sanitize_number(amount);
        let digits = group_digits(amount.abs(), meta.fraction_digits);
        let negative = amount < 0.0 && digits.bytes().any(|b| (b'1'..=b'9').contains(&b));
        let sign = if negative { "-" } else { "" };

        let formatted = if meta.spaced {
            format!("{sign}{}\u{00A0}{digits}", meta.glyph)
        } else {
            format!("{sign}{}{digits}", meta.glyph)
        };

        match symbol_override.filter(|s| !s.is_empty()) {
            Some(symbol) => Ok(splice_symbol(&formatted, symbol)),
            None => Ok(formatted),
        }
    }
}

fn splice_symbol(formatted: &str, symbol: &str) -> String {
    let Some(first_digit) = formatted.find(|c: char| c.is_ascii_digit()) else {
        return format!("{symbol}{formatted}");
    };
    let sign = if formatted.starts_with('-') { "-" } else { "" };
    format!("{sign}{symbol}{}", &formatted[first_digit..])
}

/// `1234.5` with 2 fraction digits → `1,234.50`.
///
/// Rounds the shortest decimal representation of `value` half away from
/// zero, so `8547.425` becomes `8,547.43` even though the nearest double
/// sits just below the midpoint.
fn group_digits(value: f64, fraction_digits: u32) -> String {
    let width = fraction_digits as usize;
    let plain = match Decimal::from_str(&value.to_string()) {
        Ok(d) => {
            let mut rounded = d.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(fraction_digits);
            rounded.to_string()
        }
        // beyond Decimal's range; the float digits are the best we have
        Err(_) => format!("{value:.width$}"),
    };

    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + width + 1);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction_digits > 0 {
        grouped.push('.');
        grouped.push_str(&format!("{fraction:0<width$}"));
    }
    grouped
}
