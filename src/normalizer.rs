use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Section;

// Trailing EUR/USD token, with or without trailing whitespace.
static FIXED_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(EUR|USD)\s*$").expect("fixed currency pattern"));

// Amount cells may carry the code glued to the number.
static AMOUNT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(EUR|USD)\s*$").expect("amount currency pattern"));

// Leading decimal number; anything after it is ignored.
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("number pattern")
});

pub const DEFAULT_DOMESTIC_CURRENCY: &str = "INR";

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Finds the year part, swaps an overflowing month into the day slot and clamps.
    Permissive,
    /// Reads day/month/year positionally with no repair.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyStyle {
    /// Any trailing three-letter uppercase token, international rows only.
    SuffixMatch,
    /// Only a trailing literal EUR or USD token.
    FixedCode,
}

/// Named normalizer configurations selectable from settings or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Permissive,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub date: DateStyle,
    pub currency: CurrencyStyle,
    pub domestic_currency: String,
}

impl Policy {
    pub fn for_profile(profile: Profile, domestic_currency: &str) -> Self {
        let (date, currency) = match profile {
            Profile::Permissive => (DateStyle::Permissive, CurrencyStyle::SuffixMatch),
            Profile::Strict => (DateStyle::Strict, CurrencyStyle::FixedCode),
        };
        Self {
            date,
            currency,
            domestic_currency: domestic_currency.to_string(),
        }
    }

    pub fn normalize_date(&self, raw: &str) -> String {
        match self.date {
            DateStyle::Permissive => normalize_date_permissive(raw),
            DateStyle::Strict => normalize_date_strict(raw),
        }
    }

    /// Currency for a row. `code_in_any_section` lets a dialect report a
    /// fixed code even on domestic rows.
    pub fn currency(
        &self,
        description: &str,
        section: Section,
        code_in_any_section: bool,
    ) -> String {
        match self.currency {
            CurrencyStyle::SuffixMatch if !section.is_international() => {
                self.domestic_currency.clone()
            }
            CurrencyStyle::SuffixMatch => suffix_currency(description, true),
            CurrencyStyle::FixedCode if section.is_international() || code_in_any_section => {
                fixed_code_currency(description)
            }
            CurrencyStyle::FixedCode => String::new(),
        }
    }

    pub fn location(&self, description: &str, section: Section) -> String {
        match self.currency {
            CurrencyStyle::SuffixMatch => {
                location_strip_currency_token(description, section.is_international())
            }
            CurrencyStyle::FixedCode => location_strip_fixed_code(description),
        }
    }

    /// Description as emitted; fixed-code output drops the trailing code.
    pub fn description(&self, raw: &str) -> String {
        match self.currency {
            CurrencyStyle::SuffixMatch => raw.to_string(),
            CurrencyStyle::FixedCode => strip_fixed_code(raw),
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::for_profile(Profile::default(), DEFAULT_DOMESTIC_CURRENCY)
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

fn split_date(s: &str) -> Option<[&str; 3]> {
    let sep = if s.contains('-') {
        '-'
    } else if s.contains('/') {
        '/'
    } else {
        return None;
    };
    let parts: Vec<&str> = s.split(sep).map(str::trim).collect();
    match parts.as_slice() {
        [a, b, c] if !a.is_empty() && !b.is_empty() && !c.is_empty() => Some([a, b, c]),
        _ => None,
    }
}

fn pad2(s: &str) -> String {
    format!("{s:0>2}")
}

fn expand_year(year: &str) -> String {
    if year.chars().count() == 2 {
        format!("20{year}")
    } else {
        year.to_string()
    }
}

pub fn normalize_date_permissive(raw: &str) -> String {
    let s = raw.trim();
    if s == "Date" {
        return String::new();
    }
    let Some([p1, p2, p3]) = split_date(s) else {
        return s.to_string();
    };

    let (day, month, year) = match (p1.len(), p3.len()) {
        (_, 4) | (_, 2) => (p1, p2, p3),
        (4, _) => (p3, p2, p1),
        _ => return s.to_string(),
    };

    let (Ok(mut d), Ok(mut m)) = (day.parse::<u32>(), month.parse::<u32>()) else {
        return s.to_string();
    };
    // A month over 12 is taken to be a day in the wrong slot.
    if m > 12 {
        std::mem::swap(&mut d, &mut m);
    }

    let d = d.clamp(1, 31);
    let m = m.clamp(1, 12);
    format!("{d:02}-{m:02}-{}", expand_year(year))
}

pub fn normalize_date_strict(raw: &str) -> String {
    let s = raw.trim();
    if s == "Date" {
        return String::new();
    }
    let Some([day, month, year]) = split_date(s) else {
        return s.to_string();
    };
    format!("{}-{}-{}", pad2(day), pad2(month), expand_year(year))
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amount {
    pub debit: String,
    pub credit: String,
}

/// Parse the number at the start of a cell, ignoring thousands separators and
/// whatever trails it (`500.00 Dr` reads as 500).
fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.replace(',', "");
    let number = LEADING_NUMBER_RE.find(s.trim_start())?;
    let v: f64 = number.as_str().parse().ok()?;
    v.is_finite().then_some(v)
}

/// Amount cell with an optional EUR/USD suffix and an optional trailing "cr"
/// credit marker, e.g. `1,234.56Cr` or `99.00 USD`.
pub fn signed_amount(raw: &str) -> Amount {
    let s = AMOUNT_CODE_RE.replace(raw.trim(), "").trim().to_string();
    let lower = s.to_ascii_lowercase();
    let (is_credit, number) = match lower.strip_suffix("cr") {
        Some(_) => (true, &s[..s.len() - 2]),
        None => (false, s.as_str()),
    };
    let Some(value) = parse_decimal(number) else {
        return Amount::default();
    };
    let formatted = format!("{value:.2}");
    if is_credit {
        Amount {
            debit: String::new(),
            credit: formatted,
        }
    } else {
        Amount {
            debit: formatted,
            credit: String::new(),
        }
    }
}

/// A plain debit or credit cell.
pub fn plain_amount(raw: &str) -> String {
    parse_decimal(raw)
        .map(|v| format!("{v:.2}"))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Currency and location
// ---------------------------------------------------------------------------

/// Three characters with nothing lowercase; digit codes such as `001` count.
fn is_currency_token(word: &str) -> bool {
    word.chars().count() == 3 && word == word.to_uppercase()
}

pub fn suffix_currency(description: &str, is_international: bool) -> String {
    if !is_international {
        return String::new();
    }
    match description.split_whitespace().last() {
        Some(word) if is_currency_token(word) => word.to_string(),
        _ => String::new(),
    }
}

pub fn fixed_code_currency(description: &str) -> String {
    FIXED_CODE_RE
        .captures(description)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

pub fn strip_fixed_code(s: &str) -> String {
    FIXED_CODE_RE.replace(s, "").trim().to_string()
}

pub fn location_strip_currency_token(description: &str, is_international: bool) -> String {
    let mut words: Vec<&str> = description.split_whitespace().collect();
    if is_international && words.last().is_some_and(|w| is_currency_token(w)) {
        words.pop();
    }
    words.last().map(|w| w.to_lowercase()).unwrap_or_default()
}

pub fn location_strip_fixed_code(description: &str) -> String {
    strip_fixed_code(description)
        .split_whitespace()
        .last()
        .map(str::to_lowercase)
        .unwrap_or_default()
}
