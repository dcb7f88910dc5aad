use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer kuruş** (1/100 TL).
///
/// Use this type for **all** monetary values in the engine (order amounts,
/// ledger totals, balances) to avoid floating-point drift.
///
/// The value is signed:
/// - positive = credit / money in
/// - negative = debit / money out
///
/// # Examples
///
/// ```rust
/// use engine::Kurus;
///
/// let amount = Kurus::new(12_34);
/// assert_eq!(amount.kurus(), 1234);
/// assert_eq!(amount.to_string(), "12,34");
/// ```
///
/// Parsing accepts the messy amount text the store actually contains: a `TL`
/// suffix or `₺` symbol, whitespace, and either separator convention:
///
/// ```rust
/// use engine::Kurus;
///
/// assert_eq!("1.250,50".parse::<Kurus>().unwrap().kurus(), 125_050);
/// assert_eq!("1,250.50".parse::<Kurus>().unwrap().kurus(), 125_050);
/// assert_eq!("1250,50 TL".parse::<Kurus>().unwrap().kurus(), 125_050);
/// assert!("abc".parse::<Kurus>().is_err());
/// ```
///
/// When both `.` and `,` are present the **rightmost** one is the decimal
/// point and the other is stripped as thousands grouping. A sole `,` is
/// always the decimal point. A sole `.` is the decimal point when followed
/// by 1 or 2 digits; a trailing group of exactly 3 digits (or several `.`
/// groups) is thousands grouping, so `"1250.5"` is 1250.50 and `"1.250"` is
/// 1250.00. More than 2 fractional digits is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kurus(i64);

impl Kurus {
    pub const ZERO: Kurus = Kurus(0);

    /// Creates a new amount from integer kuruş.
    #[must_use]
    pub const fn new(kurus: i64) -> Self {
        Self(kurus)
    }

    /// Returns the raw value in kuruş.
    #[must_use]
    pub const fn kurus(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Kurus) -> Option<Kurus> {
        self.0.checked_add(rhs.0).map(Kurus)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Kurus) -> Option<Kurus> {
        self.0.checked_sub(rhs.0).map(Kurus)
    }

    /// Converts a value in major units (lira) to kuruş, rounding at the 2nd
    /// decimal digit.
    ///
    /// Non-finite input maps to zero; numeric store fields pass through
    /// without string coercion.
    #[must_use]
    pub fn from_major(value: f64) -> Kurus {
        if !value.is_finite() {
            return Kurus::ZERO;
        }
        Kurus((value * 100.0).round() as i64)
    }

    /// Parses amount text, substituting [`Kurus::ZERO`] for anything
    /// unparseable.
    ///
    /// This is the surface the interactive callers use: malformed manual
    /// input degrades to zero instead of failing the whole submission. Use
    /// `str::parse` when the caller wants to distinguish a parse failure
    /// from an intentional zero.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Kurus {
        s.parse().unwrap_or(Kurus::ZERO)
    }
}

impl fmt::Display for Kurus {
    /// Formats as `#.###,##`: dot thousands grouping, comma decimal point,
    /// always 2 decimal digits. No currency suffix; appending `TL` is the
    /// caller's business.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let lira = (abs / 100).to_string();
        let kurus = abs % 100;

        let digits = lira.as_bytes();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, b) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(*b as char);
        }

        write!(f, "{sign}{grouped},{kurus:02}")
    }
}

impl From<i64> for Kurus {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Kurus> for i64 {
    fn from(value: Kurus) -> Self {
        value.0
    }
}

impl Add for Kurus {
    type Output = Kurus;

    fn add(self, rhs: Kurus) -> Self::Output {
        Kurus(self.0 + rhs.0)
    }
}

impl AddAssign for Kurus {
    fn add_assign(&mut self, rhs: Kurus) {
        self.0 += rhs.0;
    }
}

impl Sub for Kurus {
    type Output = Kurus;

    fn sub(self, rhs: Kurus) -> Self::Output {
        Kurus(self.0 - rhs.0)
    }
}

impl SubAssign for Kurus {
    fn sub_assign(&mut self, rhs: Kurus) {
        self.0 -= rhs.0;
    }
}

impl Neg for Kurus {
    type Output = Kurus;

    fn neg(self) -> Self::Output {
        Kurus(-self.0)
    }
}

/// Drops the `₺` symbol and a leading or trailing `TL` token (any ASCII case).
fn strip_currency(s: &str) -> String {
    let cleaned: String = s.chars().filter(|c| *c != '₺').collect();
    let mut t = cleaned.trim();

    if t.len() >= 2 && t.is_char_boundary(t.len() - 2) && t[t.len() - 2..].eq_ignore_ascii_case("tl")
    {
        t = t[..t.len() - 2].trim_end();
    } else if t.len() >= 2 && t.is_char_boundary(2) && t[..2].eq_ignore_ascii_case("tl") {
        t = t[2..].trim_start();
    }

    t.to_string()
}

/// Decides which separator, if any, is the decimal point.
///
/// Rightmost wins when both are present. A sole `,` is decimal. A sole `.`
/// follows the documented trailing-group rule.
fn decimal_separator(rest: &str) -> Option<char> {
    match (rest.rfind('.'), rest.rfind(',')) {
        (Some(dot), Some(comma)) => Some(if dot > comma { '.' } else { ',' }),
        (None, Some(_)) => Some(','),
        (Some(dot), None) => {
            if rest.matches('.').count() > 1 {
                return None;
            }
            match rest.len() - dot - 1 {
                3 => None,
                _ => Some('.'),
            }
        }
        (None, None) => None,
    }
}

impl FromStr for Kurus {
    type Err = EngineError;

    /// Parses localized amount text into kuruş.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345` and `1,250`)
    /// - rejects empty/invalid strings
    /// - accepts an optional leading `+`/`-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let stripped = strip_currency(s);
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(tail) = trimmed.strip_prefix('-') {
            (-1i64, tail)
        } else if let Some(tail) = trimmed.strip_prefix('+') {
            (1i64, tail)
        } else {
            (1i64, trimmed)
        };

        // Thousands-grouped input sometimes arrives with spaces instead of
        // separators ("1 250,50").
        let rest: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
        if rest.is_empty() {
            return Err(empty());
        }

        let (lira_part, frac_part) = match decimal_separator(&rest) {
            Some(sep) => {
                let idx = rest.rfind(sep).ok_or_else(invalid)?;
                (&rest[..idx], &rest[idx + 1..])
            }
            None => (rest.as_str(), ""),
        };

        let lira_digits: String = lira_part.chars().filter(|c| !matches!(c, '.' | ',')).collect();
        if lira_digits.is_empty() || !lira_digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let lira: i64 = lira_digits.parse().map_err(|_| overflow())?;

        if !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let kurus: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => frac_part.parse::<i64>().map_err(|_| invalid())?,
            _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
        };

        let total = lira
            .checked_mul(100)
            .and_then(|v| v.checked_add(kurus))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Kurus(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_tr() {
        assert_eq!(Kurus::new(0).to_string(), "0,00");
        assert_eq!(Kurus::new(1).to_string(), "0,01");
        assert_eq!(Kurus::new(1050).to_string(), "10,50");
        assert_eq!(Kurus::new(125_050).to_string(), "1.250,50");
        assert_eq!(Kurus::new(123_456_789).to_string(), "1.234.567,89");
        assert_eq!(Kurus::new(-125_050).to_string(), "-1.250,50");
    }

    #[test]
    fn parse_disambiguates_mixed_separators() {
        // Rightmost separator is the decimal point.
        assert_eq!("1.250,50".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("1,250.50".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("1.234.567,89".parse::<Kurus>().unwrap().kurus(), 123_456_789);
    }

    #[test]
    fn parse_sole_comma_is_decimal() {
        assert_eq!("1250,50".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("0,05".parse::<Kurus>().unwrap().kurus(), 5);
    }

    #[test]
    fn parse_sole_dot_trailing_group_rule() {
        // 1-2 trailing digits: decimal point. The historical strip-always
        // behavior turned "1250.5" into 12505.00; that is the bug this rule
        // replaces.
        assert_eq!("1250.5".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("1250.50".parse::<Kurus>().unwrap().kurus(), 125_050);
        // Exactly 3 trailing digits, or several groups: thousands grouping.
        assert_eq!("1.250".parse::<Kurus>().unwrap().kurus(), 125_000);
        assert_eq!("1.250.500".parse::<Kurus>().unwrap().kurus(), 125_050_000);
    }

    #[test]
    fn parse_strips_currency_marks() {
        assert_eq!("1250,50 TL".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("1250,50tl".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("TL 1250,50".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("₺1.250,50".parse::<Kurus>().unwrap().kurus(), 125_050);
        assert_eq!("  1 250,50  ".parse::<Kurus>().unwrap().kurus(), 125_050);
    }

    #[test]
    fn parse_accepts_signs() {
        assert_eq!("-10,50".parse::<Kurus>().unwrap().kurus(), -1050);
        assert_eq!("+10,50".parse::<Kurus>().unwrap().kurus(), 1050);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Kurus>().is_err());
        assert!("   ".parse::<Kurus>().is_err());
        assert!("abc".parse::<Kurus>().is_err());
        assert!("12.345,6789".parse::<Kurus>().is_err());
        assert!("1,250".parse::<Kurus>().is_err());
    }

    #[test]
    fn lenient_parse_defaults_to_zero() {
        assert_eq!(Kurus::parse_lenient(""), Kurus::ZERO);
        assert_eq!(Kurus::parse_lenient("   "), Kurus::ZERO);
        assert_eq!(Kurus::parse_lenient("abc"), Kurus::ZERO);
        assert_eq!(Kurus::parse_lenient("1.250,50").kurus(), 125_050);
    }

    #[test]
    fn from_major_rounds_at_second_decimal() {
        assert_eq!(Kurus::from_major(1250.5).kurus(), 125_050);
        assert_eq!(Kurus::from_major(0.005).kurus(), 1);
        assert_eq!(Kurus::from_major(f64::NAN), Kurus::ZERO);
    }

    #[test]
    fn format_parse_round_trip_is_lossless() {
        for kurus in [0i64, 1, 99_999, 123_456_789, -123_456_789] {
            let amount = Kurus::new(kurus);
            assert_eq!(amount.to_string().parse::<Kurus>().unwrap(), amount);
        }
    }
}
