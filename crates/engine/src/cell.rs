//! Loosely-typed store fields.
//!
//! The sheet store hands back whatever the user typed: an amount column may
//! hold a number on one row and `"1.250,50 TL"` on the next, and an order
//! number column may hold stray text. [`CellValue`] keeps that looseness at
//! the boundary so the rest of the engine can normalize deliberately.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Kurus;

/// One raw field as read from the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// Normalizes the cell to a monetary amount.
    ///
    /// Numbers pass through (rounded at the 2nd decimal), text goes through
    /// the lenient parser, anything else is zero. Never fails.
    #[must_use]
    pub fn to_kurus(&self) -> Kurus {
        match self {
            CellValue::Number(value) => Kurus::from_major(*value),
            CellValue::Text(text) => Kurus::parse_lenient(text),
            CellValue::Empty => Kurus::ZERO,
        }
    }

    /// Reads the cell as an order number, if it holds one.
    ///
    /// Non-numeric and negative values yield `None`; callers ignore them
    /// rather than erroring (historic sheets contain stray text rows).
    #[must_use]
    pub fn to_order_no(&self) -> Option<u32> {
        match self {
            CellValue::Number(value) => {
                if value.is_finite()
                    && *value >= 0.0
                    && *value <= f64::from(u32::MAX)
                    && value.fract() == 0.0
                {
                    Some(*value as u32)
                } else {
                    None
                }
            }
            CellValue::Text(text) => text.trim().parse::<u32>().ok(),
            CellValue::Empty => None,
        }
    }

    /// Returns `true` for an empty cell or blank text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{value}")
                }
            }
            CellValue::Text(text) => f.write_str(text),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pass_through_without_string_coercion() {
        assert_eq!(CellValue::Number(1250.5).to_kurus().kurus(), 125_050);
        assert_eq!(CellValue::Number(0.0).to_kurus(), Kurus::ZERO);
    }

    #[test]
    fn text_goes_through_the_lenient_parser() {
        assert_eq!(CellValue::from("1.250,50").to_kurus().kurus(), 125_050);
        assert_eq!(CellValue::from("abc").to_kurus(), Kurus::ZERO);
        assert_eq!(CellValue::Empty.to_kurus(), Kurus::ZERO);
    }

    #[test]
    fn order_no_ignores_junk() {
        assert_eq!(CellValue::from("1005").to_order_no(), Some(1005));
        assert_eq!(CellValue::Number(1005.0).to_order_no(), Some(1005));
        assert_eq!(CellValue::Number(1005.5).to_order_no(), None);
        assert_eq!(CellValue::from("bad").to_order_no(), None);
        assert_eq!(CellValue::Empty.to_order_no(), None);
    }

    #[test]
    fn order_no_rejects_out_of_range_numbers() {
        assert_eq!(CellValue::Number(-1.0).to_order_no(), None);
        assert_eq!(CellValue::Number(4_294_967_296.0).to_order_no(), None);
        assert_eq!(CellValue::Number(1e18).to_order_no(), None);
        assert_eq!(
            CellValue::Number(4_294_967_295.0).to_order_no(),
            Some(u32::MAX)
        );
    }

    #[test]
    fn display_round_trips_integers() {
        assert_eq!(CellValue::Number(1005.0).to_string(), "1005");
        assert_eq!(CellValue::from("1.250,50").to_string(), "1.250,50");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
