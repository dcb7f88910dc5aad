//! The module contains the error the engine can throw.
//!
//! Amount parsing has a strict and a lenient surface: the strict one returns
//! [`InvalidAmount`], the lenient one substitutes zero and never fails. All
//! other failures propagate.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    #[error("account name must not be empty")]
    EmptyAccount,
    #[error(transparent)]
    Storage(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidOrder(a), Self::InvalidOrder(b)) => a == b,
            (Self::EmptyAccount, Self::EmptyAccount) => true,
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}
