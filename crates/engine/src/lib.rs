//! MiniVagon engine: monetary normalization, the cari ledger, order records
//! and the sheet-backed store they live in.
//!
//! Amount text enters through [`Kurus`] parsing, is stored loose as
//! [`CellValue`], summed by [`Ledger`], and rendered back through the
//! [`Kurus`] formatter for display.

pub use catalog::ProductCatalog;
pub use cell::CellValue;
pub use error::EngineError;
pub use ledger::{AccountStatement, EntryKind, Ledger, LedgerEntry};
pub use money::Kurus;
pub use orders::{
    Customer, Order, OrderBook, OrderLine, OrderStatus, PaymentMethod, next_order_no,
};
pub use sheet::{CsvStore, SheetStore};

mod catalog;
mod cell;
mod error;
mod ledger;
mod money;
mod orders;
mod sheet;

pub type ResultEngine<T> = Result<T, EngineError>;
