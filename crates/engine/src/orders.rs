//! Order records and the order-number sequence.
//!
//! Orders mirror the rows of the `Siparisler` sheet: one row per order, up to
//! two product lines, the amount kept as the raw text the user typed, and the
//! status/payment columns stored as their Turkish display strings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{CellValue, EngineError, Kurus, ResultEngine};

/// First order number ever allocated.
const SEQUENCE_FLOOR: u32 = 999;

/// Computes the next order number from the existing records.
///
/// Cells that do not hold a valid number are ignored. With no valid numbers
/// the sequence starts at 1000; otherwise the result is
/// `max(existing, 999) + 1`, so the sequence never dips below its floor even
/// if the sheet contains stray low numbers.
///
/// Single-writer only: the store exposes no compare-and-swap, so two writers
/// allocating concurrently can draw the same number. Accepted limitation.
pub fn next_order_no<'a, I>(existing: I) -> u32
where
    I: IntoIterator<Item = &'a CellValue>,
{
    existing
        .into_iter()
        .filter_map(CellValue::to_order_no)
        .max()
        .map_or(SEQUENCE_FLOOR + 1, |max| {
            max.max(SEQUENCE_FLOOR).saturating_add(1)
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Preparing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Display string as stored in the sheet.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "YENİ SİPARİŞ",
            Self::Preparing => "HAZIRLANIYOR",
            Self::Shipped => "KARGOLANDI",
            Self::Delivered => "TESLİM EDİLDİ",
        }
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "YENİ SİPARİŞ" => Ok(Self::New),
            "HAZIRLANIYOR" => Ok(Self::Preparing),
            "KARGOLANDI" => Ok(Self::Shipped),
            "TESLİM EDİLDİ" => Ok(Self::Delivered),
            other => Err(EngineError::InvalidOrder(format!(
                "invalid order status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    CardOnDelivery,
    BankTransfer,
    Website,
}

impl PaymentMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "KAPIDA NAKİT",
            Self::CardOnDelivery => "KAPIDA K.KARTI",
            Self::BankTransfer => "HAVALE/EFT",
            Self::Website => "WEB SİTESİ",
        }
    }

    /// Pay-on-delivery orders get the collect-amount banner on receipts.
    #[must_use]
    pub fn is_on_delivery(self) -> bool {
        matches!(self, Self::CashOnDelivery | Self::CardOnDelivery)
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "KAPIDA NAKİT" => Ok(Self::CashOnDelivery),
            "KAPIDA K.KARTI" => Ok(Self::CardOnDelivery),
            "HAVALE/EFT" => Ok(Self::BankTransfer),
            "WEB SİTESİ" => Ok(Self::Website),
            other => Err(EngineError::InvalidOrder(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// One product line on an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: String,
    pub quantity: u32,
    /// Custom engraving name, when the customer asked for one.
    pub custom_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
}

/// One recorded order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub no: u32,
    pub placed_at: NaiveDateTime,
    pub status: OrderStatus,
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
    /// Raw amount text as entered; normalize via [`Order::amount_kurus`].
    pub amount: CellValue,
    pub payment: PaymentMethod,
    pub channel: String,
    pub address: String,
    pub note: Option<String>,
    pub invoiced: bool,
}

impl Order {
    /// Normalized order amount; malformed text degrades to zero.
    #[must_use]
    pub fn amount_kurus(&self) -> Kurus {
        self.amount.to_kurus()
    }
}

/// Owns the recorded orders and allocates order numbers.
#[derive(Clone, Debug, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Next order number derived from the recorded orders.
    #[must_use]
    pub fn next_no(&self) -> u32 {
        let cells: Vec<CellValue> = self
            .orders
            .iter()
            .map(|order| CellValue::Number(f64::from(order.no)))
            .collect();
        next_order_no(&cells)
    }

    /// Records an order, allocating its number. Returns the allocated number.
    ///
    /// The draft's `no` field is overwritten; an order needs 1 or 2 product
    /// lines with non-zero quantities.
    pub fn add(&mut self, mut order: Order) -> ResultEngine<u32> {
        if order.lines.is_empty() || order.lines.len() > 2 {
            return Err(EngineError::InvalidOrder(
                "an order carries 1 or 2 product lines".to_string(),
            ));
        }
        if order.lines.iter().any(|line| line.quantity == 0) {
            return Err(EngineError::InvalidOrder(
                "line quantity must be > 0".to_string(),
            ));
        }

        let no = self.next_no();
        order.no = no;
        self.orders.push(order);
        Ok(no)
    }

    #[must_use]
    pub fn get(&self, no: u32) -> Option<&Order> {
        self.orders.iter().find(|order| order.no == no)
    }

    /// Free search over order number and customer name, case-insensitive.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Order> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.orders.iter().collect();
        }
        self.orders
            .iter()
            .filter(|order| {
                order.no.to_string().contains(&needle)
                    || order.customer.name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
