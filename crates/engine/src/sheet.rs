//! Sheet-backed persistence.
//!
//! The original tool appends and reads rows against named worksheets
//! (`Siparisler`, `Cariler`). Here each sheet is a CSV file with the same
//! column headers, so existing exports drop in unchanged. Rows are loose
//! text; conversion back into domain records is tolerant — a row that cannot
//! be converted (bad date, unknown status) is skipped on load, while real
//! I/O failures propagate.

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    CellValue, EngineError, LedgerEntry, Order, OrderLine, OrderStatus, PaymentMethod,
    ResultEngine, orders::Customer,
};

const ORDERS_SHEET: &str = "Siparisler.csv";
const LEDGER_SHEET: &str = "Cariler.csv";

const DATE_FORMAT: &str = "%d.%m.%Y";
const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Row append/read operations against the named sheets.
pub trait SheetStore {
    fn load_orders(&self) -> ResultEngine<Vec<Order>>;
    fn append_order(&self, order: &Order) -> ResultEngine<()>;
    fn load_entries(&self) -> ResultEngine<Vec<LedgerEntry>>;
    fn append_entry(&self, entry: &LedgerEntry) -> ResultEngine<()>;
}

/// One `Siparisler` row, columns exactly as the original sheet names them.
#[derive(Debug, Serialize, Deserialize)]
struct OrderRow {
    #[serde(rename = "Siparis No")]
    no: String,
    #[serde(rename = "Tarih")]
    date: String,
    #[serde(rename = "Durum")]
    status: String,
    #[serde(rename = "Müşteri")]
    customer: String,
    #[serde(rename = "Telefon")]
    phone: String,
    #[serde(rename = "TC")]
    tax_id: String,
    #[serde(rename = "E-Mail")]
    email: String,
    #[serde(rename = "Ürün 1")]
    product1: String,
    #[serde(rename = "Adet 1")]
    quantity1: String,
    #[serde(rename = "İsim 1")]
    custom_name1: String,
    #[serde(rename = "Ürün 2")]
    product2: String,
    #[serde(rename = "Adet 2")]
    quantity2: String,
    #[serde(rename = "İsim 2")]
    custom_name2: String,
    #[serde(rename = "Tutar")]
    amount: String,
    #[serde(rename = "Ödeme")]
    payment: String,
    #[serde(rename = "Kaynak")]
    channel: String,
    #[serde(rename = "Adres")]
    address: String,
    #[serde(rename = "Not")]
    note: String,
    #[serde(rename = "Fatura")]
    invoiced: String,
}

fn opt(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        let line1 = order.lines.first();
        let line2 = order.lines.get(1);
        Self {
            no: order.no.to_string(),
            date: order.placed_at.format(DATETIME_FORMAT).to_string(),
            status: order.status.as_str().to_string(),
            customer: order.customer.name.clone(),
            phone: order.customer.phone.clone(),
            tax_id: order.customer.tax_id.clone().unwrap_or_default(),
            email: order.customer.email.clone().unwrap_or_default(),
            product1: line1.map(|l| l.product.clone()).unwrap_or_default(),
            quantity1: line1.map(|l| l.quantity.to_string()).unwrap_or_default(),
            custom_name1: line1.and_then(|l| l.custom_name.clone()).unwrap_or_default(),
            product2: line2.map(|l| l.product.clone()).unwrap_or_default(),
            quantity2: line2.map(|l| l.quantity.to_string()).unwrap_or_default(),
            custom_name2: line2
                .and_then(|l| l.custom_name.clone())
                .unwrap_or_default(),
            amount: order.amount.to_string(),
            payment: order.payment.as_str().to_string(),
            channel: order.channel.clone(),
            address: order.address.clone(),
            note: order.note.clone().unwrap_or_default(),
            invoiced: (if order.invoiced { "KESİLDİ" } else { "KESİLMEDİ" }).to_string(),
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = EngineError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let no = CellValue::from(row.no.as_str())
            .to_order_no()
            .ok_or_else(|| EngineError::InvalidOrder(format!("invalid order no: {}", row.no)))?;
        let placed_at = NaiveDateTime::parse_from_str(row.date.trim(), DATETIME_FORMAT)
            .map_err(|_| EngineError::InvalidOrder(format!("invalid order date: {}", row.date)))?;
        let status = OrderStatus::try_from(row.status.as_str())?;
        let payment = PaymentMethod::try_from(row.payment.as_str())?;

        if row.product1.trim().is_empty() {
            return Err(EngineError::InvalidOrder("missing first product".to_string()));
        }
        let mut lines = vec![OrderLine {
            product: row.product1,
            quantity: row.quantity1.trim().parse().unwrap_or(1),
            custom_name: opt(row.custom_name1),
        }];
        if !row.product2.trim().is_empty() {
            lines.push(OrderLine {
                product: row.product2,
                quantity: row.quantity2.trim().parse().unwrap_or(1),
                custom_name: opt(row.custom_name2),
            });
        }

        Ok(Order {
            no,
            placed_at,
            status,
            customer: Customer {
                name: row.customer,
                phone: row.phone,
                tax_id: opt(row.tax_id),
                email: opt(row.email),
            },
            lines,
            amount: CellValue::from(row.amount.as_str()),
            payment,
            channel: row.channel,
            address: row.address,
            note: opt(row.note),
            invoiced: row.invoiced.trim() == "KESİLDİ",
        })
    }
}

/// One `Cariler` row. Column names match the original sheet.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRow {
    cari_adi: String,
    tarih: String,
    islem_tipi: String,
    aciklama: String,
    tutar: String,
}

impl From<&LedgerEntry> for EntryRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            cari_adi: entry.account.clone(),
            tarih: entry.date.format(DATE_FORMAT).to_string(),
            islem_tipi: entry.kind_tag.clone(),
            aciklama: entry.note.clone(),
            tutar: entry.amount.to_string(),
        }
    }
}

impl TryFrom<EntryRow> for LedgerEntry {
    type Error = EngineError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        if row.cari_adi.trim().is_empty() {
            return Err(EngineError::EmptyAccount);
        }
        let date = NaiveDate::parse_from_str(row.tarih.trim(), DATE_FORMAT)
            .map_err(|_| EngineError::InvalidAmount(format!("invalid entry date: {}", row.tarih)))?;
        Ok(LedgerEntry {
            account: row.cari_adi,
            date,
            kind_tag: row.islem_tipi,
            note: row.aciklama,
            amount: CellValue::from(row.tutar.as_str()),
        })
    }
}

/// CSV files under a data directory, one per sheet.
#[derive(Clone, Debug)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Opens (and creates, if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> ResultEngine<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn orders_path(&self) -> PathBuf {
        self.dir.join(ORDERS_SHEET)
    }

    fn ledger_path(&self) -> PathBuf {
        self.dir.join(LEDGER_SHEET)
    }

    fn load_rows<R>(path: &Path) -> ResultEngine<Vec<R>>
    where
        R: for<'de> Deserialize<'de>,
    {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let mut rows = Vec::new();
        for result in reader.deserialize::<R>() {
            // Malformed rows are skipped, not fatal.
            if let Ok(row) = result {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn append_row<R: Serialize>(path: &Path, row: &R) -> ResultEngine<()> {
        // A zero-byte file still needs its header row.
        let write_headers = std::fs::metadata(path).map_or(true, |meta| meta.len() == 0);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_headers)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }
}

impl SheetStore for CsvStore {
    fn load_orders(&self) -> ResultEngine<Vec<Order>> {
        let rows: Vec<OrderRow> = Self::load_rows(&self.orders_path())?;
        Ok(rows
            .into_iter()
            .filter_map(|row| Order::try_from(row).ok())
            .collect())
    }

    fn append_order(&self, order: &Order) -> ResultEngine<()> {
        // `Order.lines` is a pub field, so the row may arrive without going
        // through `OrderBook::add`.
        if order.lines.is_empty() {
            return Err(EngineError::InvalidOrder(
                "an order carries at least one product line".to_string(),
            ));
        }
        Self::append_row(&self.orders_path(), &OrderRow::from(order))
    }

    fn load_entries(&self) -> ResultEngine<Vec<LedgerEntry>> {
        let rows: Vec<EntryRow> = Self::load_rows(&self.ledger_path())?;
        Ok(rows
            .into_iter()
            .filter_map(|row| LedgerEntry::try_from(row).ok())
            .collect())
    }

    fn append_entry(&self, entry: &LedgerEntry) -> ResultEngine<()> {
        Self::append_row(&self.ledger_path(), &EntryRow::from(entry))
    }
}
