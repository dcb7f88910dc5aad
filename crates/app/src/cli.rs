//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{EntryKind, PaymentMethod};

#[derive(Parser, Debug)]
#[command(name = "minivagon")]
#[command(about = "Order entry and cari tracking over sheet CSV files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record and inspect orders.
    Order(Order),
    /// Record cari movements and report balances.
    Cari(Cari),
    /// List the product catalog.
    Products,
}

#[derive(Args, Debug)]
pub struct Order {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    Add(OrderAddArgs),
    List(OrderListArgs),
    Show(OrderShowArgs),
}

#[derive(Args, Debug)]
pub struct OrderAddArgs {
    #[arg(long)]
    pub customer: String,
    #[arg(long)]
    pub phone: String,
    /// TC identity number, optional.
    #[arg(long)]
    pub tc: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub product: String,
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
    /// Custom engraving name for the first product.
    #[arg(long)]
    pub custom_name: Option<String>,
    #[arg(long)]
    pub product2: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub quantity2: u32,
    #[arg(long)]
    pub custom_name2: Option<String>,
    /// Amount as typed ("1.250,50", "1250,50 TL", ...).
    #[arg(long)]
    pub amount: String,
    #[arg(long, value_enum, default_value = "havale")]
    pub payment: Payment,
    #[arg(long, default_value = "Instagram")]
    pub channel: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub note: Option<String>,
    /// Mark the invoice as already issued.
    #[arg(long)]
    pub invoiced: bool,
}

#[derive(Args, Debug)]
pub struct OrderListArgs {
    /// Free search over order number and customer name.
    pub term: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OrderShowArgs {
    pub no: u32,
}

#[derive(Args, Debug)]
pub struct Cari {
    #[command(subcommand)]
    pub command: CariCommand,
}

#[derive(Subcommand, Debug)]
pub enum CariCommand {
    Add(CariAddArgs),
    Balance(CariBalanceArgs),
    /// List every account with its balance.
    Accounts,
}

#[derive(Args, Debug)]
pub struct CariAddArgs {
    /// Account (firm/person) name.
    #[arg(long)]
    pub account: String,
    #[arg(long, value_enum)]
    pub kind: Kind,
    /// Description / invoice number.
    #[arg(long, default_value = "")]
    pub note: String,
    #[arg(long)]
    pub amount: String,
}

#[derive(Args, Debug)]
pub struct CariBalanceArgs {
    pub account: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Payment {
    /// KAPIDA NAKİT
    KapidaNakit,
    /// KAPIDA K.KARTI
    KapidaKart,
    /// HAVALE/EFT
    Havale,
    /// WEB SİTESİ
    Web,
}

impl From<Payment> for PaymentMethod {
    fn from(value: Payment) -> Self {
        match value {
            Payment::KapidaNakit => PaymentMethod::CashOnDelivery,
            Payment::KapidaKart => PaymentMethod::CardOnDelivery,
            Payment::Havale => PaymentMethod::BankTransfer,
            Payment::Web => PaymentMethod::Website,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Kind {
    /// FATURA (Borç)
    Fatura,
    /// ÖDEME (Alacak)
    Odeme,
}

impl From<Kind> for EntryKind {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Fatura => EntryKind::Debit,
            Kind::Odeme => EntryKind::Credit,
        }
    }
}
