use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::NaiveDate;
use engine::{
    CellValue, CsvStore, Customer, EntryKind, Kurus, Ledger, LedgerEntry, Order, OrderBook,
    OrderLine, OrderStatus, PaymentMethod, SheetStore,
};

fn temp_store(label: &str) -> (CsvStore, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/test_sheets")
        .join(format!("{label}_{}_{nanos}", std::process::id()));
    let store = CsvStore::open(&dir).unwrap();
    (store, dir)
}

fn order(no: u32, customer: &str, amount: &str) -> Order {
    Order {
        no,
        placed_at: NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        status: OrderStatus::New,
        customer: Customer {
            name: customer.to_string(),
            phone: "5550001".to_string(),
            tax_id: None,
            email: None,
        },
        lines: vec![OrderLine {
            product: "TEKLİ STAND".to_string(),
            quantity: 1,
            custom_name: None,
        }],
        amount: CellValue::from(amount),
        payment: PaymentMethod::CashOnDelivery,
        channel: "Instagram".to_string(),
        address: "adres".to_string(),
        note: None,
        invoiced: false,
    }
}

fn entry(account: &str, kind: EntryKind, amount: &str) -> LedgerEntry {
    LedgerEntry::new(
        account.to_string(),
        NaiveDate::from_ymd_opt(2024, 3, 21).unwrap(),
        kind,
        "test".to_string(),
        CellValue::from(amount),
    )
}

#[test]
fn orders_survive_append_and_reload() {
    let (store, dir) = temp_store("orders");

    let mut book = OrderBook::new(store.load_orders().unwrap());
    assert_eq!(book.next_no(), 1000);

    let first = book.add(order(0, "Ali Veli", "1.250,50")).unwrap();
    store.append_order(book.get(first).unwrap()).unwrap();
    let second = book.add(order(0, "Ayşe", "250,00")).unwrap();
    store.append_order(book.get(second).unwrap()).unwrap();
    assert_eq!((first, second), (1000, 1001));

    // A fresh process loads the same book and continues the sequence.
    let reloaded = OrderBook::new(store.load_orders().unwrap());
    assert_eq!(reloaded.orders().len(), 2);
    assert_eq!(reloaded.next_no(), 1002);
    let ali = reloaded.get(1000).unwrap();
    assert_eq!(ali.customer.name, "Ali Veli");
    assert_eq!(ali.amount_kurus().kurus(), 125_050);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn malformed_sheet_rows_are_skipped_on_load() {
    let (store, dir) = temp_store("junk");

    store.append_order(&order(1000, "Ali", "100,00")).unwrap();
    // A hand-edited junk line, as real sheets accumulate.
    let path = dir.join("Siparisler.csv");
    let mut raw = fs::read_to_string(&path).unwrap();
    raw.push_str("eski,kayıt,?,,,,,,,,,,,,,,,,\n");
    fs::write(&path, raw).unwrap();

    let orders = store.load_orders().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(OrderBook::new(orders).next_no(), 1001);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn zero_line_orders_are_rejected_before_hitting_the_sheet() {
    let (store, dir) = temp_store("nolines");

    let mut bad = order(1000, "Ali", "100,00");
    bad.lines.clear();
    assert!(store.append_order(&bad).is_err());
    assert!(store.load_orders().unwrap().is_empty());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn appending_to_an_empty_file_still_writes_headers() {
    let (store, dir) = temp_store("emptyfile");

    fs::write(dir.join("Siparisler.csv"), "").unwrap();
    store.append_order(&order(1000, "Ali", "100,00")).unwrap();

    let orders = store.load_orders().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].no, 1000);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn ledger_totals_flow_through_the_store() {
    let (store, dir) = temp_store("ledger");

    store
        .append_entry(&entry("Tedarikçi A", EntryKind::Debit, "100,00"))
        .unwrap();
    store
        .append_entry(&entry("Tedarikçi A", EntryKind::Credit, "150,00"))
        .unwrap();
    store
        .append_entry(&entry("Müşteri B", EntryKind::Debit, "50,00"))
        .unwrap();

    let ledger = Ledger::new(store.load_entries().unwrap());
    assert_eq!(ledger.accounts(), vec!["Tedarikçi A", "Müşteri B"]);

    let a = ledger.statement("Tedarikçi A");
    assert_eq!(a.total_debit.kurus(), 10_000);
    assert_eq!(a.total_credit.kurus(), 15_000);
    assert_eq!(a.balance.kurus(), 5_000);
    assert_eq!(a.balance.to_string(), "50,00");

    let b = ledger.statement("Müşteri B");
    assert_eq!(b.balance.kurus(), -5_000);
    assert_eq!(b.total_credit, Kurus::ZERO);

    fs::remove_dir_all(dir).unwrap();
}
