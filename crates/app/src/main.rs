use clap::Parser;
use engine::{
    CellValue, CsvStore, Customer, Ledger, LedgerEntry, Order, OrderBook, OrderLine, OrderStatus,
    ProductCatalog, SheetStore,
};

use cli::{CariCommand, Cli, Command, OrderCommand};

mod cli;
mod settings;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "minivagon={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let store = CsvStore::open(&settings.app.data_dir)?;
    let catalog = ProductCatalog::new(settings.catalog);

    match cli.command {
        Command::Order(order) => match order.command {
            OrderCommand::Add(args) => order_add(&store, &catalog, args)?,
            OrderCommand::List(args) => order_list(&store, args)?,
            OrderCommand::Show(args) => order_show(&store, &catalog, args)?,
        },
        Command::Cari(cari) => match cari.command {
            CariCommand::Add(args) => cari_add(&store, args)?,
            CariCommand::Balance(args) => cari_balance(&store, args)?,
            CariCommand::Accounts => cari_accounts(&store)?,
        },
        Command::Products => {
            for name in catalog.names() {
                match catalog.image_for(name) {
                    Some(image) => println!("{name}  ({image})"),
                    None => println!("{name}"),
                }
            }
        }
    }

    Ok(())
}

fn order_add(
    store: &CsvStore,
    catalog: &ProductCatalog,
    args: cli::OrderAddArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut lines = vec![OrderLine {
        product: args.product,
        quantity: args.quantity,
        custom_name: args.custom_name,
    }];
    if let Some(product2) = args.product2 {
        lines.push(OrderLine {
            product: product2,
            quantity: args.quantity2,
            custom_name: args.custom_name2,
        });
    }
    for line in &lines {
        if !catalog.contains(&line.product) {
            tracing::warn!("no catalog image for product: {}", line.product);
        }
    }

    let draft = Order {
        no: 0,
        placed_at: chrono::Local::now().naive_local(),
        status: OrderStatus::New,
        customer: Customer {
            name: args.customer,
            phone: args.phone,
            tax_id: args.tc,
            email: args.email,
        },
        lines,
        amount: CellValue::from(args.amount.as_str()),
        payment: args.payment.into(),
        channel: args.channel,
        address: args.address,
        note: args.note,
        invoiced: args.invoiced,
    };

    let mut book = OrderBook::new(store.load_orders()?);
    let no = book.add(draft)?;
    let order = book.get(no).ok_or("order vanished after insert")?;
    store.append_order(order)?;

    tracing::info!(no, "order recorded");
    println!("created order #{no}");
    Ok(())
}

fn order_list(
    store: &CsvStore,
    args: cli::OrderListArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let book = OrderBook::new(store.load_orders()?);
    let hits = book.search(args.term.as_deref().unwrap_or(""));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    for order in hits {
        println!(
            "#{no}  {date}  {status:<14}  {customer:<20}  {amount} TL",
            no = order.no,
            date = order.placed_at.format("%d.%m.%Y %H:%M"),
            status = order.status.as_str(),
            customer = order.customer.name,
            amount = order.amount_kurus(),
        );
    }
    Ok(())
}

fn order_show(
    store: &CsvStore,
    catalog: &ProductCatalog,
    args: cli::OrderShowArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let book = OrderBook::new(store.load_orders()?);
    let Some(order) = book.get(args.no) else {
        eprintln!("order not found: #{}", args.no);
        std::process::exit(1);
    };

    println!("order #{} — {}", order.no, order.placed_at.format("%d.%m.%Y %H:%M"));
    println!("status:   {}", order.status.as_str());
    for (i, line) in order.lines.iter().enumerate() {
        let image = catalog.image_for(&line.product).unwrap_or("-");
        print!("line {}:   {} x{} [{}]", i + 1, line.product, line.quantity, image);
        match &line.custom_name {
            Some(name) => println!("  name: {name}"),
            None => println!(),
        }
    }
    println!("amount:   {} TL", order.amount_kurus());
    println!("payment:  {}", order.payment.as_str());
    if order.payment.is_on_delivery() {
        println!("COLLECT ON DELIVERY: {} TL", order.amount_kurus());
    }
    println!("channel:  {}", order.channel);
    println!("customer: {} ({})", order.customer.name, order.customer.phone);
    println!("address:  {}", order.address);
    if let Some(note) = &order.note {
        println!("note:     {note}");
    }
    println!("invoice:  {}", if order.invoiced { "KESİLDİ" } else { "KESİLMEDİ" });
    Ok(())
}

fn cari_add(
    store: &CsvStore,
    args: cli::CariAddArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let entry = LedgerEntry::new(
        args.account,
        chrono::Local::now().date_naive(),
        args.kind.into(),
        args.note,
        CellValue::from(args.amount.as_str()),
    );

    // Run the append through the ledger so its invariants apply before the
    // row hits the sheet.
    let mut ledger = Ledger::new(store.load_entries()?);
    let entry = ledger.append(entry)?.clone();
    store.append_entry(&entry)?;

    tracing::info!(account = %entry.account, "ledger entry recorded");
    println!("recorded {} for {}", entry.kind_tag, entry.account);
    Ok(())
}

fn cari_balance(
    store: &CsvStore,
    args: cli::CariBalanceArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ledger = Ledger::new(store.load_entries()?);
    let statement = ledger.statement(&args.account);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&statement)?);
        return Ok(());
    }

    println!("account:      {}", args.account);
    println!("total debit:  {} TL", statement.total_debit);
    println!("total credit: {} TL", statement.total_credit);
    println!("balance:      {} TL", statement.balance);
    Ok(())
}

fn cari_accounts(store: &CsvStore) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ledger = Ledger::new(store.load_entries()?);
    for account in ledger.accounts() {
        let statement = ledger.statement(account);
        println!("{account:<30}  {} TL", statement.balance);
    }
    Ok(())
}
