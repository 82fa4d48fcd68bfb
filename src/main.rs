use anyhow::Result;
use std::env;

use stocktally::data;
use stocktally::store::{JsonStore, LedgerStore, StockBook};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: cargo run -- <book_file> [movements_csv]");
        std::process::exit(1);
    }

    let store = JsonStore::new(&args[1]);
    let mut book = if store.exists() {
        store.load()?
    } else {
        // First run creates an empty book file.
        let book = StockBook::default();
        store.save(&book)?;
        book
    };

    if let Some(movements) = args.get(2) {
        data::process_csv(movements, &mut book.ledger)?;
        store.save(&book)?;
    }

    data::export_report(std::io::stdout(), &book.ledger, book.company.as_ref())?;

    Ok(())
}
