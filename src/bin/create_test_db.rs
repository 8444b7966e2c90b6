use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use expense_tracker::{ExpenseData, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    for (title, amount, category, date) in [
        ("Coffee", 4.5, "Food", date!(2024 - 01 - 01)),
        ("Groceries", 1250.75, "Food", date!(2024 - 01 - 03)),
        ("Rent", 15000.0, "Housing", date!(2024 - 01 - 05)),
        ("Bus pass", 800.0, "Transport", date!(2024 - 01 - 07)),
        ("Electricity", 2100.4, "Utilities", date!(2024 - 01 - 10)),
    ] {
        create_expense(
            ExpenseData {
                title: title.to_owned(),
                amount,
                category: category.to_owned(),
                date,
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
