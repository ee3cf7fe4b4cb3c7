//! Functions to parse the point-of-sale transaction log from CSV.
//!
//! The log has a header row and one line item per row. Dates are written as
//! `DD/MM/YYYY` and times as `HH:MM:SS`; leading zeros on the day, month and
//! hour are optional. Columns other than [REQUIRED_COLUMNS] are ignored.

use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use time::{
    Date, Time,
    format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{Error, transaction::Transaction};

/// The columns that must be present in the header of the transaction log.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "transaction_id",
    "transaction_date",
    "transaction_time",
    "transaction_qty",
    "unit_price",
    "store_location",
    "product_category",
    "product_type",
];

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none]/[month padding:none]/[year]");
const TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[hour padding:none]:[minute]:[second]");

/// A row of the transaction log before the timestamp has been parsed.
#[derive(Debug, Deserialize)]
struct CsvTransaction {
    transaction_id: String,
    transaction_date: String,
    transaction_time: String,
    transaction_qty: u32,
    unit_price: f64,
    store_location: String,
    product_category: String,
    product_type: String,
}

/// Loads the transaction log at `path`.
///
/// # Errors
/// Returns [Error::DataLoad] if the file cannot be opened, plus any error
/// returned by [parse_transactions].
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>, Error> {
    let file = File::open(path)?;

    let transactions = parse_transactions(file)?;
    tracing::info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );

    Ok(transactions)
}

/// Parses every row of a transaction log and computes its derived fields.
///
/// Loading is all or nothing: the first bad row aborts the whole load.
///
/// # Errors
/// Returns [Error::DataLoad] if:
/// - the source cannot be read,
/// - the header is missing one of the [REQUIRED_COLUMNS],
/// - a row has a missing or malformed quantity or unit price, or a negative
///   or non-finite unit price.
///
/// Returns [Error::Parse] if a row's date and time do not form a valid timestamp.
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?;
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(Error::DataLoad(format!(
            "the header is missing the required column \"{missing}\""
        )));
    }

    let mut transactions = Vec::new();

    for (index, result) in reader.deserialize::<CsvTransaction>().enumerate() {
        let row = index as u64 + 1;
        let record = result.map_err(|error| Error::DataLoad(format!("row {row}: {error}")))?;
        transactions.push(into_transaction(record, row)?);
    }

    Ok(transactions)
}

fn into_transaction(record: CsvTransaction, row: u64) -> Result<Transaction, Error> {
    if !record.unit_price.is_finite() || record.unit_price < 0.0 {
        return Err(Error::DataLoad(format!(
            "row {row}: the unit price {} must be a non-negative number",
            record.unit_price
        )));
    }

    let parse_error = || Error::Parse {
        row,
        value: format!("{} {}", record.transaction_date, record.transaction_time),
    };
    let date = Date::parse(&record.transaction_date, DATE_FORMAT).map_err(|_| parse_error())?;
    let time = Time::parse(&record.transaction_time, TIME_FORMAT).map_err(|_| parse_error())?;

    Ok(Transaction::build(record.transaction_id, date, time)
        .store_location(record.store_location)
        .product_category(record.product_category)
        .product_type(record.product_type)
        .quantity(record.transaction_qty)
        .unit_price(record.unit_price)
        .finish())
}
