use time::{Date, Time};

use crate::transaction::Transaction;

/// A coffee sale with a single unit priced at `price`.
pub(crate) fn sale(transaction_id: &str, date: Date, time: Time, price: f64) -> Transaction {
    Transaction::build(transaction_id, date, time)
        .store_location("Astoria")
        .product_category("Coffee")
        .product_type("Barista Espresso")
        .unit_price(price)
        .finish()
}

/// A sale of `product_type` in `product_category` at `store_location`.
pub(crate) fn product_sale(
    transaction_id: &str,
    date: Date,
    product_category: &str,
    product_type: &str,
    store_location: &str,
    price: f64,
) -> Transaction {
    Transaction::build(transaction_id, date, Time::MIDNIGHT)
        .store_location(store_location)
        .product_category(product_category)
        .product_type(product_type)
        .unit_price(price)
        .finish()
}
