//! The point-of-sale transaction record and the fields derived from it at load time.

use time::{Date, Month, PrimitiveDateTime, Time, Weekday};

/// The days of the week in the order they are displayed, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// One line item sold at the store, plus its [DerivedFields].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the order this line item belongs to.
    ///
    /// Several line items may share an ID, which is why order counts are
    /// distinct counts of this field.
    pub transaction_id: String,
    /// The name of the store where the sale happened.
    pub store_location: String,
    /// The broad product group, e.g. "Coffee".
    pub product_category: String,
    /// The product within the category, e.g. "Barista Espresso".
    pub product_type: String,
    /// The calendar date of the sale.
    pub date: Date,
    /// The time of day of the sale.
    pub time: Time,
    /// The number of units sold.
    pub quantity: u32,
    /// The price of a single unit.
    pub unit_price: f64,
    /// Fields computed from the raw fields above.
    pub derived: DerivedFields,
}

/// Values computed from the raw fields of a [Transaction].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFields {
    /// The date and time combined.
    pub timestamp: PrimitiveDateTime,
    /// The month of the sale.
    pub month: Month,
    /// The day of the week of the sale.
    pub weekday: Weekday,
    /// The hour of the day of the sale, 0-23.
    pub hour: u8,
    /// `quantity` × `unit_price`.
    pub total_price: f64,
}

impl DerivedFields {
    /// Compute the derived fields from the raw fields of a transaction.
    pub fn compute(date: Date, time: Time, quantity: u32, unit_price: f64) -> Self {
        let timestamp = PrimitiveDateTime::new(date, time);

        Self {
            timestamp,
            month: timestamp.month(),
            weekday: timestamp.weekday(),
            hour: timestamp.hour(),
            total_price: f64::from(quantity) * unit_price,
        }
    }
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    ///
    /// Quantity defaults to 1, unit price to 0 and the text fields to empty
    /// strings.
    pub fn build(transaction_id: impl Into<String>, date: Date, time: Time) -> TransactionBuilder {
        TransactionBuilder {
            transaction_id: transaction_id.into(),
            store_location: String::new(),
            product_category: String::new(),
            product_type: String::new(),
            date,
            time,
            quantity: 1,
            unit_price: 0.0,
        }
    }

    /// The month number of the sale, 1-12.
    pub fn month_number(&self) -> u8 {
        u8::from(self.derived.month)
    }

    /// The revenue of this line item.
    pub fn total_price(&self) -> f64 {
        self.derived.total_price
    }
}

/// Builder for creating a new [Transaction].
///
/// The derived fields are computed when [TransactionBuilder::finish] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    transaction_id: String,
    store_location: String,
    product_category: String,
    product_type: String,
    date: Date,
    time: Time,
    quantity: u32,
    unit_price: f64,
}

impl TransactionBuilder {
    /// Set the store location.
    pub fn store_location(mut self, store_location: impl Into<String>) -> Self {
        self.store_location = store_location.into();
        self
    }

    /// Set the product category.
    pub fn product_category(mut self, product_category: impl Into<String>) -> Self {
        self.product_category = product_category.into();
        self
    }

    /// Set the product type.
    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// Set the number of units sold.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the price of a single unit.
    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Compute the derived fields and create the transaction.
    pub fn finish(self) -> Transaction {
        let derived =
            DerivedFields::compute(self.date, self.time, self.quantity, self.unit_price);

        Transaction {
            transaction_id: self.transaction_id,
            store_location: self.store_location,
            product_category: self.product_category,
            product_type: self.product_type,
            date: self.date,
            time: self.time,
            quantity: self.quantity,
            unit_price: self.unit_price,
            derived,
        }
    }
}
