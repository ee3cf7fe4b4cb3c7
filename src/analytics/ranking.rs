//! Ranks product categories, product types and stores by total sales.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

use crate::{Error, transaction::Transaction};

/// The number of groups kept when ranking products.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// A field that sales can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// The broad product group, e.g. "Coffee".
    ProductCategory,
    /// The product within a category, e.g. "Barista Espresso".
    ProductType,
    /// The store where the sale happened.
    StoreLocation,
}

impl Dimension {
    /// Every supported dimension.
    pub const ALL: [Dimension; 3] = [
        Dimension::ProductCategory,
        Dimension::ProductType,
        Dimension::StoreLocation,
    ];

    /// The name of the dimension, matching the column name in the transaction log.
    pub fn name(self) -> &'static str {
        match self {
            Dimension::ProductCategory => "product_category",
            Dimension::ProductType => "product_type",
            Dimension::StoreLocation => "store_location",
        }
    }

    /// The maximum number of groups to return, `None` for no limit.
    ///
    /// Product rankings are cut to the top [TOP_PRODUCTS_LIMIT]; there are
    /// only a handful of stores so they are all returned.
    pub fn limit(self) -> Option<usize> {
        match self {
            Dimension::ProductCategory | Dimension::ProductType => Some(TOP_PRODUCTS_LIMIT),
            Dimension::StoreLocation => None,
        }
    }

    fn key(self, transaction: &Transaction) -> &str {
        match self {
            Dimension::ProductCategory => &transaction.product_category,
            Dimension::ProductType => &transaction.product_type,
            Dimension::StoreLocation => &transaction.store_location,
        }
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|dimension| dimension.name() == s)
            .ok_or_else(|| Error::InvalidDimension(s.to_owned()))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Total sales for one group of a [Dimension].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSales {
    /// The group's value, e.g. the category name.
    pub name: String,
    /// Sum of the total price of the group's line items.
    pub total_sales: f64,
}

/// Sums the total price of `transactions` per group of `dimension`.
///
/// # Returns
/// Groups ordered by descending total sales. Groups with equal totals keep
/// ascending name order. Truncated to [Dimension::limit].
pub(super) fn sales_by_dimension<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    dimension: Dimension,
) -> Vec<GroupSales> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(dimension.key(transaction)).or_insert(0.0) += transaction.total_price();
    }

    let mut groups: Vec<GroupSales> = totals
        .into_iter()
        .map(|(name, total_sales)| GroupSales {
            name: name.to_owned(),
            total_sales,
        })
        .collect();

    // `sort_by` is stable, so ties stay in name order.
    groups.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));

    if let Some(limit) = dimension.limit() {
        groups.truncate(limit);
    }

    groups
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, analytics::test_utils::product_sale, transaction::Transaction};

    use super::{Dimension, GroupSales, TOP_PRODUCTS_LIMIT, sales_by_dimension};

    #[test]
    fn parses_supported_dimension_names() {
        assert_eq!(
            "product_category".parse::<Dimension>(),
            Ok(Dimension::ProductCategory)
        );
        assert_eq!("product_type".parse::<Dimension>(), Ok(Dimension::ProductType));
        assert_eq!(
            "store_location".parse::<Dimension>(),
            Ok(Dimension::StoreLocation)
        );
    }

    #[test]
    fn rejects_unknown_dimension_names() {
        assert_eq!(
            "product_detail".parse::<Dimension>(),
            Err(Error::InvalidDimension("product_detail".to_owned()))
        );
        assert_eq!(
            "".parse::<Dimension>(),
            Err(Error::InvalidDimension(String::new()))
        );
    }

    #[test]
    fn ranks_groups_by_descending_sales() {
        let transactions = vec![
            product_sale("1", date!(2023 - 01 - 01), "Tea", "Chai", "Astoria", 5.0),
            product_sale("2", date!(2023 - 01 - 01), "Coffee", "Latte", "Astoria", 3.0),
            product_sale("3", date!(2023 - 01 - 01), "Coffee", "Espresso", "Astoria", 4.0),
            product_sale("4", date!(2023 - 01 - 01), "Bakery", "Scone", "Astoria", 1.0),
        ];

        let result = sales_by_dimension(&transactions, Dimension::ProductCategory);

        assert_eq!(
            result,
            vec![
                GroupSales {
                    name: "Coffee".to_owned(),
                    total_sales: 7.0
                },
                GroupSales {
                    name: "Tea".to_owned(),
                    total_sales: 5.0
                },
                GroupSales {
                    name: "Bakery".to_owned(),
                    total_sales: 1.0
                },
            ]
        );
    }

    #[test]
    fn ties_keep_name_order() {
        let transactions = vec![
            product_sale("1", date!(2023 - 01 - 01), "Tea", "Chai", "Astoria", 2.0),
            product_sale("2", date!(2023 - 01 - 01), "Coffee", "Latte", "Astoria", 2.0),
            product_sale("3", date!(2023 - 01 - 01), "Bakery", "Scone", "Astoria", 2.0),
        ];

        let result = sales_by_dimension(&transactions, Dimension::ProductCategory);

        let names: Vec<_> = result.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, vec!["Bakery", "Coffee", "Tea"]);
    }

    #[test]
    fn keeps_top_ten_products() {
        let transactions: Vec<Transaction> = (1..=12)
            .map(|i| {
                product_sale(
                    &i.to_string(),
                    date!(2023 - 01 - 01),
                    "Coffee",
                    &format!("Product {i:02}"),
                    "Astoria",
                    f64::from(i),
                )
            })
            .collect();

        let result = sales_by_dimension(&transactions, Dimension::ProductType);

        assert_eq!(result.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(result[0].name, "Product 12");
        assert_eq!(result[9].name, "Product 03");
        assert!(
            result
                .windows(2)
                .all(|pair| pair[0].total_sales >= pair[1].total_sales),
            "got unsorted result {result:?}"
        );
    }

    #[test]
    fn keeps_top_ten_categories() {
        let transactions: Vec<Transaction> = (1..=11)
            .map(|i| {
                product_sale(
                    &i.to_string(),
                    date!(2023 - 01 - 01),
                    &format!("Category {i:02}"),
                    "Barista Espresso",
                    "Astoria",
                    f64::from(i) * 2.0,
                )
            })
            .collect();

        let result = sales_by_dimension(&transactions, Dimension::ProductCategory);

        assert_eq!(result.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(result[0].name, "Category 11");
        assert_eq!(result[9].name, "Category 02");
        assert!(result.iter().all(|group| group.name != "Category 01"));
    }

    #[test]
    fn returns_every_store() {
        let transactions: Vec<Transaction> = (1..=12)
            .map(|i| {
                product_sale(
                    &i.to_string(),
                    date!(2023 - 01 - 01),
                    "Coffee",
                    "Latte",
                    &format!("Store {i:02}"),
                    f64::from(i),
                )
            })
            .collect();

        let result = sales_by_dimension(&transactions, Dimension::StoreLocation);

        assert_eq!(result.len(), 12);
        assert_eq!(result[0].name, "Store 12");
        assert_eq!(result[11].name, "Store 01");
    }

    #[test]
    fn empty_input_gives_no_groups() {
        let result = sales_by_dimension(&Vec::<Transaction>::new(), Dimension::StoreLocation);

        assert!(result.is_empty());
    }
}
