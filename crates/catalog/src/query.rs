use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::stock::{StockStatus, classify};

/// Stock-health filter dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockFilter {
    #[default]
    All,
    Out,
    Low,
    Average,
}

/// Filter set applied after the search stage. `None` means "all" for the
/// category and supplier dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub stock: StockFilter,
    pub category: Option<String>,
    pub supplier: Option<String>,
}

/// User-entered query state. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    pub search: String,
    pub filters: Filters,
}

/// Apply search and filters to the catalog.
///
/// Deterministic and order-preserving: the result is a subsequence of
/// `catalog`. Stages are independent conjunctions, so their order affects
/// cost only, never membership.
pub fn apply(catalog: &[Product], criteria: &QueryCriteria) -> Vec<Product> {
    catalog
        .iter()
        .filter(|p| matches_search(p, &criteria.search))
        .filter(|p| matches_stock(p, criteria.filters.stock))
        .filter(|p| matches_dimension(p.category.as_deref(), criteria.filters.category.as_deref()))
        .filter(|p| {
            matches_dimension(p.supplier_name.as_deref(), criteria.filters.supplier.as_deref())
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match across name, description, supplier and
/// the textual form of the product index. Missing fields never match.
fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let contains = |field: Option<&str>| {
        field.is_some_and(|text| text.to_lowercase().contains(&term))
    };

    contains(Some(product.name.as_str()))
        || contains(product.description.as_deref())
        || contains(product.supplier_name.as_deref())
        || contains(product.product_index.as_ref().map(|i| i.as_str()))
}

/// Stock filtering goes through the classifier, so `Average` excludes
/// items that classify as `Low` and `Low` excludes stockouts.
fn matches_stock(product: &Product, filter: StockFilter) -> bool {
    match filter {
        StockFilter::All => true,
        StockFilter::Out => product.quantity == 0,
        StockFilter::Low => classify(product) == StockStatus::Low,
        StockFilter::Average => classify(product) == StockStatus::Average,
    }
}

/// Exact match against an optional display dimension; `None` criteria is
/// "all". A product without the field only passes the "all" criteria.
fn matches_dimension(field: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => field == Some(wanted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{AlertConfig, ProductId, ProductIndex};

    fn product(id: &str, name: &str, quantity: u32) -> Product {
        Product {
            id: ProductId::new(id),
            product_index: None,
            name: name.to_string(),
            buying_price: 1.0,
            selling_price: 2.0,
            quantity,
            alert_config: AlertConfig::Absent,
            description: None,
            supplier_name: None,
            category: None,
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_search_matches_everything() {
        let catalog = vec![product("1", "Hammer", 3), product("2", "Nail", 40)];
        let result = apply(&catalog, &QueryCriteria::default());
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut drill = product("1", "Drill", 10);
        drill.description = Some("Cordless POWER tool".to_string());
        let mut screws = product("2", "Screws", 10);
        screws.supplier_name = Some("Powerfix GmbH".to_string());
        let saw = product("3", "Saw", 10);

        let catalog = vec![drill, screws, saw];
        let criteria = QueryCriteria {
            search: "power".to_string(),
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn search_matches_numeric_index_as_text() {
        let mut a = product("1", "Anvil", 10);
        a.product_index = Some(ProductIndex::new("2041"));
        let b = product("2", "Bench", 10);

        let catalog = vec![a, b];
        let criteria = QueryCriteria {
            search: "204".to_string(),
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["1"]);
    }

    #[test]
    fn missing_fields_never_match_and_never_error() {
        let catalog = vec![product("1", "Anvil", 10)];
        let criteria = QueryCriteria {
            search: "acme".to_string(),
            ..QueryCriteria::default()
        };
        assert!(apply(&catalog, &criteria).is_empty());
    }

    #[test]
    fn low_filter_excludes_stockouts() {
        // Out-of-stock is `out`, not `low`.
        let mut low = product("2", "B", 3);
        low.alert_config = AlertConfig::Structured { min_quantity: 5 };
        let catalog = vec![product("1", "A", 0), low, product("3", "C", 80)];

        let criteria = QueryCriteria {
            filters: Filters {
                stock: StockFilter::Low,
                ..Filters::default()
            },
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["2"]);
    }

    #[test]
    fn average_filter_excludes_low_stock() {
        let mut low = product("1", "A", 8);
        low.alert_config = AlertConfig::Structured { min_quantity: 10 };
        let catalog = vec![low, product("2", "B", 8), product("3", "C", 50)];

        let criteria = QueryCriteria {
            filters: Filters {
                stock: StockFilter::Average,
                ..Filters::default()
            },
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["2"]);
    }

    #[test]
    fn category_and_supplier_are_exact_matches() {
        let mut a = product("1", "A", 10);
        a.category = Some("tools".to_string());
        a.supplier_name = Some("Acme".to_string());
        let mut b = product("2", "B", 10);
        b.category = Some("tools".to_string());
        b.supplier_name = Some("Globex".to_string());
        let c = product("3", "C", 10);

        let catalog = vec![a, b, c];
        let criteria = QueryCriteria {
            filters: Filters {
                category: Some("tools".to_string()),
                supplier: Some("Acme".to_string()),
                ..Filters::default()
            },
            ..QueryCriteria::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["1"]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_product() -> impl Strategy<Value = Product> {
            (
                "[a-z0-9]{1,6}",
                "[A-Za-z ]{0,12}",
                0u32..120,
                proptest::option::of("[a-z]{1,8}"),
                proptest::option::of("[a-z]{1,8}"),
            )
                .prop_map(|(id, name, quantity, category, supplier)| {
                    let mut p = product(&id, &name, quantity);
                    p.category = category;
                    p.supplier_name = supplier;
                    p
                })
        }

        fn arb_criteria() -> impl Strategy<Value = QueryCriteria> {
            (
                "[a-z ]{0,4}",
                prop_oneof![
                    Just(StockFilter::All),
                    Just(StockFilter::Out),
                    Just(StockFilter::Low),
                    Just(StockFilter::Average),
                ],
                proptest::option::of("[a-z]{1,8}"),
            )
                .prop_map(|(search, stock, category)| QueryCriteria {
                    search,
                    filters: Filters {
                        stock,
                        category,
                        supplier: None,
                    },
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: the result is an order-preserving subsequence.
            #[test]
            fn apply_preserves_catalog_order(
                catalog in proptest::collection::vec(arb_product(), 0..24),
                criteria in arb_criteria(),
            ) {
                let result = apply(&catalog, &criteria);

                let mut cursor = 0usize;
                for item in &result {
                    let found = catalog[cursor..]
                        .iter()
                        .position(|p| p == item)
                        .map(|offset| cursor + offset);
                    prop_assert!(found.is_some());
                    cursor = found.unwrap() + 1;
                }
            }

            /// Property: re-applying the same criteria changes nothing.
            #[test]
            fn apply_is_idempotent(
                catalog in proptest::collection::vec(arb_product(), 0..24),
                criteria in arb_criteria(),
            ) {
                let once = apply(&catalog, &criteria);
                let twice = apply(&once, &criteria);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
