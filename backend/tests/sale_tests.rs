//! Sale registration tests
//!
//! Tests for the sale registration flow including:
//! - payload validation
//! - per-product quantity aggregation
//! - all-or-nothing stock decrements
//! - totals computed from price snapshots

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{
    aggregate_line_quantities, sale_total, RegisterSaleRequest, RegisterSaleResponse,
    SaleItemRequest, SaleLine,
};
use shared::validation::validate_sale_items;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// Helper to build a request line
fn item(producto_id: i32, cantidad: i32) -> SaleItemRequest {
    SaleItemRequest {
        producto_id,
        cantidad,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test empty payload rejection
    #[test]
    fn test_empty_payload_rejected() {
        assert!(validate_sale_items(&[]).is_err());
    }

    /// Test zero quantity rejection
    #[test]
    fn test_zero_quantity_rejected() {
        let items = vec![item(5, 0)];
        assert!(validate_sale_items(&items).is_err());
    }

    /// Test negative quantity rejection
    #[test]
    fn test_negative_quantity_rejected() {
        let items = vec![item(5, 2), item(9, -1)];
        assert!(validate_sale_items(&items).is_err());
    }

    /// Test a valid payload passes
    #[test]
    fn test_valid_payload_accepted() {
        let items = vec![item(5, 2), item(9, 1)];
        assert!(validate_sale_items(&items).is_ok());
    }

    /// Test duplicate product lines are allowed
    #[test]
    fn test_duplicate_product_lines_accepted() {
        let items = vec![item(5, 2), item(5, 3)];
        assert!(validate_sale_items(&items).is_ok());
    }

    /// Test aggregation sums duplicate products
    #[test]
    fn test_aggregation_combines_duplicates() {
        let items = vec![item(5, 2), item(9, 1), item(5, 4)];
        let aggregated = aggregate_line_quantities(&items);

        assert_eq!(aggregated, vec![(5, 6), (9, 1)]);
    }

    /// Test aggregation leaves distinct products as-is
    #[test]
    fn test_aggregation_distinct_products() {
        let items = vec![item(5, 2), item(9, 1)];
        let aggregated = aggregate_line_quantities(&items);

        assert_eq!(aggregated, vec![(5, 2), (9, 1)]);
    }

    /// Test the request payload parses with its wire field names
    #[test]
    fn test_register_payload_parses_wire_names() {
        let body = r#"{"clienteId":3,"productos":[{"productoId":5,"cantidad":2},{"productoId":9,"cantidad":1}]}"#;
        let request: RegisterSaleRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.cliente_id, 3);
        assert_eq!(request.productos, vec![item(5, 2), item(9, 1)]);
    }

    /// Test the response serializes ventaId
    #[test]
    fn test_register_response_wire_names() {
        let response = RegisterSaleResponse {
            message: "sale registered and stock updated".to_string(),
            venta_id: 42,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["ventaId"], 42);
        assert_eq!(value["message"], "sale registered and stock updated");
    }

    /// Test total arithmetic over snapshot lines
    #[test]
    fn test_total_from_snapshot_lines() {
        let lines = vec![
            SaleLine {
                product_id: 5,
                quantity: 2,
                unit_price: dec("10.00"),
            },
            SaleLine {
                product_id: 9,
                quantity: 1,
                unit_price: dec("4.25"),
            },
        ];

        assert_eq!(sale_total(&lines), dec("24.25"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::integration_helpers::StoreSim;
    use super::*;

    /// Strategy for generating a request line
    fn item_strategy() -> impl Strategy<Value = SaleItemRequest> {
        (1i32..=40, 1i32..=15).prop_map(|(producto_id, cantidad)| SaleItemRequest {
            producto_id,
            cantidad,
        })
    }

    /// Strategy for generating a non-empty payload
    fn items_strategy() -> impl Strategy<Value = Vec<SaleItemRequest>> {
        prop::collection::vec(item_strategy(), 1..12)
    }

    /// Strategy for generating unit prices
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100000).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Aggregation never loses quantity
        #[test]
        fn prop_aggregation_preserves_total_quantity(items in items_strategy()) {
            let requested: i64 = items.iter().map(|i| i64::from(i.cantidad)).sum();
            let aggregated: i64 = aggregate_line_quantities(&items)
                .iter()
                .map(|&(_, qty)| qty)
                .sum();

            prop_assert_eq!(requested, aggregated);
        }

        /// Aggregated product ids are strictly increasing
        #[test]
        fn prop_aggregation_ids_strictly_increasing(items in items_strategy()) {
            let aggregated = aggregate_line_quantities(&items);

            for pair in aggregated.windows(2) {
                prop_assert!(pair[0].0 < pair[1].0);
            }
        }

        /// Aggregation never produces more entries than input lines
        #[test]
        fn prop_aggregation_bounded_by_input(items in items_strategy()) {
            let aggregated = aggregate_line_quantities(&items);

            prop_assert!(!aggregated.is_empty());
            prop_assert!(aggregated.len() <= items.len());
        }

        /// Payloads with only positive quantities pass validation
        #[test]
        fn prop_positive_quantities_pass_validation(items in items_strategy()) {
            prop_assert!(validate_sale_items(&items).is_ok());
        }

        /// One non-positive quantity fails the whole payload
        #[test]
        fn prop_nonpositive_quantity_rejected(
            mut items in items_strategy(),
            slot in 0usize..12,
            bad in -5i32..=0
        ) {
            let idx = slot % items.len();
            items[idx].cantidad = bad;

            prop_assert!(validate_sale_items(&items).is_err());
        }

        /// Sale total equals the sum of quantity times snapshot price
        #[test]
        fn prop_sale_total_matches_manual_sum(
            quantities in prop::collection::vec(1i32..=20, 1..10),
            prices in prop::collection::vec(price_strategy(), 1..10)
        ) {
            let len = quantities.len().min(prices.len());
            let lines: Vec<SaleLine> = (0..len)
                .map(|i| SaleLine {
                    product_id: i as i32 + 1,
                    quantity: quantities[i],
                    unit_price: prices[i],
                })
                .collect();

            let expected: Decimal = lines
                .iter()
                .map(|l| l.unit_price * Decimal::from(l.quantity))
                .sum();

            prop_assert_eq!(sale_total(&lines), expected);
        }

        /// Registration either applies every decrement or none
        #[test]
        fn prop_registration_all_or_nothing(
            products in prop::collection::vec((1i32..=10, 0i32..=20), 1..6),
            items in items_strategy()
        ) {
            let mut sim = StoreSim::new();
            for &(id, stock) in &products {
                sim = sim.with_product(id, stock, dec("5.00"));
            }

            let before = sim.snapshot_stocks();

            match sim.register_sale(&items) {
                Ok((_, lines)) => {
                    prop_assert_eq!(lines.len(), items.len());
                    for (id, qty) in aggregate_line_quantities(&items) {
                        let prev = i64::from(before[&id]);
                        let now = i64::from(sim.stock_of(id).unwrap());
                        prop_assert_eq!(prev - now, qty);
                    }
                }
                Err(_) => {
                    prop_assert_eq!(before, sim.snapshot_stocks());
                }
            }
        }

        /// Stock never goes negative whatever the payload
        #[test]
        fn prop_stock_never_negative(
            products in prop::collection::vec((1i32..=10, 0i32..=20), 1..6),
            items in items_strategy()
        ) {
            let mut sim = StoreSim::new();
            for &(id, stock) in &products {
                sim = sim.with_product(id, stock, dec("5.00"));
            }

            let _ = sim.register_sale(&items);

            for (_, stock) in sim.snapshot_stocks() {
                prop_assert!(stock >= 0);
            }
        }
    }
}

// ============================================================================
// Integration Test Helpers (transactional flow simulation)
// ============================================================================

#[cfg(test)]
mod integration_helpers {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory stand-in for the products table and sales sequence
    ///
    /// Mirrors the registration flow: validate, aggregate, check every
    /// decrement against stock, then apply all writes or none.
    #[derive(Debug, Clone)]
    pub struct StoreSim {
        stock: BTreeMap<i32, i32>,
        price: BTreeMap<i32, Decimal>,
        next_sale_id: i32,
    }

    impl StoreSim {
        pub fn new() -> Self {
            Self {
                stock: BTreeMap::new(),
                price: BTreeMap::new(),
                next_sale_id: 1,
            }
        }

        pub fn with_product(mut self, id: i32, stock: i32, price: Decimal) -> Self {
            self.stock.insert(id, stock);
            self.price.insert(id, price);
            self
        }

        pub fn set_price(&mut self, id: i32, price: Decimal) {
            self.price.insert(id, price);
        }

        pub fn stock_of(&self, id: i32) -> Option<i32> {
            self.stock.get(&id).copied()
        }

        pub fn snapshot_stocks(&self) -> BTreeMap<i32, i32> {
            self.stock.clone()
        }

        pub fn register_sale(
            &mut self,
            items: &[SaleItemRequest],
        ) -> Result<(i32, Vec<SaleLine>), &'static str> {
            validate_sale_items(items)?;

            let aggregated = aggregate_line_quantities(items);

            for &(id, qty) in &aggregated {
                match self.stock.get(&id) {
                    Some(&stock) if i64::from(stock) >= qty => {}
                    _ => return Err("failed to update product stock"),
                }
            }

            for &(id, qty) in &aggregated {
                if let Some(stock) = self.stock.get_mut(&id) {
                    *stock -= qty as i32;
                }
            }

            let lines = items
                .iter()
                .map(|item| SaleLine {
                    product_id: item.producto_id,
                    quantity: item.cantidad,
                    unit_price: self.price[&item.producto_id],
                })
                .collect();

            let sale_id = self.next_sale_id;
            self.next_sale_id += 1;

            Ok((sale_id, lines))
        }
    }

    #[test]
    fn test_register_sale_decrements_stock() {
        let mut sim = StoreSim::new()
            .with_product(5, 10, dec("25.50"))
            .with_product(9, 4, dec("4.00"));

        let (sale_id, lines) = sim.register_sale(&[item(5, 2), item(9, 1)]).unwrap();

        assert_eq!(sale_id, 1);
        assert_eq!(lines.len(), 2);
        assert_eq!(sim.stock_of(5), Some(8));
        assert_eq!(sim.stock_of(9), Some(3));
    }

    #[test]
    fn test_register_sale_missing_product_rolls_back() {
        let mut sim = StoreSim::new().with_product(5, 10, dec("25.50"));

        let result = sim.register_sale(&[item(5, 2), item(7, 1)]);

        assert!(result.is_err());
        // The known product keeps its full stock
        assert_eq!(sim.stock_of(5), Some(10));
    }

    #[test]
    fn test_register_sale_short_stock_rolls_back() {
        let mut sim = StoreSim::new()
            .with_product(5, 1, dec("25.50"))
            .with_product(9, 4, dec("4.00"));

        let result = sim.register_sale(&[item(9, 2), item(5, 3)]);

        assert!(result.is_err());
        assert_eq!(sim.stock_of(5), Some(1));
        assert_eq!(sim.stock_of(9), Some(4));
    }

    #[test]
    fn test_register_sale_duplicates_checked_combined() {
        let mut sim = StoreSim::new().with_product(5, 5, dec("25.50"));

        // 3 + 3 exceeds the stock of 5 even though each line alone fits
        let result = sim.register_sale(&[item(5, 3), item(5, 3)]);

        assert!(result.is_err());
        assert_eq!(sim.stock_of(5), Some(5));
    }

    #[test]
    fn test_register_sale_duplicates_within_stock() {
        let mut sim = StoreSim::new().with_product(5, 6, dec("25.50"));

        let (_, lines) = sim.register_sale(&[item(5, 3), item(5, 3)]).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(sim.stock_of(5), Some(0));
    }

    #[test]
    fn test_register_sale_not_idempotent() {
        let mut sim = StoreSim::new().with_product(5, 10, dec("25.50"));

        let (first, _) = sim.register_sale(&[item(5, 2)]).unwrap();
        let (second, _) = sim.register_sale(&[item(5, 2)]).unwrap();

        assert_ne!(first, second);
        assert_eq!(sim.stock_of(5), Some(6));
    }

    #[test]
    fn test_lines_preserve_input_order() {
        let mut sim = StoreSim::new()
            .with_product(5, 10, dec("25.50"))
            .with_product(9, 4, dec("4.00"));

        let (_, lines) = sim.register_sale(&[item(9, 1), item(5, 2)]).unwrap();

        let ids: Vec<i32> = lines.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![9, 5]);
    }

    #[test]
    fn test_snapshot_prices_survive_catalog_change() {
        let mut sim = StoreSim::new().with_product(5, 10, dec("25.50"));

        let (_, lines) = sim.register_sale(&[item(5, 2)]).unwrap();
        let total_before = sale_total(&lines);

        sim.set_price(5, dec("99.99"));

        // The registered sale keeps its captured prices
        assert_eq!(sale_total(&lines), total_before);
        assert_eq!(total_before, dec("51.00"));

        // A new sale sees the new price
        let (_, new_lines) = sim.register_sale(&[item(5, 1)]).unwrap();
        assert_eq!(sale_total(&new_lines), dec("99.99"));
    }
}
