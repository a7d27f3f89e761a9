//! Sale registration models
//!
//! The JSON field names on these types are consumed by an existing
//! browser client and must not change.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One requested line of a sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequest {
    pub producto_id: i32,
    pub cantidad: i32,
}

/// Payload for registering a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSaleRequest {
    pub cliente_id: i32,
    pub productos: Vec<SaleItemRequest>,
}

/// Response body for a registered sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSaleResponse {
    pub message: String,
    pub venta_id: i32,
}

/// A persisted sale line with its price snapshot
///
/// `unit_price` is the catalog price captured when the line was written
/// and stays fixed through later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLine {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl SaleLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Total of a sale from its line snapshots
pub fn sale_total(lines: &[SaleLine]) -> Decimal {
    lines.iter().map(SaleLine::line_total).sum()
}

/// Sum requested quantities per product, ordered by product id.
///
/// A payload may name the same product on several lines; the stock check
/// must see the combined quantity, and a batched update touches each
/// product row exactly once.
pub fn aggregate_line_quantities(items: &[SaleItemRequest]) -> Vec<(i32, i64)> {
    let mut totals: BTreeMap<i32, i64> = BTreeMap::new();
    for item in items {
        *totals.entry(item.producto_id).or_insert(0) += i64::from(item.cantidad);
    }
    totals.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_request_wire_field_names() {
        let request = RegisterSaleRequest {
            cliente_id: 4,
            productos: vec![SaleItemRequest {
                producto_id: 7,
                cantidad: 2,
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("clienteId").is_some());
        assert!(value["productos"][0].get("productoId").is_some());
        assert!(value["productos"][0].get("cantidad").is_some());
    }

    #[test]
    fn test_response_wire_field_names() {
        let response = RegisterSaleResponse {
            message: "sale registered and stock updated".to_string(),
            venta_id: 12,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["ventaId"], 12);
        assert!(value.get("message").is_some());
    }

    #[test]
    fn test_request_parses_wire_payload() {
        let body = r#"{"clienteId":3,"productos":[{"productoId":5,"cantidad":2},{"productoId":9,"cantidad":1}]}"#;
        let request: RegisterSaleRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.cliente_id, 3);
        assert_eq!(request.productos.len(), 2);
        assert_eq!(request.productos[0].producto_id, 5);
        assert_eq!(request.productos[1].cantidad, 1);
    }

    #[test]
    fn test_line_total() {
        let line = SaleLine {
            product_id: 5,
            quantity: 3,
            unit_price: dec("25.50"),
        };
        assert_eq!(line.line_total(), dec("76.50"));
    }

    #[test]
    fn test_sale_total_sums_lines() {
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

    #[test]
    fn test_sale_total_empty() {
        assert_eq!(sale_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_combines_duplicate_products() {
        let items = vec![
            SaleItemRequest {
                producto_id: 5,
                cantidad: 2,
            },
            SaleItemRequest {
                producto_id: 9,
                cantidad: 1,
            },
            SaleItemRequest {
                producto_id: 5,
                cantidad: 4,
            },
        ];

        let aggregated = aggregate_line_quantities(&items);
        assert_eq!(aggregated, vec![(5, 6), (9, 1)]);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_line_quantities(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_orders_by_product_id() {
        let items = vec![
            SaleItemRequest {
                producto_id: 30,
                cantidad: 1,
            },
            SaleItemRequest {
                producto_id: 2,
                cantidad: 1,
            },
            SaleItemRequest {
                producto_id: 17,
                cantidad: 1,
            },
        ];

        let ids: Vec<i32> = aggregate_line_quantities(&items)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![2, 17, 30]);
    }
}
