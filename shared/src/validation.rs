//! Validation helpers for catalog and sale payloads

use rust_decimal::Decimal;

use crate::models::SaleItemRequest;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate that a display name is non-empty
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name cannot be empty");
    }
    Ok(())
}

/// Validate a catalog price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("price cannot be negative");
    }
    Ok(())
}

/// Validate a stock level
pub fn validate_stock(stock: i32) -> Result<(), &'static str> {
    if stock < 0 {
        return Err("stock cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Sale Validations
// ============================================================================

/// Validate a requested line quantity
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("quantity must be greater than zero");
    }
    Ok(())
}

/// Validate the line items of a sale payload
///
/// A sale must carry at least one line and every line must request a
/// positive quantity. Runs before anything is written.
pub fn validate_sale_items(items: &[SaleItemRequest]) -> Result<(), &'static str> {
    if items.is_empty() {
        return Err("sale must include at least one product");
    }
    for item in items {
        validate_quantity(item.cantidad)?;
    }
    Ok(())
}
