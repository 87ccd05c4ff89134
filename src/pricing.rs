use serde::Serialize;

use crate::model::{InvoiceDocument, LineItem};

/// Non-finite values (NaN, ±inf) become 0 so they cannot poison a total.
pub fn sanitize_number(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// An overflowing product is non-finite too and counts as 0.
pub fn line_total(item: &LineItem) -> f64 {
    sanitize_number(sanitize_number(item.quantity) * sanitize_number(item.unit_price))
}

pub fn subtotal(items: &[LineItem]) -> f64 {
    sanitize_number(items.iter().map(line_total).sum())
}

/// `subtotal - discount + tax`. Not floored at zero: a discount larger than
/// subtotal plus tax yields a negative total.
pub fn grand_total(subtotal: f64, discount: Option<f64>, tax: Option<f64>) -> f64 {
    let discount = discount.map_or(0.0, sanitize_number);
    let tax = tax.map_or(0.0, sanitize_number);
    sanitize_number(subtotal) - discount + tax
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub grand_total: f64,
}

pub fn compute_totals(doc: &InvoiceDocument) -> Totals {
    let sub = subtotal(&doc.items);
    Totals {
        subtotal: sub,
        discount: doc.discount.map_or(0.0, sanitize_number),
        tax: doc.tax.map_or(0.0, sanitize_number),
        grand_total: grand_total(sub, doc.discount, doc.tax),
    }
}
