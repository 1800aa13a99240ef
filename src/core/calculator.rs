//! Line amount and invoice total computation

use super::model::{Invoice, InvoiceItem};

/// Compute the amount of a single line
///
/// A non-zero `percentage` bills that share of `rate`; otherwise the line is
/// `rate × quantity`.
pub fn line_amount(item: &InvoiceItem) -> f64 {
    if item.percentage != 0.0 {
        item.rate * (item.percentage / 100.0)
    } else {
        item.rate * item.quantity as f64
    }
}

/// Recompute every line amount, the subtotal and the total in place
///
/// Client-supplied `amount`, `subtotal` and `total` values are overwritten.
pub fn apply_totals(invoice: &mut Invoice) {
    invoice.subtotal = 0.0;
    for item in &mut invoice.items {
        item.amount = line_amount(item);
        invoice.subtotal += item.amount;
    }
    invoice.total = invoice.subtotal + invoice.tax;
}
