//! Per-supplier outstanding balance.

use clearbook_core::{DomainResult, Money, SupplierId};
use clearbook_invoicing::Invoice;

/// The unpaid invoices of one supplier, in snapshot order.
///
/// Feeds the account-statement document, which renders one line per unpaid
/// invoice.
pub fn unpaid_invoices<'a>(supplier_id: SupplierId, invoices: &'a [Invoice]) -> Vec<&'a Invoice> {
    invoices
        .iter()
        .filter(|i| i.supplier_id == supplier_id && !i.is_paid)
        .collect()
}

/// Checked sum of `total_amount` over the supplier's unpaid invoices.
pub fn outstanding_balance(supplier_id: SupplierId, invoices: &[Invoice]) -> DomainResult<Money> {
    Money::total(
        unpaid_invoices(supplier_id, invoices)
            .into_iter()
            .map(|i| i.total_amount),
    )
}
