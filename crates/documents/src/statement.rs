use chrono::NaiveDate;
use serde::Serialize;

use clearbook_core::{DomainResult, Money};
use clearbook_invoicing::Invoice;
use clearbook_receivables::{outstanding_balance, unpaid_invoices};
use clearbook_suppliers::Supplier;

/// One statement row: an unpaid invoice with its computed overdue age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    pub reference: String,
    pub due_date: NaiveDate,
    pub total_amount: Money,
    pub days_overdue: i64,
}

/// Account statement content: the supplier's unpaid invoices and what they
/// add up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatement {
    pub supplier: Supplier,
    pub reference_date: NaiveDate,
    pub lines: Vec<StatementLine>,
    pub outstanding: Money,
}

impl AccountStatement {
    /// Assemble the statement for one supplier at the given reference date.
    ///
    /// Lines follow the snapshot's invoice order; the outstanding figure is
    /// the receivables rollup over the same snapshot, so the statement footer
    /// always matches the dashboard badge.
    pub fn build(
        supplier: &Supplier,
        invoices: &[Invoice],
        reference: NaiveDate,
    ) -> DomainResult<Self> {
        let lines = unpaid_invoices(supplier.id, invoices)
            .into_iter()
            .map(|invoice| StatementLine {
                reference: invoice.reference(),
                due_date: invoice.due_date,
                total_amount: invoice.total_amount,
                days_overdue: invoice.days_overdue(reference),
            })
            .collect();

        Ok(Self {
            supplier: supplier.clone(),
            reference_date: reference,
            lines,
            outstanding: outstanding_balance(supplier.id, invoices)?,
        })
    }
}
