use chrono::NaiveDate;
use serde::Serialize;

use clearbook_core::Money;
use clearbook_invoicing::Invoice;
use clearbook_suppliers::Supplier;

/// One printable row of an invoice document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Everything the renderer needs to lay out a single invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub reference: String,
    pub supplier_name: String,
    pub supplier_address: Option<String>,
    pub due_date: NaiveDate,
    pub is_paid: bool,
    pub lines: Vec<DocumentLine>,
    pub total: Money,
}

impl InvoiceDocument {
    /// Assemble the document content for one invoice.
    ///
    /// An invoice without item lines still renders: it gets a single summary
    /// row carrying the invoice total.
    pub fn build(invoice: &Invoice, supplier: &Supplier) -> Self {
        let lines = match &invoice.items {
            Some(items) if !items.is_empty() => items
                .iter()
                .map(|item| DocumentLine {
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total,
                })
                .collect(),
            _ => vec![DocumentLine {
                description: format!("Invoice {}", invoice.reference()),
                quantity: 1,
                unit_price: invoice.total_amount,
                line_total: invoice.total_amount,
            }],
        };

        Self {
            reference: invoice.reference(),
            supplier_name: supplier.name.clone(),
            supplier_address: supplier.address.clone(),
            due_date: invoice.due_date,
            is_paid: invoice.is_paid,
            lines,
            total: invoice.total_amount,
        }
    }
}
