//! Shared test fixtures.

use chrono::{Duration, NaiveDate};

use clearbook_core::{InvoiceId, Money, SupplierId};
use clearbook_invoicing::Invoice;
use clearbook_suppliers::Supplier;

/// Fixed reference date so fixtures stay deterministic.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

pub fn supplier(name: &str) -> Supplier {
    Supplier {
        id: SupplierId::new(),
        name: name.to_string(),
        contact_person: None,
        email: None,
        phone: None,
        address: None,
    }
}

pub fn invoice(supplier_id: SupplierId, total: &str, is_paid: bool, due: NaiveDate) -> Invoice {
    let total: Money = total.parse().unwrap();
    Invoice {
        id: InvoiceId::new(),
        supplier_id,
        amount: total,
        total_amount: total,
        due_date: due,
        is_paid,
        invoice_number: None,
        items: None,
    }
}

/// Unpaid invoice whose due date lies `days_ago` days before `reference`
/// (negative values put it in the future).
pub fn unpaid_due_days_ago(days_ago: i64, amount: &str, reference: NaiveDate) -> Invoice {
    invoice(
        SupplierId::new(),
        amount,
        false,
        reference - Duration::days(days_ago),
    )
}
