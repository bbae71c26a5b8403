use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clearbook_core::{DomainError, DomainResult, InvoiceId, Money, SupplierId};

/// One invoice line: description, quantity, unit price, line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A validated invoice.
///
/// `amount` and `total_amount` are both carried because dashboard widgets sum
/// `amount` while balances and statements sum `total_amount`; the two may
/// legitimately differ (e.g. tax or freight captured only in the total).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub supplier_id: SupplierId,
    pub amount: Money,
    pub total_amount: Money,
    pub due_date: NaiveDate,
    pub is_paid: bool,
    pub invoice_number: Option<String>,
    /// Present only when the invoice will be rendered as a document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<InvoiceItem>>,
}

/// Raw invoice record as received at the store boundary.
///
/// Monetary fields stay untyped here so that malformed values surface as
/// explicit data-quality errors from [`Invoice::from_record`] instead of an
/// opaque deserialization failure. Unknown fields are tolerated and dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub supplier_id: Option<SupplierId>,
    pub amount: Option<serde_json::Value>,
    pub total_amount: Option<serde_json::Value>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_paid: bool,
    pub invoice_number: Option<String>,
    pub items: Option<Vec<InvoiceItem>>,
}

fn parse_money(field: &str, value: &serde_json::Value) -> DomainResult<Money> {
    serde_json::from_value(value.clone())
        .map_err(|e| DomainError::malformed_amount(format!("{field}: {e}")))
}

impl Invoice {
    /// Validate a raw record into an invoice with the given identity.
    ///
    /// `total_amount` falls back to `amount` when absent. A total that
    /// disagrees with the item line totals is logged as a data-quality
    /// warning, not rejected: aggregate figures keep reflecting the stored
    /// total.
    pub fn from_record(id: InvoiceId, record: InvoiceRecord) -> DomainResult<Self> {
        let supplier_id = record
            .supplier_id
            .ok_or_else(|| DomainError::validation("invoice requires a supplierId"))?;
        let due_date = record.due_date.ok_or(DomainError::MissingDueDate)?;

        let amount = match &record.amount {
            Some(v) => parse_money("amount", v)?,
            None => return Err(DomainError::malformed_amount("amount: missing")),
        };
        let total_amount = match &record.total_amount {
            Some(v) => parse_money("totalAmount", v)?,
            None => amount,
        };

        if let Some(items) = &record.items {
            for (idx, item) in items.iter().enumerate() {
                if item.quantity <= 0 {
                    return Err(DomainError::validation(format!(
                        "item {idx}: quantity must be positive"
                    )));
                }
            }
        }

        let invoice = Self {
            id,
            supplier_id,
            amount,
            total_amount,
            due_date,
            is_paid: record.is_paid,
            invoice_number: record.invoice_number,
            items: record.items,
        };

        if !invoice.items_consistent() {
            tracing::warn!(
                invoice_id = %invoice.id,
                total = %invoice.total_amount,
                items_total = %invoice.items_total().unwrap_or(Money::ZERO),
                "invoice total disagrees with item line totals"
            );
        }

        Ok(invoice)
    }

    /// Whole days past due at the given reference date; negative when the
    /// invoice is not yet due. Day granularity by contract.
    pub fn days_overdue(&self, reference: NaiveDate) -> i64 {
        (reference - self.due_date).num_days()
    }

    /// Display reference: the invoice number, or `#<id>` when absent.
    pub fn reference(&self) -> String {
        match &self.invoice_number {
            Some(number) => number.clone(),
            None => format!("#{}", self.id),
        }
    }

    /// Sum of item line totals, when items are present.
    pub fn items_total(&self) -> Option<Money> {
        self.items
            .as_ref()
            .map(|items| items.iter().map(|i| i.line_total).sum())
    }

    /// Whether `total_amount` agrees with the item line totals.
    ///
    /// Vacuously true without items.
    pub fn items_consistent(&self) -> bool {
        match self.items_total() {
            Some(total) => total == self.total_amount,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> InvoiceRecord {
        serde_json::from_value(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_record_builds_validated_invoice() {
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": 100,
            "totalAmount": "120.50",
            "dueDate": "2026-08-01",
            "invoiceNumber": "INV-1001",
            "rowVersion": 7
        }));

        let invoice = Invoice::from_record(InvoiceId::new(), rec).unwrap();
        assert_eq!(invoice.amount, Money::from_major(100));
        assert_eq!(invoice.total_amount, Money::from_minor(12050));
        assert_eq!(invoice.due_date, date(2026, 8, 1));
        assert!(!invoice.is_paid);
        assert_eq!(invoice.reference(), "INV-1001");
    }

    #[test]
    fn missing_due_date_is_an_explicit_error() {
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": 100
        }));
        let err = Invoice::from_record(InvoiceId::new(), rec).unwrap_err();
        assert_eq!(err, DomainError::MissingDueDate);
    }

    #[test]
    fn malformed_amount_is_not_coerced_to_zero() {
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": "12,50",
            "dueDate": "2026-08-01"
        }));
        let err = Invoice::from_record(InvoiceId::new(), rec).unwrap_err();
        assert!(matches!(err, DomainError::MalformedAmount(_)));
    }

    #[test]
    fn total_amount_falls_back_to_amount() {
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": "79.50",
            "dueDate": "2026-08-01"
        }));
        let invoice = Invoice::from_record(InvoiceId::new(), rec).unwrap();
        assert_eq!(invoice.total_amount, Money::from_minor(7950));
    }

    #[test]
    fn reference_falls_back_to_id() {
        let id = InvoiceId::new();
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": 10,
            "dueDate": "2026-08-01"
        }));
        let invoice = Invoice::from_record(id, rec).unwrap();
        assert_eq!(invoice.reference(), format!("#{id}"));
    }

    #[test]
    fn days_overdue_is_day_granular() {
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": 10,
            "dueDate": "2026-08-01"
        }));
        let invoice = Invoice::from_record(InvoiceId::new(), rec).unwrap();
        assert_eq!(invoice.days_overdue(date(2026, 8, 31)), 30);
        assert_eq!(invoice.days_overdue(date(2026, 8, 1)), 0);
        assert_eq!(invoice.days_overdue(date(2026, 7, 22)), -10);
    }

    #[test]
    fn items_consistency_checks_line_totals() {
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": 30,
            "totalAmount": 30,
            "dueDate": "2026-08-01",
            "items": [
                {"description": "Pallets", "quantity": 2, "unitPrice": 10, "lineTotal": 20},
                {"description": "Fuel surcharge", "quantity": 1, "unitPrice": 10, "lineTotal": 10}
            ]
        }));
        let invoice = Invoice::from_record(InvoiceId::new(), rec).unwrap();
        assert!(invoice.items_consistent());
        assert_eq!(invoice.items_total(), Some(Money::from_major(30)));
    }

    #[test]
    fn non_positive_item_quantity_is_rejected() {
        let rec = record(json!({
            "supplierId": SupplierId::new(),
            "amount": 10,
            "dueDate": "2026-08-01",
            "items": [
                {"description": "Pallets", "quantity": 0, "unitPrice": 10, "lineTotal": 0}
            ]
        }));
        let err = Invoice::from_record(InvoiceId::new(), rec).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
