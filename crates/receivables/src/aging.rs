//! Aging histogram over unpaid invoices.

use chrono::NaiveDate;
use serde::Serialize;

use clearbook_core::{DomainError, DomainResult, Money};
use clearbook_invoicing::Invoice;

/// Unpaid `amount` bucketed by whole days past due.
///
/// Serializes as an object with exactly four labels, in this order; the
/// dashboard chart and its fixtures rely on the label order being stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgingBuckets {
    #[serde(rename = "0-30 days")]
    pub current: Money,
    #[serde(rename = "31-60 days")]
    pub days_31_60: Money,
    #[serde(rename = "61-90 days")]
    pub days_61_90: Money,
    #[serde(rename = "90+ days")]
    pub over_90: Money,
}

impl AgingBuckets {
    /// Checked sum across all four buckets. Equals the unpaid portion of the
    /// overview for the same snapshot.
    pub fn total(&self) -> DomainResult<Money> {
        Money::total([self.current, self.days_31_60, self.days_61_90, self.over_90])
    }
}

/// Bucket the unpaid invoices of a snapshot by days past due at `reference`.
///
/// Buckets partition by inclusive upper bound, applied in order: `<= 30`,
/// `<= 60`, `<= 90`, else `90+`. Not-yet-due invoices (negative days) land in
/// the first bucket. Paid invoices are ignored; an empty snapshot yields four
/// zero buckets. An overflowing bucket surfaces as an invariant error.
pub fn aging_buckets(invoices: &[Invoice], reference: NaiveDate) -> DomainResult<AgingBuckets> {
    let mut buckets = AgingBuckets::default();
    for invoice in invoices.iter().filter(|i| !i.is_paid) {
        let days = invoice.days_overdue(reference);
        let slot = if days <= 30 {
            &mut buckets.current
        } else if days <= 60 {
            &mut buckets.days_31_60
        } else if days <= 90 {
            &mut buckets.days_61_90
        } else {
            &mut buckets.over_90
        };
        *slot = slot
            .checked_add(invoice.amount)
            .ok_or_else(|| DomainError::invariant("aging bucket overflow"))?;
    }
    Ok(buckets)
}
