//! Total / paid / unpaid rollup for the dashboard summary cards.

use serde::Serialize;

use clearbook_core::{DomainError, DomainResult, Money};
use clearbook_invoicing::Invoice;

/// The `{ totalAr, paidAr, unpaidAr }` triple.
///
/// `paid + unpaid == total` holds exactly for every snapshot: all three
/// figures are derived from the same minor-unit sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArOverview {
    pub total_ar: Money,
    pub paid_ar: Money,
    pub unpaid_ar: Money,
}

/// Roll a snapshot up into the overview triple, summing `amount`.
///
/// Sums are overflow-checked; an overflowing total surfaces as an invariant
/// error instead of wrapping.
pub fn overview(invoices: &[Invoice]) -> DomainResult<ArOverview> {
    let total_ar = Money::total(invoices.iter().map(|i| i.amount))?;
    let paid_ar = Money::total(invoices.iter().filter(|i| i.is_paid).map(|i| i.amount))?;
    let unpaid_ar = total_ar
        .checked_sub(paid_ar)
        .ok_or_else(|| DomainError::invariant("unpaid total overflow"))?;
    Ok(ArOverview {
        total_ar,
        paid_ar,
        unpaid_ar,
    })
}
