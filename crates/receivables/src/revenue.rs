//! Supplier revenue rollup and ranking for the leaderboard widget.

use core::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use clearbook_core::{DomainError, DomainResult, Money};
use clearbook_invoicing::Invoice;
use clearbook_suppliers::Supplier;

/// Recency cutoff for the revenue rollup: a finite day count measured back
/// from the reference date, or all time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueWindow {
    Days(u32),
    All,
}

impl RevenueWindow {
    /// Whether an invoice due on `due_date` falls inside the window.
    ///
    /// The finite window keeps invoices due up to N days *ago*
    /// (`reference - due_date <= N`), so future-due invoices always pass.
    /// This mirrors the report's historical behavior; a "last 30 days" label
    /// arguably should scope issue dates instead, but the comparison
    /// direction is kept as shipped.
    pub fn admits(self, due_date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            RevenueWindow::All => true,
            RevenueWindow::Days(days) => (reference - due_date).num_days() <= i64::from(days),
        }
    }
}

impl FromStr for RevenueWindow {
    type Err = DomainError;

    /// Parse the query form: `"all"` or a day count like `"30"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(RevenueWindow::All);
        }
        s.parse::<u32>()
            .map(RevenueWindow::Days)
            .map_err(|_| DomainError::validation(format!("invalid revenue window: {s:?}")))
    }
}

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRevenue {
    pub supplier: Supplier,
    pub revenue: Money,
}

/// Ranked revenue entries plus their grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub rankings: Vec<SupplierRevenue>,
    pub total: Money,
}

/// Rank suppliers by `total_amount` summed over their in-window invoices.
///
/// Emits one entry per input supplier (zero revenue included), sorted
/// descending; ties keep supplier input order. The grand total is the sum of
/// the per-supplier revenues, which equals the in-window invoice total as
/// long as every invoice references a listed supplier. Sums are
/// overflow-checked.
pub fn supplier_revenue(
    suppliers: &[Supplier],
    invoices: &[Invoice],
    window: RevenueWindow,
    reference: NaiveDate,
) -> DomainResult<RevenueReport> {
    let in_window: Vec<&Invoice> = invoices
        .iter()
        .filter(|i| window.admits(i.due_date, reference))
        .collect();

    let mut rankings = suppliers
        .iter()
        .map(|supplier| {
            let revenue = Money::total(
                in_window
                    .iter()
                    .filter(|i| i.supplier_id == supplier.id)
                    .map(|i| i.total_amount),
            )?;
            Ok(SupplierRevenue {
                supplier: supplier.clone(),
                revenue,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    // Stable sort keeps input order for equal revenues.
    rankings.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    let total = Money::total(rankings.iter().map(|r| r.revenue))?;
    Ok(RevenueReport { rankings, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{invoice, supplier, today};
    use chrono::Duration;

    #[test]
    fn ranks_descending_with_grand_total() {
        let a = supplier("A");
        let b = supplier("B");
        let due = today();
        let invoices = vec![
            invoice(a.id, "300", false, due),
            invoice(b.id, "500", true, due),
        ];

        let report = supplier_revenue(
            &[a.clone(), b.clone()],
            &invoices,
            RevenueWindow::All,
            today(),
        )
        .unwrap();

        assert_eq!(report.rankings.len(), 2);
        assert_eq!(report.rankings[0].supplier.id, b.id);
        assert_eq!(report.rankings[0].revenue, Money::from_major(500));
        assert_eq!(report.rankings[1].supplier.id, a.id);
        assert_eq!(report.rankings[1].revenue, Money::from_major(300));
        assert_eq!(report.total, Money::from_major(800));
    }

    #[test]
    fn ties_keep_supplier_input_order() {
        let first = supplier("First");
        let second = supplier("Second");
        let due = today();
        let invoices = vec![
            invoice(second.id, "100", false, due),
            invoice(first.id, "100", false, due),
        ];

        let report = supplier_revenue(
            &[first.clone(), second.clone()],
            &invoices,
            RevenueWindow::All,
            today(),
        )
        .unwrap();
        assert_eq!(report.rankings[0].supplier.id, first.id);
        assert_eq!(report.rankings[1].supplier.id, second.id);
    }

    #[test]
    fn finite_window_looks_back_from_reference() {
        let s = supplier("S");
        let reference = today();
        let invoices = vec![
            // Due 10 days ago: inside a 30-day window.
            invoice(s.id, "100", false, reference - Duration::days(10)),
            // Due 45 days ago: outside.
            invoice(s.id, "50", false, reference - Duration::days(45)),
            // Due in the future: the backward-looking comparison admits it.
            invoice(s.id, "25", false, reference + Duration::days(5)),
        ];

        let report =
            supplier_revenue(&[s.clone()], &invoices, RevenueWindow::Days(30), reference).unwrap();
        assert_eq!(report.rankings[0].revenue, Money::from_major(125));
        assert_eq!(report.total, Money::from_major(125));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let s = supplier("S");
        let reference = today();
        let exactly_30 = vec![invoice(s.id, "10", false, reference - Duration::days(30))];
        let at_31 = vec![invoice(s.id, "10", false, reference - Duration::days(31))];

        let kept = supplier_revenue(&[s.clone()], &exactly_30, RevenueWindow::Days(30), reference)
            .unwrap();
        let dropped =
            supplier_revenue(&[s.clone()], &at_31, RevenueWindow::Days(30), reference).unwrap();
        assert_eq!(kept.total, Money::from_major(10));
        assert_eq!(dropped.total, Money::ZERO);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = supplier_revenue(&[], &[], RevenueWindow::All, today()).unwrap();
        assert_eq!(report, RevenueReport::default());
    }

    #[test]
    fn window_parses_from_query_form() {
        assert_eq!("all".parse::<RevenueWindow>().unwrap(), RevenueWindow::All);
        assert_eq!("ALL".parse::<RevenueWindow>().unwrap(), RevenueWindow::All);
        assert_eq!(
            "30".parse::<RevenueWindow>().unwrap(),
            RevenueWindow::Days(30)
        );
        assert!("soon".parse::<RevenueWindow>().is_err());
    }
}
