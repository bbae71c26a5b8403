//! `clearbook-receivables` — the accounts-receivable aggregation core.
//!
//! Every function here is pure: it reads invoice/supplier snapshots, never
//! mutates them, performs no I/O, and is deterministic given the same inputs
//! and reference date. Callers are responsible for validating records at the
//! store boundary before handing them in. Monetary sums are overflow-checked
//! through [`clearbook_core::Money::total`]; an overflowing total comes back
//! as an invariant error instead of wrapping.

pub mod aging;
pub mod balance;
pub mod overview;
pub mod revenue;

#[cfg(test)]
pub(crate) mod testing;

pub use aging::{aging_buckets, AgingBuckets};
pub use balance::{outstanding_balance, unpaid_invoices};
pub use overview::{overview, ArOverview};
pub use revenue::{supplier_revenue, RevenueReport, RevenueWindow, SupplierRevenue};
