//! `clearbook-suppliers` — supplier records.

pub mod supplier;

pub use supplier::{Supplier, SupplierRecord};
