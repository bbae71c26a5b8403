//! `clearbook-invoicing` — invoice records.

pub mod invoice;

pub use invoice::{Invoice, InvoiceItem, InvoiceRecord};
