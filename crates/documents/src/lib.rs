//! `clearbook-documents` — content models for generated PDFs.
//!
//! This crate produces the *content* of an invoice document or account
//! statement; the actual page layout and byte rendering belong to an external
//! PDF library fed from these shapes.

pub mod invoice_document;
pub mod statement;

pub use invoice_document::{DocumentLine, InvoiceDocument};
pub use statement::{AccountStatement, StatementLine};
