//! `clearbook-api` — HTTP surface for the receivables dashboard.

pub mod app;
