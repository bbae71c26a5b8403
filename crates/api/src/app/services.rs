//! In-memory snapshot store behind the HTTP handlers.
//!
//! Stands in for the external data store: plain record collections guarded by
//! locks, validated once on the way in. Aggregations always run over cloned
//! snapshots, so concurrent dashboard requests share nothing.

use std::sync::RwLock;

use clearbook_core::{DomainError, DomainResult, InvoiceId, SupplierId};
use clearbook_invoicing::{Invoice, InvoiceRecord};
use clearbook_suppliers::{Supplier, SupplierRecord};

/// Application services: supplier and invoice stores.
///
/// Insertion order is preserved; the revenue ranking's tie-break and the
/// statement's line order both follow it.
#[derive(Debug, Default)]
pub struct AppServices {
    suppliers: RwLock<Vec<Supplier>>,
    invoices: RwLock<Vec<Invoice>>,
}

impl AppServices {
    pub fn new() -> Self {
        Self::default()
    }

    // --- suppliers ---

    pub fn supplier_create(&self, record: SupplierRecord) -> DomainResult<Supplier> {
        let supplier = Supplier::from_record(SupplierId::new(), record)?;
        self.suppliers
            .write()
            .expect("supplier store poisoned")
            .push(supplier.clone());
        tracing::info!(supplier_id = %supplier.id, "supplier created");
        Ok(supplier)
    }

    pub fn suppliers_list(&self) -> Vec<Supplier> {
        self.suppliers.read().expect("supplier store poisoned").clone()
    }

    pub fn supplier_get(&self, id: SupplierId) -> Option<Supplier> {
        self.suppliers
            .read()
            .expect("supplier store poisoned")
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn supplier_update(&self, id: SupplierId, record: SupplierRecord) -> DomainResult<Supplier> {
        let updated = Supplier::from_record(id, record)?;
        let mut suppliers = self.suppliers.write().expect("supplier store poisoned");
        let slot = suppliers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::NotFound)?;
        *slot = updated.clone();
        Ok(updated)
    }

    /// Delete a supplier. Blocks while unpaid invoices still reference it;
    /// the receivable has to be settled or voided first.
    pub fn supplier_delete(&self, id: SupplierId) -> DomainResult<()> {
        let has_open_invoices = self
            .invoices
            .read()
            .expect("invoice store poisoned")
            .iter()
            .any(|i| i.supplier_id == id && !i.is_paid);
        if has_open_invoices {
            return Err(DomainError::conflict(
                "supplier has unpaid invoices outstanding",
            ));
        }

        let mut suppliers = self.suppliers.write().expect("supplier store poisoned");
        let before = suppliers.len();
        suppliers.retain(|s| s.id != id);
        if suppliers.len() == before {
            return Err(DomainError::NotFound);
        }
        tracing::info!(supplier_id = %id, "supplier deleted");
        Ok(())
    }

    // --- invoices ---

    pub fn invoice_create(&self, record: InvoiceRecord) -> DomainResult<Invoice> {
        let invoice = Invoice::from_record(InvoiceId::new(), record)?;
        if self.supplier_get(invoice.supplier_id).is_none() {
            return Err(DomainError::validation(format!(
                "unknown supplierId: {}",
                invoice.supplier_id
            )));
        }
        self.invoices
            .write()
            .expect("invoice store poisoned")
            .push(invoice.clone());
        tracing::info!(invoice_id = %invoice.id, supplier_id = %invoice.supplier_id, "invoice created");
        Ok(invoice)
    }

    pub fn invoices_list(&self, supplier_id: Option<SupplierId>) -> Vec<Invoice> {
        self.invoices
            .read()
            .expect("invoice store poisoned")
            .iter()
            .filter(|i| supplier_id.is_none_or(|sid| i.supplier_id == sid))
            .cloned()
            .collect()
    }

    pub fn invoice_get(&self, id: InvoiceId) -> Option<Invoice> {
        self.invoices
            .read()
            .expect("invoice store poisoned")
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    pub fn invoice_update(&self, id: InvoiceId, record: InvoiceRecord) -> DomainResult<Invoice> {
        let updated = Invoice::from_record(id, record)?;
        if self.supplier_get(updated.supplier_id).is_none() {
            return Err(DomainError::validation(format!(
                "unknown supplierId: {}",
                updated.supplier_id
            )));
        }
        let mut invoices = self.invoices.write().expect("invoice store poisoned");
        let slot = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::NotFound)?;
        *slot = updated.clone();
        Ok(updated)
    }

    pub fn invoice_delete(&self, id: InvoiceId) -> DomainResult<()> {
        let mut invoices = self.invoices.write().expect("invoice store poisoned");
        let before = invoices.len();
        invoices.retain(|i| i.id != id);
        if invoices.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    /// Clone both collections for an aggregation pass.
    pub fn snapshot(&self) -> (Vec<Supplier>, Vec<Invoice>) {
        (self.suppliers_list(), self.invoices_list(None))
    }
}
