use serde::{Deserialize, Serialize};

use clearbook_core::{DomainError, DomainResult, SupplierId};

/// A validated supplier.
///
/// Suppliers own zero-or-more invoices (referenced by `supplier_id` on the
/// invoice side). The outstanding balance is derived by the receivables
/// aggregator and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Raw supplier record as received at the store boundary.
///
/// Unknown fields are tolerated and dropped; validation happens once, in
/// [`Supplier::from_record`], so downstream code can rely on the typed shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRecord {
    #[serde(default)]
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Supplier {
    /// Validate a raw record into a supplier with the given identity.
    pub fn from_record(id: SupplierId, record: SupplierRecord) -> DomainResult<Self> {
        let name = record.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("supplier name must not be empty"));
        }

        Ok(Self {
            id,
            name,
            contact_person: record.contact_person,
            email: record.email,
            phone: record.phone,
            address: record.address,
        })
    }
}
