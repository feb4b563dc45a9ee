use std::sync::Arc;
use uuid::Uuid;

use crate::error::{SupplierError, SupplierResult};
use crate::models::{Supplier, SupplierPayload};
use crate::repository::SupplierRepository;
use crate::unit_of_work::ChangeSet;
use crate::validation::validate;

/// Claim a caller needs to delete suppliers
pub const DELETE_CLAIM: &str = "suppliers:delete";

/// Composes the validation rules and the persistence gateway.
pub struct SupplierService<R: SupplierRepository> {
    repository: Arc<R>,
}

// Clones share the repository, so `R` itself need not be `Clone`
impl<R: SupplierRepository> Clone for SupplierService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: SupplierRepository> SupplierService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_suppliers(&self) -> SupplierResult<Vec<Supplier>> {
        self.repository.list_all().await
    }

    pub async fn get_supplier(&self, id: Uuid) -> SupplierResult<Supplier> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SupplierError::NotFound(id))
    }

    /// Validate, stage the insert and commit.
    pub async fn create_supplier(&self, payload: SupplierPayload) -> SupplierResult<Supplier> {
        validate(&payload)?;

        let supplier = Supplier::from_payload(payload.id_or_generate(), payload);

        let mut changes = ChangeSet::new();
        changes.insert(supplier.clone());
        self.commit(changes).await?;

        tracing::info!(supplier_id = %supplier.id, "Created supplier");
        Ok(supplier)
    }

    /// Replace the supplier stored under `id`.
    ///
    /// The target must exist before the body is validated; the route id
    /// wins over any id in the body.
    pub async fn update_supplier(&self, id: Uuid, payload: SupplierPayload) -> SupplierResult<()> {
        if !self.repository.exists(id).await? {
            return Err(SupplierError::NotFound(id));
        }

        validate(&payload)?;

        let mut changes = ChangeSet::new();
        changes.update(Supplier::from_payload(id, payload));
        self.commit(changes).await?;

        tracing::info!(supplier_id = %id, "Updated supplier");
        Ok(())
    }

    /// Remove the supplier. The caller's claim is checked by the handler.
    pub async fn delete_supplier(&self, id: Uuid) -> SupplierResult<()> {
        let supplier = self.get_supplier(id).await?;

        let mut changes = ChangeSet::new();
        changes.remove(&supplier);
        self.commit(changes).await?;

        tracing::info!(supplier_id = %id, "Deleted supplier");
        Ok(())
    }

    async fn commit(&self, changes: ChangeSet) -> SupplierResult<u64> {
        match self.repository.commit(changes).await? {
            0 => {
                tracing::warn!("Supplier commit affected no rows");
                Err(SupplierError::NotPersisted)
            }
            affected => Ok(affected),
        }
    }
}
