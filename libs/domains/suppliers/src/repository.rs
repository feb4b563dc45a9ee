use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SupplierError, SupplierResult};
use crate::models::Supplier;
use crate::unit_of_work::{Change, ChangeSet};

/// Persistence gateway for suppliers.
///
/// Reads go straight to storage. Writes are staged in a [`ChangeSet`] and
/// applied atomically by [`SupplierRepository::commit`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    /// `None` when no supplier has this id
    async fn find_by_id(&self, id: Uuid) -> SupplierResult<Option<Supplier>>;

    /// Key-only lookup; nothing is loaded or kept around
    async fn exists(&self, id: Uuid) -> SupplierResult<bool>;

    /// Every supplier, in storage order
    async fn list_all(&self) -> SupplierResult<Vec<Supplier>>;

    /// Apply all staged changes in one transaction and return the number of
    /// affected rows. Store failures are reported as
    /// [`SupplierError::Persistence`].
    async fn commit(&self, changes: ChangeSet) -> SupplierResult<u64>;
}

/// In-memory implementation of SupplierRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySupplierRepository {
    suppliers: Arc<RwLock<Vec<Supplier>>>,
}

impl InMemorySupplierRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-loaded with `suppliers`
    pub fn with_suppliers(suppliers: Vec<Supplier>) -> Self {
        Self {
            suppliers: Arc::new(RwLock::new(suppliers)),
        }
    }
}

fn apply(rows: &mut Vec<Supplier>, change: Change) -> SupplierResult<u64> {
    match change {
        Change::Insert(supplier) => {
            if rows.iter().any(|s| s.id == supplier.id) {
                return Err(SupplierError::Persistence(format!(
                    "duplicate key value violates unique constraint: id={}",
                    supplier.id
                )));
            }
            rows.push(supplier);
            Ok(1)
        }
        Change::Update(supplier) => match rows.iter_mut().find(|s| s.id == supplier.id) {
            Some(row) => {
                *row = supplier;
                Ok(1)
            }
            None => Ok(0),
        },
        Change::Remove(id) => {
            let before = rows.len();
            rows.retain(|s| s.id != id);
            Ok((before - rows.len()) as u64)
        }
    }
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn find_by_id(&self, id: Uuid) -> SupplierResult<Option<Supplier>> {
        let suppliers = self.suppliers.read().await;
        Ok(suppliers.iter().find(|s| s.id == id).cloned())
    }

    async fn exists(&self, id: Uuid) -> SupplierResult<bool> {
        let suppliers = self.suppliers.read().await;
        Ok(suppliers.iter().any(|s| s.id == id))
    }

    async fn list_all(&self) -> SupplierResult<Vec<Supplier>> {
        Ok(self.suppliers.read().await.clone())
    }

    async fn commit(&self, changes: ChangeSet) -> SupplierResult<u64> {
        let mut suppliers = self.suppliers.write().await;

        // Work on a copy so a failing change leaves storage untouched
        let mut working = suppliers.clone();
        let mut affected = 0;
        for change in changes {
            affected += apply(&mut working, change)?;
        }

        *suppliers = working;
        tracing::debug!(affected, "Committed supplier changes");
        Ok(affected)
    }
}
