use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{SupplierError, SupplierResult},
    models::Supplier,
    repository::SupplierRepository,
    unit_of_work::{Change, ChangeSet},
};

/// PostgreSQL implementation of SupplierRepository.
#[derive(Clone)]
pub struct PgSupplierRepository {
    db: DatabaseConnection,
}

impl PgSupplierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn read_error(e: DbErr) -> SupplierError {
    SupplierError::Internal(format!("Database error: {}", e))
}

fn commit_error(e: DbErr) -> SupplierError {
    SupplierError::Persistence(format!("Database error: {}", e))
}

#[async_trait]
impl SupplierRepository for PgSupplierRepository {
    async fn find_by_id(&self, id: Uuid) -> SupplierResult<Option<Supplier>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error)?;

        Ok(model.map(Into::into))
    }

    async fn exists(&self, id: Uuid) -> SupplierResult<bool> {
        let found = entity::Entity::find_by_id(id)
            .select_only()
            .column(entity::Column::Id)
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await
            .map_err(read_error)?;

        Ok(found.is_some())
    }

    async fn list_all(&self) -> SupplierResult<Vec<Supplier>> {
        let models = entity::Entity::find()
            .all(&self.db)
            .await
            .map_err(read_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn commit(&self, changes: ChangeSet) -> SupplierResult<u64> {
        let txn = self.db.begin().await.map_err(commit_error)?;
        let mut affected = 0;

        // Dropping `txn` on an early return rolls back
        for change in changes {
            affected += match change {
                Change::Insert(supplier) => {
                    entity::Entity::insert(entity::ActiveModel::from(supplier))
                        .exec_without_returning(&txn)
                        .await
                        .map_err(commit_error)?
                }
                Change::Update(supplier) => {
                    let id = supplier.id;
                    entity::Entity::update_many()
                        .set(entity::ActiveModel::for_update(supplier))
                        .filter(entity::Column::Id.eq(id))
                        .exec(&txn)
                        .await
                        .map_err(commit_error)?
                        .rows_affected
                }
                Change::Remove(id) => {
                    entity::Entity::delete_by_id(id)
                        .exec(&txn)
                        .await
                        .map_err(commit_error)?
                        .rows_affected
                }
            };
        }

        txn.commit().await.map_err(commit_error)?;

        tracing::debug!(affected, "Committed supplier changes");
        Ok(affected)
    }
}
