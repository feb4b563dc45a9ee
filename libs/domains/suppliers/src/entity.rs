use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::Supplier;

/// Sea-ORM Entity for the suppliers table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub document: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Supplier {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            document: model.document,
            is_active: model.is_active,
        }
    }
}

impl From<Supplier> for ActiveModel {
    fn from(supplier: Supplier) -> Self {
        ActiveModel {
            id: Set(supplier.id),
            name: Set(supplier.name),
            document: Set(supplier.document),
            is_active: Set(supplier.is_active),
        }
    }
}

impl ActiveModel {
    /// Every column except the key, for `UPDATE ... WHERE id = ?`
    pub fn for_update(supplier: Supplier) -> Self {
        ActiveModel {
            id: NotSet,
            ..supplier.into()
        }
    }
}
