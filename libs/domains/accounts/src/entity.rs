use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Account;

/// Sea-ORM Entity for the accounts table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub claims: Vec<String>,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            claims: model.claims,
            failed_login_attempts: model.failed_login_attempts,
            locked_until: model.locked_until.map(|at| at.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<Account> for ActiveModel {
    fn from(account: Account) -> Self {
        ActiveModel {
            id: Set(account.id),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            claims: Set(account.claims),
            failed_login_attempts: Set(account.failed_login_attempts),
            locked_until: Set(account.locked_until.map(|at| at.fixed_offset())),
            created_at: Set(account.created_at.fixed_offset()),
            updated_at: Set(account.updated_at.fixed_offset()),
        }
    }
}
