use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QuerySelect, SqlErr, Statement,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{AccountError, AccountResult},
    models::{Account, LoginState, normalize_email},
    repository::AccountRepository,
};

/// PostgreSQL implementation of AccountRepository.
#[derive(Clone)]
pub struct PgAccountRepository {
    db: DatabaseConnection,
}

impl PgAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> AccountError {
    AccountError::Internal(format!("Database error: {}", e))
}

#[derive(Debug, FromQueryResult)]
struct LoginStateRow {
    failed_login_attempts: i32,
    locked_until: Option<DateTimeWithTimeZone>,
}

impl From<LoginStateRow> for LoginState {
    fn from(row: LoginStateRow) -> Self {
        Self {
            failed_login_attempts: row.failed_login_attempts,
            locked_until: row.locked_until.map(|at| at.with_timezone(&Utc)),
        }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        let found = entity::Entity::find()
            .select_only()
            .column(entity::Column::Id)
            .filter(entity::Column::Email.eq(normalize_email(email)))
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(found.is_some())
    }

    async fn create(&self, account: Account) -> AccountResult<Account> {
        let email = account.email.clone();
        let model = entity::ActiveModel::from(account)
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AccountError::DuplicateEmail(email),
                _ => db_error(e),
            })?;

        Ok(model.into())
    }

    async fn record_failed_login(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        max_attempts: i32,
        lock_until: DateTime<Utc>,
    ) -> AccountResult<LoginState> {
        // SET expressions all read the pre-update row
        let sql = r#"
            UPDATE accounts SET
                failed_login_attempts = CASE
                    WHEN locked_until IS NOT NULL AND locked_until <= $1 THEN 1
                    ELSE failed_login_attempts + 1
                END,
                locked_until = CASE
                    WHEN locked_until > $1 THEN locked_until
                    WHEN (CASE
                        WHEN locked_until IS NOT NULL AND locked_until <= $1 THEN 1
                        ELSE failed_login_attempts + 1
                    END) >= $2 THEN $3
                    ELSE NULL
                END
            WHERE id = $4
            RETURNING failed_login_attempts, locked_until
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                now.into(),
                max_attempts.into(),
                lock_until.into(),
                id.into(),
            ],
        );

        let row = LoginStateRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AccountError::Internal(format!("Account {} not found", id)))?;

        Ok(row.into())
    }

    async fn reset_login_state(&self, id: Uuid) -> AccountResult<()> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::FailedLoginAttempts, Expr::value(0))
            .col_expr(
                entity::Column::LockedUntil,
                Expr::value(Option::<DateTimeWithTimeZone>::None),
            )
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(AccountError::Internal(format!("Account {} not found", id)));
        }

        Ok(())
    }
}
