//! PostgreSQL Account Repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, Email, SessionToken, UserPassword};
use crate::error::{AuthError, AuthResult};

const ACCOUNT_COLUMNS: &str = r#"
    account_id,
    email,
    first_name,
    last_name,
    password_hash,
    token,
    token_expires_at,
    is_admin,
    created_on,
    modified_on
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, bind: FilterValue<'_>) -> AuthResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {filter} = $1");
        let query = sqlx::query_as::<_, AccountRow>(&sql);

        let row = match bind {
            FilterValue::Id(id) => query.bind(id).fetch_optional(&self.pool).await?,
            FilterValue::Text(text) => query.bind(text).fetch_optional(&self.pool).await?,
        };

        Ok(row.map(AccountRow::into_account))
    }
}

enum FilterValue<'a> {
    Id(i64),
    Text(&'a str),
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &NewAccount) -> AuthResult<Account> {
        let sql = format!(
            r#"
            INSERT INTO accounts (
                email,
                first_name,
                last_name,
                password_hash,
                is_admin,
                created_on
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account.email.as_str())
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.password_hash.as_str())
            .bind(account.is_admin)
            .bind(account.created_on)
            .fetch_one(&self.pool)
            .await
            .map_err(email_conflict)?;

        Ok(row.into_account())
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        self.find_one("account_id", FilterValue::Id(account_id.value()))
            .await
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        self.find_one("email", FilterValue::Text(email)).await
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Account>> {
        self.find_one("token", FilterValue::Text(token)).await
    }

    async fn save(&self, account: &Account, now: DateTime<Utc>) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        // An expired holder of the same string gives it up; a live one keeps
        // it and trips `accounts_token_key` below
        if let Some(token) = &account.token {
            sqlx::query(
                r#"
                UPDATE accounts SET
                    token = NULL,
                    token_expires_at = NULL
                WHERE token = $1
                  AND account_id <> $2
                  AND (token_expires_at IS NULL OR token_expires_at <= $3)
                "#,
            )
            .bind(token.as_str())
            .bind(account.account_id.value())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                email = $2,
                first_name = $3,
                last_name = $4,
                password_hash = $5,
                token = $6,
                token_expires_at = $7,
                modified_on = $8
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.value())
        .bind(account.email.as_str())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.password_hash.as_str())
        .bind(account.token.as_ref().map(SessionToken::as_str))
        .bind(account.token_expires_at)
        .bind(account.modified_on)
        .execute(&mut *tx)
        .await
        .map_err(save_conflict)?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::AccountNotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, account_id: AccountId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM accounts WHERE account_id = $1")
            .bind(account_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// Unique violation on `accounts_email_key` means the email is taken
fn email_conflict(e: sqlx::Error) -> AuthError {
    save_conflict(e)
}

/// Map unique violations raised by an account write to domain errors
fn save_conflict(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            match db.constraint() {
                Some("accounts_email_key") => return AuthError::EmailTaken,
                Some("accounts_token_key") => return AuthError::TokenCollision,
                _ => {}
            }
        }
    }
    AuthError::Database(e)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: i64,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    token: Option<String>,
    token_expires_at: Option<DateTime<Utc>>,
    is_admin: bool,
    created_on: DateTime<Utc>,
    modified_on: Option<DateTime<Utc>>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: AccountId::new(self.account_id),
            email: Email::from_db(self.email),
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: UserPassword::from_db(self.password_hash),
            token: self.token.map(SessionToken::from_db),
            token_expires_at: self.token_expires_at,
            is_admin: self.is_admin,
            created_on: self.created_on,
            modified_on: self.modified_on,
        }
    }
}
