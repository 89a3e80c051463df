//! SurrealDB implementation of [`UserRepository`].
//!
//! Users arrive with their password already hashed; this layer only
//! stores the PHC string.

use chrono::{DateTime, Utc};
use innkeep_core::error::InnkeepResult;
use innkeep_core::models::user::{CreateUser, User};
use innkeep_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

/// DB-side row struct; the record ID comes back via `record::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRow {
    record_id: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, DbError> {
        Ok(User {
            id: parse_uuid(&self.record_id, "user")?,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
        })
    }
}

const SELECT_USER: &str = "SELECT record::id(id) AS record_id, * FROM";

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch_one(
        &self,
        query: &str,
        key: &'static str,
        value: String,
    ) -> Result<User, DbError> {
        let mut result = self
            .db
            .query(query)
            .bind((key, value.clone()))
            .await?;

        let rows: Vec<UserRow> = result.take(0)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("{key}={value}"),
        })?;

        row.try_into_user()
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> InnkeepResult<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(format!(
                "CREATE type::record('user', $id) SET \
                 email = $email, \
                 password_hash = $password_hash, \
                 first_name = $first_name, \
                 last_name = $last_name \
                 RETURN NONE; \
                 {SELECT_USER} type::record('user', $id);"
            ))
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("password_hash", input.password_hash))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            if e.to_string().contains("idx_user_email") {
                DbError::Duplicate {
                    entity: "user".into(),
                }
            } else {
                DbError::Surreal(e)
            }
        })?;

        let rows: Vec<UserRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.try_into_user()?)
    }

    async fn get_by_id(&self, id: Uuid) -> InnkeepResult<User> {
        Ok(self
            .fetch_one(
                &format!("{SELECT_USER} type::record('user', $id)"),
                "id",
                id.to_string(),
            )
            .await?)
    }

    async fn get_by_email(&self, email: &str) -> InnkeepResult<User> {
        Ok(self
            .fetch_one(
                &format!("{SELECT_USER} user WHERE email = $email"),
                "email",
                email.to_string(),
            )
            .await?)
    }
}
