//! Credential store: the `UserStore` seam plus its sea-orm implementation.

use std::fmt;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use time::OffsetDateTime;

use crate::adapters::users_sea::{self as users_adapter, UserCreate};
use crate::errors::domain::DomainError;
use crate::validation::{validate_display_name, validate_email};

/// A registered user. Immutable once created.
#[derive(Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("email", &crate::logging::pii::Redacted(&self.email))
            .field("password_hash", &"[REDACTED_HASH]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input to [`UserStore::create`]; `password_hash` is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Format constraints the store enforces regardless of caller.
    pub(crate) fn check(&self) -> Result<(), DomainError> {
        let fields: Vec<_> = validate_display_name(&self.display_name)
            .into_iter()
            .chain(validate_email(&self.email))
            .collect();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(fields))
        }
    }
}

impl From<NewUser> for UserCreate {
    fn from(new_user: NewUser) -> Self {
        UserCreate::new(new_user.display_name, new_user.email, new_user.password_hash)
    }
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            display_name: model.display_name,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup; emails are not normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user. `Conflict(UniqueEmail)` if the email is taken,
    /// including when a concurrent writer got there first.
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Short name for health output.
    fn backend(&self) -> &'static str;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// `UserStore` over a sea-orm connection (Postgres or SQLite).
#[derive(Debug, Clone)]
pub struct SeaUserStore {
    conn: DatabaseConnection,
}

impl SeaUserStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStore for SeaUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = users_adapter::find_user_by_email(&self.conn, email).await?;
        Ok(user.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        new_user.check()?;
        // Uniqueness is left to the unique index so racing inserts cannot both win.
        let user = users_adapter::create_user(&self.conn, new_user.into()).await?;
        Ok(User::from(user))
    }

    fn backend(&self) -> &'static str {
        match self.conn.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => "postgres",
            sea_orm::DatabaseBackend::Sqlite => "sqlite",
            _ => "sql",
        }
    }

    async fn ping(&self) -> Result<(), DomainError> {
        migration::ping(&self.conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::domain::ConflictKind;
    use crate::infra::db::bootstrap_db;

    async fn store() -> SeaUserStore {
        SeaUserStore::new(bootstrap_db("sqlite::memory:").await.unwrap())
    }

    fn jane() -> NewUser {
        NewUser::new("Jane Doe", "jane@x.com", "$2b$04$notarealhashbutnotplaintexteither")
    }

    #[tokio::test]
    async fn create_then_find() {
        let store = store().await;
        let created = store.create(jane()).await.unwrap();
        assert!(created.id > 0);

        let found = store.find_by_email("jane@x.com").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.display_name, "Jane Doe");
    }

    #[tokio::test]
    async fn find_is_exact_match() {
        let store = store().await;
        store.create(jane()).await.unwrap();
        assert!(store.find_by_email("Jane@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let store = store().await;
        store.create(jane()).await.unwrap();

        let err = store
            .create(NewUser::new("Other Jane", "jane@x.com", "$2b$04$different"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
    }

    #[tokio::test]
    async fn concurrent_creates_yield_one_winner() {
        let store = Arc::new(store().await);
        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.create(jane()).await }));
        }

        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DomainError::Conflict(ConflictKind::UniqueEmail, _)) => {}
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(ok, 1);
    }

    #[tokio::test]
    async fn rejects_bad_shape_before_insert() {
        let store = store().await;
        let err = store
            .create(NewUser::new("J", "not-an-email", "$2b$04$x"))
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_backend_and_pings() {
        let store = store().await;
        assert_eq!(store.backend(), "sqlite");
        store.ping().await.unwrap();
    }

    #[test]
    fn debug_hides_hash() {
        let user = User {
            id: 1,
            display_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            password_hash: "$2b$04$secret".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("jane@x.com"));
    }
}
