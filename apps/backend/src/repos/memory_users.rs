//! In-process `UserStore` for tests and database-less runs.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;

use super::users::{NewUser, User, UserStore};
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    by_email: DashMap<String, User>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.by_email.get(email).map(|entry| entry.value().clone()))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        new_user.check()?;

        // The shard lock held by `entry` makes check-and-insert atomic.
        match self.by_email.entry(new_user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            )),
            Entry::Vacant(slot) => {
                let user = User {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    display_name: new_user.display_name,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    created_at: OffsetDateTime::now_utc(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn user(email: &str) -> NewUser {
        NewUser::new("Jane Doe", email, "$2b$04$hash")
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryUserStore::new();
        let a = store.create(user("a@x.com")).await.unwrap();
        let b = store.create(user("b@x.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_is_conflict_and_original_kept() {
        let store = MemoryUserStore::new();
        store.create(user("jane@x.com")).await.unwrap();

        let err = store
            .create(NewUser::new("Impostor", "jane@x.com", "$2b$04$other"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));

        let kept = store.find_by_email("jane@x.com").await.unwrap().unwrap();
        assert_eq!(kept.display_name, "Jane Doe");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_creates_have_single_winner() {
        let store = Arc::new(MemoryUserStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(user("race@x.com")).await })
            })
            .collect();

        let mut winners = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let store = MemoryUserStore::new();
        store.create(user("jane@x.com")).await.unwrap();
        assert!(store.find_by_email("JANE@x.com").await.unwrap().is_none());
    }
}
