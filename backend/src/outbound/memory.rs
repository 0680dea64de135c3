//! Process-local `UserRepository` used when no database is configured.
//!
//! Data lives for the lifetime of the process. Identifiers start at 1 and
//! are never reused, mirroring a `BIGSERIAL` column.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserProfile};

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    users: BTreeMap<i64, UserProfile>,
}

/// In-memory implementation of the [`UserRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .users
            .iter()
            .map(|(id, profile)| User::new(UserId::new(*id), profile.clone()))
            .collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .users
            .get(&id.get())
            .map(|profile| User::new(id, profile.clone())))
    }

    async fn create_user(&self, profile: &UserProfile) -> Result<UserId, UserPersistenceError> {
        let mut store = self.lock()?;
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        store.last_id = next;
        store.users.insert(next, profile.clone());
        Ok(UserId::new(next))
    }

    async fn update_user(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<u64, UserPersistenceError> {
        let mut store = self.lock()?;
        match store.users.get_mut(&id.get()) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserProfileDraft;
    use actix_rt::System;
    use rstest::{fixture, rstest};

    fn profile(firstname: &str) -> UserProfile {
        UserProfile::try_from(UserProfileDraft {
            firstname: Some(firstname.to_owned()),
            lastname: Some("Doe".to_owned()),
            email: Some("doe@wild.co".to_owned()),
            city: Some("Cambridge".to_owned()),
            language: Some("english".to_owned()),
        })
        .expect("valid profile")
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    fn ids_are_assigned_sequentially_and_listed_in_order(repo: InMemoryUserRepository) {
        System::new().block_on(async move {
            let first = repo.create_user(&profile("John")).await.expect("create");
            let second = repo.create_user(&profile("Jane")).await.expect("create");

            assert_eq!(first, UserId::new(1));
            assert_eq!(second, UserId::new(2));

            let users = repo.list_users().await.expect("list");
            let names: Vec<_> = users.iter().map(|u| u.profile().firstname()).collect();
            assert_eq!(names, ["John", "Jane"]);
        });
    }

    #[rstest]
    fn get_returns_none_for_unknown_id(repo: InMemoryUserRepository) {
        System::new().block_on(async move {
            let found = repo.get_user(UserId::new(99)).await.expect("get");
            assert!(found.is_none());
        });
    }

    #[rstest]
    fn update_replaces_profile_and_reports_match(repo: InMemoryUserRepository) {
        System::new().block_on(async move {
            let id = repo.create_user(&profile("John")).await.expect("create");

            let matched = repo.update_user(id, &profile("Johnny")).await.expect("update");
            assert_eq!(matched, 1);

            let again = repo.update_user(id, &profile("Johnny")).await.expect("update");
            assert_eq!(again, 1);

            let user = repo.get_user(id).await.expect("get").expect("present");
            assert_eq!(user.profile().firstname(), "Johnny");
        });
    }

    #[rstest]
    fn update_of_unknown_id_matches_nothing(repo: InMemoryUserRepository) {
        System::new().block_on(async move {
            let matched = repo
                .update_user(UserId::new(5), &profile("Ghost"))
                .await
                .expect("update");
            assert_eq!(matched, 0);
            assert!(repo.list_users().await.expect("list").is_empty());
        });
    }
}
