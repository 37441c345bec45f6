//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{AccountStatus, NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, UserId>>>,
    next_id: AtomicU64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a repository with already persisted users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map = HashMap::new();
        let mut email_map = HashMap::new();
        let mut max_id = 0;

        for user in users {
            max_id = max_id.max(user.id().value());
            email_map.insert(user.email().to_string(), user.id());
            users_map.insert(user.id(), user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            email_index: Arc::new(RwLock::new(email_map)),
            next_id: AtomicU64::new(max_id + 1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        // Writers lock users before the index; never hold the index while
        // waiting on users.
        let user_id = self.email_index.read().await.get(email).copied();
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if email_index.contains_key(&user.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                user.email
            )));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let user = user.into_user(id);

        email_index.insert(user.email().to_string(), id);
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        let id = user.id();

        let old_email = match users.get(&id) {
            Some(old_user) => old_user.email().to_string(),
            None => return Err(DomainError::not_found(format!("User '{}' not found", id))),
        };
        let new_email = user.email().to_string();

        // If email changed, check uniqueness and update index
        if old_email != new_email {
            if email_index.contains_key(&new_email) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already registered",
                    new_email
                )));
            }

            email_index.remove(&old_email);
            email_index.insert(new_email, id);
        }

        let mut stored = user.clone();
        stored.mark_modified(Utc::now());
        users.insert(id, stored.clone());

        Ok(stored)
    }

    async fn list(&self, status: Option<AccountStatus>) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|u| status.is_none_or(|s| u.account_status() == s))
            .cloned()
            .collect();
        result.sort_by_key(|u| u.id());

        Ok(result)
    }

    async fn count(&self, status: Option<AccountStatus>) -> Result<usize, DomainError> {
        let users = self.users.read().await;

        Ok(users
            .values()
            .filter(|u| status.is_none_or(|s| u.account_status() == s))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::AuthSubject;
    use std::time::Duration;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            firstname: "Test".to_string(),
            lastname: "Reader".to_string(),
            date_of_birth: None,
            email: email.to_string(),
            password: "hashed_password".to_string(),
            roles: Vec::new(),
            enabled: false,
            account_locked: false,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("one@example.com")).await.unwrap();
        let second = repo.create(new_user("two@example.com")).await.unwrap();

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
        assert!(first.last_modified_date().is_none());
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("reader@example.com")).await.unwrap();

        let retrieved = repo.get_by_email("reader@example.com").await.unwrap();
        assert_eq!(retrieved.unwrap().id(), created.id());

        assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_uniqueness_on_create() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("reader@example.com")).await.unwrap();

        let result = repo.create(new_user("reader@example.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(repo.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_email_index() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo.create(new_user("old@example.com")).await.unwrap();

        user.set_email("new@example.com");
        let updated = repo.update(&user).await.unwrap();

        assert_eq!(updated.login_identifier(), "new@example.com");
        assert!(repo.get_by_email("old@example.com").await.unwrap().is_none());
        assert!(repo.get_by_email("new@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("taken@example.com")).await.unwrap();
        let mut user = repo.create(new_user("mine@example.com")).await.unwrap();

        user.set_email("taken@example.com");
        let result = repo.update(&user).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        let stored = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(stored.email(), "mine@example.com");
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let ghost = new_user("ghost@example.com").into_user(UserId::new(42));

        let result = repo.update(&ghost).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_stamps_last_modified_after_creation() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo.create(new_user("reader@example.com")).await.unwrap();

        user.enable();
        let first = repo.update(&user).await.unwrap();
        let first_modified = first.last_modified_date().unwrap();
        assert!(first.created_date() <= first_modified);

        let second = repo.update(&first).await.unwrap();
        assert!(second.last_modified_date().unwrap() >= first_modified);
        assert_eq!(second.created_date(), first.created_date());
    }

    #[tokio::test]
    async fn test_list_and_count_by_status() {
        let repo = InMemoryUserRepository::new();

        let mut active = repo.create(new_user("active@example.com")).await.unwrap();
        active.enable();
        repo.update(&active).await.unwrap();

        let mut locked = repo.create(new_user("locked@example.com")).await.unwrap();
        locked.enable();
        locked.lock();
        repo.update(&locked).await.unwrap();

        repo.create(new_user("pending@example.com")).await.unwrap();

        assert_eq!(repo.count(None).await.unwrap(), 3);
        assert_eq!(repo.count(Some(AccountStatus::Active)).await.unwrap(), 1);
        assert_eq!(repo.count(Some(AccountStatus::Locked)).await.unwrap(), 1);
        assert_eq!(repo.count(Some(AccountStatus::Disabled)).await.unwrap(), 1);

        let all = repo.list(None).await.unwrap();
        let ids: Vec<u64> = all.iter().map(|u| u.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_with_users_continues_id_sequence() {
        let existing = new_user("seed@example.com").into_user(UserId::new(10));
        let repo = InMemoryUserRepository::with_users(vec![existing]);

        assert!(repo.email_exists("seed@example.com").await.unwrap());
        assert!(repo.exists(UserId::new(10)).await.unwrap());

        let created = repo.create(new_user("next@example.com")).await.unwrap();
        assert_eq!(created.id(), UserId::new(11));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_lookups_and_writes_complete() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let seed = repo.create(new_user("seed@example.com")).await.unwrap();

        let mut handles = Vec::new();
        for task in 0..16u32 {
            let repo = Arc::clone(&repo);
            let seed = seed.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..300u32 {
                    match task % 3 {
                        0 => {
                            let found = repo.get_by_email("seed@example.com").await.unwrap();
                            assert!(found.is_some());
                        }
                        1 => {
                            let email = format!("reader-{task}-{i}@example.com");
                            repo.create(new_user(&email)).await.unwrap();
                        }
                        _ => {
                            repo.update(&seed).await.unwrap();
                        }
                    }
                }
            }));
        }

        let all = async {
            for handle in handles {
                handle.await.unwrap();
            }
        };
        tokio::time::timeout(Duration::from_secs(20), all)
            .await
            .expect("concurrent repository access stalled");

        // 5 creating tasks (1, 4, 7, 10, 13) plus the seed
        assert_eq!(repo.count(None).await.unwrap(), 5 * 300 + 1);
    }
}
