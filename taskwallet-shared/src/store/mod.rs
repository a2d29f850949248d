//! The platform store
//!
//! All data lives in one [`State`] behind a single async lock. Reads take a
//! shared guard; every mutation takes the exclusive guard, runs one `State`
//! operation and then hands the new state to the configured
//! [`SnapshotStore`]. A failed snapshot write is logged and otherwise
//! ignored: the in-memory state stays authoritative.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskwallet_shared::store::{snapshot::MemorySnapshotStore, Store};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::open(Arc::new(MemorySnapshotStore::new())).await?;
//!
//! let user = store.login("01700000000", "123456").await?;
//! let tasks = store.read(|s| s.tasks_for(user.id)).await?;
//! let first = tasks[0].id;
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod admin;
pub mod payouts;
pub mod premium;
pub mod quiz;
pub mod seed;
pub mod snapshot;
pub mod state;
pub mod tasks;
pub mod tickets;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::error::{StoreError, StoreResult};
use crate::models::user::{NewUser, UserProfile};

pub use admin::AdminStats;
pub use payouts::{RequestJobWithdrawal, RequestWithdrawal};
pub use premium::RequestPremium;
pub use quiz::{QuizOutcome, QuizView};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotError, SnapshotStore};
pub use state::State;
pub use tasks::SubmitTask;

/// Registration input with the plaintext password
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub ref_code: String,
}

pub struct Store {
    state: RwLock<State>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl Store {
    /// Loads the last snapshot, or seeds demo data if there is none
    ///
    /// A snapshot that cannot be read is logged and replaced by the seed.
    pub async fn open(snapshots: Arc<dyn SnapshotStore>) -> StoreResult<Self> {
        let state = match snapshots.load().await {
            Ok(Some(state)) => {
                info!(
                    backend = %snapshots.describe(),
                    users = state.users.len(),
                    ledger_entries = state.ledger.len(),
                    "Store restored from snapshot"
                );
                if !state.ledger.verify_chain() {
                    warn!(backend = %snapshots.describe(), "Ledger hash chain does not verify");
                }
                state
            }
            Ok(None) => {
                info!(backend = %snapshots.describe(), "No snapshot found, seeding demo data");
                seed::seed_state()?
            }
            Err(err) => {
                warn!(
                    backend = %snapshots.describe(),
                    error = %err,
                    "Snapshot unreadable, seeding demo data"
                );
                seed::seed_state()?
            }
        };

        Ok(Self::with_state(state, snapshots))
    }

    pub fn with_state(state: State, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            state: RwLock::new(state),
            snapshots,
        }
    }

    /// Runs a query against the current state
    pub async fn read<T>(&self, f: impl FnOnce(&State) -> T) -> T {
        let state = self.state.read().await;
        f(&state)
    }

    /// Runs one state operation and persists the result if it succeeded
    ///
    /// The exclusive guard is held across the snapshot write so snapshots are
    /// saved in the order their mutations happened.
    pub async fn write<T>(
        &self,
        f: impl FnOnce(&mut State) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut state = self.state.write().await;
        let value = f(&mut state)?;

        if let Err(err) = self.snapshots.save(&state).await {
            warn!(backend = %self.snapshots.describe(), error = %err, "Failed to persist snapshot");
        }
        Ok(value)
    }

    pub async fn register(&self, data: Registration) -> StoreResult<UserProfile> {
        validate_password(&data.password)
            .map_err(|msg| StoreError::validation("password", msg))?;
        let password_hash = hash_password(&data.password)?;

        let user = self
            .write(|s| {
                s.register(NewUser {
                    name: data.name,
                    phone: data.phone,
                    email: data.email,
                    password_hash,
                    ref_code: data.ref_code,
                })
            })
            .await?;
        Ok(user.profile())
    }

    /// Checks phone and password; blocked members are refused
    pub async fn login(&self, phone: &str, password: &str) -> StoreResult<UserProfile> {
        let user = self
            .read(|s| s.user_by_phone(phone.trim()).cloned())
            .await
            .ok_or_else(|| StoreError::Unauthorized("Invalid phone or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(StoreError::Unauthorized(
                "Invalid phone or password".to_string(),
            ));
        }
        if user.is_blocked {
            return Err(StoreError::forbidden("Account is blocked. Contact admin."));
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user.profile())
    }

    pub async fn change_password(&self, user_id: Uuid, new_password: &str) -> StoreResult<()> {
        validate_password(new_password).map_err(|msg| StoreError::validation("password", msg))?;
        let password_hash = hash_password(new_password)?;
        self.write(|s| s.set_password_hash(user_id, password_hash))
            .await
    }

    /// Profile of a member who may use the API right now
    pub async fn active_profile(&self, user_id: Uuid) -> StoreResult<UserProfile> {
        let profile = self.read(|s| s.user(user_id).map(|u| u.profile())).await?;
        if profile.is_blocked {
            return Err(StoreError::forbidden("Account is blocked. Contact admin."));
        }
        Ok(profile)
    }

    /// The member's open quiz question
    ///
    /// Questions are not persisted, so this skips the snapshot write.
    pub async fn next_quiz(&self, user_id: Uuid) -> StoreResult<QuizView> {
        let mut state = self.state.write().await;
        state.next_quiz(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (Store, Arc<MemorySnapshotStore>) {
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let store = Store::open(snapshots.clone()).await.unwrap();
        (store, snapshots)
    }

    #[tokio::test]
    async fn test_open_seeds_when_empty() {
        let (store, snapshots) = store().await;

        assert_eq!(store.read(|s| s.users.len()).await, 2);
        assert_eq!(snapshots.save_count(), 0);
    }

    #[tokio::test]
    async fn test_write_persists_only_on_success() {
        let (store, snapshots) = store().await;

        let err = store
            .write(|s| s.delete_task(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(snapshots.save_count(), 0);

        let task_id = store.read(|s| s.tasks[0].id).await;
        store.write(|s| s.delete_task(task_id)).await.unwrap();
        assert_eq!(snapshots.save_count(), 1);
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let (store, _) = store().await;

        let user = store.login("01700000000", "123456").await.unwrap();
        assert_eq!(user.name, "Md. User");

        assert!(matches!(
            store.login("01700000000", "wrong1").await,
            Err(StoreError::Unauthorized(_))
        ));
        assert!(matches!(
            store.login("01999999999", "123456").await,
            Err(StoreError::Unauthorized(_))
        ));

        store.write(|s| s.set_blocked(user.id, true)).await.unwrap();
        assert_eq!(
            store.login("01700000000", "123456").await.unwrap_err(),
            StoreError::forbidden("Account is blocked. Contact admin.")
        );
        assert!(matches!(
            store.active_profile(user.id).await,
            Err(StoreError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_register_and_change_password() {
        let (store, _) = store().await;

        let err = store
            .register(Registration {
                name: "Rahim".to_string(),
                phone: "01911111111".to_string(),
                email: "rahim@example.com".to_string(),
                password: "123".to_string(),
                ref_code: "USER01".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));

        let profile = store
            .register(Registration {
                name: "Rahim".to_string(),
                phone: "01911111111".to_string(),
                email: "rahim@example.com".to_string(),
                password: "secret1".to_string(),
                ref_code: "USER01".to_string(),
            })
            .await
            .unwrap();

        store.change_password(profile.id, "secret2").await.unwrap();
        assert!(store.login("01911111111", "secret1").await.is_err());
        assert!(store.login("01911111111", "secret2").await.is_ok());
    }

    #[tokio::test]
    async fn test_next_quiz_does_not_persist() {
        let (store, snapshots) = store().await;
        let user = store.login("01700000000", "123456").await.unwrap();

        store.next_quiz(user.id).await.unwrap();
        assert_eq!(snapshots.save_count(), 0);
    }
}
