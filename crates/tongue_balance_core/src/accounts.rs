//! crates/tongue_balance_core/src/accounts.rs
//!
//! The account service: a username -> account map and a current-session pointer,
//! both kept in a device's local storage.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{StoredAccount, TongueAnalysis, User};
use crate::ports::{CredentialHasher, PortError, PortResult};
use crate::storage::LocalStorage;

/// Local storage key holding the serialized account map.
pub const ACCOUNTS_KEY: &str = "shang_yi_users_db_v1";
/// Local storage key holding the username of the current session.
pub const SESSION_KEY: &str = "shang_yi_current_user";

type AccountMap = BTreeMap<String, StoredAccount>;

/// Keeps passwords exactly as typed. This is how the account map has always
/// been stored; `Argon2Hasher` in the api service is the hashed alternative.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextCredentials;

impl CredentialHasher for PlainTextCredentials {
    fn hash(&self, password: &str) -> PortResult<String> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        password == stored
    }
}

#[derive(Clone)]
pub struct AccountService {
    storage: LocalStorage,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountService {
    pub fn new(storage: LocalStorage, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { storage, hasher }
    }

    async fn load_accounts(&self) -> PortResult<AccountMap> {
        let Some(raw) = self.storage.get_item(ACCOUNTS_KEY).await? else {
            return Ok(AccountMap::new());
        };
        match serde_json::from_str(&raw) {
            Ok(accounts) => Ok(accounts),
            Err(e) => {
                warn!(
                    "Account map in scope {} is unreadable, starting empty: {}",
                    self.storage.scope(),
                    e
                );
                Ok(AccountMap::new())
            }
        }
    }

    async fn save_accounts(&self, accounts: &AccountMap) -> PortResult<()> {
        let raw = serde_json::to_string(accounts)
            .map_err(|e| PortError::Unexpected(format!("Failed to serialize accounts: {}", e)))?;
        self.storage.set_item(ACCOUNTS_KEY, &raw).await
    }

    /// Creates an account and makes it the current session.
    pub async fn signup(&self, username: &str, password: &str) -> PortResult<User> {
        let mut accounts = self.load_accounts().await?;
        if accounts.contains_key(username) {
            return Err(PortError::DuplicateAccount);
        }

        let account = StoredAccount {
            username: username.to_string(),
            password: self.hasher.hash(password)?,
            history: Vec::new(),
        };
        let user = account.sanitized();
        accounts.insert(username.to_string(), account);

        self.save_accounts(&accounts).await?;
        self.storage.set_item(SESSION_KEY, username).await?;
        debug!("Created account {}", username);
        Ok(user)
    }

    /// Checks the credentials and makes the account the current session.
    pub async fn login(&self, username: &str, password: &str) -> PortResult<User> {
        let accounts = self.load_accounts().await?;
        let account = accounts
            .get(username)
            .filter(|account| self.hasher.verify(password, &account.password))
            .ok_or(PortError::InvalidCredential)?;

        self.storage.set_item(SESSION_KEY, username).await?;
        Ok(account.sanitized())
    }

    pub async fn logout(&self) -> PortResult<()> {
        self.storage.remove_item(SESSION_KEY).await
    }

    /// The account the session pointer names, if both exist.
    pub async fn current_user(&self) -> PortResult<Option<User>> {
        let Some(username) = self.storage.get_item(SESSION_KEY).await? else {
            return Ok(None);
        };
        let accounts = self.load_accounts().await?;
        Ok(accounts.get(&username).map(StoredAccount::sanitized))
    }

    /// Replaces the stored history of `username`. Unknown usernames are ignored.
    pub async fn update_history(&self, username: &str, history: &[TongueAnalysis]) -> PortResult<()> {
        let mut accounts = self.load_accounts().await?;
        let Some(account) = accounts.get_mut(username) else {
            warn!("Ignoring history update for unknown account {}", username);
            return Ok(());
        };
        account.history = history.to_vec();
        self.save_accounts(&accounts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisFindings, Coating, Diet, Difficulty, Recommendations, SuggestedCourse, TongueBody};
    use crate::ports::KeyValueStore;
    use crate::storage::MemoryStore;

    fn service() -> (AccountService, LocalStorage) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let storage = LocalStorage::new(store, "device-1");
        (
            AccountService::new(storage.clone(), Arc::new(PlainTextCredentials)),
            storage,
        )
    }

    fn full_analysis(id: &str) -> TongueAnalysis {
        TongueAnalysis {
            id: id.to_string(),
            timestamp: 1_768_737_600_000,
            image_url: "data:image/jpeg;base64,/9j/".to_string(),
            symptoms: "poor sleep".to_string(),
            findings: AnalysisFindings {
                tongue_body: Some(TongueBody {
                    color: "Red".into(),
                    shape: "Thin".into(),
                    moisture: "Dry".into(),
                }),
                coating: Some(Coating {
                    color: "Yellow".into(),
                    thickness: "Thin".into(),
                    texture: "Dry".into(),
                }),
                pattern: Some("Yin Deficiency".into()),
                explanation: Some("Heat is drying the fluids.".into()),
                recommendations: Some(Recommendations {
                    diet: Some(Diet {
                        eat: vec!["pear".into(), "lily bulb".into()],
                        avoid: vec!["chili".into()],
                    }),
                    lifestyle: Some(vec!["sleep before 11pm".into()]),
                    exercise: Some("Ba Duan Jin".into()),
                }),
                suggested_course: Some(SuggestedCourse {
                    name: "Yin Nourishing Kitchen".into(),
                    description: "Cooling recipes.".into(),
                    difficulty: Difficulty::Intermediate,
                }),
            },
        }
    }

    #[tokio::test]
    async fn signup_rejects_existing_username_and_keeps_account() {
        let (accounts, _) = service();
        accounts.signup("mei", "first").await.unwrap();
        accounts
            .update_history("mei", &[full_analysis("1")])
            .await
            .unwrap();

        let err = accounts.signup("mei", "second").await.unwrap_err();
        assert!(matches!(err, PortError::DuplicateAccount));

        // Old password still works and the history survived.
        let user = accounts.login("mei", "first").await.unwrap();
        assert_eq!(user.history.len(), 1);
        assert!(matches!(
            accounts.login("mei", "second").await,
            Err(PortError::InvalidCredential)
        ));
    }

    #[tokio::test]
    async fn login_sets_session_and_hides_password() {
        let (accounts, storage) = service();
        accounts.signup("mei", "pw").await.unwrap();
        accounts.logout().await.unwrap();

        let user = accounts.login("mei", "pw").await.unwrap();
        let value = serde_json::to_value(&user).unwrap();

        assert!(value.get("password").is_none());
        assert_eq!(
            storage.get_item(SESSION_KEY).await.unwrap().as_deref(),
            Some("mei")
        );
    }

    #[tokio::test]
    async fn login_fails_for_unknown_user_or_wrong_password() {
        let (accounts, storage) = service();
        accounts.signup("mei", "pw").await.unwrap();
        accounts.logout().await.unwrap();

        assert!(matches!(
            accounts.login("lan", "pw").await,
            Err(PortError::InvalidCredential)
        ));
        assert!(matches!(
            accounts.login("mei", "nope").await,
            Err(PortError::InvalidCredential)
        ));
        assert_eq!(storage.get_item(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_clears_current_user() {
        let (accounts, _) = service();
        accounts.signup("mei", "pw").await.unwrap();
        assert!(accounts.current_user().await.unwrap().is_some());

        accounts.logout().await.unwrap();
        assert_eq!(accounts.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn session_pointing_at_missing_account_is_no_user() {
        let (accounts, storage) = service();
        storage.set_item(SESSION_KEY, "ghost").await.unwrap();
        assert_eq!(accounts.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unreadable_account_map_is_treated_as_empty() {
        let (accounts, storage) = service();
        storage.set_item(ACCOUNTS_KEY, "{not json").await.unwrap();

        let user = accounts.signup("mei", "pw").await.unwrap();
        assert_eq!(user.username, "mei");
    }

    #[tokio::test]
    async fn history_round_trips_field_for_field() {
        let (accounts, _) = service();
        accounts.signup("mei", "pw").await.unwrap();
        let history = vec![full_analysis("2"), full_analysis("1")];

        accounts.update_history("mei", &history).await.unwrap();
        let reloaded = accounts.current_user().await.unwrap().unwrap();

        assert_eq!(reloaded.history, history);
    }

    #[tokio::test]
    async fn history_update_for_unknown_user_is_ignored() {
        let (accounts, storage) = service();
        accounts
            .update_history("nobody", &[full_analysis("1")])
            .await
            .unwrap();
        assert_eq!(storage.get_item(ACCOUNTS_KEY).await.unwrap(), None);
    }
}
