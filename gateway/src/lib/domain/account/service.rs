use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forum_auth::Authenticator;
use tokio::sync::Semaphore;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::Session;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Every Argon2 derivation runs on the blocking pool while holding one of
/// `max_concurrent_hashes` permits, so a burst of logins queues instead of
/// allocating unbounded hashing memory.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
    hashing_permits: Arc<Semaphore>,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Credential core
    /// * `max_concurrent_hashes` - Hashing admission limit (at least one)
    pub fn new(
        repository: Arc<R>,
        authenticator: Arc<Authenticator>,
        max_concurrent_hashes: usize,
    ) -> Self {
        Self {
            repository,
            authenticator,
            hashing_permits: Arc::new(Semaphore::new(max_concurrent_hashes.max(1))),
        }
    }

    pub fn authenticator(&self) -> &Arc<Authenticator> {
        &self.authenticator
    }

    async fn run_hashing<T, F>(&self, job: F) -> Result<T, AccountError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.hashing_permits)
            .acquire_owned()
            .await
            .map_err(|e| AccountError::HashingUnavailable(e.to_string()))?;
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job(&authenticator)
        })
        .await
        .map_err(|e| AccountError::HashingUnavailable(e.to_string()))
    }

    async fn hash_password(&self, password: &Password) -> Result<String, AccountError> {
        let password = password.clone();
        let record = self
            .run_hashing(move |authenticator| authenticator.hash_password(password.expose()))
            .await??;
        Ok(record.into_string())
    }

    /// Replace a record produced with outdated parameters. Failures are
    /// logged and do not fail the login that triggered them.
    async fn upgrade_hash(&self, account: Account, password: String) -> Account {
        let rehashed = self
            .run_hashing(move |authenticator| authenticator.hash_password(&password))
            .await;

        let record = match rehashed.and_then(|hashed| hashed.map_err(AccountError::from)) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(email = %account.email, error = %e, "Password rehash failed");
                return account;
            }
        };

        match self
            .repository
            .update_password_hash(&account.email, record.into_string())
            .await
        {
            Ok(updated) => {
                tracing::info!(email = %updated.email, "Password hash upgraded");
                updated
            }
            Err(e) => {
                tracing::warn!(
                    email = %account.email,
                    error = %e,
                    "Failed to store upgraded password hash"
                );
                account
            }
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let account = Account {
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(email = %created.email, "Account registered");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError> {
        let account = match self.repository.find_by_email(&command.email).await? {
            Some(account) => account,
            None => {
                tracing::debug!(email = %command.email, "Login for unknown account");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let email = account.email.as_str().to_string();
        let stored_hash = account.password_hash.clone();
        let password = command.password.clone();
        let result = self
            .run_hashing(move |authenticator| {
                authenticator.authenticate(&email, &password, &stored_hash)
            })
            .await??;

        let account = if self.authenticator.needs_rehash(&account.password_hash) {
            self.upgrade_hash(account, command.password).await
        } else {
            account
        };

        tracing::info!(email = %account.email, "Login succeeded");

        Ok(Session {
            account,
            access_token: result.access_token,
        })
    }

    async fn get_account(&self, email: &str) -> Result<Account, AccountError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound(email.to_string()))
    }

    async fn change_password(
        &self,
        email: &str,
        new_password: Password,
    ) -> Result<Account, AccountError> {
        let account = self.get_account(email).await?;
        let password_hash = self.hash_password(&new_password).await?;

        let updated = self
            .repository
            .update_password_hash(&account.email, password_hash)
            .await?;
        tracing::info!(email = %updated.email, "Password changed");

        Ok(updated)
    }
}
