use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store keyed by email address.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;
        let key = account.email.as_str().to_string();

        if accounts.contains_key(&key) {
            return Err(AccountError::EmailAlreadyExists(key));
        }

        accounts.insert(key, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn update_password_hash(
        &self,
        email: &EmailAddress,
        password_hash: String,
    ) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(email.as_str())
            .ok_or_else(|| AccountError::NotFound(email.to_string()))?;

        account.password_hash = password_hash;
        Ok(account.clone())
    }
}
