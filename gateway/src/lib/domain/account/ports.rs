use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::Session;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account, storing a freshly hashed password.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `HashingUnavailable` - Hashing could not be scheduled
    /// * `Storage` - Repository operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue an access token.
    ///
    /// Records hashed with outdated parameters are replaced on success.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Password` - Stored record is malformed or unsupported
    /// * `SigningKeyUnavailable` - Signing key could not be loaded
    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError>;

    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Storage` - Repository operation failed
    async fn get_account(&self, email: &str) -> Result<Account, AccountError>;

    /// Replace the stored password record of an account.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `HashingUnavailable` - Hashing could not be scheduled
    /// * `Storage` - Repository operation failed
    async fn change_password(
        &self,
        email: &str,
        new_password: Password,
    ) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Storage` - Repository operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Optional account (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Repository operation failed
    async fn update_password_hash(
        &self,
        email: &EmailAddress,
        password_hash: String,
    ) -> Result<Account, AccountError>;
}
