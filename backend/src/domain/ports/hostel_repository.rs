//! Port for hostel, admin and account persistence.
//!
//! Hostels, their admin profiles and the login accounts behind them are
//! written together: creating a hostel also creates its first admin, and
//! deleting a hostel removes every record scoped to it.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Account, AccountId, Admin, AdminId, Hostel, HostelId, SearchTerm};

use super::RepositoryError;

/// Port for hostel aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostelRepository: Send + Sync {
    /// Insert a hostel with its first admin and that admin's account.
    ///
    /// The three writes succeed or fail together. A taken hostel number or
    /// account email yields [`RepositoryError::Conflict`].
    async fn insert_with_admin(
        &self,
        hostel: &Hostel,
        admin: &Admin,
        account: &Account,
    ) -> Result<(), RepositoryError>;

    /// Replace the editable fields and expiry of an existing hostel.
    async fn update(&self, hostel: &Hostel) -> Result<(), RepositoryError>;

    /// Fetch a hostel by identifier.
    async fn find_by_id(&self, id: HostelId) -> Result<Option<Hostel>, RepositoryError>;

    /// Fetch a hostel by its normalised hostel number.
    async fn find_by_number(&self, number: &str) -> Result<Option<Hostel>, RepositoryError>;

    /// One page of hostels ordered by name, filtered on name or number,
    /// together with the filtered total.
    async fn list_page(
        &self,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Hostel>, u64), RepositoryError>;

    /// Every hostel, ordered by name.
    async fn list_all(&self) -> Result<Vec<Hostel>, RepositoryError>;

    /// Delete a hostel and everything scoped to it. Returns whether it existed.
    async fn delete(&self, id: HostelId) -> Result<bool, RepositoryError>;
}

/// Port for hostel admin profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Insert an admin profile and its login account together.
    async fn insert_with_account(
        &self,
        admin: &Admin,
        account: &Account,
    ) -> Result<(), RepositoryError>;

    /// Admins of one hostel ordered by name.
    async fn list_for_hostel(&self, hostel_id: HostelId) -> Result<Vec<Admin>, RepositoryError>;

    /// Fetch an admin by identifier.
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError>;

    /// Delete an admin and its account. Returns whether it existed.
    async fn delete(&self, id: AdminId) -> Result<bool, RepositoryError>;
}

/// Port for login accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a standalone account, such as the bootstrap super-admin.
    async fn insert(&self, account: &Account) -> Result<(), RepositoryError>;

    /// Fetch an account by lower-case email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;

    /// Replace the stored password hash. Returns whether the account existed.
    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError>;
}
