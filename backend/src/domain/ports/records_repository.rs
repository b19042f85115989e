//! Ports for the hostel-scoped records: inventory, meal plans,
//! announcements and finance.

use async_trait::async_trait;

use crate::domain::{
    Announcement, AnnouncementId, FinanceKind, FinanceRecord, FinanceRecordId, HostelId,
    InventoryItem, InventoryItemId, MealPlan, Weekday,
};

use super::RepositoryError;

/// Port for inventory items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Items of the hostel ordered by category then name.
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<InventoryItem>, RepositoryError>;

    /// Fetch an item of the hostel.
    async fn find(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
    ) -> Result<Option<InventoryItem>, RepositoryError>;

    /// Insert an item.
    async fn insert(&self, item: &InventoryItem) -> Result<(), RepositoryError>;

    /// Replace the fields of an item.
    async fn update(&self, item: &InventoryItem) -> Result<(), RepositoryError>;

    /// Delete an item. Returns whether it existed.
    async fn delete(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
    ) -> Result<bool, RepositoryError>;
}

/// Port for weekly meal plans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealPlanRepository: Send + Sync {
    /// Plans of the hostel in any order; callers sort by weekday.
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<MealPlan>, RepositoryError>;

    /// Insert or replace the plan for the plan's weekday.
    async fn upsert(&self, plan: &MealPlan) -> Result<(), RepositoryError>;

    /// Delete the plan for a weekday. Returns whether it existed.
    async fn delete(&self, hostel_id: HostelId, weekday: Weekday) -> Result<bool, RepositoryError>;
}

/// Port for announcements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Announcements of the hostel, newest first.
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<Announcement>, RepositoryError>;

    /// Insert an announcement.
    async fn insert(&self, announcement: &Announcement) -> Result<(), RepositoryError>;

    /// Delete an announcement. Returns whether it existed.
    async fn delete(
        &self,
        hostel_id: HostelId,
        id: AnnouncementId,
    ) -> Result<bool, RepositoryError>;
}

/// Port for the finance ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinanceRepository: Send + Sync {
    /// Entries of the hostel, newest first, optionally restricted to a kind.
    async fn list(
        &self,
        hostel_id: HostelId,
        kind: Option<FinanceKind>,
    ) -> Result<Vec<FinanceRecord>, RepositoryError>;

    /// Insert an entry.
    async fn insert(&self, record: &FinanceRecord) -> Result<(), RepositoryError>;

    /// Delete an entry. Returns whether it existed.
    async fn delete(
        &self,
        hostel_id: HostelId,
        id: FinanceRecordId,
    ) -> Result<bool, RepositoryError>;
}
