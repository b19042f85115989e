//! Hostel-scoped records managed by admins: inventory, meal plans,
//! announcements and the finance ledger.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AnnouncementRepository, FinanceRepository, InventoryRepository, MealPlanRepository,
};
use crate::domain::{
    Announcement, AnnouncementDraft, AnnouncementId, Error, FinanceDraft, FinanceKind,
    FinanceRecord, FinanceRecordId, FinanceSummary, HostelId, InventoryDraft, InventoryItem,
    InventoryItemId, MealPlan, MealPlanDraft, Weekday,
};

/// Repositories behind the records service.
#[derive(Clone)]
pub struct RecordsRepositories {
    pub inventory: Arc<dyn InventoryRepository>,
    pub meal_plans: Arc<dyn MealPlanRepository>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub finance: Arc<dyn FinanceRepository>,
}

/// CRUD over the auxiliary records of a hostel.
#[derive(Clone)]
pub struct RecordsService {
    repos: RecordsRepositories,
    clock: Arc<dyn Clock>,
}

impl RecordsService {
    /// Create the service.
    pub fn new(repos: RecordsRepositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Inventory of the hostel.
    pub async fn list_inventory(&self, hostel_id: HostelId) -> Result<Vec<InventoryItem>, Error> {
        Ok(self.repos.inventory.list(hostel_id).await?)
    }

    /// Add an inventory item.
    pub async fn create_inventory(
        &self,
        hostel_id: HostelId,
        draft: InventoryDraft,
    ) -> Result<InventoryItem, Error> {
        let item = InventoryItem {
            id: InventoryItemId::random(),
            hostel_id,
            details: draft.validate()?,
        };
        self.repos.inventory.insert(&item).await?;
        Ok(item)
    }

    /// Replace an inventory item's fields.
    pub async fn update_inventory(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
        draft: InventoryDraft,
    ) -> Result<InventoryItem, Error> {
        let existing = self
            .repos
            .inventory
            .find(hostel_id, id)
            .await?
            .ok_or_else(|| Error::not_found(format!("inventory item {id} not found")))?;
        let item = InventoryItem {
            details: draft.validate()?,
            ..existing
        };
        self.repos.inventory.update(&item).await?;
        Ok(item)
    }

    /// Remove an inventory item.
    pub async fn delete_inventory(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
    ) -> Result<(), Error> {
        if !self.repos.inventory.delete(hostel_id, id).await? {
            return Err(Error::not_found(format!("inventory item {id} not found")));
        }
        Ok(())
    }

    /// The week's meal plans, Monday first. Days without a plan are absent.
    pub async fn meal_plans(&self, hostel_id: HostelId) -> Result<Vec<MealPlan>, Error> {
        let mut plans = self.repos.meal_plans.list(hostel_id).await?;
        plans.sort_by_key(|plan| plan.weekday);
        Ok(plans)
    }

    /// Set the meals for one weekday.
    pub async fn upsert_meal_plan(
        &self,
        hostel_id: HostelId,
        weekday: Weekday,
        draft: MealPlanDraft,
    ) -> Result<MealPlan, Error> {
        let plan = draft.validate(hostel_id, weekday)?;
        self.repos.meal_plans.upsert(&plan).await?;
        Ok(plan)
    }

    /// Clear the meals for one weekday.
    pub async fn delete_meal_plan(&self, hostel_id: HostelId, weekday: Weekday) -> Result<(), Error> {
        if !self.repos.meal_plans.delete(hostel_id, weekday).await? {
            return Err(Error::not_found(format!("no meal plan for {weekday}")));
        }
        Ok(())
    }

    /// Announcements of the hostel, newest first.
    pub async fn announcements(&self, hostel_id: HostelId) -> Result<Vec<Announcement>, Error> {
        Ok(self.repos.announcements.list(hostel_id).await?)
    }

    /// Publish an announcement stamped with the current time.
    pub async fn create_announcement(
        &self,
        hostel_id: HostelId,
        draft: AnnouncementDraft,
    ) -> Result<Announcement, Error> {
        let announcement = Announcement {
            id: AnnouncementId::random(),
            hostel_id,
            details: draft.validate()?,
            created_at: self.clock.utc(),
        };
        self.repos.announcements.insert(&announcement).await?;
        Ok(announcement)
    }

    /// Withdraw an announcement.
    pub async fn delete_announcement(
        &self,
        hostel_id: HostelId,
        id: AnnouncementId,
    ) -> Result<(), Error> {
        if !self.repos.announcements.delete(hostel_id, id).await? {
            return Err(Error::not_found(format!("announcement {id} not found")));
        }
        Ok(())
    }

    /// Ledger entries, newest first, optionally of one kind.
    pub async fn finance_records(
        &self,
        hostel_id: HostelId,
        kind: Option<FinanceKind>,
    ) -> Result<Vec<FinanceRecord>, Error> {
        Ok(self.repos.finance.list(hostel_id, kind).await?)
    }

    /// Record an income or expense.
    pub async fn create_finance_record(
        &self,
        hostel_id: HostelId,
        draft: FinanceDraft,
    ) -> Result<FinanceRecord, Error> {
        let record = FinanceRecord {
            id: FinanceRecordId::random(),
            hostel_id,
            details: draft.validate()?,
        };
        self.repos.finance.insert(&record).await?;
        Ok(record)
    }

    /// Remove a ledger entry.
    pub async fn delete_finance_record(
        &self,
        hostel_id: HostelId,
        id: FinanceRecordId,
    ) -> Result<(), Error> {
        if !self.repos.finance.delete(hostel_id, id).await? {
            return Err(Error::not_found(format!("finance record {id} not found")));
        }
        Ok(())
    }

    /// Income, expense and balance over the whole ledger.
    pub async fn finance_summary(&self, hostel_id: HostelId) -> Result<FinanceSummary, Error> {
        let records = self.repos.finance.list(hostel_id, None).await?;
        Ok(FinanceSummary::from_records(&records))
    }
}
