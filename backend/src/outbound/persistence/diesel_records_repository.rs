//! PostgreSQL-backed adapters for inventory, meal plans, announcements and
//! the finance ledger.
//!
//! All four record kinds are scoped by hostel and share one pool, so a
//! single adapter implements every port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    AnnouncementRepository, FinanceRepository, InventoryRepository, MealPlanRepository,
    RepositoryError,
};
use crate::domain::{
    Announcement, AnnouncementId, FinanceKind, FinanceRecord, FinanceRecordId, HostelId,
    InventoryItem, InventoryItemId, MealPlan, Weekday,
};
use crate::{delete_where, query_optional, query_vec};

use super::diesel_helpers::{convert_rows, ensure_updated, map_diesel_error, map_pool_error};
use super::models::{
    AnnouncementRow, FinanceRow, InventoryRow, InventoryWrite, MealPlanRow, NewAnnouncementRow,
    NewFinanceRow, NewMealPlanRow,
};
use super::pool::DbPool;
use super::schema::{announcements, finance_records, inventory_items, meal_plans};

/// Diesel-backed implementation of the hostel record ports.
#[derive(Clone)]
pub struct DieselRecordsRepository {
    pool: DbPool,
}

impl DieselRecordsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for DieselRecordsRepository {
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<InventoryItem>, RepositoryError> {
        query_vec!(
            self,
            inventory_items::table,
            inventory_items::hostel_id.eq(*hostel_id.as_uuid()),
            (
                inventory_items::category,
                inventory_items::name,
                inventory_items::id
            ),
            InventoryRow
        )
    }

    async fn find(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
    ) -> Result<Option<InventoryItem>, RepositoryError> {
        query_optional!(
            self,
            inventory_items::table,
            inventory_items::id
                .eq(*id.as_uuid())
                .and(inventory_items::hostel_id.eq(*hostel_id.as_uuid())),
            InventoryRow
        )
    }

    async fn insert(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let write = InventoryWrite::from_domain(&item.details)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(inventory_items::table)
            .values((
                inventory_items::id.eq(*item.id.as_uuid()),
                inventory_items::hostel_id.eq(*item.hostel_id.as_uuid()),
                &write,
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let write = InventoryWrite::from_domain(&item.details)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            inventory_items::table
                .filter(inventory_items::id.eq(item.id.as_uuid()))
                .filter(inventory_items::hostel_id.eq(item.hostel_id.as_uuid())),
        )
        .set(&write)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        ensure_updated(updated, "inventory item")
    }

    async fn delete(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
    ) -> Result<bool, RepositoryError> {
        delete_where!(
            self,
            inventory_items::table,
            inventory_items::id
                .eq(*id.as_uuid())
                .and(inventory_items::hostel_id.eq(*hostel_id.as_uuid()))
        )
    }
}

#[async_trait]
impl MealPlanRepository for DieselRecordsRepository {
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<MealPlan>, RepositoryError> {
        query_vec!(
            self,
            meal_plans::table,
            meal_plans::hostel_id.eq(*hostel_id.as_uuid()),
            meal_plans::weekday,
            MealPlanRow
        )
    }

    async fn upsert(&self, plan: &MealPlan) -> Result<(), RepositoryError> {
        let row = NewMealPlanRow::from(plan);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(meal_plans::table)
            .values(&row)
            .on_conflict((meal_plans::hostel_id, meal_plans::weekday))
            .do_update()
            .set((
                meal_plans::breakfast.eq(excluded(meal_plans::breakfast)),
                meal_plans::lunch.eq(excluded(meal_plans::lunch)),
                meal_plans::dinner.eq(excluded(meal_plans::dinner)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, hostel_id: HostelId, weekday: Weekday) -> Result<bool, RepositoryError> {
        delete_where!(
            self,
            meal_plans::table,
            meal_plans::hostel_id
                .eq(*hostel_id.as_uuid())
                .and(meal_plans::weekday.eq(weekday.as_str()))
        )
    }
}

#[async_trait]
impl AnnouncementRepository for DieselRecordsRepository {
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<Announcement>, RepositoryError> {
        query_vec!(
            self,
            announcements::table,
            announcements::hostel_id.eq(*hostel_id.as_uuid()),
            (announcements::created_at.desc(), announcements::id),
            AnnouncementRow
        )
    }

    async fn insert(&self, announcement: &Announcement) -> Result<(), RepositoryError> {
        let row = NewAnnouncementRow::from(announcement);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(announcements::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(
        &self,
        hostel_id: HostelId,
        id: AnnouncementId,
    ) -> Result<bool, RepositoryError> {
        delete_where!(
            self,
            announcements::table,
            announcements::id
                .eq(*id.as_uuid())
                .and(announcements::hostel_id.eq(*hostel_id.as_uuid()))
        )
    }
}

#[async_trait]
impl FinanceRepository for DieselRecordsRepository {
    async fn list(
        &self,
        hostel_id: HostelId,
        kind: Option<FinanceKind>,
    ) -> Result<Vec<FinanceRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = finance_records::table
            .filter(finance_records::hostel_id.eq(*hostel_id.as_uuid()))
            .into_boxed();
        if let Some(kind) = kind {
            query = query.filter(finance_records::kind.eq(kind.as_str()));
        }
        let rows: Vec<FinanceRow> = query
            .select(FinanceRow::as_select())
            .order_by((finance_records::recorded_on.desc(), finance_records::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn insert(&self, record: &FinanceRecord) -> Result<(), RepositoryError> {
        let row = NewFinanceRow::from(record);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(finance_records::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(
        &self,
        hostel_id: HostelId,
        id: FinanceRecordId,
    ) -> Result<bool, RepositoryError> {
        delete_where!(
            self,
            finance_records::table,
            finance_records::id
                .eq(*id.as_uuid())
                .and(finance_records::hostel_id.eq(*hostel_id.as_uuid()))
        )
    }
}
