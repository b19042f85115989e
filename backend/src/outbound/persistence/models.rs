//! Internal Diesel row structs and their conversions to domain types.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Read rows own their data; insert rows borrow from the domain
//! value being written.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Account, AccountId, Admin, AdminDetails, AdminId, Announcement, AnnouncementDetails,
    FinanceDetails, FinanceRecord, GuestDetails, Hostel, HostelDetails, HostelId, InventoryDetails,
    InventoryItem, MealPlan, Room, RoomCapacity, RoomDetails, Student, StudentDetails,
    SystemSettings, TemporaryGuest,
};

use super::schema::{
    accounts, admins, announcements, finance_records, guests, hostels, inventory_items,
    meal_plans, rooms, students, system_settings,
};

/// Key of the singleton settings row.
pub(crate) const SETTINGS_ROW_ID: i16 = 1;

/// Parse a stored enum column, reporting bad values as query errors.
fn parse_column<T>(column: &str, raw: &str) -> Result<T, RepositoryError>
where
    T: std::str::FromStr,
{
    raw.parse()
        .map_err(|_| RepositoryError::query(format!("unexpected {column} value '{raw}'")))
}

fn to_u32(column: &str, value: i32) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::query(format!("negative {column} value {value}")))
}

/// Convert a domain count or limit for an `INTEGER` column.
pub(crate) fn to_i32(column: &str, value: u32) -> Result<i32, RepositoryError> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::query(format!("{column} value {value} out of range")))
}

// ---------------------------------------------------------------------------
// Hostels, admins and accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hostels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HostelRow {
    pub id: Uuid,
    pub name: String,
    pub hostel_number: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub room_limit: i32,
    pub student_limit: i32,
    pub expires_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<HostelRow> for Hostel {
    type Error = RepositoryError;

    fn try_from(row: HostelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: HostelId::from_uuid(row.id),
            details: HostelDetails {
                name: row.name,
                hostel_number: row.hostel_number,
                address: row.address,
                contact_email: row.contact_email,
                contact_phone: row.contact_phone,
                room_limit: to_u32("room_limit", row.room_limit)?,
                student_limit: to_u32("student_limit", row.student_limit)?,
            },
            expires_on: row.expires_on,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hostels)]
pub(crate) struct NewHostelRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub hostel_number: &'a str,
    pub address: &'a str,
    pub contact_email: &'a str,
    pub contact_phone: &'a str,
    pub room_limit: i32,
    pub student_limit: i32,
    pub expires_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewHostelRow<'a> {
    pub(crate) fn from_domain(hostel: &'a Hostel) -> Result<Self, RepositoryError> {
        let details = &hostel.details;
        Ok(Self {
            id: *hostel.id.as_uuid(),
            name: &details.name,
            hostel_number: &details.hostel_number,
            address: &details.address,
            contact_email: &details.contact_email,
            contact_phone: &details.contact_phone,
            room_limit: to_i32("room_limit", details.room_limit)?,
            student_limit: to_i32("student_limit", details.student_limit)?,
            expires_on: hostel.expires_on,
            created_at: hostel.created_at,
        })
    }
}

/// Editable hostel columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = hostels)]
pub(crate) struct HostelUpdate<'a> {
    pub name: &'a str,
    pub hostel_number: &'a str,
    pub address: &'a str,
    pub contact_email: &'a str,
    pub contact_phone: &'a str,
    pub room_limit: i32,
    pub student_limit: i32,
    pub expires_on: NaiveDate,
}

impl<'a> HostelUpdate<'a> {
    pub(crate) fn from_domain(hostel: &'a Hostel) -> Result<Self, RepositoryError> {
        let row = NewHostelRow::from_domain(hostel)?;
        Ok(Self {
            name: row.name,
            hostel_number: row.hostel_number,
            address: row.address,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            room_limit: row.room_limit,
            student_limit: row.student_limit,
            expires_on: row.expires_on,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdminRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: AdminId::from_uuid(row.id),
            hostel_id: HostelId::from_uuid(row.hostel_id),
            details: AdminDetails {
                full_name: row.full_name,
                email: row.email,
                phone: row.phone,
            },
        }
    }
}

impl From<&Admin> for AdminRow {
    fn from(admin: &Admin) -> Self {
        Self {
            id: *admin.id.as_uuid(),
            hostel_id: *admin.hostel_id.as_uuid(),
            full_name: admin.details.full_name.clone(),
            email: admin.details.email.clone(),
            phone: admin.details.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub hostel_id: Option<Uuid>,
    pub profile_id: Option<Uuid>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AccountId::from_uuid(row.id),
            email: row.email,
            password_hash: row.password_hash,
            role: parse_column("role", &row.role)?,
            hostel_id: row.hostel_id.map(HostelId::from_uuid),
            profile_id: row.profile_id,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'static str,
    pub hostel_id: Option<Uuid>,
    pub profile_id: Option<Uuid>,
}

impl<'a> From<&'a Account> for NewAccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            email: &account.email,
            password_hash: &account.password_hash,
            role: account.role.as_str(),
            hostel_id: account.hostel_id.map(Into::into),
            profile_id: account.profile_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Rooms and residents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub room_number: String,
    pub capacity: String,
    pub floor: i32,
    pub room_type: String,
    pub price: i64,
}

impl TryFrom<RoomRow> for Room {
    type Error = RepositoryError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let capacity = RoomCapacity::parse(&row.capacity).map_err(|err| {
            RepositoryError::query(format!("room {} has bad capacity: {err}", row.id))
        })?;
        Ok(Self {
            id: row.id.into(),
            hostel_id: HostelId::from_uuid(row.hostel_id),
            details: RoomDetails {
                room_number: row.room_number,
                capacity,
                floor: row.floor,
                room_type: parse_column("room_type", &row.room_type)?,
                price: row.price,
            },
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomWrite<'a> {
    pub room_number: &'a str,
    pub capacity: String,
    pub floor: i32,
    pub room_type: &'static str,
    pub price: i64,
}

impl<'a> From<&'a Room> for RoomWrite<'a> {
    fn from(room: &'a Room) -> Self {
        Self {
            room_number: &room.details.room_number,
            capacity: room.details.capacity.to_string(),
            floor: room.details.floor,
            room_type: room.details.room_type.as_str(),
            price: room.details.price,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrolled_on: NaiveDate,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id.into(),
            hostel_id: HostelId::from_uuid(row.hostel_id),
            room_id: row.room_id.map(Into::into),
            details: StudentDetails {
                full_name: row.full_name,
                email: row.email,
                phone: row.phone,
                guardian_name: row.guardian_name,
                guardian_phone: row.guardian_phone,
                enrolled_on: row.enrolled_on,
            },
        }
    }
}

/// Student columns written on insert and update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StudentWrite<'a> {
    pub room_id: Option<Uuid>,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub guardian_name: &'a str,
    pub guardian_phone: &'a str,
    pub enrolled_on: NaiveDate,
}

impl<'a> From<&'a Student> for StudentWrite<'a> {
    fn from(student: &'a Student) -> Self {
        let details = &student.details;
        Self {
            room_id: student.room_id.map(Into::into),
            full_name: &details.full_name,
            email: &details.email,
            phone: &details.phone,
            guardian_name: &details.guardian_name,
            guardian_phone: &details.guardian_phone,
            enrolled_on: details.enrolled_on,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GuestRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub purpose: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl From<GuestRow> for TemporaryGuest {
    fn from(row: GuestRow) -> Self {
        Self {
            id: row.id.into(),
            hostel_id: HostelId::from_uuid(row.hostel_id),
            details: GuestDetails {
                room_id: row.room_id.into(),
                full_name: row.full_name,
                phone: row.phone,
                purpose: row.purpose,
                check_in: row.check_in,
                check_out: row.check_out,
            },
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = guests)]
pub(crate) struct GuestWrite<'a> {
    pub room_id: Uuid,
    pub full_name: &'a str,
    pub phone: &'a str,
    pub purpose: &'a str,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl<'a> From<&'a GuestDetails> for GuestWrite<'a> {
    fn from(details: &'a GuestDetails) -> Self {
        Self {
            room_id: details.room_id.into(),
            full_name: &details.full_name,
            phone: &details.phone,
            purpose: &details.purpose,
            check_in: details.check_in,
            check_out: details.check_out,
        }
    }
}

// ---------------------------------------------------------------------------
// Hostel records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = inventory_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InventoryRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub condition: String,
}

impl TryFrom<InventoryRow> for InventoryItem {
    type Error = RepositoryError;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            hostel_id: HostelId::from_uuid(row.hostel_id),
            details: InventoryDetails {
                name: row.name,
                category: row.category,
                quantity: to_u32("quantity", row.quantity)?,
                condition: parse_column("condition", &row.condition)?,
            },
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = inventory_items)]
pub(crate) struct InventoryWrite<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub quantity: i32,
    pub condition: &'static str,
}

impl<'a> InventoryWrite<'a> {
    pub(crate) fn from_domain(details: &'a InventoryDetails) -> Result<Self, RepositoryError> {
        Ok(Self {
            name: &details.name,
            category: &details.category,
            quantity: to_i32("quantity", details.quantity)?,
            condition: details.condition.as_str(),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meal_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealPlanRow {
    pub hostel_id: Uuid,
    pub weekday: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl TryFrom<MealPlanRow> for MealPlan {
    type Error = RepositoryError;

    fn try_from(row: MealPlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            hostel_id: HostelId::from_uuid(row.hostel_id),
            weekday: parse_column("weekday", &row.weekday)?,
            breakfast: row.breakfast,
            lunch: row.lunch,
            dinner: row.dinner,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meal_plans)]
pub(crate) struct NewMealPlanRow<'a> {
    pub hostel_id: Uuid,
    pub weekday: &'static str,
    pub breakfast: &'a str,
    pub lunch: &'a str,
    pub dinner: &'a str,
}

impl<'a> From<&'a MealPlan> for NewMealPlanRow<'a> {
    fn from(plan: &'a MealPlan) -> Self {
        Self {
            hostel_id: *plan.hostel_id.as_uuid(),
            weekday: plan.weekday.as_str(),
            breakfast: &plan.breakfast,
            lunch: &plan.lunch,
            dinner: &plan.dinner,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = announcements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnnouncementRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub title: String,
    pub body: String,
    pub audience: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AnnouncementRow> for Announcement {
    type Error = RepositoryError;

    fn try_from(row: AnnouncementRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            hostel_id: HostelId::from_uuid(row.hostel_id),
            details: AnnouncementDetails {
                title: row.title,
                body: row.body,
                audience: parse_column("audience", &row.audience)?,
            },
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = announcements)]
pub(crate) struct NewAnnouncementRow<'a> {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub title: &'a str,
    pub body: &'a str,
    pub audience: &'static str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Announcement> for NewAnnouncementRow<'a> {
    fn from(announcement: &'a Announcement) -> Self {
        Self {
            id: *announcement.id.as_uuid(),
            hostel_id: *announcement.hostel_id.as_uuid(),
            title: &announcement.details.title,
            body: &announcement.details.body,
            audience: announcement.details.audience.as_str(),
            created_at: announcement.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = finance_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FinanceRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub kind: String,
    pub category: String,
    pub amount: i64,
    pub description: Option<String>,
    pub recorded_on: NaiveDate,
}

impl TryFrom<FinanceRow> for FinanceRecord {
    type Error = RepositoryError;

    fn try_from(row: FinanceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            hostel_id: HostelId::from_uuid(row.hostel_id),
            details: FinanceDetails {
                kind: parse_column("kind", &row.kind)?,
                category: row.category,
                amount: row.amount,
                description: row.description,
                recorded_on: row.recorded_on,
            },
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = finance_records)]
pub(crate) struct NewFinanceRow<'a> {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub kind: &'static str,
    pub category: &'a str,
    pub amount: i64,
    pub description: Option<&'a str>,
    pub recorded_on: NaiveDate,
}

impl<'a> From<&'a FinanceRecord> for NewFinanceRow<'a> {
    fn from(record: &'a FinanceRecord) -> Self {
        let details = &record.details;
        Self {
            id: *record.id.as_uuid(),
            hostel_id: *record.hostel_id.as_uuid(),
            kind: details.kind.as_str(),
            category: &details.category,
            amount: details.amount,
            description: details.description.as_deref(),
            recorded_on: details.recorded_on,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = system_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SystemSettingsRow {
    pub id: i16,
    pub platform_name: String,
    pub support_email: String,
    pub default_validity_days: i32,
    pub maintenance_mode: bool,
}

impl TryFrom<SystemSettingsRow> for SystemSettings {
    type Error = RepositoryError;

    fn try_from(row: SystemSettingsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            platform_name: row.platform_name,
            support_email: row.support_email,
            default_validity_days: to_u32("default_validity_days", row.default_validity_days)?,
            maintenance_mode: row.maintenance_mode,
        })
    }
}

impl SystemSettingsRow {
    pub(crate) fn from_domain(settings: &SystemSettings) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: SETTINGS_ROW_ID,
            platform_name: settings.platform_name.clone(),
            support_email: settings.support_email.clone(),
            default_validity_days: to_i32(
                "default_validity_days",
                settings.default_validity_days,
            )?,
            maintenance_mode: settings.maintenance_mode,
        })
    }
}
