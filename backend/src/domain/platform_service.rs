//! Super-admin use-cases: hostels, their admins and platform settings.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use mockable::Clock;
use pagination::{Page, PageRequest};
use serde::Serialize;
use tracing::info;

use crate::domain::ports::{
    AccountRepository, AdminRepository, HostelRepository, PasswordHasher, RoomRepository,
    StudentRepository, SystemSettingsRepository,
};
use crate::domain::validation::FieldError;
use crate::domain::{
    Account, AccountId, Admin, AdminDraft, AdminId, Error, Hostel, HostelDraft, HostelId,
    NewPassword, Role, SearchTerm, SystemSettings, SystemSettingsDraft,
};

/// Input for creating a hostel together with its first admin.
#[derive(Debug, Clone)]
pub struct NewHostel {
    pub hostel: HostelDraft,
    pub admin: AdminDraft,
    pub admin_password: String,
}

/// Hostel row in the super-admin listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostelListing {
    pub hostel: Hostel,
    pub is_expired: bool,
}

/// Platform-wide counters shown on the super-admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverview {
    pub hostels: u64,
    pub expired_hostels: u64,
    pub students: u64,
    pub rooms: u64,
}

/// Repositories the platform service reads and writes.
#[derive(Clone)]
pub struct PlatformRepositories {
    pub hostels: Arc<dyn HostelRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub settings: Arc<dyn SystemSettingsRepository>,
}

/// Super-admin use-cases.
#[derive(Clone)]
pub struct PlatformService {
    repos: PlatformRepositories,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl PlatformService {
    /// Create the service.
    pub fn new(
        repos: PlatformRepositories,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            hasher,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    fn not_in_past(&self, expires_on: NaiveDate) -> Result<NaiveDate, FieldError> {
        if expires_on < self.today() {
            return Err(FieldError::new(
                "expiresOn",
                "in_past",
                "expiresOn must not be in the past",
            ));
        }
        Ok(expires_on)
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), Error> {
        if self.repos.accounts.find_by_email(email).await?.is_some() {
            return Err(Error::conflict(format!("email {email} is already in use")));
        }
        Ok(())
    }

    async fn admin_account(
        &self,
        hostel_id: HostelId,
        draft: AdminDraft,
        password: &str,
    ) -> Result<(Admin, Account), Error> {
        let details = draft.validate()?;
        let password = NewPassword::new("adminPassword", password)?;
        self.ensure_email_free(&details.email).await?;

        let admin = Admin {
            id: AdminId::random(),
            hostel_id,
            details,
        };
        let account = Account {
            id: AccountId::random(),
            email: admin.details.email.clone(),
            password_hash: self.hasher.hash(password.expose()).await?,
            role: Role::Admin,
            hostel_id: Some(hostel_id),
            profile_id: Some(*admin.id.as_uuid()),
        };
        Ok((admin, account))
    }

    /// Create a hostel, its first admin and the admin's login account.
    ///
    /// Without an explicit expiry the hostel is valid for the configured
    /// default number of days from today.
    pub async fn create_hostel(&self, input: NewHostel) -> Result<(Hostel, Admin), Error> {
        let (details, expires_on) = input.hostel.validate()?;
        let expires_on = match expires_on {
            Some(date) => self.not_in_past(date)?,
            None => {
                let settings = self.settings().await?;
                self.today()
                    .checked_add_days(Days::new(u64::from(settings.default_validity_days)))
                    .ok_or_else(|| Error::internal("default hostel expiry overflowed"))?
            }
        };
        if self
            .repos
            .hostels
            .find_by_number(&details.hostel_number)
            .await?
            .is_some()
        {
            return Err(Error::conflict(format!(
                "hostel number {} is already in use",
                details.hostel_number
            )));
        }

        let hostel = Hostel {
            id: HostelId::random(),
            details,
            expires_on,
            created_at: self.clock.utc(),
        };
        let (admin, account) = self
            .admin_account(hostel.id, input.admin, &input.admin_password)
            .await?;
        self.repos
            .hostels
            .insert_with_admin(&hostel, &admin, &account)
            .await?;
        info!(hostel_id = %hostel.id, number = %hostel.details.hostel_number, "hostel created");
        Ok((hostel, admin))
    }

    /// One page of hostels, each flagged with its expiry state.
    pub async fn list_hostels(
        &self,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<Page<HostelListing>, Error> {
        let (hostels, total) = self.repos.hostels.list_page(search, page).await?;
        let today = self.today();
        let items = hostels
            .into_iter()
            .map(|hostel| HostelListing {
                is_expired: hostel.is_expired(today),
                hostel,
            })
            .collect();
        Ok(Page::new(items, page, total))
    }

    /// Fetch a hostel.
    pub async fn get_hostel(&self, id: HostelId) -> Result<Hostel, Error> {
        self.repos
            .hostels
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("hostel {id} not found")))
    }

    /// Replace the editable fields of a hostel, keeping its expiry unless a
    /// new one is given.
    pub async fn update_hostel(&self, id: HostelId, draft: HostelDraft) -> Result<Hostel, Error> {
        let existing = self.get_hostel(id).await?;
        let (details, expires_on) = draft.validate()?;
        let holder = self
            .repos
            .hostels
            .find_by_number(&details.hostel_number)
            .await?;
        if holder.is_some_and(|other| other.id != id) {
            return Err(Error::conflict(format!(
                "hostel number {} is already in use",
                details.hostel_number
            )));
        }
        let expires_on = match expires_on {
            Some(date) if date != existing.expires_on => self.not_in_past(date)?,
            _ => existing.expires_on,
        };
        let hostel = Hostel {
            details,
            expires_on,
            ..existing
        };
        self.repos.hostels.update(&hostel).await?;
        Ok(hostel)
    }

    /// Extend (or shorten) a hostel's subscription to `expires_on`.
    pub async fn renew_hostel(&self, id: HostelId, expires_on: NaiveDate) -> Result<Hostel, Error> {
        let existing = self.get_hostel(id).await?;
        let hostel = Hostel {
            expires_on: self.not_in_past(expires_on)?,
            ..existing
        };
        self.repos.hostels.update(&hostel).await?;
        info!(hostel_id = %id, %expires_on, "hostel renewed");
        Ok(hostel)
    }

    /// Delete a hostel and everything scoped to it.
    pub async fn delete_hostel(&self, id: HostelId) -> Result<(), Error> {
        if !self.repos.hostels.delete(id).await? {
            return Err(Error::not_found(format!("hostel {id} not found")));
        }
        info!(hostel_id = %id, "hostel deleted");
        Ok(())
    }

    /// Admins of a hostel.
    pub async fn list_admins(&self, hostel_id: HostelId) -> Result<Vec<Admin>, Error> {
        self.get_hostel(hostel_id).await?;
        Ok(self.repos.admins.list_for_hostel(hostel_id).await?)
    }

    /// Add an admin (profile and account) to an existing hostel.
    pub async fn add_admin(
        &self,
        hostel_id: HostelId,
        draft: AdminDraft,
        password: &str,
    ) -> Result<Admin, Error> {
        self.get_hostel(hostel_id).await?;
        let (admin, account) = self.admin_account(hostel_id, draft, password).await?;
        self.repos
            .admins
            .insert_with_account(&admin, &account)
            .await?;
        Ok(admin)
    }

    /// Remove an admin and its account.
    pub async fn remove_admin(&self, id: AdminId) -> Result<(), Error> {
        if !self.repos.admins.delete(id).await? {
            return Err(Error::not_found(format!("admin {id} not found")));
        }
        Ok(())
    }

    /// Current settings, falling back to defaults before the first save.
    pub async fn settings(&self) -> Result<SystemSettings, Error> {
        Ok(self.repos.settings.load().await?.unwrap_or_default())
    }

    /// Validate and store new settings.
    pub async fn update_settings(
        &self,
        draft: SystemSettingsDraft,
    ) -> Result<SystemSettings, Error> {
        let settings = draft.validate()?;
        self.repos.settings.save(&settings).await?;
        Ok(settings)
    }

    /// Platform-wide counters.
    pub async fn overview(&self) -> Result<PlatformOverview, Error> {
        let today = self.today();
        let hostels = self.repos.hostels.list_all().await?;
        let expired = hostels.iter().filter(|h| h.is_expired(today)).count();
        Ok(PlatformOverview {
            hostels: hostels.len() as u64,
            expired_hostels: expired as u64,
            students: self.repos.students.count_all().await?,
            rooms: self.repos.rooms.count_all().await?,
        })
    }
}
