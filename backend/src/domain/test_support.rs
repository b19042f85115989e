//! Shared test doubles for domain service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{AdminRepository, HostelRepository, PasswordHashError, PasswordHasher};
use crate::domain::{
    Account, AccountId, Admin, AdminDetails, AdminId, Hostel, HostelDetails, HostelId, Role,
};
use crate::outbound::memory::InMemoryStore;

/// Clock pinned to an instant that tests can move.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock reading midday UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .unwrap_or_else(|| panic!("noon exists on {date}"))
            .and_utc();
        Self::new(noon)
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Reversible "hash" so tests avoid bcrypt's cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordHashError> {
        Ok(password_hash
            .strip_prefix("plain:")
            .is_some_and(|stored| stored == password))
    }
}

/// Parse a `YYYY-MM-DD` literal.
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|err| panic!("{raw}: {err}"))
}

/// Hostel valid until 2030 with the given room limit.
pub fn hostel(number: &str, room_limit: u32) -> Hostel {
    Hostel {
        id: HostelId::random(),
        details: HostelDetails {
            name: format!("Hostel {number}"),
            hostel_number: number.into(),
            address: "1 Quay Road".into(),
            contact_email: "desk@harbour.example".into(),
            contact_phone: "+44 1632 960000".into(),
            room_limit,
            student_limit: 50,
        },
        expires_on: date("2030-01-01"),
        created_at: date("2026-01-01")
            .and_hms_opt(0, 0, 0)
            .unwrap_or_else(|| panic!("midnight exists"))
            .and_utc(),
    }
}

/// Store `hostel` with a first admin whose password is `pw`.
pub async fn seed_hostel(store: &InMemoryStore, hostel: &Hostel) -> Admin {
    let admin = Admin {
        id: AdminId::random(),
        hostel_id: hostel.id,
        details: AdminDetails {
            full_name: "Wendy Warden".into(),
            email: format!("warden@{}.example", hostel.details.hostel_number.to_lowercase()),
            phone: "+44 1632 960001".into(),
        },
    };
    let account = Account {
        id: AccountId::random(),
        email: admin.details.email.clone(),
        password_hash: "plain:pw".into(),
        role: Role::Admin,
        hostel_id: Some(hostel.id),
        profile_id: Some(*admin.id.as_uuid()),
    };
    store
        .insert_with_admin(hostel, &admin, &account)
        .await
        .unwrap_or_else(|err| panic!("seed hostel: {err}"));
    let admins = store
        .list_for_hostel(hostel.id)
        .await
        .unwrap_or_else(|err| panic!("list admins: {err}"));
    assert!(admins.iter().any(|a| a.id == admin.id));
    admin
}
