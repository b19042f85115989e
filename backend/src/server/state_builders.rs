//! Builders for the HTTP state: PostgreSQL adapters when a pool is
//! configured, the in-memory store otherwise.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use hostel_backend::domain::ports::PasswordHasher;
use hostel_backend::inbound::http::state::{HttpState, HttpStatePorts};
use hostel_backend::outbound::memory::InMemoryStore;
use hostel_backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselHostelRepository, DieselRecordsRepository,
    DieselResidentRepository, DieselRoomRepository, DieselSystemSettingsRepository,
};
use hostel_backend::outbound::security::BcryptPasswordHasher;

fn diesel_ports(
    pool: &DbPool,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts {
    let accounts = Arc::new(DieselAccountRepository::new(pool.clone()));
    let residents = Arc::new(DieselResidentRepository::new(pool.clone()));
    let records = Arc::new(DieselRecordsRepository::new(pool.clone()));
    HttpStatePorts {
        hostels: Arc::new(DieselHostelRepository::new(pool.clone())),
        admins: accounts.clone(),
        accounts,
        rooms: Arc::new(DieselRoomRepository::new(pool.clone())),
        students: residents.clone(),
        guests: residents,
        inventory: records.clone(),
        meal_plans: records.clone(),
        announcements: records.clone(),
        finance: records,
        settings: Arc::new(DieselSystemSettingsRepository::new(pool.clone())),
        hasher,
        clock,
    }
}

/// Select the repository adapters for `pool`.
pub(crate) fn build_ports(pool: Option<&DbPool>) -> HttpStatePorts {
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::default());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match pool {
        Some(pool) => diesel_ports(pool, hasher, clock),
        None => {
            warn!("no database configured; data lives in memory and is lost on restart");
            HttpStatePorts::shared(Arc::new(InMemoryStore::default()), hasher, clock)
        }
    }
}

/// Wrap the ports in the shared handler state.
pub(crate) fn build_http_state(ports: HttpStatePorts) -> web::Data<HttpState> {
    web::Data::new(HttpState::from(ports))
}
