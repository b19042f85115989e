//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `web::Data` and only ever talk to
//! domain services and the [`LoginService`] port, so they run unchanged over
//! PostgreSQL or the in-memory store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountRepository, AdminRepository, AnnouncementRepository, FinanceRepository,
    GuestRepository, HostelRepository, InventoryRepository, LoginService, MealPlanRepository,
    PasswordHasher, RoomRepository, StudentRepository, SystemSettingsRepository,
};
use crate::domain::{
    AuthService, PlatformRepositories, PlatformService, PortalRepositories, PortalService,
    RecordsRepositories, RecordsService, ResidentRepositories, ResidentService, RoomService,
};

/// Parameter object bundling every port the HTTP layer depends on.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub hostels: Arc<dyn HostelRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub guests: Arc<dyn GuestRepository>,
    pub inventory: Arc<dyn InventoryRepository>,
    pub meal_plans: Arc<dyn MealPlanRepository>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub finance: Arc<dyn FinanceRepository>,
    pub settings: Arc<dyn SystemSettingsRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

impl HttpStatePorts {
    /// Use one adapter for every repository port.
    pub fn shared<S>(store: Arc<S>, hasher: Arc<dyn PasswordHasher>, clock: Arc<dyn Clock>) -> Self
    where
        S: HostelRepository
            + AdminRepository
            + AccountRepository
            + RoomRepository
            + StudentRepository
            + GuestRepository
            + InventoryRepository
            + MealPlanRepository
            + AnnouncementRepository
            + FinanceRepository
            + SystemSettingsRepository
            + 'static,
    {
        Self {
            hostels: store.clone(),
            admins: store.clone(),
            accounts: store.clone(),
            rooms: store.clone(),
            students: store.clone(),
            guests: store.clone(),
            inventory: store.clone(),
            meal_plans: store.clone(),
            announcements: store.clone(),
            finance: store.clone(),
            settings: store,
            hasher,
            clock,
        }
    }

    /// Authentication service over these ports.
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.accounts.clone(),
            self.hostels.clone(),
            self.hasher.clone(),
            self.clock.clone(),
        )
    }
}

/// Dependency bundle for HTTP handlers.
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub platform: PlatformService,
    pub rooms: RoomService,
    pub residents: ResidentService,
    pub records: RecordsService,
    pub portal: PortalService,
}

impl HttpState {
    /// Build every service from `ports`, authenticating through `login`.
    pub fn new(ports: HttpStatePorts, login: Arc<dyn LoginService>) -> Self {
        let HttpStatePorts {
            hostels,
            admins,
            accounts,
            rooms,
            students,
            guests,
            inventory,
            meal_plans,
            announcements,
            finance,
            settings,
            hasher,
            clock,
        } = ports;

        Self {
            login,
            platform: PlatformService::new(
                PlatformRepositories {
                    hostels: hostels.clone(),
                    admins,
                    accounts: accounts.clone(),
                    rooms: rooms.clone(),
                    students: students.clone(),
                    settings,
                },
                hasher.clone(),
                clock.clone(),
            ),
            rooms: RoomService::new(rooms.clone(), hostels.clone()),
            residents: ResidentService::new(
                ResidentRepositories {
                    students: students.clone(),
                    guests: guests.clone(),
                    rooms: rooms.clone(),
                    hostels: hostels.clone(),
                    accounts,
                },
                hasher,
            ),
            records: RecordsService::new(
                RecordsRepositories {
                    inventory,
                    meal_plans: meal_plans.clone(),
                    announcements: announcements.clone(),
                    finance,
                },
                clock,
            ),
            portal: PortalService::new(PortalRepositories {
                hostels,
                rooms,
                students,
                guests,
                announcements,
                meal_plans,
            }),
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let login: Arc<dyn LoginService> = Arc::new(ports.auth_service());
        Self::new(ports, login)
    }
}
