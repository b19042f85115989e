//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod hostel_repository;
mod login_service;
mod password_hasher;
mod records_repository;
mod repository_error;
mod resident_repository;
mod room_repository;
mod system_settings_repository;

pub use hostel_repository::{AccountRepository, AdminRepository, HostelRepository};
#[cfg(test)]
pub use hostel_repository::{MockAccountRepository, MockAdminRepository, MockHostelRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use records_repository::{
    AnnouncementRepository, FinanceRepository, InventoryRepository, MealPlanRepository,
};
#[cfg(test)]
pub use records_repository::{
    MockAnnouncementRepository, MockFinanceRepository, MockInventoryRepository,
    MockMealPlanRepository,
};
pub use repository_error::RepositoryError;
pub use resident_repository::{GuestRepository, StudentRepository};
#[cfg(test)]
pub use resident_repository::{MockGuestRepository, MockStudentRepository};
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::RoomRepository;
#[cfg(test)]
pub use system_settings_repository::MockSystemSettingsRepository;
pub use system_settings_repository::SystemSettingsRepository;
