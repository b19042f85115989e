//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Business rules stay in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Tenant scoping**: every hostel-owned query filters on `hostel_id`.
//! - **Typed errors**: Diesel and pool failures map to
//!   [`RepositoryError`](crate::domain::ports::RepositoryError), with unique
//!   violations reported as conflicts.
//!
//! # Example
//!
//! ```no_run
//! use hostel_backend::outbound::persistence::{DbPool, DieselRoomRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hostel")).await?;
//! let rooms = DieselRoomRepository::new(pool);
//! # let _ = rooms;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
pub(crate) mod diesel_helpers;
mod diesel_hostel_repository;
mod diesel_records_repository;
mod diesel_resident_repository;
mod diesel_room_repository;
mod diesel_system_settings_repository;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_hostel_repository::DieselHostelRepository;
pub use diesel_records_repository::DieselRecordsRepository;
pub use diesel_resident_repository::DieselResidentRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_system_settings_repository::DieselSystemSettingsRepository;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
