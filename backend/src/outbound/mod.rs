//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: a process-local store used without a database and in tests.
//! - **security**: bcrypt password hashing.
//!
//! Adapters translate between domain types and their storage form. They hold
//! no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
