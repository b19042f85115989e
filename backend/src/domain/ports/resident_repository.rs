//! Ports for students and temporary guests.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{
    Account, GuestId, HostelId, RoomId, SearchTerm, Student, StudentId, TemporaryGuest,
};

use super::RepositoryError;

/// Port for student persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a student and its login account together.
    async fn insert_with_account(
        &self,
        student: &Student,
        account: &Account,
    ) -> Result<(), RepositoryError>;

    /// Replace the profile fields and room assignment of a student.
    async fn update(&self, student: &Student) -> Result<(), RepositoryError>;

    /// Fetch a student of the hostel.
    async fn find(
        &self,
        hostel_id: HostelId,
        id: StudentId,
    ) -> Result<Option<Student>, RepositoryError>;

    /// Number of students in the hostel.
    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError>;

    /// Number of students across every hostel.
    async fn count_all(&self) -> Result<u64, RepositoryError>;

    /// One page of students ordered by name then id, filtered on name or
    /// email, together with the filtered total.
    async fn list_page(
        &self,
        hostel_id: HostelId,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Student>, u64), RepositoryError>;

    /// Students assigned to a room, ordered by name.
    async fn list_in_room(
        &self,
        hostel_id: HostelId,
        room_id: RoomId,
    ) -> Result<Vec<Student>, RepositoryError>;

    /// Delete a student and its account. Returns whether it existed.
    async fn delete(&self, hostel_id: HostelId, id: StudentId) -> Result<bool, RepositoryError>;
}

/// Port for temporary guest persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Insert a guest.
    async fn insert(&self, guest: &TemporaryGuest) -> Result<(), RepositoryError>;

    /// Replace the fields of a guest.
    async fn update(&self, guest: &TemporaryGuest) -> Result<(), RepositoryError>;

    /// Fetch a guest of the hostel.
    async fn find(
        &self,
        hostel_id: HostelId,
        id: GuestId,
    ) -> Result<Option<TemporaryGuest>, RepositoryError>;

    /// Number of guests in the hostel.
    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError>;

    /// One page of guests ordered by check-in date, newest first, together
    /// with the total.
    async fn list_page(
        &self,
        hostel_id: HostelId,
        page: &PageRequest,
    ) -> Result<(Vec<TemporaryGuest>, u64), RepositoryError>;

    /// Delete a guest. Returns whether it existed.
    async fn delete(&self, hostel_id: HostelId, id: GuestId) -> Result<bool, RepositoryError>;
}
