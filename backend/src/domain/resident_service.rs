//! Students and temporary guests: the people who occupy rooms.
//!
//! Every path that places a person in a room goes through
//! [`ResidentService::ensure_room_has_space`], so a full room never gains an
//! occupant.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::occupancy::RoomOccupancy;
use crate::domain::ports::{
    AccountRepository, GuestRepository, HostelRepository, PasswordHasher, RoomRepository,
    StudentRepository,
};
use crate::domain::room_service::{load_hostel, load_room_occupancy};
use crate::domain::validation::FieldError;
use crate::domain::{
    Account, AccountId, Error, GuestDraft, GuestId, HostelId, NewPassword, Role, RoomId,
    RoomStatus, SearchTerm, Student, StudentDraft, StudentId, TemporaryGuest,
};

/// Input for enrolling a student with a login account.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub details: StudentDraft,
    pub password: String,
    pub room_id: Option<RoomId>,
}

/// Repositories the resident service reads and writes.
#[derive(Clone)]
pub struct ResidentRepositories {
    pub students: Arc<dyn StudentRepository>,
    pub guests: Arc<dyn GuestRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub hostels: Arc<dyn HostelRepository>,
    pub accounts: Arc<dyn AccountRepository>,
}

/// Student and guest use-cases, scoped to the caller's hostel.
#[derive(Clone)]
pub struct ResidentService {
    repos: ResidentRepositories,
    hasher: Arc<dyn PasswordHasher>,
}

impl ResidentService {
    /// Create the service.
    pub fn new(repos: ResidentRepositories, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repos, hasher }
    }

    /// Fail with `conflict` when the room cannot take one more occupant.
    async fn ensure_room_has_space(
        &self,
        hostel_id: HostelId,
        room_id: RoomId,
    ) -> Result<RoomOccupancy, Error> {
        let room = load_room_occupancy(self.repos.rooms.as_ref(), hostel_id, room_id).await?;
        if room.status == RoomStatus::Occupied {
            return Err(Error::conflict(format!(
                "room {} is full ({} of {} beds taken)",
                room.room.details.room_number,
                room.occupants.len(),
                room.room.details.capacity
            )));
        }
        Ok(room)
    }

    // Students

    /// One page of students ordered by name.
    pub async fn list_students(
        &self,
        hostel_id: HostelId,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<Page<Student>, Error> {
        let (students, total) = self
            .repos
            .students
            .list_page(hostel_id, search, page)
            .await?;
        Ok(Page::new(students, page, total))
    }

    /// Fetch a student of the hostel.
    pub async fn get_student(&self, hostel_id: HostelId, id: StudentId) -> Result<Student, Error> {
        self.repos
            .students
            .find(hostel_id, id)
            .await?
            .ok_or_else(|| Error::not_found(format!("student {id} not found")))
    }

    /// Enrol a student, creating the login account and optionally a bed.
    pub async fn create_student(
        &self,
        hostel_id: HostelId,
        input: NewStudent,
    ) -> Result<Student, Error> {
        let details = input.details.validate()?;
        let password = NewPassword::new("password", &input.password)?;
        let hostel = load_hostel(self.repos.hostels.as_ref(), hostel_id).await?;
        let enrolled = self.repos.students.count(hostel_id).await?;
        if enrolled >= u64::from(hostel.details.student_limit) {
            return Err(Error::conflict(format!(
                "student limit of {} reached for this hostel",
                hostel.details.student_limit
            )));
        }
        if self
            .repos
            .accounts
            .find_by_email(&details.email)
            .await?
            .is_some()
        {
            return Err(Error::conflict(format!(
                "email {} is already in use",
                details.email
            )));
        }
        if let Some(room_id) = input.room_id {
            self.ensure_room_has_space(hostel_id, room_id).await?;
        }

        let student = Student {
            id: StudentId::random(),
            hostel_id,
            room_id: input.room_id,
            details,
        };
        let account = Account {
            id: AccountId::random(),
            email: student.details.email.clone(),
            password_hash: self.hasher.hash(password.expose()).await?,
            role: Role::Student,
            hostel_id: Some(hostel_id),
            profile_id: Some(*student.id.as_uuid()),
        };
        self.repos
            .students
            .insert_with_account(&student, &account)
            .await?;
        info!(%hostel_id, student_id = %student.id, "student enrolled");
        Ok(student)
    }

    /// Replace a student's profile fields. The email is the login identity
    /// and cannot change.
    pub async fn update_student(
        &self,
        hostel_id: HostelId,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<Student, Error> {
        let existing = self.get_student(hostel_id, id).await?;
        let details = draft.validate()?;
        if details.email != existing.details.email {
            return Err(FieldError::new(
                "email",
                "immutable",
                "email is the login identity and cannot be changed",
            )
            .into());
        }
        let student = Student {
            details,
            ..existing
        };
        self.repos.students.update(&student).await?;
        Ok(student)
    }

    /// Move a student into a room of the same hostel.
    ///
    /// Assigning a student to the room they already occupy is a no-op, so
    /// their own bed never counts against them.
    pub async fn assign_room(
        &self,
        hostel_id: HostelId,
        id: StudentId,
        room_id: RoomId,
    ) -> Result<Student, Error> {
        let existing = self.get_student(hostel_id, id).await?;
        if existing.room_id == Some(room_id) {
            return Ok(existing);
        }
        self.ensure_room_has_space(hostel_id, room_id).await?;
        let student = Student {
            room_id: Some(room_id),
            ..existing
        };
        self.repos.students.update(&student).await?;
        info!(%hostel_id, student_id = %id, %room_id, "student assigned to room");
        Ok(student)
    }

    /// Clear a student's room assignment.
    pub async fn vacate_room(&self, hostel_id: HostelId, id: StudentId) -> Result<Student, Error> {
        let existing = self.get_student(hostel_id, id).await?;
        let student = Student {
            room_id: None,
            ..existing
        };
        self.repos.students.update(&student).await?;
        Ok(student)
    }

    /// Remove a student and their account.
    pub async fn delete_student(&self, hostel_id: HostelId, id: StudentId) -> Result<(), Error> {
        if !self.repos.students.delete(hostel_id, id).await? {
            return Err(Error::not_found(format!("student {id} not found")));
        }
        info!(%hostel_id, student_id = %id, "student deleted");
        Ok(())
    }

    // Guests

    /// One page of guests, latest check-in first.
    pub async fn list_guests(
        &self,
        hostel_id: HostelId,
        page: &PageRequest,
    ) -> Result<Page<TemporaryGuest>, Error> {
        let (guests, total) = self.repos.guests.list_page(hostel_id, page).await?;
        Ok(Page::new(guests, page, total))
    }

    /// Register a guest in a room with a free bed.
    pub async fn create_guest(
        &self,
        hostel_id: HostelId,
        draft: GuestDraft,
    ) -> Result<TemporaryGuest, Error> {
        let details = draft.validate()?;
        self.ensure_room_has_space(hostel_id, details.room_id)
            .await?;
        let guest = TemporaryGuest {
            id: GuestId::random(),
            hostel_id,
            details,
        };
        self.repos.guests.insert(&guest).await?;
        info!(%hostel_id, guest_id = %guest.id, "guest registered");
        Ok(guest)
    }

    /// Edit a guest; moving to another room needs a free bed there.
    pub async fn update_guest(
        &self,
        hostel_id: HostelId,
        id: GuestId,
        draft: GuestDraft,
    ) -> Result<TemporaryGuest, Error> {
        let existing = self
            .repos
            .guests
            .find(hostel_id, id)
            .await?
            .ok_or_else(|| Error::not_found(format!("guest {id} not found")))?;
        let details = draft.validate()?;
        if details.room_id != existing.details.room_id {
            self.ensure_room_has_space(hostel_id, details.room_id)
                .await?;
        }
        let guest = TemporaryGuest {
            details,
            ..existing
        };
        self.repos.guests.update(&guest).await?;
        Ok(guest)
    }

    /// Remove a guest.
    pub async fn delete_guest(&self, hostel_id: HostelId, id: GuestId) -> Result<(), Error> {
        if !self.repos.guests.delete(hostel_id, id).await? {
            return Err(Error::not_found(format!("guest {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::AccountRepository;
    use crate::domain::test_support::{PlainHasher, date, hostel, seed_hostel};
    use crate::domain::{ErrorCode, Hostel, Room, RoomDraft, RoomService};
    use crate::outbound::memory::InMemoryStore;
    use rstest::{fixture, rstest};

    struct Harness {
        store: Arc<InMemoryStore>,
        service: ResidentService,
        hostel: Hostel,
        room: Room,
    }

    #[fixture]
    async fn harness() -> Harness {
        let store = Arc::new(InMemoryStore::default());
        let hostel = hostel("HH-1", 10);
        seed_hostel(&store, &hostel).await;
        let room = RoomService::new(store.clone(), store.clone())
            .create_room(
                hostel.id,
                RoomDraft {
                    room_number: "A1".into(),
                    capacity: "2".into(),
                    floor: 1,
                    room_type: "double".into(),
                    price: 30_000,
                },
            )
            .await
            .expect("room");
        let service = ResidentService::new(
            ResidentRepositories {
                students: store.clone(),
                guests: store.clone(),
                rooms: store.clone(),
                hostels: store.clone(),
                accounts: store.clone(),
            },
            Arc::new(PlainHasher),
        );
        Harness {
            store,
            service,
            hostel,
            room,
        }
    }

    fn student(name: &str, room_id: Option<RoomId>) -> NewStudent {
        NewStudent {
            details: StudentDraft {
                full_name: name.into(),
                email: format!("{}@students.example", name.to_lowercase()),
                phone: "+44 20 7946 0001".into(),
                guardian_name: "Guardian".into(),
                guardian_phone: "+44 20 7946 0002".into(),
                enrolled_on: date("2026-09-01"),
            },
            password: "initial password".into(),
            room_id,
        }
    }

    fn guest(room_id: RoomId) -> GuestDraft {
        GuestDraft {
            room_id,
            full_name: "Visiting Parent".into(),
            phone: "+1 555 010 0000".into(),
            purpose: "Family visit".into(),
            check_in: date("2026-05-10"),
            check_out: date("2026-05-12"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_student_creates_login_account(#[future] harness: Harness) {
        let harness = harness.await;
        let student = harness
            .service
            .create_student(harness.hostel.id, student("Ada", Some(harness.room.id)))
            .await
            .expect("student");
        let account = harness
            .store
            .find_by_email("ada@students.example")
            .await
            .expect("lookup")
            .expect("account exists");
        assert_eq!(account.role, Role::Student);
        assert_eq!(account.profile_id, Some(*student.id.as_uuid()));
        assert_eq!(account.password_hash, "plain:initial password");
    }

    #[rstest]
    #[tokio::test]
    async fn full_room_rejects_students_and_guests(#[future] harness: Harness) {
        let harness = harness.await;
        let room_id = harness.room.id;
        harness
            .service
            .create_student(harness.hostel.id, student("Ada", Some(room_id)))
            .await
            .expect("first bed");
        harness
            .service
            .create_guest(harness.hostel.id, guest(room_id))
            .await
            .expect("second bed");

        let late = harness
            .service
            .create_student(harness.hostel.id, student("Grace", None))
            .await
            .expect("student without room");
        let assign = harness
            .service
            .assign_room(harness.hostel.id, late.id, room_id)
            .await
            .expect_err("room full");
        assert_eq!(assign.code(), ErrorCode::Conflict);

        let extra_guest = harness
            .service
            .create_guest(harness.hostel.id, guest(room_id))
            .await
            .expect_err("room full");
        assert_eq!(extra_guest.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn reassigning_to_own_full_room_is_a_no_op(#[future] harness: Harness) {
        let harness = harness.await;
        let room_id = harness.room.id;
        let ada = harness
            .service
            .create_student(harness.hostel.id, student("Ada", Some(room_id)))
            .await
            .expect("ada");
        harness
            .service
            .create_student(harness.hostel.id, student("Grace", Some(room_id)))
            .await
            .expect("grace");
        let again = harness
            .service
            .assign_room(harness.hostel.id, ada.id, room_id)
            .await
            .expect("same room");
        assert_eq!(again.room_id, Some(room_id));

        let vacated = harness
            .service
            .vacate_room(harness.hostel.id, ada.id)
            .await
            .expect("vacate");
        assert_eq!(vacated.room_id, None);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_a_conflict(#[future] harness: Harness) {
        let harness = harness.await;
        harness
            .service
            .create_student(harness.hostel.id, student("Ada", None))
            .await
            .expect("ada");
        let err = harness
            .service
            .create_student(harness.hostel.id, student("ADA", None))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn email_cannot_change_on_update(#[future] harness: Harness) {
        let harness = harness.await;
        let ada = harness
            .service
            .create_student(harness.hostel.id, student("Ada", None))
            .await
            .expect("ada");
        let mut draft = student("Ada", None).details;
        draft.email = "someone@else.example".into();
        let err = harness
            .service
            .update_student(harness.hostel.id, ada.id, draft)
            .await
            .expect_err("immutable email");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_student_removes_the_account(#[future] harness: Harness) {
        let harness = harness.await;
        let ada = harness
            .service
            .create_student(harness.hostel.id, student("Ada", None))
            .await
            .expect("ada");
        harness
            .service
            .delete_student(harness.hostel.id, ada.id)
            .await
            .expect("deleted");
        assert!(
            harness
                .store
                .find_by_email("ada@students.example")
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn students_of_other_hostels_are_not_found(#[future] harness: Harness) {
        let harness = harness.await;
        let ada = harness
            .service
            .create_student(harness.hostel.id, student("Ada", None))
            .await
            .expect("ada");
        let err = harness
            .service
            .get_student(HostelId::random(), ada.id)
            .await
            .expect_err("foreign hostel");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
