//! Process-local implementation of every repository port.
//!
//! The store keeps each table in a `HashMap` behind one `RwLock`, so the
//! multi-record writes (hostel plus first admin, profile plus account) are
//! applied atomically. It mirrors the uniqueness and cascade rules of the
//! PostgreSQL schema and is used by the server when no database URL is
//! configured, and by the service and handler tests.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{
    AccountRepository, AdminRepository, AnnouncementRepository, FinanceRepository,
    GuestRepository, HostelRepository, InventoryRepository, MealPlanRepository, RepositoryError,
    RoomRepository, StudentRepository, SystemSettingsRepository,
};
use crate::domain::{
    Account, AccountId, Admin, AdminId, Announcement, AnnouncementId, FinanceKind, FinanceRecord,
    FinanceRecordId, GuestId, Hostel, HostelId, InventoryItem, InventoryItemId, MealPlan,
    OccupantKind, OccupantRecord, Room, RoomId, SearchTerm, Student, StudentId, SystemSettings,
    TemporaryGuest, Weekday,
};

#[derive(Default)]
struct Tables {
    hostels: HashMap<HostelId, Hostel>,
    admins: HashMap<AdminId, Admin>,
    accounts: HashMap<AccountId, Account>,
    rooms: HashMap<RoomId, Room>,
    students: HashMap<StudentId, Student>,
    guests: HashMap<GuestId, TemporaryGuest>,
    inventory: HashMap<InventoryItemId, InventoryItem>,
    meal_plans: HashMap<(HostelId, Weekday), MealPlan>,
    announcements: HashMap<AnnouncementId, Announcement>,
    finance: HashMap<FinanceRecordId, FinanceRecord>,
    settings: Option<SystemSettings>,
}

impl Tables {
    fn ensure_email_free(&self, email: &str) -> Result<(), RepositoryError> {
        if self.accounts.values().any(|account| account.email == email) {
            return Err(RepositoryError::conflict("email already in use"));
        }
        Ok(())
    }

    fn ensure_room_number_free(&self, room: &Room) -> Result<(), RepositoryError> {
        let taken = self.rooms.values().any(|other| {
            other.hostel_id == room.hostel_id
                && other.id != room.id
                && other.has_number(&room.details.room_number)
        });
        if taken {
            return Err(RepositoryError::conflict("room number already exists"));
        }
        Ok(())
    }

    fn remove_account_for(&mut self, profile_id: Uuid) {
        self.accounts
            .retain(|_, account| account.profile_id != Some(profile_id));
    }
}

/// In-memory repository adapter.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::query("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::query("in-memory store lock poisoned"))
    }
}

fn paginate<T>(items: Vec<T>, page: &PageRequest) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    (items.into_iter().skip(offset).take(limit).collect(), total)
}

fn sort_rooms(rooms: &mut [Room]) {
    rooms.sort_by(|a, b| {
        a.details
            .room_number
            .to_lowercase()
            .cmp(&b.details.room_number.to_lowercase())
            .then(a.id.cmp(&b.id))
    });
}

fn sort_students(students: &mut [Student]) {
    students.sort_by(|a, b| {
        a.details
            .full_name
            .cmp(&b.details.full_name)
            .then(a.id.cmp(&b.id))
    });
}

#[async_trait]
impl HostelRepository for InMemoryStore {
    async fn insert_with_admin(
        &self,
        hostel: &Hostel,
        admin: &Admin,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        let number = &hostel.details.hostel_number;
        if tables
            .hostels
            .values()
            .any(|other| &other.details.hostel_number == number)
        {
            return Err(RepositoryError::conflict("hostel number already in use"));
        }
        tables.ensure_email_free(&account.email)?;
        tables.hostels.insert(hostel.id, hostel.clone());
        tables.admins.insert(admin.id, admin.clone());
        tables.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn update(&self, hostel: &Hostel) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        let number = &hostel.details.hostel_number;
        if tables
            .hostels
            .values()
            .any(|other| other.id != hostel.id && &other.details.hostel_number == number)
        {
            return Err(RepositoryError::conflict("hostel number already in use"));
        }
        match tables.hostels.get_mut(&hostel.id) {
            Some(stored) => {
                stored.details = hostel.details.clone();
                stored.expires_on = hostel.expires_on;
                Ok(())
            }
            None => Err(RepositoryError::query("hostel not found for update")),
        }
    }

    async fn find_by_id(&self, id: HostelId) -> Result<Option<Hostel>, RepositoryError> {
        Ok(self.read()?.hostels.get(&id).cloned())
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Hostel>, RepositoryError> {
        Ok(self
            .read()?
            .hostels
            .values()
            .find(|hostel| hostel.details.hostel_number == number)
            .cloned())
    }

    async fn list_page(
        &self,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Hostel>, u64), RepositoryError> {
        let mut hostels: Vec<Hostel> = self
            .read()?
            .hostels
            .values()
            .filter(|hostel| {
                search.matches_any(&[&hostel.details.name, &hostel.details.hostel_number])
            })
            .cloned()
            .collect();
        hostels.sort_by(|a, b| a.details.name.cmp(&b.details.name).then(a.id.cmp(&b.id)));
        Ok(paginate(hostels, page))
    }

    async fn list_all(&self) -> Result<Vec<Hostel>, RepositoryError> {
        let mut hostels: Vec<Hostel> = self.read()?.hostels.values().cloned().collect();
        hostels.sort_by(|a, b| a.details.name.cmp(&b.details.name).then(a.id.cmp(&b.id)));
        Ok(hostels)
    }

    async fn delete(&self, id: HostelId) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if tables.hostels.remove(&id).is_none() {
            return Ok(false);
        }
        tables.admins.retain(|_, admin| admin.hostel_id != id);
        tables.accounts.retain(|_, account| account.hostel_id != Some(id));
        tables.rooms.retain(|_, room| room.hostel_id != id);
        tables.students.retain(|_, student| student.hostel_id != id);
        tables.guests.retain(|_, guest| guest.hostel_id != id);
        tables.inventory.retain(|_, item| item.hostel_id != id);
        tables.meal_plans.retain(|(hostel_id, _), _| *hostel_id != id);
        tables.announcements.retain(|_, a| a.hostel_id != id);
        tables.finance.retain(|_, record| record.hostel_id != id);
        Ok(true)
    }
}

#[async_trait]
impl AdminRepository for InMemoryStore {
    async fn insert_with_account(
        &self,
        admin: &Admin,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_email_free(&account.email)?;
        tables.admins.insert(admin.id, admin.clone());
        tables.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn list_for_hostel(&self, hostel_id: HostelId) -> Result<Vec<Admin>, RepositoryError> {
        let mut admins: Vec<Admin> = self
            .read()?
            .admins
            .values()
            .filter(|admin| admin.hostel_id == hostel_id)
            .cloned()
            .collect();
        admins.sort_by(|a, b| {
            a.details
                .full_name
                .cmp(&b.details.full_name)
                .then(a.id.cmp(&b.id))
        });
        Ok(admins)
    }

    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        Ok(self.read()?.admins.get(&id).cloned())
    }

    async fn delete(&self, id: AdminId) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if tables.admins.remove(&id).is_none() {
            return Ok(false);
        }
        tables.remove_account_for(*id.as_uuid());
        Ok(true)
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn insert(&self, account: &Account) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_email_free(&account.email)?;
        tables.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|account| account.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.read()?.accounts.get(&id).cloned())
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        Ok(match tables.accounts.get_mut(&id) {
            Some(account) => {
                password_hash.clone_into(&mut account.password_hash);
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn insert(&self, room: &Room) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_room_number_free(room)?;
        tables.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_room_number_free(room)?;
        match tables.rooms.get_mut(&room.id) {
            Some(stored) if stored.hostel_id == room.hostel_id => {
                stored.details = room.details.clone();
                Ok(())
            }
            _ => Err(RepositoryError::query("room not found for update")),
        }
    }

    async fn delete(&self, hostel_id: HostelId, id: RoomId) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if !tables
            .rooms
            .get(&id)
            .is_some_and(|room| room.hostel_id == hostel_id)
        {
            return Ok(false);
        }
        tables.rooms.remove(&id);
        for student in tables.students.values_mut() {
            if student.room_id == Some(id) {
                student.room_id = None;
            }
        }
        tables.guests.retain(|_, guest| guest.details.room_id != id);
        Ok(true)
    }

    async fn find(&self, hostel_id: HostelId, id: RoomId) -> Result<Option<Room>, RepositoryError> {
        Ok(self
            .read()?
            .rooms
            .get(&id)
            .filter(|room| room.hostel_id == hostel_id)
            .cloned())
    }

    async fn find_by_number(
        &self,
        hostel_id: HostelId,
        number: &str,
    ) -> Result<Option<Room>, RepositoryError> {
        Ok(self
            .read()?
            .rooms
            .values()
            .find(|room| room.hostel_id == hostel_id && room.has_number(number))
            .cloned())
    }

    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError> {
        Ok(self
            .read()?
            .rooms
            .values()
            .filter(|room| room.hostel_id == hostel_id)
            .count() as u64)
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        Ok(self.read()?.rooms.len() as u64)
    }

    async fn list_page(
        &self,
        hostel_id: HostelId,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Room>, u64), RepositoryError> {
        let mut rooms: Vec<Room> = self
            .read()?
            .rooms
            .values()
            .filter(|room| room.hostel_id == hostel_id && search.matches(&room.details.room_number))
            .cloned()
            .collect();
        sort_rooms(&mut rooms);
        Ok(paginate(rooms, page))
    }

    async fn list_all(&self, hostel_id: HostelId) -> Result<Vec<Room>, RepositoryError> {
        let mut rooms: Vec<Room> = self
            .read()?
            .rooms
            .values()
            .filter(|room| room.hostel_id == hostel_id)
            .cloned()
            .collect();
        sort_rooms(&mut rooms);
        Ok(rooms)
    }

    async fn occupants(
        &self,
        hostel_id: HostelId,
        room_ids: &[RoomId],
    ) -> Result<Vec<OccupantRecord>, RepositoryError> {
        let tables = self.read()?;
        let students = tables.students.values().filter_map(|student| {
            student
                .room_id
                .filter(|room_id| student.hostel_id == hostel_id && room_ids.contains(room_id))
                .map(|room_id| OccupantRecord {
                    room_id,
                    name: student.details.full_name.clone(),
                    kind: OccupantKind::Student,
                })
        });
        let guests = tables
            .guests
            .values()
            .filter(|guest| {
                guest.hostel_id == hostel_id && room_ids.contains(&guest.details.room_id)
            })
            .map(|guest| OccupantRecord {
                room_id: guest.details.room_id,
                name: guest.details.full_name.clone(),
                kind: OccupantKind::Guest,
            });
        Ok(students.chain(guests).collect())
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn insert_with_account(
        &self,
        student: &Student,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_email_free(&account.email)?;
        tables.students.insert(student.id, student.clone());
        tables.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn update(&self, student: &Student) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        match tables.students.get_mut(&student.id) {
            Some(stored) if stored.hostel_id == student.hostel_id => {
                stored.details = student.details.clone();
                stored.room_id = student.room_id;
                Ok(())
            }
            _ => Err(RepositoryError::query("student not found for update")),
        }
    }

    async fn find(
        &self,
        hostel_id: HostelId,
        id: StudentId,
    ) -> Result<Option<Student>, RepositoryError> {
        Ok(self
            .read()?
            .students
            .get(&id)
            .filter(|student| student.hostel_id == hostel_id)
            .cloned())
    }

    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError> {
        Ok(self
            .read()?
            .students
            .values()
            .filter(|student| student.hostel_id == hostel_id)
            .count() as u64)
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        Ok(self.read()?.students.len() as u64)
    }

    async fn list_page(
        &self,
        hostel_id: HostelId,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Student>, u64), RepositoryError> {
        let mut students: Vec<Student> = self
            .read()?
            .students
            .values()
            .filter(|student| {
                student.hostel_id == hostel_id
                    && search.matches_any(&[&student.details.full_name, &student.details.email])
            })
            .cloned()
            .collect();
        sort_students(&mut students);
        Ok(paginate(students, page))
    }

    async fn list_in_room(
        &self,
        hostel_id: HostelId,
        room_id: RoomId,
    ) -> Result<Vec<Student>, RepositoryError> {
        let mut students: Vec<Student> = self
            .read()?
            .students
            .values()
            .filter(|student| student.hostel_id == hostel_id && student.room_id == Some(room_id))
            .cloned()
            .collect();
        sort_students(&mut students);
        Ok(students)
    }

    async fn delete(&self, hostel_id: HostelId, id: StudentId) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if !tables
            .students
            .get(&id)
            .is_some_and(|student| student.hostel_id == hostel_id)
        {
            return Ok(false);
        }
        tables.students.remove(&id);
        tables.remove_account_for(*id.as_uuid());
        Ok(true)
    }
}

#[async_trait]
impl GuestRepository for InMemoryStore {
    async fn insert(&self, guest: &TemporaryGuest) -> Result<(), RepositoryError> {
        self.write()?.guests.insert(guest.id, guest.clone());
        Ok(())
    }

    async fn update(&self, guest: &TemporaryGuest) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        match tables.guests.get_mut(&guest.id) {
            Some(stored) if stored.hostel_id == guest.hostel_id => {
                stored.details = guest.details.clone();
                Ok(())
            }
            _ => Err(RepositoryError::query("guest not found for update")),
        }
    }

    async fn find(
        &self,
        hostel_id: HostelId,
        id: GuestId,
    ) -> Result<Option<TemporaryGuest>, RepositoryError> {
        Ok(self
            .read()?
            .guests
            .get(&id)
            .filter(|guest| guest.hostel_id == hostel_id)
            .cloned())
    }

    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError> {
        Ok(self
            .read()?
            .guests
            .values()
            .filter(|guest| guest.hostel_id == hostel_id)
            .count() as u64)
    }

    async fn list_page(
        &self,
        hostel_id: HostelId,
        page: &PageRequest,
    ) -> Result<(Vec<TemporaryGuest>, u64), RepositoryError> {
        let mut guests: Vec<TemporaryGuest> = self
            .read()?
            .guests
            .values()
            .filter(|guest| guest.hostel_id == hostel_id)
            .cloned()
            .collect();
        guests.sort_by(|a, b| {
            b.details
                .check_in
                .cmp(&a.details.check_in)
                .then(a.id.cmp(&b.id))
        });
        Ok(paginate(guests, page))
    }

    async fn delete(&self, hostel_id: HostelId, id: GuestId) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if !tables
            .guests
            .get(&id)
            .is_some_and(|guest| guest.hostel_id == hostel_id)
        {
            return Ok(false);
        }
        tables.guests.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl InventoryRepository for InMemoryStore {
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<InventoryItem>, RepositoryError> {
        let mut items: Vec<InventoryItem> = self
            .read()?
            .inventory
            .values()
            .filter(|item| item.hostel_id == hostel_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.details
                .category
                .cmp(&b.details.category)
                .then_with(|| a.details.name.cmp(&b.details.name))
                .then(a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn find(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
    ) -> Result<Option<InventoryItem>, RepositoryError> {
        Ok(self
            .read()?
            .inventory
            .get(&id)
            .filter(|item| item.hostel_id == hostel_id)
            .cloned())
    }

    async fn insert(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        self.write()?.inventory.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        match tables.inventory.get_mut(&item.id) {
            Some(stored) if stored.hostel_id == item.hostel_id => {
                stored.details = item.details.clone();
                Ok(())
            }
            _ => Err(RepositoryError::query("inventory item not found for update")),
        }
    }

    async fn delete(
        &self,
        hostel_id: HostelId,
        id: InventoryItemId,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if !tables
            .inventory
            .get(&id)
            .is_some_and(|item| item.hostel_id == hostel_id)
        {
            return Ok(false);
        }
        tables.inventory.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl MealPlanRepository for InMemoryStore {
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<MealPlan>, RepositoryError> {
        Ok(self
            .read()?
            .meal_plans
            .values()
            .filter(|plan| plan.hostel_id == hostel_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, plan: &MealPlan) -> Result<(), RepositoryError> {
        self.write()?
            .meal_plans
            .insert((plan.hostel_id, plan.weekday), plan.clone());
        Ok(())
    }

    async fn delete(&self, hostel_id: HostelId, weekday: Weekday) -> Result<bool, RepositoryError> {
        Ok(self
            .write()?
            .meal_plans
            .remove(&(hostel_id, weekday))
            .is_some())
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryStore {
    async fn list(&self, hostel_id: HostelId) -> Result<Vec<Announcement>, RepositoryError> {
        let mut announcements: Vec<Announcement> = self
            .read()?
            .announcements
            .values()
            .filter(|a| a.hostel_id == hostel_id)
            .cloned()
            .collect();
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(announcements)
    }

    async fn insert(&self, announcement: &Announcement) -> Result<(), RepositoryError> {
        self.write()?
            .announcements
            .insert(announcement.id, announcement.clone());
        Ok(())
    }

    async fn delete(
        &self,
        hostel_id: HostelId,
        id: AnnouncementId,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if !tables
            .announcements
            .get(&id)
            .is_some_and(|a| a.hostel_id == hostel_id)
        {
            return Ok(false);
        }
        tables.announcements.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl FinanceRepository for InMemoryStore {
    async fn list(
        &self,
        hostel_id: HostelId,
        kind: Option<FinanceKind>,
    ) -> Result<Vec<FinanceRecord>, RepositoryError> {
        let mut records: Vec<FinanceRecord> = self
            .read()?
            .finance
            .values()
            .filter(|record| {
                record.hostel_id == hostel_id && kind.is_none_or(|k| record.details.kind == k)
            })
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.details
                .recorded_on
                .cmp(&a.details.recorded_on)
                .then(a.id.cmp(&b.id))
        });
        Ok(records)
    }

    async fn insert(&self, record: &FinanceRecord) -> Result<(), RepositoryError> {
        self.write()?.finance.insert(record.id, record.clone());
        Ok(())
    }

    async fn delete(
        &self,
        hostel_id: HostelId,
        id: FinanceRecordId,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;
        if !tables
            .finance
            .get(&id)
            .is_some_and(|record| record.hostel_id == hostel_id)
        {
            return Ok(false);
        }
        tables.finance.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl SystemSettingsRepository for InMemoryStore {
    async fn load(&self) -> Result<Option<SystemSettings>, RepositoryError> {
        Ok(self.read()?.settings.clone())
    }

    async fn save(&self, settings: &SystemSettings) -> Result<(), RepositoryError> {
        self.write()?.settings = Some(settings.clone());
        Ok(())
    }
}
