//! Read models for the hostel-admin dashboard and the student portal.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{
    AnnouncementRepository, GuestRepository, HostelRepository, MealPlanRepository,
    RoomRepository, StudentRepository,
};
use crate::domain::room_service::{load_hostel, load_room_occupancy};
use crate::domain::{
    Announcement, Error, ErrorCode, Hostel, HostelId, MealPlan, OccupancySummary, Principal,
    RoomId, RoomOccupancy, Student, annotate_rooms,
};

/// Hostel-admin landing page figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostelDashboard {
    pub hostel: Hostel,
    pub occupancy: OccupancySummary,
    pub rooms: u64,
    pub students: u64,
    pub guests: u64,
}

/// A student's own record together with their room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    pub student: Student,
    pub hostel: Hostel,
    /// Room status and occupants (the student and their roommates).
    pub room: Option<RoomOccupancy>,
}

/// Repositories behind the portal service.
#[derive(Clone)]
pub struct PortalRepositories {
    pub hostels: Arc<dyn HostelRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub guests: Arc<dyn GuestRepository>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub meal_plans: Arc<dyn MealPlanRepository>,
}

/// Dashboard and student portal queries.
#[derive(Clone)]
pub struct PortalService {
    repos: PortalRepositories,
}

impl PortalService {
    /// Create the service.
    pub fn new(repos: PortalRepositories) -> Self {
        Self { repos }
    }

    /// Figures for the hostel-admin dashboard.
    pub async fn hostel_dashboard(&self, hostel_id: HostelId) -> Result<HostelDashboard, Error> {
        let hostel = load_hostel(self.repos.hostels.as_ref(), hostel_id).await?;
        let rooms = self.repos.rooms.list_all(hostel_id).await?;
        let ids: Vec<RoomId> = rooms.iter().map(|room| room.id).collect();
        let records = self.repos.rooms.occupants(hostel_id, &ids).await?;
        let annotated = annotate_rooms(rooms, records);
        Ok(HostelDashboard {
            hostel,
            occupancy: OccupancySummary::from_rooms(&annotated),
            rooms: annotated.len() as u64,
            students: self.repos.students.count(hostel_id).await?,
            guests: self.repos.guests.count(hostel_id).await?,
        })
    }

    /// The hostel of the calling admin.
    pub async fn hostel(&self, hostel_id: HostelId) -> Result<Hostel, Error> {
        load_hostel(self.repos.hostels.as_ref(), hostel_id).await
    }

    /// The calling student's record, hostel and room.
    pub async fn student_profile(&self, principal: &Principal) -> Result<StudentProfile, Error> {
        let hostel_id = principal.hostel()?;
        let student_id = principal.student()?;
        let student = self
            .repos
            .students
            .find(hostel_id, student_id)
            .await?
            .ok_or_else(|| Error::not_found("student profile not found"))?;
        let hostel = load_hostel(self.repos.hostels.as_ref(), hostel_id).await?;
        let room = match student.room_id {
            Some(room_id) => {
                match load_room_occupancy(self.repos.rooms.as_ref(), hostel_id, room_id).await {
                    Ok(room) => Some(room),
                    Err(err) if err.code() == ErrorCode::NotFound => {
                        warn!(%student_id, %room_id, "student references a missing room");
                        None
                    }
                    Err(err) => return Err(err),
                }
            }
            None => None,
        };
        Ok(StudentProfile {
            student,
            hostel,
            room,
        })
    }

    /// Announcements addressed to students, newest first.
    pub async fn student_announcements(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Announcement>, Error> {
        let hostel_id = principal.hostel()?;
        principal.student()?;
        let mut announcements = self.repos.announcements.list(hostel_id).await?;
        announcements.retain(|a| a.details.audience.reaches_students());
        Ok(announcements)
    }

    /// The hostel's weekly meal plan, Monday first.
    pub async fn student_meal_plans(&self, principal: &Principal) -> Result<Vec<MealPlan>, Error> {
        let hostel_id = principal.hostel()?;
        principal.student()?;
        let mut plans = self.repos.meal_plans.list(hostel_id).await?;
        plans.sort_by_key(|plan| plan.weekday);
        Ok(plans)
    }
}
