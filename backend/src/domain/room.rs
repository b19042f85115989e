//! Room aggregate and its capacity primitive.
//!
//! Capacity reaches the backend as text, both from forms and from the
//! `rooms.capacity` column, so [`RoomCapacity::parse`] is the single place
//! that turns it into a number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{FieldError, in_range, required_text};
use super::{HostelId, RoomId};

/// Largest number of beds a single room may hold.
pub const MAX_ROOM_CAPACITY: u32 = 64;

/// Number of occupants a room can hold.
///
/// ## Invariants
/// - `1 <= capacity <= MAX_ROOM_CAPACITY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomCapacity(u32);

impl RoomCapacity {
    /// Validate a numeric capacity.
    pub fn new(value: u32) -> Result<Self, FieldError> {
        in_range("capacity", value, 1, MAX_ROOM_CAPACITY).map(Self)
    }

    /// Parse a capacity stored or submitted as a string.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::RoomCapacity;
    ///
    /// assert_eq!(RoomCapacity::parse(" 4 ").unwrap().get(), 4);
    /// assert!(RoomCapacity::parse("four").is_err());
    /// assert!(RoomCapacity::parse("0").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        let value = trimmed.parse::<u32>().map_err(|_| {
            FieldError::new(
                "capacity",
                "invalid_format",
                format!("capacity must be a whole number, got '{trimmed}'"),
            )
        })?;
        Self::new(value)
    }

    /// Capacity as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of room offered by a hostel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Dormitory,
    Suite,
}

impl RoomType {
    /// Stable storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Dormitory => "dormitory",
            Self::Suite => "suite",
        }
    }
}

impl FromStr for RoomType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "dormitory" => Ok(Self::Dormitory),
            "suite" => Ok(Self::Suite),
            _ => Err(FieldError::new(
                "roomType",
                "invalid_choice",
                "roomType must be one of single, double, dormitory, suite",
            )),
        }
    }
}

/// Raw room fields as submitted by a hostel admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDraft {
    pub room_number: String,
    pub capacity: String,
    pub floor: i32,
    pub room_type: String,
    /// Price in minor currency units.
    pub price: i64,
}

/// Validated, editable room fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetails {
    pub room_number: String,
    pub capacity: RoomCapacity,
    pub floor: i32,
    pub room_type: RoomType,
    pub price: i64,
}

impl RoomDraft {
    /// Validate the draft.
    pub fn validate(self) -> Result<RoomDetails, FieldError> {
        Ok(RoomDetails {
            room_number: required_text("roomNumber", &self.room_number, 16)?,
            capacity: RoomCapacity::parse(&self.capacity)?,
            floor: in_range("floor", self.floor, -5, 200)?,
            room_type: self.room_type.parse()?,
            price: in_range("price", self.price, 0, i64::MAX)?,
        })
    }
}

/// Inhabitable unit with a capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub hostel_id: HostelId,
    pub details: RoomDetails,
}

impl Room {
    /// Room numbers compare case-insensitively within a hostel.
    #[must_use]
    pub fn has_number(&self, number: &str) -> bool {
        self.details.room_number.eq_ignore_ascii_case(number.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(capacity: &str) -> RoomDraft {
        RoomDraft {
            room_number: " A-101 ".into(),
            capacity: capacity.into(),
            floor: 1,
            room_type: "Double".into(),
            price: 45_000,
        }
    }

    #[rstest]
    #[case("2", 2)]
    #[case(" 12\n", 12)]
    #[case("64", 64)]
    fn parses_string_capacity(#[case] raw: &str, #[case] expected: u32) {
        let details = draft(raw).validate().expect("valid room");
        assert_eq!(details.capacity.get(), expected);
        assert_eq!(details.room_number, "A-101");
        assert_eq!(details.room_type, RoomType::Double);
    }

    #[rstest]
    #[case("", "invalid_format")]
    #[case("2.5", "invalid_format")]
    #[case("-1", "invalid_format")]
    #[case("0", "out_of_range")]
    #[case("65", "out_of_range")]
    fn rejects_bad_capacity(#[case] raw: &str, #[case] code: &str) {
        let err = draft(raw).validate().expect_err("bad capacity");
        assert_eq!(err.field(), "capacity");
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn rejects_unknown_room_type() {
        let err = RoomDraft {
            room_type: "penthouse".into(),
            ..draft("2")
        }
        .validate()
        .expect_err("unknown type");
        assert_eq!(err.field(), "roomType");
    }

    #[rstest]
    fn rejects_negative_price() {
        let err = RoomDraft {
            price: -1,
            ..draft("2")
        }
        .validate()
        .expect_err("negative price");
        assert_eq!(err.field(), "price");
    }
}
