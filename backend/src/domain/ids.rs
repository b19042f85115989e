//! Strongly typed UUID identifiers for every hostel aggregate.
//!
//! Each identifier is a transparent newtype over [`Uuid`] so a room id can
//! never be passed where a student id is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error raised when a string is not a valid UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {0}")]
pub struct InvalidId(String);

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Borrow the inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an identifier from its hyphenated string form.
            pub fn parse(raw: &str) -> Result<Self, InvalidId> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| InvalidId(raw.to_owned()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Identifier of a hostel (the tenant boundary).
    HostelId
);
define_id!(
    /// Identifier of a room.
    RoomId
);
define_id!(
    /// Identifier of a student profile.
    StudentId
);
define_id!(
    /// Identifier of a temporary guest.
    GuestId
);
define_id!(
    /// Identifier of a hostel admin profile.
    AdminId
);
define_id!(
    /// Identifier of a login account (credential record).
    AccountId
);
define_id!(
    /// Identifier of an inventory item.
    InventoryItemId
);
define_id!(
    /// Identifier of an announcement.
    AnnouncementId
);
define_id!(
    /// Identifier of a finance record.
    FinanceRecordId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parse_trims_and_round_trips() {
        let id = RoomId::random();
        let parsed = RoomId::parse(&format!("  {id} ")).expect("valid uuid");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn parse_rejects_garbage() {
        assert!(StudentId::parse("not-a-uuid").is_err());
    }

    #[rstest]
    fn serialises_transparently() {
        let id = HostelId::from_uuid(Uuid::nil());
        let json = serde_json::to_value(id).expect("serialise id");
        assert_eq!(json, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }
}
