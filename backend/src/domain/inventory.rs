//! Hostel inventory items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{FieldError, in_range, required_text};
use super::{HostelId, InventoryItemId};

/// Physical state of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    Good,
    NeedsRepair,
    Damaged,
}

impl ItemCondition {
    /// Stable storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsRepair => "needs_repair",
            Self::Damaged => "damaged",
        }
    }
}

impl FromStr for ItemCondition {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "good" => Ok(Self::Good),
            "needs_repair" => Ok(Self::NeedsRepair),
            "damaged" => Ok(Self::Damaged),
            _ => Err(FieldError::new(
                "condition",
                "invalid_choice",
                "condition must be one of good, needs_repair, damaged",
            )),
        }
    }
}

/// Raw inventory fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryDraft {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub condition: String,
}

/// Validated inventory fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryDetails {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub condition: ItemCondition,
}

impl InventoryDraft {
    /// Validate the draft.
    pub fn validate(self) -> Result<InventoryDetails, FieldError> {
        let quantity = in_range("quantity", self.quantity, 0, i64::from(u32::MAX))?;
        Ok(InventoryDetails {
            name: required_text("name", &self.name, 120)?,
            category: required_text("category", &self.category, 60)?,
            quantity: u32::try_from(quantity).unwrap_or(u32::MAX),
            condition: self.condition.parse()?,
        })
    }
}

/// Item tracked in a hostel's inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub hostel_id: HostelId,
    pub details: InventoryDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(quantity: i64, condition: &str) -> InventoryDraft {
        InventoryDraft {
            name: "Bunk bed".into(),
            category: "Furniture".into(),
            quantity,
            condition: condition.into(),
        }
    }

    #[rstest]
    #[case(0, "good", ItemCondition::Good)]
    #[case(12, "needs_repair", ItemCondition::NeedsRepair)]
    fn accepts_valid_items(
        #[case] quantity: i64,
        #[case] condition: &str,
        #[case] expected: ItemCondition,
    ) {
        let details = draft(quantity, condition).validate().expect("valid item");
        assert_eq!(details.condition, expected);
    }

    #[rstest]
    #[case(-1, "good", "quantity")]
    #[case(1, "broken", "condition")]
    fn rejects_invalid_items(#[case] quantity: i64, #[case] condition: &str, #[case] field: &str) {
        let err = draft(quantity, condition).validate().expect_err("invalid item");
        assert_eq!(err.field(), field);
    }
}
