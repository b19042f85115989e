//! Weekly meal plans, one entry per weekday and hostel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::HostelId;
use super::validation::{FieldError, required_text};

/// Day of the week a meal plan applies to, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// The week in display order.
    pub const WEEK: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Stable storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::WEEK
            .into_iter()
            .find(|day| day.as_str() == lowered)
            .ok_or_else(|| {
                FieldError::new("weekday", "invalid_choice", format!("unknown weekday '{s}'"))
            })
    }
}

/// Raw meal fields for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlanDraft {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

/// Meals served on one weekday in one hostel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlan {
    pub hostel_id: HostelId,
    pub weekday: Weekday,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl MealPlanDraft {
    /// Validate the draft into the plan for `weekday`.
    pub fn validate(self, hostel_id: HostelId, weekday: Weekday) -> Result<MealPlan, FieldError> {
        Ok(MealPlan {
            hostel_id,
            weekday,
            breakfast: required_text("breakfast", &self.breakfast, 255)?,
            lunch: required_text("lunch", &self.lunch, 255)?,
            dinner: required_text("dinner", &self.dinner, 255)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Monday", Weekday::Monday)]
    #[case(" sunday ", Weekday::Sunday)]
    fn parses_weekdays(#[case] raw: &str, #[case] expected: Weekday) {
        assert_eq!(raw.parse::<Weekday>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_weekday() {
        let err = "funday".parse::<Weekday>().expect_err("unknown day");
        assert_eq!(err.field(), "weekday");
    }

    #[rstest]
    fn week_is_sorted_monday_first() {
        let mut shuffled = vec![Weekday::Sunday, Weekday::Wednesday, Weekday::Monday];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Sunday]
        );
    }
}
