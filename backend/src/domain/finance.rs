//! Income and expense ledger of a hostel.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{FieldError, in_range, optional_text, required_text};
use super::{FinanceRecordId, HostelId};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceKind {
    Income,
    Expense,
}

impl FinanceKind {
    /// Stable storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for FinanceKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(FieldError::new(
                "kind",
                "invalid_choice",
                "kind must be one of income, expense",
            )),
        }
    }
}

/// Raw ledger entry fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceDraft {
    pub kind: String,
    pub category: String,
    pub amount: i64,
    pub description: Option<String>,
    pub recorded_on: NaiveDate,
}

/// Validated ledger entry fields.
///
/// ## Invariants
/// - `amount > 0`, in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceDetails {
    pub kind: FinanceKind,
    pub category: String,
    pub amount: i64,
    pub description: Option<String>,
    pub recorded_on: NaiveDate,
}

impl FinanceDraft {
    /// Validate the draft.
    pub fn validate(self) -> Result<FinanceDetails, FieldError> {
        Ok(FinanceDetails {
            kind: self.kind.parse()?,
            category: required_text("category", &self.category, 60)?,
            amount: in_range("amount", self.amount, 1, i64::MAX)?,
            description: optional_text("description", self.description.as_deref(), 500)?,
            recorded_on: self.recorded_on,
        })
    }
}

/// Ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceRecord {
    pub id: FinanceRecordId,
    pub hostel_id: HostelId,
    pub details: FinanceDetails,
}

/// Totals over a hostel's ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

impl FinanceSummary {
    /// Sum a set of records.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use hostel_backend::domain::{
    ///     FinanceDetails, FinanceKind, FinanceRecord, FinanceRecordId, FinanceSummary, HostelId,
    /// };
    ///
    /// let record = |kind, amount| FinanceRecord {
    ///     id: FinanceRecordId::random(),
    ///     hostel_id: HostelId::random(),
    ///     details: FinanceDetails {
    ///         kind,
    ///         category: "rent".into(),
    ///         amount,
    ///         description: None,
    ///         recorded_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     },
    /// };
    /// let summary = FinanceSummary::from_records(&[
    ///     record(FinanceKind::Income, 500),
    ///     record(FinanceKind::Expense, 120),
    /// ]);
    /// assert_eq!(summary.balance, 380);
    /// ```
    #[must_use]
    pub fn from_records(records: &[FinanceRecord]) -> Self {
        let (income, expense) =
            records
                .iter()
                .fold((0_i64, 0_i64), |(income, expense), record| {
                    match record.details.kind {
                        FinanceKind::Income => {
                            (income.saturating_add(record.details.amount), expense)
                        }
                        FinanceKind::Expense => {
                            (income, expense.saturating_add(record.details.amount))
                        }
                    }
                });
        Self {
            income,
            expense,
            balance: income.saturating_sub(expense),
        }
    }
}
