use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Status of a case expense
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
pub enum ExpenseStatus {
    #[default]
    #[serde(rename = "планируемые")]
    Planned,
    #[serde(rename = "фактические")]
    Actual,
    #[serde(rename = "возмещенные")]
    Reimbursed,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 3] = [
        ExpenseStatus::Planned,
        ExpenseStatus::Actual,
        ExpenseStatus::Reimbursed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Planned => "планируемые",
            ExpenseStatus::Actual => "фактические",
            ExpenseStatus::Reimbursed => "возмещенные",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseStatus::Planned => "Планируемые",
            ExpenseStatus::Actual => "Фактические",
            ExpenseStatus::Reimbursed => "Возмещенные",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "планируемые" | "planned" => Ok(ExpenseStatus::Planned),
            "фактические" | "actual" => Ok(ExpenseStatus::Actual),
            "возмещенные" | "возмещённые" | "reimbursed" => Ok(ExpenseStatus::Reimbursed),
            other => Err(format!("Unknown expense status: {other}")),
        }
    }
}

/// Expense booked against a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Expense {
    pub id: i64,
    pub case_id: i64,
    #[serde(rename = "type")]
    pub expense_type: String,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub amount: f64,
    #[serde(deserialize_with = "crate::lenient_date")]
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: ExpenseStatus,
    pub created_at: Option<String>,

    // Joined by the backend for display
    pub case_title: Option<String>,
}

/// Request to book an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CreateExpenseRequest {
    pub case_id: i64,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: ExpenseStatus,
}

/// Request to update an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct UpdateExpenseRequest {
    pub id: i64,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: ExpenseStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_from_backend_row() {
        let json = r#"{
            "id": 5,
            "case_id": 12,
            "type": "Госпошлина",
            "amount": "30000.00",
            "date": "2025-11-15",
            "description": null,
            "status": "фактические",
            "created_at": "2025-11-15 12:00:00",
            "case_title": null
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.expense_type, "Госпошлина");
        assert_eq!(expense.amount, 30000.0);
        assert_eq!(expense.status, ExpenseStatus::Actual);
    }

    #[test]
    fn test_expense_status_default_is_planned() {
        let json = serde_json::to_string(&ExpenseStatus::default()).unwrap();
        assert_eq!(json, "\"планируемые\"");
    }
}
