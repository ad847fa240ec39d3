use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

pub mod amount;
pub mod case;
pub mod client;
pub mod expense;
pub mod payment;
pub mod task;

pub use amount::{parse_amount, AmountError};
pub use case::{Case, CaseStatus, CreateCaseRequest, UpdateCaseRequest, CASE_TYPE_SUGGESTIONS};
pub use client::{Client, ClientDetails, ClientPayload, ClientType, ContactInfo};
pub use expense::{CreateExpenseRequest, Expense, ExpenseStatus, UpdateExpenseRequest};
pub use payment::{CreatePaymentRequest, Payment, PaymentStatus, UpdatePaymentRequest};
pub use task::{CreateTaskRequest, Task, UpdateTaskRequest, TASK_STATUS_DONE, TASK_STATUS_NEW};

/// Reply body of POST/PUT/DELETE calls. Only some endpoints echo an id.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MutationResponse {
    pub id: Option<i64>,
    pub message: Option<String>,
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Dates come back either as `2025-12-05` or as a full timestamp string.
fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_prefix(&raw).ok_or_else(|| de::Error::custom(format!("Invalid date: {raw}")))
}

pub(crate) fn lenient_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date_prefix(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("Invalid date: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_prefix() {
        assert_eq!(
            parse_date_prefix("2025-12-05"),
            NaiveDate::from_ymd_opt(2025, 12, 5)
        );
        assert_eq!(
            parse_date_prefix("2025-12-05T10:00:00+03:00"),
            NaiveDate::from_ymd_opt(2025, 12, 5)
        );
        assert!(parse_date_prefix("05.12.2025").is_none());
        assert!(parse_date_prefix("short").is_none());
    }

    #[test]
    fn test_mutation_response_is_lenient() {
        let created: MutationResponse =
            serde_json::from_str(r#"{"id": 42, "message": "Дело создано"}"#).unwrap();
        assert_eq!(created.id, Some(42));

        let updated: MutationResponse = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(updated.id.is_none());
    }
}
