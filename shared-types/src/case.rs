use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Case categories offered in the case forms. The field itself is free text.
pub const CASE_TYPE_SUGGESTIONS: [&str; 6] = [
    "Гражданское",
    "Арбитраж",
    "Уголовное",
    "Претензионная работа",
    "Медиация",
    "Консультация",
];

/// Case status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
pub enum CaseStatus {
    #[default]
    #[serde(rename = "открыто")]
    Open,
    #[serde(rename = "в работе")]
    InProgress,
    #[serde(rename = "на паузе")]
    Paused,
    #[serde(rename = "завершено")]
    Completed,
    #[serde(rename = "архив")]
    Archived,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 5] = [
        CaseStatus::Open,
        CaseStatus::InProgress,
        CaseStatus::Paused,
        CaseStatus::Completed,
        CaseStatus::Archived,
    ];

    /// Wire literal
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "открыто",
            CaseStatus::InProgress => "в работе",
            CaseStatus::Paused => "на паузе",
            CaseStatus::Completed => "завершено",
            CaseStatus::Archived => "архив",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Open => "Открыто",
            CaseStatus::InProgress => "В работе",
            CaseStatus::Paused => "На паузе",
            CaseStatus::Completed => "Завершено",
            CaseStatus::Archived => "Архив",
        }
    }

    /// Open and in-progress cases count as active on the dashboard
    pub fn is_active(&self) -> bool {
        matches!(self, CaseStatus::Open | CaseStatus::InProgress)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        CaseStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .or(match normalized.as_str() {
                "open" => Some(CaseStatus::Open),
                "in-progress" | "in_progress" => Some(CaseStatus::InProgress),
                "paused" => Some(CaseStatus::Paused),
                "completed" => Some(CaseStatus::Completed),
                "archived" => Some(CaseStatus::Archived),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown case status: {s}"))
    }
}

/// Case record as returned by the cases endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Case {
    pub id: i64,
    pub internal_number: String,
    pub external_number: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: CaseStatus,
    #[serde(rename = "type")]
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub case_type: String,
    pub client_id: Option<i64>,

    // Joined by the backend for display
    pub client_name: Option<String>,
    pub client_company: Option<String>,
    pub responsible_name: Option<String>,

    #[serde(default)]
    pub tasks_count: i64,
    #[serde(default)]
    pub completed_tasks: i64,
    pub created_at: Option<String>,
}

impl Case {
    /// Name of the linked client, whichever of the joined columns is set
    pub fn client_display_name(&self) -> Option<&str> {
        self.client_name
            .as_deref()
            .or(self.client_company.as_deref())
    }
}

/// Request to create a new case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CreateCaseRequest {
    pub internal_number: String,
    pub external_number: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: CaseStatus,
    #[serde(rename = "type")]
    pub case_type: String,
    pub client_id: Option<i64>,
}

/// Request to update a case. `internal_number` always echoes the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct UpdateCaseRequest {
    pub id: i64,
    pub internal_number: String,
    pub external_number: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: CaseStatus,
    #[serde(rename = "type")]
    pub case_type: String,
    pub client_id: Option<i64>,
}
