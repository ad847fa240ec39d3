use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Status given to freshly created tasks
pub const TASK_STATUS_NEW: &str = "новая";
/// Status the backend counts towards a case's `completed_tasks`
pub const TASK_STATUS_DONE: &str = "выполнена";

/// Task attached to a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Task {
    pub id: i64,
    pub case_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient_optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub status: String,
    #[serde(default)]
    pub type_id: Option<i64>,
    #[serde(default)]
    pub priority_id: Option<i64>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub result_comment: Option<String>,

    // Joined by the backend for display
    pub case_title: Option<String>,
    pub assigned_to_name: Option<String>,
    pub priority_name: Option<String>,
    pub type_name: Option<String>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TASK_STATUS_DONE
    }

    /// Update carrying the stored values. The backend overwrites every column
    /// it accepts, so priority and assignee must be echoed back.
    pub fn update_request(&self) -> UpdateTaskRequest {
        UpdateTaskRequest {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            status: self.status.clone(),
            priority_id: self.priority_id,
            assigned_to: self.assigned_to,
            result_comment: self.result_comment.clone(),
        }
    }

    /// Update marking the task done, optionally with a result comment
    pub fn completion(&self, comment: Option<String>) -> UpdateTaskRequest {
        let mut request = self.update_request();
        request.status = TASK_STATUS_DONE.to_string();
        if comment.is_some() {
            request.result_comment = comment;
        }
        request
    }
}

/// Request to create a new task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CreateTaskRequest {
    pub case_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub type_id: Option<i64>,
    pub priority_id: Option<i64>,
    pub assigned_to: Option<i64>,
}

/// Request to update a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct UpdateTaskRequest {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub priority_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub result_comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_with_timestamp_due_date() {
        let json = r#"{
            "id": 9,
            "case_id": 12,
            "title": "Подать иск",
            "description": null,
            "due_date": "2025-12-05 10:00:00",
            "status": "выполнена",
            "case_title": "Иск о взыскании задолженности"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 12, 5));
        assert!(task.is_done());
        assert!(task.assigned_to_name.is_none());
    }

    #[test]
    fn test_task_without_due_date() {
        let json = r#"{"id": 1, "case_id": null, "title": "Звонок", "due_date": null, "status": "новая"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.due_date.is_none());
        assert!(!task.is_done());
    }

    #[test]
    fn test_completion_echoes_priority_and_assignee() {
        let json = r#"{
            "id": 4,
            "case_id": 12,
            "title": "Иск",
            "description": null,
            "due_date": "2025-12-05",
            "status": "новая",
            "type_id": 1,
            "priority_id": 2,
            "assigned_to": 7,
            "result_comment": null,
            "priority_name": "Высокий"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        let body = serde_json::to_value(task.completion(Some("Подано".to_string()))).unwrap();
        assert_eq!(body["id"], 4);
        assert_eq!(body["status"], TASK_STATUS_DONE);
        assert_eq!(body["priority_id"], 2);
        assert_eq!(body["assigned_to"], 7);
        assert_eq!(body["result_comment"], "Подано");
        assert_eq!(body["due_date"], "2025-12-05");

        let unchanged = serde_json::to_value(task.update_request()).unwrap();
        assert_eq!(unchanged["status"], TASK_STATUS_NEW);
        assert!(unchanged["result_comment"].is_null());
        assert!(unchanged.as_object().unwrap().contains_key("assigned_to"));
    }
}
