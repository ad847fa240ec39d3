//! Access to the practice backend.
//!
//! The backend is a set of HTTP functions, one URL per entity. It is the
//! only source of truth: nothing is cached here, and callers refetch whole
//! lists after every mutation.

pub mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use http::HttpGateway;

use async_trait::async_trait;
use shared_types::{
    Case, Client, ClientPayload, CreateCaseRequest, CreateExpenseRequest, CreatePaymentRequest,
    CreateTaskRequest, Expense, MutationResponse, Payment, Task, UpdateCaseRequest,
    UpdateExpenseRequest, UpdatePaymentRequest, UpdateTaskRequest,
};

/// Any failed backend call.
///
/// Transport errors, non-2xx statuses and undecodable list bodies all end up
/// here. `detail` is for logs only; callers treat every failure the same.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{operation} failed: {detail}")]
pub struct GatewayError {
    pub operation: &'static str,
    pub detail: String,
}

impl GatewayError {
    pub fn new(operation: &'static str, detail: impl Into<String>) -> Self {
        Self {
            operation,
            detail: detail.into(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait CrmGateway: Send + Sync {
    async fn list_cases(&self) -> GatewayResult<Vec<Case>>;
    async fn create_case(&self, request: &CreateCaseRequest) -> GatewayResult<MutationResponse>;
    async fn update_case(&self, request: &UpdateCaseRequest) -> GatewayResult<MutationResponse>;
    /// The backend never deletes cases; DELETE moves them to the archive.
    async fn archive_case(&self, id: i64) -> GatewayResult<MutationResponse>;

    async fn list_clients(&self) -> GatewayResult<Vec<Client>>;
    async fn create_client(&self, payload: &ClientPayload) -> GatewayResult<MutationResponse>;
    async fn update_client(&self, payload: &ClientPayload) -> GatewayResult<MutationResponse>;

    async fn list_payments(&self) -> GatewayResult<Vec<Payment>>;
    async fn create_payment(&self, request: &CreatePaymentRequest)
        -> GatewayResult<MutationResponse>;
    async fn update_payment(&self, request: &UpdatePaymentRequest)
        -> GatewayResult<MutationResponse>;
    async fn delete_payment(&self, id: i64) -> GatewayResult<MutationResponse>;

    async fn list_expenses(&self) -> GatewayResult<Vec<Expense>>;
    async fn create_expense(&self, request: &CreateExpenseRequest)
        -> GatewayResult<MutationResponse>;
    async fn update_expense(&self, request: &UpdateExpenseRequest)
        -> GatewayResult<MutationResponse>;
    async fn delete_expense(&self, id: i64) -> GatewayResult<MutationResponse>;

    async fn list_tasks(&self, case_id: Option<i64>) -> GatewayResult<Vec<Task>>;
    async fn create_task(&self, request: &CreateTaskRequest) -> GatewayResult<MutationResponse>;
    async fn update_task(&self, request: &UpdateTaskRequest) -> GatewayResult<MutationResponse>;
}
