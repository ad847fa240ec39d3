use super::{CrmGateway, GatewayError, GatewayResult};
use crate::config::{CrmConfig, EndpointsConfig};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    Case, Client, ClientPayload, CreateCaseRequest, CreateExpenseRequest, CreatePaymentRequest,
    CreateTaskRequest, Expense, MutationResponse, Payment, Task, UpdateCaseRequest,
    UpdateExpenseRequest, UpdatePaymentRequest, UpdateTaskRequest,
};
use std::time::Duration;
use tracing::{debug, warn};

/// Gateway over the backend's HTTP functions.
///
/// Each operation is exactly one request. Lists are `GET <url>`, creates
/// `POST`, updates `PUT` with the id in the body, and removals
/// `DELETE <url>?id=<id>`.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoints: EndpointsConfig,
}

impl HttpGateway {
    pub fn new(endpoints: EndpointsConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, endpoints })
    }

    pub fn from_config(config: &CrmConfig) -> anyhow::Result<Self> {
        Self::new(
            config.endpoints.clone(),
            Duration::from_secs(config.http.timeout_secs),
        )
    }

    fn request(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
    ) -> GatewayResult<RequestBuilder> {
        if url.is_empty() {
            return Err(failed(operation, "endpoint is not configured".to_string()));
        }
        debug!("{} {} ({})", method, url, operation);
        Ok(self.client.request(method, url))
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> GatewayResult<Vec<T>> {
        let response = send(operation, request).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| failed(operation, format!("invalid response body: {e}")))
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
        body: &B,
    ) -> GatewayResult<MutationResponse> {
        let request = self.request(operation, method, url)?.json(body);
        mutation_reply(operation, send(operation, request).await?).await
    }

    async fn send_delete(
        &self,
        operation: &'static str,
        url: &str,
        id: i64,
    ) -> GatewayResult<MutationResponse> {
        let request = self
            .request(operation, Method::DELETE, url)?
            .query(&[("id", id)]);
        mutation_reply(operation, send(operation, request).await?).await
    }
}

async fn send(operation: &'static str, request: RequestBuilder) -> GatewayResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| failed(operation, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(failed(operation, format!("HTTP {status}: {body}")));
    }
    Ok(response)
}

fn failed(operation: &'static str, detail: String) -> GatewayError {
    let err = GatewayError::new(operation, detail);
    warn!("{}", err);
    err
}

/// A 2xx reply is success whatever its body says. Some functions echo the
/// stored row, some `{id, message}`, some nothing decodable.
async fn mutation_reply(
    operation: &'static str,
    response: Response,
) -> GatewayResult<MutationResponse> {
    let body = response
        .bytes()
        .await
        .map_err(|e| failed(operation, e.to_string()))?;

    match serde_json::from_slice::<MutationResponse>(&body) {
        Ok(reply) => Ok(reply),
        Err(e) => {
            debug!("{} reply not decoded: {}", operation, e);
            Ok(MutationResponse::default())
        }
    }
}

#[async_trait]
impl CrmGateway for HttpGateway {
    async fn list_cases(&self) -> GatewayResult<Vec<Case>> {
        let request = self.request("list cases", Method::GET, &self.endpoints.cases)?;
        self.fetch_list("list cases", request).await
    }

    async fn create_case(&self, request: &CreateCaseRequest) -> GatewayResult<MutationResponse> {
        self.send_json("create case", Method::POST, &self.endpoints.cases, request)
            .await
    }

    async fn update_case(&self, request: &UpdateCaseRequest) -> GatewayResult<MutationResponse> {
        self.send_json("update case", Method::PUT, &self.endpoints.cases, request)
            .await
    }

    async fn archive_case(&self, id: i64) -> GatewayResult<MutationResponse> {
        self.send_delete("archive case", &self.endpoints.cases, id)
            .await
    }

    async fn list_clients(&self) -> GatewayResult<Vec<Client>> {
        let request = self.request("list clients", Method::GET, &self.endpoints.clients)?;
        self.fetch_list("list clients", request).await
    }

    async fn create_client(&self, payload: &ClientPayload) -> GatewayResult<MutationResponse> {
        self.send_json("create client", Method::POST, &self.endpoints.clients, payload)
            .await
    }

    async fn update_client(&self, payload: &ClientPayload) -> GatewayResult<MutationResponse> {
        if payload.id.is_none() {
            return Err(failed("update client", "payload has no id".to_string()));
        }
        self.send_json("update client", Method::PUT, &self.endpoints.clients, payload)
            .await
    }

    async fn list_payments(&self) -> GatewayResult<Vec<Payment>> {
        let request = self.request("list payments", Method::GET, &self.endpoints.payments)?;
        self.fetch_list("list payments", request).await
    }

    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> GatewayResult<MutationResponse> {
        self.send_json("create payment", Method::POST, &self.endpoints.payments, request)
            .await
    }

    async fn update_payment(
        &self,
        request: &UpdatePaymentRequest,
    ) -> GatewayResult<MutationResponse> {
        self.send_json("update payment", Method::PUT, &self.endpoints.payments, request)
            .await
    }

    async fn delete_payment(&self, id: i64) -> GatewayResult<MutationResponse> {
        self.send_delete("delete payment", &self.endpoints.payments, id)
            .await
    }

    async fn list_expenses(&self) -> GatewayResult<Vec<Expense>> {
        let request = self.request("list expenses", Method::GET, &self.endpoints.expenses)?;
        self.fetch_list("list expenses", request).await
    }

    async fn create_expense(
        &self,
        request: &CreateExpenseRequest,
    ) -> GatewayResult<MutationResponse> {
        self.send_json("create expense", Method::POST, &self.endpoints.expenses, request)
            .await
    }

    async fn update_expense(
        &self,
        request: &UpdateExpenseRequest,
    ) -> GatewayResult<MutationResponse> {
        self.send_json("update expense", Method::PUT, &self.endpoints.expenses, request)
            .await
    }

    async fn delete_expense(&self, id: i64) -> GatewayResult<MutationResponse> {
        self.send_delete("delete expense", &self.endpoints.expenses, id)
            .await
    }

    async fn list_tasks(&self, case_id: Option<i64>) -> GatewayResult<Vec<Task>> {
        let mut request = self.request("list tasks", Method::GET, &self.endpoints.tasks)?;
        if let Some(case_id) = case_id {
            request = request.query(&[("case_id", case_id)]);
        }
        self.fetch_list("list tasks", request).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> GatewayResult<MutationResponse> {
        self.send_json("create task", Method::POST, &self.endpoints.tasks, request)
            .await
    }

    async fn update_task(&self, request: &UpdateTaskRequest) -> GatewayResult<MutationResponse> {
        self.send_json("update task", Method::PUT, &self.endpoints.tasks, request)
            .await
    }
}
