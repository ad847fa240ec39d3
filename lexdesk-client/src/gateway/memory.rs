//! In-memory gateway for unit tests. Records every call with its JSON body
//! and can be told to fail chosen operations.

use super::{CrmGateway, GatewayError, GatewayResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use shared_types::{
    Case, Client, ClientPayload, CreateCaseRequest, CreateExpenseRequest, CreatePaymentRequest,
    CreateTaskRequest, Expense, MutationResponse, Payment, Task, UpdateCaseRequest,
    UpdateExpenseRequest, UpdatePaymentRequest, UpdateTaskRequest,
};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    cases: Vec<Case>,
    clients: Vec<Client>,
    payments: Vec<Payment>,
    expenses: Vec<Expense>,
    tasks: Vec<Task>,
    calls: Vec<(&'static str, Value)>,
    failing: HashSet<&'static str>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryGateway {
    state: Mutex<State>,
}

impl MemoryGateway {
    pub fn with_data(cases: Vec<Case>, clients: Vec<Client>) -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.state.lock().unwrap();
            state.cases = cases;
            state.clients = clients;
            state.next_id = 100;
        }
        gateway
    }

    pub fn set_payments(&self, payments: Vec<Payment>, expenses: Vec<Expense>) {
        let mut state = self.state.lock().unwrap();
        state.payments = payments;
        state.expenses = expenses;
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        self.state.lock().unwrap().tasks = tasks;
    }

    /// Make `operation` (e.g. "list clients") fail until `recover` is called
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.remove(operation);
    }

    pub fn calls(&self) -> Vec<(&'static str, Value)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Bodies sent for `operation`, oldest first
    pub fn bodies(&self, operation: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(op, _)| *op == operation)
            .map(|(_, body)| body)
            .collect()
    }

    fn record<B: Serialize>(&self, operation: &'static str, body: &B) -> GatewayResult<()> {
        let mut state = self.state.lock().unwrap();
        let body = serde_json::to_value(body).unwrap();
        state.calls.push((operation, body));
        if state.failing.contains(operation) {
            return Err(GatewayError::new(operation, "HTTP 500 Internal Server Error"));
        }
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.next_id
    }
}

fn created(id: i64) -> MutationResponse {
    MutationResponse {
        id: Some(id),
        message: None,
    }
}

#[async_trait]
impl CrmGateway for MemoryGateway {
    async fn list_cases(&self) -> GatewayResult<Vec<Case>> {
        self.record("list cases", &Value::Null)?;
        Ok(self.state.lock().unwrap().cases.clone())
    }

    async fn create_case(&self, request: &CreateCaseRequest) -> GatewayResult<MutationResponse> {
        self.record("create case", request)?;
        let id = self.next_id();
        self.state.lock().unwrap().cases.push(Case {
            id,
            internal_number: request.internal_number.clone(),
            external_number: request.external_number.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            status: request.status,
            case_type: request.case_type.clone(),
            client_id: request.client_id,
            client_name: None,
            client_company: None,
            responsible_name: None,
            tasks_count: 0,
            completed_tasks: 0,
            created_at: None,
        });
        Ok(created(id))
    }

    async fn update_case(&self, request: &UpdateCaseRequest) -> GatewayResult<MutationResponse> {
        self.record("update case", request)?;
        let mut state = self.state.lock().unwrap();
        if let Some(case) = state.cases.iter_mut().find(|c| c.id == request.id) {
            case.title = request.title.clone();
            case.status = request.status;
            case.case_type = request.case_type.clone();
            case.description = request.description.clone();
            case.external_number = request.external_number.clone();
            case.client_id = request.client_id;
        }
        Ok(MutationResponse::default())
    }

    async fn archive_case(&self, id: i64) -> GatewayResult<MutationResponse> {
        self.record("archive case", &id)?;
        let mut state = self.state.lock().unwrap();
        if let Some(case) = state.cases.iter_mut().find(|c| c.id == id) {
            case.status = shared_types::CaseStatus::Archived;
        }
        Ok(MutationResponse::default())
    }

    async fn list_clients(&self) -> GatewayResult<Vec<Client>> {
        self.record("list clients", &Value::Null)?;
        Ok(self.state.lock().unwrap().clients.clone())
    }

    async fn create_client(&self, payload: &ClientPayload) -> GatewayResult<MutationResponse> {
        self.record("create client", payload)?;
        let id = self.next_id();
        self.state.lock().unwrap().clients.push(Client {
            id,
            details: payload.details.clone(),
            contact_info: payload.contact_info.clone(),
            address: payload.address.clone(),
            cases_count: 0,
            created_at: None,
        });
        Ok(created(id))
    }

    async fn update_client(&self, payload: &ClientPayload) -> GatewayResult<MutationResponse> {
        self.record("update client", payload)?;
        let mut state = self.state.lock().unwrap();
        if let Some(client) = state.clients.iter_mut().find(|c| Some(c.id) == payload.id) {
            client.details = payload.details.clone();
            client.contact_info = payload.contact_info.clone();
            client.address = payload.address.clone();
        }
        Ok(MutationResponse::default())
    }

    async fn list_payments(&self) -> GatewayResult<Vec<Payment>> {
        self.record("list payments", &Value::Null)?;
        Ok(self.state.lock().unwrap().payments.clone())
    }

    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> GatewayResult<MutationResponse> {
        self.record("create payment", request)?;
        let id = self.next_id();
        self.state.lock().unwrap().payments.push(Payment {
            id,
            case_id: request.case_id,
            client_id: request.client_id,
            amount: request.amount,
            date: request.date,
            purpose: request.purpose.clone(),
            document_number: request.document_number.clone(),
            status: request.status,
            created_at: None,
            case_title: None,
            client_name: None,
        });
        Ok(created(id))
    }

    async fn update_payment(
        &self,
        request: &UpdatePaymentRequest,
    ) -> GatewayResult<MutationResponse> {
        self.record("update payment", request)?;
        let mut state = self.state.lock().unwrap();
        if let Some(payment) = state.payments.iter_mut().find(|p| p.id == request.id) {
            payment.amount = request.amount;
            payment.date = request.date;
            payment.purpose = request.purpose.clone();
            payment.document_number = request.document_number.clone();
            payment.status = request.status;
        }
        Ok(MutationResponse::default())
    }

    async fn delete_payment(&self, id: i64) -> GatewayResult<MutationResponse> {
        self.record("delete payment", &id)?;
        self.state.lock().unwrap().payments.retain(|p| p.id != id);
        Ok(MutationResponse::default())
    }

    async fn list_expenses(&self) -> GatewayResult<Vec<Expense>> {
        self.record("list expenses", &Value::Null)?;
        Ok(self.state.lock().unwrap().expenses.clone())
    }

    async fn create_expense(
        &self,
        request: &CreateExpenseRequest,
    ) -> GatewayResult<MutationResponse> {
        self.record("create expense", request)?;
        let id = self.next_id();
        self.state.lock().unwrap().expenses.push(Expense {
            id,
            case_id: request.case_id,
            expense_type: request.expense_type.clone(),
            amount: request.amount,
            date: request.date,
            description: request.description.clone(),
            status: request.status,
            created_at: None,
            case_title: None,
        });
        Ok(created(id))
    }

    async fn update_expense(
        &self,
        request: &UpdateExpenseRequest,
    ) -> GatewayResult<MutationResponse> {
        self.record("update expense", request)?;
        let mut state = self.state.lock().unwrap();
        if let Some(expense) = state.expenses.iter_mut().find(|e| e.id == request.id) {
            expense.expense_type = request.expense_type.clone();
            expense.amount = request.amount;
            expense.date = request.date;
            expense.description = request.description.clone();
            expense.status = request.status;
        }
        Ok(MutationResponse::default())
    }

    async fn delete_expense(&self, id: i64) -> GatewayResult<MutationResponse> {
        self.record("delete expense", &id)?;
        self.state.lock().unwrap().expenses.retain(|e| e.id != id);
        Ok(MutationResponse::default())
    }

    async fn list_tasks(&self, case_id: Option<i64>) -> GatewayResult<Vec<Task>> {
        self.record("list tasks", &case_id)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|t| case_id.is_none() || t.case_id == case_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> GatewayResult<MutationResponse> {
        self.record("create task", request)?;
        let id = self.next_id();
        self.state.lock().unwrap().tasks.push(Task {
            id,
            case_id: request.case_id,
            title: request.title.clone(),
            description: request.description.clone(),
            due_date: request.due_date,
            status: request.status.clone(),
            type_id: request.type_id,
            priority_id: request.priority_id,
            assigned_to: request.assigned_to,
            result_comment: None,
            case_title: None,
            assigned_to_name: None,
            priority_name: None,
            type_name: None,
        });
        Ok(created(id))
    }

    async fn update_task(&self, request: &UpdateTaskRequest) -> GatewayResult<MutationResponse> {
        self.record("update task", request)?;
        let mut state = self.state.lock().unwrap();
        if let Some(task) = state.tasks.iter_mut().find(|t| t.id == request.id) {
            task.title = request.title.clone();
            task.description = request.description.clone();
            task.due_date = request.due_date;
            task.status = request.status.clone();
            task.priority_id = request.priority_id;
            task.assigned_to = request.assigned_to;
            task.result_comment = request.result_comment.clone();
        }
        Ok(MutationResponse::default())
    }
}
