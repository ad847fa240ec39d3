//! Screens that fetch lists and derive their statistics.
//!
//! Each view owns plain vectors straight from the backend. Loads fetch
//! independent lists concurrently; a list that fails to load is logged and
//! left empty while the others are still shown.

use crate::gateway::{CrmGateway, GatewayError, GatewayResult};
use chrono::NaiveDate;
use insights::{
    agenda, breakdown, finance, Breakdown, CaseFinance, CaseStats, ClientStats, FinanceSummary,
};
use shared_types::{
    Case, CaseStatus, Client, Expense, MutationResponse, Payment, PaymentStatus, Task,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

fn or_empty<T>(result: GatewayResult<Vec<T>>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => {
            debug!("Loaded {} {}", items.len(), what);
            items
        }
        Err(e) => {
            warn!("Failed to load {}: {}", what, e);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub cases: CaseStats,
    pub clients: ClientStats,
    pub by_status: Breakdown<CaseStatus>,
    pub by_type: Breakdown<String>,
}

pub struct Dashboard {
    gateway: Arc<dyn CrmGateway>,
    pub cases: Vec<Case>,
    pub clients: Vec<Client>,
}

impl Dashboard {
    pub async fn load(gateway: Arc<dyn CrmGateway>) -> Self {
        let mut dashboard = Self {
            gateway,
            cases: Vec::new(),
            clients: Vec::new(),
        };
        dashboard.refresh().await;
        dashboard
    }

    /// Refetch both lists wholesale
    pub async fn refresh(&mut self) {
        let (cases, clients) =
            tokio::join!(self.gateway.list_cases(), self.gateway.list_clients());
        self.cases = or_empty(cases, "cases");
        self.clients = or_empty(clients, "clients");
    }

    pub fn gateway(&self) -> &Arc<dyn CrmGateway> {
        &self.gateway
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            cases: CaseStats::compute(&self.cases),
            clients: ClientStats::compute(&self.clients),
            by_status: breakdown::cases_by_status(&self.cases),
            by_type: breakdown::cases_by_type(&self.cases),
        }
    }

    pub fn find_case(&self, id: i64) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn find_client(&self, id: i64) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Cases still being worked on, in backend order
    pub fn active_cases(&self) -> Vec<&Case> {
        self.cases.iter().filter(|c| c.status.is_active()).collect()
    }
}

pub struct FinanceView {
    gateway: Arc<dyn CrmGateway>,
    pub payments: Vec<Payment>,
    pub expenses: Vec<Expense>,
}

impl FinanceView {
    pub async fn load(gateway: Arc<dyn CrmGateway>) -> Self {
        let mut view = Self {
            gateway,
            payments: Vec::new(),
            expenses: Vec::new(),
        };
        view.refresh().await;
        view
    }

    pub async fn refresh(&mut self) {
        let (payments, expenses) =
            tokio::join!(self.gateway.list_payments(), self.gateway.list_expenses());
        self.payments = or_empty(payments, "payments");
        self.expenses = or_empty(expenses, "expenses");
    }

    pub fn summary(&self) -> FinanceSummary {
        FinanceSummary::compute(&self.payments, &self.expenses)
    }

    pub fn expenses_by_type(&self) -> Breakdown<String> {
        breakdown::expenses_by_type(&self.expenses)
    }

    pub fn payments_by_status(&self) -> Breakdown<PaymentStatus> {
        breakdown::payments_by_status(&self.payments)
    }

    pub fn by_case(&self) -> Vec<CaseFinance> {
        finance::by_case(&self.payments, &self.expenses)
    }
}

pub struct Agenda {
    gateway: Arc<dyn CrmGateway>,
    case_id: Option<i64>,
    pub tasks: Vec<Task>,
}

impl Agenda {
    /// Tasks for one case, or for the whole practice when `case_id` is None
    pub async fn load(gateway: Arc<dyn CrmGateway>, case_id: Option<i64>) -> Self {
        let mut agenda = Self {
            gateway,
            case_id,
            tasks: Vec::new(),
        };
        agenda.refresh().await;
        agenda
    }

    pub async fn refresh(&mut self) {
        let tasks = self.gateway.list_tasks(self.case_id).await;
        self.tasks = or_empty(tasks, "tasks");
    }

    pub fn month(&self, year: i32, month: u32) -> BTreeMap<NaiveDate, Vec<&Task>> {
        agenda::tasks_by_day(&self.tasks, year, month)
    }

    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&Task> {
        agenda::upcoming(&self.tasks, today, limit)
    }

    pub fn overdue(&self, today: NaiveDate) -> Vec<&Task> {
        agenda::overdue(&self.tasks, today)
    }

    /// Mark a loaded task done and refetch. Priority and assignee are sent
    /// back unchanged.
    pub async fn complete_task(
        &mut self,
        id: i64,
        comment: Option<String>,
    ) -> GatewayResult<MutationResponse> {
        let request = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.completion(comment))
            .ok_or_else(|| GatewayError::new("update task", format!("task #{id} is not loaded")))?;

        let reply = self.gateway.update_task(&request).await?;
        self.refresh().await;
        Ok(reply)
    }
}
