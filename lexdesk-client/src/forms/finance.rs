use super::{blank_to_none, check_missing, require, FormError, FormMode, FormSpec};
use crate::gateway::{CrmGateway, GatewayResult};
use crate::views::format_money;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared_types::{
    parse_amount, CreateExpenseRequest, CreatePaymentRequest, ExpenseStatus, MutationResponse,
    PaymentStatus,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn positive_amount(input: &str) -> Result<f64, FormError> {
    let amount = parse_amount(input).map_err(|e| FormError::Invalid {
        field: "amount",
        reason: e.to_string(),
    })?;
    if amount <= 0.0 {
        return Err(FormError::Invalid {
            field: "amount",
            reason: "сумма должна быть больше нуля".to_string(),
        });
    }
    Ok(amount)
}

fn parse_date(input: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| FormError::Invalid {
        field: "date",
        reason: format!("ожидается ГГГГ-ММ-ДД, получено '{}'", input.trim()),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFields {
    pub amount: String,
    pub date: String,
    pub purpose: String,
    pub document_number: String,
    pub status: PaymentStatus,
}

/// Records a payment against a case
pub struct NewPaymentForm {
    case_id: i64,
    client_id: Option<i64>,
    today: NaiveDate,
}

impl NewPaymentForm {
    pub fn new(case_id: i64, client_id: Option<i64>, today: NaiveDate) -> Self {
        Self {
            case_id,
            client_id,
            today,
        }
    }
}

#[async_trait]
impl FormSpec for NewPaymentForm {
    type Fields = PaymentFields;
    type Payload = CreatePaymentRequest;

    fn entity(&self) -> &'static str {
        "Payment"
    }

    fn mode(&self) -> FormMode {
        FormMode::Create
    }

    fn saved_title(&self) -> &'static str {
        "Оплата добавлена"
    }

    fn initial_fields(&self) -> PaymentFields {
        PaymentFields {
            amount: String::new(),
            date: self.today.format(DATE_FORMAT).to_string(),
            purpose: String::new(),
            document_number: String::new(),
            status: PaymentStatus::default(),
        }
    }

    fn validate(&self, fields: &PaymentFields) -> Result<CreatePaymentRequest, FormError> {
        let mut missing = Vec::new();
        require(&mut missing, "amount", &fields.amount);
        require(&mut missing, "date", &fields.date);
        check_missing(missing)?;

        Ok(CreatePaymentRequest {
            case_id: self.case_id,
            client_id: self.client_id,
            amount: positive_amount(&fields.amount)?,
            date: parse_date(&fields.date)?,
            purpose: blank_to_none(&fields.purpose),
            document_number: blank_to_none(&fields.document_number),
            status: fields.status,
        })
    }

    async fn send(
        &self,
        gateway: &dyn CrmGateway,
        payload: &CreatePaymentRequest,
    ) -> GatewayResult<MutationResponse> {
        gateway.create_payment(payload).await
    }

    fn describe(&self, payload: &CreatePaymentRequest) -> String {
        format!("{} от {}", format_money(payload.amount), payload.date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub expense_type: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub status: ExpenseStatus,
}

/// Records an expense against a case
pub struct NewExpenseForm {
    case_id: i64,
    today: NaiveDate,
}

impl NewExpenseForm {
    pub fn new(case_id: i64, today: NaiveDate) -> Self {
        Self { case_id, today }
    }
}

#[async_trait]
impl FormSpec for NewExpenseForm {
    type Fields = ExpenseFields;
    type Payload = CreateExpenseRequest;

    fn entity(&self) -> &'static str {
        "Expense"
    }

    fn mode(&self) -> FormMode {
        FormMode::Create
    }

    fn saved_title(&self) -> &'static str {
        "Расход добавлен"
    }

    fn initial_fields(&self) -> ExpenseFields {
        ExpenseFields {
            expense_type: String::new(),
            amount: String::new(),
            date: self.today.format(DATE_FORMAT).to_string(),
            description: String::new(),
            status: ExpenseStatus::default(),
        }
    }

    fn validate(&self, fields: &ExpenseFields) -> Result<CreateExpenseRequest, FormError> {
        let mut missing = Vec::new();
        require(&mut missing, "type", &fields.expense_type);
        require(&mut missing, "amount", &fields.amount);
        require(&mut missing, "date", &fields.date);
        check_missing(missing)?;

        Ok(CreateExpenseRequest {
            case_id: self.case_id,
            expense_type: fields.expense_type.trim().to_string(),
            amount: positive_amount(&fields.amount)?,
            date: parse_date(&fields.date)?,
            description: blank_to_none(&fields.description),
            status: fields.status,
        })
    }

    async fn send(
        &self,
        gateway: &dyn CrmGateway,
        payload: &CreateExpenseRequest,
    ) -> GatewayResult<MutationResponse> {
        gateway.create_expense(payload).await
    }

    fn describe(&self, payload: &CreateExpenseRequest) -> String {
        format!("{}: {}", payload.expense_type, format_money(payload.amount))
    }
}
