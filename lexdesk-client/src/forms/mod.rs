//! Create/edit dialogs as a state machine.
//!
//! A dialog is `Closed` until opened, `Editing` while the user fills it in,
//! and `Submitting` while its single gateway call is in flight. Field sets,
//! validation and the payload differ per entity and live in a [`FormSpec`];
//! the lifecycle is shared by [`FormDialog`].

pub mod case;
pub mod client;
pub mod finance;

pub use case::{CaseFields, EditCaseForm, NewCaseForm};
pub use client::{ClientFields, EditClientForm, NewClientForm};
pub use finance::{ExpenseFields, NewExpenseForm, NewPaymentForm, PaymentFields};

use crate::gateway::{CrmGateway, GatewayError, GatewayResult};
use crate::notifier::{Notification, Notifier};
use async_trait::async_trait;
use shared_types::MutationResponse;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Заполните обязательные поля: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Некорректное поле {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Сохранение уже выполняется")]
    InFlight,

    #[error("Форма закрыта")]
    NotOpen,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Closed,
    Editing { error: Option<FormError> },
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Title of every failure notification
pub const ERROR_TITLE: &str = "Ошибка";

/// Returned after a successful save; the caller refetches its lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
}

#[async_trait]
pub trait FormSpec: Send + Sync {
    type Fields: Clone + Send + Sync;
    type Payload: Send + Sync;

    /// Entity name for logs, e.g. "Case"
    fn entity(&self) -> &'static str;

    fn mode(&self) -> FormMode;

    /// Success notification title, e.g. "Дело создано"
    fn saved_title(&self) -> &'static str;

    /// Field values on open: blank for create, the target's values for edit
    fn initial_fields(&self) -> Self::Fields;

    fn is_editable(&self, _field: &str) -> bool {
        true
    }

    fn validate(&self, fields: &Self::Fields) -> Result<Self::Payload, FormError>;

    async fn send(
        &self,
        gateway: &dyn CrmGateway,
        payload: &Self::Payload,
    ) -> GatewayResult<MutationResponse>;

    /// Short description of the saved record for the success notification
    fn describe(&self, payload: &Self::Payload) -> String;
}

pub struct FormDialog<S: FormSpec> {
    spec: S,
    fields: S::Fields,
    state: FormState,
    pending: Option<String>,
    notifier: Arc<dyn Notifier>,
}

impl<S: FormSpec> FormDialog<S> {
    pub fn new(spec: S, notifier: Arc<dyn Notifier>) -> Self {
        let fields = spec.initial_fields();
        Self {
            spec,
            fields,
            state: FormState::Closed,
            pending: None,
            notifier,
        }
    }

    pub fn spec(&self) -> &S {
        &self.spec
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    pub fn fields(&self) -> &S::Fields {
        &self.fields
    }

    /// Editable only between `open` and `begin_submit`
    pub fn fields_mut(&mut self) -> Option<&mut S::Fields> {
        match self.state {
            FormState::Editing { .. } => Some(&mut self.fields),
            _ => None,
        }
    }

    pub fn is_editable(&self, field: &str) -> bool {
        self.spec.is_editable(field)
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.state, FormState::Editing { .. })
    }

    pub fn open(&mut self) {
        if self.state == FormState::Closed {
            self.fields = self.spec.initial_fields();
            self.state = FormState::Editing { error: None };
        }
    }

    /// Reopen against a new target, e.g. an edit form built from a record
    /// refetched after the last save. Refused while a submission is in flight.
    pub fn open_with(&mut self, spec: S) -> Result<(), FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::InFlight);
        }
        self.spec = spec;
        self.state = FormState::Closed;
        self.open();
        Ok(())
    }

    /// Cancel. Ignored while a submission is in flight.
    pub fn close(&mut self) -> bool {
        match self.state {
            FormState::Submitting => false,
            _ => {
                self.state = FormState::Closed;
                true
            }
        }
    }

    pub fn begin_submit(&mut self) -> Result<S::Payload, FormError> {
        match self.state {
            FormState::Submitting => return Err(FormError::InFlight),
            FormState::Closed => return Err(FormError::NotOpen),
            FormState::Editing { .. } => {}
        }

        match self.spec.validate(&self.fields) {
            Ok(payload) => {
                self.pending = Some(self.spec.describe(&payload));
                self.state = FormState::Submitting;
                Ok(payload)
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error(ERROR_TITLE, err.to_string()));
                self.state = FormState::Editing {
                    error: Some(err.clone()),
                };
                Err(err)
            }
        }
    }

    pub fn finish_submit(
        &mut self,
        result: GatewayResult<MutationResponse>,
    ) -> Result<SubmitOutcome, FormError> {
        if self.state != FormState::Submitting {
            return Err(FormError::NotOpen);
        }
        let description = self.pending.take().unwrap_or_default();

        match result {
            Ok(reply) => {
                debug!(
                    "{} saved (id {:?}, message {:?})",
                    self.spec.entity(),
                    reply.id,
                    reply.message
                );
                if self.spec.mode() == FormMode::Create {
                    self.fields = self.spec.initial_fields();
                }
                self.state = FormState::Closed;
                self.notifier.notify(Notification::success(
                    self.spec.saved_title(),
                    description,
                ));
                Ok(SubmitOutcome::Saved)
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    ERROR_TITLE,
                    format!("Не удалось сохранить: {}", err.detail),
                ));
                let err = FormError::Gateway(err);
                self.state = FormState::Editing {
                    error: Some(err.clone()),
                };
                Err(err)
            }
        }
    }

    /// Validate, make exactly one gateway call, and settle the state.
    pub async fn submit(&mut self, gateway: &dyn CrmGateway) -> Result<SubmitOutcome, FormError> {
        let payload = self.begin_submit()?;
        let result = self.spec.send(gateway, &payload).await;
        self.finish_submit(result)
    }
}

/// Split comma-separated input, trimming entries and dropping empty ones
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Empty or whitespace-only input is sent as null
pub fn blank_to_none(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn require(missing: &mut Vec<&'static str>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        missing.push(field);
    }
}

pub(crate) fn check_missing(missing: Vec<&'static str>) -> Result<(), FormError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::Missing(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::notifier::{NotificationKind, RecordingNotifier};
    use shared_types::CaseStatus;

    fn new_case_dialog(notifier: &Arc<RecordingNotifier>) -> FormDialog<NewCaseForm> {
        FormDialog::new(NewCaseForm, notifier.clone())
    }

    fn fill(dialog: &mut FormDialog<NewCaseForm>) {
        let fields = dialog.fields_mut().unwrap();
        fields.title = "Взыскание долга".to_string();
        fields.case_type = "Арбитраж".to_string();
        fields.internal_number = "2025-014".to_string();
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("+7 111, +7 222"), vec!["+7 111", "+7 222"]);
        assert_eq!(parse_list(""), Vec::<String>::new());
        assert_eq!(parse_list(" , a@b.ru ,,"), vec!["a@b.ru"]);
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none("   "), None);
        assert_eq!(blank_to_none(" А40-1234/2025 "), Some("А40-1234/2025".to_string()));
    }

    #[test]
    fn test_fields_locked_while_closed() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut dialog = new_case_dialog(&notifier);
        assert!(dialog.fields_mut().is_none());
        assert_eq!(dialog.begin_submit(), Err(FormError::NotOpen));
    }

    #[tokio::test]
    async fn test_missing_fields_make_no_request() {
        let gateway = MemoryGateway::default();
        let notifier = Arc::new(RecordingNotifier::default());
        let mut dialog = new_case_dialog(&notifier);
        dialog.open();
        dialog.fields_mut().unwrap().title = "Без номера".to_string();

        let result = dialog.submit(&gateway).await;
        match result {
            Err(FormError::Missing(fields)) => assert_eq!(fields, vec!["type", "internal_number"]),
            other => panic!("Expected missing fields, got {other:?}"),
        }
        assert!(gateway.calls().is_empty());
        assert!(matches!(dialog.state(), FormState::Editing { error: Some(_) }));
        assert_eq!(notifier.take()[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_double_submit_rejected() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut dialog = new_case_dialog(&notifier);
        dialog.open();
        fill(&mut dialog);

        let payload = dialog.begin_submit().unwrap();
        assert_eq!(payload.status, CaseStatus::Open);
        assert!(!dialog.can_submit());
        assert_eq!(dialog.begin_submit(), Err(FormError::InFlight));
        assert!(!dialog.close());
    }

    #[tokio::test]
    async fn test_success_closes_and_clears_create_form() {
        let gateway = MemoryGateway::default();
        let notifier = Arc::new(RecordingNotifier::default());
        let mut dialog = new_case_dialog(&notifier);
        dialog.open();
        fill(&mut dialog);

        assert_eq!(dialog.submit(&gateway).await, Ok(SubmitOutcome::Saved));
        assert_eq!(dialog.state(), &FormState::Closed);
        assert!(dialog.fields().title.is_empty());
        assert_eq!(gateway.bodies("create case").len(), 1);

        let sent = notifier.take();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::Success);
        assert_eq!(sent[0].title, "Дело создано");
        assert_eq!(sent[0].description, "2025-014 Взыскание долга");
    }

    #[tokio::test]
    async fn test_failure_keeps_entered_values() {
        let gateway = MemoryGateway::default();
        gateway.fail("create case");
        let notifier = Arc::new(RecordingNotifier::default());
        let mut dialog = new_case_dialog(&notifier);
        dialog.open();
        fill(&mut dialog);

        let result = dialog.submit(&gateway).await;
        assert!(matches!(result, Err(FormError::Gateway(_))));
        assert!(matches!(
            dialog.state(),
            FormState::Editing {
                error: Some(FormError::Gateway(_))
            }
        ));
        assert_eq!(dialog.fields().title, "Взыскание долга");
        let sent = notifier.take();
        assert_eq!(sent[0].title, ERROR_TITLE);
        assert!(sent[0].description.starts_with("Не удалось сохранить"));

        gateway.recover("create case");
        assert_eq!(dialog.submit(&gateway).await, Ok(SubmitOutcome::Saved));
        assert_eq!(gateway.bodies("create case").len(), 2);
    }
}
