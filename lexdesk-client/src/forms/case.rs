use super::{blank_to_none, check_missing, require, FormError, FormMode, FormSpec};
use crate::gateway::{CrmGateway, GatewayResult};
use async_trait::async_trait;
use shared_types::{Case, CaseStatus, CreateCaseRequest, MutationResponse, UpdateCaseRequest};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseFields {
    pub title: String,
    pub client_id: Option<i64>,
    /// Free text; `CASE_TYPE_SUGGESTIONS` are offered but not enforced
    pub case_type: String,
    pub status: CaseStatus,
    pub internal_number: String,
    pub external_number: String,
    pub description: String,
}

pub struct NewCaseForm;

#[async_trait]
impl FormSpec for NewCaseForm {
    type Fields = CaseFields;
    type Payload = CreateCaseRequest;

    fn entity(&self) -> &'static str {
        "Case"
    }

    fn mode(&self) -> FormMode {
        FormMode::Create
    }

    fn saved_title(&self) -> &'static str {
        "Дело создано"
    }

    fn initial_fields(&self) -> CaseFields {
        CaseFields::default()
    }

    fn validate(&self, fields: &CaseFields) -> Result<CreateCaseRequest, FormError> {
        let mut missing = Vec::new();
        require(&mut missing, "title", &fields.title);
        require(&mut missing, "type", &fields.case_type);
        require(&mut missing, "internal_number", &fields.internal_number);
        check_missing(missing)?;

        Ok(CreateCaseRequest {
            internal_number: fields.internal_number.trim().to_string(),
            external_number: blank_to_none(&fields.external_number),
            title: fields.title.trim().to_string(),
            description: blank_to_none(&fields.description),
            status: fields.status,
            case_type: fields.case_type.trim().to_string(),
            client_id: fields.client_id,
        })
    }

    async fn send(
        &self,
        gateway: &dyn CrmGateway,
        payload: &CreateCaseRequest,
    ) -> GatewayResult<MutationResponse> {
        gateway.create_case(payload).await
    }

    fn describe(&self, payload: &CreateCaseRequest) -> String {
        format!("{} {}", payload.internal_number, payload.title)
    }
}

/// Edits an existing case. The internal number is assigned once and is
/// echoed back unchanged on every update.
pub struct EditCaseForm {
    case: Case,
}

impl EditCaseForm {
    pub fn new(case: Case) -> Self {
        Self { case }
    }
}

#[async_trait]
impl FormSpec for EditCaseForm {
    type Fields = CaseFields;
    type Payload = UpdateCaseRequest;

    fn entity(&self) -> &'static str {
        "Case"
    }

    fn mode(&self) -> FormMode {
        FormMode::Edit
    }

    fn saved_title(&self) -> &'static str {
        "Дело обновлено"
    }

    fn initial_fields(&self) -> CaseFields {
        let case = &self.case;
        CaseFields {
            title: case.title.clone(),
            client_id: case.client_id,
            case_type: case.case_type.clone(),
            status: case.status,
            internal_number: case.internal_number.clone(),
            external_number: case.external_number.clone().unwrap_or_default(),
            description: case.description.clone().unwrap_or_default(),
        }
    }

    fn is_editable(&self, field: &str) -> bool {
        field != "internal_number"
    }

    fn validate(&self, fields: &CaseFields) -> Result<UpdateCaseRequest, FormError> {
        let mut missing = Vec::new();
        require(&mut missing, "title", &fields.title);
        require(&mut missing, "type", &fields.case_type);
        check_missing(missing)?;

        Ok(UpdateCaseRequest {
            id: self.case.id,
            internal_number: self.case.internal_number.clone(),
            external_number: blank_to_none(&fields.external_number),
            title: fields.title.trim().to_string(),
            description: blank_to_none(&fields.description),
            status: fields.status,
            case_type: fields.case_type.trim().to_string(),
            client_id: fields.client_id,
        })
    }

    async fn send(
        &self,
        gateway: &dyn CrmGateway,
        payload: &UpdateCaseRequest,
    ) -> GatewayResult<MutationResponse> {
        gateway.update_case(payload).await
    }

    fn describe(&self, payload: &UpdateCaseRequest) -> String {
        format!("{} {}", payload.internal_number, payload.title)
    }
}
