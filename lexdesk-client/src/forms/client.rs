use super::{blank_to_none, check_missing, parse_list, require, FormError, FormMode, FormSpec};
use crate::gateway::{CrmGateway, GatewayResult};
use async_trait::async_trait;
use shared_types::{Client, ClientDetails, ClientPayload, ClientType, ContactInfo, MutationResponse};

/// Flat field set covering both client types. Only the fields of the
/// selected type end up in the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFields {
    pub client_type: ClientType,
    pub full_name: String,
    pub passport_series_number: String,
    pub date_of_birth: String,
    pub company_name: String,
    pub inn: String,
    pub kpp: String,
    pub ogrn: String,
    pub legal_address: String,
    /// Comma separated
    pub phones: String,
    /// Comma separated
    pub emails: String,
    pub address: String,
}

impl Default for ClientFields {
    fn default() -> Self {
        Self {
            client_type: ClientType::Individual,
            full_name: String::new(),
            passport_series_number: String::new(),
            date_of_birth: String::new(),
            company_name: String::new(),
            inn: String::new(),
            kpp: String::new(),
            ogrn: String::new(),
            legal_address: String::new(),
            phones: String::new(),
            emails: String::new(),
            address: String::new(),
        }
    }
}

fn build_payload(
    id: Option<i64>,
    client_type: ClientType,
    fields: &ClientFields,
) -> Result<ClientPayload, FormError> {
    let mut missing = Vec::new();
    let details = match client_type {
        ClientType::Individual => {
            require(&mut missing, "full_name", &fields.full_name);
            ClientDetails::Individual {
                full_name: fields.full_name.trim().to_string(),
                passport_series_number: blank_to_none(&fields.passport_series_number),
                date_of_birth: blank_to_none(&fields.date_of_birth),
            }
        }
        ClientType::Organization => {
            require(&mut missing, "company_name", &fields.company_name);
            ClientDetails::Organization {
                company_name: fields.company_name.trim().to_string(),
                inn: blank_to_none(&fields.inn),
                kpp: blank_to_none(&fields.kpp),
                ogrn: blank_to_none(&fields.ogrn),
                legal_address: blank_to_none(&fields.legal_address),
            }
        }
    };
    check_missing(missing)?;

    Ok(ClientPayload {
        id,
        details,
        contact_info: ContactInfo {
            phones: parse_list(&fields.phones),
            emails: parse_list(&fields.emails),
        },
        address: blank_to_none(&fields.address),
    })
}

fn describe_payload(payload: &ClientPayload) -> String {
    payload.details.display_name().to_string()
}

pub struct NewClientForm;

#[async_trait]
impl FormSpec for NewClientForm {
    type Fields = ClientFields;
    type Payload = ClientPayload;

    fn entity(&self) -> &'static str {
        "Client"
    }

    fn mode(&self) -> FormMode {
        FormMode::Create
    }

    fn saved_title(&self) -> &'static str {
        "Клиент создан"
    }

    fn initial_fields(&self) -> ClientFields {
        ClientFields::default()
    }

    fn validate(&self, fields: &ClientFields) -> Result<ClientPayload, FormError> {
        build_payload(None, fields.client_type, fields)
    }

    async fn send(
        &self,
        gateway: &dyn CrmGateway,
        payload: &ClientPayload,
    ) -> GatewayResult<MutationResponse> {
        gateway.create_client(payload).await
    }

    fn describe(&self, payload: &ClientPayload) -> String {
        describe_payload(payload)
    }
}

/// Edits an existing client; the client type cannot change.
pub struct EditClientForm {
    client: Client,
}

impl EditClientForm {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FormSpec for EditClientForm {
    type Fields = ClientFields;
    type Payload = ClientPayload;

    fn entity(&self) -> &'static str {
        "Client"
    }

    fn mode(&self) -> FormMode {
        FormMode::Edit
    }

    fn saved_title(&self) -> &'static str {
        "Клиент обновлен"
    }

    fn initial_fields(&self) -> ClientFields {
        let client = &self.client;
        let mut fields = ClientFields {
            client_type: client.client_type(),
            phones: client.contact_info.phones.join(", "),
            emails: client.contact_info.emails.join(", "),
            address: client.address.clone().unwrap_or_default(),
            ..Default::default()
        };

        match &client.details {
            ClientDetails::Individual {
                full_name,
                passport_series_number,
                date_of_birth,
            } => {
                fields.full_name = full_name.clone();
                fields.passport_series_number = passport_series_number.clone().unwrap_or_default();
                fields.date_of_birth = date_of_birth.clone().unwrap_or_default();
            }
            ClientDetails::Organization {
                company_name,
                inn,
                kpp,
                ogrn,
                legal_address,
            } => {
                fields.company_name = company_name.clone();
                fields.inn = inn.clone().unwrap_or_default();
                fields.kpp = kpp.clone().unwrap_or_default();
                fields.ogrn = ogrn.clone().unwrap_or_default();
                fields.legal_address = legal_address.clone().unwrap_or_default();
            }
        }
        fields
    }

    fn is_editable(&self, field: &str) -> bool {
        field != "type"
    }

    fn validate(&self, fields: &ClientFields) -> Result<ClientPayload, FormError> {
        build_payload(Some(self.client.id), self.client.client_type(), fields)
    }

    async fn send(
        &self,
        gateway: &dyn CrmGateway,
        payload: &ClientPayload,
    ) -> GatewayResult<MutationResponse> {
        gateway.update_client(payload).await
    }

    fn describe(&self, payload: &ClientPayload) -> String {
        describe_payload(payload)
    }
}
