use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Discriminant of [`ClientDetails`], handy for filters and counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
pub enum ClientType {
    #[serde(rename = "физическое")]
    Individual,
    #[serde(rename = "юридическое")]
    Organization,
}

impl ClientType {
    pub const ALL: [ClientType; 2] = [ClientType::Individual, ClientType::Organization];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Individual => "физическое",
            ClientType::Organization => "юридическое",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClientType::Individual => "Физ. лицо",
            ClientType::Organization => "Юр. лицо",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "физическое" | "individual" | "person" => Ok(ClientType::Individual),
            "юридическое" | "organization" | "company" => Ok(ClientType::Organization),
            other => Err(format!("Unknown client type: {other}")),
        }
    }
}

/// Identity fields; which ones exist depends on the client type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type")]
pub enum ClientDetails {
    #[serde(rename = "физическое")]
    Individual {
        full_name: String,
        passport_series_number: Option<String>,
        date_of_birth: Option<String>,
    },
    #[serde(rename = "юридическое")]
    Organization {
        company_name: String,
        inn: Option<String>,
        kpp: Option<String>,
        ogrn: Option<String>,
        legal_address: Option<String>,
    },
}

impl ClientDetails {
    pub fn client_type(&self) -> ClientType {
        match self {
            ClientDetails::Individual { .. } => ClientType::Individual,
            ClientDetails::Organization { .. } => ClientType::Organization,
        }
    }

    /// Full name for individuals, company name for organizations
    pub fn display_name(&self) -> &str {
        match self {
            ClientDetails::Individual { full_name, .. } => full_name,
            ClientDetails::Organization { company_name, .. } => company_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct ContactInfo {
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty() && self.emails.is_empty()
    }
}

/// Client record as returned by the clients endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Client {
    pub id: i64,
    #[serde(flatten)]
    pub details: ClientDetails,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub contact_info: ContactInfo,
    pub address: Option<String>,
    #[serde(default)]
    pub cases_count: i64,
    pub created_at: Option<String>,
}

impl Client {
    pub fn client_type(&self) -> ClientType {
        self.details.client_type()
    }

    pub fn display_name(&self) -> &str {
        self.details.display_name()
    }
}

/// Body for both POST (no `id`) and PUT (with `id`) on the clients endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ClientPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub details: ClientDetails,
    pub contact_info: ContactInfo,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_client_from_backend_row() {
        // The backend returns `c.*`, so columns of the other variant show up as nulls.
        let json = r#"{
            "id": 7,
            "type": "физическое",
            "full_name": "Иванов Петр Сергеевич",
            "passport_series_number": "4510 123456",
            "date_of_birth": "1980-04-01",
            "company_name": null,
            "inn": null,
            "contact_info": {"phones": ["+7 926 234-56-78"], "emails": []},
            "address": null,
            "cases_count": 2,
            "created_at": "2025-11-01 10:00:00"
        }"#;

        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id, 7);
        assert_eq!(client.client_type(), ClientType::Individual);
        assert_eq!(client.display_name(), "Иванов Петр Сергеевич");
        assert_eq!(client.contact_info.phones, vec!["+7 926 234-56-78"]);
        assert_eq!(client.cases_count, 2);
    }

    #[test]
    fn test_organization_client_with_null_contact_info() {
        let json = r#"{
            "id": 3,
            "type": "юридическое",
            "company_name": "ООО \"Прогресс\"",
            "inn": "7701234567",
            "contact_info": null,
            "address": "Москва"
        }"#;

        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.client_type(), ClientType::Organization);
        assert!(client.contact_info.is_empty());
        assert_eq!(client.cases_count, 0);
        match &client.details {
            ClientDetails::Organization { inn, kpp, .. } => {
                assert_eq!(inn.as_deref(), Some("7701234567"));
                assert!(kpp.is_none());
            }
            _ => panic!("Expected organization"),
        }
    }

    #[test]
    fn test_payload_serializes_nulls_and_tag() {
        let payload = ClientPayload {
            id: None,
            details: ClientDetails::Individual {
                full_name: "Иванов И.И.".to_string(),
                passport_series_number: None,
                date_of_birth: None,
            },
            contact_info: ContactInfo::default(),
            address: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "физическое");
        assert_eq!(value["full_name"], "Иванов И.И.");
        assert!(value["address"].is_null());
        assert!(value["passport_series_number"].is_null());
        assert_eq!(value["contact_info"], serde_json::json!({"phones": [], "emails": []}));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_client_type_from_str() {
        assert_eq!("individual".parse::<ClientType>(), Ok(ClientType::Individual));
        assert_eq!("юридическое".parse::<ClientType>(), Ok(ClientType::Organization));
        assert!("robot".parse::<ClientType>().is_err());
    }
}
