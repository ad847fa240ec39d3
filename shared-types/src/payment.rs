use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Status of an incoming payment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "ожидается")]
    Pending,
    #[serde(rename = "получено")]
    Received,
    #[serde(rename = "возврат")]
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Received,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "ожидается",
            PaymentStatus::Received => "получено",
            PaymentStatus::Refunded => "возврат",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Ожидается",
            PaymentStatus::Received => "Получено",
            PaymentStatus::Refunded => "Возврат",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ожидается" | "pending" => Ok(PaymentStatus::Pending),
            "получено" | "received" => Ok(PaymentStatus::Received),
            "возврат" | "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("Unknown payment status: {other}")),
        }
    }
}

/// Payment received (or expected) on a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Payment {
    pub id: i64,
    pub case_id: i64,
    pub client_id: Option<i64>,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub amount: f64,
    #[serde(deserialize_with = "crate::lenient_date")]
    pub date: NaiveDate,
    pub purpose: Option<String>,
    pub document_number: Option<String>,
    pub status: PaymentStatus,
    pub created_at: Option<String>,

    // Joined by the backend for display
    pub case_title: Option<String>,
    pub client_name: Option<String>,
}

/// Request to register a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CreatePaymentRequest {
    pub case_id: i64,
    pub client_id: Option<i64>,
    pub amount: f64,
    pub date: NaiveDate,
    pub purpose: Option<String>,
    pub document_number: Option<String>,
    pub status: PaymentStatus,
}

/// Request to update a payment; case and client links are fixed after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct UpdatePaymentRequest {
    pub id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    pub purpose: Option<String>,
    pub document_number: Option<String>,
    pub status: PaymentStatus,
}
