use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Failed,
    Refunded,
    Processing,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: Option<String>,
    pub status: PaymentStatus,
    pub gateway_status: Option<String>,
    pub gateway_transaction_id: Option<String>,
    pub amount: Decimal,
    pub net_amount: Decimal,
    pub fee: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
    pub payer: Option<Payer>,
    pub buyer_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult {
    pub current_page: u32,
    pub results_in_this_page: u32,
    pub total_pages: u32,
    pub transactions: Vec<Payment>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateWindow {
    pub initial_date: Option<DateTime<Utc>>,
    pub final_date: Option<DateTime<Utc>>,
}
