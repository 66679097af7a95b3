use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::GatewayError;

pub const ACK_SUCCESS: &str = "Success";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone)]
pub struct NvpResponse {
    fields: BTreeMap<String, String>,
}

impl NvpResponse {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn decode(body: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body).unwrap_or_default();
        Self {
            fields: pairs.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn ack(&self) -> &str {
        self.get("ACK").unwrap_or("")
    }

    pub fn is_success(&self) -> bool {
        self.ack() == ACK_SUCCESS
    }

    // Indexed list convention: PREFIX0, PREFIX1, ... Rows must be walked by
    // numeric index, never by map iteration order.
    pub fn indexed(&self, prefix: &str, n: usize) -> Option<&str> {
        self.get(&format!("{prefix}{n}"))
    }

    pub fn into_rejection(self, method: &str) -> GatewayError {
        let ack = self.ack().to_string();
        GatewayError::RemoteQuery {
            method: method.to_string(),
            ack,
            response: self.fields,
        }
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|n| n.and_utc())
}

pub fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(|s| s.trim().parse::<Decimal>().ok())
}

pub fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
