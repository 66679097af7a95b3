use crate::domain::payment::{Payer, Payment};
use crate::remote::nvp::{non_empty, parse_decimal};
use crate::status;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const IPN_DATE_FORMAT: &str = "%H:%M:%S %b %d, %Y";

pub fn translate(fields: &BTreeMap<String, String>) -> Payment {
    let get = |key: &str| fields.get(key).map(String::as_str);

    let amount = parse_decimal(get("mc_gross")).unwrap_or(Decimal::ZERO);
    let fee = parse_decimal(get("mc_fee"));
    let settle = parse_decimal(get("settle_amount"));
    let net_amount = settle.unwrap_or(amount) - fee.unwrap_or(Decimal::ZERO);

    Payment {
        payment_id: non_empty(get("invoice")),
        status: status::normalize(get("payment_status").unwrap_or("")),
        gateway_status: None,
        gateway_transaction_id: non_empty(get("txn_id")),
        amount,
        net_amount,
        fee,
        tax: None,
        exchange_rate: parse_decimal(get("exchange_rate")),
        date: get("payment_date").and_then(parse_ipn_date),
        payer: payer_of(get("first_name"), get("last_name"), get("payer_email")),
        buyer_email: None,
    }
}

fn payer_of(first: Option<&str>, last: Option<&str>, email: Option<&str>) -> Option<Payer> {
    if first.is_none() && last.is_none() && email.is_none() {
        return None;
    }

    let name = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string();

    Some(Payer {
        name,
        email: email.unwrap_or("").to_string(),
    })
}

// IPN payment_date looks like "10:22:31 Mar 05, 2024 PST"; the trailing zone
// token is dropped and the remainder read as UTC.
fn parse_ipn_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    let without_zone = match trimmed.rsplit_once(' ') {
        Some((rest, zone)) if zone.chars().all(|c| c.is_ascii_alphabetic()) => rest,
        _ => trimmed,
    };

    NaiveDateTime::parse_from_str(without_zone, IPN_DATE_FORMAT)
        .ok()
        .map(|n| n.and_utc())
}
