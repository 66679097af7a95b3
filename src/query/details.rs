use crate::domain::payment::Payment;
use crate::error::GatewayError;
use crate::remote::client::RemoteClient;
use crate::remote::nvp::{non_empty, parse_decimal, parse_timestamp, NvpResponse};
use crate::status;
use rust_decimal::Decimal;

const METHOD: &str = "GetTransactionDetails";

pub struct TransactionDetailFetcher<'a> {
    pub remote: &'a dyn RemoteClient,
}

impl<'a> TransactionDetailFetcher<'a> {
    pub async fn fetch(&self, transaction_id: &str) -> Result<Payment, GatewayError> {
        let response = self
            .remote
            .send(
                METHOD,
                vec![("TRANSACTIONID".to_string(), transaction_id.to_string())],
            )
            .await?;

        if !response.is_success() {
            return Err(response.into_rejection(METHOD));
        }

        Ok(payment_from_details(&response))
    }
}

fn payment_from_details(response: &NvpResponse) -> Payment {
    let raw_status = response.get("PAYMENTSTATUS");
    let amount = parse_decimal(response.get("AMT")).unwrap_or(Decimal::ZERO);

    Payment {
        payment_id: non_empty(response.get("INVNUM")),
        // This endpoint reports status in the same vocabulary the notification
        // path normalizes; the lower-cased raw value is kept alongside the
        // normalized one so neither reading is lost.
        status: status::normalize(raw_status.unwrap_or("")),
        gateway_status: raw_status.map(|s| s.to_lowercase()),
        gateway_transaction_id: None,
        amount,
        net_amount: parse_decimal(response.get("SETTLEAMT")).unwrap_or(amount),
        fee: None,
        tax: parse_decimal(response.get("TAXAMT")),
        exchange_rate: parse_decimal(response.get("EXCHANGERATE")),
        date: response.get("ORDERTIME").and_then(parse_timestamp),
        payer: None,
        buyer_email: non_empty(response.get("EMAIL")),
    }
}
