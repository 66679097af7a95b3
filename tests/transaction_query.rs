use chrono::{DateTime, Duration, Utc};
use paypal_gateway::config::{GatewayConfig, GatewayMode};
use paypal_gateway::domain::payment::{DateWindow, PaymentStatus};
use paypal_gateway::error::GatewayError;
use paypal_gateway::remote::client::{PostbackClient, RemoteClient};
use paypal_gateway::remote::nvp::NvpResponse;
use paypal_gateway::service::gateway_service::PayPalGateway;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

struct ScriptedRemote {
    search: BTreeMap<String, String>,
    details: HashMap<String, BTreeMap<String, String>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedRemote {
    fn new(search: &[(&str, &str)]) -> Self {
        Self {
            search: map(search),
            details: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_detail(mut self, id: &str, fields: &[(&str, &str)]) -> Self {
        self.details.insert(id.to_string(), map(fields));
        self
    }

    fn recorded_params(&self, method: &str) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl RemoteClient for ScriptedRemote {
    async fn send(
        &self,
        method: &str,
        params: Vec<(String, String)>,
    ) -> Result<NvpResponse, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.clone()));

        match method {
            "TransactionSearch" => Ok(NvpResponse::new(self.search.clone())),
            "GetTransactionDetails" => {
                let id = params
                    .iter()
                    .find(|(k, _)| k == "TRANSACTIONID")
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default();
                let fields = self
                    .details
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| map(&[("ACK", "Failure")]));
                Ok(NvpResponse::new(fields))
            }
            _ => Ok(NvpResponse::new(BTreeMap::new())),
        }
    }
}

struct UnusedPostback;

#[async_trait::async_trait]
impl PostbackClient for UnusedPostback {
    async fn post_back(
        &self,
        _url: &str,
        _fields: &BTreeMap<String, String>,
    ) -> Result<String, GatewayError> {
        Ok("INVALID".to_string())
    }
}

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn config() -> GatewayConfig {
    GatewayConfig {
        api_username: "merchant_api1.example.com".to_string(),
        api_password: "pw".to_string(),
        api_signature: "sig".to_string(),
        mode: GatewayMode::Sandbox,
        currency_code: "USD".to_string(),
        business_email: "merchant@example.com".to_string(),
        checkout_url: "https://www.sandbox.paypal.com/cgi-bin/webscr".to_string(),
        notify_url: "https://shop.example.com/paypal/notify".to_string(),
        return_url: "https://shop.example.com/return".to_string(),
        cancel_url: "https://shop.example.com/cancel".to_string(),
        timeout_ms: 1_000,
    }
}

fn gateway(remote: Arc<ScriptedRemote>) -> PayPalGateway {
    PayPalGateway::with_clients(config(), remote, Arc::new(UnusedPostback))
}

fn detail(invoice: &str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("ACK", "Success"),
        ("PAYMENTSTATUS", "Completed"),
        ("AMT", "10.00"),
    ]
    .into_iter()
    .chain(std::iter::once(("INVNUM", leak(invoice))))
    .collect()
}

fn leak(s: &str) -> &'static str {
    Box::leak(s.to_string().into_boxed_str())
}

#[tokio::test]
async fn refund_rows_are_excluded() {
    let remote = Arc::new(
        ScriptedRemote::new(&[
            ("ACK", "Success"),
            ("L_TYPE0", "Payment"),
            ("L_TRANSACTIONID0", "A"),
            ("L_TYPE1", "Refund"),
            ("L_TRANSACTIONID1", "B"),
        ])
        .with_detail("A", &detail("INV-A")),
    );

    let result = gateway(remote).query_transactions(DateWindow::default()).await.unwrap();

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.results_in_this_page, 1);
    assert_eq!(result.current_page, 1);
    assert_eq!(result.total_pages, 1);
    assert_eq!(result.transactions[0].payment_id.as_deref(), Some("INV-A"));
}

#[tokio::test]
async fn results_preserve_search_order() {
    let mut search = vec![("ACK", "Success")];
    let ids: Vec<String> = (0..6).map(|n| format!("T{n}")).collect();
    let type_keys: Vec<String> = (0..6).map(|n| format!("L_TYPE{n}")).collect();
    let id_keys: Vec<String> = (0..6).map(|n| format!("L_TRANSACTIONID{n}")).collect();
    for n in 0..6 {
        search.push((leak(&type_keys[n]), "Payment"));
        search.push((leak(&id_keys[n]), leak(&ids[n])));
    }

    let mut remote = ScriptedRemote::new(&search);
    for id in &ids {
        remote = remote.with_detail(id, &detail(&format!("INV-{id}")));
    }

    let result = gateway(Arc::new(remote))
        .query_transactions(DateWindow::default())
        .await
        .unwrap();

    let got: Vec<String> = result
        .transactions
        .iter()
        .map(|p| p.payment_id.clone().unwrap())
        .collect();
    let expected: Vec<String> = ids.iter().map(|id| format!("INV-{id}")).collect();
    assert_eq!(got, expected);
    assert_eq!(result.results_in_this_page as usize, result.transactions.len());
}

#[tokio::test]
async fn search_rejection_carries_response() {
    let remote = Arc::new(ScriptedRemote::new(&[
        ("ACK", "Failure"),
        ("L_ERRORCODE0", "10004"),
    ]));

    let err = gateway(remote)
        .query_transactions(DateWindow::default())
        .await
        .unwrap_err();

    match err {
        GatewayError::RemoteQuery {
            method,
            ack,
            response,
        } => {
            assert_eq!(method, "TransactionSearch");
            assert_eq!(ack, "Failure");
            assert_eq!(response.get("L_ERRORCODE0").map(String::as_str), Some("10004"));
        }
        other => panic!("expected RemoteQuery, got {other:?}"),
    }
}

#[tokio::test]
async fn one_failed_detail_fails_the_whole_search() {
    let remote = Arc::new(
        ScriptedRemote::new(&[
            ("ACK", "Success"),
            ("L_TYPE0", "Payment"),
            ("L_TRANSACTIONID0", "A"),
            ("L_TYPE1", "Payment"),
            ("L_TRANSACTIONID1", "B"),
        ])
        .with_detail("A", &detail("INV-A")),
        // B has no scripted detail and answers ACK=Failure.
    );

    let err = gateway(remote)
        .query_transactions(DateWindow::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GatewayError::RemoteQuery { ref method, .. } if method == "GetTransactionDetails"
    ));
}

#[tokio::test]
async fn default_window_spans_thirty_days_in_utc() {
    let remote = Arc::new(ScriptedRemote::new(&[("ACK", "Success")]));
    gateway(remote.clone())
        .query_transactions(DateWindow::default())
        .await
        .unwrap();

    let params = remote.recorded_params("TransactionSearch");
    let start = param(&params, "STARTDATE");
    let end = param(&params, "ENDDATE");

    assert!(start.ends_with('Z'), "{start}");
    assert!(end.ends_with('Z'), "{end}");
    let start_ts = parse(&start);
    let end_ts = parse(&end);
    assert_eq!(end_ts - start_ts, Duration::days(30));
}

#[tokio::test]
async fn explicit_window_is_serialized_verbatim() {
    let remote = Arc::new(ScriptedRemote::new(&[("ACK", "Success")]));
    let window = DateWindow {
        initial_date: Some(parse("2024-02-01T00:00:00Z")),
        final_date: Some(parse("2024-03-01T12:30:00Z")),
    };
    gateway(remote.clone()).query_transactions(window).await.unwrap();

    let params = remote.recorded_params("TransactionSearch");
    assert_eq!(param(&params, "STARTDATE"), "2024-02-01T00:00:00Z");
    assert_eq!(param(&params, "ENDDATE"), "2024-03-01T12:30:00Z");
}

#[tokio::test]
async fn detail_fetch_maps_and_keeps_raw_status() {
    let remote = Arc::new(ScriptedRemote::new(&[("ACK", "Success")]).with_detail(
        "9XJ12345",
        &[
            ("ACK", "Success"),
            ("INVNUM", "INV-7"),
            ("PAYMENTSTATUS", "Pending"),
            ("AMT", "50.00"),
            ("SETTLEAMT", "48.10"),
            ("TAXAMT", "4.00"),
            ("ORDERTIME", "2024-03-05T10:22:31Z"),
            ("EMAIL", "buyer@example.com"),
        ],
    ));

    let payment = gateway(remote)
        .get_transaction_details("9XJ12345")
        .await
        .unwrap();

    assert_eq!(payment.status, PaymentStatus::Processing);
    assert_eq!(payment.gateway_status.as_deref(), Some("pending"));
    assert_eq!(payment.amount.to_string(), "50.00");
    assert_eq!(payment.net_amount.to_string(), "48.10");
    assert_eq!(payment.buyer_email.as_deref(), Some("buyer@example.com"));
    assert_eq!(payment.payer, None);
    assert_eq!(payment.date.unwrap().to_rfc3339(), "2024-03-05T10:22:31+00:00");
}

#[tokio::test]
async fn detail_rejection_is_remote_query_error() {
    let remote = Arc::new(ScriptedRemote::new(&[("ACK", "Success")]));
    let err = gateway(remote)
        .get_transaction_details("missing")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GatewayError::RemoteQuery { ref method, ref ack, .. }
            if method == "GetTransactionDetails" && ack == "Failure"
    ));
}

fn param(params: &[(String, String)], key: &str) -> String {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| panic!("missing {key}"))
}

fn parse(raw: &str) -> DateTime<Utc> {
    paypal_gateway::remote::nvp::parse_timestamp(raw).unwrap()
}
