use crate::checkout::{self, CheckoutOrder};
use crate::config::GatewayConfig;
use crate::domain::payment::{DateWindow, PagedResult, Payment};
use crate::error::GatewayError;
use crate::notification::translator;
use crate::notification::validator::NotificationValidator;
use crate::query::details::TransactionDetailFetcher;
use crate::query::search::TransactionSearch;
use crate::remote::client::{HttpPostbackClient, NvpHttpClient, PostbackClient, RemoteClient};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct PayPalGateway {
    pub config: GatewayConfig,
    remote: Arc<dyn RemoteClient>,
    postback: Arc<dyn PostbackClient>,
}

impl PayPalGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let remote = Arc::new(NvpHttpClient::new(&config));
        let postback = Arc::new(HttpPostbackClient {
            timeout_ms: config.timeout_ms,
            client: reqwest::Client::new(),
        });
        Self {
            config,
            remote,
            postback,
        }
    }

    pub fn with_clients(
        config: GatewayConfig,
        remote: Arc<dyn RemoteClient>,
        postback: Arc<dyn PostbackClient>,
    ) -> Self {
        Self {
            config,
            remote,
            postback,
        }
    }

    pub fn checkout_fields(&self, order: &CheckoutOrder) -> Vec<(String, String)> {
        checkout::checkout_fields(&self.config, order)
    }

    pub async fn notify(&self, raw: BTreeMap<String, String>) -> Result<Payment, GatewayError> {
        let validator = NotificationValidator {
            postback: self.postback.as_ref(),
        };
        let outcome = validator.validate(raw, &self.config.checkout_url).await?;
        if !outcome.ok {
            return Err(GatewayError::InvalidNotification);
        }

        let payment = translator::translate(&outcome.fields);
        tracing::info!(
            status = ?payment.status,
            transaction = payment.gateway_transaction_id.as_deref().unwrap_or("-"),
            "notification accepted"
        );
        Ok(payment)
    }

    pub async fn query_transactions(&self, window: DateWindow) -> Result<PagedResult, GatewayError> {
        let search = TransactionSearch {
            remote: self.remote.as_ref(),
        };
        search.search(window).await
    }

    pub async fn get_transaction_details(
        &self,
        transaction_id: &str,
    ) -> Result<Payment, GatewayError> {
        let fetcher = TransactionDetailFetcher {
            remote: self.remote.as_ref(),
        };
        fetcher.fetch(transaction_id).await
    }
}
