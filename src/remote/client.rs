use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::remote::nvp::NvpResponse;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

pub const NVP_VERSION: &str = "124.0";

#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn send(
        &self,
        method: &str,
        params: Vec<(String, String)>,
    ) -> Result<NvpResponse, GatewayError>;
}

#[async_trait]
pub trait PostbackClient: Send + Sync {
    async fn post_back(
        &self,
        url: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<String, GatewayError>;
}

pub struct NvpHttpClient {
    pub endpoint: String,
    pub api_username: String,
    pub api_password: String,
    pub api_signature: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl NvpHttpClient {
    pub fn new(cfg: &GatewayConfig) -> Self {
        Self {
            endpoint: cfg.api_endpoint().to_string(),
            api_username: cfg.api_username.clone(),
            api_password: cfg.api_password.clone(),
            api_signature: cfg.api_signature.clone(),
            timeout_ms: cfg.timeout_ms,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RemoteClient for NvpHttpClient {
    async fn send(
        &self,
        method: &str,
        params: Vec<(String, String)>,
    ) -> Result<NvpResponse, GatewayError> {
        let mut form = vec![
            ("METHOD".to_string(), method.to_string()),
            ("VERSION".to_string(), NVP_VERSION.to_string()),
            ("USER".to_string(), self.api_username.clone()),
            ("PWD".to_string(), self.api_password.clone()),
            ("SIGNATURE".to_string(), self.api_signature.clone()),
        ];
        form.extend(params);

        tracing::debug!(method, endpoint = %self.endpoint, "sending nvp request");
        let resp = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(GatewayError::transport)?;

        if !resp.status().is_success() {
            return Err(GatewayError::Transport {
                message: format!("http status {}", resp.status()),
            });
        }

        let body = resp.text().await.map_err(GatewayError::transport)?;
        Ok(NvpResponse::decode(&body))
    }
}

pub struct HttpPostbackClient {
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait]
impl PostbackClient for HttpPostbackClient {
    async fn post_back(
        &self,
        url: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<String, GatewayError> {
        let resp = self
            .client
            .post(url)
            .form(fields)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(GatewayError::transport)?;

        resp.text().await.map_err(GatewayError::transport)
    }
}
