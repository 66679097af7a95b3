#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Sandbox,
    Live,
}

#[derive(Clone)]
pub struct GatewayConfig {
    pub api_username: String,
    pub api_password: String,
    pub api_signature: String,
    pub mode: GatewayMode,
    pub currency_code: String,
    pub business_email: String,
    pub checkout_url: String,
    pub notify_url: String,
    pub return_url: String,
    pub cancel_url: String,
    pub timeout_ms: u64,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let mode = match std::env::var("PAYPAL_MODE").as_deref() {
            Ok("live") => GatewayMode::Live,
            _ => GatewayMode::Sandbox,
        };

        Self {
            api_username: std::env::var("PAYPAL_API_USERNAME").unwrap_or_default(),
            api_password: std::env::var("PAYPAL_API_PASSWORD").unwrap_or_default(),
            api_signature: std::env::var("PAYPAL_API_SIGNATURE").unwrap_or_default(),
            currency_code: std::env::var("PAYPAL_CURRENCY_CODE")
                .unwrap_or_else(|_| "USD".to_string()),
            business_email: std::env::var("PAYPAL_BUSINESS_EMAIL").unwrap_or_default(),
            checkout_url: std::env::var("PAYPAL_CHECKOUT_URL")
                .unwrap_or_else(|_| default_checkout_url(mode).to_string()),
            notify_url: std::env::var("PAYPAL_NOTIFY_URL").unwrap_or_default(),
            return_url: std::env::var("PAYPAL_RETURN_URL").unwrap_or_default(),
            cancel_url: std::env::var("PAYPAL_CANCEL_URL").unwrap_or_default(),
            timeout_ms: std::env::var("PAYPAL_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(10_000),
            mode,
        }
    }

    pub fn api_endpoint(&self) -> &'static str {
        match self.mode {
            GatewayMode::Live => "https://api-3t.paypal.com/nvp",
            GatewayMode::Sandbox => "https://api-3t.sandbox.paypal.com/nvp",
        }
    }
}

fn default_checkout_url(mode: GatewayMode) -> &'static str {
    match mode {
        GatewayMode::Live => "https://www.paypal.com/cgi-bin/webscr",
        GatewayMode::Sandbox => "https://www.sandbox.paypal.com/cgi-bin/webscr",
    }
}
