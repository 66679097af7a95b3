use crate::error::GatewayError;
use crate::remote::client::PostbackClient;
use std::collections::BTreeMap;

pub const CONFIRMATION_TOKEN: &str = "VERIFIED";

#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub fields: BTreeMap<String, String>,
}

pub struct NotificationValidator<'a> {
    pub postback: &'a dyn PostbackClient,
}

impl<'a> NotificationValidator<'a> {
    // Anti-spoofing handshake: the inbound field set is echoed back to the
    // origin verbatim and only the exact confirmation token authenticates it.
    // A transport failure on the echo counts as not-confirmed, never as
    // confirmed.
    pub async fn validate(
        &self,
        raw: BTreeMap<String, String>,
        origin_url: &str,
    ) -> Result<ValidationOutcome, GatewayError> {
        let ok = match self.postback.post_back(origin_url, &raw).await {
            Ok(body) => body.trim() == CONFIRMATION_TOKEN,
            Err(GatewayError::Transport { message }) => {
                tracing::warn!(error = %message, "notification postback transport failure");
                false
            }
            Err(e) => return Err(e),
        };

        if !ok {
            tracing::warn!(origin = origin_url, "notification postback not verified");
        }

        Ok(ValidationOutcome { ok, fields: raw })
    }
}
