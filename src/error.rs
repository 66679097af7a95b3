use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("notification was not confirmed by the gateway origin")]
    InvalidNotification,

    #[error("{method} rejected with ack {ack}")]
    RemoteQuery {
        method: String,
        ack: String,
        response: BTreeMap<String, String>,
    },

    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl GatewayError {
    pub fn transport(e: reqwest::Error) -> Self {
        Self::Transport {
            message: e.to_string(),
        }
    }
}
