pub mod checkout;
pub mod config;
pub mod domain {
    pub mod payment;
}
pub mod error;
pub mod notification {
    pub mod translator;
    pub mod validator;
}
pub mod query {
    pub mod details;
    pub mod search;
}
pub mod remote {
    pub mod client;
    pub mod nvp;
}
pub mod service {
    pub mod gateway_service;
}
pub mod status;
