use crate::config::GatewayConfig;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct CheckoutOrder {
    pub invoice: String,
    pub item_name: String,
    pub amount: Decimal,
}

// Hidden fields for the hosted-checkout redirect form. Field order is part of
// the rendered form and kept stable.
pub fn checkout_fields(cfg: &GatewayConfig, order: &CheckoutOrder) -> Vec<(String, String)> {
    [
        ("cmd", "_xclick".to_string()),
        ("business", cfg.business_email.clone()),
        ("item_name", order.item_name.clone()),
        ("invoice", order.invoice.clone()),
        ("amount", format!("{:.2}", order.amount)),
        ("currency_code", cfg.currency_code.clone()),
        ("notify_url", cfg.notify_url.clone()),
        ("return", cfg.return_url.clone()),
        ("cancel_return", cfg.cancel_url.clone()),
        ("rm", "2".to_string()),
        ("no_shipping", "1".to_string()),
        ("charset", "utf-8".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
