use crate::domain::payment::PaymentStatus;

pub fn normalize(raw: &str) -> PaymentStatus {
    match raw {
        "Completed" | "Processed" => PaymentStatus::Completed,
        "Denied" | "Expired" | "Failed" => PaymentStatus::Failed,
        "Voided" | "Refunded" | "Reversed" => PaymentStatus::Refunded,
        "Pending" => PaymentStatus::Processing,
        _ => PaymentStatus::Unknown,
    }
}
