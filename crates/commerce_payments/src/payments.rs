//! Payment types exchanged between the host and a provider.

use commerce_core::types::FloatMajorUnit;
use serde::{Deserialize, Serialize};

/// The payment statuses the host understands.
///
/// A provider maps whatever states its vendor reports onto this set; states
/// it cannot interpret stay [`PaymentStatus::PendingExternalSystem`] until a
/// later callback or an out-of-band reconciliation settles them.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Initialized,
    Authorized,
    Captured,
    Cancelled,
    Refunded,
    /// Awaiting resolution by the external payment system.
    #[default]
    PendingExternalSystem,
    Error,
}

/// HTTP method the host should use when submitting a payment form.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FormMethod {
    Get,
    Post,
}

/// A form the host renders to move the buyer to the vendor checkout page.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentForm {
    /// Target of the form submission, typically the vendor-hosted page.
    pub action: String,
    pub method: FormMethod,
}

/// Result of generating a payment form for an order.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentFormResult {
    pub form: PaymentForm,
}

/// The transaction record a provider hands back after a callback.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TransactionInfo {
    /// Amount the provider considers authorized, in major units.
    pub amount_authorized: FloatMajorUnit,
    /// Fee charged on the transaction, in major units.
    pub transaction_fee: FloatMajorUnit,
    /// Opaque provider-generated identifier for the host's records.
    pub transaction_id: String,
    pub payment_status: PaymentStatus,
}

/// Result of processing a buyer-return callback.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CallbackResult {
    pub transaction_info: TransactionInfo,
}

/// Error details decoded from a vendor error response.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
}

/// The inbound request the vendor (via the buyer's browser) makes back to
/// the host after checkout.
#[derive(Clone, Debug, Default)]
pub struct CallbackRequest {
    query_params: Vec<(String, String)>,
}

impl CallbackRequest {
    /// Parses the query string of a return URL, with or without the leading
    /// `?`.
    pub fn from_query_string(query: &str) -> Self {
        Self {
            query_params: url::form_urlencoded::parse(
                query.trim_start_matches('?').as_bytes(),
            )
            .into_owned()
            .collect(),
        }
    }

    /// First value of the given query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_request_parses_query_parameters() {
        let request = CallbackRequest::from_query_string("?transactionId=ord_123&foo=bar");
        assert_eq!(request.query_param("transactionId"), Some("ord_123"));
        assert_eq!(request.query_param("foo"), Some("bar"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn callback_request_decodes_url_encoding() {
        let request = CallbackRequest::from_query_string("transactionId=a%2Bb");
        assert_eq!(request.query_param("transactionId"), Some("a+b"));
    }

    #[test]
    fn payment_status_defaults_to_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::PendingExternalSystem);
    }
}
