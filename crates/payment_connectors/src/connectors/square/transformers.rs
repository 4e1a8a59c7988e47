use std::str::FromStr;

use commerce_core::{
    enums::{Currency, Environment},
    types::MinorUnit,
};
use commerce_payments::{errors::ConnectorError, orders::OrderReadOnly, payments::PaymentStatus};
use masking::Secret;
use serde::{Deserialize, Serialize};

/// Order source reported to the vendor for orders created through this
/// plugin.
const ORDER_SOURCE_NAME: &str = "CommercePayments";

/// Per-installation provider settings, deserialized from the host's
/// PascalCase settings blob.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SquareSettings {
    #[serde(default)]
    pub sandbox_mode: bool,
    pub sandbox_access_token: Secret<String>,
    pub live_access_token: Secret<String>,
    pub location_id: String,
    #[serde(default)]
    pub continue_url: Option<String>,
}

impl SquareSettings {
    /// Credential for the configured environment; sandbox and live tokens
    /// are never mixed.
    pub fn access_token(&self) -> &Secret<String> {
        if self.sandbox_mode {
            &self.sandbox_access_token
        } else {
            &self.live_access_token
        }
    }

    pub fn environment(&self) -> Environment {
        if self.sandbox_mode {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }
}

// Auth Struct
pub struct SquareAuthType {
    pub(super) access_token: Secret<String>,
}

impl From<&SquareSettings> for SquareAuthType {
    fn from(settings: &SquareSettings) -> Self {
        Self {
            access_token: settings.access_token().clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SquareMoney {
    pub amount: MinorUnit,
    pub currency: Currency,
}

#[derive(Debug, Serialize)]
pub struct SquareOrderSource {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SquareOrderLineItem {
    pub uid: String,
    pub name: String,
    pub quantity: String,
    pub base_price_money: SquareMoney,
}

#[derive(Debug, Serialize)]
pub struct SquareNewOrder {
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub source: SquareOrderSource,
    pub line_items: Vec<SquareOrderLineItem>,
}

#[derive(Debug, Serialize)]
pub struct SquareCreateOrderRequest {
    pub idempotency_key: String,
    pub location_id: String,
    pub order: SquareNewOrder,
}

#[derive(Debug, Serialize)]
pub struct SquareCreateCheckoutRequest {
    pub idempotency_key: String,
    pub order: SquareCreateOrderRequest,
    pub redirect_url: String,
}

impl TryFrom<(&OrderReadOnly, &SquareSettings, &str)> for SquareCreateCheckoutRequest {
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(
        (order, settings, redirect_url): (&OrderReadOnly, &SquareSettings, &str),
    ) -> Result<Self, Self::Error> {
        if redirect_url.trim().is_empty() {
            return Err(ConnectorError::MissingRequiredField {
                field_name: "continue_url",
            }
            .into());
        }

        // The vendor's order model settles tax on its side; the single line
        // item carries the net total only.
        let base_price = order.total_price.without_tax.to_minor_unit(order.currency);
        let line_items = vec![SquareOrderLineItem {
            quantity: "1".to_string(),
            uid: order.id.clone(),
            name: order.order_number.clone(),
            base_price_money: SquareMoney {
                amount: base_price,
                currency: order.currency,
            },
        }];

        Ok(Self {
            idempotency_key: uuid::Uuid::new_v4().to_string(),
            order: SquareCreateOrderRequest {
                idempotency_key: uuid::Uuid::new_v4().to_string(),
                location_id: settings.location_id.clone(),
                order: SquareNewOrder {
                    location_id: settings.location_id.clone(),
                    customer_id: order.customer_info.customer_reference.clone(),
                    source: SquareOrderSource {
                        name: ORDER_SOURCE_NAME.to_string(),
                    },
                    line_items,
                },
            },
            redirect_url: redirect_url.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SquareCheckout {
    pub id: String,
    pub checkout_page_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SquareCreateCheckoutResponse {
    pub checkout: SquareCheckout,
}

/// Vendor order states this plugin interprets. The vendor reports them in
/// upper case; parsing is case insensitive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SquareOrderState {
    Open,
    Draft,
    Completed,
    Authorized,
    Canceled,
}

impl From<SquareOrderState> for PaymentStatus {
    fn from(state: SquareOrderState) -> Self {
        match state {
            SquareOrderState::Completed | SquareOrderState::Authorized => Self::Authorized,
            SquareOrderState::Canceled => Self::Cancelled,
            SquareOrderState::Open | SquareOrderState::Draft => Self::PendingExternalSystem,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SquareOrder {
    pub id: String,
    pub state: Option<String>,
}

impl SquareOrder {
    /// Maps the vendor order state onto a host payment status. Unknown and
    /// missing states stay pending until the external system settles them.
    pub fn payment_status(&self) -> PaymentStatus {
        self.state
            .as_deref()
            .and_then(|state| SquareOrderState::from_str(state).ok())
            .map(PaymentStatus::from)
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct SquareBatchRetrieveOrdersRequest {
    pub order_ids: Vec<String>,
}

impl SquareBatchRetrieveOrdersRequest {
    pub fn new(transaction_id: &str) -> Self {
        Self {
            order_ids: vec![transaction_id.to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SquareBatchRetrieveOrdersResponse {
    #[serde(default)]
    pub orders: Vec<SquareOrder>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SquareErrorDetails {
    pub category: Option<String>,
    pub code: Option<String>,
    pub detail: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SquareErrorResponse {
    #[serde(default)]
    pub errors: Vec<SquareErrorDetails>,
}

#[cfg(test)]
mod tests {
    use commerce_core::types::FloatMajorUnit;
    use commerce_payments::orders::{CustomerInfo, TaxedTotal};

    use super::*;

    fn settings(sandbox_mode: bool) -> SquareSettings {
        SquareSettings {
            sandbox_mode,
            sandbox_access_token: Secret::new("sandbox-token".to_string()),
            live_access_token: Secret::new("live-token".to_string()),
            location_id: "L8NKSB1A".to_string(),
            continue_url: Some("https://shop.example/continue".to_string()),
        }
    }

    fn order() -> OrderReadOnly {
        OrderReadOnly {
            id: "order-1".to_string(),
            order_number: "ORDER-0001".to_string(),
            total_price: TaxedTotal::from_parts(
                FloatMajorUnit::new(19.99),
                FloatMajorUnit::new(4.0),
            ),
            currency: Currency::USD,
            customer_info: CustomerInfo {
                customer_reference: Some("cust-42".to_string()),
            },
        }
    }

    #[test]
    fn settings_resolve_sandbox_credentials() {
        use masking::PeekInterface;

        let settings = settings(true);
        assert_eq!(settings.access_token().peek(), "sandbox-token");
        assert_eq!(settings.environment(), Environment::Sandbox);
    }

    #[test]
    fn settings_resolve_live_credentials() {
        use masking::PeekInterface;

        let settings = settings(false);
        assert_eq!(settings.access_token().peek(), "live-token");
        assert_eq!(settings.environment(), Environment::Production);
    }

    #[test]
    fn settings_deserialize_from_host_blob() {
        let settings: SquareSettings = serde_json::from_value(serde_json::json!({
            "SandboxMode": true,
            "SandboxAccessToken": "sandbox-token",
            "LiveAccessToken": "live-token",
            "LocationId": "L8NKSB1A",
            "ContinueUrl": "https://shop.example/continue"
        }))
        .expect("settings blob should deserialize");

        assert!(settings.sandbox_mode);
        assert_eq!(settings.location_id, "L8NKSB1A");
        assert_eq!(
            settings.continue_url.as_deref(),
            Some("https://shop.example/continue")
        );
    }

    #[test]
    fn checkout_request_carries_net_total_in_minor_units() {
        let request =
            SquareCreateCheckoutRequest::try_from((&order(), &settings(true), "https://shop.example/continue"))
                .expect("request should build");

        assert_eq!(request.redirect_url, "https://shop.example/continue");
        assert_eq!(request.order.location_id, "L8NKSB1A");
        assert_eq!(request.order.order.location_id, "L8NKSB1A");
        assert_eq!(
            request.order.order.customer_id.as_deref(),
            Some("cust-42")
        );
        assert_eq!(request.order.order.source.name, ORDER_SOURCE_NAME);

        let line_item = &request.order.order.line_items[0];
        assert_eq!(line_item.uid, "order-1");
        assert_eq!(line_item.name, "ORDER-0001");
        assert_eq!(line_item.quantity, "1");
        assert_eq!(line_item.base_price_money.amount, MinorUnit::new(1999));
        assert_eq!(line_item.base_price_money.currency, Currency::USD);
    }

    #[test]
    fn checkout_request_uses_fresh_idempotency_keys() {
        let settings = settings(true);
        let first =
            SquareCreateCheckoutRequest::try_from((&order(), &settings, "https://shop.example/c"))
                .expect("request should build");
        let second =
            SquareCreateCheckoutRequest::try_from((&order(), &settings, "https://shop.example/c"))
                .expect("request should build");

        assert_ne!(first.idempotency_key, second.idempotency_key);
        assert_ne!(first.order.idempotency_key, second.order.idempotency_key);
        assert_ne!(first.idempotency_key, first.order.idempotency_key);
    }

    #[test]
    fn checkout_request_rejects_blank_redirect_url() {
        let error = SquareCreateCheckoutRequest::try_from((&order(), &settings(true), "  "))
            .expect_err("blank redirect url should be rejected");
        assert!(matches!(
            error.current_context(),
            ConnectorError::MissingRequiredField {
                field_name: "continue_url"
            }
        ));
    }

    #[test]
    fn order_state_mapping_is_case_insensitive() {
        let order = |state: &str| SquareOrder {
            id: "sq-1".to_string(),
            state: Some(state.to_string()),
        };

        assert_eq!(order("COMPLETED").payment_status(), PaymentStatus::Authorized);
        assert_eq!(order("completed").payment_status(), PaymentStatus::Authorized);
        assert_eq!(order("AUTHORIZED").payment_status(), PaymentStatus::Authorized);
        assert_eq!(order("Canceled").payment_status(), PaymentStatus::Cancelled);
        assert_eq!(
            order("OPEN").payment_status(),
            PaymentStatus::PendingExternalSystem
        );
        assert_eq!(
            order("SOMETHING_ELSE").payment_status(),
            PaymentStatus::PendingExternalSystem
        );
    }

    #[test]
    fn missing_order_state_stays_pending() {
        let order = SquareOrder {
            id: "sq-1".to_string(),
            state: None,
        };
        assert_eq!(order.payment_status(), PaymentStatus::PendingExternalSystem);
    }

    #[test]
    fn error_envelope_deserializes() {
        let response: SquareErrorResponse = serde_json::from_value(serde_json::json!({
            "errors": [{
                "category": "AUTHENTICATION_ERROR",
                "code": "UNAUTHORIZED",
                "detail": "The provided access token has expired."
            }]
        }))
        .expect("error envelope should deserialize");

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].code.as_deref(), Some("UNAUTHORIZED"));
    }
}
