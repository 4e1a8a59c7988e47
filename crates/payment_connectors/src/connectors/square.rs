pub mod transformers;

use async_trait::async_trait;
use commerce_core::{
    consts,
    enums::Environment,
    errors::CustomResult,
    ext_traits::BytesExt,
    generate_id_with_default_len,
    request::{Method, RequestBody, RequestBuilder},
    types::FloatMajorUnit,
};
use commerce_payments::{
    errors::ConnectorError,
    orders::OrderReadOnly,
    payments::{
        CallbackRequest, CallbackResult, ErrorResponse, FormMethod, PaymentForm,
        PaymentFormResult, PaymentStatus, TransactionInfo,
    },
    provider::PaymentProvider,
};
use error_stack::{report, ResultExt};
use masking::{Mask, Maskable, PeekInterface};
use transformers as square;

use crate::{constants::headers, services};

/// Vendor API version pinned on every request.
const SQUARE_API_VERSION: &str = "2023-12-13";

/// Query parameter the vendor appends to the return URL.
const TRANSACTION_ID_PARAM: &str = "transactionId";

/// Vendor endpoints per environment.
///
/// The defaults point at the public vendor hosts; tests point both at a
/// local mock server.
#[derive(Clone, Debug)]
pub struct SquareConnectorParams {
    pub base_url: String,
    pub sandbox_base_url: String,
}

impl Default for SquareConnectorParams {
    fn default() -> Self {
        Self {
            base_url: "https://connect.squareup.com".to_string(),
            sandbox_base_url: "https://connect.squareupsandbox.com".to_string(),
        }
    }
}

/// Square hosted-checkout payment provider.
#[derive(Clone, Debug, Default)]
pub struct Square {
    params: SquareConnectorParams,
}

impl Square {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: SquareConnectorParams) -> Self {
        Self { params }
    }

    fn base_url(&self, environment: Environment) -> &str {
        match environment {
            Environment::Production => &self.params.base_url,
            Environment::Sandbox => &self.params.sandbox_base_url,
        }
    }

    fn build_headers(
        &self,
        settings: &square::SquareSettings,
    ) -> Vec<(String, Maskable<String>)> {
        let auth = square::SquareAuthType::from(settings);
        vec![
            (
                headers::CONTENT_TYPE.to_string(),
                "application/json".to_string().into(),
            ),
            (
                headers::SQUARE_VERSION.to_string(),
                SQUARE_API_VERSION.to_string().into(),
            ),
            (
                headers::AUTHORIZATION.to_string(),
                format!("Bearer {}", auth.access_token.peek()).into_masked(),
            ),
        ]
    }

    fn build_error_response(
        &self,
        res: &services::Response,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        let response: square::SquareErrorResponse = res
            .response
            .parse_struct("SquareErrorResponse")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;

        let reason = response
            .errors
            .iter()
            .filter_map(|error| error.detail.clone())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ErrorResponse {
            status_code: res.status_code,
            code: response
                .errors
                .first()
                .and_then(|error| error.code.clone())
                .unwrap_or_else(|| consts::NO_ERROR_CODE.to_string()),
            message: response
                .errors
                .first()
                .and_then(|error| error.category.clone())
                .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
            reason: (!reason.is_empty()).then_some(reason),
        })
    }

    fn handle_error_response<T>(
        &self,
        res: services::Response,
    ) -> CustomResult<T, ConnectorError> {
        let error_response = self.build_error_response(&res)?;
        Err(report!(ConnectorError::ProcessingStepFailed(Some(
            res.response
        ))))
        .attach_printable(format!(
            "square responded with {}: {} ({})",
            error_response.status_code, error_response.code, error_response.message,
        ))
    }

    async fn create_checkout(
        &self,
        order: &OrderReadOnly,
        settings: &square::SquareSettings,
        redirect_url: &str,
    ) -> CustomResult<square::SquareCheckout, ConnectorError> {
        let connector_request =
            square::SquareCreateCheckoutRequest::try_from((order, settings, redirect_url))?;
        let body = RequestBody::log_and_get_request_body(&connector_request)
            .change_context(ConnectorError::RequestEncodingFailed)?;
        let url = format!(
            "{}/v2/locations/{}/checkouts",
            self.base_url(settings.environment()),
            settings.location_id,
        );

        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&url)
            .attach_default_headers()
            .headers(self.build_headers(settings))
            .body(body)
            .build();

        let result = services::call_connector_api(request)
            .await
            .change_context(ConnectorError::ProcessingStepFailed(None))?;

        match result {
            Ok(res) => {
                let response: square::SquareCreateCheckoutResponse = res
                    .response
                    .parse_struct("SquareCreateCheckoutResponse")
                    .change_context(ConnectorError::ResponseDeserializationFailed)?;
                Ok(response.checkout)
            }
            Err(res) => self.handle_error_response(res),
        }
    }

    async fn retrieve_orders(
        &self,
        transaction_id: &str,
        settings: &square::SquareSettings,
    ) -> CustomResult<Vec<square::SquareOrder>, ConnectorError> {
        let connector_request = square::SquareBatchRetrieveOrdersRequest::new(transaction_id);
        let body = RequestBody::log_and_get_request_body(&connector_request)
            .change_context(ConnectorError::RequestEncodingFailed)?;
        let url = format!(
            "{}/v2/orders/batch-retrieve",
            self.base_url(settings.environment()),
        );

        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&url)
            .attach_default_headers()
            .headers(self.build_headers(settings))
            .body(body)
            .build();

        let result = services::call_connector_api(request)
            .await
            .change_context(ConnectorError::ProcessingStepFailed(None))?;

        match result {
            Ok(res) => {
                let response: square::SquareBatchRetrieveOrdersResponse = res
                    .response
                    .parse_struct("SquareBatchRetrieveOrdersResponse")
                    .change_context(ConnectorError::ResponseDeserializationFailed)?;
                Ok(response.orders)
            }
            Err(res) => self.handle_error_response(res),
        }
    }
}

#[async_trait]
impl PaymentProvider for Square {
    type Settings = square::SquareSettings;

    fn id(&self) -> &'static str {
        "square"
    }

    fn label(&self) -> &'static str {
        "Square"
    }

    fn description(&self) -> &'static str {
        "Square payment provider"
    }

    fn icon(&self) -> &'static str {
        "icon-invoice"
    }

    fn finalize_at_continue_url(&self) -> bool {
        true
    }

    fn get_continue_url(
        &self,
        _order: &OrderReadOnly,
        settings: &Self::Settings,
    ) -> CustomResult<String, ConnectorError> {
        settings
            .continue_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                report!(ConnectorError::MissingRequiredField {
                    field_name: "ContinueUrl",
                })
            })
    }

    fn get_cancel_url(
        &self,
        _order: &OrderReadOnly,
        _settings: &Self::Settings,
    ) -> CustomResult<String, ConnectorError> {
        Ok(String::new())
    }

    fn get_error_url(
        &self,
        _order: &OrderReadOnly,
        _settings: &Self::Settings,
    ) -> CustomResult<String, ConnectorError> {
        Ok(String::new())
    }

    async fn generate_form(
        &self,
        order: &OrderReadOnly,
        continue_url: &str,
        _cancel_url: &str,
        _callback_url: &str,
        settings: &Self::Settings,
    ) -> CustomResult<PaymentFormResult, ConnectorError> {
        let checkout = self.create_checkout(order, settings, continue_url).await?;
        tracing::info!(
            checkout_id = %checkout.id,
            "created hosted checkout session"
        );

        Ok(PaymentFormResult {
            form: PaymentForm {
                action: checkout.checkout_page_url,
                method: FormMethod::Get,
            },
        })
    }

    async fn process_callback(
        &self,
        order: &OrderReadOnly,
        request: &CallbackRequest,
        settings: &Self::Settings,
    ) -> CustomResult<CallbackResult, ConnectorError> {
        let transaction_id = request
            .query_param(TRANSACTION_ID_PARAM)
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let payment_status = match transaction_id {
            Some(transaction_id) => {
                let orders = self.retrieve_orders(transaction_id, settings).await?;
                match orders.first() {
                    Some(square_order) => {
                        let status = square_order.payment_status();
                        tracing::info!(
                            state = ?square_order.state,
                            %status,
                            "resolved vendor order state"
                        );
                        status
                    }
                    None => {
                        tracing::info!(
                            %transaction_id,
                            "vendor returned no order, keeping payment pending"
                        );
                        PaymentStatus::default()
                    }
                }
            }
            None => {
                tracing::debug!("callback carried no transaction id, keeping payment pending");
                PaymentStatus::default()
            }
        };

        // The host-visible transaction id is freshly generated; it is not
        // correlated with the vendor's own order id.
        Ok(CallbackResult {
            transaction_info: TransactionInfo {
                amount_authorized: order.total_price.with_tax,
                transaction_fee: FloatMajorUnit::zero(),
                transaction_id: generate_id_with_default_len("txn"),
                payment_status,
            },
        })
    }
}
