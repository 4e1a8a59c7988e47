//! Outbound HTTP service used by the connectors.
//!
//! Each invocation constructs its own client; connector calls are
//! independent request-response exchanges with no pooling or shared state.

use bytes::Bytes;
use commerce_core::{
    errors::{ApiClientError, CustomResult},
    request::{Headers, Method, Request},
};
use error_stack::{report, ResultExt};
use masking::{ExposeInterface, Maskable, PeekInterface};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// A raw connector response.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<HeaderMap>,
    pub response: Bytes,
    pub status_code: u16,
}

fn create_client() -> CustomResult<reqwest::Client, ApiClientError> {
    reqwest::Client::builder()
        .build()
        .change_context(ApiClientError::ClientConstructionFailed)
}

fn construct_header_map(headers: Headers) -> CustomResult<HeaderMap, ApiClientError> {
    headers
        .into_iter()
        .try_fold(HeaderMap::new(), |mut header_map, (name, value)| {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .change_context(ApiClientError::HeaderMapConstructionFailed)?;
            let header_value = match value {
                Maskable::Masked(masked) => {
                    let mut header_value = HeaderValue::from_str(masked.peek())
                        .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                    header_value.set_sensitive(true);
                    header_value
                }
                Maskable::Normal(normal) => HeaderValue::from_str(&normal)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?,
            };
            header_map.append(header_name, header_value);
            Ok(header_map)
        })
}

/// Sends a connector request and classifies the outcome.
///
/// `Ok(Ok(_))` is a success response, `Ok(Err(_))` a 4xx/5xx response the
/// caller runs through its error handling, `Err(_)` a transport failure.
#[tracing::instrument(skip_all, fields(method = %request.method, url = %request.url))]
pub async fn call_connector_api(
    request: Request,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;
    let client = create_client()?;
    let headers = construct_header_map(request.headers)?;

    let request_builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => client.post(url),
        Method::Put => client.put(url),
        Method::Delete => client.delete(url),
    }
    .headers(headers);
    let request_builder = match request.body {
        Some(body) => request_builder.body(body.get_inner_value().expose()),
        None => request_builder,
    };

    tracing::info!(tag = "outgoing_api", "sending request to the connector");
    let response = request_builder.send().await.map_err(|error| {
        let api_error = if error.is_timeout() {
            ApiClientError::RequestTimeoutReceived
        } else {
            ApiClientError::RequestNotSent(error.to_string())
        };
        report!(api_error)
    })?;

    handle_response(response).await
}

async fn handle_response(
    response: reqwest::Response,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status_code = response.status().as_u16();
    let headers = Some(response.headers().to_owned());
    tracing::info!(tag = "outgoing_api", status_code, "received response from the connector");

    match status_code {
        200..=202 | 204 | 302 => {
            let response = response
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Ok(Response {
                headers,
                response,
                status_code,
            }))
        }
        400..=599 => {
            let response = response
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Err(Response {
                headers,
                response,
                status_code,
            }))
        }
        _ => Err(report!(ApiClientError::UnexpectedServerResponse)),
    }
}
