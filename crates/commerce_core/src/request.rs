//! Model of an outgoing connector request.

use error_stack::ResultExt;
use masking::{Maskable, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::{self, CustomResult};

/// Header set of an outgoing request; values may be masked.
pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Returns the default request headers as an array of tuples containing
/// header names and values.
fn default_request_headers() -> [(String, Maskable<String>); 1] {
    [("via".to_string(), "CommercePayments".to_string().into())]
}

/// A JSON-encoded request body, wrapped so it never Debug-prints its content.
#[derive(Debug)]
pub struct RequestBody(Secret<String>);

impl RequestBody {
    /// Encode `body` to its JSON wire form, tracing the encoded payload.
    pub fn log_and_get_request_body<T>(body: &T) -> CustomResult<Self, errors::ParsingError>
    where
        T: Serialize + std::fmt::Debug,
    {
        let encoded = serde_json::to_string(body).change_context(errors::ParsingError)?;
        tracing::debug!(connector_request_body = %encoded);
        Ok(Self(Secret::new(encoded)))
    }

    /// Consume the wrapper and hand back the encoded body.
    pub fn get_inner_value(self) -> Secret<String> {
        self.0
    }
}

/// An outgoing connector request.
#[derive(Debug)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestBody>,
}

#[derive(Debug)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestBody>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn attach_default_headers(mut self) -> Self {
        self.headers.extend(default_request_headers());
        self
    }

    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_url_method_and_headers() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://connect.example.com/v2/locations/L1/checkouts")
            .attach_default_headers()
            .headers(vec![(
                "Content-Type".to_string(),
                "application/json".to_string().into(),
            )])
            .build();

        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url,
            "https://connect.example.com/v2/locations/L1/checkouts"
        );
        assert_eq!(request.headers.len(), 2);
        assert!(request.body.is_none());
    }

    #[test]
    fn body_is_encoded_as_json() {
        use masking::ExposeInterface;

        #[derive(Debug, serde::Serialize)]
        struct Probe {
            amount: i64,
        }

        let body =
            RequestBody::log_and_get_request_body(&Probe { amount: 1999 }).expect("body encodes");
        assert_eq!(body.get_inner_value().expose(), r#"{"amount":1999}"#);
    }
}
