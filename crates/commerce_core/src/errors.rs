//! Errors and error specific types for universal use

/// The custom implemented [`Result`] type, wrapping the error variant in an
/// [`error_stack::Report`].
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Parsing of a value into a concrete type failed.
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse the value into the requested type")]
pub struct ParsingError;

/// Errors raised by the outbound HTTP client while talking to a connector.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// The HTTP client could not be constructed.
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    /// The request URL could not be parsed or encoded.
    #[error("Failed to encode the request URL")]
    UrlEncodingFailed,
    /// The header map for the outgoing request could not be built.
    #[error("Failed to construct the request headers")]
    HeaderMapConstructionFailed,
    /// The request never left the client.
    #[error("Unable to send the request to the connector: {0}")]
    RequestNotSent(String),
    /// The connector did not respond within the client timeout.
    #[error("Request to the connector timed out")]
    RequestTimeoutReceived,
    /// The response body could not be read.
    #[error("Failed to read the connector response body")]
    ResponseDecodingFailed,
    /// The connector answered with a status code outside the handled ranges.
    #[error("The connector returned an unexpected status code")]
    UnexpectedServerResponse,
}
