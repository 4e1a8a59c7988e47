//! Errors surfaced by payment provider integrations.

/// Errors a payment provider can raise while talking to its vendor API or
/// interpreting host-supplied data. Raised errors propagate to the host
/// unrecovered; there is no retry layer.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to execute a processing step: {0:?}")]
    ProcessingStepFailed(Option<bytes::Bytes>),
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("An invalid connector name was provided")]
    InvalidConnectorName,
    #[error("Settings provided for connector {connector} do not match its settings schema")]
    InvalidSettingsFormat { connector: &'static str },
}
