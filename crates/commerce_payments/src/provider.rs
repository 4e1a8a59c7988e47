//! The plugin interface payment providers implement, its type-erased form,
//! and the name-keyed registry the host resolves providers through.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use commerce_core::errors::CustomResult;
use error_stack::{report, ResultExt};
use serde::Deserialize;

use crate::{
    errors::ConnectorError,
    orders::OrderReadOnly,
    payments::{CallbackRequest, CallbackResult, PaymentFormResult},
};

/// A payment provider plugin.
///
/// One value of an implementing type serves all invocations; settings arrive
/// per call because the host configures them per installation.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Provider settings as configured in the host, deserialized from the
    /// host's settings blob.
    type Settings: for<'de> Deserialize<'de> + Send + Sync;

    /// Registry key of the provider.
    fn id(&self) -> &'static str;
    /// Human-facing provider name.
    fn label(&self) -> &'static str;
    fn description(&self) -> &'static str {
        ""
    }
    /// Icon hint for the host back office.
    fn icon(&self) -> &'static str {
        ""
    }
    /// Whether the host should finalize the order when the buyer lands on
    /// the continue URL rather than waiting for an out-of-band notification.
    fn finalize_at_continue_url(&self) -> bool {
        false
    }

    fn get_continue_url(
        &self,
        order: &OrderReadOnly,
        settings: &Self::Settings,
    ) -> CustomResult<String, ConnectorError>;

    fn get_cancel_url(
        &self,
        order: &OrderReadOnly,
        settings: &Self::Settings,
    ) -> CustomResult<String, ConnectorError>;

    fn get_error_url(
        &self,
        order: &OrderReadOnly,
        settings: &Self::Settings,
    ) -> CustomResult<String, ConnectorError>;

    /// Builds the form that sends the buyer to the vendor checkout page.
    async fn generate_form(
        &self,
        order: &OrderReadOnly,
        continue_url: &str,
        cancel_url: &str,
        callback_url: &str,
        settings: &Self::Settings,
    ) -> CustomResult<PaymentFormResult, ConnectorError>;

    /// Determines the payment status once the buyer returns from checkout.
    async fn process_callback(
        &self,
        order: &OrderReadOnly,
        request: &CallbackRequest,
        settings: &Self::Settings,
    ) -> CustomResult<CallbackResult, ConnectorError>;
}

/// Object-safe form of [`PaymentProvider`], taking settings as the raw JSON
/// value the host stores. This is what the registry hands out.
#[async_trait]
pub trait ErasedPaymentProvider: Send + Sync {
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn icon(&self) -> &'static str;
    fn finalize_at_continue_url(&self) -> bool;

    fn get_continue_url(
        &self,
        order: &OrderReadOnly,
        settings: &serde_json::Value,
    ) -> CustomResult<String, ConnectorError>;

    fn get_cancel_url(
        &self,
        order: &OrderReadOnly,
        settings: &serde_json::Value,
    ) -> CustomResult<String, ConnectorError>;

    fn get_error_url(
        &self,
        order: &OrderReadOnly,
        settings: &serde_json::Value,
    ) -> CustomResult<String, ConnectorError>;

    async fn generate_form(
        &self,
        order: &OrderReadOnly,
        continue_url: &str,
        cancel_url: &str,
        callback_url: &str,
        settings: &serde_json::Value,
    ) -> CustomResult<PaymentFormResult, ConnectorError>;

    async fn process_callback(
        &self,
        order: &OrderReadOnly,
        request: &CallbackRequest,
        settings: &serde_json::Value,
    ) -> CustomResult<CallbackResult, ConnectorError>;
}

impl std::fmt::Debug for dyn ErasedPaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedPaymentProvider")
            .field("id", &self.id())
            .finish()
    }
}

fn parse_settings<P>(
    provider: &P,
    settings: &serde_json::Value,
) -> CustomResult<P::Settings, ConnectorError>
where
    P: PaymentProvider,
{
    P::Settings::deserialize(settings).change_context(ConnectorError::InvalidSettingsFormat {
        connector: PaymentProvider::id(provider),
    })
}

#[async_trait]
impl<P> ErasedPaymentProvider for P
where
    P: PaymentProvider,
{
    fn id(&self) -> &'static str {
        PaymentProvider::id(self)
    }

    fn label(&self) -> &'static str {
        PaymentProvider::label(self)
    }

    fn description(&self) -> &'static str {
        PaymentProvider::description(self)
    }

    fn icon(&self) -> &'static str {
        PaymentProvider::icon(self)
    }

    fn finalize_at_continue_url(&self) -> bool {
        PaymentProvider::finalize_at_continue_url(self)
    }

    fn get_continue_url(
        &self,
        order: &OrderReadOnly,
        settings: &serde_json::Value,
    ) -> CustomResult<String, ConnectorError> {
        let settings = parse_settings(self, settings)?;
        PaymentProvider::get_continue_url(self, order, &settings)
    }

    fn get_cancel_url(
        &self,
        order: &OrderReadOnly,
        settings: &serde_json::Value,
    ) -> CustomResult<String, ConnectorError> {
        let settings = parse_settings(self, settings)?;
        PaymentProvider::get_cancel_url(self, order, &settings)
    }

    fn get_error_url(
        &self,
        order: &OrderReadOnly,
        settings: &serde_json::Value,
    ) -> CustomResult<String, ConnectorError> {
        let settings = parse_settings(self, settings)?;
        PaymentProvider::get_error_url(self, order, &settings)
    }

    async fn generate_form(
        &self,
        order: &OrderReadOnly,
        continue_url: &str,
        cancel_url: &str,
        callback_url: &str,
        settings: &serde_json::Value,
    ) -> CustomResult<PaymentFormResult, ConnectorError> {
        let settings = parse_settings(self, settings)?;
        PaymentProvider::generate_form(self, order, continue_url, cancel_url, callback_url, &settings)
            .await
    }

    async fn process_callback(
        &self,
        order: &OrderReadOnly,
        request: &CallbackRequest,
        settings: &serde_json::Value,
    ) -> CustomResult<CallbackResult, ConnectorError> {
        let settings = parse_settings(self, settings)?;
        PaymentProvider::process_callback(self, order, request, &settings).await
    }
}

/// Name-keyed provider registry; the runtime analog of the host's
/// plugin-registration attribute.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn ErasedPaymentProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its own id, replacing any previous
    /// registration for that id.
    pub fn register(&mut self, provider: Arc<dyn ErasedPaymentProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    /// Resolves a provider by registry key.
    pub fn get(
        &self,
        name: &str,
    ) -> CustomResult<Arc<dyn ErasedPaymentProvider>, ConnectorError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| report!(ConnectorError::InvalidConnectorName))
            .attach_printable_lazy(|| format!("no payment provider registered under `{name}`"))
    }

    /// Registry keys of all registered providers, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.providers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
