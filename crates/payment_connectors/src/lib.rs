//! Payment connector implementations and the outbound HTTP plumbing they
//! share.

pub mod connectors;
mod constants;
pub mod services;

use std::sync::Arc;

use commerce_payments::provider::ProviderRegistry;

pub use crate::connectors::Square;

/// Builds a registry containing every connector this crate ships, each
/// registered under its provider id.
pub fn default_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(Square::new()));
    registry
}
