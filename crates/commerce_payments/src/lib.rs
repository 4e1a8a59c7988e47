//! Host-facing payment domain model and the plugin interface payment
//! providers implement.
//!
//! The host owns orders and provider settings; a provider turns an order
//! into a redirect to a vendor-hosted checkout page and, on the buyer's
//! return, reconciles the vendor's view of the payment into a
//! [`payments::TransactionInfo`] the host can persist.

pub mod errors;
pub mod orders;
pub mod payments;
pub mod provider;
