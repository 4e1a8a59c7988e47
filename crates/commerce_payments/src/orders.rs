//! Read-only projection of the host's order model.
//!
//! Providers never mutate an order; the host hands one over per invocation
//! and persists the resulting transaction itself.

use commerce_core::{enums::Currency, types::FloatMajorUnit};
use serde::{Deserialize, Serialize};

/// An order as seen by a payment provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OrderReadOnly {
    /// Stable host-side identifier of the order.
    pub id: String,
    /// The human-facing order number.
    pub order_number: String,
    /// The order total, split by tax.
    pub total_price: TaxedTotal,
    /// Currency of all amounts on this order.
    pub currency: Currency,
    pub customer_info: CustomerInfo,
}

/// An order total in major units, with and without tax.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct TaxedTotal {
    pub without_tax: FloatMajorUnit,
    pub tax: FloatMajorUnit,
    pub with_tax: FloatMajorUnit,
}

impl TaxedTotal {
    /// Builds a total from its net amount and tax.
    pub fn from_parts(without_tax: FloatMajorUnit, tax: FloatMajorUnit) -> Self {
        Self {
            without_tax,
            tax,
            with_tax: FloatMajorUnit::new(
                without_tax.get_amount_as_f64() + tax.get_amount_as_f64(),
            ),
        }
    }
}

/// Customer details attached to an order.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CustomerInfo {
    /// The host's reference for the customer, absent for guest checkouts.
    pub customer_reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxed_total_computes_gross_amount() {
        let total = TaxedTotal::from_parts(FloatMajorUnit::new(100.0), FloatMajorUnit::new(25.0));
        assert_eq!(total.with_tax, FloatMajorUnit::new(125.0));
    }
}
