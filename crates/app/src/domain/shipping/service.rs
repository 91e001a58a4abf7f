//! Shipping service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::shipping::{ShippingAddress, ShippingMethod, ShippingRates};

use crate::{
    amounts::{from_money, to_money},
    domain::shipping::errors::ShippingServiceError,
};

/// Shipping cost and delivery estimate in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingEstimate {
    pub cost: u64,
    pub estimated_delivery: Timestamp,
}

/// Quotes shipping from a fixed rate table.
#[derive(Debug, Clone)]
pub struct RateTableShippingService {
    rates: ShippingRates<'static>,
}

impl RateTableShippingService {
    #[must_use]
    pub fn new(rates: ShippingRates<'static>) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl ShippingService for RateTableShippingService {
    async fn quote(
        &self,
        method: ShippingMethod,
        address: ShippingAddress,
        order_total: u64,
        now: Timestamp,
    ) -> Result<ShippingEstimate, ShippingServiceError> {
        let order_total = to_money(order_total, self.rates.currency())?;
        let quote = self.rates.quote(method, &address, &order_total, now)?;

        Ok(ShippingEstimate {
            cost: from_money(&quote.cost)?,
            estimated_delivery: quote.estimated_delivery,
        })
    }
}

#[automock]
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Quote shipping for an order of `order_total` minor units.
    async fn quote(
        &self,
        method: ShippingMethod,
        address: ShippingAddress,
        order_total: u64,
        now: Timestamp,
    ) -> Result<ShippingEstimate, ShippingServiceError>;
}
