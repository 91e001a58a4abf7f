//! Shipping request and response models shared by the shipping and order handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::shipping::{ShippingAddress, ShippingMethod};

/// Shipping method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ShippingMethodPayload {
    /// Flat standard rate
    #[default]
    Standard,

    /// Faster, dearer
    Express,

    /// Next day
    Priority,
}

impl From<ShippingMethodPayload> for ShippingMethod {
    fn from(method: ShippingMethodPayload) -> Self {
        match method {
            ShippingMethodPayload::Standard => ShippingMethod::Standard,
            ShippingMethodPayload::Express => ShippingMethod::Express,
            ShippingMethodPayload::Priority => ShippingMethod::Priority,
        }
    }
}

impl From<ShippingMethod> for ShippingMethodPayload {
    fn from(method: ShippingMethod) -> Self {
        match method {
            ShippingMethod::Standard => ShippingMethodPayload::Standard,
            ShippingMethod::Express => ShippingMethodPayload::Express,
            ShippingMethod::Priority => ShippingMethodPayload::Priority,
        }
    }
}

/// Delivery address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AddressPayload {
    /// Recipient name
    pub name: String,

    /// Street address
    pub street: String,

    /// City
    pub city: String,

    /// State or province
    pub state: String,

    /// Postal code
    pub postal_code: String,

    /// Country name; blank means the store's home country
    pub country: String,

    /// Contact phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<AddressPayload> for ShippingAddress {
    fn from(address: AddressPayload) -> Self {
        ShippingAddress {
            name: address.name,
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            phone: address.phone,
        }
    }
}

impl From<ShippingAddress> for AddressPayload {
    fn from(address: ShippingAddress) -> Self {
        AddressPayload {
            name: address.name,
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            phone: address.phone,
        }
    }
}
