//! Configuration get/set endpoints.

use crate::{PanosClient, Result};

/// Raw `type=config` requests
pub struct ConfigApi<'a> {
    client: &'a PanosClient,
}

impl<'a> ConfigApi<'a> {
    pub(crate) const fn new(client: &'a PanosClient) -> Self {
        Self { client }
    }

    /// Read the candidate configuration at `xpath`
    pub async fn get(&self, xpath: &str) -> Result<String> {
        self.client
            .get(&[("type", "config"), ("action", "get"), ("xpath", xpath)])
            .await
    }

    /// Merge `element` into the candidate configuration at `xpath`
    pub async fn set(&self, xpath: &str, element: &str) -> Result<()> {
        self.client
            .get(&Self::set_params(xpath, element))
            .await
            .map(drop)
    }

    /// Query parameters of a `set` request, minus the key
    #[must_use]
    pub fn set_params<'p>(xpath: &'p str, element: &'p str) -> [(&'static str, &'p str); 4] {
        [
            ("type", "config"),
            ("action", "set"),
            ("xpath", xpath),
            ("element", element),
        ]
    }
}
