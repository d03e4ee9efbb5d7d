//! Key generation endpoint.

use crate::{xml, PanosClient, PanosError, Result};

/// Key generation endpoint
pub struct KeygenApi<'a> {
    client: &'a PanosClient,
}

impl<'a> KeygenApi<'a> {
    pub(crate) const fn new(client: &'a PanosClient) -> Self {
        Self { client }
    }

    /// Exchange a username and password for an API key.
    ///
    /// Any error status from the device is reported as
    /// [`PanosError::Unauthorized`]; transport failures pass through.
    pub async fn generate(&self, username: &str, password: &str) -> Result<String> {
        let body = self
            .client
            .get_public(&[("type", "keygen"), ("user", username), ("password", password)])
            .await
            .map_err(|e| match e {
                PanosError::Api { message, .. } => PanosError::Unauthorized(message),
                other => other,
            })?;

        xml::api_key(&body)
    }
}
