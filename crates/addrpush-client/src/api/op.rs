//! Operational command endpoint.

use crate::xpath::{DG_HIERARCHY_CMD, MULTI_VSYS_CMD};
use crate::{xml, PanosClient, PanosError, Result};
use tracing::debug;

/// `type=op` requests
pub struct OpApi<'a> {
    client: &'a PanosClient,
}

impl<'a> OpApi<'a> {
    pub(crate) const fn new(client: &'a PanosClient) -> Self {
        Self { client }
    }

    /// Run an operational command given as XML
    pub async fn run(&self, cmd: &str) -> Result<String> {
        self.client.get(&[("type", "op"), ("cmd", cmd)]).await
    }

    /// Parent device groups of `device_group`, nearest first.
    ///
    /// A device group missing from the hierarchy is treated as top level.
    pub async fn device_group_ancestors(&self, device_group: &str) -> Result<Vec<String>> {
        let body = self.run(DG_HIERARCHY_CMD).await?;
        match xml::dg_ancestors(&body, device_group)? {
            Some(ancestors) => Ok(ancestors),
            None => {
                debug!(device_group, "device group not in hierarchy, assuming top level");
                Ok(Vec::new())
            }
        }
    }

    /// Whether the firewall runs in multi-vsys mode
    pub async fn multi_vsys(&self) -> Result<bool> {
        let body = self.run(MULTI_VSYS_CMD).await?;
        match xml::result_text(&body)?.as_str() {
            "on" => Ok(true),
            "off" => Ok(false),
            other => Err(PanosError::UnexpectedResponse(format!(
                "multi-vsys setting is '{other}', expected 'on' or 'off'"
            ))),
        }
    }
}
