//! Address objects, address groups and device layout.

use addrpush_core::{AddressGroup, Batch, BatchBuilder, DeviceType, Scope};
use tracing::{debug, info};

use crate::api::ConfigApi;
use crate::xpath::{self, Location};
use crate::{xml, PanosClient, PanosError, Result};

/// Higher-level object operations built on config get/set
pub struct ObjectsApi<'a> {
    client: &'a PanosClient,
}

impl<'a> ObjectsApi<'a> {
    pub(crate) const fn new(client: &'a PanosClient) -> Self {
        Self { client }
    }

    /// Names of all device groups. Empty on a firewall.
    pub async fn device_groups(&self) -> Result<Vec<String>> {
        let body = self.client.config().get(&xpath::device_groups()).await?;
        xml::entry_names(&body, "device-group")
    }

    /// Panorama if any device group exists, firewall otherwise
    pub async fn detect_device_type(&self) -> Result<DeviceType> {
        let device = if self.device_groups().await?.is_empty() {
            DeviceType::Firewall
        } else {
            DeviceType::Panorama
        };
        info!(%device, "detected device type");
        Ok(device)
    }

    /// Names of all vsys on a firewall
    pub async fn vsys_names(&self) -> Result<Vec<String>> {
        let body = self.client.config().get(&xpath::vsys_list()).await?;
        xml::entry_names(&body, "vsys")
    }

    /// Names of the address objects at one location
    pub async fn address_names(&self, location: &Location) -> Result<Vec<String>> {
        let body = self.client.config().get(&location.addresses()).await?;
        let names = xml::entry_names(&body, "address")?;
        debug!(%location, count = names.len(), "fetched address names");
        Ok(names)
    }

    /// Names of every address object a new object in `scope` could collide
    /// with: the scope itself, its ancestor device groups, and shared.
    pub async fn existing_names(&self, scope: &Scope) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for location in Location::lineage(scope) {
            names.extend(self.address_names(&location).await?);
        }
        Ok(names)
    }

    /// Packer for address batches at `location`
    #[must_use]
    pub fn address_batcher(&self, location: &Location, capacity: usize) -> BatchBuilder {
        BatchBuilder::new(capacity, self.client.envelope_len(&location.addresses()))
    }

    /// Packer for group member batches at `location`
    #[must_use]
    pub fn group_batcher(&self, location: &Location, capacity: usize) -> BatchBuilder {
        BatchBuilder::new(capacity, self.client.envelope_len(&location.address_groups()))
    }

    /// Create one batch of address objects
    pub async fn create_addresses(&self, location: &Location, batch: &Batch) -> Result<()> {
        let what = format!("{} address object(s) in {location}", batch.len());
        self.push(&location.addresses(), &batch.payload(), what).await
    }

    /// Add one batch of members to `group`, creating it if needed
    pub async fn create_group(
        &self,
        location: &Location,
        group: &AddressGroup,
        batch: &Batch,
    ) -> Result<()> {
        let what = format!("address group '{}' ({} member(s))", group.name, batch.len());
        self.push(&location.address_groups(), &group.element(&batch.payload()), what)
            .await
    }

    async fn push(&self, xpath: &str, element: &str, what: String) -> Result<()> {
        debug!(%what, xpath, "pushing");
        match self.client.config().set(xpath, element).await {
            Ok(()) => Ok(()),
            Err(PanosError::Api { message, .. }) => Err(PanosError::PushRejected {
                what,
                request: self.client.describe(&ConfigApi::set_params(xpath, element)),
                message,
            }),
            Err(e) => Err(e),
        }
    }
}
