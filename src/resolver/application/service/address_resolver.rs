//! Resolves a VM name to the address its guest agent reports.
//!
//! Resolution is two-phase. First every interface of every VM carrying the
//! requested name is collected, walking nodes and VMs in API order. Then the
//! collected list is scanned once: loopback devices are skipped and the
//! first address of the requested family wins. Enumeration order is the
//! only ranking there is.

use crate::{
    ProxmoxError, ProxmoxResult,
    core::{
        domain::model::network_interface::{IpAddress, NetworkInterface},
        infrastructure::resource_enumerator::ResourceEnumerator,
    },
};
use tracing::{debug, info};

/// Picks the first address of `family` from the first usable interface.
///
/// Interfaces are taken in order; loopback devices (all-zero MAC) are never
/// considered, even when they carry an address of the right family.
pub fn select_address<'a>(
    candidates: &'a [NetworkInterface],
    family: &str,
) -> Option<&'a IpAddress> {
    candidates
        .iter()
        .filter(|interface| !interface.is_loopback())
        .find_map(|interface| interface.first_address_of(family))
}

/// Walks nodes, VMs and guest interfaces through a [`ResourceEnumerator`].
pub struct AddressResolver<'a, E: ResourceEnumerator + ?Sized> {
    enumerator: &'a E,
}

impl<'a, E: ResourceEnumerator + ?Sized> AddressResolver<'a, E> {
    pub fn new(enumerator: &'a E) -> Self {
        Self { enumerator }
    }

    /// Collects the interfaces of every VM named exactly `name`.
    ///
    /// Any listing failure aborts the walk; no partial list is returned.
    pub async fn collect_candidates(&self, name: &str) -> ProxmoxResult<Vec<NetworkInterface>> {
        let mut candidates = Vec::new();

        for node in self.enumerator.list_nodes().await? {
            for vm in self.enumerator.list_vms(&node.node).await? {
                if !vm.is_named(name) {
                    continue;
                }
                debug!(node = %node.node, vmid = vm.vmid, name, "Matched VM");
                let interfaces = self.enumerator.list_interfaces(&node.node, vm.vmid).await?;
                candidates.extend(interfaces);
            }
        }

        Ok(candidates)
    }

    /// Returns the address of `family` (e.g. `"ipv4"`) for the VM `name`.
    ///
    /// # Errors
    /// `ProxmoxError::NotFound` when no VM has that name or none of its
    /// non-loopback interfaces carries an address of that family; any
    /// enumeration error is returned unchanged.
    pub async fn find_ip_address(&self, name: &str, family: &str) -> ProxmoxResult<String> {
        let candidates = self.collect_candidates(name).await?;
        debug!(name, family, candidates = candidates.len(), "Scanning interfaces");

        match select_address(&candidates, family) {
            Some(address) => {
                info!(name, family, address = %address.address, "Resolved address");
                Ok(address.address.clone())
            }
            None => Err(ProxmoxError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Tries each family in turn and returns the first address found.
    ///
    /// Every attempt is a fresh resolution. Any failure, not only
    /// `NotFound`, moves on to the next family.
    ///
    /// # Errors
    /// `ProxmoxError::Unresolvable` once every family has failed.
    pub async fn find_ip_address_with_fallback(
        &self,
        name: &str,
        families: &[&str],
    ) -> ProxmoxResult<String> {
        let mut last_error = None;

        for family in families {
            match self.find_ip_address(name, family).await {
                Ok(address) => return Ok(address),
                Err(e) => {
                    debug!(name, family, error = %e, "Resolution attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(ProxmoxError::Unresolvable {
            name: name.to_string(),
            source: last_error.map(Box::new),
        })
    }
}
