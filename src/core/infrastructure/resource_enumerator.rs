//! Read-only listings of nodes, VMs and guest interfaces.

use crate::{
    ProxmoxError, ProxmoxResult,
    core::{
        domain::model::{
            api_response::{AgentResult, ApiResponse},
            network_interface::NetworkInterface,
            node_list_item::NodeListItem,
            vm::VmListItem,
        },
        infrastructure::api_client::ApiClient,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// The three listings the address resolver walks.
///
/// Each call is independent and uncached. Implementations report any
/// transport or decoding failure as `ProxmoxError::Enumeration`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceEnumerator: Send + Sync {
    /// Lists cluster nodes in API order.
    async fn list_nodes(&self) -> ProxmoxResult<Vec<NodeListItem>>;

    /// Lists the QEMU guests of one node in API order.
    async fn list_vms(&self, node: &str) -> ProxmoxResult<Vec<VmListItem>>;

    /// Lists the interfaces the guest agent of one VM reports.
    async fn list_interfaces(&self, node: &str, vmid: u32)
    -> ProxmoxResult<Vec<NetworkInterface>>;
}

#[async_trait]
impl ResourceEnumerator for ApiClient {
    async fn list_nodes(&self) -> ProxmoxResult<Vec<NodeListItem>> {
        let nodes = self
            .get::<ApiResponse<Vec<NodeListItem>>>("nodes")
            .await
            .map_err(|e| ProxmoxError::enumeration("nodes", e))?
            .into_data();
        debug!(count = nodes.len(), "Listed nodes");
        Ok(nodes)
    }

    async fn list_vms(&self, node: &str) -> ProxmoxResult<Vec<VmListItem>> {
        let vms = self
            .get::<ApiResponse<Vec<VmListItem>>>(&format!("nodes/{}/qemu", node))
            .await
            .map_err(|e| ProxmoxError::enumeration(format!("VMs on node '{}'", node), e))?
            .into_data();
        debug!(node, count = vms.len(), "Listed VMs");
        Ok(vms)
    }

    async fn list_interfaces(
        &self,
        node: &str,
        vmid: u32,
    ) -> ProxmoxResult<Vec<NetworkInterface>> {
        let path = format!("nodes/{}/qemu/{}/agent/network-get-interfaces", node, vmid);
        let interfaces = self
            .get::<ApiResponse<AgentResult<Vec<NetworkInterface>>>>(&path)
            .await
            .map_err(|e| {
                ProxmoxError::enumeration(
                    format!("network interfaces of VM {} on node '{}'", vmid, node),
                    e,
                )
            })?
            .into_agent_result();
        debug!(node, vmid, count = interfaces.len(), "Listed guest interfaces");
        Ok(interfaces)
    }
}
