//! Guest-agent network data from
//! `/nodes/{node}/qemu/{vmid}/agent/network-get-interfaces`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hardware address the guest agent reports for the loopback device.
pub const LOOPBACK_MAC: &str = "00:00:00:00:00:00";

/// Family tag the guest agent uses for IPv4 addresses.
pub const IPV4: &str = "ipv4";

/// Family tag the guest agent uses for IPv6 addresses.
pub const IPV6: &str = "ipv6";

/// A network interface as seen from inside the guest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkInterface {
    /// Interface name inside the guest (e.g., "eth0", "lo").
    pub name: String,
    /// MAC address in colon-hex notation.
    #[serde(
        default,
        rename = "hardware-address",
        skip_serializing_if = "Option::is_none"
    )]
    pub hardware_address: Option<String>,
    /// Addresses in the order the agent reported them.
    #[serde(default, rename = "ip-addresses")]
    pub ip_addresses: Vec<IpAddress>,
    /// Traffic counters (e.g., "rx-bytes", "tx-packets").
    #[serde(default)]
    pub statistics: BTreeMap<String, i64>,
}

impl NetworkInterface {
    /// True for the guest's loopback device.
    pub fn is_loopback(&self) -> bool {
        self.hardware_address.as_deref() == Some(LOOPBACK_MAC)
    }

    /// First address tagged with `family`, in reported order.
    ///
    /// `family` is compared verbatim against the agent's tag.
    pub fn first_address_of(&self, family: &str) -> Option<&IpAddress> {
        self.ip_addresses
            .iter()
            .find(|address| address.address_type == family)
    }
}

/// An address bound to a guest interface.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IpAddress {
    /// The address itself, without prefix.
    #[serde(rename = "ip-address")]
    pub address: String,
    /// Family tag as reported upstream (e.g., "ipv4", "ipv6").
    #[serde(rename = "ip-address-type")]
    pub address_type: String,
    /// Prefix length.
    #[serde(default)]
    pub prefix: u8,
}
