pub mod api_response;
pub mod network_interface;
pub mod node_list_item;
pub mod proxmox_connection;
pub mod proxmox_session;
pub mod vm;
