mod proxmox_host;
mod proxmox_password;
mod proxmox_port;
mod proxmox_ticket;
mod proxmox_uri;
mod proxmox_username;

pub use proxmox_host::ProxmoxHost;
pub use proxmox_password::ProxmoxPassword;
pub use proxmox_port::ProxmoxPort;
pub use proxmox_ticket::ProxmoxTicket;
pub use proxmox_uri::ProxmoxUrl;
pub use proxmox_username::ProxmoxUsername;
