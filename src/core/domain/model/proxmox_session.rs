use crate::core::domain::value_object::{ProxmoxTicket, ProxmoxUrl};

/// An authenticated session: the server base URL plus the ticket issued
/// for it.
///
/// Created once after login and never refreshed.
#[derive(Debug, Clone)]
pub struct ProxmoxSession {
    url: ProxmoxUrl,
    ticket: ProxmoxTicket,
    cluster_name: Option<String>,
}

impl ProxmoxSession {
    pub fn new(url: ProxmoxUrl, ticket: ProxmoxTicket, cluster_name: Option<String>) -> Self {
        Self {
            url,
            ticket,
            cluster_name,
        }
    }

    pub fn url(&self) -> &ProxmoxUrl {
        &self.url
    }

    pub fn ticket(&self) -> &ProxmoxTicket {
        &self.ticket
    }

    /// Cluster name reported at login, absent on standalone nodes.
    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster_name.as_deref()
    }
}
