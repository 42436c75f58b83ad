//! Envelopes wrapped around every Proxmox API payload.

use serde::Deserialize;

/// The `{"data": ...}` envelope of every JSON API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// The `{"result": ...}` wrapper the guest agent endpoints add inside `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentResult<T> {
    pub result: T,
}

impl<T> ApiResponse<AgentResult<T>> {
    /// Unwraps both layers of a guest agent response.
    pub fn into_agent_result(self) -> T {
        self.data.result
    }
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}
