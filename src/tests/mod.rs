//! HTTP-level tests against `wiremock` servers, plus shared fixtures.


use crate::{
    ProxmoxClient, ProxmoxConnection, ProxmoxPassword, ProxmoxSession, ProxmoxTicket, ProxmoxUrl,
    ProxmoxUsername, core::infrastructure::api_client::ApiClient,
};
use wiremock::MockServer;

pub(crate) const TEST_TICKET: &str = "PVE:testuser@pam:4EEC61E2::sig";

pub(crate) fn create_test_connection(server_url: &str) -> ProxmoxConnection {
    ProxmoxConnection::with_url(
        ProxmoxUrl::new_unchecked(&format!("{}/", server_url)),
        ProxmoxUsername::new_unchecked("testuser@pam".to_string()),
        ProxmoxPassword::new_unchecked("testpass".to_string()),
    )
}

pub(crate) fn create_test_session(server_url: &str) -> ProxmoxSession {
    ProxmoxSession::new(
        ProxmoxUrl::new_unchecked(&format!("{}/", server_url)),
        ProxmoxTicket::new_unchecked(TEST_TICKET.to_string()),
        None,
    )
}

pub(crate) fn create_authenticated_client(mock_server: &MockServer) -> ProxmoxClient {
    let mut api_client = ApiClient::new(create_test_connection(&mock_server.uri()), None).unwrap();
    api_client.set_session(create_test_session(&mock_server.uri()));
    ProxmoxClient { api_client }
}
