use crate::{
    ProxmoxConnection, ProxmoxError, ProxmoxResult, ProxmoxSession, ProxmoxTicket,
    ValidationError,
    auth::application::{
        request::login_request::LoginRequest, response::login_response::LoginResponse,
    },
};

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::debug;

pub struct LoginService {
    default_headers: HeaderMap,
}

impl LoginService {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self { default_headers }
    }

    /// Requests a ticket using the connection's credentials.
    ///
    /// `http_client` must be the client built for this connection so the
    /// login obeys the same TLS policy as every later request.
    pub async fn execute(
        &self,
        http_client: &Client,
        connection: &ProxmoxConnection,
    ) -> ProxmoxResult<ProxmoxSession> {
        let url = connection.proxmox_url().api_url("access/ticket");
        let request = self.build_login_request(connection);
        debug!(%url, user = %request.username, "Requesting ticket");
        let response = self.send_request(http_client, &url, &request).await?;

        match response.status() {
            StatusCode::OK => self.handle_successful_login(connection, response).await,
            StatusCode::UNAUTHORIZED => Err(ProxmoxError::Authentication(
                "Invalid credentials provided".to_string(),
            )),
            StatusCode::BAD_REQUEST => Err(ProxmoxError::Validation(ValidationError::Field {
                field: "request".to_string(),
                message: "Invalid request format".to_string(),
            })),
            StatusCode::NOT_FOUND => Err(ProxmoxError::Connection(
                "Login endpoint not found".to_string(),
            )),
            StatusCode::SERVICE_UNAVAILABLE => Err(ProxmoxError::Connection(
                "Proxmox service is currently unavailable".to_string(),
            )),
            status => Err(ProxmoxError::Connection(format!(
                "Unexpected response status: {}",
                status
            ))),
        }
    }

    fn build_login_request(&self, connection: &ProxmoxConnection) -> LoginRequest {
        LoginRequest {
            username: connection.proxmox_username().as_str().to_string(),
            password: connection.proxmox_password().as_str().to_string(),
        }
    }

    async fn send_request(
        &self,
        client: &Client,
        url: &str,
        request: &LoginRequest,
    ) -> ProxmoxResult<reqwest::Response> {
        client
            .post(url)
            .headers(self.default_headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(e.to_string()))
    }

    async fn handle_successful_login(
        &self,
        connection: &ProxmoxConnection,
        response: reqwest::Response,
    ) -> ProxmoxResult<ProxmoxSession> {
        let login_response = response.json::<LoginResponse>().await.map_err(|e| {
            ProxmoxError::Connection(format!("Failed to parse login response: {}", e))
        })?;

        // Some PVE versions answer a failed login with 200 and `"data": null`.
        let data = login_response.data.ok_or_else(|| {
            ProxmoxError::Authentication("Login rejected by server".to_string())
        })?;

        let ticket = ProxmoxTicket::new(data.ticket).map_err(|e| {
            ProxmoxError::Authentication(format!("Server returned an unusable ticket: {}", e))
        })?;

        Ok(ProxmoxSession::new(
            connection.proxmox_url().clone(),
            ticket,
            data.cluster_name,
        ))
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}
