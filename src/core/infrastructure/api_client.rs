//! Internal HTTP client that carries the session ticket on every request.

use crate::{
    ProxmoxConnection, ProxmoxError, ProxmoxResult, ProxmoxSession, RateLimitConfig,
    auth::application::service::login_service::LoginService,
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, StatusCode, header::COOKIE};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Internal HTTP client that manages the session and calls the Proxmox API.
///
/// The underlying `reqwest::Client` is built from the connection's TLS policy
/// and is shared by the login call and every later GET, so skipping
/// certificate checks never leaks into other clients in the process.
///
/// The ticket is obtained once; a `401 Unauthorized` afterwards is reported
/// as an authentication error instead of triggering a new login.
pub struct ApiClient {
    http_client: Client,
    connection: Arc<ProxmoxConnection>,
    session: Option<ProxmoxSession>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("connection", &self.connection)
            .field("authenticated", &self.session.is_some())
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Creates a new `ApiClient`. The client starts unauthenticated.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` if the HTTP client cannot be built.
    pub fn new(
        connection: ProxmoxConnection,
        rate_limit: Option<RateLimitConfig>,
    ) -> ProxmoxResult<Self> {
        // Off by default for self-signed PVE hosts; not a warning.
        if connection.accepts_invalid_certs() {
            debug!(
                url = connection.proxmox_url().as_str(),
                "TLS certificate verification is disabled for this server"
            );
        }

        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accepts_invalid_certs())
            .timeout(connection.timeout())
            .build()
            .map_err(|e| ProxmoxError::Connection(e.to_string()))?;

        let rate_limiter = rate_limit.map(|rl| {
            let quota = Quota::per_second(rl.requests_per_second).allow_burst(rl.burst_size);
            Arc::new(DefaultDirectRateLimiter::direct(quota))
        });

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            session: None,
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    #[cfg(test)]
    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    /// Exchanges the connection's credentials for a session ticket.
    pub async fn login(&mut self) -> ProxmoxResult<()> {
        self.throttle().await;
        let session = LoginService::new()
            .execute(&self.http_client, &self.connection)
            .await?;
        info!(
            user = self.connection.proxmox_username().as_str(),
            cluster = session.cluster_name().unwrap_or("-"),
            "Authenticated"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Installs an already-obtained session.
    #[cfg(test)]
    pub fn set_session(&mut self, session: ProxmoxSession) {
        self.session = Some(session);
    }

    /// Returns the current session, if any.
    pub fn session(&self) -> Option<&ProxmoxSession> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Performs an authenticated GET request against `api2/json/{path}`.
    ///
    /// # Type Parameters
    /// - `T`: The expected response type (must implement `DeserializeOwned`).
    ///
    /// # Errors
    /// Returns `ProxmoxError::Authentication` when there is no session or the
    /// ticket is rejected, `ProxmoxError::Api` for other non-success statuses,
    /// and `ProxmoxError::Connection` for transport or parse failures.
    pub async fn get<T>(&self, path: &str) -> ProxmoxResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let session = self.session.as_ref().ok_or_else(|| {
            ProxmoxError::Authentication("Not authenticated, call login first".to_string())
        })?;

        self.throttle().await;

        let url = session.url().api_url(path);
        debug!(%url, "GET");

        let response = self
            .http_client
            .get(&url)
            .header(COOKIE, session.ticket().as_cookie_header())
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProxmoxError::Authentication(
                "Ticket rejected by server (expired or revoked)".to_string(),
            ));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(ProxmoxError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("Failed to parse response: {}", e)))
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }
    }
}
