//! HTTP client for the dashboard REST API.
//!
//! One operation per backend resource, returning the resource's record
//! collection (or the updated record for mutations). Every request attaches
//! the current bearer credential from the [`SessionStore`] when one exists;
//! without a session the request goes out unauthenticated and the backend
//! decides whether to reject it.
//!
//! No operation retries. A failed call surfaces its error to the caller,
//! typically the poller, which logs it and leaves the previous view state
//! in place.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sonda_core::{ApiClient, SessionStore};
//! use sonda_types::Source;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStore::in_memory());
//! let client = ApiClient::new("http://localhost:5000/api", session)?;
//!
//! let leds = client.list_leds().await?;
//! if let Some(led) = leds.first() {
//!     client.set_led(led.id, !led.on, "ana", Source::Web).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sonda_types::{
    ButtonHistoryEntry, ButtonState, Event, LedHistoryEntry, LedState, SensorReading, Source,
    Statistics, User,
};

use crate::error::{Error, Result};
use crate::session::SessionStore;

/// Request timeout for every API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the dashboard REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

// ==========================================================================
// Response Types
// ==========================================================================

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token to present on subsequent requests.
    pub token: String,
    pub user: User,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Body of a LED/button state mutation.
#[derive(Debug, Serialize)]
struct SetStateBody<'a> {
    estado: bool,
    usuario: &'a str,
    fuente: Source,
}

// ==========================================================================
// ApiClient Implementation
// ==========================================================================

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL including the API prefix, e.g.
    ///   `"http://localhost:5000/api"`
    /// * `session` - Session store consulted for the bearer credential on
    ///   every request
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Request)?;
        Self::with_client(base_url, client, session)
    }

    /// Create a client with a custom reqwest `Client`.
    pub fn with_client(base_url: &str, client: Client, session: Arc<SessionStore>) -> Result<Self> {
        // Normalize URL (remove trailing slash)
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether the backend answers its health endpoint.
    pub async fn is_reachable(&self) -> bool {
        self.health().await.is_ok()
    }

    /// Get backend health.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    // ======================================================================
    // Auth
    // ======================================================================

    /// Authenticate and obtain a bearer token.
    ///
    /// The returned session is NOT stored automatically; pass it to
    /// [`SessionStore::login`] to persist it.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::NotReachable { url, source: e })?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(Error::Request)
        } else {
            Err(Error::Auth {
                status: status.as_u16(),
                message: error_message(response, "login rejected").await,
            })
        }
    }

    /// Register a new account.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let url = format!("{}/auth/register", self.base_url);
        let body =
            serde_json::json!({ "username": username, "email": email, "password": password });
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::NotReachable { url, source: e })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Auth {
                status: status.as_u16(),
                message: error_message(response, "registration rejected").await,
            })
        }
    }

    // ======================================================================
    // Sensor readings
    // ======================================================================

    /// Latest readings, newest first.
    pub async fn list_readings(&self, limit: u32) -> Result<Vec<SensorReading>> {
        self.get(&format!("/sensores?limit={}", limit)).await
    }

    /// Insert a reading. Used by ingestion tools, not by the dashboard views.
    pub async fn create_reading(&self, device_type: &str, value: f64) -> Result<SensorReading> {
        let body = serde_json::json!({ "tipo": device_type, "valor": value });
        self.post_json("/sensores", &body).await
    }

    /// Server-side summary statistics over recent readings.
    pub async fn statistics(&self) -> Result<Statistics> {
        self.get("/sensores/estadisticas").await
    }

    // ======================================================================
    // LEDs and buttons
    // ======================================================================

    pub async fn list_leds(&self) -> Result<Vec<LedState>> {
        self.get("/leds").await
    }

    /// Switch a LED and record who did it and from where.
    ///
    /// Issues exactly one PUT; the backend appends the history entry and the
    /// audit event itself. Returns the updated record.
    pub async fn set_led(
        &self,
        id: i64,
        on: bool,
        actor: &str,
        source: Source,
    ) -> Result<LedState> {
        debug!(id, on, actor, %source, "Setting LED state");
        let body = SetStateBody {
            estado: on,
            usuario: actor,
            fuente: source,
        };
        self.put_json(&format!("/leds/{}", id), &body).await
    }

    pub async fn list_buttons(&self) -> Result<Vec<ButtonState>> {
        self.get("/pulsadores").await
    }

    /// Switch a button state. Same contract as [`ApiClient::set_led`].
    pub async fn set_button(
        &self,
        id: i64,
        on: bool,
        actor: &str,
        source: Source,
    ) -> Result<ButtonState> {
        debug!(id, on, actor, %source, "Setting button state");
        let body = SetStateBody {
            estado: on,
            usuario: actor,
            fuente: source,
        };
        self.put_json(&format!("/pulsadores/{}", id), &body).await
    }

    // ======================================================================
    // Events and history
    // ======================================================================

    /// Audit-log events, newest first.
    pub async fn list_events(&self, limit: u32) -> Result<Vec<Event>> {
        self.get(&format!("/eventos?limit={}", limit)).await
    }

    /// LED change history, newest first.
    pub async fn list_led_history(&self, limit: u32) -> Result<Vec<LedHistoryEntry>> {
        self.get(&format!("/led_hist?limit={}", limit)).await
    }

    /// Button change history, newest first.
    pub async fn list_button_history(&self, limit: u32) -> Result<Vec<ButtonHistoryEntry>> {
        self.get(&format!("/pulsador_hist?limit={}", limit)).await
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    /// Attach the bearer credential when a session exists.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::NotReachable { url, source: e })?;

        handle_response(response).await
    }

    async fn post_json<T: serde::de::DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable { url, source: e })?;

        handle_response(response).await
    }

    async fn put_json<T: serde::de::DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorize(self.client.put(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable { url, source: e })?;

        handle_response(response).await
    }
}

/// Decode a 2xx body, or map an error response onto [`Error::Api`].
async fn handle_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(Error::Request)
    } else {
        Err(Error::Api {
            status: status.as_u16(),
            message: error_message(response, &status.to_string()).await,
        })
    }
}

/// Pull the backend's `{"error": "..."}` message out of a failed response.
async fn error_message(response: reqwest::Response, default: &str) -> String {
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| default.to_string())
}
