//! Realm auth provider login and token state.
//!
//! Posts the credential payload to the app's provider login endpoint,
//! decodes the token payload, and keeps the bearer token available for the
//! GraphQL transport. Access tokens are refreshed against the session
//! endpoint when they expire.
//!
//! The platform documents a 30-minute access-token lifetime but does not
//! (yet) return an explicit expiry in the payload, so a missing expiry is
//! defaulted to 29 minutes from issuance. There is no disconnect/revocation
//! call; sessions simply age out upstream.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::Error;
use crate::options::ClientOptions;

/// Base URL for the hosted platform's client API.
pub(crate) const BASE_URL: &str = "https://stitch.mongodb.com/api/client/v2.0";

/// Base URL for the platform's incoming-webhook endpoints.
const WEBHOOK_BASE_URL: &str = "https://webhooks.mongodb-stitch.com/api/client/v2.0";

/// Assumed access-token lifetime when the login payload omits an expiry.
const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 29;

/// Raw login/refresh response body.
#[derive(Debug, Deserialize)]
struct TokenPayload {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expiry: Option<DateTime<Utc>>,
    // Consumed so it stays out of `extra`; the transport always sends Bearer.
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
    /// Provider-specific fields such as `user_id` and `device_id`.
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

/// An issued access token and its session metadata.
///
/// Token material is redacted from `Debug` output. Undocumented payload
/// fields (`user_id`, `device_id`, …) are kept and readable via
/// [`extra`](Self::extra).
#[derive(Debug, Clone)]
pub struct Token {
    access_token: SecretString,
    refresh_token: Option<SecretString>,
    expires_at: DateTime<Utc>,
    extra: HashMap<String, serde_json::Value>,
}

impl Token {
    /// Build a token from material obtained elsewhere, for
    /// [`AuthClient::connect_with_token`].
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            refresh_token: refresh_token.map(SecretString::from),
            expires_at,
            extra: HashMap::new(),
        }
    }

    fn from_payload(payload: TokenPayload) -> Self {
        let expires_at = payload.expiry.unwrap_or_else(|| {
            Utc::now() + Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINUTES)
        });
        Self {
            access_token: SecretString::from(payload.access_token),
            refresh_token: payload.refresh_token.map(SecretString::from),
            expires_at,
            extra: payload.extra,
        }
    }

    /// The bearer access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// When the access token stops being valid.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the access token has reached its expiry instant.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A provider-specific extra field from the login payload, such as
    /// `user_id` or `device_id`.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Authenticates against a Realm app and holds the current [`Token`].
///
/// Cheap to clone; clones share the HTTP client and token state.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    http: reqwest::Client,
    options: ClientOptions,
    token: RwLock<Option<Token>>,
}

impl AuthClient {
    /// Create an auth client for the given options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid options and [`Error::Http`] if
    /// the HTTP client cannot be constructed.
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        options.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            inner: Arc::new(AuthClientInner {
                http,
                options,
                token: RwLock::new(None),
            }),
        })
    }

    /// The underlying HTTP client, shared with the GraphQL transport.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// The app id these credentials belong to.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.inner.options.app_id
    }

    fn login_url(&self) -> String {
        format!(
            "{BASE_URL}/app/{}/auth/providers/{}/login",
            self.inner.options.app_id,
            self.inner.options.credential.provider()
        )
    }

    fn session_url() -> String {
        format!("{BASE_URL}/auth/session")
    }

    fn ping_url(&self) -> String {
        format!(
            "{WEBHOOK_BASE_URL}/app/{}/service/ping/incoming_webhook/test",
            self.inner.options.app_id
        )
    }

    /// Call the app's `ping` webhook to verify it is reachable.
    ///
    /// Assumes the app exposes an HTTP service named `ping` with an incoming
    /// webhook `test` that returns 200. No authentication is required, so
    /// this works before [`connect`](Self::connect).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Status`] on a non-200 response and [`Error::Http`]
    /// on transport failure.
    #[instrument(skip(self), fields(app_id = %self.inner.options.app_id))]
    pub async fn ping(&self) -> Result<(), Error> {
        let response = self.inner.http.get(self.ping_url()).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await?;
            return Err(Error::Status {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }
        Ok(())
    }

    /// Log in with the configured credential and store the issued token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] on a non-200 login response, [`Error::Http`]
    /// on transport failure, and [`Error::Decode`] for a malformed token
    /// payload.
    #[instrument(skip(self), fields(app_id = %self.inner.options.app_id))]
    pub async fn connect(&self) -> Result<(), Error> {
        let response = self
            .inner
            .http
            .post(self.login_url())
            .header("Content-Type", "application/json")
            .json(&self.inner.options.credential.login_payload())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != reqwest::StatusCode::OK {
            return Err(Error::Auth(format!(
                "login failed with status {status}: {}",
                snippet(&body)
            )));
        }

        let payload: TokenPayload = serde_json::from_str(&body)?;
        let token = Token::from_payload(payload);
        debug!(expires_at = %token.expires_at, "authenticated");
        *self.inner.token.write().await = Some(token);
        Ok(())
    }

    /// Adopt an existing token, user-provided or previously obtained. The
    /// token must still be valid for subsequent calls to work.
    pub async fn connect_with_token(&self, token: Token) {
        *self.inner.token.write().await = Some(token);
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before [`connect`](Self::connect),
    /// [`Error::Auth`] when no refresh token is held or the session endpoint
    /// rejects it, and [`Error::Decode`] for a malformed payload.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), Error> {
        let refresh_token = {
            let guard = self.inner.token.read().await;
            let token = guard.as_ref().ok_or(Error::NotConnected)?;
            token
                .refresh_token
                .as_ref()
                .ok_or_else(|| Error::Auth("no refresh token in session".to_string()))?
                .expose_secret()
                .to_string()
        };

        let response = self
            .inner
            .http
            .post(Self::session_url())
            .bearer_auth(refresh_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != reqwest::StatusCode::OK {
            return Err(Error::Auth(format!(
                "token refresh failed with status {status}: {}",
                snippet(&body)
            )));
        }

        let payload: TokenPayload = serde_json::from_str(&body)?;
        let mut guard = self.inner.token.write().await;
        if let Some(token) = guard.as_mut() {
            token.access_token = SecretString::from(payload.access_token);
            token.expires_at = payload.expiry.unwrap_or_else(|| {
                Utc::now() + Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINUTES)
            });
            debug!(expires_at = %token.expires_at, "access token refreshed");
        }
        Ok(())
    }

    /// A copy of the current token, if connected.
    pub async fn token(&self) -> Option<Token> {
        self.inner.token.read().await.clone()
    }

    /// The current access token, refreshing it first if it has expired.
    ///
    /// An expired token with no refresh token to renew it fails here rather
    /// than letting the server reject the stale bearer.
    pub(crate) async fn access_token(&self) -> Result<String, Error> {
        {
            let guard = self.inner.token.read().await;
            let token = guard.as_ref().ok_or(Error::NotConnected)?;
            if !token.is_expired() {
                return Ok(token.access_token.expose_secret().to_string());
            }
            if token.refresh_token.is_none() {
                return Err(Error::Auth(
                    "access token expired and no refresh token in session".to_string(),
                ));
            }
        }

        self.refresh().await?;

        let guard = self.inner.token.read().await;
        let token = guard.as_ref().ok_or(Error::NotConnected)?;
        Ok(token.access_token.expose_secret().to_string())
    }
}

/// Truncate a response body for error messages and logs.
fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
