//! Client options and per-provider credentials.
//!
//! Options are validated eagerly, before any network call. The credential
//! is an enum over the supported Realm auth providers, so a credential that
//! does not fit its provider cannot be constructed in the first place.
//!
//! # Environment Variables
//!
//! [`ClientOptions::from_env`] reads:
//!
//! - `REALM_APP_ID` - Realm application id (required)
//! - `REALM_AUTH_PROVIDER` - `anon-user` (default), `local-userpass`, `key`,
//!   `oauth2-google`, or `custom-token`
//! - `REALM_USERNAME` / `REALM_PASSWORD` - for `local-userpass`
//! - `REALM_API_KEY` - for `key` and `oauth2-google`
//! - `REALM_TOKEN` - for `custom-token`
//! - `REALM_TIMEOUT_SECS` - optional per-request HTTP timeout

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use thiserror::Error;

/// Errors detected while building or validating client options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The Realm application id is absent or empty.
    #[error("app id is required, but missing")]
    MissingAppId,
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable could not be parsed.
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    /// The configured auth provider name is not supported.
    #[error("auth provider is not supported: {0}")]
    UnsupportedProvider(String),
}

/// Credentials for one of the Realm auth providers.
///
/// Secret material is held in [`SecretString`] and redacted from `Debug`
/// output.
#[derive(Debug, Clone)]
pub enum Credential {
    /// `anon-user`: no credentials.
    Anonymous,
    /// `local-userpass`: email/password login.
    EmailPassword {
        /// Account email address.
        username: String,
        /// Account password.
        password: SecretString,
    },
    /// `key`: server or user API key.
    ApiKey {
        /// The API key.
        key: SecretString,
    },
    /// `oauth2-google`: a Google OAuth authorization key.
    GoogleOAuth {
        /// The authorization key obtained from Google.
        key: SecretString,
    },
    /// `custom-token`: a caller-supplied signed JWT.
    CustomToken {
        /// The signed token.
        token: SecretString,
    },
}

impl Credential {
    /// The provider path segment used in the login URL.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Anonymous => "anon-user",
            Self::EmailPassword { .. } => "local-userpass",
            Self::ApiKey { .. } => "key",
            Self::GoogleOAuth { .. } => "oauth2-google",
            Self::CustomToken { .. } => "custom-token",
        }
    }

    /// The JSON body posted to the provider's login endpoint.
    pub(crate) fn login_payload(&self) -> serde_json::Value {
        match self {
            Self::Anonymous => json!({}),
            Self::EmailPassword { username, password } => json!({
                "username": username,
                "password": password.expose_secret(),
            }),
            Self::ApiKey { key } | Self::GoogleOAuth { key } => json!({
                "key": key.expose_secret(),
            }),
            Self::CustomToken { token } => json!({
                "token": token.expose_secret(),
            }),
        }
    }
}

/// Options for connecting to a Realm application.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The Realm application id, e.g. `myapp-abcde`.
    pub app_id: String,
    /// Credentials for the selected auth provider.
    pub credential: Credential,
    /// Per-request HTTP timeout. Applies to the HTTP call only; document
    /// synthesis is not governed by it.
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    /// Options for the given app and credential, with no request timeout.
    pub fn new(app_id: impl Into<String>, credential: Credential) -> Self {
        Self {
            app_id: app_id.into(),
            credential,
            timeout: None,
        }
    }

    /// Set the per-request HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the options. Returns the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAppId`] if the app id is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::MissingAppId);
        }
        Ok(())
    }

    /// Load options from the environment.
    ///
    /// Calls `dotenvy::dotenv()` to load a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `REALM_APP_ID` is missing, the provider is
    /// unknown, the provider's credential variables are absent, or
    /// `REALM_TIMEOUT_SECS` fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let app_id = required_env("REALM_APP_ID")?;
        let provider = std::env::var("REALM_AUTH_PROVIDER")
            .unwrap_or_else(|_| "anon-user".to_string());

        let credential = match provider.as_str() {
            "anon-user" => Credential::Anonymous,
            "local-userpass" => Credential::EmailPassword {
                username: required_env("REALM_USERNAME")?,
                password: required_secret("REALM_PASSWORD")?,
            },
            "key" => Credential::ApiKey {
                key: required_secret("REALM_API_KEY")?,
            },
            "oauth2-google" => Credential::GoogleOAuth {
                key: required_secret("REALM_API_KEY")?,
            },
            "custom-token" => Credential::CustomToken {
                token: required_secret("REALM_TOKEN")?,
            },
            other => return Err(ConfigError::UnsupportedProvider(other.to_string())),
        };

        let timeout = match std::env::var("REALM_TIMEOUT_SECS") {
            Ok(value) => Some(Duration::from_secs(value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("REALM_TIMEOUT_SECS".to_string(), e.to_string())
            })?)),
            Err(_) => None,
        };

        let options = Self {
            app_id,
            credential,
            timeout,
        };
        options.validate()?;
        Ok(options)
    }
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn required_secret(key: &str) -> Result<SecretString, ConfigError> {
    required_env(key).map(SecretString::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_paths() {
        assert_eq!(Credential::Anonymous.provider(), "anon-user");
        let userpass = Credential::EmailPassword {
            username: "user@example.com".to_string(),
            password: SecretString::from("hunter2"),
        };
        assert_eq!(userpass.provider(), "local-userpass");
        let key = Credential::ApiKey {
            key: SecretString::from("k"),
        };
        assert_eq!(key.provider(), "key");
        let google = Credential::GoogleOAuth {
            key: SecretString::from("g"),
        };
        assert_eq!(google.provider(), "oauth2-google");
        let token = Credential::CustomToken {
            token: SecretString::from("t"),
        };
        assert_eq!(token.provider(), "custom-token");
    }

    #[test]
    fn test_login_payloads() {
        assert_eq!(Credential::Anonymous.login_payload(), json!({}));

        let userpass = Credential::EmailPassword {
            username: "user@example.com".to_string(),
            password: SecretString::from("hunter2"),
        };
        assert_eq!(
            userpass.login_payload(),
            json!({"username": "user@example.com", "password": "hunter2"})
        );

        let key = Credential::ApiKey {
            key: SecretString::from("api-key-value"),
        };
        assert_eq!(key.login_payload(), json!({"key": "api-key-value"}));

        let token = Credential::CustomToken {
            token: SecretString::from("jwt"),
        };
        assert_eq!(token.login_payload(), json!({"token": "jwt"}));
    }

    #[test]
    fn test_validate_rejects_empty_app_id() {
        let options = ClientOptions::new("", Credential::Anonymous);
        assert!(matches!(
            options.validate(),
            Err(ConfigError::MissingAppId)
        ));

        let options = ClientOptions::new("   ", Credential::Anonymous);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_app_id() {
        let options = ClientOptions::new("myapp-abcde", Credential::Anonymous);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let options = ClientOptions::new(
            "myapp-abcde",
            Credential::EmailPassword {
                username: "user@example.com".to_string(),
                password: SecretString::from("super-secret-password"),
            },
        );
        let debug = format!("{options:?}");
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("super-secret-password"));
    }
}
