//! GraphQL client for a Realm application.
//!
//! One POST per operation against the app's generated GraphQL endpoint,
//! authenticated with the bearer token held by [`AuthClient`]. Queries are
//! synthesized from a [`Shape`] and [`Variables`]; mutations are pre-formed
//! document strings passed through unchanged.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::{AuthClient, BASE_URL};
use crate::error::Error;
use crate::options::ClientOptions;
use crate::query::shape::{Field, Shape};
use crate::query::synthesize;
use crate::query::variables::Variables;
use crate::response::Response;

/// The request envelope posted to the GraphQL endpoint.
///
/// `operationName` is always present and always null: documents are
/// anonymous, minified operations.
#[derive(Debug, Serialize)]
struct Request<'a> {
    query: &'a str,
    variables: Value,
    #[serde(rename = "operationName")]
    operation_name: Option<&'a str>,
}

/// Result of the well-known `health` query.
///
/// The target app must expose a matching custom resolver; see
/// [`Client::health`].
#[derive(Debug, Clone, serde::Deserialize)]
pub struct HealthCheck {
    /// Document id of the health record.
    #[serde(rename = "_id")]
    pub id: String,
    /// Reported status, e.g. `complete`.
    pub status: String,
    /// Free-form description of the deployment.
    #[serde(default)]
    pub description: String,
    /// The endpoint the record describes.
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, serde::Deserialize)]
struct HealthData {
    health: HealthCheck,
}

/// A Realm GraphQL client bound to one application.
///
/// Cheap to clone; clones share the HTTP connection pool and token state.
#[derive(Clone)]
pub struct Client {
    auth: AuthClient,
    endpoint: String,
}

impl Client {
    /// Create a client for the given options.
    ///
    /// Options are validated here, before any network traffic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid options.
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        let auth = AuthClient::new(options)?;
        let endpoint = format!("{BASE_URL}/app/{}/graphql", auth.app_id());
        Ok(Self { auth, endpoint })
    }

    /// The auth client backing this connection, for token inspection or
    /// manual refresh.
    #[must_use]
    pub const fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Authenticate with the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the provider rejects the credentials,
    /// [`Error::Http`] on transport failure, and [`Error::Decode`] for a
    /// malformed token payload.
    pub async fn connect(&self) -> Result<(), Error> {
        self.auth.connect().await
    }

    /// Call the app's `ping` webhook to verify it is reachable.
    ///
    /// Works before [`connect`](Self::connect); see [`AuthClient::ping`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Status`] on a non-200 response and [`Error::Http`]
    /// on transport failure.
    pub async fn ping(&self) -> Result<(), Error> {
        self.auth.ping().await
    }

    /// Synthesize and execute a query.
    ///
    /// GraphQL-level errors do not fail the call; they are returned on the
    /// [`Response`] for the caller to inspect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before [`connect`](Self::connect),
    /// [`Error::Http`]/[`Error::Status`] for transport failures, and
    /// [`Error::Decode`] for a malformed response body.
    #[instrument(skip(self, shape, variables))]
    pub async fn query<T: DeserializeOwned>(
        &self,
        shape: &Shape,
        variables: &Variables,
    ) -> Result<Response<T>, Error> {
        let document = synthesize(shape, variables);
        self.execute(&document, variables).await
    }

    /// Execute a pre-formed mutation document.
    ///
    /// Mutations are not synthesized; supply the full document, including
    /// any argument declarations:
    ///
    /// ```rust,ignore
    /// let variables = Variables::new().with("name", "casa bonita")?;
    /// let response: Response<serde_json::Value> = client
    ///     .mutate(
    ///         "mutation($name:ID!){insertOneListing(data:{name:$name}){_id}}",
    ///         &variables,
    ///     )
    ///     .await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    #[instrument(skip(self, mutation, variables))]
    pub async fn mutate<T: DeserializeOwned>(
        &self,
        mutation: &str,
        variables: &Variables,
    ) -> Result<Response<T>, Error> {
        self.execute(mutation, variables).await
    }

    /// Run the well-known health-check query.
    ///
    /// The app's GraphQL schema must expose a `health` document with `_id`,
    /// `status`, `description`, and `endpoint` fields; this is a
    /// configuration-verification convention, not a platform builtin.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub async fn health(&self) -> Result<Response<HealthCheck>, Error> {
        let response: Response<HealthData> =
            self.query(&health_shape(), &Variables::new()).await?;
        Ok(Response {
            data: response.data.map(|d| d.health),
            errors: response.errors,
        })
    }

    /// Execute a single GraphQL operation.
    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: &Variables,
    ) -> Result<Response<T>, Error> {
        let access_token = self.auth.access_token().await?;
        debug!(document = %document, "executing GraphQL operation");

        let request = Request {
            query: document,
            variables: variables.to_json(),
            operation_name: None,
        };

        let response = self
            .auth
            .http()
            .post(&self.endpoint)
            .bearer_auth(access_token)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Selection shape of the health-check query.
fn health_shape() -> Shape {
    Shape::object([Field::auto(
        "Health",
        Shape::object([
            Field::named("_id", Shape::Scalar),
            Field::named("status", Shape::Scalar),
            Field::named("description", Shape::Scalar),
            Field::named("endpoint", Shape::Scalar),
        ]),
    )])
}
