//! Client for the MongoDB Realm GraphQL API.
//!
//! Connects to a Realm application, authenticates against one of its auth
//! providers, and executes GraphQL operations against the app's generated
//! endpoint. Queries are synthesized from a declarative [`Shape`] describing
//! the fields to select, plus a [`Variables`] map; mutations are passed
//! through as pre-formed document strings.
//!
//! # Architecture
//!
//! - [`query`] - Minified query-document synthesis (field naming, variable
//!   typing, selection rendering). Pure and stateless.
//! - [`options`] - Client options and per-provider credentials, validated
//!   before any network call.
//! - [`auth`] - Provider login, token refresh, and bearer-token state.
//! - [`client`] - The HTTP transport: one POST per query/mutation, JSON
//!   request envelope, decoded [`Response`].
//!
//! # Example
//!
//! ```rust,ignore
//! use realm_graphql::{Client, ClientOptions, Credential, Shape, Field, Variables};
//!
//! let options = ClientOptions::new("my-realm-app-id", Credential::Anonymous);
//! let client = Client::new(options)?;
//! client.connect().await?;
//!
//! let shape = Shape::object([Field::named(
//!     "listingsAndReviews(limit: $limit)",
//!     Shape::object([
//!         Field::named("_id", Shape::Scalar),
//!         Field::auto("Name", Shape::Scalar),
//!     ]),
//! )]);
//! let mut variables = Variables::new();
//! variables.insert("limit", 3_i64)?;
//!
//! let response: realm_graphql::Response<serde_json::Value> =
//!     client.query(&shape, &variables).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod client;
pub mod error;
pub mod options;
pub mod query;
pub mod response;

pub use auth::{AuthClient, Token};
pub use client::{Client, HealthCheck};
pub use error::Error;
pub use options::{ClientOptions, ConfigError, Credential};
pub use query::shape::{Field, Shape};
pub use query::synthesize;
pub use query::variables::{GraphQlType, Variables};
pub use response::{GraphQlError, Location, PathSegment, Response};
