//! GraphQL response envelope and error types.
//!
//! Per the GraphQL spec (June 2018, §7.1), a response carries `data` and an
//! `errors` list. Both are returned to the caller: errors in a well-formed
//! response are data to inspect, not transport faults.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// A decoded GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    /// The requested data, if the server produced any.
    pub data: Option<T>,
    /// Errors raised while executing the operation.
    #[serde(default = "Vec::new")]
    pub errors: Vec<GraphQlError>,
}

impl<T> Response<T> {
    /// Convert into the data, treating any reported error as a failure.
    ///
    /// # Errors
    ///
    /// Returns the first reported [`GraphQlError`], or a synthetic one when
    /// the response carries neither data nor errors.
    pub fn into_result(self) -> Result<T, GraphQlError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        self.data.ok_or_else(|| GraphQlError {
            message: "no data in response".to_string(),
            path: Vec::new(),
            locations: Vec::new(),
            extensions: HashMap::new(),
        })
    }
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, Deserialize, Error)]
#[error("{message}")]
pub struct GraphQlError {
    /// Human-readable description of the error.
    #[serde(default)]
    pub message: String,
    /// Path to the response field the error is associated with. Uses
    /// aliased names, since it addresses the response rather than the query.
    #[serde(default)]
    pub path: Vec<PathSegment>,
    /// Positions in the request document, 1-indexed.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Implementation-specific extra information.
    #[serde(default)]
    pub extensions: HashMap<String, serde_json::Value>,
}

/// One step of an error path: a field name or a 0-indexed list position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A response field.
    Field(String),
    /// An index into a list value.
    Index(u64),
}

/// A line/column position in the request document, both starting from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Location {
    /// Line number.
    #[serde(default)]
    pub line: u32,
    /// Column number.
    #[serde(default)]
    pub column: u32,
}
