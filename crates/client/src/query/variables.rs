//! Query variables and GraphQL type-name inference.
//!
//! A [`Variables`] set maps variable names to JSON payloads plus the GraphQL
//! type each was declared with. Types are inferred at compile time through
//! the [`GraphQlType`] trait, which mirrors the value's Rust shape:
//! optionals drop the `!`, lists wrap the element type, and native strings
//! are declared as the platform's `ID` scalar.
//!
//! Keys are held in lexicographic order so that equal variable sets always
//! produce byte-identical documents.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Error;

/// Maps a Rust type to its GraphQL type name, e.g. `Int!` or `[ID!]`.
///
/// `required` appends the trailing `!`; an `Option` forces it off for its
/// inner type. Implement this alongside `Serialize` to pass a custom scalar
/// as a variable:
///
/// ```rust
/// use realm_graphql::GraphQlType;
///
/// #[derive(serde::Serialize)]
/// struct ObjectId(String);
///
/// impl GraphQlType for ObjectId {
///     fn graphql_type(required: bool) -> String {
///         let mut name = String::from("ObjectId");
///         if required {
///             name.push('!');
///         }
///         name
///     }
/// }
///
/// assert_eq!(ObjectId::graphql_type(true), "ObjectId!");
/// assert_eq!(Option::<ObjectId>::graphql_type(true), "ObjectId");
/// ```
pub trait GraphQlType {
    /// The GraphQL type name for this Rust type.
    fn graphql_type(required: bool) -> String;
}

macro_rules! scalar_type {
    ($name:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl GraphQlType for $ty {
                fn graphql_type(required: bool) -> String {
                    let mut name = String::from($name);
                    if required {
                        name.push('!');
                    }
                    name
                }
            }
        )+
    };
}

scalar_type!("Int" => i8, i16, i32, i64, u8, u16, u32, u64);
scalar_type!("Float" => f32, f64);
scalar_type!("Boolean" => bool);
// Native strings are declared as the platform's ID scalar.
scalar_type!("ID" => String, &str);

impl<T: GraphQlType> GraphQlType for Option<T> {
    fn graphql_type(_required: bool) -> String {
        // An optional is never required; nested optionals recurse fully.
        T::graphql_type(false)
    }
}

impl<T: GraphQlType> GraphQlType for Vec<T> {
    fn graphql_type(required: bool) -> String {
        list_type::<T>(required)
    }
}

impl<T: GraphQlType> GraphQlType for &[T] {
    fn graphql_type(required: bool) -> String {
        list_type::<T>(required)
    }
}

/// `[Element]` with the element rendered as a required type. Whether the
/// element keeps its `!` is decided by the element type itself (an `Option`
/// element strips it); the list position always asks for required.
fn list_type<T: GraphQlType>(required: bool) -> String {
    let mut name = String::from("[");
    name.push_str(&T::graphql_type(true));
    name.push(']');
    if required {
        name.push('!');
    }
    name
}

/// One declared variable: its inferred GraphQL type and JSON payload.
#[derive(Debug, Clone, PartialEq)]
struct Variable {
    gql_type: String,
    value: serde_json::Value,
}

/// A set of named query variables, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    entries: BTreeMap<String, Variable>,
}

impl Variables {
    /// An empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of variables in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Declare a variable, inferring its GraphQL type from `T`.
    ///
    /// Re-inserting a name replaces the previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the value cannot be serialized to JSON.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: T) -> Result<(), Error>
    where
        T: GraphQlType + Serialize,
    {
        let value = serde_json::to_value(value)?;
        self.entries.insert(
            name.into(),
            Variable {
                gql_type: T::graphql_type(true),
                value,
            },
        );
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the value cannot be serialized to JSON.
    pub fn with<T>(mut self, name: impl Into<String>, value: T) -> Result<Self, Error>
    where
        T: GraphQlType + Serialize,
    {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Append the minified argument-declaration list, `$name:Type` per
    /// entry in name order. Commas are insignificant in GraphQL and are
    /// omitted to keep the document small.
    pub(crate) fn write_declarations(&self, out: &mut String) {
        for (name, variable) in &self.entries {
            out.push('$');
            out.push_str(name);
            out.push(':');
            out.push_str(&variable.gql_type);
        }
    }

    /// The variables as a JSON object for the request envelope, or `Null`
    /// when the set is empty.
    pub(crate) fn to_json(&self) -> serde_json::Value {
        if self.entries.is_empty() {
            return serde_json::Value::Null;
        }
        self.entries
            .iter()
            .map(|(name, variable)| (name.clone(), variable.value.clone()))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn declarations(variables: &Variables) -> String {
        let mut out = String::new();
        variables.write_declarations(&mut out);
        out
    }

    #[test]
    fn test_scalar_types() {
        assert_eq!(i64::graphql_type(true), "Int!");
        assert_eq!(i32::graphql_type(true), "Int!");
        assert_eq!(f64::graphql_type(true), "Float!");
        assert_eq!(bool::graphql_type(true), "Boolean!");
        assert_eq!(String::graphql_type(true), "ID!");
        assert_eq!(<&str>::graphql_type(true), "ID!");
    }

    #[test]
    fn test_optional_drops_required() {
        assert_eq!(Option::<i64>::graphql_type(true), "Int");
        assert_eq!(Option::<String>::graphql_type(true), "ID");
        // Nested optionals collapse to a single optional type.
        assert_eq!(Option::<Option<i64>>::graphql_type(true), "Int");
    }

    #[test]
    fn test_list_types() {
        assert_eq!(Vec::<i64>::graphql_type(true), "[Int!]!");
        assert_eq!(Option::<Vec<i64>>::graphql_type(true), "[Int!]");
        assert_eq!(Vec::<Option<i64>>::graphql_type(true), "[Int]!");
        assert_eq!(Vec::<String>::graphql_type(true), "[ID!]!");
        assert_eq!(Vec::<Vec<bool>>::graphql_type(true), "[[Boolean!]!]!");
        assert_eq!(<&[i64]>::graphql_type(true), "[Int!]!");
    }

    #[test]
    fn test_custom_scalar() {
        #[derive(serde::Serialize)]
        struct DateTime(String);

        impl GraphQlType for DateTime {
            fn graphql_type(required: bool) -> String {
                let mut name = String::from("DateTime");
                if required {
                    name.push('!');
                }
                name
            }
        }

        assert_eq!(DateTime::graphql_type(true), "DateTime!");
        assert_eq!(Option::<DateTime>::graphql_type(true), "DateTime");

        let mut variables = Variables::new();
        variables
            .insert("after", DateTime("2020-01-01T00:00:00Z".into()))
            .unwrap();
        assert_eq!(declarations(&variables), "$after:DateTime!");
    }

    #[test]
    fn test_declarations_are_sorted_and_unseparated() {
        let mut variables = Variables::new();
        variables.insert("limit", 3_i64).unwrap();
        variables.insert("active", None::<bool>).unwrap();
        variables.insert("name", "abc").unwrap();
        assert_eq!(declarations(&variables), "$active:Boolean$limit:Int!$name:ID!");
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let forward = Variables::new()
            .with("a", 1_i64)
            .unwrap()
            .with("b", true)
            .unwrap()
            .with("c", "x")
            .unwrap();
        let backward = Variables::new()
            .with("c", "x")
            .unwrap()
            .with("b", true)
            .unwrap()
            .with("a", 1_i64)
            .unwrap();
        assert_eq!(forward, backward);
        assert_eq!(declarations(&forward), declarations(&backward));
    }

    #[test]
    fn test_reinsert_replaces() {
        let mut variables = Variables::new();
        variables.insert("limit", 3_i64).unwrap();
        variables.insert("limit", Some(5_i64)).unwrap();
        assert_eq!(variables.len(), 1);
        assert_eq!(declarations(&variables), "$limit:Int");
    }

    #[test]
    fn test_to_json() {
        let mut variables = Variables::new();
        variables.insert("limit", 3_i64).unwrap();
        variables.insert("name", "casa").unwrap();
        assert_eq!(
            variables.to_json(),
            serde_json::json!({"limit": 3, "name": "casa"})
        );
        assert_eq!(Variables::new().to_json(), serde_json::Value::Null);
    }
}
