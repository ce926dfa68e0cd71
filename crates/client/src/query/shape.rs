//! Declarative description of the fields a query selects.
//!
//! A [`Shape`] mirrors the structure of the value the caller wants back:
//! records with named fields, lists, optionals, and opaque scalar leaves.
//! The shape is built explicitly (no runtime type inspection) and rendered
//! into the selection clause of the document.

use super::naming;

/// The shape of a value selected by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// An opaque leaf. Never expanded into a selection set, regardless of
    /// how the decoded value is structured.
    Scalar,
    /// A record whose child fields are selected, in declaration order.
    Object(Vec<Field>),
    /// A list of the inner shape. Contributes no selection syntax.
    List(Box<Shape>),
    /// An optional of the inner shape. Contributes no selection syntax.
    Optional(Box<Shape>),
}

impl Shape {
    /// A record shape with the given fields.
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Object(fields.into_iter().collect())
    }

    /// A list of `inner`.
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// An optional `inner`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }
}

/// How a field's selection name is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldName {
    /// A declaration-style name (`ListingURL`), camel-cased at render time.
    Auto(String),
    /// Explicit selection text, emitted verbatim. May carry GraphQL
    /// arguments, e.g. `accounts(sortBy: ACCOUNT_ID_ASC, limit: 5)`.
    Explicit(String),
    /// No name of its own: the children are spliced into the parent's
    /// selection set.
    Flattened,
}

/// One field of an [`Shape::Object`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: FieldName,
    shape: Shape,
}

impl Field {
    /// A field whose selection name is derived from a declaration-style
    /// identifier (`ClientMutationID` → `clientMutationId`).
    pub fn auto(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: FieldName::Auto(name.into()),
            shape,
        }
    }

    /// A field with explicit selection text, passed through verbatim.
    ///
    /// The text may include GraphQL arguments:
    /// `Field::named("listingsAndReviews(limit: $limit)", …)`.
    pub fn named(selection: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: FieldName::Explicit(selection.into()),
            shape,
        }
    }

    /// An embedded field: its children are selected directly in the parent's
    /// braces, with no intermediate field name.
    #[must_use]
    pub fn flattened(shape: Shape) -> Self {
        Self {
            name: FieldName::Flattened,
            shape,
        }
    }
}

/// Append the minified selection clause for `shape` to `out`.
///
/// `inline` splices an object's fields into the enclosing braces instead of
/// opening a new set. List and optional wrappers are transparent and reset
/// `inline`, matching how an embedded record behind a wrapper selects as a
/// regular nested object.
pub(crate) fn write_selection(out: &mut String, shape: &Shape, inline: bool) {
    match shape {
        Shape::Scalar => {}
        Shape::List(inner) | Shape::Optional(inner) => write_selection(out, inner, false),
        Shape::Object(fields) => {
            if !inline {
                out.push('{');
            }
            for (i, field) in fields.iter().enumerate() {
                if i != 0 {
                    out.push(',');
                }
                let inline_field = matches!(field.name, FieldName::Flattened);
                match &field.name {
                    FieldName::Auto(name) => out.push_str(&naming::to_graphql_name(name)),
                    FieldName::Explicit(text) => out.push_str(text),
                    FieldName::Flattened => {}
                }
                write_selection(out, &field.shape, inline_field);
            }
            if !inline {
                out.push('}');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: &Shape) -> String {
        let mut out = String::new();
        write_selection(&mut out, shape, false);
        out
    }

    #[test]
    fn test_scalar_renders_nothing() {
        assert_eq!(render(&Shape::Scalar), "");
    }

    #[test]
    fn test_object_with_auto_and_explicit_names() {
        let shape = Shape::object([Field::auto(
            "Health",
            Shape::object([
                Field::named("_id", Shape::Scalar),
                Field::named("status", Shape::Scalar),
            ]),
        )]);
        assert_eq!(render(&shape), "{health{_id,status}}");
    }

    #[test]
    fn test_auto_names_are_camel_cased() {
        let shape = Shape::object([
            Field::auto("ListingURL", Shape::Scalar),
            Field::auto("ReviewCount", Shape::Scalar),
        ]);
        assert_eq!(render(&shape), "{listingUrl,reviewCount}");
    }

    #[test]
    fn test_explicit_arguments_pass_through_verbatim() {
        let shape = Shape::object([Field::named(
            "accounts(sortBy: ACCOUNT_ID_ASC, limit: 5)",
            Shape::object([Field::named("account_id", Shape::Scalar)]),
        )]);
        assert_eq!(
            render(&shape),
            "{accounts(sortBy: ACCOUNT_ID_ASC, limit: 5){account_id}}"
        );
    }

    #[test]
    fn test_list_and_optional_wrappers_are_transparent() {
        let shape = Shape::object([Field::auto(
            "Items",
            Shape::list(Shape::optional(Shape::object([Field::auto(
                "Name",
                Shape::Scalar,
            )]))),
        )]);
        assert_eq!(render(&shape), "{items{name}}");
    }

    #[test]
    fn test_flattened_field_splices_children() {
        let shape = Shape::object([
            Field::auto("Name", Shape::Scalar),
            Field::flattened(Shape::object([
                Field::auto("CreatedAt", Shape::Scalar),
                Field::auto("UpdatedAt", Shape::Scalar),
            ])),
            Field::auto("Status", Shape::Scalar),
        ]);
        assert_eq!(render(&shape), "{name,createdAt,updatedAt,status}");
    }

    #[test]
    fn test_flattened_behind_wrapper_keeps_braces() {
        // A wrapper between the embed marker and the object resets the
        // splice, so the record selects as a regular nested set.
        let shape = Shape::object([
            Field::auto("Name", Shape::Scalar),
            Field::flattened(Shape::optional(Shape::object([Field::auto(
                "Status",
                Shape::Scalar,
            )]))),
        ]);
        assert_eq!(render(&shape), "{name,{status}}");
    }

    #[test]
    fn test_deeply_nested_objects() {
        let shape = Shape::object([Field::auto(
            "Listing",
            Shape::object([
                Field::named("_id", Shape::Scalar),
                Field::auto(
                    "Address",
                    Shape::object([
                        Field::auto("Street", Shape::Scalar),
                        Field::auto("CountryCode", Shape::Scalar),
                    ]),
                ),
            ]),
        )]);
        assert_eq!(
            render(&shape),
            "{listing{_id,address{street,countryCode}}}"
        );
    }
}
